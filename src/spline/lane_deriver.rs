// src/spline/lane_deriver.rs
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::WorldGenerationParameters;
use crate::error::{Result, WorldGenError};

/// Catmull-Rom curve through the master control points.
///
/// `t` runs over `[0, 1]` across the whole path. Paths with fewer than four
/// points degrade to a straight line between the first and last point.
#[derive(Debug, Clone, PartialEq)]
pub struct CatmullRomPath {
    points: Vec<Vec3>,
}

impl CatmullRomPath {
    pub fn new(points: Vec<Vec3>) -> Result<Self> {
        if points.len() < 2 {
            return Err(WorldGenError::NotEnoughPathPoints { count: points.len() });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    fn is_linear(&self) -> bool {
        self.points.len() < 4
    }

    fn first(&self) -> Vec3 {
        self.points[0]
    }

    fn last(&self) -> Vec3 {
        self.points[self.points.len() - 1]
    }

    /// Control points around `t` and the local parameter inside that span.
    fn span(&self, t: f32) -> ([Vec3; 4], f32) {
        let count = self.points.len();
        let scaled = t.clamp(0.0, 1.0) * (count - 1) as f32;
        let i = (scaled.floor() as usize).min(count - 2);
        let f = scaled - i as f32;

        let p = |index: usize| self.points[index.min(count - 1)];
        ([p(i.saturating_sub(1)), p(i), p(i + 1), p(i + 2)], f)
    }

    pub fn position(&self, t: f32) -> Vec3 {
        if self.is_linear() {
            return self.first().lerp(self.last(), t.clamp(0.0, 1.0));
        }
        let ([p0, p1, p2, p3], f) = self.span(t);
        let f2 = f * f;
        let f3 = f2 * f;
        0.5 * ((2.0 * p1)
            + (-p0 + p2) * f
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * f2
            + (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * f3)
    }

    /// Unnormalized derivative with respect to the local span parameter.
    pub fn tangent(&self, t: f32) -> Vec3 {
        if self.is_linear() {
            let along = self.last() - self.first();
            return if along == Vec3::ZERO { Vec3::Z } else { along };
        }
        let ([p0, p1, p2, p3], f) = self.span(t);
        0.5 * ((-p0 + p2)
            + 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * f
            + 3.0 * (-p0 + 3.0 * p1 - 3.0 * p2 + p3) * f * f)
    }

    /// Horizontal unit vector pointing to the left of the direction of travel.
    pub fn normal(&self, t: f32) -> Vec3 {
        let normal = self.tangent(t).normalize_or_zero().cross(Vec3::Y).normalize_or_zero();
        if normal == Vec3::ZERO { Vec3::NEG_X } else { normal }
    }

    /// The two master points bracketing `t` and the weight between them.
    pub fn segment(&self, t: f32) -> (Vec3, Vec3, f32) {
        let index = t.clamp(0.0, 1.0) * (self.points.len() - 1) as f32;
        let previous = index.floor() as usize;
        let next = (index.ceil() as usize).min(self.points.len() - 1);
        (self.points[previous], self.points[next], index - previous as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Lane {
    Left,
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// Multiple of the lane offset applied along the curve normal.
    pub fn offset_factor(self) -> f32 {
        match self {
            Lane::Left => 1.0,
            Lane::Center => 0.0,
            Lane::Right => -1.0,
        }
    }
}

/// Center curve and its two parallel lanes, sampled at the same parameters.
#[derive(Debug, Clone)]
pub struct LaneSet {
    curve: CatmullRomPath,
    lane_offset: f32,
    center: Vec<Vec3>,
    left: Vec<Vec3>,
    right: Vec<Vec3>,
}

impl LaneSet {
    pub fn curve(&self) -> &CatmullRomPath {
        &self.curve
    }

    pub fn lane_offset(&self) -> f32 {
        self.lane_offset
    }

    pub fn lane(&self, lane: Lane) -> &[Vec3] {
        match lane {
            Lane::Left => &self.left,
            Lane::Center => &self.center,
            Lane::Right => &self.right,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.center.len()
    }

    /// Continuous position on a lane, not limited to the stored samples.
    pub fn position_on(&self, lane: Lane, t: f32) -> Vec3 {
        self.curve.position(t) + self.curve.normal(t) * self.lane_offset * lane.offset_factor()
    }
}

/// Turns simplified master points into a smooth center curve plus two lanes.
#[derive(Debug, Clone)]
pub struct LaneDeriver {
    lane_offset: f32,
    samples_per_curve: u32,
}

impl LaneDeriver {
    pub fn new(params: &WorldGenerationParameters) -> Self {
        Self { lane_offset: params.lane_offset, samples_per_curve: params.samples_per_curve.max(1) }
    }

    pub fn derive(&self, control_points: &[Vec3]) -> Result<LaneSet> {
        let curve = CatmullRomPath::new(control_points.to_vec())?;
        let total = (control_points.len() - 1) * self.samples_per_curve as usize;

        let mut center = Vec::with_capacity(total + 1);
        let mut left = Vec::with_capacity(total + 1);
        let mut right = Vec::with_capacity(total + 1);
        for i in 0..=total {
            let t = i as f32 / total as f32;
            let position = curve.position(t);
            let side = curve.normal(t) * self.lane_offset;
            center.push(position);
            left.push(position + side);
            right.push(position - side);
        }

        log::debug!(
            "LaneDeriver: sampled {} points per lane from {} control points",
            center.len(),
            control_points.len()
        );
        Ok(LaneSet { curve, lane_offset: self.lane_offset, center, left, right })
    }
}
