use serde::{Deserialize, Serialize};

/// One keyframe of a [`HeightCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub input: f32,
    pub output: f32,
}

impl CurveKey {
    pub fn new(input: f32, output: f32) -> Self {
        Self { input, output }
    }
}

/// Remap curve applied to raw octave noise before it is stored in a heightmap.
///
/// Keys are kept sorted by input. Between two keys the output follows a
/// smoothstep ease, outside the key range it is clamped to the first/last key.
/// An empty curve passes values through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CurveKey>", into = "Vec<CurveKey>")]
pub struct HeightCurve {
    keys: Vec<CurveKey>,
}

impl HeightCurve {
    pub fn new(mut keys: Vec<CurveKey>) -> Self {
        keys.retain(|key| key.input.is_finite() && key.output.is_finite());
        keys.sort_by(|a, b| a.input.total_cmp(&b.input));
        Self { keys }
    }

    pub fn identity() -> Self {
        Self { keys: Vec::new() }
    }

    /// Flat curve: every input maps to `value`.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![CurveKey::new(0.0, value)])
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    pub fn evaluate(&self, value: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return value,
        };

        if value <= first.input {
            return first.output;
        }
        if value >= last.input {
            return last.output;
        }

        // First key strictly above the value; guaranteed to exist and be > 0 here
        let upper = self.keys.partition_point(|key| key.input <= value);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];

        let span = b.input - a.input;
        if span <= f32::EPSILON {
            return b.output;
        }
        let t = (value - a.input) / span;
        let eased = t * t * (3.0 - 2.0 * t);
        a.output + (b.output - a.output) * eased
    }

    /// True when outputs never decrease along the sorted keys.
    pub fn is_monotonic(&self) -> bool {
        self.keys.windows(2).all(|pair| pair[1].output >= pair[0].output)
    }
}

impl Default for HeightCurve {
    /// Gentle island profile: deep water flattens out, mid heights stay low
    /// and walkable, only the strongest noise peaks climb into mountains.
    fn default() -> Self {
        Self::new(vec![
            CurveKey::new(-1.0, -0.3),
            CurveKey::new(-0.3, -0.02),
            CurveKey::new(0.0, 0.02),
            CurveKey::new(0.4, 0.15),
            CurveKey::new(1.0, 0.6),
        ])
    }
}

impl From<Vec<CurveKey>> for HeightCurve {
    fn from(keys: Vec<CurveKey>) -> Self {
        Self::new(keys)
    }
}

impl From<HeightCurve> for Vec<CurveKey> {
    fn from(curve: HeightCurve) -> Self {
        curve.keys
    }
}
