//! Small vector helpers shared by the carver, the blender and the world path builder.
use glam::{Quat, Vec2, Vec3};

/// Sum of consecutive point distances.
pub fn path_length(points: &[Vec3]) -> f32 {
    points.windows(2).map(|pair| pair[0].distance(pair[1])).sum()
}

/// Planar distance from `p` to the segment `from..to`, and the clamped
/// parameter of the closest point along the segment.
///
/// A zero-length segment reports the distance to `from` with parameter 1.
pub fn distance_to_segment(from: Vec2, to: Vec2, p: Vec2) -> (f32, f32) {
    let length_squared = from.distance_squared(to);
    if length_squared == 0.0 {
        return (from.distance(p), 1.0);
    }
    let t = ((p - from).dot(to - from) / length_squared).clamp(0.0, 1.0);
    let projection = from + t * (to - from);
    (projection.distance(p), t)
}

/// Signed planar angle in degrees turning `from` onto `to` about +Y.
/// Positive angles turn clockwise seen from above (north towards east).
pub fn signed_angle(from: Vec3, to: Vec3) -> f32 {
    let cross = from.z * to.x - from.x * to.z;
    let dot = from.x * to.x + from.z * to.z;
    if cross == 0.0 && dot == 0.0 {
        return 0.0;
    }
    cross.atan2(dot).to_degrees()
}

/// Rotate `v` about +Y by `degrees`, same sign convention as [`signed_angle`].
pub fn rotate_about_up(v: Vec3, degrees: f32) -> Vec3 {
    Quat::from_rotation_y(degrees.to_radians()) * v
}

/// Lower or raise `next.y` so the slope from `previous` stays within `max_incline`.
pub fn clamp_incline(previous: Vec3, mut next: Vec3, max_incline: f32) -> Vec3 {
    let planar = Vec2::new(next.x - previous.x, next.z - previous.z).length();
    let rise = next.y - previous.y;
    if planar <= f32::EPSILON {
        next.y = previous.y;
    } else if (rise / planar).abs() > max_incline {
        next.y = previous.y + rise.signum() * planar * max_incline;
    }
    next
}

/// Cut the polyline so its length is at most `target`, interpolating the last
/// point along the segment that crosses the target. Returns true when points changed.
pub fn trim_path_end(points: &mut Vec<Vec3>, target: f32) -> bool {
    let mut travelled = 0.0;
    for i in 1..points.len() {
        let (start, end) = (points[i - 1], points[i]);
        let segment = start.distance(end);
        if travelled + segment > target {
            let remaining = (target - travelled).max(0.0);
            points.truncate(i);
            if remaining > 1e-4 {
                points.push(start.lerp(end, remaining / segment));
            }
            return true;
        }
        travelled += segment;
    }
    false
}

/// Drop points closer than `min_distance` to the previously kept point.
/// Both endpoints always survive.
pub fn simplify_path(points: &[Vec3], min_distance: f32) -> Vec<Vec3> {
    let (Some(&first), Some(&last)) = (points.first(), points.last()) else {
        return Vec::new();
    };
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut kept = vec![first];
    for &point in &points[1..points.len() - 1] {
        if kept[kept.len() - 1].distance(point) >= min_distance {
            kept.push(point);
        }
    }
    while kept.len() > 1 && kept[kept.len() - 1].distance(last) < min_distance {
        kept.pop();
    }
    kept.push(last);
    kept
}
