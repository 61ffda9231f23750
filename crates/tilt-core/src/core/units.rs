use glam::Vec2;

/// Scale factor between screen pixels and simulation meters.
/// The whole public API of this crate speaks pixels; Rapier sees meters.
pub const PIXELS_PER_METER: f32 = 50.0;

pub fn pixels_to_meters(px: f32) -> f32 {
    px / PIXELS_PER_METER
}

pub fn meters_to_pixels(m: f32) -> f32 {
    m * PIXELS_PER_METER
}

pub fn vec_to_meters(px: Vec2) -> Vec2 {
    px / PIXELS_PER_METER
}

pub fn vec_to_pixels(m: Vec2) -> Vec2 {
    m * PIXELS_PER_METER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_is_exact_within_tolerance() {
        // Sweep the playfield coordinate range.
        let mut x = -100.0f32;
        while x <= 900.0 {
            let back = meters_to_pixels(pixels_to_meters(x));
            assert!(
                (back - x).abs() < 1e-3,
                "round trip drifted: {} -> {}",
                x,
                back
            );
            x += 7.3;
        }
    }

    #[test]
    fn vec_round_trip() {
        let v = Vec2::new(388.0, 441.0);
        let back = vec_to_pixels(vec_to_meters(v));
        assert!((back - v).length() < 1e-3);
    }
}
