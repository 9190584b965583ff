use std::f64::consts::{PI, TAU};

/// Wraps an angle into `[0, 2π)`.
#[inline(always)]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid rounds tiny negative inputs up to exactly TAU
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Signed difference `to - from` along the shorter arc, in `[-π, π)`.
#[inline(always)]
pub fn shortest_angle_diff(from: f64, to: f64) -> f64 {
    (to - from + PI).rem_euclid(TAU) - PI
}

/// Mirror a heading across a vertical wall (x component flips).
#[inline(always)]
pub fn reflect_across_vertical(angle: f64) -> f64 {
    normalize_angle(PI - angle)
}

/// Mirror a heading across a horizontal wall (y component flips).
#[inline(always)]
pub fn reflect_across_horizontal(angle: f64) -> f64 {
    normalize_angle(-angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_normalize_angle_range() {
        for &angle in &[0.0, 1.0, TAU, -1.0, 7.5 * PI, -13.0 * PI, 1e6] {
            let n = normalize_angle(angle);
            assert!(
                (0.0..TAU).contains(&n),
                "Angle {} normalized to {}",
                angle,
                n
            );
        }
    }

    #[test]
    fn test_normalize_angle_tiny_negative() {
        let n = normalize_angle(-1e-18);
        assert!(n < TAU);
    }

    #[test]
    fn test_normalize_keeps_direction() {
        let n = normalize_angle(-FRAC_PI_2);
        assert!((n - 1.5 * PI).abs() < EPS);
    }

    #[test]
    fn test_shortest_diff_prefers_short_arc() {
        // From 350° to 10° is +20°, not -340°
        let from = 350f64.to_radians();
        let to = 10f64.to_radians();
        let d = shortest_angle_diff(from, to);
        assert!((d - 20f64.to_radians()).abs() < EPS, "diff was {}", d);

        let d = shortest_angle_diff(to, from);
        assert!((d + 20f64.to_radians()).abs() < EPS, "diff was {}", d);
    }

    #[test]
    fn test_shortest_diff_bounds() {
        for i in 0..64 {
            let from = i as f64 * 0.37;
            for j in 0..64 {
                let to = j as f64 * -0.53;
                let d = shortest_angle_diff(from, to);
                assert!((-PI..PI).contains(&d));
            }
        }
    }

    #[test]
    fn test_reflections() {
        // Heading right, bouncing off a vertical wall, heads left
        let r = reflect_across_vertical(0.0);
        assert!((r - PI).abs() < EPS);
        // Heading down (+y), bouncing off a horizontal wall, heads up
        let r = reflect_across_horizontal(FRAC_PI_2);
        assert!((r - 1.5 * PI).abs() < EPS);
    }
}
