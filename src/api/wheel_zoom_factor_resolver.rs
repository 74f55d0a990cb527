use crate::error::{ChartError, ChartResult};

/// Zoom factor for one wheel notch.
///
/// Positive rotation zooms out by `1 + zoom_factor`, negative rotation zooms
/// in by its reciprocal. Only the sign of `rotation` matters.
pub fn resolve_wheel_zoom_factor(rotation: i32, zoom_factor: f64) -> ChartResult<Option<f64>> {
    if !zoom_factor.is_finite() || zoom_factor < 0.0 {
        return Err(ChartError::InvalidData(
            "wheel zoom factor must be finite and >= 0".to_owned(),
        ));
    }
    if rotation == 0 || zoom_factor == 0.0 {
        return Ok(None);
    }

    let base = 1.0 + zoom_factor;
    let factor = if rotation < 0 { 1.0 / base } else { base };
    Ok(Some(factor))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::resolve_wheel_zoom_factor;

    #[test]
    fn zero_rotation_returns_none() {
        let factor = resolve_wheel_zoom_factor(0, 0.1).expect("factor");
        assert!(factor.is_none());
    }

    #[test]
    fn negative_rotation_zooms_in() {
        let factor = resolve_wheel_zoom_factor(-1, 0.10)
            .expect("factor")
            .expect("some");
        assert_relative_eq!(factor, 1.0 / 1.10);
        assert!(factor < 1.0);
    }

    #[test]
    fn positive_rotation_zooms_out() {
        let factor = resolve_wheel_zoom_factor(1, 0.10)
            .expect("factor")
            .expect("some");
        assert_relative_eq!(factor, 1.10);
    }

    #[test]
    fn rotation_magnitude_is_ignored() {
        let one = resolve_wheel_zoom_factor(1, 0.25).expect("factor");
        let three = resolve_wheel_zoom_factor(3, 0.25).expect("factor");
        assert_eq!(one, three);
    }

    #[test]
    fn rejects_negative_or_non_finite_setting() {
        let err = resolve_wheel_zoom_factor(1, -0.5).expect_err("negative must fail");
        assert!(format!("{err}").contains("wheel zoom factor"));

        let err = resolve_wheel_zoom_factor(1, f64::NAN).expect_err("nan must fail");
        assert!(format!("{err}").contains("wheel zoom factor"));
    }
}
