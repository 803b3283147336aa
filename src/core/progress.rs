//! Clamped progress percentages for expansion and profile meters.

use anyhow::{Result, bail};

/// Converts a `current`/`target` pair into a percentage clamped to
/// `[0, 100]`. Exceeding the target reports 100%, never more.
///
/// A non-positive target is a configuration error, reported explicitly
/// instead of producing `NaN` or infinity.
pub fn progress_pct(current: f64, target: f64) -> Result<f64> {
    if target <= 0.0 {
        bail!("Progress target must be positive, got {target}");
    }
    Ok(((current / target) * 100.0).clamp(0.0, 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_within_target() {
        assert_eq!(progress_pct(25.0, 100.0).unwrap(), 25.0);
        assert_eq!(progress_pct(0.0, 100.0).unwrap(), 0.0);
        assert_eq!(progress_pct(100.0, 100.0).unwrap(), 100.0);
    }

    #[test]
    fn test_progress_clamped_at_100() {
        assert_eq!(progress_pct(150.0, 100.0).unwrap(), 100.0);
        assert_eq!(progress_pct(8_420.0, 100.0).unwrap(), 100.0);
    }

    #[test]
    fn test_negative_current_clamped_at_0() {
        assert_eq!(progress_pct(-5.0, 100.0).unwrap(), 0.0);
    }

    #[test]
    fn test_zero_target_is_an_error() {
        let err = progress_pct(10.0, 0.0).unwrap_err().to_string();
        assert!(err.contains("must be positive"));
        assert!(progress_pct(10.0, -3.0).is_err());
    }
}
