// Configuration errors

use thiserror::Error;

/// Rejected gameplay constants. Raised when an actor is built, never while
/// ticking.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be greater than zero (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must lie in [{min}, {max}] (got {value})")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
}

/// Require `value > 0`
pub(crate) fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

/// Require `value >= 0`
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

/// Require `min <= value <= max`
pub(crate) fn in_range(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
) -> Result<(), ConfigError> {
    finite(field, value)?;
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

pub(crate) fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive() {
        assert!(positive("x", 1.0).is_ok());
        assert_eq!(
            positive("x", 0.0),
            Err(ConfigError::NotPositive {
                field: "x",
                value: 0.0
            })
        );
        assert_eq!(positive("x", f32::NAN), Err(ConfigError::NotFinite { field: "x" }));
    }

    #[test]
    fn test_in_range() {
        assert!(in_range("x", 5.0, 0.0, 5.0).is_ok());
        assert!(in_range("x", -0.1, 0.0, 5.0).is_err());
    }

    #[test]
    fn test_error_message() {
        let err = ConfigError::NotPositive {
            field: "max_stamina",
            value: 0.0,
        };
        assert_eq!(err.to_string(), "max_stamina must be greater than zero (got 0)");
    }
}
