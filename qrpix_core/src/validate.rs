use std::num::{ParseIntError, TryFromIntError};

/// A configuration parameter that must be a strictly positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    BoxSize,
    Border,
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BoxSize => write!(f, "box size"),
            Self::Border => write!(f, "border value"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid {param}. Must be larger than 0")]
    InvalidConfiguration { param: Parameter, value: i64 },
    #[error("cannot interpret {param} as an integer: {source}")]
    Conversion {
        param: Parameter,
        #[source]
        source: ConversionError,
    },
}

impl ConfigError {
    /// Get the parameter that failed validation.
    pub fn parameter(&self) -> Parameter {
        match self {
            Self::InvalidConfiguration { param, .. } | Self::Conversion { param, .. } => *param,
        }
    }
}

/// Failure to interpret a value as an integer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    Parse(#[from] ParseIntError),
    #[error(transparent)]
    OutOfRange(#[from] TryFromIntError),
    #[error("{0} cannot be represented as an integer")]
    NotAnInteger(f64),
}

/// A value that can be interpreted as an integer size. Floats are truncated toward zero and
/// strings are parsed as decimal integers.
pub trait Dimension {
    fn to_dimension(self) -> Result<i64, ConversionError>;
}

macro_rules! lossless_dimension {
    ($($t:ty),*) => {
        $(impl Dimension for $t {
            fn to_dimension(self) -> Result<i64, ConversionError> {
                Ok(i64::from(self))
            }
        })*
    };
}

macro_rules! fallible_dimension {
    ($($t:ty),*) => {
        $(impl Dimension for $t {
            fn to_dimension(self) -> Result<i64, ConversionError> {
                Ok(i64::try_from(self)?)
            }
        })*
    };
}

lossless_dimension!(i8, i16, i32, i64, u8, u16, u32);
fallible_dimension!(isize, i128, u64, u128, usize);

impl Dimension for f64 {
    fn to_dimension(self) -> Result<i64, ConversionError> {
        // 2^63 is exactly representable, i64::MAX is not.
        const LIMIT: f64 = 9_223_372_036_854_775_808.0;
        let truncated = self.trunc();
        if truncated.is_finite() && (-LIMIT..LIMIT).contains(&truncated) {
            Ok(truncated as i64)
        } else {
            Err(ConversionError::NotAnInteger(self))
        }
    }
}

impl Dimension for f32 {
    fn to_dimension(self) -> Result<i64, ConversionError> {
        f64::from(self).to_dimension()
    }
}

impl Dimension for &str {
    fn to_dimension(self) -> Result<i64, ConversionError> {
        Ok(self.trim().parse::<i64>()?)
    }
}

impl Dimension for String {
    fn to_dimension(self) -> Result<i64, ConversionError> {
        self.as_str().to_dimension()
    }
}

/// Check that `size` is a valid box size, i.e. a strictly positive integer, and return it.
/// # Example
/// ```
/// use qrpix_core::{check_box_size, ConfigError};
/// assert_eq!(check_box_size(10), Ok(10));
/// assert_eq!(check_box_size("7"), Ok(7));
/// assert!(matches!(check_box_size(0), Err(ConfigError::InvalidConfiguration { .. })));
/// assert!(matches!(check_box_size("ten"), Err(ConfigError::Conversion { .. })));
/// ```
pub fn check_box_size<T: Dimension>(size: T) -> Result<u32, ConfigError> {
    check_positive(Parameter::BoxSize, size)
}

/// Check that `size` is a valid border width in modules, i.e. a strictly positive integer, and
/// return it.
/// # Example
/// ```
/// use qrpix_core::{check_border, ConfigError};
/// assert_eq!(check_border(4u8), Ok(4));
/// assert!(matches!(check_border(-1), Err(ConfigError::InvalidConfiguration { .. })));
/// ```
pub fn check_border<T: Dimension>(size: T) -> Result<u32, ConfigError> {
    check_positive(Parameter::Border, size)
}

fn check_positive<T: Dimension>(param: Parameter, size: T) -> Result<u32, ConfigError> {
    let conversion = |source: ConversionError| ConfigError::Conversion { param, source };
    let value = size.to_dimension().map_err(conversion)?;
    if value <= 0 {
        return Err(ConfigError::InvalidConfiguration { param, value });
    }
    u32::try_from(value).map_err(|err| conversion(err.into()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_positive_values_pass() {
        for n in [1i64, 2, 10, 255, 4096, u32::MAX as i64] {
            assert_eq!(check_box_size(n), Ok(n as u32));
            assert_eq!(check_border(n), Ok(n as u32));
        }
    }

    #[test]
    fn test_non_positive_values_fail() {
        for n in [0i64, -1, -10, i64::MIN] {
            assert_eq!(
                check_box_size(n),
                Err(ConfigError::InvalidConfiguration {
                    param: Parameter::BoxSize,
                    value: n
                })
            );
            assert_eq!(
                check_border(n),
                Err(ConfigError::InvalidConfiguration {
                    param: Parameter::Border,
                    value: n
                })
            );
        }
    }

    #[test]
    fn test_error_messages_name_the_parameter() {
        assert_eq!(
            check_box_size(0).unwrap_err().to_string(),
            "Invalid box size. Must be larger than 0"
        );
        assert_eq!(
            check_border(0).unwrap_err().to_string(),
            "Invalid border value. Must be larger than 0"
        );
    }

    #[test]
    fn test_non_numeric_strings_fail_conversion() {
        for input in ["", "abc", "1.5", "10px"] {
            let err = check_box_size(input).unwrap_err();
            assert!(
                matches!(err, ConfigError::Conversion { source: ConversionError::Parse(_), .. }),
                "unexpected error for {:?}: {:?}",
                input,
                err
            );
            assert_eq!(check_border(input).unwrap_err().parameter(), Parameter::Border);
        }
    }

    #[test]
    fn test_numeric_strings() {
        assert_eq!(check_box_size(" 12 "), Ok(12));
        assert_eq!(check_border(String::from("+3")), Ok(3));
        assert!(matches!(
            check_border("0"),
            Err(ConfigError::InvalidConfiguration { value: 0, .. })
        ));
    }

    #[test]
    fn test_floats_truncate() {
        assert_eq!(check_box_size(2.9f64), Ok(2));
        assert!(matches!(
            check_box_size(0.5f32),
            Err(ConfigError::InvalidConfiguration { value: 0, .. })
        ));
        assert!(matches!(
            check_border(f64::NAN),
            Err(ConfigError::Conversion {
                source: ConversionError::NotAnInteger(_),
                ..
            })
        ));
        assert!(matches!(
            check_border(f64::INFINITY),
            Err(ConfigError::Conversion { .. })
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            check_box_size(u64::MAX),
            Err(ConfigError::Conversion {
                source: ConversionError::OutOfRange(_),
                ..
            })
        ));
        assert!(matches!(
            check_box_size(u32::MAX as u64 + 1),
            Err(ConfigError::Conversion {
                source: ConversionError::OutOfRange(_),
                ..
            })
        ));
    }
}
