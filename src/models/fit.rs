use std::fmt;
use std::str::FromStr;

use crate::error::ProcessError;

/// How a source image is mapped onto the display canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitPolicy {
    /// Scale to fit inside the canvas, centered, padded with the background
    #[default]
    Contain,
    /// Scale to fill the canvas, center-cropping the overflow
    Cover,
    /// Stretch to the canvas, ignoring aspect ratio
    Fill,
}

impl FitPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitPolicy::Contain => "contain",
            FitPolicy::Cover => "cover",
            FitPolicy::Fill => "fill",
        }
    }
}

impl fmt::Display for FitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FitPolicy {
    type Err = ProcessError;

    /// Case-insensitive; an empty string means the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "contain" => Ok(FitPolicy::Contain),
            "cover" => Ok(FitPolicy::Cover),
            "fill" => Ok(FitPolicy::Fill),
            _ => Err(ProcessError::UnsupportedFit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fit_names() {
        assert_eq!("contain".parse::<FitPolicy>().unwrap(), FitPolicy::Contain);
        assert_eq!("Cover".parse::<FitPolicy>().unwrap(), FitPolicy::Cover);
        assert_eq!(" FILL ".parse::<FitPolicy>().unwrap(), FitPolicy::Fill);
    }

    #[test]
    fn test_empty_fit_is_contain() {
        assert_eq!("".parse::<FitPolicy>().unwrap(), FitPolicy::Contain);
        assert_eq!(FitPolicy::default(), FitPolicy::Contain);
    }

    #[test]
    fn test_unknown_fit_rejected() {
        let err = "tile".parse::<FitPolicy>().unwrap_err();
        assert!(matches!(err, ProcessError::UnsupportedFit(ref s) if s == "tile"));
    }

    #[test]
    fn test_display_round_trips() {
        for fit in [FitPolicy::Contain, FitPolicy::Cover, FitPolicy::Fill] {
            assert_eq!(fit.to_string().parse::<FitPolicy>().unwrap(), fit);
        }
    }
}
