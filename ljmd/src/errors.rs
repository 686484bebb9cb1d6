#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Got an invalid parameter value in a function
    InvalidParameter(String),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
    /// Two particles got closer than the configured minimal distance
    Interpenetration {
        /// index of the first particle
        first: usize,
        /// index of the second particle
        second: usize,
        /// distance between the particles, or between the first particle and
        /// a periodic image of the second one
        distance: f64,
    },
    /// The particles are in a state the step can not recover from (for
    /// example a position that can not be wrapped back inside the cell)
    StateCorruption(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Interpenetration { first, second, distance } => write!(f,
                "particles {} and {} are interpenetrating (distance = {})",
                first, second, distance
            ),
            Error::StateCorruption(e) => write!(f, "corrupted simulation state: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidParameter(_) |
            Error::Interpenetration { .. } |
            Error::StateCorruption(_) => None,
            Error::Json(e) => Some(e),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        let error = Error::InvalidParameter("sigma must be positive".into());
        assert_eq!(error.to_string(), "invalid parameter: sigma must be positive");

        let error = Error::Interpenetration { first: 3, second: 8, distance: 0.25 };
        assert_eq!(error.to_string(), "particles 3 and 8 are interpenetrating (distance = 0.25)");

        let error = Error::StateCorruption("position is NaN".into());
        assert_eq!(error.to_string(), "corrupted simulation state: position is NaN");
    }

    #[test]
    fn json_source() {
        let json_error = serde_json::from_str::<f64>("not a number").unwrap_err();
        let error = Error::from(json_error);
        assert!(error.to_string().starts_with("json error: "));
        assert!(std::error::Error::source(&error).is_some());
    }
}
