use std::{error::Error, fmt, io};

/// Errors raised by the calculator and its loaders.
#[derive(Debug)]
pub enum CopError {
    /// Physically nonsensical or mathematically undefined geometry.
    InvalidConfiguration(String),
    Io(io::Error),
    Json(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CopError>;

impl CopError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CopError::InvalidConfiguration(msg.into())
    }
}

impl fmt::Display for CopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CopError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            CopError::Io(e) => write!(f, "I/O error: {}", e),
            CopError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl Error for CopError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CopError::InvalidConfiguration(_) => None,
            CopError::Io(e) => Some(e),
            CopError::Json(e) => Some(e),
        }
    }
}

impl From<io::Error> for CopError {
    fn from(err: io::Error) -> Self {
        CopError::Io(err)
    }
}

impl From<serde_json::Error> for CopError {
    fn from(err: serde_json::Error) -> Self {
        CopError::Json(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_kind() {
        let e = CopError::invalid("fin root and tip chord are both zero");
        assert_eq!(
            e.to_string(),
            "Invalid configuration: fin root and tip chord are both zero"
        );
        assert!(e.source().is_none());
    }

    #[test]
    fn io_error_converts() {
        let e: CopError = io::Error::new(io::ErrorKind::NotFound, "missing").into();
        assert!(matches!(e, CopError::Io(_)));
        assert!(e.source().is_some());
    }
}
