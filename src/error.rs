#![warn(missing_docs)]
//! GOOSE specific error structures
use std::{error::Error, fmt::Display};

/// GOOSE application specific Result type
pub type GooseResult<T> = std::result::Result<T, GooseError>;

/// Errors that can be returned by various GOOSE functions.
#[derive(Debug, PartialEq, Eq)]
pub enum GooseError {
    /// error while defining a beam [`Source`](crate::source::Source)
    Source(String),
    /// error while creating or modifying a single optical element
    Element(String),
    /// error while structurally editing an [`OpticalSystem`](crate::system::OpticalSystem)
    SystemEdit(String),
    /// error while configuring a beam trace
    Trace(String),
    /// errors console io
    Console(String),
    /// errors not falling in one of the categories above
    Other(String),
}

impl Display for GooseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(m) => {
                write!(f, "Source:{m}")
            }
            Self::Element(m) => {
                write!(f, "Element:{m}")
            }
            Self::SystemEdit(m) => {
                write!(f, "SystemEdit:{m}")
            }
            Self::Trace(m) => {
                write!(f, "Trace:{m}")
            }
            Self::Console(m) => {
                write!(f, "Console:{m}")
            }
            Self::Other(m) => write!(f, "Goose Error:Other:{m}"),
        }
    }
}
impl Error for GooseError {}

impl std::convert::From<String> for GooseError {
    fn from(msg: String) -> Self {
        Self::Other(msg)
    }
}
#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn from() {
        let error = GooseError::from("test".to_string());
        assert_eq!(error, GooseError::Other("test".to_string()));
    }
    #[test]
    fn display() {
        assert_eq!(
            format!("{}", GooseError::Source("test".to_string())),
            "Source:test"
        );
        assert_eq!(
            format!("{}", GooseError::Element("test".to_string())),
            "Element:test"
        );
        assert_eq!(
            format!("{}", GooseError::SystemEdit("test".to_string())),
            "SystemEdit:test"
        );
        assert_eq!(
            format!("{}", GooseError::Trace("test".to_string())),
            "Trace:test"
        );
        assert_eq!(
            format!("{}", GooseError::Console("test".to_string())),
            "Console:test"
        );
        assert_eq!(
            format!("{}", GooseError::Other("test".to_string())),
            "Goose Error:Other:test"
        );
    }
    #[test]
    fn debug() {
        assert_eq!(
            format!("{:?}", GooseError::Source("test".to_string())),
            "Source(\"test\")"
        );
    }
}
