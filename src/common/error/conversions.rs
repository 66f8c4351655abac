//! Error conversion implementations.
//!
//! Conversions from lower-level error types that do not map one-to-one onto a
//! variant of [`Error`](super::Error).

use super::types::Error;
use crate::ooxml::error::OoxmlError;
use crate::ooxml::opc::error::OpcError;

impl From<OpcError> for Error {
    fn from(err: OpcError) -> Self {
        match err {
            OpcError::IoError(e) => Error::Io(e),
            other => Error::Ooxml(OoxmlError::Opc(other)),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(err: tokio::task::JoinError) -> Self {
        Error::Task(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opc_io_error_flattens() {
        let err: Error = OpcError::IoError(std::io::Error::other("disk full")).into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_opc_error_wraps() {
        let err: Error = OpcError::InvalidPackUri("ppt/x.xml".into()).into();
        assert!(matches!(err, Error::Ooxml(OoxmlError::Opc(_))));
        assert!(err.to_string().contains("ppt/x.xml"));
    }
}
