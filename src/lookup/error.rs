use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
    io::Error as IoError,
};

use serde_json::error::Error as SerdeJsonError;

/// Failures outside the per-candidate try/continue loop. Candidate misses
/// never show up here, they only advance the search.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub enum LookupError {
    WorkingDir(IoError),
    SerializationFailed(SerdeJsonError),
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::WorkingDir(e) => Some(e),
            Self::SerializationFailed(e) => Some(e)
        }
    }
}

impl Display for LookupError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", match self {
            Self::WorkingDir(e) => format!("failed to resolve working directory: {e}"),
            Self::SerializationFailed(e) => format!("serialization of lookup result failed: {e}")
        })
    }
}

impl From<IoError> for LookupError {
    fn from(value: IoError) -> Self {
        Self::WorkingDir(value)
    }
}

impl From<SerdeJsonError> for LookupError {
    fn from(value: SerdeJsonError) -> Self {
        Self::SerializationFailed(value)
    }
}
