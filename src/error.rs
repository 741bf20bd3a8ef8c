use serde::Serialize;

/// Failure body shared by every endpoint.
#[derive(Serialize, PartialEq, Debug)]
pub struct ErrorJson {
    success: bool,
    error: String,
}

impl ErrorJson {
    pub fn new<T: std::fmt::Display>(error: T) -> Self {
        Self {
            success: false,
            error: format!("{error}")
        }
    }
}

impl From<ErrorJson> for Vec<u8> {
    fn from(val: ErrorJson) -> Self {
        serde_json::to_string(&val).unwrap().into_bytes()
    }
}
