use std::fmt::{Display, Formatter};

#[derive(Debug, Clone)]
pub struct HubError {
    pub cause: String
}

impl HubError {
    pub fn new(cause: String) -> Self {
        HubError { cause }
    }
}

impl std::error::Error for HubError {}

impl Display for HubError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "cause: {}", self.cause)
    }
}

impl From<String> for HubError {
    fn from(cause: String) -> Self {
        Self { cause }
    }
}

impl From<&str> for HubError {
    fn from(cause: &str) -> Self {
        Self { cause: cause.to_string() }
    }
}

impl From<reqwest::Error> for HubError {
    fn from(err: reqwest::Error) -> Self {
        Self { cause: format!("Request error: {}", err) }
    }
}

impl From<serde_json::Error> for HubError {
    fn from(err: serde_json::Error) -> Self {
        Self { cause: format!("Invalid JSON payload: {}", err) }
    }
}
