use engine::EngineError;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Registry-layer errors, mapped onto the `{success: false, error}` wire
/// shape the external caller expects.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Event {0} is not registered")]
    UnknownEvent(Uuid),

    #[error("Malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RegistryError>;

impl RegistryError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Engine(error) => error.kind(),
            Self::UnknownEvent(_) => "not_found",
            Self::Payload(_) => "validation",
        }
    }

    pub fn to_response(&self) -> serde_json::Value {
        json!({
            "success": false,
            "error": self.to_string(),
            "kind": self.kind(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_shape() {
        let response = RegistryError::Engine(EngineError::Locked).to_response();
        assert_eq!(response["success"], false);
        assert_eq!(response["kind"], "locked");
        assert!(response["error"].as_str().is_some());
    }
}
