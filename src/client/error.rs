/// Failure of a call made through [`super::ApiClient`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the bearer token, or none was sent.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{code} ({status}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Text suitable for showing next to a form.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Unauthorized(message) => message.clone(),
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Transport(_) => "Could not reach the server".to_string(),
            ClientError::Decode(_) => "The server sent an unexpected response".to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized(_))
    }
}
