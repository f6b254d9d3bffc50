use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("prediction service unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("request timed out")]
    Timeout,

    #[error("prediction service returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("request body could not be encoded: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Text suitable for an alert shown to the person filling in the
    /// questionnaire.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::NetworkUnreachable(_) => {
                "Unable to connect to the screening service. Please check that it is running and try again."
                    .to_string()
            }
            ClientError::Timeout => {
                "The screening service took too long to respond. Please try again.".to_string()
            }
            ClientError::HttpStatus { status } => {
                format!("The screening service returned an error (HTTP {status}). Please try again.")
            }
            ClientError::MalformedResponse(_) => {
                "The screening service sent a response that could not be read.".to_string()
            }
            ClientError::InvalidRequest(_) => {
                "Your answers could not be prepared for submission.".to_string()
            }
        }
    }
}

impl From<ureq::Error> for ClientError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(status) => ClientError::HttpStatus { status },
            ureq::Error::Timeout(_) => ClientError::Timeout,
            other => ClientError::NetworkUnreachable(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::MalformedResponse(e.to_string())
    }
}
