use thiserror::Error;

/// Everything that can go wrong talking to the films API.
///
/// Each variant's message is what the user gets to see.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    #[error("Server not reachable: {0}")]
    Unreachable(String),
    #[error("Not authorized, set a valid token with 'filmoteka config token'")]
    Unauthorized,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    #[error("HTTP client error: {0}")]
    Transport(String),
}

impl ClientError {
    /// Classify a non-success response by status code and body
    pub fn from_status(status: u16, url: &str, body: &str) -> Self {
        match status {
            401 => ClientError::Unauthorized,
            404 => ClientError::NotFound(url.to_string()),
            400..=499 => ClientError::Rejected {
                status,
                message: server_message(body).unwrap_or_else(|| "no details given".to_string()),
            },
            _ => ClientError::Server {
                status,
                message: server_message(body).unwrap_or_else(|| "no details given".to_string()),
            },
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            ClientError::Unreachable(err.to_string())
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Pull the human readable message out of an error body.
///
/// The API answers with `{"errorMessage": "..."}`; other servers in front of it
/// may send `{"message": ...}`, a bare JSON string or plain text.
fn server_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(serde_json::Value::Object(map)) => map
            .get("errorMessage")
            .or_else(|| map.get("message"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .or_else(|| Some(trimmed.to_string())),
        Ok(serde_json::Value::String(s)) => Some(s),
        _ => Some(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert_eq!(ClientError::from_status(401, "u", ""), ClientError::Unauthorized);
        assert_eq!(
            ClientError::from_status(404, "http://h/films/9", ""),
            ClientError::NotFound("http://h/films/9".to_string())
        );
        assert!(matches!(
            ClientError::from_status(409, "u", ""),
            ClientError::Rejected { status: 409, .. }
        ));
        assert!(matches!(
            ClientError::from_status(503, "u", ""),
            ClientError::Server { status: 503, .. }
        ));
    }

    #[test]
    fn test_error_message_extraction() {
        let err = ClientError::from_status(400, "u", r#"{"errorMessage":"Year out of range"}"#);
        assert_eq!(
            err,
            ClientError::Rejected { status: 400, message: "Year out of range".to_string() }
        );

        let err = ClientError::from_status(400, "u", r#""Missing title""#);
        assert_eq!(err.to_string(), "Request rejected (400): Missing title");

        let err = ClientError::from_status(500, "u", "  stack overflow  ");
        assert_eq!(err.to_string(), "Server error (500): stack overflow");

        let err = ClientError::from_status(422, "u", "");
        assert_eq!(err.to_string(), "Request rejected (422): no details given");
    }
}
