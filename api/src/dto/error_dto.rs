use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(error: String, message: String) -> Self {
        Self {
            error,
            message,
            timestamp: Utc::now(),
        }
    }

    pub fn to_response(&self, status: StatusCode) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(status).json(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serializes_code_and_message() {
        let response = ErrorResponse::new(
            "INVALID_REFRESH_TOKEN".to_string(),
            "Refresh token is invalid".to_string(),
        );

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["error"], "INVALID_REFRESH_TOKEN");
        assert_eq!(json["message"], "Refresh token is invalid");
        assert!(json["timestamp"].is_string());
    }
}
