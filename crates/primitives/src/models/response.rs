use serde::Serialize;

/// Uniform envelope for every response, success or failure. Clients branch
/// on `statusCode`/`message`, never on structural differences.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn message(message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            data: None,
            status_code,
        }
    }

    pub fn with_data(data: T, message: impl Into<String>, status_code: u16) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            status_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_omits_null_data() {
        let body = serde_json::to_value(ApiResponse::<()>::message("ok", 200)).unwrap();
        assert_eq!(body["message"], "ok");
        assert_eq!(body["statusCode"], 200);
        assert!(body.get("data").is_none());
    }

    #[test]
    fn envelope_carries_data() {
        let body =
            serde_json::to_value(ApiResponse::with_data(vec![1, 2, 3], "listed", 200)).unwrap();
        assert_eq!(body["data"], serde_json::json!([1, 2, 3]));
        assert_eq!(body["statusCode"], 200);
    }
}
