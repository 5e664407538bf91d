use super::field_errors::FieldErrors;
use thiserror::Error;

/// Outcome of a failed remote call, or of a check that stopped the call
/// from being made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Caught locally before any request went out
    #[error("{0}")]
    Client(String),
    /// Field-keyed messages from the server
    #[error("Data tidak valid: {}", .0.summary())]
    Validation(FieldErrors),
    /// Network failure, unexpected status or unreadable response
    #[error("Terjadi kesalahan: {0}")]
    Transport(String),
}

impl ApiError {
    pub fn client(message: impl Into<String>) -> Self {
        ApiError::Client(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        ApiError::Transport(message.into())
    }

    /// Classify a non-success HTTP response.
    ///
    /// 422 and 400 bodies carrying an error map become `Validation`;
    /// everything else is a transport failure with the status attached.
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 422 || status == 400 {
            let errors = FieldErrors::from_body(body);
            if !errors.is_empty() {
                return ApiError::Validation(errors);
            }
        }
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("message")
                    .or_else(|| v.get("error"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.chars().take(200).collect());
        if detail.is_empty() {
            ApiError::Transport(format!("HTTP {}", status))
        } else {
            ApiError::Transport(format!("HTTP {}: {}", status, detail))
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_validation() {
        let err = ApiError::from_response(422, r#"{"errors":{"year":["Tahun wajib diisi"]}}"#);
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.get("year"), Some("Tahun wajib diisi"));
    }

    #[test]
    fn test_from_response_transport() {
        let err = ApiError::from_response(500, r#"{"message":"Server Error"}"#);
        assert_eq!(err, ApiError::Transport("HTTP 500: Server Error".to_string()));

        let err = ApiError::from_response(422, "");
        assert_eq!(err, ApiError::Transport("HTTP 422".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ApiError::client("Pilih bulan terlebih dahulu").to_string(),
            "Pilih bulan terlebih dahulu"
        );
    }
}
