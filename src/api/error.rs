use thiserror::Error;

/// Failures reported by the voyager backend, classified by HTTP status.
///
/// `Unauthenticated` is the signal the session layer cares about: the
/// bearer token was missing, expired, or revoked, and the caller should
/// route through a refresh or back to login.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not authenticated - token missing, expired, or revoked")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// 422 from the backend: the payload was understood but rejected
    /// (taken username, malformed email, weak password).
    #[error("Rejected by server: {0}")]
    Validation(String),

    #[error("Too many requests - backend is throttling this client")]
    Throttled,

    #[error("Server error {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response {status}: {body}")]
    Unexpected { status: u16, body: String },
}

/// Error bodies longer than this are clipped before they reach logs or
/// error chains.
const MAX_ERROR_BODY_BYTES: usize = 500;

impl ApiError {
    /// Clip an error body to a sane length, backing up to a char boundary
    /// so multibyte text near the cutoff cannot split a character.
    fn clip_body(body: &str) -> String {
        let body = body.trim();
        if body.len() <= MAX_ERROR_BODY_BYTES {
            return body.to_string();
        }
        let mut cut = MAX_ERROR_BODY_BYTES;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}... ({} bytes total)", &body[..cut], body.len())
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let body = Self::clip_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthenticated,
            403 => ApiError::Forbidden(body),
            404 => ApiError::NotFound(body),
            422 => ApiError::Validation(body),
            429 => ApiError::Throttled,
            500..=599 => ApiError::Server {
                status: status.as_u16(),
                body,
            },
            _ => ApiError::Unexpected {
                status: status.as_u16(),
                body,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_mapping() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthenticated
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "nope"),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, ""),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::UNPROCESSABLE_ENTITY, "username taken"),
            ApiError::Validation(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ApiError::Throttled
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "down"),
            ApiError::Server { status: 502, .. }
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ApiError::Unexpected { status: 418, .. }
        ));
    }

    #[test]
    fn test_long_bodies_are_clipped() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let message = err.to_string();
        assert!(message.len() < body.len());
        assert!(message.contains("2000 bytes total"));
    }

    #[test]
    fn test_clip_respects_char_boundaries() {
        // A multibyte char straddling the byte limit must not split
        let mut body = "x".repeat(MAX_ERROR_BODY_BYTES - 1);
        body.push('€');
        body.push_str(&"y".repeat(100));

        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        let message = err.to_string();
        assert!(!message.contains('\u{FFFD}'));
        assert!(message.contains("bytes total"));
    }

    #[test]
    fn test_short_bodies_pass_through_untouched() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, "  private account  ");
        assert_eq!(err.to_string(), "Forbidden: private account");
    }
}
