use thiserror::Error;

/// Session-layer failures surfaced to the presentation layer.
#[derive(Error, Debug)]
pub enum AuthError {
    /// An operation requiring a token was attempted with none held.
    #[error("No token available")]
    NoToken,

    /// The remote refresh call failed or returned an error payload.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),

    /// Reserved for stricter token validation (format/signature checks).
    /// Not currently produced.
    #[error("Invalid token")]
    InvalidToken,

    /// Login succeeded at the transport level but returned no usable token.
    #[error("Login returned an empty credential token")]
    EmptyCredentialToken,
}
