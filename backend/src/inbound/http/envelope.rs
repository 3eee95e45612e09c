//! JSON response envelope shared by every user endpoint.
//!
//! Success bodies carry `data`; failure bodies carry `error`. The empty field
//! is omitted rather than serialised as `null`.

use serde::Serialize;

/// Two-field wrapper rendered for every user response.
///
/// # Examples
/// ```
/// use user_registry::inbound::http::envelope::Envelope;
///
/// let body = serde_json::to_string(&Envelope::failure("nope")).unwrap();
/// assert_eq!(body, r#"{"error":"nope"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
}

impl<T> Envelope<T> {
    /// Wrap a successful payload.
    pub fn success(data: T) -> Self {
        Self {
            error: None,
            data: Some(data),
        }
    }
}

impl Envelope<()> {
    /// Wrap a client-facing failure message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            data: None,
        }
    }
}
