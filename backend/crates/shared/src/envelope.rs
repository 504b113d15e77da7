//! Response Envelope
//!
//! Every JSON body leaves the server as `{"data": ...}`: the payload on
//! success, `{"error": "<message>"}` on failure.

use std::borrow::Cow;

use serde::Serialize;

/// Contents of the `data` field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Data<T> {
    Payload(T),
    Error { error: Cow<'static, str> },
}

/// `{"data": ...}` wrapper
///
/// ```rust
/// use kernel::envelope::Envelope;
///
/// let ok = serde_json::to_value(Envelope::ok(42)).unwrap();
/// assert_eq!(ok, serde_json::json!({"data": 42}));
///
/// let err = serde_json::to_value(Envelope::error("login failed")).unwrap();
/// assert_eq!(err, serde_json::json!({"data": {"error": "login failed"}}));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope<T> {
    data: Data<T>,
}

impl<T> Envelope<T> {
    pub fn ok(payload: T) -> Self {
        Self {
            data: Data::Payload(payload),
        }
    }
}

impl Envelope<()> {
    pub fn error(message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            data: Data::Error {
                error: message.into(),
            },
        }
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for Envelope<T> {
    fn into_response(self) -> axum::response::Response {
        axum::Json(self).into_response()
    }
}
