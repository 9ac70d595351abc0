//! Outcome taxonomy and the result envelope returned by every operation.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ApiStatus
// ---------------------------------------------------------------------------

/// The outcome of one API call.
///
/// This set is closed: every way a call can end, including a dropped
/// connection or an unreadable body, lands in exactly one variant.
///
/// `#[serde(rename_all = "camelCase")]` keeps the names the server
/// documentation uses (`notFound`, `serverError`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum ApiStatus {
    /// The call succeeded and its body decoded.
    Ok,
    /// HTTP 400: the request was malformed.
    Invalid,
    /// HTTP 401 or 403: authorization failed.
    Forbidden,
    /// HTTP 404: the game or player does not exist.
    NotFound,
    /// HTTP 500.
    ServerError,
    /// Anything else: an unexpected code, a transport failure, or a
    /// body that failed to decode.
    Error,
}

impl ApiStatus {
    /// Classifies an HTTP status code.
    ///
    /// Total over every `u16`; codes outside the known set map to
    /// [`ApiStatus::Error`]. A `200` maps to `Ok` here, but the caller
    /// still has to decode the body before it can report success.
    pub fn from_http(code: u16) -> Self {
        match code {
            200 => Self::Ok,
            400 => Self::Invalid,
            401 | 403 => Self::Forbidden,
            404 => Self::NotFound,
            500 => Self::ServerError,
            _ => Self::Error,
        }
    }

    /// Returns `true` for [`ApiStatus::Ok`].
    pub fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// The lower-camel name used on the wire and in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Invalid => "invalid",
            Self::Forbidden => "forbidden",
            Self::NotFound => "notFound",
            Self::ServerError => "serverError",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ApiResult
// ---------------------------------------------------------------------------

/// A status paired with the value it produced, if any.
///
/// The fields are private so the pairing can't be broken: a value is
/// present exactly when the status is [`ApiStatus::Ok`]. The only ways in
/// are [`ApiResult::ok`] and [`ApiResult::failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    status: ApiStatus,
    value: Option<T>,
}

impl<T> ApiResult<T> {
    /// A successful outcome carrying `value`.
    pub fn ok(value: T) -> Self {
        Self {
            status: ApiStatus::Ok,
            value: Some(value),
        }
    }

    /// A failed outcome with no value.
    ///
    /// `failed(ApiStatus::Ok)` would be a success without a payload, which
    /// the envelope does not allow; it is recorded as
    /// [`ApiStatus::Error`] instead.
    pub fn failed(status: ApiStatus) -> Self {
        let status = match status {
            ApiStatus::Ok => ApiStatus::Error,
            other => other,
        };
        Self {
            status,
            value: None,
        }
    }

    pub fn status(&self) -> ApiStatus {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    /// Borrows the value. `None` whenever the status is not `Ok`.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn into_value(self) -> Option<T> {
        self.value
    }

    /// Converts into a std `Result`, for callers that want `?`.
    pub fn into_result(self) -> Result<T, ApiStatus> {
        match self.value {
            Some(value) => Ok(value),
            None => Err(self.status),
        }
    }

    /// Maps the value, keeping the status.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResult<U> {
        ApiResult {
            status: self.status,
            value: self.value.map(f),
        }
    }
}

impl<T: fmt::Display> fmt::Display for ApiResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.value {
            Some(value) => {
                write!(f, "Result {{ status={}, {} }}", self.status, value)
            }
            None => write!(f, "Result {{ status={}, none }}", self.status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_their_status() {
        assert_eq!(ApiStatus::from_http(200), ApiStatus::Ok);
        assert_eq!(ApiStatus::from_http(400), ApiStatus::Invalid);
        assert_eq!(ApiStatus::from_http(401), ApiStatus::Forbidden);
        assert_eq!(ApiStatus::from_http(403), ApiStatus::Forbidden);
        assert_eq!(ApiStatus::from_http(404), ApiStatus::NotFound);
        assert_eq!(ApiStatus::from_http(500), ApiStatus::ServerError);
    }

    #[test]
    fn test_every_other_code_maps_to_error() {
        // Exhaustive over the whole u16 range: nothing slips through.
        for code in 0..=u16::MAX {
            if matches!(code, 200 | 400 | 401 | 403 | 404 | 500) {
                continue;
            }
            assert_eq!(ApiStatus::from_http(code), ApiStatus::Error, "{code}");
        }
    }

    #[test]
    fn test_status_display_uses_wire_names() {
        assert_eq!(ApiStatus::NotFound.to_string(), "notFound");
        assert_eq!(ApiStatus::ServerError.to_string(), "serverError");
        assert_eq!(ApiStatus::Ok.to_string(), "ok");
    }

    #[test]
    fn test_status_serializes_as_camel_case() {
        let json = serde_json::to_string(&ApiStatus::NotFound).unwrap();
        assert_eq!(json, "\"notFound\"");
    }

    #[test]
    fn test_ok_result_carries_value() {
        let r = ApiResult::ok(7);
        assert!(r.is_ok());
        assert_eq!(r.value(), Some(&7));
        assert_eq!(r.into_result(), Ok(7));
    }

    #[test]
    fn test_failed_result_has_no_value() {
        for status in [
            ApiStatus::Invalid,
            ApiStatus::Forbidden,
            ApiStatus::NotFound,
            ApiStatus::ServerError,
            ApiStatus::Error,
        ] {
            let r: ApiResult<u32> = ApiResult::failed(status);
            assert_eq!(r.status(), status);
            assert!(r.value().is_none());
        }
    }

    #[test]
    fn test_failed_with_ok_is_coerced_to_error() {
        let r: ApiResult<u32> = ApiResult::failed(ApiStatus::Ok);
        assert_eq!(r.status(), ApiStatus::Error);
        assert!(r.value().is_none());
    }

    #[test]
    fn test_map_keeps_status() {
        let r: ApiResult<u32> = ApiResult::failed(ApiStatus::NotFound);
        let mapped = r.map(|v| v + 1);
        assert_eq!(mapped.status(), ApiStatus::NotFound);
        assert_eq!(ApiResult::ok(1).map(|v| v + 1).into_value(), Some(2));
    }

    #[test]
    fn test_result_display() {
        assert_eq!(ApiResult::ok(3).to_string(), "Result { status=ok, 3 }");
        let r: ApiResult<u8> = ApiResult::failed(ApiStatus::Forbidden);
        assert_eq!(r.to_string(), "Result { status=forbidden, none }");
    }
}
