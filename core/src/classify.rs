//! Status-code classification.
//!
//! Only [`StatusClass::Success`] responses go on to payload decoding; every
//! other class is turned into a failure outcome without looking for a result.

/// Category of an HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// `200..300`
    Success,
    /// `400..500`, not subdivided further.
    ClientError,
    /// Exactly `500`.
    ServerError,
    /// Anything else, including `1xx`, `3xx` and `501..=599`.
    Unrecognized,
}

pub fn classify(status: u16) -> StatusClass {
    match status {
        200..=299 => StatusClass::Success,
        400..=499 => StatusClass::ClientError,
        500 => StatusClass::ServerError,
        // Design smell: unrecognized codes (502, 503, 304, ...) end up reported
        // as network failures. Kept for compatibility with existing callers.
        _ => StatusClass::Unrecognized,
    }
}
