//! Turning a raw response into an [`Outcome`].
//!
//! # Design
//! Three steps run in order. The `{isSuccess, message}` envelope is parsed
//! first, at every status, with `result` left untyped; a body that is not an
//! envelope is `DecodeFailed` and is never reclassified by status. The status
//! code is classified next, and rejections carry the envelope's `message`
//! verbatim without looking at `result`. Only for `2xx` is `isSuccess`
//! checked and the result decoded into `T`. A `200` with `isSuccess: false`
//! is an ordinary failure path, not an anomaly.

use serde::de::DeserializeOwned;

use crate::classify::{classify, StatusClass};
use crate::http::HttpResponse;
use crate::outcome::{Outcome, TransportError, TransportErrorKind};
use crate::types::ResponseEnvelope;

pub fn decode_response<T: DeserializeOwned>(response: &HttpResponse) -> Outcome<T> {
    let status = response.status;
    let envelope: ResponseEnvelope<serde_json::Value> = match serde_json::from_slice(&response.body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(status, error = %e, "response body is not a valid envelope");
            return Outcome::DecodeFailed(e.to_string());
        }
    };

    match classify(status) {
        StatusClass::Success => decode_result(status, envelope),
        StatusClass::ClientError => Outcome::ClientRejected {
            status: Some(status),
            message: envelope.message,
        },
        StatusClass::ServerError => Outcome::ServerFailed {
            status,
            message: envelope.message,
        },
        StatusClass::Unrecognized => Outcome::TransportFailed(TransportError::new(
            TransportErrorKind::UnrecognizedStatus(status),
            format!("unexpected status {status}"),
        )),
    }
}

fn decode_result<T: DeserializeOwned>(status: u16, envelope: ResponseEnvelope<serde_json::Value>) -> Outcome<T> {
    if !envelope.is_success {
        return Outcome::ServerFailed {
            status,
            message: envelope.message,
        };
    }

    let Some(result) = envelope.result else {
        tracing::warn!(status, "successful envelope has no result");
        return Outcome::DecodeFailed("envelope has no result".to_string());
    };

    match serde_json::from_value(result) {
        Ok(value) => Outcome::Success(value),
        Err(e) => {
            tracing::warn!(status, error = %e, "envelope result has unexpected shape");
            Outcome::DecodeFailed(e.to_string())
        }
    }
}
