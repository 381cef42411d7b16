/*
[INPUT]:  Raw JSON response bodies carrying resultCode + timestamp
[OUTPUT]: Typed payloads or RemoteRejected errors
[POS]:    HTTP layer - result code decoding shared by every endpoint
[UPDATE]: When the exchange changes its response envelope
*/

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::http::{AnxError, Result};

const RESULT_CODE_FIELD: &str = "resultCode";
const TIMESTAMP_FIELD: &str = "timestamp";
const SUCCESS_CODE: &str = "OK";

/// Outcome signalled by the `resultCode` field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultCode {
    Ok,
    Rejected(String),
}

impl ResultCode {
    fn from_field(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(code)) if code == SUCCESS_CODE => ResultCode::Ok,
            Some(Value::String(code)) => ResultCode::Rejected(code.clone()),
            Some(Value::Null) | None => ResultCode::Rejected(String::new()),
            Some(other) => ResultCode::Rejected(other.to_string()),
        }
    }
}

/// Successful response: the payload fields with the envelope stripped off
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEnvelope<T> {
    pub timestamp: Option<i64>,
    pub payload: T,
}

impl<T> ResultEnvelope<T> {
    pub fn into_payload(self) -> T {
        self.payload
    }
}

/// Decode a raw response body.
///
/// The result code is checked before the payload is deserialized, so a
/// failure shell never reaches the endpoint type.
pub fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<ResultEnvelope<T>> {
    let value: Value = serde_json::from_slice(body)?;
    decode_value(value)
}

pub fn decode_value<T: DeserializeOwned>(value: Value) -> Result<ResultEnvelope<T>> {
    let mut object = match value {
        Value::Object(object) => object,
        _ => {
            return Err(AnxError::RemoteRejected {
                code: String::new(),
            });
        }
    };

    let code = ResultCode::from_field(object.get(RESULT_CODE_FIELD));
    if let ResultCode::Rejected(code) = code {
        return Err(AnxError::RemoteRejected { code });
    }

    object.remove(RESULT_CODE_FIELD);
    let timestamp = object.remove(TIMESTAMP_FIELD).and_then(|ts| parse_timestamp(&ts));
    let payload = serde_json::from_value(Value::Object(object))?;

    Ok(ResultEnvelope { timestamp, payload })
}

fn parse_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
