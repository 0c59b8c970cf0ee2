//! Interpretation of a tianapi response body.
//!
//! The body carries a `code` discriminator. `200` (number or string) means
//! the `newslist` array holds the records; anything else means `msg` holds
//! a human-readable reason. The two outcomes never mix.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::FetchError;

/// One record of a successful response. Shape depends on the endpoint.
pub type Record = Map<String, Value>;

/// Tagged result of one API call.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success { records: Vec<Record> },
    Failure { message: String },
}

/// Wire shape; only the fields the interpreter needs.
#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    code: Value,
    #[serde(default)]
    newslist: Option<Vec<Value>>,
    #[serde(default)]
    msg: Option<String>,
}

fn is_success(code: &Value) -> bool {
    match code {
        Value::Number(n) => n.as_i64() == Some(200),
        Value::String(s) => s.trim() == "200",
        _ => false,
    }
}

/// Parse and interpret a response body.
pub fn interpret(body: &str) -> Result<Outcome, FetchError> {
    let raw: RawResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;

    if is_success(&raw.code) {
        let records = raw
            .newslist
            .unwrap_or_default()
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect();
        return Ok(Outcome::Success { records });
    }

    let message = raw
        .msg
        .unwrap_or_else(|| format!("接口返回错误 (code {})", raw.code));
    Ok(Outcome::Failure { message })
}
