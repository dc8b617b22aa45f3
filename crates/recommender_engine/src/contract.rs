//! Response contract for the recommendation endpoint.
//!
//! The backend has been seen answering in two incompatible shapes. Which one
//! applies is a deployment setting; payloads are checked strictly against the
//! configured shape and anything else is a parse failure.

use serde::Deserialize;
use serde_json::Value;

use crate::{FailureKind, RecommendError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseContract {
    /// `{"movies": ["title", ...]}`
    #[default]
    DirectArray,
    /// `{"movies": ["{\"recommended_movies\": [\"title\", ...]}"]}`
    NestedJson,
}

impl ResponseContract {
    pub fn name(self) -> &'static str {
        match self {
            ResponseContract::DirectArray => "direct_array",
            ResponseContract::NestedJson => "nested_json",
        }
    }
}

#[derive(Debug, Deserialize)]
struct DirectArrayBody {
    movies: Vec<String>,
}

/// Only `movies[0]` carries the payload; later entries are not inspected.
#[derive(Debug, Deserialize)]
struct NestedJsonBody {
    #[serde(default)]
    movies: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
struct NestedPayload {
    recommended_movies: Vec<String>,
}

/// Turns a raw response into the ordered title list.
///
/// The body is parsed as JSON before the status is looked at, so a failure
/// status with a non-JSON body is a parse error.
pub fn decode_response(
    contract: ResponseContract,
    status: u16,
    body: &[u8],
) -> Result<Vec<String>, RecommendError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| RecommendError::parse(format!("body is not JSON: {err}")))?;

    if !(200..300).contains(&status) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        return Err(RecommendError::new(
            FailureKind::Server { status, message },
            format!("endpoint answered {status}"),
        ));
    }

    match contract {
        ResponseContract::DirectArray => {
            let body: DirectArrayBody = serde_json::from_value(value).map_err(|err| {
                RecommendError::parse(format!("expected movies as a list of titles: {err}"))
            })?;
            Ok(body.movies)
        }
        ResponseContract::NestedJson => {
            let body: NestedJsonBody = serde_json::from_value(value).map_err(|err| {
                RecommendError::parse(format!("expected movies as a list: {err}"))
            })?;
            let Some(first) = body.movies.and_then(|movies| movies.into_iter().next()) else {
                return Ok(Vec::new());
            };
            let first = first.as_str().ok_or_else(|| {
                RecommendError::parse(format!("expected movies[0] to be a string, got {first}"))
            })?;
            let payload: NestedPayload = serde_json::from_str(first).map_err(|err| {
                RecommendError::parse(format!("nested recommended_movies payload: {err}"))
            })?;
            Ok(payload.recommended_movies)
        }
    }
}
