//! Serde helpers for the loosely typed fields of data platform payloads.
//!
//! The platform is inconsistent about numbers: `expires_in` and `links.count`
//! have both been observed as JSON numbers and as numeric strings, and error
//! `code`/`status` fields as strings and as numbers. Universe row cells are
//! usually strings, but numeric PermIds arrive unquoted.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use tracing::warn;

use crate::domain::ports::{ClientError, HttpResponse};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

/// Optional non-negative integer given as a number or a numeric string.
pub(crate) fn optional_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrText>::deserialize(deserializer)?
        .map(|raw| match raw {
            NumberOrText::Number(value) => Ok(value),
            NumberOrText::Text(text) => text
                .trim()
                .parse::<u64>()
                .map_err(|err| D::Error::custom(format!("invalid integer {text:?}: {err}"))),
        })
        .transpose()
}

/// Like [`optional_u64`], with `null` and missing values read as zero.
pub(crate) fn u64_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    optional_u64(deserializer).map(Option::unwrap_or_default)
}

/// Optional string that may arrive as a JSON number.
pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<TextOrNumber>::deserialize(deserializer)?.map(|raw| match raw {
            TextOrNumber::Text(text) => text,
            TextOrNumber::Number(number) => number.to_string(),
        }),
    )
}

/// Scalar cell read as text; numbers keep their JSON rendering.
#[derive(Debug, Deserialize)]
#[serde(from = "TextOrNumber")]
pub(crate) struct TextCell(String);

impl From<TextOrNumber> for TextCell {
    fn from(raw: TextOrNumber) -> Self {
        match raw {
            TextOrNumber::Text(text) => Self(text),
            TextOrNumber::Number(number) => Self(number.to_string()),
        }
    }
}

impl TextCell {
    pub(crate) fn into_inner(self) -> String {
        self.0
    }
}

/// Decode a JSON body, reporting shape mismatches as
/// [`ClientError::MalformedResponse`].
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, ClientError> {
    serde_json::from_slice(body)
        .map_err(|err| ClientError::malformed_response(format!("invalid {what} payload: {err}")))
}

/// Decode a non-200 error body, keeping only the status when it is empty or
/// not the documented shape.
pub(crate) fn decode_error_body<T: DeserializeOwned + Default>(
    response: &HttpResponse,
    what: &str,
) -> T {
    if !response.has_content() {
        return T::default();
    }
    serde_json::from_slice(&response.body).unwrap_or_else(|err| {
        warn!(
            status = response.status,
            error = %err,
            "{what} body not understood; keeping status only"
        );
        T::default()
    })
}
