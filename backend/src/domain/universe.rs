//! ESG universe request and payload types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use super::wire;

/// Token type used when the caller does not supply one.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Parameters for one universe fetch.
#[derive(Clone, PartialEq, Eq)]
pub struct UniverseRequest {
    /// Access token obtained from the token endpoint.
    pub access_token: String,
    /// Authorization scheme, normally `Bearer`.
    pub token_type: String,
}

impl UniverseRequest {
    /// Request authorised with a `Bearer` token.
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: DEFAULT_TOKEN_TYPE.to_owned(),
        }
    }

    /// Override the authorization scheme.
    #[must_use]
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// `Authorization` header value.
    pub(crate) fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for UniverseRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UniverseRequest")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Column description from the universe `headers` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMeta {
    /// Column name.
    #[serde(default)]
    pub name: Option<String>,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Column data type.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
}

/// One entity of the universe, decoded positionally from a data row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseRow {
    /// Permanent identifier (cell 0).
    pub perm_id: Option<String>,
    /// Primary RIC (cell 1).
    pub primary_ric: Option<String>,
    /// Common name (cell 2).
    pub common_name: Option<String>,
}

impl UniverseRow {
    /// Decode a row from its cells; missing cells stay unset and cells past
    /// the third are ignored.
    ///
    /// # Examples
    /// ```
    /// use dp_gateway::domain::UniverseRow;
    ///
    /// let row = UniverseRow::from_cells(vec![Some("1".to_owned()), Some("RIC.A".to_owned())]);
    /// assert_eq!(row.perm_id.as_deref(), Some("1"));
    /// assert_eq!(row.primary_ric.as_deref(), Some("RIC.A"));
    /// assert!(row.common_name.is_none());
    /// ```
    pub fn from_cells(cells: Vec<Option<String>>) -> Self {
        let mut cells = cells.into_iter();
        Self {
            perm_id: cells.next().flatten(),
            primary_ric: cells.next().flatten(),
            common_name: cells.next().flatten(),
        }
    }
}

/// Successful universe response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseSuccess {
    /// Entity count reported under `links.count`; zero when absent.
    pub count: u64,
    /// Column metadata in upstream order.
    pub header_metas: Vec<HeaderMeta>,
    /// Entities in upstream order.
    pub rows: Vec<UniverseRow>,
}

/// Structured detail attached to a universe error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniverseErrorDetail {
    /// Name of the offending parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid_name: Option<String>,
    /// Rejected values.
    #[serde(default)]
    pub invalid_values: Vec<String>,
    /// Error key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Error name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Offending value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Error payload from the universe endpoint, unwrapped from its `error` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseError {
    /// Platform error code.
    #[serde(
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub code: Option<String>,
    /// Error instance id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Platform status text.
    #[serde(
        default,
        deserialize_with = "wire::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,
    /// Structured detail, carried upstream under `errors`.
    #[serde(default, rename = "errors", skip_serializing_if = "Option::is_none")]
    pub detail: Option<UniverseErrorDetail>,
}

/// Outcome of a universe fetch.
pub type UniverseOutcome = Outcome<UniverseSuccess, UniverseError>;
