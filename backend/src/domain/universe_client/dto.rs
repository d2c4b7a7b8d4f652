//! Wire DTOs for universe responses.
//!
//! Bodies decode into these shapes first and are mapped into domain payloads
//! in one pass.

use serde::Deserialize;

use crate::domain::universe::{HeaderMeta, UniverseError, UniverseRow, UniverseSuccess};
use crate::domain::wire::{self, TextCell};

#[derive(Debug, Deserialize)]
pub(super) struct UniverseResponseDto {
    #[serde(default)]
    links: Option<LinksDto>,
    #[serde(default)]
    headers: Option<Vec<HeaderMeta>>,
    #[serde(default)]
    data: Option<Vec<Vec<Option<TextCell>>>>,
}

#[derive(Debug, Deserialize)]
struct LinksDto {
    #[serde(default, deserialize_with = "wire::optional_u64")]
    count: Option<u64>,
}

impl UniverseResponseDto {
    pub(super) fn into_domain(self) -> UniverseSuccess {
        UniverseSuccess {
            count: self.links.and_then(|links| links.count).unwrap_or_default(),
            header_metas: self.headers.unwrap_or_default(),
            rows: self
                .data
                .unwrap_or_default()
                .into_iter()
                .map(|cells| {
                    UniverseRow::from_cells(
                        cells
                            .into_iter()
                            .map(|cell| cell.map(TextCell::into_inner))
                            .collect(),
                    )
                })
                .collect(),
        }
    }
}

/// Error bodies wrap the payload as `{"error": {...}}`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct UniverseErrorEnvelopeDto {
    #[serde(default)]
    error: Option<UniverseError>,
}

impl UniverseErrorEnvelopeDto {
    pub(super) fn into_domain(self) -> UniverseError {
        self.error.unwrap_or_default()
    }
}
