//! Driving port for fetching the ESG universe.

use async_trait::async_trait;

use super::ClientError;
use crate::domain::{ResponseStatus, UniverseOutcome, UniverseRequest, UniverseRow, UniverseSuccess};

/// Use-case port for universe fetches.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UniverseService: Send + Sync {
    /// Fetch the universe visible to `request`'s access token.
    ///
    /// Upstream rejections arrive as `Ok(Outcome::Failure { .. })`.
    async fn fetch_universe(
        &self,
        request: &UniverseRequest,
    ) -> Result<UniverseOutcome, ClientError>;
}

/// Fixture returning a one-row universe without network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureUniverseService;

#[async_trait]
impl UniverseService for FixtureUniverseService {
    async fn fetch_universe(
        &self,
        _request: &UniverseRequest,
    ) -> Result<UniverseOutcome, ClientError> {
        Ok(UniverseOutcome::Success {
            status: ResponseStatus::new(200, "OK"),
            payload: UniverseSuccess {
                count: 1,
                header_metas: Vec::new(),
                rows: vec![UniverseRow {
                    perm_id: Some("4295907168".to_owned()),
                    primary_ric: Some("MSFT.O".to_owned()),
                    common_name: Some("Microsoft Corp".to_owned()),
                }],
            },
        })
    }
}
