//! Season persistence.
//!
//! [`SeasonStore`] is the interface to the account database. The server
//! only needs to look a season up by name and record it on an account;
//! [`MemorySeasonStore`] is the implementation used by default and in
//! tests.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use color_advisor_core::{AnalysisResult, Season};
use serde::Serialize;
use strum::IntoEnumIterator;
use thiserror::Error;

/// A row of the season table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SeasonRecord {
    /// Season identifier.
    pub id: i64,
    /// Season name.
    pub name: Season,
    /// Localized name shown to users.
    pub display_name: String,
}

/// The season recorded on an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AccountSeason {
    /// Identifier of the recorded season.
    pub season_id: i64,
    /// When the analysis was completed.
    pub analyzed_at: DateTime<Utc>,
}

/// Errors returned by a [`SeasonStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The referenced season does not exist.
    #[error("unknown season id {0}")]
    UnknownSeason(i64),
    /// The underlying storage failed.
    #[error("storage error: {0}")]
    Backend(String),
}

/// The persistence collaborator for analyzed seasons.
#[async_trait]
pub trait SeasonStore: Send + Sync {
    /// Looks a season up by its lowercase name.
    async fn find_season(
        &self,
        name: &str,
    ) -> Result<Option<SeasonRecord>, StoreError>;

    /// Records `season_id` as the season of `account_id`.
    async fn record_analysis(
        &self,
        account_id: i64,
        season_id: i64,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

/// An in-memory [`SeasonStore`] seeded with the four seasons.
#[derive(Debug)]
pub struct MemorySeasonStore {
    seasons: Vec<SeasonRecord>,
    accounts: Mutex<HashMap<i64, AccountSeason>>,
}

impl MemorySeasonStore {
    /// Creates a store with the four seasons and no accounts.
    pub fn new() -> Self {
        let seasons = Season::iter()
            .zip(1..)
            .map(|(name, id)| SeasonRecord {
                id,
                name,
                display_name: name.display_name().to_owned(),
            })
            .collect();
        Self {
            seasons,
            accounts: Default::default(),
        }
    }

    /// Returns the season recorded on `account_id`.
    pub fn account_season(&self, account_id: i64) -> Option<AccountSeason> {
        self.accounts().get(&account_id).cloned()
    }

    fn accounts(&self) -> MutexGuard<'_, HashMap<i64, AccountSeason>> {
        self.accounts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MemorySeasonStore {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SeasonStore for MemorySeasonStore {
    async fn find_season(
        &self,
        name: &str,
    ) -> Result<Option<SeasonRecord>, StoreError> {
        Ok(self
            .seasons
            .iter()
            .find(|record| record.name.as_ref() == name)
            .cloned())
    }

    async fn record_analysis(
        &self,
        account_id: i64,
        season_id: i64,
        analyzed_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if !self.seasons.iter().any(|record| record.id == season_id) {
            return Err(StoreError::UnknownSeason(season_id));
        }
        self.accounts().insert(
            account_id,
            AccountSeason {
                season_id,
                analyzed_at,
            },
        );
        Ok(())
    }
}

/// Records the season of a completed analysis on an account.
///
/// Failures are logged and never propagated: an analysis that cannot be
/// recorded is still returned to the client.
pub async fn persist_analysis(
    store: &dyn SeasonStore,
    account_id: i64,
    result: &AnalysisResult,
) {
    let Some(label) = result.season_label() else {
        warn!(account_id, "analysis has no season, nothing to record");
        return;
    };

    let record = match store.find_season(label).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            warn!("season '{label}' not found in the season table");
            return;
        }
        Err(err) => {
            error!(account_id, "failed to look up season '{label}': {err}");
            return;
        }
    };

    match store.record_analysis(account_id, record.id, Utc::now()).await {
        Ok(()) => info!(account_id, season = %record.name, "color season updated"),
        Err(err) => {
            error!(account_id, "failed to update account color season: {err}")
        }
    }
}
