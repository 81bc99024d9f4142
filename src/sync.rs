//! List synchronizer
//!
//! Fetches the tier and config lists into [`AppState`] and applies local removals
//! after deletes. Results are written back with a short write lock; whichever
//! request finishes last wins.

use crate::api::LoyaltyApi;
use crate::error::{Action, DashboardError};
use crate::session::Session;
use crate::state::{write_if_current, AppState, RecordList, SharedState};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fetch the tier list, replacing the in-memory list on success
pub async fn load_tiers(
    state: &SharedState,
    api: &dyn LoyaltyApi,
    session: &Session,
) -> Result<usize, DashboardError> {
    load_into(state, |s| &mut s.tiers, async {
        let token = session.token()?;
        api.list_tiers(token)
            .await
            .map_err(|e| DashboardError::from_api(&e, Action::LoadTiers))
    })
    .await
}

/// Fetch the config list, replacing the in-memory list on success
pub async fn load_configs(
    state: &SharedState,
    api: &dyn LoyaltyApi,
    session: &Session,
) -> Result<usize, DashboardError> {
    load_into(state, |s| &mut s.configs, async {
        let token = session.token()?;
        api.list_configs(token)
            .await
            .map_err(|e| DashboardError::from_api(&e, Action::LoadConfigs))
    })
    .await
}

async fn load_into<T, F>(
    state: &SharedState,
    select: fn(&mut AppState) -> &mut RecordList<T>,
    fetch: F,
) -> Result<usize, DashboardError>
where
    F: Future<Output = Result<Vec<T>, DashboardError>>,
{
    let generation = state
        .write()
        .map(|mut s| {
            let list = select(&mut s);
            list.loading = true;
            list.error = None;
            s.generation
        })
        .unwrap_or_default();

    let result = fetch.await;

    // The loading flag clears whatever the outcome, unless a logout reset the view
    let Some(mut s) = write_if_current(state, generation) else {
        debug!("dropping list result from before logout");
        return result.map(|items| items.len());
    };
    let list = select(&mut s);
    list.loading = false;

    match result {
        Ok(items) => {
            let count = items.len();
            list.replace(items);
            Ok(count)
        }
        Err(err) => {
            list.error = Some(err.to_string());
            Err(err)
        }
    }
}

/// Drop a deleted tier from the local list, no refetch
pub fn remove_tier(state: &SharedState, tier_id: i64) -> usize {
    state
        .write()
        .map(|mut s| s.tiers.remove_where(|t| t.id == Some(tier_id)))
        .unwrap_or(0)
}

/// Drop a deleted config from the local list, no refetch
pub fn remove_config(state: &SharedState, config_id: i64) -> usize {
    state
        .write()
        .map(|mut s| s.configs.remove_where(|c| c.id == Some(config_id)))
        .unwrap_or(0)
}

/// Spawns a background task to fetch tiers
pub fn spawn_load_tiers(state: SharedState, api: Arc<dyn LoyaltyApi>, session: Session) {
    tokio::spawn(async move {
        match load_tiers(&state, api.as_ref(), &session).await {
            Ok(count) => info!(count, "tiers loaded"),
            Err(e) => warn!(error = %e, "failed to load tiers"),
        }
    });
}

/// Spawns a background task to fetch configs
pub fn spawn_load_configs(state: SharedState, api: Arc<dyn LoyaltyApi>, session: Session) {
    tokio::spawn(async move {
        match load_configs(&state, api.as_ref(), &session).await {
            Ok(count) => info!(count, "configs loaded"),
            Err(e) => warn!(error = %e, "failed to load configs"),
        }
    });
}
