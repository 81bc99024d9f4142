//! Submission pipeline
//!
//! Create/update/delete operations. Each one runs to a single outcome which is
//! published to the view state as a notification (except a declined delete,
//! which is silent). Nothing propagates past the operation and nothing retries.

use crate::api::LoyaltyApi;
use crate::error::{Action, DashboardError};
use crate::forms::{ConfigForm, TierForm};
use crate::mapper::{to_config_payload, to_tier_payload};
use crate::session::Session;
use crate::state::{self, write_if_current, AppState, SharedState};
use crate::sync;
use crate::types::{Confirmation, DeleteTarget, Notification, Panel};
use std::sync::Arc;
use tracing::{info, warn};

/// Create or update the tier held in the tier form.
///
/// `generation` is the view generation the submission started in; once a logout
/// moves past it, the outcome is no longer written back.
pub async fn submit_tier(
    state: &SharedState,
    generation: u64,
    api: &dyn LoyaltyApi,
    session: &Session,
) -> Result<(), DashboardError> {
    set_flag(state, generation, |s| &mut s.tier_submitting, true);
    let result = try_submit_tier(state, generation, api, session).await;
    set_flag(state, generation, |s| &mut s.tier_submitting, false);
    publish(state, generation, Action::SaveTier, result)
}

async fn try_submit_tier(
    state: &SharedState,
    generation: u64,
    api: &dyn LoyaltyApi,
    session: &Session,
) -> Result<Notification, DashboardError> {
    let (form, editing_id) = read(state, |s| (s.tier_form.clone(), s.editing_tier_id));

    // Validation comes first so a bad form never needs a token
    let payload = to_tier_payload(&form, editing_id)?;
    let token = session.token()?;

    info!(operation = ?payload.operation, tier_id = ?editing_id, "saving tier");
    api.save_tier(token, &payload)
        .await
        .map_err(|e| DashboardError::from_api(&e, Action::SaveTier))?;

    let refresh = write_if_current(state, generation)
        .map(|mut s| {
            s.tier_form = TierForm::default();
            s.editing_tier_id = None;
            s.panel == Panel::ManageTiers
        })
        .unwrap_or(false);

    if refresh {
        // Refresh failures land in the list's error slot
        let _ = sync::load_tiers(state, api, session).await;
    }

    Ok(match editing_id {
        Some(_) => Notification::success("Tier updated!", "The tier was updated successfully."),
        None => Notification::success("Tier created!", "The tier was created successfully."),
    })
}

/// Create a tier config from the config form
pub async fn submit_config(
    state: &SharedState,
    generation: u64,
    api: &dyn LoyaltyApi,
    session: &Session,
) -> Result<(), DashboardError> {
    set_flag(state, generation, |s| &mut s.config_submitting, true);
    let result = try_submit_config(state, generation, api, session).await;
    set_flag(state, generation, |s| &mut s.config_submitting, false);
    publish(state, generation, Action::SaveConfig, result)
}

async fn try_submit_config(
    state: &SharedState,
    generation: u64,
    api: &dyn LoyaltyApi,
    session: &Session,
) -> Result<Notification, DashboardError> {
    let token = session.token()?;
    let form = read(state, |s| s.config_form.clone());
    let payload = to_config_payload(&form);

    info!(default_tier = payload.default_tier.id, "creating tier config");
    api.save_config(token, &payload)
        .await
        .map_err(|e| DashboardError::from_api(&e, Action::SaveConfig))?;

    if let Some(mut s) = write_if_current(state, generation) {
        s.config_form = ConfigForm::default();
    }

    Ok(Notification::success(
        "Config created!",
        "The configuration was created successfully.",
    ))
}

/// Delete a tier or config once the user has answered the confirmation prompt
pub async fn delete(
    state: &SharedState,
    generation: u64,
    api: &dyn LoyaltyApi,
    session: &Session,
    target: DeleteTarget,
    decision: Confirmation,
) -> Result<(), DashboardError> {
    let action = match target {
        DeleteTarget::Tier(_) => Action::DeleteTier,
        DeleteTarget::Config(_) => Action::DeleteConfig,
    };
    let result = try_delete(state, api, session, target, decision).await;
    publish(state, generation, action, result)
}

async fn try_delete(
    state: &SharedState,
    api: &dyn LoyaltyApi,
    session: &Session,
    target: DeleteTarget,
    decision: Confirmation,
) -> Result<Notification, DashboardError> {
    if decision == Confirmation::Declined {
        return Err(DashboardError::UserCancelled);
    }

    match target {
        DeleteTarget::Tier(tier_id) => {
            let token = session.token()?;
            info!(tier_id, "deleting tier");
            api.delete_tier(token, tier_id)
                .await
                .map_err(|e| DashboardError::from_api(&e, Action::DeleteTier))?;
            sync::remove_tier(state, tier_id);
            Ok(Notification::success(
                "Tier deleted",
                "The tier was deleted successfully.",
            ))
        }
        DeleteTarget::Config(config_id) => {
            info!(config_id, "deleting tier config");
            api.delete_config(config_id)
                .await
                .map_err(|e| DashboardError::from_api(&e, Action::DeleteConfig))?;
            sync::remove_config(state, config_id);
            Ok(Notification::success(
                "Config deleted",
                "The configuration was deleted successfully.",
            ))
        }
    }
}

/// Notification shown for a failed operation, `None` when it should stay silent
pub fn failure_notification(action: Action, err: &DashboardError) -> Option<Notification> {
    let deleting = matches!(action, Action::DeleteTier | Action::DeleteConfig);

    match err {
        DashboardError::UserCancelled => None,
        DashboardError::InvalidCashback(message) => {
            Some(Notification::destructive("Invalid Cashback", message.clone()))
        }
        DashboardError::Validation(message) => {
            Some(Notification::destructive("Invalid input", message.clone()))
        }
        DashboardError::Unauthenticated if deleting => Some(Notification::destructive(
            action.failure_title(),
            err.to_string(),
        )),
        DashboardError::Unauthenticated => Some(Notification::destructive(
            "Not authenticated",
            "No user token found.",
        )),
        DashboardError::Unauthorized => {
            Some(Notification::destructive("Unauthorized", err.to_string()))
        }
        DashboardError::RequestFailed(message) => Some(Notification::destructive(
            action.failure_title(),
            message.clone(),
        )),
    }
}

fn publish(
    state: &SharedState,
    generation: u64,
    action: Action,
    result: Result<Notification, DashboardError>,
) -> Result<(), DashboardError> {
    let notification = match &result {
        Ok(notification) => Some(notification.clone()),
        Err(err) => {
            if *err != DashboardError::UserCancelled {
                warn!(?action, error = %err, "operation failed");
            }
            failure_notification(action, err)
        }
    };

    // A logout since the task started means nobody is waiting for this result
    if let (Some(notification), Some(mut s)) =
        (notification, write_if_current(state, generation))
    {
        s.notification = Some(notification);
    }

    result.map(|_| ())
}

fn set_flag(
    state: &SharedState,
    generation: u64,
    flag: fn(&mut AppState) -> &mut bool,
    value: bool,
) {
    if let Some(mut s) = write_if_current(state, generation) {
        *flag(&mut s) = value;
    }
}

fn read<T: Default>(state: &SharedState, f: impl FnOnce(&AppState) -> T) -> T {
    state.read().map(|s| f(&s)).unwrap_or_default()
}

/// Spawns a background tier submission unless one is already in flight
pub fn spawn_submit_tier(state: SharedState, api: Arc<dyn LoyaltyApi>, session: Session) {
    let Some(generation) = claim(&state, |s| &mut s.tier_submitting) else {
        return;
    };
    tokio::spawn(async move {
        let _ = submit_tier(&state, generation, api.as_ref(), &session).await;
    });
}

/// Spawns a background config submission unless one is already in flight
pub fn spawn_submit_config(state: SharedState, api: Arc<dyn LoyaltyApi>, session: Session) {
    let Some(generation) = claim(&state, |s| &mut s.config_submitting) else {
        return;
    };
    tokio::spawn(async move {
        let _ = submit_config(&state, generation, api.as_ref(), &session).await;
    });
}

pub fn spawn_delete(
    state: SharedState,
    api: Arc<dyn LoyaltyApi>,
    session: Session,
    target: DeleteTarget,
    decision: Confirmation,
) {
    let generation = state::generation(&state);
    tokio::spawn(async move {
        let _ = delete(&state, generation, api.as_ref(), &session, target, decision).await;
    });
}

// Sets the in-flight flag before the task starts so a second keypress is ignored.
// Returns the generation the task belongs to.
fn claim(state: &SharedState, flag: fn(&mut AppState) -> &mut bool) -> Option<u64> {
    let mut s = state.write().ok()?;
    let in_flight = flag(&mut s);
    if *in_flight {
        return None;
    }
    *in_flight = true;
    Some(s.generation)
}
