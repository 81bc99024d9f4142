use crate::forms::{ConfigField, ConfigForm, TierField, TierForm};
use crate::types::{InputMode, Notification, Panel, PanelFocus, Tier, TierConfig};
use std::sync::{Arc, RwLock, RwLockWriteGuard};

/// View state shared between the UI loop and background requests
pub type SharedState = Arc<RwLock<AppState>>;

/// A server-owned list plus its transient fetch flags
#[derive(Debug, Clone)]
pub struct RecordList<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    /// Highlighted row in the table
    pub selected: usize,
}

impl<T> Default for RecordList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
            selected: 0,
        }
    }
}

impl<T> RecordList<T> {
    /// Replace the list wholesale, keeping server order
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.clamp_selection();
    }

    /// Drop every entry matching the predicate
    pub fn remove_where(&mut self, mut matches: impl FnMut(&T) -> bool) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !matches(item));
        self.clamp_selection();
        before - self.items.len()
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.items.is_empty() {
            self.selected = (self.selected + 1).min(self.items.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub panel: Panel,
    /// Which side (sidebar or panel content) has focus
    pub focus: PanelFocus,
    pub input_mode: InputMode,

    pub tier_form: TierForm,
    pub tier_field: TierField,
    /// Set while the tier form holds an existing tier
    pub editing_tier_id: Option<i64>,
    pub tier_submitting: bool,

    pub config_form: ConfigForm,
    pub config_field: ConfigField,
    pub config_submitting: bool,

    pub tiers: RecordList<Tier>,
    pub configs: RecordList<TierConfig>,

    /// Latest toast, replaced by the next one
    pub notification: Option<Notification>,

    pub token_input: String,
    pub url_input: String,

    /// Bumped on logout. Background tasks started under an older value drop their results.
    pub generation: u64,
}

impl AppState {
    pub fn shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }

    /// Start over from defaults, moving to the next generation
    pub fn reset(&mut self) {
        *self = AppState {
            generation: self.generation + 1,
            ..AppState::default()
        };
    }

    /// Ids of loaded tiers, in list order, for the default tier picker
    pub fn tier_ids(&self) -> Vec<i64> {
        self.tiers.items.iter().filter_map(|t| t.id).collect()
    }

    /// Name of a loaded tier, for showing config defaults
    pub fn tier_name(&self, id: i64) -> Option<&str> {
        self.tiers
            .items
            .iter()
            .find(|t| t.id == Some(id))
            .map(|t| t.name.as_str())
    }
}

pub fn generation(state: &SharedState) -> u64 {
    state.read().map(|s| s.generation).unwrap_or_default()
}

/// Write access for a task started in `generation`, `None` once a logout moved on
pub fn write_if_current(
    state: &SharedState,
    generation: u64,
) -> Option<RwLockWriteGuard<'_, AppState>> {
    state.write().ok().filter(|s| s.generation == generation)
}
