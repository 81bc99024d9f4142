use crate::forms::{ConfigField, FieldKind, FormEdit, TierField, TierForm};
use crate::mapper::{from_config, from_tier};
use crate::state::AppState;
use crate::types::{
    Command, Confirmation, DeleteTarget, InputMode, Panel, PanelFocus,
};

/// Represents all possible state-changing actions in the application
/// Input handling turns keys into actions; network work comes back out as a [`Command`]
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    // Panel navigation
    SelectPanel(Panel),
    NextPanel,
    PrevPanel,
    FocusContent,
    FocusSidebar,

    // Form actions
    NextField,
    PrevField,
    EditField(FormEdit),
    CycleDefaultTier { forward: bool },
    Submit,

    // Table actions
    SelectNextRow,
    SelectPrevRow,
    EditSelected,
    RequestDelete,
    Refresh,
    AnswerConfirmation(Confirmation),

    // Input mode actions
    EnterTokenInputMode,
    ExitTokenInputMode,
    EnterUrlInputMode { base_url: Option<String> },
    ExitUrlInputMode,

    // Text input actions (for modals)
    AppendToTokenInput(String),
    AppendToUrlInput(String),
    BackspaceTokenInput,
    BackspaceUrlInput,
    DeleteWordTokenInput,
    DeleteWordUrlInput,
    ClearTokenInput,
    ClearUrlInput,
    ConfirmTokenInput,
    ConfirmUrlInput,

    // Session
    Logout,

    DismissNotification,
}

/// Apply an action to the view state
///
/// Returns the side effect the app loop should run, if any. The reducer itself
/// never performs I/O.
pub fn apply_action(action: AppAction, state: &mut AppState) -> Option<Command> {
    match action {
        AppAction::SelectPanel(panel) => return select_panel(state, panel),
        AppAction::NextPanel => {
            let next = state.panel.next();
            return select_panel(state, next);
        }
        AppAction::PrevPanel => {
            let prev = state.panel.prev();
            return select_panel(state, prev);
        }
        AppAction::FocusContent => {
            state.focus = PanelFocus::Content;
        }
        AppAction::FocusSidebar => {
            state.focus = PanelFocus::Sidebar;
        }

        AppAction::NextField => match state.panel {
            Panel::CreateTier => state.tier_field = state.tier_field.next(),
            Panel::CreateTierConfig => state.config_field = state.config_field.next(),
            _ => {}
        },
        AppAction::PrevField => match state.panel {
            Panel::CreateTier => state.tier_field = state.tier_field.prev(),
            Panel::CreateTierConfig => state.config_field = state.config_field.prev(),
            _ => {}
        },
        AppAction::EditField(edit) => match state.panel {
            Panel::CreateTier => {
                let field = state.tier_field;
                state.tier_form.apply(field, edit);
            }
            Panel::CreateTierConfig => {
                let field = state.config_field;
                if field.kind() == FieldKind::TierPicker {
                    // Picker only moves through loaded tiers
                    if edit == FormEdit::Clear {
                        state.config_form.default_tier_id.clear();
                    }
                } else {
                    state.config_form.apply(field, edit);
                }
            }
            _ => {}
        },
        AppAction::CycleDefaultTier { forward } => {
            if state.panel == Panel::CreateTierConfig
                && state.config_field == ConfigField::DefaultTier
            {
                let ids = state.tier_ids();
                state.config_form.cycle_default_tier(&ids, forward);
            }
        }
        AppAction::Submit => match state.panel {
            // Submit is disabled while a request is in flight
            Panel::CreateTier if !state.tier_submitting => return Some(Command::SubmitTier),
            Panel::CreateTierConfig if !state.config_submitting => {
                return Some(Command::SubmitConfig)
            }
            _ => {}
        },

        AppAction::SelectNextRow => match state.panel {
            Panel::ManageTiers => state.tiers.select_next(),
            Panel::ManageTierConfigs => state.configs.select_next(),
            _ => {}
        },
        AppAction::SelectPrevRow => match state.panel {
            Panel::ManageTiers => state.tiers.select_prev(),
            Panel::ManageTierConfigs => state.configs.select_prev(),
            _ => {}
        },
        AppAction::EditSelected => edit_selected(state),
        AppAction::RequestDelete => {
            let target = match state.panel {
                Panel::ManageTiers => state
                    .tiers
                    .selected_item()
                    .and_then(|t| t.id)
                    .map(DeleteTarget::Tier),
                Panel::ManageTierConfigs => state
                    .configs
                    .selected_item()
                    .and_then(|c| c.id)
                    .map(DeleteTarget::Config),
                _ => None,
            };
            if let Some(target) = target {
                state.input_mode = InputMode::ConfirmDelete(target);
            }
        }
        AppAction::Refresh => return fetch_for(state.panel),
        AppAction::AnswerConfirmation(decision) => {
            if let InputMode::ConfirmDelete(target) = state.input_mode.clone() {
                state.input_mode = InputMode::Normal;
                return Some(Command::Delete(target, decision));
            }
        }

        AppAction::EnterTokenInputMode => {
            state.input_mode = InputMode::EnteringToken;
            state.token_input.clear();
        }
        AppAction::ExitTokenInputMode => {
            state.input_mode = InputMode::Normal;
            state.token_input.clear();
        }
        AppAction::EnterUrlInputMode { base_url } => {
            state.input_mode = InputMode::EnteringUrl;
            state.url_input = base_url.unwrap_or_default();
        }
        AppAction::ExitUrlInputMode => {
            state.input_mode = InputMode::Normal;
        }

        AppAction::AppendToTokenInput(s) => state.token_input.push_str(&s),
        AppAction::AppendToUrlInput(s) => state.url_input.push_str(&s),
        AppAction::BackspaceTokenInput => {
            state.token_input.pop();
        }
        AppAction::BackspaceUrlInput => {
            state.url_input.pop();
        }
        AppAction::DeleteWordTokenInput => delete_word(&mut state.token_input),
        AppAction::DeleteWordUrlInput => delete_word(&mut state.url_input),
        AppAction::ClearTokenInput => state.token_input.clear(),
        AppAction::ClearUrlInput => state.url_input.clear(),
        AppAction::ConfirmTokenInput => {
            let token = std::mem::take(&mut state.token_input);
            state.input_mode = InputMode::Normal;
            if !token.trim().is_empty() {
                return Some(Command::SaveToken(token.trim().to_string()));
            }
        }
        AppAction::ConfirmUrlInput => {
            let url = state.url_input.trim().to_string();
            state.input_mode = InputMode::Normal;
            return Some(Command::SaveBaseUrl(url));
        }

        AppAction::Logout => {
            // Nothing survives a logout, the view starts over on create-tier
            state.reset();
            return Some(Command::Logout);
        }

        AppAction::DismissNotification => state.notification = None,
    }

    None
}

fn select_panel(state: &mut AppState, panel: Panel) -> Option<Command> {
    let previous = state.panel;
    state.panel = panel;

    if panel == Panel::CreateTier && state.editing_tier_id.is_some() {
        // Selecting create-tier abandons an edit, a plain draft is kept
        state.editing_tier_id = None;
        state.tier_form = TierForm::default();
        state.tier_field = TierField::default();
    }

    if panel != previous {
        return fetch_for(panel);
    }
    None
}

fn fetch_for(panel: Panel) -> Option<Command> {
    match panel {
        Panel::ManageTiers => Some(Command::FetchTiers),
        Panel::ManageTierConfigs => Some(Command::FetchConfigs),
        _ => None,
    }
}

fn edit_selected(state: &mut AppState) {
    match state.panel {
        Panel::ManageTiers => {
            let Some(tier) = state.tiers.selected_item().cloned() else {
                return;
            };
            state.tier_form = from_tier(&tier);
            state.editing_tier_id = tier.id;
            state.tier_field = TierField::default();
            state.panel = Panel::CreateTier;
            state.focus = PanelFocus::Content;
        }
        Panel::ManageTierConfigs => {
            let Some(config) = state.configs.selected_item().cloned() else {
                return;
            };
            state.config_form = from_config(&config);
            state.config_field = ConfigField::default();
            state.panel = Panel::CreateTierConfig;
            state.focus = PanelFocus::Content;
        }
        _ => {}
    }
}

/// Helper function to delete the last word from a string (Ctrl+W behavior)
fn delete_word(s: &mut String) {
    *s = s.trim_end().to_string();

    if let Some(pos) = s.rfind(char::is_whitespace) {
        s.truncate(pos);
    } else {
        s.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::fake::tier;
    use crate::types::{Ratio, TierConfig};
    use pretty_assertions::assert_eq;

    fn create_test_state() -> AppState {
        let mut state = AppState::default();
        state
            .tiers
            .replace(vec![tier(3, "Bronze"), tier(7, "Silver"), tier(9, "Gold")]);
        state
    }

    fn config(id: i64) -> TierConfig {
        TierConfig {
            id: Some(id),
            description: "Weekend".to_string(),
            default_tier_id: Some(7),
            order_online: Ratio {
                ratio_from: Some("100".to_string()),
                ratio_to: Some("1".to_string()),
                amount: None,
            },
            referral: Ratio::default(),
            review_product: Ratio::default(),
        }
    }

    #[test]
    fn test_initial_panel_is_create_tier() {
        let state = AppState::default();
        assert_eq!(state.panel, Panel::CreateTier);
        assert_eq!(state.focus, PanelFocus::Sidebar);
    }

    #[test]
    fn test_entering_list_panel_requests_fetch() {
        let mut state = AppState::default();

        let cmd = apply_action(AppAction::SelectPanel(Panel::ManageTiers), &mut state);
        assert_eq!(cmd, Some(Command::FetchTiers));

        // Already active, no second fetch
        let cmd = apply_action(AppAction::SelectPanel(Panel::ManageTiers), &mut state);
        assert_eq!(cmd, None);

        let cmd = apply_action(AppAction::NextPanel, &mut state);
        assert_eq!(state.panel, Panel::CreateTierConfig);
        assert_eq!(cmd, None);

        let cmd = apply_action(AppAction::NextPanel, &mut state);
        assert_eq!(cmd, Some(Command::FetchConfigs));
    }

    #[test]
    fn test_prev_panel_wraps() {
        let mut state = AppState::default();
        apply_action(AppAction::PrevPanel, &mut state);
        assert_eq!(state.panel, Panel::ManageTierConfigs);
    }

    #[test]
    fn test_edit_selected_tier_prepopulates_form() {
        let mut state = create_test_state();
        state.panel = Panel::ManageTiers;
        state.tiers.selected = 1;

        apply_action(AppAction::EditSelected, &mut state);

        assert_eq!(state.panel, Panel::CreateTier);
        assert_eq!(state.focus, PanelFocus::Content);
        assert_eq!(state.editing_tier_id, Some(7));
        assert_eq!(state.tier_form.name, "Silver");
        assert_eq!(state.tier_form.cashback_percent, "5");
    }

    #[test]
    fn test_selecting_create_tier_abandons_edit() {
        let mut state = create_test_state();
        state.panel = Panel::ManageTiers;
        apply_action(AppAction::EditSelected, &mut state);
        assert_eq!(state.editing_tier_id, Some(3));

        apply_action(AppAction::SelectPanel(Panel::CreateTier), &mut state);

        assert_eq!(state.editing_tier_id, None);
        assert_eq!(state.tier_form, TierForm::default());
    }

    #[test]
    fn test_draft_tier_survives_panel_switches() {
        let mut state = AppState::default();
        state.tier_form.name = "Draft".to_string();
        state.tier_field = TierField::CashbackPercent;

        apply_action(AppAction::SelectPanel(Panel::ManageTiers), &mut state);
        apply_action(AppAction::SelectPanel(Panel::CreateTier), &mut state);
        assert_eq!(state.tier_form.name, "Draft");
        assert_eq!(state.tier_field, TierField::CashbackPercent);

        // Re-selecting the active panel
        apply_action(AppAction::SelectPanel(Panel::CreateTier), &mut state);
        assert_eq!(state.tier_form.name, "Draft");

        // Wrapping around from the last panel
        state.panel = Panel::ManageTierConfigs;
        apply_action(AppAction::NextPanel, &mut state);
        assert_eq!(state.panel, Panel::CreateTier);
        assert_eq!(state.tier_form.name, "Draft");
    }

    #[test]
    fn test_edit_selected_config_prepopulates_form() {
        let mut state = AppState::default();
        state.configs.replace(vec![config(4)]);
        state.panel = Panel::ManageTierConfigs;

        apply_action(AppAction::EditSelected, &mut state);

        assert_eq!(state.panel, Panel::CreateTierConfig);
        assert_eq!(state.config_form.description, "Weekend");
        assert_eq!(state.config_form.default_tier_id, "7");
        assert_eq!(state.config_form.required_points, "100");
        assert_eq!(state.config_form.referral_amount, "50");
    }

    #[test]
    fn test_edit_on_empty_list_is_noop() {
        let mut state = AppState::default();
        state.panel = Panel::ManageTiers;
        apply_action(AppAction::EditSelected, &mut state);
        assert_eq!(state.panel, Panel::ManageTiers);
    }

    #[test]
    fn test_edit_field_routes_to_focused_field() {
        let mut state = AppState::default();
        apply_action(AppAction::EditField(FormEdit::Push('G')), &mut state);
        apply_action(AppAction::NextField, &mut state);
        apply_action(AppAction::NextField, &mut state);
        apply_action(AppAction::EditField(FormEdit::Toggle), &mut state);

        assert_eq!(state.tier_form.name, "G");
        assert_eq!(state.tier_field, TierField::IsSpecial);
        assert!(state.tier_form.is_special);
        assert!(!state.tier_form.is_active);
    }

    #[test]
    fn test_cycle_default_tier_uses_loaded_tiers() {
        let mut state = create_test_state();
        state.panel = Panel::CreateTierConfig;
        state.config_field = ConfigField::DefaultTier;

        apply_action(AppAction::CycleDefaultTier { forward: true }, &mut state);
        assert_eq!(state.config_form.default_tier_id, "3");
        apply_action(AppAction::CycleDefaultTier { forward: false }, &mut state);
        assert_eq!(state.config_form.default_tier_id, "9");
    }

    #[test]
    fn test_submit_ignored_while_in_flight() {
        let mut state = AppState::default();
        assert_eq!(
            apply_action(AppAction::Submit, &mut state),
            Some(Command::SubmitTier)
        );

        state.tier_submitting = true;
        assert_eq!(apply_action(AppAction::Submit, &mut state), None);

        state.panel = Panel::CreateTierConfig;
        assert_eq!(
            apply_action(AppAction::Submit, &mut state),
            Some(Command::SubmitConfig)
        );
    }

    #[test]
    fn test_delete_goes_through_confirmation() {
        let mut state = create_test_state();
        state.panel = Panel::ManageTiers;
        state.tiers.selected = 1;

        assert_eq!(apply_action(AppAction::RequestDelete, &mut state), None);
        assert_eq!(
            state.input_mode,
            InputMode::ConfirmDelete(DeleteTarget::Tier(7))
        );

        let cmd = apply_action(
            AppAction::AnswerConfirmation(Confirmation::Declined),
            &mut state,
        );
        assert_eq!(
            cmd,
            Some(Command::Delete(DeleteTarget::Tier(7), Confirmation::Declined))
        );
        assert_eq!(state.input_mode, InputMode::Normal);
        assert_eq!(state.tiers.items.len(), 3);
    }

    #[test]
    fn test_refresh_only_on_list_panels() {
        let mut state = AppState::default();
        assert_eq!(apply_action(AppAction::Refresh, &mut state), None);

        state.panel = Panel::ManageTierConfigs;
        assert_eq!(
            apply_action(AppAction::Refresh, &mut state),
            Some(Command::FetchConfigs)
        );
    }

    #[test]
    fn test_token_input_flow() {
        let mut state = AppState::default();
        apply_action(AppAction::EnterTokenInputMode, &mut state);
        assert_eq!(state.input_mode, InputMode::EnteringToken);

        apply_action(AppAction::AppendToTokenInput("abc def".to_string()), &mut state);
        apply_action(AppAction::DeleteWordTokenInput, &mut state);
        assert_eq!(state.token_input, "abc");

        let cmd = apply_action(AppAction::ConfirmTokenInput, &mut state);
        assert_eq!(cmd, Some(Command::SaveToken("abc".to_string())));
        assert_eq!(state.input_mode, InputMode::Normal);
        assert!(state.token_input.is_empty());
    }

    #[test]
    fn test_url_input_prefills_current_base_url() {
        let mut state = AppState::default();
        apply_action(
            AppAction::EnterUrlInputMode {
                base_url: Some("https://api.example.com".to_string()),
            },
            &mut state,
        );
        apply_action(AppAction::BackspaceUrlInput, &mut state);
        assert_eq!(state.url_input, "https://api.example.co");

        let cmd = apply_action(AppAction::ConfirmUrlInput, &mut state);
        assert_eq!(
            cmd,
            Some(Command::SaveBaseUrl("https://api.example.co".to_string()))
        );
    }

    #[test]
    fn test_logout_resets_view_state() {
        let mut state = create_test_state();
        state.panel = Panel::ManageTiers;
        state.editing_tier_id = Some(3);
        state.tier_form.name = "Draft".to_string();

        let cmd = apply_action(AppAction::Logout, &mut state);

        assert_eq!(cmd, Some(Command::Logout));
        assert_eq!(state.panel, Panel::CreateTier);
        assert!(state.tiers.items.is_empty());
        assert_eq!(state.editing_tier_id, None);
        assert_eq!(state.tier_form, TierForm::default());
    }

    #[test]
    fn test_delete_word() {
        let mut s = "one two  ".to_string();
        delete_word(&mut s);
        assert_eq!(s, "one");
        delete_word(&mut s);
        assert_eq!(s, "");
    }
}
