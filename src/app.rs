use crate::api::{HttpLoyaltyApi, LoyaltyApi};
use crate::config::{self, Config};
use crate::pipeline;
use crate::session::Session;
use crate::state::{AppState, SharedState};
use crate::sync;
use crate::types::{Command, InputMode, Notification, Panel};
use crate::ui::{self, draw};
use color_eyre::Result;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    DefaultTerminal, Frame,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub struct App {
    state: SharedState,
    /// Absent until a base URL is configured
    api: Option<Arc<dyn LoyaltyApi>>,
    session: Session,
    config: Config,
    spinner_index: usize,
    last_tick: Instant,
    event_handler: ui::EventHandler,
}

impl App {
    pub fn new(config: Config) -> Self {
        let api = config
            .server
            .base_url
            .clone()
            .map(|url| Arc::new(HttpLoyaltyApi::new(url)) as Arc<dyn LoyaltyApi>);
        let session = Session::new(config.auth.token.clone());
        Self::with_api(config, api, session)
    }

    pub fn with_api(config: Config, api: Option<Arc<dyn LoyaltyApi>>, session: Session) -> Self {
        // Ask for a base URL first if none is configured
        let state = AppState {
            input_mode: if api.is_none() {
                InputMode::EnteringUrl
            } else {
                InputMode::Normal
            },
            ..Default::default()
        };

        Self {
            state: state.shared(),
            api,
            session,
            config,
            spinner_index: 0,
            last_tick: Instant::now(),
            event_handler: ui::EventHandler::new(),
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        info!(
            base_url = self.config.server.base_url.as_deref().unwrap_or("-"),
            authenticated = self.session.is_authenticated(),
            "dashboard started"
        );

        while !self.event_handler.should_quit {
            if self.last_tick.elapsed().as_millis() > 100 {
                self.spinner_index = (self.spinner_index + 1) % 4;
                self.last_tick = Instant::now();
            }

            terminal.draw(|frame| self.draw(frame))?;

            let base_url = self.config.server.base_url.clone();
            if let Some(command) = self
                .event_handler
                .handle_events(&self.state, base_url.as_deref())?
            {
                self.dispatch(command);
            }
        }

        info!("dashboard closed");
        Ok(())
    }

    /// Run a side effect requested by the reducer
    pub fn dispatch(&mut self, command: Command) {
        match command {
            Command::SaveToken(token) => {
                self.session.set_token(token.clone());
                self.persist(|config| config.set_token(Some(token)));
                info!("bearer token updated");
                self.notify(Notification::success("Token saved", "Requests are now authorized."));
                self.refresh_active_list();
            }
            Command::Logout => {
                self.session.logout();
                self.persist(|config| config.set_token(None));
                info!("logged out");
            }
            Command::SaveBaseUrl(url) => self.save_base_url(url),
            other => {
                let Some(api) = self.api.clone() else {
                    self.notify(Notification::destructive(
                        "No API configured",
                        "Press , to set the loyalty API base URL.",
                    ));
                    return;
                };
                self.spawn(other, api);
            }
        }
    }

    fn spawn(&self, command: Command, api: Arc<dyn LoyaltyApi>) {
        let state = Arc::clone(&self.state);
        let session = self.session.clone();
        debug!(?command, "dispatching");

        match command {
            Command::FetchTiers => sync::spawn_load_tiers(state, api, session),
            Command::FetchConfigs => sync::spawn_load_configs(state, api, session),
            Command::SubmitTier => pipeline::spawn_submit_tier(state, api, session),
            Command::SubmitConfig => pipeline::spawn_submit_config(state, api, session),
            Command::Delete(target, decision) => {
                pipeline::spawn_delete(state, api, session, target, decision)
            }
            Command::SaveToken(_) | Command::Logout | Command::SaveBaseUrl(_) => {}
        }
    }

    fn save_base_url(&mut self, url: String) {
        if let Err(e) = config::validate_url(&url) {
            warn!(error = %e, "rejected base URL");
            // Keep the modal open with what was typed
            if let Ok(mut s) = self.state.write() {
                s.input_mode = InputMode::EnteringUrl;
                s.url_input = url;
                s.notification = Some(Notification::destructive("Invalid URL", e));
            }
            return;
        }

        info!(base_url = %url, "base URL updated");
        self.api = Some(Arc::new(HttpLoyaltyApi::new(url.clone())));
        self.persist(|config| config.set_base_url(url));
        self.refresh_active_list();
    }

    fn refresh_active_list(&mut self) {
        let panel = self.state.read().map(|s| s.panel).unwrap_or_default();
        debug!(panel = panel.key(), "refreshing active list");
        match panel {
            Panel::ManageTiers => self.dispatch(Command::FetchTiers),
            Panel::ManageTierConfigs => self.dispatch(Command::FetchConfigs),
            _ => {}
        }
    }

    // Config write failures are reported, the in-memory change still applies.
    fn persist(&mut self, update: impl FnOnce(&mut Config) -> Result<()>) {
        if let Err(e) = update(&mut self.config) {
            warn!(error = %e, "failed to save config");
            self.notify(Notification::destructive(
                "Config not saved",
                format!("Could not write config file: {e}"),
            ));
        }
    }

    fn notify(&self, notification: Notification) {
        if let Ok(mut s) = self.state.write() {
            s.notification = Some(notification);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let Ok(state) = self.state.read() else {
            return;
        };

        let notification_height = if state.notification.is_some() { 3 } else { 0 };

        // Header, Body, Notification, Footer
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(notification_height),
                Constraint::Length(3),
            ])
            .split(frame.area());

        let body_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(28), Constraint::Min(0)])
            .split(main_chunks[1]);

        let masked = self.session.masked_display();
        draw::render_header(
            frame,
            main_chunks[0],
            self.config.server.base_url.as_deref(),
            masked.as_deref(),
        );

        draw::render_sidebar(frame, body_chunks[0], &state);
        draw::render_content_panel(frame, body_chunks[1], &state, self.spinner_index);

        if let Some(notification) = &state.notification {
            draw::render_notification(frame, main_chunks[2], notification);
        }
        draw::render_footer(frame, main_chunks[3], &state);

        // Render modals LAST so they sit above everything else
        match &state.input_mode {
            InputMode::EnteringUrl => draw::render_url_input_modal(frame, &state),
            InputMode::EnteringToken => draw::render_token_input_modal(frame, &state),
            InputMode::ConfirmDelete(target) => draw::render_confirm_delete_modal(frame, target),
            InputMode::Normal => {}
        }
    }

    #[cfg(test)]
    fn state(&self) -> SharedState {
        Arc::clone(&self.state)
    }
}
