//! Error types for the dashboard
//!
//! [`ApiError`] describes what went wrong on the wire. [`DashboardError`] is the
//! user-facing taxonomy every operation resolves to before it is shown.

use thiserror::Error;

/// Failure talking to the loyalty API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server answered with a non-2xx status
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// `message` field of the JSON error body, when present
        message: Option<String>,
    },

    /// No HTTP response (connection refused, DNS, timeout...)
    #[error("{0}")]
    Transport(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message the server put in the response body
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Status {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// The operation a failure happened in, used to pick titles and fallback text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadTiers,
    LoadConfigs,
    SaveTier,
    SaveConfig,
    DeleteTier,
    DeleteConfig,
}

impl Action {
    pub fn fallback_message(&self) -> &'static str {
        match self {
            Action::LoadTiers => "Failed to fetch tiers",
            Action::LoadConfigs => "Failed to fetch configs",
            Action::SaveTier => "Failed to create/update tier.",
            Action::SaveConfig => "Failed to create configuration.",
            Action::DeleteTier => "Failed to delete tier",
            Action::DeleteConfig => "Failed to delete configuration",
        }
    }

    pub fn failure_title(&self) -> &'static str {
        match self {
            Action::DeleteTier | Action::DeleteConfig => "Delete failed",
            _ => "Error",
        }
    }

    // Saves only ever show the server's message or the fallback.
    fn shows_transport_text(&self) -> bool {
        !matches!(self, Action::SaveTier | Action::SaveConfig)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    /// Input rejected before any request was made
    #[error("{0}")]
    Validation(String),

    /// Cashback percentage missing, unparseable or out of range
    #[error("{0}")]
    InvalidCashback(String),

    #[error("Not authenticated")]
    Unauthenticated,

    /// HTTP 401 on a call that handles it locally
    #[error("You are not authorized to perform this action.")]
    Unauthorized,

    #[error("{0}")]
    RequestFailed(String),

    /// User declined a confirmation prompt
    #[error("Cancelled")]
    UserCancelled,
}

impl DashboardError {
    /// Classify an API failure for the given operation
    pub fn from_api(err: &ApiError, action: Action) -> Self {
        if action == Action::SaveTier && err.is_unauthorized() {
            return DashboardError::Unauthorized;
        }

        let message = err
            .server_message()
            .map(str::to_string)
            .or_else(|| {
                Some(err.to_string())
                    .filter(|text| action.shows_transport_text() && !text.is_empty())
            })
            .unwrap_or_else(|| action.fallback_message().to_string());

        DashboardError::RequestFailed(message)
    }
}
