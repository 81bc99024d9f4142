//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Reusable UI components (header, footer, notification, spinner)
//! - `modals`: Modal dialogs (base URL, token, delete confirmation)
//! - `panels`: Sidebar and the four content panels
//! - `styling`: Color schemes and style constants

mod components;
mod modals;
mod panels;
mod styling;

pub use components::{render_footer, render_header, render_notification};
pub use modals::{render_confirm_delete_modal, render_token_input_modal, render_url_input_modal};
pub use panels::{render_content_panel, render_sidebar};
