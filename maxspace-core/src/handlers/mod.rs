mod deferred_handler;
pub mod display_event_handler;
mod maximize_handler;
mod window_handler;

use super::config::Config;
use super::display_servers::DisplayServer;
use super::models::{Handle, Lifecycle, Manager, Window, WindowHandle};
use super::DisplayEvent;
