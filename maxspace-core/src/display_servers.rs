#[cfg(test)]
mod mock_display_server;

use crate::config::Config;
use crate::display_action::DisplayAction;
use crate::models::{Handle, Timestamp, Window, WindowHandle, Workspace};
use crate::DisplayEvent;

use futures::prelude::*;
use std::pin::Pin;

#[cfg(test)]
pub use self::mock_display_server::MockDisplayServer;

/// The window manager as seen by maxspace: an event source, a query surface over windows and
/// workspaces, and a place to send requests to.
pub trait DisplayServer<H: Handle> {
    fn new(config: &impl Config) -> Self;

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>>;

    /// Current state of a window, `None` if the window manager does not know it (anymore).
    fn window(&self, handle: &WindowHandle<H>) -> Option<Window<H>>;

    /// All workspaces in index order with their current occupants. Always a fresh read.
    fn workspaces(&self) -> Vec<Workspace<H>>;

    /// The window manager's notion of "now", used for activation requests.
    fn current_time(&self) -> Timestamp {
        0
    }

    fn execute_action(&mut self, _act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        None
    }

    /// Start delivering window notifications. Calling it twice has no further effect.
    fn subscribe(&mut self) {}

    /// Stop delivering window notifications. Calling it twice has no further effect.
    fn unsubscribe(&mut self) {}

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>>;

    fn flush(&self);
}
