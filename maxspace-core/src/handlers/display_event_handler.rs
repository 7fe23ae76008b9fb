use super::{Config, DisplayEvent, DisplayServer, Handle, Manager};
use crate::models::SizeChange;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Process an event from the window manager, queueing whatever it leads to.
    /// Returns true if workspace membership may have changed.
    pub fn display_event_handler(&mut self, event: DisplayEvent<H>) -> bool {
        if !self.enabled {
            tracing::trace!(?event, "ignored while disabled");
            return false;
        }
        match event {
            DisplayEvent::WindowCreate(window) => self.window_opened_handler(window),
            DisplayEvent::WindowResize(handle, SizeChange::Maximize) => {
                self.window_maximized_handler(&handle)
            }
            DisplayEvent::WindowResize(handle, SizeChange::Unmaximize) => {
                self.window_unmaximized_handler(&handle)
            }
            DisplayEvent::WindowDestroy(window) => self.window_closed_handler(&window),
        }
    }
}
