use super::{Config, DisplayServer, Handle, Lifecycle, Manager, Window, WindowHandle};
use crate::deferred_action::Deferred;
use crate::directory::WorkspaceDirectory;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Process a window that was maximized.
    /// Returns true if workspace membership may have changed.
    pub fn window_maximized_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        match self.display_server.window(handle) {
            Some(window) => self.maximize(window),
            None => {
                tracing::debug!(window = ?handle, "maximized window is gone, ignoring");
                false
            }
        }
    }

    /// Process a window that was unmaximized.
    /// Returns true if workspace membership may have changed.
    pub fn window_unmaximized_handler(&mut self, handle: &WindowHandle<H>) -> bool {
        let Some(origin) = self.state.tracker.origin(handle) else {
            tracing::debug!(window = ?handle, "unmaximized, nothing to bring back");
            return false;
        };
        let Some(window) = self.display_server.window(handle) else {
            tracing::debug!(window = ?handle, "unmaximized window is gone, ignoring");
            return false;
        };
        let temporary = window.workspace;
        let generation = self.state.tracker.set_state(*handle, Lifecycle::Unmaximized);

        if temporary == origin {
            // The window was never moved, so there is no way back to take.
            self.state.tracker.set_origin(*handle, None);
            tracing::debug!(window = ?handle, workspace = origin, "unmaximized before moving");
            return false;
        }

        let directory = WorkspaceDirectory::read(&self.display_server);
        if directory.population(temporary) > 1 {
            tracing::debug!(
                window = ?handle,
                workspace = temporary,
                "unmaximized on a shared workspace, staying"
            );
            return false;
        }

        tracing::debug!(window = ?handle, from = temporary, to = origin, "unmaximized");
        let timestamp = self.display_server.current_time();
        self.state.defer(Deferred::ReturnToOrigin {
            handle: *handle,
            generation,
            temporary,
            timestamp,
        });
        false
    }

    pub(crate) fn maximize(&mut self, window: Window<H>) -> bool {
        let handle = window.handle;
        if !window.is_tracked() {
            tracing::debug!(window = ?handle, "maximized on all workspaces, ignoring");
            return false;
        }

        let directory = WorkspaceDirectory::read(&self.display_server);
        let Some(workspace) = directory.by_index(window.workspace) else {
            tracing::debug!(window = ?handle, "workspace of maximized window is gone");
            return false;
        };
        if !workspace.is_main() && workspace.is_sole_occupant(&handle) {
            self.state.tracker.set_origin(handle, None);
            tracing::debug!(
                window = ?handle,
                workspace = workspace.index,
                "maximized, already alone"
            );
            return true;
        }

        self.state.tracker.set_origin(handle, Some(workspace.index));
        let generation = self.state.tracker.set_state(handle, Lifecycle::Maximized);
        let Some(target) = self.state.allocator.allocate_target(&directory, &window) else {
            self.state.tracker.set_origin(handle, None);
            tracing::debug!(window = ?handle, "maximized, but there is no workspace to move to");
            return false;
        };

        tracing::debug!(window = ?handle, from = workspace.index, ?target, "maximized");
        let timestamp = self.display_server.current_time();
        self.state.defer(Deferred::MoveToTarget {
            handle,
            generation,
            target,
            timestamp,
        });
        false
    }
}
