use super::{Config, DisplayServer, Handle, Lifecycle, Manager, WindowHandle};
use crate::allocator::Target;
use crate::deferred_action::Deferred;
use crate::directory::WorkspaceDirectory;
use crate::display_action::DisplayAction;
use crate::models::{MAIN_WORKSPACE, Timestamp, WorkspaceIndex};
use std::time::Duration;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Run a deferred action whose delay has elapsed, if it still applies.
    /// Returns true if workspace membership may have changed.
    pub fn deferred_action_handler(&mut self, deferred: Deferred<H>) -> bool {
        tracing::debug!(window = ?deferred.handle(), "deferred action due");
        match deferred {
            Deferred::MoveToTarget {
                handle,
                generation,
                target,
                timestamp,
            } => self.move_to_target(handle, generation, target, timestamp),
            Deferred::ReturnToOrigin {
                handle,
                generation,
                temporary,
                timestamp,
            } => self.return_to_origin(handle, generation, temporary, timestamp),
            Deferred::LeaveClosed {
                handle,
                generation,
                workspace,
            } => self.leave_closed(handle, generation, workspace),
            Deferred::Sweep { epoch, repeat } => self.sweep(epoch, repeat),
        }
    }

    fn move_to_target(
        &mut self,
        handle: WindowHandle<H>,
        generation: u64,
        target: Target,
        timestamp: Timestamp,
    ) -> bool {
        if !self
            .state
            .tracker
            .is_current(&handle, Lifecycle::Maximized, generation)
        {
            tracing::debug!(window = ?handle, "no longer maximized, not moving");
            return false;
        }
        let directory = WorkspaceDirectory::read(&self.display_server);
        let resolved = self
            .display_server
            .window(&handle)
            .and_then(|window| {
                let resolved = self
                    .state
                    .allocator
                    .resolve_target(&directory, &window, target)?;
                Some((window, resolved))
            });
        let Some((window, (index, append))) = resolved else {
            self.state.tracker.set_origin(handle, None);
            tracing::debug!(window = ?handle, ?target, "target is gone, not moving");
            return false;
        };

        if append {
            self.state.actions.push_back(DisplayAction::AppendWorkspace);
        }
        self.state
            .actions
            .push_back(DisplayAction::MoveWindowToWorkspace(handle, index));
        self.state.actions.push_back(DisplayAction::ActivateWorkspace {
            index,
            focus: Some(handle),
            timestamp,
        });
        self.state
            .tracker
            .set_assigned_name(handle, window.application_class());
        tracing::debug!(window = ?handle, workspace = index, "moved to its own workspace");
        true
    }

    fn return_to_origin(
        &mut self,
        handle: WindowHandle<H>,
        generation: u64,
        temporary: WorkspaceIndex,
        timestamp: Timestamp,
    ) -> bool {
        let origin = self
            .state
            .tracker
            .is_current(&handle, Lifecycle::Unmaximized, generation)
            .then(|| self.state.tracker.origin(&handle))
            .flatten();
        let Some(origin) = origin else {
            tracing::debug!(window = ?handle, "no longer unmaximized, not returning");
            return false;
        };

        let directory = WorkspaceDirectory::read(&self.display_server);
        let window = self.display_server.window(&handle);
        let (Some(window), Some(_)) = (window, directory.by_index(origin)) else {
            self.state.tracker.set_origin(handle, None);
            tracing::debug!(window = ?handle, origin, "origin is gone, not returning");
            return false;
        };

        self.state
            .actions
            .push_back(DisplayAction::MoveWindowToWorkspace(handle, origin));
        self.state.actions.push_back(DisplayAction::ActivateWorkspace {
            index: origin,
            focus: Some(handle),
            timestamp,
        });

        let leaving = window.workspace;
        if leaving != temporary {
            tracing::debug!(window = ?handle, temporary, leaving, "window moved since unmaximize");
        }
        if leaving != origin && self.state.allocator.reclaims_eagerly() {
            let removal = self
                .state
                .allocator
                .reclaim(&directory, leaving, Some(&handle));
            self.state.actions.extend(removal);
        }

        self.state.tracker.set_origin(handle, None);
        self.state.tracker.set_assigned_name(handle, None);
        tracing::debug!(window = ?handle, workspace = origin, "returned");
        true
    }

    fn leave_closed(
        &mut self,
        handle: WindowHandle<H>,
        generation: u64,
        workspace: WorkspaceIndex,
    ) -> bool {
        if !self
            .state
            .tracker
            .is_current(&handle, Lifecycle::Closed, generation)
        {
            tracing::debug!(window = ?handle, "closed window was seen again, staying");
            return false;
        }
        self.state.tracker.forget(&handle);

        let directory = WorkspaceDirectory::read(&self.display_server);
        if directory.population(workspace) > 0 {
            tracing::debug!(workspace, "workspace of closed window is in use again, staying");
            return false;
        }

        let timestamp = self.display_server.current_time();
        self.state.actions.push_back(DisplayAction::ActivateWorkspace {
            index: MAIN_WORKSPACE,
            focus: None,
            timestamp,
        });
        if self.state.allocator.reclaims_eagerly() {
            let removal = self
                .state
                .allocator
                .reclaim(&directory, workspace, Some(&handle));
            self.state.actions.extend(removal);
        }
        true
    }

    fn sweep(&mut self, epoch: u64, repeat: Option<Duration>) -> bool {
        if !self.enabled || epoch != self.state.epoch {
            tracing::debug!(epoch, "sweep from an earlier run, skipping");
            return false;
        }
        let directory = WorkspaceDirectory::read(&self.display_server);
        let removals = self.state.allocator.sweep_empty_workspaces(&directory);
        let removed = removals.len();
        self.state.actions.extend(removals);
        tracing::info!(removed, "swept empty workspaces");

        if let Some(interval) = repeat {
            self.state
                .scheduler
                .schedule(interval, Deferred::Sweep { epoch, repeat });
        }
        removed > 0
    }
}
