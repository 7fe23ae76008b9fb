use super::{Config, DisplayServer, Handle, Lifecycle, Manager, Window};
use crate::deferred_action::Deferred;
use crate::directory::WorkspaceDirectory;
use crate::models::MAIN_WORKSPACE;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Process a window that was just mapped.
    /// Returns true if workspace membership may have changed.
    pub fn window_opened_handler(&mut self, window: Window<H>) -> bool {
        let handle = window.handle;
        self.state.tracker.set_state(handle, Lifecycle::Opened);
        self.state.tracker.set_origin(handle, Some(window.workspace));
        tracing::debug!(
            window = ?handle,
            workspace = window.workspace,
            class = ?window.res_class,
            "opened"
        );

        // Windows that start out maximized never send a maximize notification.
        if window.maximized {
            return self.maximize(window);
        }
        false
    }

    /// Process a window that was destroyed. `window` is its last known state.
    /// Returns true if workspace membership may have changed.
    pub fn window_closed_handler(&mut self, window: &Window<H>) -> bool {
        let handle = window.handle;
        let directory = WorkspaceDirectory::read(&self.display_server);
        let others = directory
            .by_index(window.workspace)
            .map(|ws| ws.population_excluding(&handle));

        match others {
            Some(0) if window.workspace != MAIN_WORKSPACE && window.is_tracked() => {}
            _ => {
                tracing::debug!(window = ?handle, workspace = window.workspace, "closed");
                self.state.tracker.forget(&handle);
                return true;
            }
        }

        let generation = self.state.tracker.set_state(handle, Lifecycle::Closed);
        self.state.tracker.set_origin(handle, None);
        tracing::debug!(
            window = ?handle,
            workspace = window.workspace,
            "closed, leaving its workspace"
        );
        self.state.defer(Deferred::LeaveClosed {
            handle,
            generation,
            workspace: window.workspace,
        });
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TestConfig;
    use crate::display_action::DisplayAction;
    use crate::models::{MockHandle, WindowHandle};
    use crate::DisplayEvent;
    use std::time::Duration;

    const DELAY: Duration = Duration::from_millis(400);

    fn window(id: MockHandle, workspace: usize) -> Window<MockHandle> {
        Window::new(WindowHandle(id), workspace)
    }

    #[test]
    fn opening_a_window_records_where_it_started() {
        let mut manager = Manager::new_test(TestConfig::default());
        manager.display_server.add_window(window(1, 2));
        manager.handle_event(DisplayEvent::WindowCreate(window(1, 2)));

        assert_eq!(
            manager.state.tracker.state(&WindowHandle(1)),
            Lifecycle::Opened
        );
        assert_eq!(manager.state.tracker.origin(&WindowHandle(1)), Some(2));
        assert!(manager.display_server.executed.is_empty());
    }

    #[test]
    fn windows_opened_maximized_get_their_own_workspace() {
        let mut manager = Manager::new_test(TestConfig::default());
        manager.display_server.add_window(window(1, 0));
        let b = Window {
            maximized: true,
            ..window(2, 0)
        };
        manager.display_server.add_window(b.clone());
        manager.handle_event(DisplayEvent::WindowCreate(b));

        assert_eq!(
            manager.state.tracker.state(&WindowHandle(2)),
            Lifecycle::Maximized
        );
        manager.advance(DELAY);
        assert_eq!(manager.display_server.workspace_of(&WindowHandle(2)), Some(1));
    }

    #[test]
    fn closing_the_last_window_of_a_workspace_goes_back_to_main() {
        let mut manager = Manager::new_test(TestConfig::default());
        manager.display_server.add_window(window(1, 0));
        manager.display_server.add_window(window(2, 1));
        manager.handle_event(DisplayEvent::WindowCreate(window(2, 1)));
        manager.display_server.active_workspace = 1;

        let closed = manager.display_server.remove_window(&WindowHandle(2)).unwrap();
        manager.handle_event(DisplayEvent::WindowDestroy(closed));
        assert_eq!(
            manager.state.tracker.state(&WindowHandle(2)),
            Lifecycle::Closed
        );
        assert_eq!(manager.state.tracker.origin(&WindowHandle(2)), None);
        assert!(manager.display_server.executed.is_empty());

        manager.advance(DELAY);
        assert_eq!(manager.display_server.active_workspace, 0);
        assert_eq!(manager.display_server.workspace_count(), 1);
        assert_eq!(
            manager.state.tracker.state(&WindowHandle(2)),
            Lifecycle::Untracked
        );
    }

    #[test]
    fn windows_closing_together_leave_both_of_their_workspaces() {
        let mut manager = Manager::new_test(TestConfig::default());
        manager.display_server.add_window(window(1, 0));
        manager.display_server.add_window(window(2, 1));
        manager.display_server.add_window(window(3, 2));
        manager.display_server.active_workspace = 2;

        for handle in [WindowHandle(2), WindowHandle(3)] {
            let closed = manager.display_server.remove_window(&handle).unwrap();
            manager.handle_event(DisplayEvent::WindowDestroy(closed));
        }
        manager.advance(DELAY);

        let removed: Vec<_> = manager
            .display_server
            .executed
            .iter()
            .filter(|act| matches!(act, DisplayAction::RemoveWorkspace(_)))
            .collect();
        assert_eq!(
            removed,
            vec![
                &DisplayAction::RemoveWorkspace(1),
                &DisplayAction::RemoveWorkspace(1)
            ]
        );
        assert_eq!(manager.display_server.workspace_count(), 1);
        assert_eq!(manager.display_server.active_workspace, 0);
    }

    #[test]
    fn closing_a_window_on_a_shared_or_main_workspace_changes_nothing() {
        let mut manager = Manager::new_test(TestConfig::default());
        manager.display_server.add_window(window(1, 0));
        manager.display_server.add_window(window(2, 1));
        manager.display_server.add_window(window(3, 1));
        manager.handle_event(DisplayEvent::WindowCreate(window(1, 0)));
        manager.handle_event(DisplayEvent::WindowCreate(window(3, 1)));

        for handle in [WindowHandle(1), WindowHandle(3)] {
            let closed = manager.display_server.remove_window(&handle).unwrap();
            manager.handle_event(DisplayEvent::WindowDestroy(closed));
            assert_eq!(manager.state.tracker.state(&handle), Lifecycle::Untracked);
        }
        manager.advance(DELAY);
        assert!(manager.display_server.mutations().is_empty());
        assert_eq!(manager.display_server.workspace_count(), 2);
    }

    #[test]
    fn a_workspace_that_got_a_new_window_is_not_left() {
        let mut manager = Manager::new_test(TestConfig::default());
        manager.display_server.add_window(window(1, 1));
        manager.display_server.active_workspace = 1;
        let closed = manager.display_server.remove_window(&WindowHandle(1)).unwrap();
        manager.handle_event(DisplayEvent::WindowDestroy(closed));

        manager.display_server.add_window(window(2, 1));
        manager.advance(DELAY);
        assert!(manager.display_server.executed.is_empty());
        assert_eq!(manager.display_server.active_workspace, 1);
    }

    #[test]
    fn closing_without_eager_reclaim_keeps_the_workspace() {
        let mut manager = Manager::new_test(TestConfig {
            reclaim_policy: crate::config::ReclaimPolicy::Never,
            ..TestConfig::default()
        });
        manager.display_server.add_window(window(1, 1));
        let closed = manager.display_server.remove_window(&WindowHandle(1)).unwrap();
        manager.handle_event(DisplayEvent::WindowDestroy(closed));
        manager.advance(DELAY);

        assert_eq!(
            manager.display_server.executed,
            vec![DisplayAction::ActivateWorkspace {
                index: 0,
                focus: None,
                timestamp: 0
            }]
        );
        assert_eq!(manager.display_server.workspace_count(), 2);
    }
}
