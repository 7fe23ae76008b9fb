use crate::config::Config;
use crate::directory::WorkspaceDirectory;
use crate::display_action::DisplayAction;
use crate::display_servers::DisplayServer;
use crate::models::Handle;
use crate::state::State;
use crate::{Deferred, DisplayEvent};
use std::collections::VecDeque;
use std::time::Duration;

/// Maintains current program state.
#[derive(Debug)]
pub struct Manager<H: Handle, C, SERVER> {
    pub state: State<H>,
    pub config: C,
    pub display_server: SERVER,
    pub(crate) enabled: bool,
}

impl<H, C, SERVER> Manager<H, C, SERVER>
where
    H: Handle,
    C: Config,
    SERVER: DisplayServer<H>,
{
    pub fn new(config: C) -> Self {
        let display_server = SERVER::new(&config);

        Self {
            state: State::new(&config),
            config,
            display_server,
            enabled: false,
        }
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Start reacting to window notifications. Enabling twice has no further effect.
    pub fn enable(&mut self) {
        if self.enabled {
            return;
        }
        self.enabled = true;
        self.state.epoch += 1;
        self.display_server.subscribe();

        let epoch = self.state.epoch;
        if self.config.auto_cleanup_on_startup() {
            self.state.scheduler.schedule(
                self.config.startup_cleanup_delay(),
                Deferred::Sweep {
                    epoch,
                    repeat: None,
                },
            );
        }
        if let (true, Some(interval)) = (
            self.state.allocator.reclaim.is_sweep(),
            self.config.sweep_interval(),
        ) {
            self.state.scheduler.schedule(
                interval,
                Deferred::Sweep {
                    epoch,
                    repeat: Some(interval),
                },
            );
        }
        tracing::info!(epoch, "maxspace enabled");
    }

    /// Stop reacting to window notifications. Actions that are already scheduled still run, each
    /// of them checks on its own whether it still applies.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.display_server.unsubscribe();
        tracing::info!("maxspace disabled");
    }

    /// Disable and enable again, picking up the current configuration.
    pub fn refresh(&mut self) {
        self.disable();
        self.enable();
    }

    /// Replace the configuration and refresh.
    pub fn load_config(&mut self, config: C) {
        self.config = config;
        self.state.load_config(&self.config);
        tracing::info!(
            allocator = ?self.state.allocator,
            naming = ?self.state.naming,
            "configuration loaded"
        );
        self.refresh();
    }

    /// Handle an event from the window manager and carry out everything it leads to.
    pub fn handle_event(&mut self, event: DisplayEvent<H>) {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let changed = self.display_event_handler(event);
            queue.extend(self.apply_actions(changed));
        }
    }

    /// Move the scheduler clock forward and run everything that became due.
    pub fn advance(&mut self, elapsed: Duration) {
        self.state.scheduler.advance(elapsed);
        self.fire_due_actions();
    }

    /// Run every deferred action whose delay has elapsed, in schedule order.
    pub fn fire_due_actions(&mut self) {
        while let Some(deferred) = self.state.scheduler.pop_due() {
            let changed = self.deferred_action_handler(deferred);
            for event in self.apply_actions(changed) {
                self.handle_event(event);
            }
        }
    }

    /// Send the queued requests to the window manager, then bring workspace names up to date if
    /// anything moved around.
    fn apply_actions(&mut self, mut changed: bool) -> Vec<DisplayEvent<H>> {
        let mut events = vec![];
        changed = self.execute_actions(&mut events) || changed;
        if changed {
            self.refresh_workspace_names();
            self.execute_actions(&mut events);
        }
        events
    }

    /// Returns true if any executed request changed workspaces or their occupants.
    pub(crate) fn execute_actions(&mut self, events: &mut Vec<DisplayEvent<H>>) -> bool {
        let mut changed = false;
        while let Some(act) = self.state.actions.pop_front() {
            if let DisplayAction::RemoveWorkspace(index) = act {
                self.state.tracker.workspace_removed(index);
                self.state
                    .scheduler
                    .pending_mut()
                    .for_each(|deferred| deferred.workspace_removed(index));
            }
            changed = changed || act.changes_workspaces();
            tracing::debug!(action = ?act, "executing");
            if let Some(event) = self.display_server.execute_action(act) {
                events.push(event);
            }
        }
        changed
    }

    /// Queue a rename for every workspace whose name is out of date.
    pub fn refresh_workspace_names(&mut self) {
        let directory = WorkspaceDirectory::read(&self.display_server);
        let renames = self.state.naming.refresh(&directory, &self.state.tracker);
        self.state.actions.extend(renames);
    }
}

#[cfg(test)]
impl
    Manager<
        crate::models::MockHandle,
        crate::config::tests::TestConfig,
        crate::display_servers::MockDisplayServer<crate::models::MockHandle>,
    >
{
    /// An enabled manager on top of an in-memory window manager.
    pub fn new_test(config: crate::config::tests::TestConfig) -> Self {
        let mut manager = Self::new(config);
        manager.enable();
        manager
    }
}
