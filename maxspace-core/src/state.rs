//! Everything the lifecycle engine remembers between events.

use crate::allocator::Allocator;
use crate::config::Config;
use crate::deferred_action::Deferred;
use crate::display_action::DisplayAction;
use crate::models::Handle;
use crate::naming::NamingPolicy;
use crate::scheduler::Scheduler;
use crate::tracker::WindowTracker;
use std::collections::VecDeque;
use std::time::Duration;

#[derive(Debug)]
pub struct State<H: Handle> {
    pub tracker: WindowTracker<H>,
    pub actions: VecDeque<DisplayAction<H>>,
    pub scheduler: Scheduler<Deferred<H>>,
    pub allocator: Allocator,
    pub naming: NamingPolicy,
    pub switch_delay: Duration,
    /// Counts how often maxspace was enabled. Periodic work from an earlier run checks it to
    /// find out it is no longer wanted.
    pub epoch: u64,
}

impl<H: Handle> State<H> {
    pub(crate) fn new(config: &impl Config) -> Self {
        Self {
            tracker: WindowTracker::new(),
            actions: VecDeque::new(),
            scheduler: Scheduler::new(),
            allocator: Allocator::new(config),
            naming: NamingPolicy::new(config),
            switch_delay: config.switch_delay(),
            epoch: 0,
        }
    }

    /// Apply a new configuration. Tracked windows and pending actions are kept.
    pub fn load_config(&mut self, config: &impl Config) {
        self.allocator = Allocator::new(config);
        self.naming = NamingPolicy::new(config);
        self.switch_delay = config.switch_delay();
    }

    /// Run `action` after the configured switch delay.
    pub(crate) fn defer(&mut self, action: Deferred<H>) {
        tracing::debug!(?action, delay = ?self.switch_delay, "deferring");
        self.scheduler.schedule(self.switch_delay, action);
    }
}
