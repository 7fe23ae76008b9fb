//! Per-window lifecycle state, kept in a side table keyed by window handle.
//!
//! The tracker does not validate transitions, that is the job of the handlers.
use crate::models::{Handle, Lifecycle, MAIN_WORKSPACE, WindowHandle, WorkspaceIndex};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// What maxspace remembers about a single window.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct TrackedWindow {
    pub lifecycle: Lifecycle,
    /// Bumped on every lifecycle transition, so a deferred action can tell whether the
    /// transition it was scheduled for is still the latest one.
    pub generation: u64,
    /// The workspace to return to on unmaximize. `Some` only while a return trip is pending.
    pub origin: Option<WorkspaceIndex>,
    /// Label given to the temporary workspace created for this window.
    pub assigned_name: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WindowTracker<H: Handle> {
    #[serde(bound = "")]
    windows: HashMap<WindowHandle<H>, TrackedWindow>,
}

impl<H: Handle> Default for WindowTracker<H> {
    fn default() -> Self {
        Self {
            windows: HashMap::new(),
        }
    }
}

impl<H: Handle> WindowTracker<H> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transition and return its generation.
    pub fn set_state(&mut self, handle: WindowHandle<H>, lifecycle: Lifecycle) -> u64 {
        let tracked = self.windows.entry(handle).or_default();
        tracked.lifecycle = lifecycle;
        tracked.generation += 1;
        tracked.generation
    }

    /// Returns [`Lifecycle::Untracked`] for windows that were never seen.
    #[must_use]
    pub fn state(&self, handle: &WindowHandle<H>) -> Lifecycle {
        self.windows
            .get(handle)
            .map_or(Lifecycle::Untracked, |w| w.lifecycle)
    }

    /// Returns true if the window is still in the state a deferred action was scheduled for.
    #[must_use]
    pub fn is_current(
        &self,
        handle: &WindowHandle<H>,
        lifecycle: Lifecycle,
        generation: u64,
    ) -> bool {
        self.windows
            .get(handle)
            .is_some_and(|w| w.lifecycle == lifecycle && w.generation == generation)
    }

    pub fn set_origin(&mut self, handle: WindowHandle<H>, origin: Option<WorkspaceIndex>) {
        // Clearing the origin of an unknown window must not start tracking it.
        if origin.is_none() && !self.windows.contains_key(&handle) {
            return;
        }
        self.windows.entry(handle).or_default().origin = origin;
    }

    #[must_use]
    pub fn origin(&self, handle: &WindowHandle<H>) -> Option<WorkspaceIndex> {
        self.windows.get(handle).and_then(|w| w.origin)
    }

    pub fn set_assigned_name(&mut self, handle: WindowHandle<H>, name: Option<String>) {
        if let Some(tracked) = self.windows.get_mut(&handle) {
            tracked.assigned_name = name;
        }
    }

    #[must_use]
    pub fn assigned_name(&self, handle: &WindowHandle<H>) -> Option<&str> {
        self.windows
            .get(handle)
            .and_then(|w| w.assigned_name.as_deref())
    }

    /// Drop everything known about a window. Called once a closed window has been dealt with.
    pub fn forget(&mut self, handle: &WindowHandle<H>) -> Option<TrackedWindow> {
        self.windows.remove(handle)
    }

    /// Keep pending return trips pointed at the same workspaces after one was removed.
    ///
    /// Origins after the removed index shift down by one. An origin that pointed at the removed
    /// workspace falls back to the main workspace.
    pub fn workspace_removed(&mut self, removed: WorkspaceIndex) {
        for tracked in self.windows.values_mut() {
            match tracked.origin {
                Some(origin) if origin > removed => tracked.origin = Some(origin - 1),
                Some(origin) if origin == removed => tracked.origin = Some(MAIN_WORKSPACE),
                _ => {}
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MockHandle;

    #[test]
    fn unknown_windows_are_untracked() {
        let subject = WindowTracker::<MockHandle>::new();
        assert_eq!(subject.state(&WindowHandle(1)), Lifecycle::Untracked);
        assert_eq!(subject.origin(&WindowHandle(1)), None);
    }

    #[test]
    fn clearing_an_origin_does_not_start_tracking() {
        let mut subject = WindowTracker::<MockHandle>::new();
        subject.set_origin(WindowHandle(1), None);
        assert!(subject.is_empty());
    }

    #[test]
    fn forgetting_a_window_drops_its_state() {
        let mut subject = WindowTracker::<MockHandle>::new();
        subject.set_state(WindowHandle(1), Lifecycle::Maximized);
        subject.set_origin(WindowHandle(1), Some(2));
        assert_eq!(subject.state(&WindowHandle(1)), Lifecycle::Maximized);
        assert_eq!(subject.origin(&WindowHandle(1)), Some(2));

        subject.forget(&WindowHandle(1));
        assert_eq!(subject.state(&WindowHandle(1)), Lifecycle::Untracked);
        assert_eq!(subject.origin(&WindowHandle(1)), None);
    }

    #[test]
    fn a_later_transition_makes_earlier_snapshots_stale() {
        let mut subject = WindowTracker::<MockHandle>::new();
        let first = subject.set_state(WindowHandle(1), Lifecycle::Maximized);
        assert!(subject.is_current(&WindowHandle(1), Lifecycle::Maximized, first));

        subject.set_state(WindowHandle(1), Lifecycle::Unmaximized);
        let second = subject.set_state(WindowHandle(1), Lifecycle::Maximized);
        assert!(!subject.is_current(&WindowHandle(1), Lifecycle::Maximized, first));
        assert!(subject.is_current(&WindowHandle(1), Lifecycle::Maximized, second));
        assert!(!subject.is_current(&WindowHandle(2), Lifecycle::Untracked, 0));
    }

    #[test]
    fn removing_a_workspace_shifts_later_origins() {
        let mut subject = WindowTracker::<MockHandle>::new();
        subject.set_origin(WindowHandle(1), Some(1));
        subject.set_origin(WindowHandle(2), Some(2));
        subject.set_origin(WindowHandle(3), Some(3));

        subject.workspace_removed(2);
        assert_eq!(subject.origin(&WindowHandle(1)), Some(1));
        assert_eq!(subject.origin(&WindowHandle(2)), Some(0));
        assert_eq!(subject.origin(&WindowHandle(3)), Some(2));
    }
}
