use super::{Handle, MAIN_WORKSPACE, MonitorId, Window, WindowHandle, WorkspaceIndex};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A snapshot of one of the window manager's workspaces and the windows on it.
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Workspace<H: Handle> {
    pub index: WorkspaceIndex,
    pub name: Option<String>,
    #[serde(bound = "")]
    pub windows: Vec<Window<H>>,
}

impl<H: Handle> fmt::Debug for Workspace<H> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Workspace {{ index: {}, name: {:?}, population: {} }}",
            self.index,
            self.name,
            self.population()
        )
    }
}

impl<H: Handle> Workspace<H> {
    #[must_use]
    pub fn new(index: WorkspaceIndex) -> Self {
        Self {
            index,
            name: None,
            windows: vec![],
        }
    }

    #[must_use]
    pub fn is_main(&self) -> bool {
        self.index == MAIN_WORKSPACE
    }

    /// Windows that count as occupants, i.e. everything not shown on all workspaces.
    pub fn tracked_windows(&self) -> impl Iterator<Item = &Window<H>> {
        self.windows.iter().filter(|w| w.is_tracked())
    }

    #[must_use]
    pub fn population(&self) -> usize {
        self.tracked_windows().count()
    }

    /// The population of the workspace, not counting the window that is leaving it.
    #[must_use]
    pub fn population_excluding(&self, leaving: &WindowHandle<H>) -> usize {
        self.tracked_windows()
            .filter(|w| &w.handle != leaving)
            .count()
    }

    /// Returns true if no occupant of this workspace lives on the given monitor.
    #[must_use]
    pub fn is_empty_on(&self, monitor: MonitorId) -> bool {
        !self.tracked_windows().any(|w| w.monitor == monitor)
    }

    /// Returns true if the given window is the only occupant of this workspace.
    #[must_use]
    pub fn is_sole_occupant(&self, handle: &WindowHandle<H>) -> bool {
        self.population() == 1 && self.tracked_windows().any(|w| &w.handle == handle)
    }

    #[must_use]
    pub fn sole_occupant(&self) -> Option<&Window<H>> {
        let mut tracked = self.tracked_windows();
        match (tracked.next(), tracked.next()) {
            (Some(window), None) => Some(window),
            _ => None,
        }
    }
}
