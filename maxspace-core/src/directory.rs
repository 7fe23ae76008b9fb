//! Read-only view over the window manager's workspaces.
//!
//! A directory is a snapshot. It is read fresh from the display server every time a decision is
//! made and never kept across events or deferred actions.
use crate::display_servers::DisplayServer;
use crate::models::{Handle, Workspace, WorkspaceIndex};

#[derive(Debug, Clone)]
pub struct WorkspaceDirectory<H: Handle> {
    workspaces: Vec<Workspace<H>>,
}

impl<H: Handle> From<Vec<Workspace<H>>> for WorkspaceDirectory<H> {
    fn from(mut workspaces: Vec<Workspace<H>>) -> Self {
        workspaces.sort_by_key(|ws| ws.index);
        Self { workspaces }
    }
}

impl<H: Handle> WorkspaceDirectory<H> {
    /// Query the current workspaces from the window manager.
    pub fn read<SERVER: DisplayServer<H>>(display_server: &SERVER) -> Self {
        Self::from(display_server.workspaces())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.workspaces.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workspaces.is_empty()
    }

    /// Workspaces in ascending index order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Workspace<H>> {
        self.workspaces.iter()
    }

    #[must_use]
    pub fn by_index(&self, index: WorkspaceIndex) -> Option<&Workspace<H>> {
        self.workspaces.iter().find(|ws| ws.index == index)
    }

    /// The index a workspace appended right now would get.
    #[must_use]
    pub fn next_index(&self) -> WorkspaceIndex {
        self.workspaces.last().map_or(0, |ws| ws.index + 1)
    }

    /// Number of occupants of the workspace at `index`, zero if there is no such workspace.
    #[must_use]
    pub fn population(&self, index: WorkspaceIndex) -> usize {
        self.by_index(index).map_or(0, Workspace::population)
    }
}
