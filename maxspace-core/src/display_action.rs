use crate::models::{Handle, Timestamp, WindowHandle, WorkspaceIndex};
use serde::{Deserialize, Serialize};

/// These are requests from the lifecycle engine to the window manager.
/// The display server should act on these actions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum DisplayAction<H: Handle> {
    /// Add a new workspace after the last one.
    AppendWorkspace,

    /// Remove the workspace at the given index. Workspaces after it shift down by one.
    RemoveWorkspace(WorkspaceIndex),

    /// Send a window to another workspace.
    #[serde(bound = "")]
    MoveWindowToWorkspace(WindowHandle<H>, WorkspaceIndex),

    /// Switch to a workspace, optionally giving input focus to one of its windows.
    #[serde(bound = "")]
    ActivateWorkspace {
        index: WorkspaceIndex,
        focus: Option<WindowHandle<H>>,
        timestamp: Timestamp,
    },

    /// Give a workspace a human readable name.
    SetWorkspaceName(WorkspaceIndex, String),
}

impl<H: Handle> DisplayAction<H> {
    /// Returns true if the action changes which workspaces exist or who lives on them.
    #[must_use]
    pub fn changes_workspaces(&self) -> bool {
        matches!(
            self,
            Self::AppendWorkspace | Self::RemoveWorkspace(_) | Self::MoveWindowToWorkspace(..)
        )
    }
}
