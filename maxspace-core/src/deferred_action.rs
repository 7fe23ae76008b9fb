use crate::allocator::Target;
use crate::models::{Handle, MAIN_WORKSPACE, Timestamp, WindowHandle, WorkspaceIndex};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Work the lifecycle engine postpones until the window manager has settled.
///
/// Each variant is an immutable snapshot of what was decided when it was scheduled. When it fires
/// the snapshot is compared against live state, and a mismatch makes the action a no-op.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum Deferred<H: Handle> {
    /// Move a freshly maximized window to its own workspace.
    /// Guard: the window is still in the `Maximized` transition this was scheduled for.
    #[serde(bound = "")]
    MoveToTarget {
        handle: WindowHandle<H>,
        generation: u64,
        target: Target,
        timestamp: Timestamp,
    },

    /// Bring an unmaximized window back to where it came from.
    /// Guard: the window is still in the `Unmaximized` transition this was scheduled for and
    /// still has an origin.
    #[serde(bound = "")]
    ReturnToOrigin {
        handle: WindowHandle<H>,
        generation: u64,
        temporary: WorkspaceIndex,
        timestamp: Timestamp,
    },

    /// Leave the workspace a closed window was alone on.
    /// Guard: the window is still `Closed`.
    #[serde(bound = "")]
    LeaveClosed {
        handle: WindowHandle<H>,
        generation: u64,
        workspace: WorkspaceIndex,
    },

    /// Remove every empty workspace except the main one, optionally again after `repeat`.
    /// Guard: maxspace is enabled and has not been re-enabled since.
    Sweep {
        epoch: u64,
        repeat: Option<Duration>,
    },
}

impl<H: Handle> Deferred<H> {
    #[must_use]
    pub fn handle(&self) -> Option<&WindowHandle<H>> {
        match self {
            Self::MoveToTarget { handle, .. }
            | Self::ReturnToOrigin { handle, .. }
            | Self::LeaveClosed { handle, .. } => Some(handle),
            Self::Sweep { .. } => None,
        }
    }

    /// Keep the snapshot pointed at the same workspaces after one was removed.
    ///
    /// Indexes after the removed one shift down by one. A reserved workspace that was removed
    /// becomes a new one. Any other index of the removed workspace falls back to the main one.
    pub fn workspace_removed(&mut self, removed: WorkspaceIndex) {
        match self {
            Self::MoveToTarget { target, .. } => match *target {
                Target::Existing(index) if index > removed => {
                    *target = Target::Existing(index - 1);
                }
                Target::Existing(index) if index == removed => *target = Target::Append,
                _ => {}
            },
            Self::ReturnToOrigin {
                temporary: index, ..
            }
            | Self::LeaveClosed {
                workspace: index, ..
            } => {
                if *index > removed {
                    *index -= 1;
                } else if *index == removed {
                    *index = MAIN_WORKSPACE;
                }
            }
            Self::Sweep { .. } => {}
        }
    }
}
