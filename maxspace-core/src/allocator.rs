//! Decides which workspace a maximized window goes to, and which workspaces can go away.
use crate::config::{Config, ReclaimPolicy};
use crate::directory::WorkspaceDirectory;
use crate::display_action::DisplayAction;
use crate::models::{Handle, MAIN_WORKSPACE, Window, WindowHandle, Workspace, WorkspaceIndex};
use serde::{Deserialize, Serialize};

/// Where a maximized window should be moved.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Reuse a workspace that is already there.
    Existing(WorkspaceIndex),
    /// Create a new workspace after the last one. The workspace is only created once the move
    /// actually happens.
    Append,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Allocator {
    pub reuse_existing: bool,
    pub reuse_main: bool,
    pub create_when_exhausted: bool,
    pub reclaim: ReclaimPolicy,
}

impl Default for Allocator {
    fn default() -> Self {
        Self {
            reuse_existing: false,
            reuse_main: false,
            create_when_exhausted: true,
            reclaim: ReclaimPolicy::Eager,
        }
    }
}

impl Allocator {
    pub fn new(config: &impl Config) -> Self {
        Self {
            reuse_existing: config.reuse_existing_workspace(),
            reuse_main: config.reuse_main_workspace(),
            create_when_exhausted: config.create_when_exhausted(),
            reclaim: config.reclaim_policy(),
        }
    }

    /// Returns the first workspace, in index order, where the window would not share its
    /// monitor with any occupant.
    pub fn find_first_empty_workspace<'a, H: Handle>(
        &self,
        directory: &'a WorkspaceDirectory<H>,
        window: &Window<H>,
    ) -> Option<&'a Workspace<H>> {
        directory
            .iter()
            .filter(|ws| self.reuse_main || !ws.is_main())
            .find(|ws| ws.is_empty_on(window.monitor))
    }

    /// Pick the workspace a maximized window should move to.
    ///
    /// Returns `None` when nothing can be reused and creating a workspace is not allowed.
    pub fn allocate_target<H: Handle>(
        &self,
        directory: &WorkspaceDirectory<H>,
        window: &Window<H>,
    ) -> Option<Target> {
        if self.reuse_existing {
            if let Some(ws) = self.find_first_empty_workspace(directory, window) {
                return Some(Target::Existing(ws.index));
            }
        }
        self.create_when_exhausted.then_some(Target::Append)
    }

    /// Resolve a target against the current workspaces, right before moving a window there.
    ///
    /// A reused workspace must still exist and still be free on the window's monitor, and a new
    /// one must still be allowed. Otherwise the move is abandoned.
    pub fn resolve_target<H: Handle>(
        &self,
        directory: &WorkspaceDirectory<H>,
        window: &Window<H>,
        target: Target,
    ) -> Option<(WorkspaceIndex, bool)> {
        match target {
            Target::Append => self
                .create_when_exhausted
                .then(|| (directory.next_index(), true)),
            Target::Existing(index) => directory
                .by_index(index)
                .filter(|ws| {
                    ws.tracked_windows()
                        .all(|w| w.handle == window.handle || !w.shares_monitor(window))
                })
                .map(|ws| (ws.index, false)),
        }
    }

    /// Returns true if leaving a workspace should remove it right away.
    pub fn reclaims_eagerly(&self) -> bool {
        self.reclaim.is_eager()
    }

    /// Request removal of a workspace if nobody but `leaving` occupies it.
    ///
    /// The main workspace is never removed.
    pub fn reclaim<H: Handle>(
        &self,
        directory: &WorkspaceDirectory<H>,
        index: WorkspaceIndex,
        leaving: Option<&WindowHandle<H>>,
    ) -> Option<DisplayAction<H>> {
        if index == MAIN_WORKSPACE {
            return None;
        }
        let ws = directory.by_index(index)?;
        let population = match leaving {
            Some(handle) => ws.population_excluding(handle),
            None => ws.population(),
        };
        (population == 0).then_some(DisplayAction::RemoveWorkspace(index))
    }

    /// Request removal of every empty workspace, from the last one down to (not including) the
    /// main workspace. Going backwards keeps the indexes of the remaining requests valid.
    pub fn sweep_empty_workspaces<H: Handle>(
        &self,
        directory: &WorkspaceDirectory<H>,
    ) -> Vec<DisplayAction<H>> {
        directory
            .iter()
            .rev()
            .filter(|ws| !ws.is_main() && ws.population() == 0)
            .map(|ws| DisplayAction::RemoveWorkspace(ws.index))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MockHandle, MonitorId};

    fn window(id: MockHandle, workspace: WorkspaceIndex, monitor: MonitorId) -> Window<MockHandle> {
        let mut window = Window::new(WindowHandle(id), workspace);
        window.monitor = monitor;
        window
    }

    fn directory(layout: &[&[Window<MockHandle>]]) -> WorkspaceDirectory<MockHandle> {
        layout
            .iter()
            .enumerate()
            .map(|(index, windows)| Workspace {
                index,
                name: None,
                windows: windows.to_vec(),
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn without_reuse_a_new_workspace_is_appended() {
        let subject = Allocator::default();
        let b = window(2, 0, 0);
        let dir = directory(&[&[window(1, 0, 0), b.clone()], &[]]);
        assert_eq!(subject.allocate_target(&dir, &b), Some(Target::Append));
        assert_eq!(subject.resolve_target(&dir, &b, Target::Append), Some((2, true)));
    }

    #[test]
    fn reuse_picks_the_first_empty_workspace_but_not_main() {
        let subject = Allocator {
            reuse_existing: true,
            ..Allocator::default()
        };
        let sticky = Window {
            on_all_workspaces: true,
            ..window(9, 0, 0)
        };
        let b = window(2, 0, 0);
        let dir = directory(&[&[], &[window(1, 1, 0)], &[sticky], &[]]);
        assert_eq!(subject.allocate_target(&dir, &b), Some(Target::Existing(2)));

        let subject = Allocator {
            reuse_main: true,
            ..subject
        };
        assert_eq!(subject.allocate_target(&dir, &b), Some(Target::Existing(0)));
    }

    #[test]
    fn reuse_ignores_windows_on_other_monitors() {
        let subject = Allocator {
            reuse_existing: true,
            ..Allocator::default()
        };
        let b = window(2, 0, 0);
        let dir = directory(&[&[b.clone()], &[window(1, 1, 1)]]);
        assert_eq!(subject.allocate_target(&dir, &b), Some(Target::Existing(1)));
    }

    #[test]
    fn nothing_is_allocated_when_creation_is_disallowed() {
        let subject = Allocator {
            reuse_existing: true,
            create_when_exhausted: false,
            ..Allocator::default()
        };
        let b = window(2, 0, 0);
        let dir = directory(&[&[b.clone()], &[window(1, 1, 0)]]);
        assert_eq!(subject.allocate_target(&dir, &b), None);
        assert_eq!(subject.resolve_target(&dir, &b, Target::Append), None);
    }

    #[test]
    fn a_reused_workspace_that_filled_up_is_not_resolved() {
        let subject = Allocator::default();
        let b = window(2, 0, 0);
        let dir = directory(&[&[b.clone()], &[window(1, 1, 0)]]);
        assert_eq!(subject.resolve_target(&dir, &b, Target::Existing(1)), None);
        assert_eq!(subject.resolve_target(&dir, &b, Target::Existing(4)), None);
    }

    #[test]
    fn reclaim_never_removes_main_or_occupied_workspaces() {
        let subject = Allocator::default();
        let b = window(2, 1, 0);
        let dir = directory(&[&[], &[b.clone()], &[window(3, 2, 0), window(4, 2, 0)]]);

        assert_eq!(subject.reclaim(&dir, 0, None), None);
        assert_eq!(
            subject.reclaim(&dir, 1, Some(&b.handle)),
            Some(DisplayAction::RemoveWorkspace(1))
        );
        assert_eq!(subject.reclaim(&dir, 1, None), None);
        assert_eq!(subject.reclaim(&dir, 2, Some(&WindowHandle(3))), None);
    }

    #[test]
    fn sweep_goes_from_the_last_workspace_down() {
        let subject = Allocator::default();
        let dir = directory(&[&[], &[], &[window(1, 2, 0)], &[]]);
        assert_eq!(
            subject.sweep_empty_workspaces(&dir),
            vec![
                DisplayAction::RemoveWorkspace(3),
                DisplayAction::RemoveWorkspace(1)
            ]
        );
    }
}
