use super::Config;
use super::DisplayEvent;
use super::DisplayServer;
use crate::display_action::DisplayAction;
use crate::models::{Handle, Timestamp, Window, WindowHandle, Workspace, WorkspaceIndex};
use futures::future;
use std::future::Future;
use std::pin::Pin;

/// A window manager that lives in memory. It applies requests the way a real one would and keeps
/// a log of everything it was asked to do.
#[derive(Debug, Clone)]
pub struct MockDisplayServer<H: Handle> {
    pub names: Vec<Option<String>>,
    pub windows: Vec<Window<H>>,
    pub active_workspace: WorkspaceIndex,
    pub focused: Option<WindowHandle<H>>,
    pub subscribed: bool,
    pub executed: Vec<DisplayAction<H>>,
    pub events: Vec<DisplayEvent<H>>,
    pub time: Timestamp,
}

impl<H: Handle> DisplayServer<H> for MockDisplayServer<H> {
    fn new(_: &impl Config) -> Self {
        Self {
            names: vec![None],
            windows: vec![],
            active_workspace: 0,
            focused: None,
            subscribed: false,
            executed: vec![],
            events: vec![],
            time: 0,
        }
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<H>> {
        std::mem::take(&mut self.events)
    }

    fn window(&self, handle: &WindowHandle<H>) -> Option<Window<H>> {
        self.windows.iter().find(|w| &w.handle == handle).cloned()
    }

    // Like most window managers, windows on all workspaces are listed on every workspace.
    fn workspaces(&self) -> Vec<Workspace<H>> {
        self.names
            .iter()
            .enumerate()
            .map(|(index, name)| Workspace {
                index,
                name: name.clone(),
                windows: self
                    .windows
                    .iter()
                    .filter(|w| w.on_all_workspaces || w.workspace == index)
                    .cloned()
                    .collect(),
            })
            .collect()
    }

    fn current_time(&self) -> Timestamp {
        self.time
    }

    fn execute_action(&mut self, act: DisplayAction<H>) -> Option<DisplayEvent<H>> {
        match &act {
            DisplayAction::AppendWorkspace => self.names.push(None),
            DisplayAction::RemoveWorkspace(index) => self.remove_workspace(*index),
            DisplayAction::MoveWindowToWorkspace(handle, index) => {
                let index = *index;
                if index < self.names.len() {
                    if let Some(window) = self.windows.iter_mut().find(|w| &w.handle == handle) {
                        window.workspace = index;
                    }
                }
            }
            DisplayAction::ActivateWorkspace { index, focus, .. } => {
                self.active_workspace = *index;
                self.focused = *focus;
            }
            DisplayAction::SetWorkspaceName(index, name) => {
                if let Some(slot) = self.names.get_mut(*index) {
                    *slot = Some(name.clone());
                }
            }
        }
        self.executed.push(act);
        None
    }

    fn subscribe(&mut self) {
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        if self.events.is_empty() {
            Box::pin(future::pending())
        } else {
            Box::pin(future::ready(()))
        }
    }

    fn flush(&self) {}
}

impl<H: Handle> MockDisplayServer<H> {
    /// Make sure at least `count` workspaces exist.
    pub fn with_workspaces(&mut self, count: usize) {
        while self.names.len() < count {
            self.names.push(None);
        }
    }

    pub fn add_window(&mut self, window: Window<H>) {
        self.with_workspaces(window.workspace + 1);
        self.windows.push(window);
    }

    /// Take a window away, returning its last state.
    pub fn remove_window(&mut self, handle: &WindowHandle<H>) -> Option<Window<H>> {
        let position = self.windows.iter().position(|w| &w.handle == handle)?;
        Some(self.windows.remove(position))
    }

    pub fn set_maximized(&mut self, handle: &WindowHandle<H>, maximized: bool) {
        if let Some(window) = self.windows.iter_mut().find(|w| &w.handle == handle) {
            window.maximized = maximized;
        }
    }

    /// Move a window without being asked to, as a user would.
    pub fn move_window(&mut self, handle: &WindowHandle<H>, index: WorkspaceIndex) {
        self.with_workspaces(index + 1);
        if let Some(window) = self.windows.iter_mut().find(|w| &w.handle == handle) {
            window.workspace = index;
        }
    }

    pub fn workspace_count(&self) -> usize {
        self.names.len()
    }

    /// Index of the workspace a window is on.
    pub fn workspace_of(&self, handle: &WindowHandle<H>) -> Option<WorkspaceIndex> {
        self.window(handle).map(|w| w.workspace)
    }

    /// Every executed request that created, removed or moved something.
    pub fn mutations(&self) -> Vec<&DisplayAction<H>> {
        self.executed
            .iter()
            .filter(|act| act.changes_workspaces())
            .collect()
    }

    // Windows on the removed workspace end up on the one before it, later workspaces shift down.
    fn remove_workspace(&mut self, index: WorkspaceIndex) {
        if index >= self.names.len() || self.names.len() == 1 {
            return;
        }
        self.names.remove(index);
        for window in &mut self.windows {
            if window.workspace >= index && window.workspace > 0 {
                window.workspace -= 1;
            }
        }
        if self.active_workspace >= index && self.active_workspace > 0 {
            self.active_workspace -= 1;
        }
    }
}
