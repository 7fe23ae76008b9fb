//! x11rb backend for maxspace.
//!
//! Talks to an EWMH compliant window manager the way a pager does: it watches
//! `_NET_CLIENT_LIST` and the clients' `_NET_WM_STATE`, and asks the window manager to move
//! windows and switch desktops through client messages.

use std::pin::Pin;

use futures::Future;
use maxspace_core::{
    Config, DisplayAction, DisplayEvent, DisplayServer, Window, Workspace,
    models::{Handle, Timestamp, WindowHandle, WorkspaceIndex},
};
use serde::{Deserialize, Serialize};
use x11rb::protocol::xproto;

use crate::xwrap::XWrap;
use error::Result;

mod error;
mod event_translate;
mod xatom;
mod xwrap;

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct X11rbWindowHandle(pub xproto::Window);
impl Handle for X11rbWindowHandle {}

pub struct X11rbDisplayServer {
    xw: XWrap,
}

impl DisplayServer<X11rbWindowHandle> for X11rbDisplayServer {
    /// # Panics
    ///
    /// Panics if there is no X server, or no EWMH window manager running on it.
    fn new(_config: &impl Config) -> Self {
        let xw = XWrap::new().expect("XWrap initialisation failed.");
        Self { xw }
    }

    fn get_next_events(&mut self) -> Vec<DisplayEvent<X11rbWindowHandle>> {
        let mut events = vec![];
        loop {
            match self.xw.poll_next_event() {
                Ok(Some(ev)) => events.append(&mut event_translate::translate(ev, &mut self.xw)),
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = ?e, "An error occurred when polling for events.");
                    break;
                }
            }
        }
        events
    }

    fn window(&self, handle: &WindowHandle<X11rbWindowHandle>) -> Option<Window<X11rbWindowHandle>> {
        match self.xw.get_window_snapshot(handle.0.0) {
            Ok(window) => Some(window),
            Err(e) => {
                tracing::debug!(window = ?handle, error = ?e, "window is gone");
                None
            }
        }
    }

    fn workspaces(&self) -> Vec<Workspace<X11rbWindowHandle>> {
        match self.read_workspaces() {
            Ok(workspaces) => workspaces,
            Err(e) => {
                tracing::error!(error = ?e, "Error when reading the desktops.");
                vec![]
            }
        }
    }

    fn current_time(&self) -> Timestamp {
        self.xw.last_timestamp
    }

    fn execute_action(
        &mut self,
        act: DisplayAction<X11rbWindowHandle>,
    ) -> Option<DisplayEvent<X11rbWindowHandle>> {
        tracing::trace!("DisplayAction: {:?}", act);
        let xw = &mut self.xw;
        let result: Result<()> = match act.clone() {
            DisplayAction::AppendWorkspace => xw.append_desktop(),
            DisplayAction::RemoveWorkspace(index) => from_remove_workspace(xw, index),
            DisplayAction::MoveWindowToWorkspace(h, index) => from_move_window(xw, h, index),
            DisplayAction::ActivateWorkspace {
                index,
                focus,
                timestamp,
            } => from_activate_workspace(xw, index, focus, timestamp),
            DisplayAction::SetWorkspaceName(index, name) => xw.set_desktop_name(index, &name),
        };
        if let Err(e) = result {
            tracing::error!(action = ?act, error = ?e, "Error when processing a display action.");
        }
        None
    }

    fn subscribe(&mut self) {
        if self.xw.subscribed {
            return;
        }
        if let Err(e) = self.xw.subscribe() {
            tracing::error!(error = ?e, "Error when subscribing to window changes.");
        }
    }

    fn unsubscribe(&mut self) {
        if !self.xw.subscribed {
            return;
        }
        if let Err(e) = self.xw.unsubscribe() {
            tracing::error!(error = ?e, "Error when unsubscribing from window changes.");
        }
    }

    fn wait_readable(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        if self.xw.has_pending_event() {
            return Box::pin(futures::future::ready(()));
        }
        let task_notify = self.xw.task_notify.clone();
        Box::pin(async move {
            task_notify.notified().await;
        })
    }

    fn flush(&self) {
        if let Err(e) = self.xw.flush() {
            tracing::error!(error = ?e, "Error when flushing the connection.");
        }
    }
}

impl X11rbDisplayServer {
    /// Read every desktop with its clients, as they will be once pending requests went through.
    fn read_workspaces(&self) -> Result<Vec<Workspace<X11rbWindowHandle>>> {
        let count = self.xw.expected_number_of_desktops()? as usize;
        let names = self.xw.get_desktop_names()?;
        let clients = self
            .xw
            .get_client_list()?
            .into_iter()
            .filter_map(|client| match self.xw.get_window_snapshot(client) {
                Ok(window) => Some(window),
                Err(e) => {
                    tracing::debug!(window = client, error = ?e, "client vanished while reading");
                    None
                }
            });
        Ok(lay_out_workspaces(count, names, clients))
    }
}

/// Build `count` workspaces and sort the clients onto them. Sticky clients are listed on all of
/// them, clients on a desktop past the end are dropped.
fn lay_out_workspaces(
    count: usize,
    names: Vec<String>,
    clients: impl IntoIterator<Item = Window<X11rbWindowHandle>>,
) -> Vec<Workspace<X11rbWindowHandle>> {
    let mut names = names.into_iter();
    let mut workspaces: Vec<Workspace<X11rbWindowHandle>> = (0..count)
        .map(|index| {
            let mut workspace = Workspace::new(index);
            workspace.name = names.next().filter(|name| !name.is_empty());
            workspace
        })
        .collect();

    for window in clients {
        if window.on_all_workspaces {
            for workspace in &mut workspaces {
                workspace.windows.push(window.clone());
            }
        } else if let Some(workspace) = workspaces.get_mut(window.workspace) {
            workspace.windows.push(window);
        }
    }
    workspaces
}

// Display actions.
fn from_remove_workspace(xw: &mut XWrap, index: WorkspaceIndex) -> Result<()> {
    xw.remove_desktop(desktop(index))
}

fn from_move_window(
    xw: &mut XWrap,
    handle: WindowHandle<X11rbWindowHandle>,
    index: WorkspaceIndex,
) -> Result<()> {
    xw.move_window_to_desktop(handle.0.0, desktop(index))
}

fn from_activate_workspace(
    xw: &mut XWrap,
    index: WorkspaceIndex,
    focus: Option<WindowHandle<X11rbWindowHandle>>,
    timestamp: Timestamp,
) -> Result<()> {
    xw.activate_desktop(desktop(index), timestamp)?;
    if let Some(WindowHandle(X11rbWindowHandle(window))) = focus {
        xw.activate_window(window, timestamp)?;
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation)]
const fn desktop(index: WorkspaceIndex) -> u32 {
    index as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xwrap::PendingRequests;

    fn client(id: xproto::Window, desktop: WorkspaceIndex) -> Window<X11rbWindowHandle> {
        Window::new(WindowHandle(X11rbWindowHandle(id)), desktop)
    }

    #[test]
    fn a_requested_desktop_is_listed_before_the_window_manager_adds_it() {
        let mut pending = PendingRequests::default();
        pending.request_desktops(3);

        let names = vec!["main".to_owned()];
        let workspaces = lay_out_workspaces(pending.desktops(2) as usize, names, vec![]);
        assert_eq!(workspaces.len(), 3);
        assert_eq!(workspaces[0].name.as_deref(), Some("main"));
        assert!(workspaces[2].windows.is_empty());
    }

    #[test]
    fn sticky_clients_are_on_every_workspace() {
        let mut sticky = client(2, 0);
        sticky.on_all_workspaces = true;
        let workspaces = lay_out_workspaces(3, vec![], vec![client(1, 1), sticky, client(3, 5)]);

        let populations: Vec<usize> = workspaces.iter().map(|w| w.windows.len()).collect();
        assert_eq!(populations, vec![1, 2, 1]);
        assert!(workspaces.iter().all(|w| w.name.is_none()));
    }
}
