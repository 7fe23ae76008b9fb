use std::collections::HashMap;

use x11rb::protocol::xproto;

use crate::xatom::ALL_DESKTOPS;

/// Requests sent to the window manager that it has not confirmed yet.
///
/// Client messages are applied whenever the window manager gets to them, so requests sent in a
/// row are computed from what was asked for instead of from properties that may still be stale.
#[derive(Debug, Default)]
pub(crate) struct PendingRequests {
    desktops: Option<u32>,
    client_desktops: HashMap<xproto::Window, u32>,
}

impl PendingRequests {
    /// The number of desktops once every request went through.
    pub fn desktops(&self, reported: u32) -> u32 {
        self.desktops.unwrap_or(reported)
    }

    pub fn request_desktops(&mut self, count: u32) {
        self.desktops = Some(count);
    }

    /// Drop the request once `_NET_NUMBER_OF_DESKTOPS` reports it.
    pub fn confirm_desktops(&mut self, reported: u32) {
        if self.desktops == Some(reported) {
            self.desktops = None;
        }
    }

    /// The desktop of a client once every request went through.
    pub fn client_desktop(&self, window: xproto::Window, reported: Option<u32>) -> Option<u32> {
        self.client_desktops.get(&window).copied().or(reported)
    }

    pub fn request_client_desktop(&mut self, window: xproto::Window, desktop: u32) {
        self.client_desktops.insert(window, desktop);
    }

    /// Drop the request once the client's `_NET_WM_DESKTOP` reports it.
    pub fn confirm_client_desktop(&mut self, window: xproto::Window, reported: Option<u32>) {
        if reported.is_some() && self.client_desktops.get(&window).copied() == reported {
            self.client_desktops.remove(&window);
        }
    }

    pub fn forget_client(&mut self, window: xproto::Window) {
        self.client_desktops.remove(&window);
    }

    pub fn clear(&mut self) {
        self.desktops = None;
        self.client_desktops.clear();
    }
}

/// The desktop a client has to move to when `removed` goes away, `None` if it can stay.
///
/// Clients on the removed desktop end up on the one before it, the first desktop never moves.
pub(crate) const fn desktop_after_removal(desktop: u32, removed: u32) -> Option<u32> {
    if desktop == ALL_DESKTOPS || desktop == 0 || desktop < removed {
        None
    } else {
        Some(desktop - 1)
    }
}
