use maxspace_core::models::Timestamp;
use x11rb::{
    connection::Connection,
    protocol::xproto,
    wrapper::ConnectionExt,
};

use crate::{
    error::Result,
    xatom::SOURCE_PAGER,
};

use super::{pending::desktop_after_removal, XWrap};

impl XWrap {
    // Requests to the window manager. EWMH pagers ask, they never set client state themselves.

    /// Ask the window manager for a different number of desktops.
    pub fn request_number_of_desktops(&self, count: u32) -> Result<()> {
        self.pending.borrow_mut().request_desktops(count);
        self.send_client_message(self.root, self.atoms.NetNumberOfDesktops, [count, 0, 0, 0, 0])
    }

    /// Ask the window manager to move a client to a desktop.
    pub fn move_window_to_desktop(&self, window: xproto::Window, desktop: u32) -> Result<()> {
        self.pending
            .borrow_mut()
            .request_client_desktop(window, desktop);
        self.send_client_message(window, self.atoms.NetWMDesktop, [desktop, SOURCE_PAGER, 0, 0, 0])
    }

    /// Ask the window manager to switch desktops.
    pub fn activate_desktop(&self, desktop: u32, timestamp: Timestamp) -> Result<()> {
        self.send_client_message(
            self.root,
            self.atoms.NetCurrentDesktop,
            [desktop, timestamp, 0, 0, 0],
        )
    }

    /// Ask the window manager to focus and raise a client.
    pub fn activate_window(&self, window: xproto::Window, timestamp: Timestamp) -> Result<()> {
        self.send_client_message(
            window,
            self.atoms.NetActiveWindow,
            [SOURCE_PAGER, timestamp, 0, 0, 0],
        )
    }

    /// Replace `_NET_DESKTOP_NAMES`. Pagers are allowed to write this property directly.
    pub fn set_desktop_names(&self, names: &[String]) -> Result<()> {
        let data = join_names(names);
        self.conn.change_property8(
            xproto::PropMode::REPLACE,
            self.root,
            self.atoms.NetDesktopNames,
            self.atoms.UTF8String,
            &data,
        )?;
        Ok(())
    }

    /// Name a single desktop, padding the list with empty names if it is too short.
    pub fn set_desktop_name(&self, desktop: usize, name: &str) -> Result<()> {
        let mut names = self.get_desktop_names()?;
        if names.len() <= desktop {
            names.resize(desktop + 1, String::new());
        }
        name.clone_into(&mut names[desktop]);
        self.set_desktop_names(&names)
    }

    /// Remove a desktop from anywhere in the list.
    ///
    /// EWMH only knows how to shrink the list from the end, so clients and names after
    /// `desktop` are shifted down by one first. Clients are shifted from the desktop they were
    /// last sent to, which the window manager may not have reported yet.
    pub fn remove_desktop(&self, desktop: u32) -> Result<()> {
        let count = self.expected_number_of_desktops()?;
        if desktop >= count {
            tracing::debug!(desktop, count, "desktop is already gone");
            return Ok(());
        }

        for window in self.get_client_list()? {
            let moved = self
                .expected_window_desktop(window)?
                .and_then(|d| desktop_after_removal(d, desktop));
            if let Some(d) = moved {
                self.move_window_to_desktop(window, d)?;
            }
        }

        let mut names = self.get_desktop_names()?;
        if (desktop as usize) < names.len() {
            names.remove(desktop as usize);
            self.set_desktop_names(&names)?;
        }

        let current = self.get_current_desktop()?;
        if current >= desktop && current > 0 {
            self.activate_desktop(current - 1, self.last_timestamp)?;
        }

        self.request_number_of_desktops(count - 1)
    }

    /// Ask for one more desktop.
    pub fn append_desktop(&self) -> Result<()> {
        let count = self.expected_number_of_desktops()?;
        self.request_number_of_desktops(count + 1)
    }

    // Internal functions.

    fn send_client_message(
        &self,
        window: xproto::Window,
        r#type: xproto::Atom,
        data: [u32; 5],
    ) -> Result<()> {
        let event = xproto::ClientMessageEvent::new(32, window, r#type, data);
        xproto::send_event(
            &self.conn,
            false,
            self.root,
            xproto::EventMask::SUBSTRUCTURE_NOTIFY | xproto::EventMask::SUBSTRUCTURE_REDIRECT,
            event,
        )?;
        self.conn.flush()?;
        Ok(())
    }
}

/// Encode names as a list of null terminated UTF-8 strings.
pub(crate) fn join_names(names: &[String]) -> Vec<u8> {
    names
        .iter()
        .flat_map(|name| name.bytes().filter(|&b| b != 0).chain(std::iter::once(0)))
        .collect()
}
