use maxspace_core::models::{MonitorId, Window, WindowHandle, WorkspaceIndex};
use x11rb::{
    properties::WmClass,
    protocol::{randr, xproto},
};

use crate::{
    error::{Error, Result},
    xatom::ALL_DESKTOPS,
    X11rbWindowHandle,
};

use super::{Monitor, XWrap, MAX_PROPERTY_VALUE_LEN};

impl XWrap {
    // Public functions.

    /// Returns the default root.
    #[must_use]
    pub const fn get_default_root(&self) -> xproto::Window {
        self.root
    }

    /// Returns the clients managed by the window manager, `_NET_CLIENT_LIST`.
    pub fn get_client_list(&self) -> Result<Vec<xproto::Window>> {
        self.get_property(
            self.root,
            self.atoms.NetClientList,
            xproto::AtomEnum::WINDOW.into(),
        )
    }

    /// Returns `_NET_NUMBER_OF_DESKTOPS`.
    /// # Errors
    ///
    /// Errors if the window manager does not publish it.
    pub fn get_number_of_desktops(&self) -> Result<u32> {
        self.get_cardinal(self.root, self.atoms.NetNumberOfDesktops)?
            .ok_or(Error::MissingHint("_NET_NUMBER_OF_DESKTOPS"))
    }

    /// Returns the number of desktops once the window manager has caught up with our requests.
    pub fn expected_number_of_desktops(&self) -> Result<u32> {
        let reported = self.get_number_of_desktops()?;
        Ok(self.pending.borrow().desktops(reported))
    }

    /// Returns `_NET_CURRENT_DESKTOP`, the first desktop if the window manager does not say.
    pub fn get_current_desktop(&self) -> Result<u32> {
        Ok(self
            .get_cardinal(self.root, self.atoms.NetCurrentDesktop)?
            .unwrap_or_default())
    }

    /// Returns `_NET_DESKTOP_NAMES`. The list may be shorter than the number of desktops.
    pub fn get_desktop_names(&self) -> Result<Vec<String>> {
        let reply = xproto::get_property(
            &self.conn,
            false,
            self.root,
            self.atoms.NetDesktopNames,
            self.atoms.UTF8String,
            0,
            MAX_PROPERTY_VALUE_LEN,
        )?
        .reply()?;
        Ok(split_names(&reply.value))
    }

    /// Returns the `_NET_WM_DESKTOP` of a window.
    pub fn get_window_desktop(&self, window: xproto::Window) -> Result<Option<u32>> {
        self.get_cardinal(window, self.atoms.NetWMDesktop)
    }

    /// Returns the desktop of a window once the window manager has caught up with our requests.
    pub fn expected_window_desktop(&self, window: xproto::Window) -> Result<Option<u32>> {
        let reported = self.get_window_desktop(window)?;
        Ok(self.pending.borrow().client_desktop(window, reported))
    }

    /// Returns the atom states of a window.
    pub fn get_window_states_atoms(&self, window: xproto::Window) -> Result<Vec<xproto::Atom>> {
        self.get_property(window, self.atoms.NetWMState, xproto::AtomEnum::ATOM.into())
    }

    /// Returns the class part of a windows `WM_CLASS`.
    pub fn get_window_class(&self, window: xproto::Window) -> Result<Option<String>> {
        Ok(WmClass::get(&self.conn, window)?
            .reply()?
            .map(|class| String::from_utf8_lossy(class.class()).into_owned()))
    }

    /// Returns the center of a window in root coordinates.
    pub fn get_window_center(&self, window: xproto::Window) -> Result<(i32, i32)> {
        let geo = xproto::get_geometry(&self.conn, window)?.reply()?;
        let origin = xproto::translate_coordinates(&self.conn, window, self.root, 0, 0)?.reply()?;
        Ok((
            i32::from(origin.dst_x) + i32::from(geo.width) / 2,
            i32::from(origin.dst_y) + i32::from(geo.height) / 2,
        ))
    }

    /// Returns the active monitors, as RandR reports them.
    pub fn get_monitors(&self) -> Result<Vec<Monitor>> {
        let reply = randr::get_monitors(&self.conn, self.root, true)?.reply()?;
        Ok(reply
            .monitors
            .iter()
            .map(|m| Monitor {
                x: m.x.into(),
                y: m.y.into(),
                width: m.width.into(),
                height: m.height.into(),
            })
            .collect())
    }

    /// Returns the monitor a point lies on, the first monitor if it is off screen.
    #[must_use]
    pub fn monitor_at(&self, point: (i32, i32)) -> MonitorId {
        self.monitors
            .iter()
            .position(|m| m.contains(point))
            .unwrap_or_default()
    }

    /// Returns the current state of a client, on the desktop it was last sent to.
    pub fn get_window_snapshot(&self, window: xproto::Window) -> Result<Window<X11rbWindowHandle>> {
        let desktop = self.expected_window_desktop(window)?;
        let states = self.get_window_states_atoms(window)?;

        let workspace = desktop
            .filter(|&d| d != ALL_DESKTOPS)
            .map_or(0, |d| d as WorkspaceIndex);
        let mut snapshot = Window::new(WindowHandle(X11rbWindowHandle(window)), workspace);
        snapshot.on_all_workspaces =
            desktop == Some(ALL_DESKTOPS) || states.contains(&self.atoms.NetWMStateSticky);
        snapshot.maximized = states.contains(&self.atoms.NetWMStateMaximizedVert)
            && states.contains(&self.atoms.NetWMStateMaximizedHorz);
        snapshot.monitor = self.monitor_at(self.get_window_center(window)?);
        snapshot.res_class = self.get_window_class(window)?;
        Ok(snapshot)
    }

    // Internal functions.

    fn get_cardinal(&self, window: xproto::Window, atom: xproto::Atom) -> Result<Option<u32>> {
        let reply = xproto::get_property(
            &self.conn,
            false,
            window,
            atom,
            xproto::AtomEnum::CARDINAL,
            0,
            1,
        )?
        .reply()?;
        Ok(reply.value32().and_then(|mut values| values.next()))
    }

    fn get_property(
        &self,
        window: xproto::Window,
        property: xproto::Atom,
        r#type: xproto::Atom,
    ) -> Result<Vec<u32>> {
        let reply = xproto::get_property(
            &self.conn,
            false,
            window,
            property,
            r#type,
            0,
            MAX_PROPERTY_VALUE_LEN / 4,
        )?
        .reply()?;
        Ok(reply.value32().map(Iterator::collect).unwrap_or_default())
    }
}

/// Split a list of null terminated UTF-8 strings, as used by `_NET_DESKTOP_NAMES`.
pub(crate) fn split_names(value: &[u8]) -> Vec<String> {
    let value = value.strip_suffix(&[0]).unwrap_or(value);
    if value.is_empty() {
        return vec![];
    }
    value
        .split(|&b| b == 0)
        .map(|name| String::from_utf8_lossy(name).into_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn desktop_names_are_split_on_nulls() {
        assert_eq!(split_names(b"main\0firefox\0\0"), vec!["main", "firefox", ""]);
        assert_eq!(split_names(b"main\0web"), vec!["main", "web"]);
        assert!(split_names(b"").is_empty());
    }
}
