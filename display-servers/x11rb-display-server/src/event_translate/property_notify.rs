use std::collections::HashSet;

use maxspace_core::{
    DisplayEvent,
    models::{SizeChange, WindowHandle},
};
use x11rb::protocol::xproto;

use crate::xwrap::XWrap;
use crate::{X11rbWindowHandle, error::Result};

type Events = Vec<DisplayEvent<X11rbWindowHandle>>;

pub(crate) fn from_event(event: &xproto::PropertyNotifyEvent, xw: &mut XWrap) -> Result<Events> {
    xw.last_timestamp = event.time;
    if !xw.subscribed {
        return Ok(vec![]);
    }

    if event.window == xw.get_default_root() {
        if event.atom == xw.atoms.NetClientList {
            return from_client_list(xw);
        }
        if event.atom == xw.atoms.NetNumberOfDesktops {
            let count = xw.get_number_of_desktops()?;
            xw.pending.borrow_mut().confirm_desktops(count);
        }
        return Ok(vec![]);
    }

    if !xw.clients.contains_key(&event.window) || event.state == xproto::Property::DELETE {
        return Ok(vec![]);
    }
    tracing::trace!("PropertyNotify: {:?}", event);

    if event.atom == xw.atoms.NetWMState {
        return from_state_change(event.window, xw);
    }
    if event.atom == xw.atoms.NetWMDesktop {
        let desktop = xw.get_window_desktop(event.window)?;
        xw.pending
            .borrow_mut()
            .confirm_client_desktop(event.window, desktop);
        refresh_client(event.window, xw)?;
    }
    Ok(vec![])
}

/// Diff the client list against the known clients.
fn from_client_list(xw: &mut XWrap) -> Result<Events> {
    let current = xw.get_client_list()?;
    let present: HashSet<xproto::Window> = current.iter().copied().collect();

    let gone: Vec<xproto::Window> = xw
        .clients
        .keys()
        .filter(|window| !present.contains(*window))
        .copied()
        .collect();
    for window in &gone {
        xw.pending.borrow_mut().forget_client(*window);
    }
    let mut events: Events = gone
        .into_iter()
        .filter_map(|window| xw.clients.remove(&window))
        .map(DisplayEvent::WindowDestroy)
        .collect();

    for window in current {
        if xw.clients.contains_key(&window) {
            continue;
        }
        if let Some(snapshot) = xw.watch_client(window) {
            events.push(DisplayEvent::WindowCreate(snapshot));
        }
    }
    Ok(events)
}

/// Report a resize when a client enters or leaves the maximized state.
fn from_state_change(window: xproto::Window, xw: &mut XWrap) -> Result<Events> {
    let was_maximized = xw.clients.get(&window).is_some_and(|w| w.maximized);
    let maximized = refresh_client(window, xw)?;
    if was_maximized == maximized {
        return Ok(vec![]);
    }
    let change = if maximized {
        SizeChange::Maximize
    } else {
        SizeChange::Unmaximize
    };
    Ok(vec![DisplayEvent::WindowResize(
        WindowHandle(X11rbWindowHandle(window)),
        change,
    )])
}

/// Re-read a client into the cache. Returns whether it is maximized now.
fn refresh_client(window: xproto::Window, xw: &mut XWrap) -> Result<bool> {
    let snapshot = xw.get_window_snapshot(window)?;
    let maximized = snapshot.maximized;
    xw.clients.insert(window, snapshot);
    Ok(maximized)
}
