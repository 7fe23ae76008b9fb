use maxspace_core::DisplayEvent;
use x11rb::protocol::Event;

use crate::X11rbWindowHandle;
use crate::xwrap::XWrap;

mod property_notify;

/// Translate events from x11rb to maxspace's `DisplayEvent`s.
///
/// Only property changes matter: the client list on the root window tells which windows came
/// and went, `_NET_WM_STATE` and `_NET_WM_DESKTOP` on the clients tell what happened to them.
pub(crate) fn translate(event: Event, xw: &mut XWrap) -> Vec<DisplayEvent<X11rbWindowHandle>> {
    let res = match event {
        Event::PropertyNotify(ref e) => property_notify::from_event(e, xw),
        _ => return vec![],
    };
    match res {
        Ok(display_events) => display_events,
        Err(e) => {
            tracing::error!(
                "An error occured when processing the event {:?}: {}",
                event,
                e
            );
            vec![]
        }
    }
}
