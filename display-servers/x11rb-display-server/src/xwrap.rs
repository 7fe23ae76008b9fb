use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    os::fd::AsRawFd,
    sync::Arc,
    time::Duration,
};

use maxspace_core::models::{Timestamp, Window};
use tokio::sync::{oneshot, Notify};
use x11rb::{
    connection::Connection,
    protocol::{
        xproto::{self, ChangeWindowAttributesAux},
        Event,
    },
    rust_connection::RustConnection,
    wrapper::ConnectionExt,
};

use crate::{error::Result, xatom::AtomCollection, X11rbWindowHandle};

mod getters;
mod pending;
mod setters;

pub(crate) use pending::PendingRequests;

const MAX_PROPERTY_VALUE_LEN: u32 = 4096;

/// The area of the root window covered by one monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Monitor {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Monitor {
    pub const fn contains(&self, (x, y): (i32, i32)) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Contains Xserver information and origins.
pub(crate) struct XWrap {
    conn: RustConnection,
    root: xproto::Window,
    pub atoms: AtomCollection,
    pub monitors: Vec<Monitor>,

    /// Last known state of every client, so a destroyed window can still be described.
    pub clients: HashMap<xproto::Window, Window<X11rbWindowHandle>>,
    pub subscribed: bool,
    pub last_timestamp: Timestamp,
    // Desktop counts and client desktops asked for but not yet confirmed by the window manager.
    pub pending: RefCell<PendingRequests>,
    // Events read while checking whether the connection is readable.
    backlog: RefCell<VecDeque<Event>>,

    _task_guard: oneshot::Receiver<()>,
    pub task_notify: Arc<Notify>,
}

impl XWrap {
    pub fn new() -> Result<Self> {
        const SERVER: mio::Token = mio::Token(0);
        let (conn, display) = x11rb::connect(None)?;

        let fd = conn.stream().as_raw_fd();

        let (guard, _task_guard) = oneshot::channel::<()>();
        let notify = Arc::new(Notify::new());
        let task_notify = notify.clone();

        let mut poll = mio::Poll::new()?;
        let mut events = mio::Events::with_capacity(1);
        poll.registry().register(
            &mut mio::unix::SourceFd(&fd),
            SERVER,
            mio::Interest::READABLE,
        )?;
        let timeout = Duration::from_millis(100);
        tokio::task::spawn_blocking(move || loop {
            if guard.is_closed() {
                tracing::info!("x11rb socket closed");
                return;
            }

            if let Err(err) = poll.poll(&mut events, Some(timeout)) {
                tracing::warn!("x11rb socket poll failed with {:?}", err);
                continue;
            }

            events
                .iter()
                .filter(|event| SERVER == event.token())
                .for_each(|_| notify.notify_one());
        });

        let atoms = AtomCollection::new(&conn)?.reply()?;
        let root = conn.setup().roots[display].root;

        let mut xw = Self {
            conn,
            root,
            atoms,
            monitors: vec![],
            clients: HashMap::new(),
            subscribed: false,
            last_timestamp: x11rb::CURRENT_TIME,
            pending: RefCell::default(),
            backlog: RefCell::new(VecDeque::new()),
            _task_guard,
            task_notify,
        };
        // Fails early if no EWMH window manager is running.
        let desktops = xw.get_number_of_desktops()?;
        xw.monitors = xw.get_monitors()?;
        tracing::debug!(desktops, monitors = ?xw.monitors, "connected to the X server");
        Ok(xw)
    }

    /// Start listening to client list and window state changes.
    pub fn subscribe(&mut self) -> Result<()> {
        self.set_event_mask(self.root, xproto::EventMask::PROPERTY_CHANGE)?;
        self.monitors = self.get_monitors()?;
        self.pending.borrow_mut().clear();
        self.clients.clear();
        for window in self.get_client_list()? {
            self.watch_client(window);
        }
        self.subscribed = true;
        self.sync()
    }

    /// Stop listening. Clients that are already gone are skipped.
    pub fn unsubscribe(&mut self) -> Result<()> {
        self.set_event_mask(self.root, xproto::EventMask::NO_EVENT)?;
        for window in std::mem::take(&mut self.clients).into_keys() {
            if let Err(e) = self.set_event_mask(window, xproto::EventMask::NO_EVENT) {
                tracing::debug!(window, error = ?e, "could not stop watching client");
            }
        }
        self.subscribed = false;
        self.sync()
    }

    /// Follow the state of a new client. Returns its current state, `None` if it vanished already.
    pub fn watch_client(&mut self, window: xproto::Window) -> Option<Window<X11rbWindowHandle>> {
        let watched = self
            .set_event_mask(window, xproto::EventMask::PROPERTY_CHANGE)
            .and_then(|()| self.get_window_snapshot(window));
        match watched {
            Ok(snapshot) => {
                self.clients.insert(window, snapshot.clone());
                Some(snapshot)
            }
            Err(e) => {
                tracing::debug!(window, error = ?e, "client vanished before it could be watched");
                None
            }
        }
    }

    fn set_event_mask(&self, window: xproto::Window, mask: xproto::EventMask) -> Result<()> {
        xproto::change_window_attributes(
            &self.conn,
            window,
            &ChangeWindowAttributesAux::new().event_mask(mask),
        )?
        .check()?;
        Ok(())
    }

    /// Returns true if an event is waiting, reading it off the connection if needed.
    pub fn has_pending_event(&self) -> bool {
        if !self.backlog.borrow().is_empty() {
            return true;
        }
        match self.conn.poll_for_event() {
            Ok(Some(event)) => {
                self.backlog.borrow_mut().push_back(event);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::error!(error = ?e, "An error occurred when polling for events.");
                false
            }
        }
    }

    pub fn poll_next_event(&self) -> Result<Option<Event>> {
        if let Some(event) = self.backlog.borrow_mut().pop_front() {
            return Ok(Some(event));
        }
        Ok(self.conn.poll_for_event()?)
    }

    /// Flush and sync the xserver.
    pub fn sync(&self) -> Result<()> {
        self.conn.sync()?;
        Ok(())
    }

    /// Flush the xserver.
    pub fn flush(&self) -> Result<()> {
        self.conn.flush()?;
        Ok(())
    }
}
