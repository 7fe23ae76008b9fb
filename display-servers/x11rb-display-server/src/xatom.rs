use x11rb::atom_manager;

atom_manager! {
    /// A collection of Atoms.
    pub AtomCollection:

    /// A handle to a response from the X11 server.
    AtomCollectionCookie {
        NetActiveWindow: b"_NET_ACTIVE_WINDOW" as &[u8],
        NetClientList: b"_NET_CLIENT_LIST",
        NetNumberOfDesktops: b"_NET_NUMBER_OF_DESKTOPS",
        NetCurrentDesktop: b"_NET_CURRENT_DESKTOP",
        NetDesktopNames: b"_NET_DESKTOP_NAMES",
        NetWMDesktop: b"_NET_WM_DESKTOP",

        NetWMState: b"_NET_WM_STATE",
        NetWMStateSticky: b"_NET_WM_STATE_STICKY",
        NetWMStateMaximizedVert: b"_NET_WM_STATE_MAXIMIZED_VERT",
        NetWMStateMaximizedHorz: b"_NET_WM_STATE_MAXIMIZED_HORZ",

        UTF8String: b"UTF8_STRING",
    }
}

/// `_NET_WM_DESKTOP` value of windows shown on all desktops.
pub const ALL_DESKTOPS: u32 = 0xFFFF_FFFF;

/// Source indication for requests coming from pagers, as opposed to applications.
pub const SOURCE_PAGER: u32 = 2;
