use crate::models::{Handle, SizeChange, Window, WindowHandle};

/// Notifications delivered by the window manager.
#[derive(Debug, Clone)]
pub enum DisplayEvent<H: Handle> {
    /// A window was mapped ("opened").
    WindowCreate(Window<H>),
    /// A window was maximized or unmaximized.
    WindowResize(WindowHandle<H>, SizeChange),
    /// A window was destroyed. Carries the last known state of the window, the window manager
    /// can no longer be asked about it.
    WindowDestroy(Window<H>),
}
