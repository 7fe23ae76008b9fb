//! Objects (such as windows and workspaces) the lifecycle engine reasons about.
mod lifecycle;
mod manager;
mod size_change;
mod window;
mod workspace;

pub use lifecycle::Lifecycle;
pub use manager::Manager;
pub(crate) use window::MockHandle;
pub use window::{Handle, Window, WindowHandle};
pub use size_change::SizeChange;
pub use workspace::Workspace;

/// Position of a workspace in the window manager's ordered list.
pub type WorkspaceIndex = usize;
pub type MonitorId = usize;
/// Server time used when activating windows and workspaces. `0` means "now".
pub type Timestamp = u32;

/// The workspace at index 0. It is never created or removed by maxspace.
pub const MAIN_WORKSPACE: WorkspaceIndex = 0;
