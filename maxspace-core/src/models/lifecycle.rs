use serde::{Deserialize, Serialize};

/// Where a window is in its opened -> maximized -> unmaximized -> closed journey.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No notification has been seen for this window yet.
    #[default]
    Untracked,
    Opened,
    Maximized,
    Unmaximized,
    /// Terminal for a window identity.
    Closed,
}
