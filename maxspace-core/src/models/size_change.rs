use serde::{Deserialize, Serialize};

/// The kind of resize the window manager reported.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeChange {
    Maximize,
    Unmaximize,
}
