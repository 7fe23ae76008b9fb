use serde::{Deserialize, Serialize};

/// When temporary workspaces that became empty are removed.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReclaimPolicy {
    /// Right after the window leaves it (unmaximize or close).
    #[default]
    Eager,
    /// Only by the sweep pass, at startup and on `sweep_interval`.
    Sweep,
    /// Never, empty workspaces stay around for reuse.
    Never,
}

impl ReclaimPolicy {
    pub fn is_eager(self) -> bool {
        self == ReclaimPolicy::Eager
    }

    pub fn is_sweep(self) -> bool {
        self == ReclaimPolicy::Sweep
    }
}
