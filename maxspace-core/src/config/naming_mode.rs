use serde::{Deserialize, Serialize};

/// How workspace names are derived when renaming is enabled.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NamingMode {
    /// Recompute from the current sole occupant of each workspace.
    #[default]
    Occupant,
    /// Keep the name given to a workspace when a window was moved onto it, even if others join.
    Sticky,
}
