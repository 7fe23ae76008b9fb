//! Human readable workspace names derived from who lives on them.
use crate::config::{Config, NamingMode};
use crate::directory::WorkspaceDirectory;
use crate::display_action::DisplayAction;
use crate::models::{Handle, Workspace, WorkspaceIndex};
use crate::tracker::WindowTracker;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    pub enabled: bool,
    pub mode: NamingMode,
    pub main_name: String,
}

/// The name of a workspace nobody claimed, counted from one.
#[must_use]
pub fn default_name(index: WorkspaceIndex) -> String {
    format!("Workspace {}", index + 1)
}

impl NamingPolicy {
    pub fn new(config: &impl Config) -> Self {
        Self {
            enabled: config.auto_rename_workspaces(),
            mode: config.naming_mode(),
            main_name: config.main_workspace_name(),
        }
    }

    /// The name a workspace should carry. `None` means leave the current name alone, which is
    /// the case for workspaces shared by several windows.
    pub fn name_for<H: Handle>(
        &self,
        workspace: &Workspace<H>,
        tracker: &WindowTracker<H>,
    ) -> Option<String> {
        if workspace.is_main() {
            return Some(self.main_name.clone());
        }
        if self.mode == NamingMode::Sticky {
            let assigned = workspace
                .tracked_windows()
                .find_map(|w| tracker.assigned_name(&w.handle));
            if let Some(name) = assigned {
                return Some(name.to_owned());
            }
        }
        match workspace.population() {
            0 => Some(default_name(workspace.index)),
            1 => {
                let occupant = workspace.sole_occupant()?;
                Some(
                    occupant
                        .application_class()
                        .unwrap_or_else(|| default_name(workspace.index)),
                )
            }
            _ => None,
        }
    }

    /// Rename requests for every workspace whose name differs from what it should be.
    ///
    /// Returns nothing when naming is disabled. Running it again without any membership change
    /// yields the same names, so no further requests.
    pub fn refresh<H: Handle>(
        &self,
        directory: &WorkspaceDirectory<H>,
        tracker: &WindowTracker<H>,
    ) -> Vec<DisplayAction<H>> {
        if !self.enabled {
            return vec![];
        }
        directory
            .iter()
            .filter_map(|ws| {
                let name = self.name_for(ws, tracker)?;
                (ws.name.as_deref() != Some(name.as_str()))
                    .then(|| DisplayAction::SetWorkspaceName(ws.index, name))
            })
            .collect()
    }
}
