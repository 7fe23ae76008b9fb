//! Window Information
use std::fmt::Debug;
use std::hash::Hash;

use super::{MonitorId, WorkspaceIndex};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A trait which backend specific window handles need to implement
pub trait Handle:
    Serialize + DeserializeOwned + Debug + Clone + Copy + PartialEq + Eq + Hash + Default + Send + 'static
{
}

/// A Backend-agnostic handle to a window used to identify it
///
/// # Serde
///
/// Using generics here with serde derive macros causes some wierd behaviour with the compiler, so
/// as suggested by [this `serde` issue][serde-issue], just adding `#[serde(bound = "")]`
/// everywhere the generic is declared fixes the bug.
///
/// [serde-issue]: https://github.com/serde-rs/serde/issues/1296
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle<H>(#[serde(bound = "")] pub H)
where
    H: Handle;

/// Handle for testing purposes
pub type MockHandle = i32;
impl Handle for MockHandle {}

/// A snapshot of a window as the window manager reported it at the time of the query.
///
/// The window itself is owned by the window manager, maxspace never keeps one of these around
/// longer than a single event or deferred action.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Window<H: Handle> {
    #[serde(bound = "")]
    pub handle: WindowHandle<H>,
    pub workspace: WorkspaceIndex,
    pub monitor: MonitorId,
    /// Sticky windows are shown on every workspace and never count as occupants.
    pub on_all_workspaces: bool,
    pub maximized: bool,
    // The class part of `WM_CLASS` in X11.
    pub res_class: Option<String>,
}

impl<H: Handle> Window<H> {
    #[must_use]
    pub fn new(handle: WindowHandle<H>, workspace: WorkspaceIndex) -> Self {
        Self {
            handle,
            workspace,
            monitor: 0,
            on_all_workspaces: false,
            maximized: false,
            res_class: None,
        }
    }

    /// Returns true if the window counts toward the population of its workspace.
    #[must_use]
    pub fn is_tracked(&self) -> bool {
        !self.on_all_workspaces
    }

    #[must_use]
    pub fn shares_monitor(&self, other: &Self) -> bool {
        self.monitor == other.monitor
    }

    /// The case-normalized application class, if the window has one.
    #[must_use]
    pub fn application_class(&self) -> Option<String> {
        self.res_class
            .as_deref()
            .filter(|class| !class.is_empty())
            .map(str::to_lowercase)
    }
}
