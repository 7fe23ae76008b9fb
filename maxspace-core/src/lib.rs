//! Core of maxspace: gives every maximized window a workspace of its own.
// We deny clippy pedantic lints, primarily to keep code as correct as possible.
#![warn(clippy::pedantic)]
// Each of these lints are globally allowed because they otherwise make a lot
// of noise.
#![allow(
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::default_trait_access
)]
pub mod allocator;
pub mod config;
mod deferred_action;
pub mod directory;
mod display_action;
mod display_event;
pub mod display_servers;
mod event_loop;
mod handlers;
pub mod models;
pub mod naming;
pub mod scheduler;
pub mod state;
pub mod tracker;

pub use allocator::{Allocator, Target};
pub use config::Config;
pub use deferred_action::Deferred;
pub use directory::WorkspaceDirectory;
pub use display_action::DisplayAction;
pub use display_event::DisplayEvent;
pub use display_servers::DisplayServer;
pub use models::Manager;
pub use models::Window;
pub use models::Workspace;
pub use naming::NamingPolicy;
pub use scheduler::Scheduler;
pub use state::State;
pub use tracker::WindowTracker;
