mod naming_mode;
mod reclaim_policy;

pub use naming_mode::NamingMode;
pub use reclaim_policy::ReclaimPolicy;
use std::time::Duration;

/// The delay between a lifecycle transition and the workspace switch it causes.
pub const DEFAULT_SWITCH_DELAY: Duration = Duration::from_millis(400);
/// The delay between enabling and the optional cleanup of empty workspaces.
pub const DEFAULT_STARTUP_CLEANUP_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_MAIN_WORKSPACE_NAME: &str = "main";

pub trait Config {
    /// Look for an empty workspace before creating a new one.
    fn reuse_existing_workspace(&self) -> bool;

    /// Allow the main workspace to be picked as the empty workspace to reuse.
    fn reuse_main_workspace(&self) -> bool;

    /// Append a workspace when no empty one could be reused. When false and nothing can be
    /// reused, maximized windows stay where they are.
    fn create_when_exhausted(&self) -> bool;

    fn reclaim_policy(&self) -> ReclaimPolicy;

    /// Remove all empty workspaces (except the main one) shortly after enabling.
    fn auto_cleanup_on_startup(&self) -> bool;

    fn startup_cleanup_delay(&self) -> Duration {
        DEFAULT_STARTUP_CLEANUP_DELAY
    }

    /// Repeat the empty workspace sweep at this interval. Only used with [`ReclaimPolicy::Sweep`].
    fn sweep_interval(&self) -> Option<Duration>;

    fn auto_rename_workspaces(&self) -> bool;

    fn naming_mode(&self) -> NamingMode;

    fn main_workspace_name(&self) -> String {
        DEFAULT_MAIN_WORKSPACE_NAME.to_owned()
    }

    fn switch_delay(&self) -> Duration {
        DEFAULT_SWITCH_DELAY
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[allow(clippy::struct_excessive_bools)]
    #[derive(Debug, Clone)]
    pub struct TestConfig {
        pub reuse_existing_workspace: bool,
        pub reuse_main_workspace: bool,
        pub create_when_exhausted: bool,
        pub reclaim_policy: ReclaimPolicy,
        pub auto_cleanup_on_startup: bool,
        pub sweep_interval: Option<Duration>,
        pub auto_rename_workspaces: bool,
        pub naming_mode: NamingMode,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                reuse_existing_workspace: false,
                reuse_main_workspace: false,
                create_when_exhausted: true,
                reclaim_policy: ReclaimPolicy::Eager,
                auto_cleanup_on_startup: false,
                sweep_interval: None,
                auto_rename_workspaces: false,
                naming_mode: NamingMode::Occupant,
            }
        }
    }

    impl Config for TestConfig {
        fn reuse_existing_workspace(&self) -> bool {
            self.reuse_existing_workspace
        }
        fn reuse_main_workspace(&self) -> bool {
            self.reuse_main_workspace
        }
        fn create_when_exhausted(&self) -> bool {
            self.create_when_exhausted
        }
        fn reclaim_policy(&self) -> ReclaimPolicy {
            self.reclaim_policy
        }
        fn auto_cleanup_on_startup(&self) -> bool {
            self.auto_cleanup_on_startup
        }
        fn sweep_interval(&self) -> Option<Duration> {
            self.sweep_interval
        }
        fn auto_rename_workspaces(&self) -> bool {
            self.auto_rename_workspaces
        }
        fn naming_mode(&self) -> NamingMode {
            self.naming_mode
        }
    }

    #[test]
    fn default_delays_match_the_window_manager_animations() {
        let config = TestConfig::default();
        assert_eq!(config.switch_delay(), Duration::from_millis(400));
        assert_eq!(config.startup_cleanup_delay(), Duration::from_millis(2000));
        assert_eq!(config.main_workspace_name(), "main");
    }
}
