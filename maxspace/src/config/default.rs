use maxspace_core::config::{
    DEFAULT_MAIN_WORKSPACE_NAME, DEFAULT_STARTUP_CLEANUP_DELAY, DEFAULT_SWITCH_DELAY, NamingMode,
    ReclaimPolicy,
};

use super::Config;

impl Default for Config {
    #[allow(clippy::cast_possible_truncation)]
    fn default() -> Self {
        Self {
            reuse_existing_workspace: false,
            reuse_main_workspace: false,
            create_when_exhausted: true,
            reclaim: ReclaimPolicy::default(),
            auto_cleanup_on_startup: false,
            startup_cleanup_delay_ms: DEFAULT_STARTUP_CLEANUP_DELAY.as_millis() as u64,
            sweep_interval_ms: None,
            auto_rename_workspaces: false,
            naming: NamingMode::default(),
            main_workspace_name: DEFAULT_MAIN_WORKSPACE_NAME.to_owned(),
            switch_delay_ms: DEFAULT_SWITCH_DELAY.as_millis() as u64,
            verbose_logging: false,
        }
    }
}
