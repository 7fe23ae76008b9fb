use maxspace_core::config::{NamingMode, ReclaimPolicy};

use super::Config;

impl Config {
    /// Returns a warning for every setting that has no effect, or works against another one.
    #[must_use]
    pub fn check(&self) -> Vec<String> {
        let mut warnings = vec![];
        if !self.reuse_existing_workspace && !self.create_when_exhausted {
            warnings.push(
                "`reuse_existing_workspace` and `create_when_exhausted` are both off, \
                 maximized windows will never be moved."
                    .to_owned(),
            );
        }
        if self.reuse_main_workspace && !self.reuse_existing_workspace {
            warnings.push(
                "`reuse_main_workspace` has no effect without `reuse_existing_workspace`."
                    .to_owned(),
            );
        }
        match (self.reclaim, self.sweep_interval_ms) {
            (ReclaimPolicy::Sweep, None) if !self.auto_cleanup_on_startup => warnings.push(
                "`reclaim = \"sweep\"` without `sweep_interval_ms` or `auto_cleanup_on_startup`, \
                 empty workspaces are never removed."
                    .to_owned(),
            ),
            (ReclaimPolicy::Sweep, Some(0)) => {
                warnings.push("`sweep_interval_ms = 0` disables the periodic sweep.".to_owned());
            }
            (ReclaimPolicy::Eager | ReclaimPolicy::Never, Some(_)) => warnings.push(
                "`sweep_interval_ms` is only used with `reclaim = \"sweep\"`.".to_owned(),
            ),
            _ => {}
        }
        if self.naming != NamingMode::default() && !self.auto_rename_workspaces {
            warnings.push("`naming` has no effect without `auto_rename_workspaces`.".to_owned());
        }
        if self.main_workspace_name.is_empty() && self.auto_rename_workspaces {
            warnings.push("`main_workspace_name` is empty.".to_owned());
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_warnings() {
        assert!(Config::default().check().is_empty());
    }

    #[test]
    fn never_moving_is_reported() {
        let config = Config {
            create_when_exhausted: false,
            ..Config::default()
        };
        let warnings = config.check();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("never be moved"));
    }

    #[test]
    fn sweep_settings_must_agree() {
        let interval_without_sweep = Config {
            sweep_interval_ms: Some(1000),
            ..Config::default()
        };
        assert_eq!(interval_without_sweep.check().len(), 1);

        let sweep_without_trigger = Config {
            reclaim: ReclaimPolicy::Sweep,
            ..Config::default()
        };
        assert_eq!(sweep_without_trigger.check().len(), 1);

        let sweep_on_startup = Config {
            reclaim: ReclaimPolicy::Sweep,
            auto_cleanup_on_startup: true,
            ..Config::default()
        };
        assert!(sweep_on_startup.check().is_empty());
    }
}
