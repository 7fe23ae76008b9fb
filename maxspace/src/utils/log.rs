use anyhow::Result;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, registry::LookupSpan, reload};

#[cfg(feature = "journald-log")]
mod journald;

#[cfg(feature = "sys-log")]
mod sys;

/// Changes the log level of a running process.
pub type LevelHandle = reload::Handle<EnvFilter, Registry>;

/// Install the global subscriber. `RUST_LOG` takes precedence over `verbose`.
///
/// # Errors
///
/// Errors if a global subscriber was installed already.
pub fn setup_logging(verbose: bool) -> Result<LevelHandle> {
    let (filter, handle) = reload::Layer::new(level_filter(verbose));
    let subscriber = get_subscribers(tracing_subscriber::registry().with(filter));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(handle)
}

/// Apply a new `verbose_logging` setting. Does nothing if `RUST_LOG` decides the level.
pub fn set_verbose(handle: &LevelHandle, verbose: bool) {
    if std::env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
        return;
    }
    if let Err(err) = handle.reload(level_filter(verbose)) {
        tracing::error!("Unable to change the log level: {err}");
    }
}

fn level_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)))
}

// Verbose output covers our own crates, dependencies stay at info.
const fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "info,maxspace=debug,maxspace_core=debug,x11rb_display_server=debug"
    } else {
        "info"
    }
}

#[allow(clippy::let_and_return)]
fn get_subscribers<S>(subscriber: S) -> impl Subscriber + for<'span> LookupSpan<'span> + Send + Sync
where
    S: Subscriber + for<'span> LookupSpan<'span> + Send + Sync,
{
    let subscriber = subscriber.with(tracing_subscriber::fmt::layer());

    #[cfg(feature = "journald-log")]
    let subscriber = journald::add_layer(subscriber);

    #[cfg(feature = "sys-log")]
    let subscriber = sys::add_layer(subscriber);

    subscriber
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::filter::Directive;

    #[test]
    fn verbose_logging_stays_out_of_dependencies() {
        let directives: Vec<&str> = default_directives(true).split(',').collect();
        for directive in &directives {
            assert!(directive.parse::<Directive>().is_ok(), "{directive}");
        }
        assert_eq!(directives[0], "info");
        assert!(directives.contains(&"maxspace_core=debug"));
        assert!(directives.contains(&"x11rb_display_server=debug"));
        assert!(directives.iter().skip(1).all(|d| d.ends_with("=debug")));
        assert_eq!(default_directives(false), "info");
    }
}
