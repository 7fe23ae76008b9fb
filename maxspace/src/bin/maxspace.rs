use anyhow::Result;
use clap::{arg, command, value_parser};
use maxspace::utils::log::{self, LevelHandle};
use maxspace_core::Manager;
use std::path::{Path, PathBuf};
use tokio::signal::unix::{SignalKind, signal};
use tokio::sync::mpsc;
use x11rb_display_server::{X11rbDisplayServer, X11rbWindowHandle};

fn main() -> Result<()> {
    let matches = command!()
        .help_template(maxspace::get_help_template())
        .args(&[arg!(-c --config <FILE> "Sets the configuration file to use.")
            .value_parser(value_parser!(PathBuf))])
        .get_matches();

    let level = log::setup_logging(false)?;
    let path = maxspace::config_path(matches.get_one::<PathBuf>("config").cloned())?;
    let config = maxspace::load(&path);
    log::set_verbose(&level, config.verbose_logging);
    tracing::info!("maxspace booting with {}", path.display());
    for warning in config.check() {
        tracing::warn!("{warning}");
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    rt.block_on(async {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut manager =
            Manager::<X11rbWindowHandle, maxspace::Config, X11rbDisplayServer>::new(config);
        let (_, signals) = tokio::join!(
            manager.start_event_loop(receiver),
            watch_signals(&path, &level, sender),
        );
        signals
    })?;

    tracing::info!("Completed");
    Ok(())
}

/// Reload on SIGHUP. SIGINT and SIGTERM close the channel, which stops the event loop.
async fn watch_signals(
    path: &Path,
    level: &LevelHandle,
    reloads: mpsc::UnboundedSender<maxspace::Config>,
) -> Result<()> {
    let mut hangup = signal(SignalKind::hangup())?;
    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    loop {
        tokio::select! {
            _ = hangup.recv() => {
                let config = match maxspace::read(path) {
                    Ok(config) => config,
                    Err(err) => {
                        tracing::error!("Keeping the previous configuration: {err:?}");
                        continue;
                    }
                };
                log::set_verbose(level, config.verbose_logging);
                for warning in config.check() {
                    tracing::warn!("{warning}");
                }
                tracing::info!("Reloading {}", path.display());
                if reloads.send(config).is_err() {
                    break;
                }
            }
            _ = interrupt.recv() => break,
            _ = terminate.recv() => break,
        }
    }
    tracing::info!("Shutting down");
    Ok(())
}
