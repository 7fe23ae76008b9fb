use crate::config::Config;
use crate::models::Handle;
use crate::{DisplayServer, Manager};
use tokio::sync::mpsc;
use tokio::time::Instant;

impl<H: Handle, C: Config, SERVER: DisplayServer<H>> Manager<H, C, SERVER> {
    /// Run until `reloads` is closed.
    ///
    /// Every configuration received on `reloads` is applied right away. Closing the channel
    /// disables maxspace and ends the loop.
    pub async fn start_event_loop(&mut self, mut reloads: mpsc::UnboundedReceiver<C>) {
        let started = Instant::now();
        self.enable();

        let mut event_buffer = vec![];
        loop {
            self.display_server.flush();
            self.state.scheduler.advance_to(started.elapsed());
            let deadline = self
                .state
                .scheduler
                .next_deadline()
                .map(|due| started + due);

            tokio::select! {
                () = self.display_server.wait_readable(), if event_buffer.is_empty() => {
                    event_buffer.append(&mut self.display_server.get_next_events());
                    continue;
                }
                () = sleep_until(deadline), if event_buffer.is_empty() && deadline.is_some() => {
                    self.state.scheduler.advance_to(started.elapsed());
                    self.fire_due_actions();
                }
                config = reloads.recv(), if event_buffer.is_empty() => {
                    match config {
                        Some(config) => self.load_config(config),
                        None => break,
                    }
                }
                else => {
                    for event in event_buffer.drain(..) {
                        self.handle_event(event);
                    }
                }
            }
        }

        self.disable();
        self.display_server.flush();
        tracing::info!("event loop stopped");
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => futures::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::tests::TestConfig;
    use crate::models::{SizeChange, Window, WindowHandle};
    use crate::DisplayEvent;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn deferred_moves_happen_while_the_loop_waits() {
        let mut manager = Manager::new_test(TestConfig::default());
        let a = Window::new(WindowHandle(1), 0);
        let b = Window {
            maximized: true,
            ..Window::new(WindowHandle(2), 0)
        };
        manager.display_server.add_window(a.clone());
        manager.display_server.add_window(b.clone());
        manager.display_server.events = vec![
            DisplayEvent::WindowCreate(a),
            DisplayEvent::WindowCreate(b),
        ];

        let (sender, receiver) = mpsc::unbounded_channel();
        let stop = async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            drop(sender);
        };
        tokio::join!(manager.start_event_loop(receiver), stop);

        assert_eq!(
            manager.display_server.workspace_of(&WindowHandle(2)),
            Some(1)
        );
        assert_eq!(
            manager.display_server.workspace_of(&WindowHandle(1)),
            Some(0)
        );
        assert!(!manager.is_enabled());
        assert!(!manager.display_server.subscribed);
    }

    #[tokio::test(start_paused = true)]
    async fn reloads_are_applied_without_losing_pending_work() {
        let mut manager = Manager::new_test(TestConfig::default());
        let a = Window::new(WindowHandle(1), 0);
        let b = Window::new(WindowHandle(2), 0);
        manager.display_server.add_window(a.clone());
        manager.display_server.add_window(b.clone());
        manager.display_server.events = vec![
            DisplayEvent::WindowCreate(a),
            DisplayEvent::WindowCreate(b),
            DisplayEvent::WindowResize(WindowHandle(2), SizeChange::Maximize),
        ];

        let (sender, receiver) = mpsc::unbounded_channel();
        let reload = async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            sender
                .send(TestConfig {
                    auto_rename_workspaces: true,
                    ..TestConfig::default()
                })
                .unwrap();
            tokio::time::sleep(Duration::from_secs(1)).await;
        };
        tokio::join!(manager.start_event_loop(receiver), reload);

        assert_eq!(
            manager.display_server.workspace_of(&WindowHandle(2)),
            Some(1)
        );
        assert_eq!(manager.display_server.names[0].as_deref(), Some("main"));
    }
}
