//! Fixed-duration event window
//!
//! Both phases suspend on the same kind of window: a fixed deadline, a
//! once-per-second countdown refresh, and a stream of user events applied
//! one at a time. Applying events serially makes each mutation an
//! indivisible critical section; no reader can observe a half-applied
//! vote. The window always runs to its deadline — reaching the cancel
//! threshold never interrupts it.

use crate::ports::quiz_ui::{EventStream, MessageHandle, QuizUi};
use std::time::Duration;
use tokio::time::{Instant, MissedTickBehavior, interval, sleep_until};
use tracing::debug;

/// Phase state that consumes window events and reports live tallies
pub(crate) trait WindowHandler {
    type Event;

    /// Apply one inbound event
    fn on_event(&mut self, event: Self::Event);

    /// Tally line echoed alongside each countdown refresh
    fn status_line(&self) -> String;
}

/// Run one event window to its deadline, feeding events to the handler
pub(crate) async fn run_event_window<H: WindowHandler>(
    ui: &dyn QuizUi,
    handle: &MessageHandle,
    events: &mut EventStream<H::Event>,
    duration: Duration,
    handler: &mut H,
) {
    let deadline = Instant::now() + duration;
    let window = sleep_until(deadline);
    tokio::pin!(window);

    let mut countdown = interval(Duration::from_secs(1));
    countdown.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut events_open = true;
    loop {
        tokio::select! {
            _ = &mut window => break,
            _ = countdown.tick() => {
                let left = deadline.saturating_duration_since(Instant::now()).as_secs();
                if let Err(e) = ui.update_countdown(handle, left, &handler.status_line()).await {
                    debug!("countdown update failed: {e}");
                }
            }
            event = events.recv(), if events_open => match event {
                Some(event) => handler.on_event(event),
                None => events_open = false,
            }
        }
    }
}
