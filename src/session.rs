use std::time::Instant;

use futures_util::stream::Stream;
use tokio_stream::StreamExt;
use tracing::{debug, error, warn};

use crate::coordination::PatchQueue;
use crate::dispatch::Dispatcher;
use crate::dom::{Animation, Dom, DomPatch, Selector};
use crate::messages::InboundMessage;
use crate::pages::{PageConfig, Target};
use crate::stream::{CloseReason, StreamEvent};

pub const CONNECTION_LOST_TEXT: &str = "Connection lost";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub messages: usize,
    pub ignored: usize,
    pub malformed: usize,
    pub applied: usize,
    pub skipped: usize,
}

/// One page bound to one subscription.
///
/// Messages are handled one at a time to completion; patches they produce go
/// through the per-container queue before they reach the document.
pub struct PageSession<D: Dom> {
    dispatcher: Dispatcher,
    queue: PatchQueue,
    dom: D,
    stats: SessionStats,
}

impl<D: Dom> PageSession<D> {
    pub fn new(config: PageConfig, dom: D) -> Self {
        Self {
            dispatcher: Dispatcher::new(config),
            queue: PatchQueue::new(),
            dom,
            stats: SessionStats::default(),
        }
    }

    pub fn config(&self) -> &PageConfig {
        self.dispatcher.config()
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Patches still waiting on a busy container
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The address or block hash shown on the page, read fresh from the document
    pub fn subscription_key(&self) -> Option<String> {
        let target = self.config().page.key_target()?;
        let text = self.dom.text(&self.config().resolve(&target))?;
        let key = text.trim();
        (!key.is_empty()).then(|| key.to_string())
    }

    pub fn handle_text(&mut self, text: &str, now: Instant) {
        match InboundMessage::decode(text) {
            Ok(message) => {
                self.handle_message(&message, now);
            }
            Err(err) => {
                warn!("Dropping malformed message: {}", err);
                self.stats.malformed += 1;
            }
        }
    }

    /// Dispatch one message and apply whatever is ready. Returns the number of patches produced.
    pub fn handle_message(&mut self, message: &InboundMessage, now: Instant) -> usize {
        self.stats.messages += 1;

        let patches = self.dispatcher.dispatch(message);
        if patches.is_empty() {
            self.stats.ignored += 1;
        }

        let count = patches.len();
        self.queue.enqueue_all(patches);
        self.tick(now);
        count
    }

    /// Returns false once the stream has closed
    pub fn handle_event(&mut self, event: StreamEvent, now: Instant) -> bool {
        match event {
            StreamEvent::Message(message) => {
                self.handle_message(&message, now);
                true
            }
            StreamEvent::Malformed(err) => {
                warn!("Dropping malformed message: {}", err);
                self.stats.malformed += 1;
                true
            }
            StreamEvent::Closed(reason) => {
                self.connection_lost(&reason, now);
                false
            }
        }
    }

    /// Click on a detail-toggle control
    pub fn click(&mut self, control: &Selector, now: Instant) -> usize {
        let patches = self.config().toggle.click(&self.dom, control);
        let count = patches.len();
        if count == 0 {
            debug!("Click on {} changed nothing", control);
        }
        self.queue.enqueue_all(patches);
        self.tick(now);
        count
    }

    /// Tell the user the live updates stopped
    pub fn connection_lost(&mut self, reason: &CloseReason, now: Instant) {
        error!("Live updates stopped: {}", reason);

        let target = self.config().resolve(&Target::ConnectionStatus);
        self.queue.enqueue_all([
            DomPatch::SetText {
                target: target.clone(),
                text: CONNECTION_LOST_TEXT.to_string(),
            },
            DomPatch::SetVisible {
                target,
                visible: true,
                animation: Animation::None,
            },
        ]);
        self.tick(now);
    }

    /// Apply queued patches whose containers are idle
    pub fn tick(&mut self, now: Instant) -> usize {
        let outcomes = self.queue.apply_ready(&mut self.dom, now);
        for outcome in &outcomes {
            if outcome.is_applied() {
                self.stats.applied += 1;
            } else {
                self.stats.skipped += 1;
            }
        }
        outcomes.len()
    }

    /// Instant at which the next held-back patch can be applied, if any
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        self.queue.next_deadline(now)
    }

    /// Drive the session from a subscription until it closes and the queue drains.
    ///
    /// Between messages the session sleeps until the earliest animation ends.
    pub async fn run<S>(&mut self, mut events: S) -> SessionStats
    where
        S: Stream<Item = StreamEvent> + Unpin,
    {
        let mut open = true;

        while open || !self.queue.is_empty() {
            // Release anything whose animation ended since the last pass, so
            // a non-empty queue always has a future deadline.
            let now = Instant::now();
            self.tick(now);
            let deadline = self.queue.next_deadline(now);

            tokio::select! {
                event = events.next(), if open => match event {
                    Some(event) => open = self.handle_event(event, Instant::now()),
                    None => {
                        self.connection_lost(&CloseReason::Ended, Instant::now());
                        open = false;
                    }
                },
                _ = sleep_until(deadline), if deadline.is_some() => {
                    self.tick(Instant::now());
                }
                else => {
                    if !self.queue.is_empty() {
                        warn!("{} patch(es) left with no pending animation", self.queue.len());
                    }
                    break;
                }
            }
        }

        self.stats.clone()
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    if let Some(deadline) = deadline {
        tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
    }
}
