pub mod coordination;
pub mod dispatch;
pub mod dom;
pub mod messages;
pub mod options;
pub mod pages;
pub mod parsing;
pub mod session;
pub mod stream;
pub mod toggle;

pub use options::LiveOptions;

use anyhow::{bail, Context, Result};
use tracing::{info, warn};

use crate::dom::{Dom, MemoryDocument};
use crate::pages::PageConfig;
use crate::session::{PageSession, SessionStats};
use crate::stream::{Handshake, Subscriber};

pub struct LiveClient {
    options: LiveOptions,
}

impl LiveClient {
    pub fn new(options: LiveOptions) -> Self {
        Self { options }
    }

    pub fn page_config(&self) -> PageConfig {
        PageConfig::new(self.options.page)
            .with_animation(self.options.animation)
            .with_visibility(self.options.info_visibility)
    }

    /// The headless page the session patches, with the key element filled from `--key`
    pub fn document(&self, config: &PageConfig) -> MemoryDocument {
        let mut document = config.skeleton(&self.options.info_ids);

        if let (Some(target), Some(key)) = (config.page.key_target(), &self.options.key) {
            document.set_text(&config.resolve(&target), key);
        }

        document
    }

    pub async fn run(&self) -> Result<SessionStats> {
        let config = self.page_config();
        let document = self.document(&config);
        let mut session = PageSession::new(config, document);

        let handshake = match (self.options.page.key_target(), session.subscription_key()) {
            (Some(_), Some(key)) => Some(Handshake::new(key, self.options.host.clone())),
            (Some(target), None) => {
                bail!("Page {:?} needs a key ({:?}) but none was given", self.options.page, target)
            }
            (None, _) => None,
        };

        let subscription = Subscriber::new(self.options.server_url.clone())
            .connect(self.options.page, handshake)
            .await
            .context("Failed to open live-update stream")?;
        info!("Subscribed to {}", subscription.url());

        let interrupted = tokio::select! {
            _ = session.run(subscription.into_events()) => false,
            _ = tokio::signal::ctrl_c() => true,
        };
        if interrupted {
            warn!("Interrupted, {} patch(es) still pending", session.pending());
        }

        let stats = session.stats().clone();

        info!(
            "Session finished: {} message(s), {} ignored, {} malformed, {} applied, {} skipped",
            stats.messages, stats.ignored, stats.malformed, stats.applied, stats.skipped
        );
        for line in session.dom().summary() {
            info!("  {}", line);
        }

        Ok(stats)
    }
}
