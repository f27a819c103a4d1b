//! Routes each inbound message to the handler for its tag.
//!
//! Handlers are pure: they turn a message into [`DomPatch`]es and never touch
//! the document themselves. The match below is exhaustive over
//! [`InboundMessage`], so a new tag cannot be added without deciding what it
//! does on the page.

mod address;
mod block;
mod latest;
mod votes;

pub use latest::INVALID_BLOCK_CLASS;

use tracing::{debug, warn};

use crate::dom::DomPatch;
use crate::messages::InboundMessage;
use crate::pages::PageConfig;

#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: PageConfig,
}

impl Dispatcher {
    #[must_use]
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Patches for one message; empty for unknown tags and tags the page does not handle
    #[must_use]
    pub fn dispatch(&self, message: &InboundMessage) -> Vec<DomPatch> {
        if let InboundMessage::Unknown { tag } = message {
            warn!("Ignoring message with unknown tag `{}`", tag);
            return Vec::new();
        }

        if !self.config.page.accepts(message) {
            debug!(
                "Page {:?} has no handler for `{}`",
                self.config.page,
                message.tag()
            );
            return Vec::new();
        }

        let config = &self.config;
        let patches = match message {
            InboundMessage::AddressTotalTx(update) => address::total_tx(config, update),
            InboundMessage::AddressTransaction(tx) => address::transaction(config, tx),
            InboundMessage::AddressBalance(update) => address::balance(config, update),
            InboundMessage::HasSection(section) => block::show_section(config, *section),
            InboundMessage::BlockItem(section, fragment) => {
                block::append_item(config, *section, fragment)
            }
            InboundMessage::ClearBlockTransactions | InboundMessage::ClearBlockDetails => {
                block::clear_details(config)
            }
            InboundMessage::NewBlock(block) => latest::new_block(config, block),
            InboundMessage::UpdateBlock(update) => latest::update_block(config, update),
            InboundMessage::UpdateInfo(info) => latest::update_info(config, info),
            InboundMessage::Loading => votes::loading(config, true),
            InboundMessage::Done => votes::loading(config, false),
            InboundMessage::NewCurrentGrant(fragment) => votes::current_grant(config, fragment),
            InboundMessage::NewCurrentMotion(fragment) => votes::current_motion(config, fragment),
            InboundMessage::Unknown { .. } => Vec::new(),
        };

        debug!(
            "Routed `{}` to {} patch(es)",
            message.tag(),
            patches.len()
        );

        patches
    }
}
