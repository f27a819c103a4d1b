use std::collections::HashMap;

use crate::dom::Selector;
use crate::messages::BlockSection;

/// A logical place on the page that handlers write to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Address,
    BlockHash,
    Balance,
    TxTotal,
    TxIndex,
    LatestBlocks,
    /// Container receiving a block section's items (`#transactions`, `#grants`, ...)
    Container(BlockSection),
    /// Panel wrapping a block section, hidden until the section has content
    Section(BlockSection),
    CurrentGrants,
    CurrentMotions,
    LoadingIndicator,
    ConnectionStatus,
    /// Informational counter addressed by the id the server sends
    Info(String),
}

impl Target {
    /// Selector used when the registry has no override
    #[must_use]
    pub fn default_selector(&self) -> Selector {
        match self {
            Self::Address => Selector::id("address"),
            Self::BlockHash => Selector::id("block-hash"),
            Self::Balance => Selector::id("balance"),
            Self::TxTotal => Selector::id("tx_total"),
            Self::TxIndex => Selector::id("tx_index"),
            Self::LatestBlocks => Selector::id("latest-blocks-table"),
            Self::Container(section) => Selector::id(section.slug()),
            Self::Section(section) => Selector::id(format!("{}-section", section.slug())),
            Self::CurrentGrants => Selector::id("current-grants"),
            Self::CurrentMotions => Selector::id("current-motions"),
            Self::LoadingIndicator => Selector::id("loading"),
            Self::ConnectionStatus => Selector::id("connection-status"),
            Self::Info(id) => Selector::id(id.clone()),
        }
    }
}

/// Maps logical targets to selectors.
///
/// Resolution is done when a patch is built, so the registry never hands out
/// references to elements that a later patch may have removed.
#[derive(Debug, Clone, Default)]
pub struct TargetRegistry {
    overrides: HashMap<Target, Selector>,
}

impl TargetRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_override(mut self, target: Target, selector: Selector) -> Self {
        self.overrides.insert(target, selector);
        self
    }

    #[must_use]
    pub fn resolve(&self, target: &Target) -> Selector {
        self.overrides
            .get(target)
            .cloned()
            .unwrap_or_else(|| target.default_selector())
    }
}
