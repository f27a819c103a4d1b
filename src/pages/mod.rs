//! Page kinds, their stream endpoints, and the per-page configuration.

mod targets;

pub use targets::{Target, TargetRegistry};

use clap::ValueEnum;

use crate::dom::{Animation, Element, MemoryDocument, Selector, Speed};
use crate::messages::{BlockSection, InboundMessage};
use crate::parsing::DisplayValue;
use crate::toggle::DetailToggle;

/// The explorer pages that subscribe to a live stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum PageKind {
    AddressDetails,
    AddressTransactions,
    BlockTransactions,
    LatestBlocks,
    UpdateInfo,
    CurrentGrants,
    CurrentMotions,
}

impl PageKind {
    /// Endpoint path on the broadcast service
    #[must_use]
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::AddressDetails => "/get_address_details/",
            Self::AddressTransactions => "/get_address_transactions/",
            Self::BlockTransactions => "/get_block_transactions/",
            Self::LatestBlocks => "/latest_blocks_list/",
            Self::UpdateInfo => "/update-info/",
            Self::CurrentGrants => "/get_current_grants/",
            Self::CurrentMotions => "/get_current_motions/",
        }
    }

    /// Element whose text is the subscription key, for pages that have one
    #[must_use]
    pub fn key_target(self) -> Option<Target> {
        match self {
            Self::AddressDetails | Self::AddressTransactions => Some(Target::Address),
            Self::BlockTransactions => Some(Target::BlockHash),
            Self::LatestBlocks | Self::UpdateInfo | Self::CurrentGrants | Self::CurrentMotions => {
                None
            }
        }
    }

    /// Whether this page has a handler for `message`
    #[must_use]
    pub fn accepts(self, message: &InboundMessage) -> bool {
        use InboundMessage as M;

        match self {
            Self::AddressDetails | Self::AddressTransactions => matches!(
                message,
                M::AddressTotalTx(_) | M::AddressTransaction(_) | M::AddressBalance(_)
            ),
            Self::BlockTransactions => matches!(
                message,
                M::HasSection(_) | M::BlockItem(..) | M::ClearBlockTransactions | M::ClearBlockDetails
            ),
            Self::LatestBlocks => matches!(
                message,
                M::NewBlock(_) | M::UpdateBlock(_) | M::UpdateInfo(_)
            ),
            Self::UpdateInfo => matches!(message, M::UpdateInfo(_)),
            Self::CurrentGrants => matches!(message, M::Loading | M::Done | M::NewCurrentGrant(_)),
            Self::CurrentMotions => {
                matches!(message, M::Loading | M::Done | M::NewCurrentMotion(_))
            }
        }
    }

    /// Every fixed target the page's handlers write to, plus its key element
    #[must_use]
    pub fn targets(self) -> Vec<Target> {
        let mut targets = vec![Target::ConnectionStatus];
        if let Some(key) = self.key_target() {
            targets.push(key);
        }

        match self {
            Self::AddressDetails | Self::AddressTransactions => targets.extend([
                Target::Balance,
                Target::TxTotal,
                Target::TxIndex,
                Target::Container(BlockSection::Transactions),
            ]),
            Self::BlockTransactions => {
                for section in BlockSection::ALL {
                    targets.push(Target::Container(section));
                    targets.push(Target::Section(section));
                }
            }
            Self::LatestBlocks => targets.push(Target::LatestBlocks),
            Self::UpdateInfo => {}
            Self::CurrentGrants => targets.extend([Target::LoadingIndicator, Target::CurrentGrants]),
            Self::CurrentMotions => {
                targets.extend([Target::LoadingIndicator, Target::CurrentMotions]);
            }
        }

        targets
    }
}

/// When an `update_info` counter is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum VisibilityPolicy {
    /// Visible iff the value is greater than zero
    #[default]
    ShowWhenPositive,
    /// Hidden iff the value is zero
    HideWhenZero,
}

impl VisibilityPolicy {
    /// Visibility for `value`, or `None` when the value is not numeric
    #[must_use]
    pub fn decide(self, value: &DisplayValue) -> Option<bool> {
        value.number?;
        Some(match self {
            Self::ShowWhenPositive => value.is_positive(),
            Self::HideWhenZero => !value.is_zero(),
        })
    }
}

/// Everything a page session needs to know about its page
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub page: PageKind,
    pub registry: TargetRegistry,
    pub animation: Animation,
    pub visibility: VisibilityPolicy,
    pub toggle: DetailToggle,
}

impl PageConfig {
    #[must_use]
    pub fn new(page: PageKind) -> Self {
        Self {
            page,
            registry: TargetRegistry::new(),
            animation: Animation::Fade(Speed::Fast),
            visibility: VisibilityPolicy::default(),
            toggle: DetailToggle::default(),
        }
    }

    #[must_use]
    pub fn with_animation(mut self, animation: Animation) -> Self {
        self.animation = animation;
        self.toggle.animation = animation;
        self
    }

    #[must_use]
    pub fn with_visibility(mut self, visibility: VisibilityPolicy) -> Self {
        self.visibility = visibility;
        self
    }

    #[must_use]
    pub fn with_registry(mut self, registry: TargetRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn resolve(&self, target: &Target) -> Selector {
        self.registry.resolve(target)
    }

    /// Build an empty page with every element this page writes to.
    ///
    /// Section panels, the loading indicator and the connection banner start
    /// hidden. `info_ids` adds one counter element per id.
    #[must_use]
    pub fn skeleton(&self, info_ids: &[String]) -> MemoryDocument {
        let mut document = MemoryDocument::new();

        let targets = self
            .page
            .targets()
            .into_iter()
            .chain(info_ids.iter().cloned().map(Target::Info));

        for target in targets {
            let element = match self.resolve(&target) {
                Selector::Id(id) => Element::new(id),
                Selector::Class(class) => Element::anonymous().with_class(class),
            };
            let element = match target {
                Target::Section(_) | Target::LoadingIndicator | Target::ConnectionStatus => {
                    element.hidden()
                }
                _ => element,
            };
            document.insert(element);
        }

        document
    }
}
