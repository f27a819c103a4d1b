use tracing::debug;

use crate::dom::{Animation, ClassToggle, DomPatch};
use crate::messages::{BlockUpdate, InfoUpdate, NewBlock};
use crate::pages::{PageConfig, Target};

/// Row class marking a block that failed validation
pub const INVALID_BLOCK_CLASS: &str = "warning";

/// Newest block goes on top; rows are never re-sorted
pub(super) fn new_block(config: &PageConfig, block: &NewBlock) -> Vec<DomPatch> {
    match block.block_height {
        Some(height) => debug!("New block at height {}", height),
        None => debug!("New block without height"),
    }

    vec![DomPatch::InsertBeforeFirst {
        target: config.resolve(&Target::LatestBlocks),
        html: block.block_html.clone(),
    }]
}

pub(super) fn update_block(config: &PageConfig, update: &BlockUpdate) -> Vec<DomPatch> {
    vec![DomPatch::ReplaceRow {
        target: config.resolve(&Target::LatestBlocks),
        index: update.index,
        html: update.block_html.clone(),
        class: Some(ClassToggle {
            class: INVALID_BLOCK_CLASS.to_string(),
            enabled: !update.block_is_valid,
        }),
        animation: config.animation,
    }]
}

pub(super) fn update_info(config: &PageConfig, info: &InfoUpdate) -> Vec<DomPatch> {
    let target = config.resolve(&Target::Info(info.id.clone()));

    let mut patches = vec![DomPatch::SetText {
        target: target.clone(),
        text: info.value.text.clone(),
    }];

    if let Some(visible) = config.visibility.decide(&info.value) {
        patches.push(DomPatch::SetVisible {
            target,
            visible,
            animation: Animation::None,
        });
    }

    patches
}
