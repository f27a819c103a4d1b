use crate::dom::DomPatch;
use crate::messages::{AddressTransaction, BalanceUpdate, BlockSection, CounterUpdate};
use crate::pages::{PageConfig, Target};

pub(super) fn total_tx(config: &PageConfig, update: &CounterUpdate) -> Vec<DomPatch> {
    vec![DomPatch::SetText {
        target: config.resolve(&Target::TxTotal),
        text: update.value.text.clone(),
    }]
}

/// Append the transaction row and report how far the server has paged
pub(super) fn transaction(config: &PageConfig, tx: &AddressTransaction) -> Vec<DomPatch> {
    let mut patches = vec![DomPatch::Append {
        target: config.resolve(&Target::Container(BlockSection::Transactions)),
        html: tx.html.clone(),
    }];

    if let Some(index) = &tx.index {
        patches.push(DomPatch::SetText {
            target: config.resolve(&Target::TxIndex),
            text: index.text.clone(),
        });
    }

    patches
}

pub(super) fn balance(config: &PageConfig, update: &BalanceUpdate) -> Vec<DomPatch> {
    vec![DomPatch::SetText {
        target: config.resolve(&Target::Balance),
        text: update.balance.text.clone(),
    }]
}
