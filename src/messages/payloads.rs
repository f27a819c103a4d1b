use serde::Deserialize;

use crate::parsing::DisplayValue;

/// A server-rendered HTML fragment for direct insertion
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fragment {
    pub html: String,
}

/// `address_total_tx`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CounterUpdate {
    pub value: DisplayValue,
}

/// `address_transaction`: one transaction row, plus the running row index
/// when the server reports paging progress.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AddressTransaction {
    pub html: String,
    #[serde(default)]
    pub index: Option<DisplayValue>,
}

/// `address_balance`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BalanceUpdate {
    pub balance: DisplayValue,
}

/// `new_block`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewBlock {
    pub block_html: String,
    #[serde(default)]
    pub block_height: Option<u64>,
}

/// `update_block`: replace the row at `index` of the latest-blocks table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BlockUpdate {
    pub index: usize,
    pub block_html: String,
    pub block_is_valid: bool,
}

/// `update_info`: one informational counter (supply, fee, height, ...)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InfoUpdate {
    pub id: String,
    pub value: DisplayValue,
}
