//! Typed model of the messages pushed by the broadcast service.
//!
//! Every message is a JSON object carrying a `message_type` tag; the rest of
//! the object depends on the tag. Decoding validates the fields a tag needs
//! before anything touches the page, and tags this client does not know
//! decode to [`InboundMessage::Unknown`] instead of failing.

mod payloads;

pub use payloads::{
    AddressTransaction, BalanceUpdate, BlockUpdate, CounterUpdate, Fragment, InfoUpdate, NewBlock,
};

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::parsing::{message_tag, unwrap_stream_envelope};

/// Failure to turn a raw frame into an [`InboundMessage`]
#[derive(Debug, Error)]
pub enum MessageError {
    #[error("message is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("message is not a JSON object")]
    NotAnObject,

    #[error("message has no string `message_type` field")]
    MissingTag,

    #[error("invalid payload for `{tag}`: {source}")]
    InvalidPayload {
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The per-block detail sections of the block page.
///
/// Each section has a `has_<x>` announcement, a `block_<x>` item message and
/// its own container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockSection {
    Transactions,
    Grants,
    Motions,
    ParkRates,
    Fees,
}

impl BlockSection {
    pub const ALL: [BlockSection; 5] = [
        BlockSection::Transactions,
        BlockSection::Grants,
        BlockSection::Motions,
        BlockSection::ParkRates,
        BlockSection::Fees,
    ];

    #[must_use]
    pub fn has_tag(self) -> &'static str {
        match self {
            Self::Transactions => "has_transactions",
            Self::Grants => "has_grants",
            Self::Motions => "has_motions",
            Self::ParkRates => "has_park_rates",
            Self::Fees => "has_fees",
        }
    }

    #[must_use]
    pub fn item_tag(self) -> &'static str {
        match self {
            Self::Transactions => "block_transaction",
            Self::Grants => "block_grant",
            Self::Motions => "block_motion",
            Self::ParkRates => "block_park_rate",
            Self::Fees => "block_fees",
        }
    }

    /// Slug used to derive element ids (`#park-rates`, `#park-rates-section`)
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Grants => "grants",
            Self::Motions => "motions",
            Self::ParkRates => "park-rates",
            Self::Fees => "fees",
        }
    }

    fn from_has_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.has_tag() == tag)
    }

    fn from_item_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.item_tag() == tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    AddressTotalTx(CounterUpdate),
    AddressTransaction(AddressTransaction),
    AddressBalance(BalanceUpdate),
    HasSection(BlockSection),
    BlockItem(BlockSection, Fragment),
    ClearBlockTransactions,
    ClearBlockDetails,
    NewBlock(NewBlock),
    UpdateBlock(BlockUpdate),
    UpdateInfo(InfoUpdate),
    Loading,
    Done,
    NewCurrentGrant(Fragment),
    NewCurrentMotion(Fragment),
    Unknown { tag: String },
}

impl InboundMessage {
    /// Decode one text frame.
    ///
    /// # Errors
    ///
    /// Returns an error when the frame is not a JSON object, has no tag, or
    /// lacks a field its tag requires.
    pub fn decode(text: &str) -> Result<Self, MessageError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Decode an already parsed JSON value, unwrapping the multiplex envelope.
    ///
    /// # Errors
    ///
    /// See [`InboundMessage::decode`].
    pub fn from_value(value: Value) -> Result<Self, MessageError> {
        let (_stream, body) = unwrap_stream_envelope(value);
        if !body.is_object() {
            return Err(MessageError::NotAnObject);
        }

        let tag = message_tag(&body)
            .ok_or(MessageError::MissingTag)?
            .to_string();

        let message = match tag.as_str() {
            "address_total_tx" => Self::AddressTotalTx(payload(&tag, body)?),
            "address_transaction" => Self::AddressTransaction(payload(&tag, body)?),
            "address_balance" => Self::AddressBalance(payload(&tag, body)?),
            "clear_block_transactions" => Self::ClearBlockTransactions,
            "clear_block_details" => Self::ClearBlockDetails,
            "new_block" => Self::NewBlock(payload(&tag, body)?),
            "update_block" => Self::UpdateBlock(payload(&tag, body)?),
            "update_info" => Self::UpdateInfo(payload(&tag, body)?),
            "loading" => Self::Loading,
            "done" => Self::Done,
            "new_current_grant" => Self::NewCurrentGrant(payload(&tag, body)?),
            "new_current_motion" => Self::NewCurrentMotion(payload(&tag, body)?),
            other => {
                if let Some(section) = BlockSection::from_has_tag(other) {
                    Self::HasSection(section)
                } else if let Some(section) = BlockSection::from_item_tag(other) {
                    Self::BlockItem(section, payload(&tag, body)?)
                } else {
                    Self::Unknown {
                        tag: other.to_string(),
                    }
                }
            }
        };

        Ok(message)
    }

    /// The wire tag this message was decoded from
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::AddressTotalTx(_) => "address_total_tx",
            Self::AddressTransaction(_) => "address_transaction",
            Self::AddressBalance(_) => "address_balance",
            Self::HasSection(section) => section.has_tag(),
            Self::BlockItem(section, _) => section.item_tag(),
            Self::ClearBlockTransactions => "clear_block_transactions",
            Self::ClearBlockDetails => "clear_block_details",
            Self::NewBlock(_) => "new_block",
            Self::UpdateBlock(_) => "update_block",
            Self::UpdateInfo(_) => "update_info",
            Self::Loading => "loading",
            Self::Done => "done",
            Self::NewCurrentGrant(_) => "new_current_grant",
            Self::NewCurrentMotion(_) => "new_current_motion",
            Self::Unknown { tag } => tag,
        }
    }
}

fn payload<T: DeserializeOwned>(tag: &str, body: Value) -> Result<T, MessageError> {
    serde_json::from_value(body).map_err(|source| MessageError::InvalidPayload {
        tag: tag.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_update_block() {
        let raw = json!({
            "message_type": "update_block",
            "index": 3,
            "block_html": "<td class=\"height\">1200</td>",
            "block_is_valid": false
        })
        .to_string();

        let message = InboundMessage::decode(&raw).unwrap();
        assert_eq!(
            message,
            InboundMessage::UpdateBlock(BlockUpdate {
                index: 3,
                block_html: "<td class=\"height\">1200</td>".to_string(),
                block_is_valid: false,
            })
        );
        assert_eq!(message.tag(), "update_block");
    }

    #[test]
    fn test_decode_update_info_with_numeric_and_string_values() {
        let numeric = InboundMessage::decode(
            &json!({"message_type": "update_info", "id": "USNBT-fee", "value": 456}).to_string(),
        )
        .unwrap();
        let InboundMessage::UpdateInfo(info) = numeric else {
            panic!("expected update_info");
        };
        assert_eq!(info.id, "USNBT-fee");
        assert_eq!(info.value.text, "456");

        let text = InboundMessage::decode(
            &json!({"message_type": "update_info", "id": "height", "value": "0"}).to_string(),
        )
        .unwrap();
        let InboundMessage::UpdateInfo(info) = text else {
            panic!("expected update_info");
        };
        assert!(info.value.is_zero());
    }

    #[test]
    fn test_decode_section_tags() {
        let has = InboundMessage::decode(r#"{"message_type": "has_grants"}"#).unwrap();
        assert_eq!(has, InboundMessage::HasSection(BlockSection::Grants));
        assert_eq!(has.tag(), "has_grants");

        let item = InboundMessage::decode(
            r#"{"message_type": "block_park_rate", "html": "<div>rate</div>"}"#,
        )
        .unwrap();
        assert_eq!(
            item,
            InboundMessage::BlockItem(
                BlockSection::ParkRates,
                Fragment {
                    html: "<div>rate</div>".to_string()
                }
            )
        );
        assert_eq!(item.tag(), "block_park_rate");
    }

    #[test]
    fn test_decode_unwraps_stream_envelope() {
        let raw = json!({
            "stream": "0000a1b2",
            "payload": {"message_type": "block_transaction", "html": "<div>tx</div>"}
        })
        .to_string();

        let message = InboundMessage::decode(&raw).unwrap();
        assert_eq!(message.tag(), "block_transaction");
    }

    #[test]
    fn test_unknown_tag_is_not_an_error() {
        let message =
            InboundMessage::decode(r#"{"message_type": "new_browser", "html": "x"}"#).unwrap();
        assert_eq!(
            message,
            InboundMessage::Unknown {
                tag: "new_browser".to_string()
            }
        );
        assert_eq!(message.tag(), "new_browser");
    }

    #[test]
    fn test_missing_fields_are_rejected() {
        let err = InboundMessage::decode(r#"{"message_type": "update_block", "index": 1}"#)
            .unwrap_err();
        match err {
            MessageError::InvalidPayload { tag, .. } => assert_eq!(tag, "update_block"),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = InboundMessage::decode(r#"{"message_type": "block_grant"}"#).unwrap_err();
        assert!(matches!(err, MessageError::InvalidPayload { .. }));
    }

    #[test]
    fn test_envelope_errors() {
        assert!(matches!(
            InboundMessage::decode("not json"),
            Err(MessageError::InvalidJson(_))
        ));
        assert!(matches!(
            InboundMessage::decode("[1, 2]"),
            Err(MessageError::NotAnObject)
        ));
        assert!(matches!(
            InboundMessage::decode(r#"{"value": 1}"#),
            Err(MessageError::MissingTag)
        ));
        assert!(matches!(
            InboundMessage::decode(r#"{"message_type": 7}"#),
            Err(MessageError::MissingTag)
        ));
    }

    #[test]
    fn test_negative_row_index_is_rejected() {
        let raw = json!({
            "message_type": "update_block",
            "index": -1,
            "block_html": "<td></td>",
            "block_is_valid": true
        })
        .to_string();
        assert!(InboundMessage::decode(&raw).is_err());
    }
}
