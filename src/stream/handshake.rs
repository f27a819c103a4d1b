use serde::Serialize;

/// First frame sent on a keyed page: selects the stream and identifies the host.
///
/// Serialized in the bridge multiplex shape `{"stream": key, "payload": {"host": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Handshake {
    pub stream: String,
    pub payload: HandshakePayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HandshakePayload {
    pub host: String,
}

impl Handshake {
    pub fn new(subscription_key: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            stream: subscription_key.into().trim().to_string(),
            payload: HandshakePayload { host: host.into() },
        }
    }

    /// # Errors
    ///
    /// Only fails if serialization fails, which plain strings never do.
    pub fn to_text(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_handshake_shape() {
        let handshake = Handshake::new("  BqFBHS2YQ7gWxGk7ZrHn5Jw5a6XjbbU2yP  ", "explorer.example");
        let value: Value = serde_json::from_str(&handshake.to_text().unwrap()).unwrap();
        assert_eq!(
            value,
            json!({
                "stream": "BqFBHS2YQ7gWxGk7ZrHn5Jw5a6XjbbU2yP",
                "payload": {"host": "explorer.example"}
            })
        );
    }
}
