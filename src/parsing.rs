use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// A scalar the broadcast service sends either as a JSON string or a JSON number.
///
/// The text is shown verbatim; the number is kept when the text reads as one so
/// handlers can make threshold decisions on it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawScalar")]
pub struct DisplayValue {
    pub text: String,
    pub number: Option<f64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(serde_json::Number),
    Text(String),
}

impl From<RawScalar> for DisplayValue {
    fn from(raw: RawScalar) -> Self {
        match raw {
            RawScalar::Number(number) => Self {
                text: number.to_string(),
                number: number.as_f64(),
            },
            RawScalar::Text(text) => Self::from_text(text),
        }
    }
}

impl DisplayValue {
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let number = parse_numeric(&text);
        Self { text, number }
    }

    /// True when the value is numeric and strictly greater than zero
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.number.is_some_and(|n| n > 0.0)
    }

    /// True when the value is numeric and equal to zero
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.number.is_some_and(|n| n == 0.0)
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Parse a display string such as `"1,234.50"` into a number.
///
/// Thousands separators and surrounding whitespace are ignored. Anything else
/// that is not a finite number yields `None`.
#[must_use]
pub fn parse_numeric(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Split the bridge multiplex envelope `{"stream": key, "payload": {..}}`.
///
/// Returns the stream key (if the value was wrapped) and the inner message. A
/// value without both fields is returned unchanged.
#[must_use]
pub fn unwrap_stream_envelope(value: Value) -> (Option<String>, Value) {
    match value {
        Value::Object(mut map) if map.contains_key("stream") && map.contains_key("payload") => {
            let stream = map
                .remove("stream")
                .and_then(|s| s.as_str().map(ToString::to_string));
            let payload = map.remove("payload").unwrap_or(Value::Null);
            (stream, payload)
        }
        other => (None, other),
    }
}

/// Read the `message_type` tag of a decoded message object
#[must_use]
pub fn message_tag(value: &Value) -> Option<&str> {
    value.get("message_type").and_then(Value::as_str)
}
