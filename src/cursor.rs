//! Cursor encoding/decoding
//!
//! A cursor carries the ordering key of one record. On the wire it is an
//! opaque URL-safe string: base64 over a small versioned JSON envelope.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};

use crate::ordering::Ordering;
use crate::value::Value;

/// Current envelope version written by [`CursorCodec::encode`].
pub const CURSOR_VERSION: u8 = 1;

/// Decoded cursor: the ordering key of the record it was taken from.
///
/// Cursors issued by a paginator also name the ordering they belong to, so
/// a cursor from another connection is refused instead of being compared
/// against unrelated keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    ordering: Option<String>,
    keys: Vec<Value>,
}

impl Cursor {
    pub fn new(keys: Vec<Value>) -> Self {
        Self {
            ordering: None,
            keys,
        }
    }

    /// A cursor tagged with the ordering its keys were read under.
    pub fn for_ordering(ordering: &Ordering, keys: Vec<Value>) -> Self {
        Self {
            ordering: Some(ordering.to_string()),
            keys,
        }
    }

    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    /// The ordering this cursor was issued for, if it was tagged.
    pub fn ordering(&self) -> Option<&str> {
        self.ordering.as_deref()
    }

    pub fn into_keys(self) -> Vec<Value> {
        self.keys
    }

    /// Encode as an opaque token.
    pub fn encode(&self) -> crate::Result<String> {
        CursorCodec::encode(self)
    }

    /// Decode an opaque token.
    pub fn decode(token: &str) -> crate::Result<Self> {
        CursorCodec::decode(token)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    v: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    o: Option<&'a str>,
    k: &'a [Value],
}

#[derive(Deserialize)]
struct Envelope {
    v: u8,
    #[serde(default)]
    o: Option<String>,
    k: Vec<Value>,
}

/// Cursor encoding/decoding
pub struct CursorCodec;

impl CursorCodec {
    /// Encode cursor keys to a token
    pub fn encode(cursor: &Cursor) -> crate::Result<String> {
        Self::encode_structured(&EnvelopeRef {
            v: CURSOR_VERSION,
            o: cursor.ordering.as_deref(),
            k: &cursor.keys,
        })
    }

    /// Decode a token produced by [`CursorCodec::encode`]
    pub fn decode(token: &str) -> crate::Result<Cursor> {
        let envelope: Envelope = Self::decode_structured(token)?;
        if envelope.v != CURSOR_VERSION {
            return Err(crate::Error::InvalidCursor(format!(
                "unsupported cursor version {}",
                envelope.v
            )));
        }
        Ok(Cursor {
            ordering: envelope.o,
            keys: envelope.k,
        })
    }

    /// Encode any serializable cursor payload
    pub fn encode_structured<T: Serialize>(value: &T) -> crate::Result<String> {
        let json = serde_json::to_string(value)
            .map_err(|e| crate::Error::InvalidCursor(e.to_string()))?;
        Ok(BASE64.encode(json.as_bytes()))
    }

    /// Decode a payload produced by [`CursorCodec::encode_structured`]
    pub fn decode_structured<T: for<'de> Deserialize<'de>>(token: &str) -> crate::Result<T> {
        let bytes = BASE64
            .decode(token.as_bytes())
            .map_err(|e| crate::Error::InvalidCursor(e.to_string()))?;
        let json = String::from_utf8(bytes)
            .map_err(|e| crate::Error::InvalidCursor(e.to_string()))?;
        serde_json::from_str(&json).map_err(|e| crate::Error::InvalidCursor(e.to_string()))
    }
}
