//! # Document Identifiers
//!
//! Products and orders are keyed by 24-digit hexadecimal ids, the format the
//! catalog was originally exported with (`67cfc3218e6716214620f936`).
//!
//! ## Layout of Generated Ids
//! ```text
//! ┌──────────────┬──────────────────────────────┐
//! │  8 hex       │  16 hex                      │
//! │  unix secs   │  random (UUID v4 bytes)      │
//! └──────────────┴──────────────────────────────┘
//!   67cfc321      8e6716214620f936
//! ```
//! The timestamp prefix keeps ids roughly sortable by creation time.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::error::CoreError;

/// Number of hex digits in a document id.
pub const DOCUMENT_ID_LEN: usize = 24;

/// A validated, lowercase 24-digit hex identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(String);

impl DocumentId {
    /// Parses and normalizes an identifier.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::DocumentId;
    ///
    /// assert!(DocumentId::parse("67CFC3218E6716214620F936").is_ok());
    /// assert!(DocumentId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        if raw.len() != DOCUMENT_ID_LEN || !raw.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidIdentifier(raw.to_string()));
        }

        Ok(DocumentId(raw.to_ascii_lowercase()))
    }

    /// Generates a fresh identifier for a new document.
    pub fn generate() -> Self {
        let secs = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let random = Uuid::new_v4();

        let mut id = format!("{:08x}", secs);
        for byte in &random.as_bytes()[..8] {
            id.push_str(&format!("{:02x}", byte));
        }

        DocumentId(id)
    }

    /// Returns the id as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DocumentId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentId::parse(s)
    }
}

impl AsRef<str> for DocumentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<DocumentId> for String {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DocumentId::parse(&raw).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
