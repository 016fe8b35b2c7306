// 🆔 Global IDs - opaque (type name, local id) pairs
//
// Wire format: base64("<TypeName>:<localId>"). Decoding splits on the first
// ':' so local ids may themselves contain colons.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: char = ':';

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlobalIdError {
    /// Not valid base64
    InvalidBase64(String),
    /// Decoded bytes are not UTF-8
    InvalidUtf8(String),
    /// Decoded text has no ':' between type name and local id
    MissingSeparator(String),
    /// Decoded text starts with ':'
    EmptyTypeName(String),
}

impl fmt::Display for GlobalIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlobalIdError::InvalidBase64(id) => write!(f, "Invalid global id {:?}: not base64", id),
            GlobalIdError::InvalidUtf8(id) => write!(f, "Invalid global id {:?}: not UTF-8", id),
            GlobalIdError::MissingSeparator(id) => {
                write!(f, "Invalid global id {:?}: missing type separator", id)
            }
            GlobalIdError::EmptyTypeName(id) => write!(f, "Invalid global id {:?}: empty type name", id),
        }
    }
}

impl std::error::Error for GlobalIdError {}

// ============================================================================
// GLOBAL ID
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GlobalId {
    type_name: String,
    local_id: String,
}

impl GlobalId {
    pub fn new(type_name: impl Into<String>, local_id: impl Into<String>) -> Self {
        GlobalId {
            type_name: type_name.into(),
            local_id: local_id.into(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Encode to the opaque client-facing form
    pub fn encode(&self) -> String {
        STANDARD.encode(format!("{}{}{}", self.type_name, SEPARATOR, self.local_id))
    }

    /// Decode an opaque global id, rejecting anything malformed
    pub fn decode(global_id: &str) -> Result<Self, GlobalIdError> {
        let bytes = STANDARD
            .decode(global_id)
            .map_err(|_| GlobalIdError::InvalidBase64(global_id.to_string()))?;
        let text = String::from_utf8(bytes).map_err(|_| GlobalIdError::InvalidUtf8(global_id.to_string()))?;

        let (type_name, local_id) = text
            .split_once(SEPARATOR)
            .ok_or_else(|| GlobalIdError::MissingSeparator(global_id.to_string()))?;

        if type_name.is_empty() {
            return Err(GlobalIdError::EmptyTypeName(global_id.to_string()));
        }

        Ok(GlobalId::new(type_name, local_id))
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for GlobalId {
    type Err = GlobalIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GlobalId::decode(s)
    }
}

/// Shorthand for `GlobalId::new(type_name, local_id).encode()`
pub fn to_global_id(type_name: &str, local_id: &str) -> String {
    GlobalId::new(type_name, local_id).encode()
}
