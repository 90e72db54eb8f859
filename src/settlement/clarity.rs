//! Clarity value consensus serialization
//!
//! Settlement contract calls carry their arguments as Clarity values in the
//! SIP-005 consensus wire format: a one-byte type prefix followed by the
//! type-specific body. Only the value types the settlement contract needs
//! are implemented (uint, bool, buff, standard principal, tuple).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::channel::participant::StacksAddress;
use crate::errors::SettlementError;

// SIP-005 type prefixes
const PREFIX_UINT: u8 = 0x01;
const PREFIX_BUFFER: u8 = 0x02;
const PREFIX_BOOL_TRUE: u8 = 0x03;
const PREFIX_BOOL_FALSE: u8 = 0x04;
const PREFIX_PRINCIPAL_STANDARD: u8 = 0x05;
const PREFIX_TUPLE: u8 = 0x0c;

/// Maximum length of a Clarity buffer value in bytes (1 MB)
pub const CLARITY_MAX_BUFFER_LEN: usize = 1_048_576;

/// Maximum length of a Clarity name in bytes
pub const CLARITY_MAX_NAME_LEN: usize = 128;

/// A validated Clarity identifier (contract name, function name, tuple key)
///
/// Names start with a letter and continue with letters, digits, or one of
/// `- _ ? !`, at most 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ClarityName(String);

impl ClarityName {
    /// Validates and wraps a Clarity name
    ///
    /// # Returns
    /// * `Ok(ClarityName)` - The name is well-formed
    /// * `Err(SettlementError::InvalidClarityName)` - Empty, too long, or bad characters
    pub fn new(name: &str) -> Result<Self, SettlementError> {
        if name.is_empty() || name.len() > CLARITY_MAX_NAME_LEN {
            return Err(SettlementError::InvalidClarityName(name.to_string()));
        }
        let mut chars = name.chars();
        let first = chars.next().ok_or_else(|| {
            SettlementError::InvalidClarityName(name.to_string())
        })?;
        if !first.is_ascii_alphabetic() {
            return Err(SettlementError::InvalidClarityName(name.to_string()));
        }
        if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '?' | '!')) {
            return Err(SettlementError::InvalidClarityName(name.to_string()));
        }
        Ok(Self(name.to_string()))
    }

    /// Returns the name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClarityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A Clarity value in the subset the settlement contract uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClarityValue {
    /// An unsigned 128-bit integer
    UInt(u128),
    /// A boolean
    Bool(bool),
    /// A byte buffer, at most [`CLARITY_MAX_BUFFER_LEN`] bytes
    Buffer(Vec<u8>),
    /// A standard (single-signature) principal
    PrincipalStandard(StacksAddress),
    /// A tuple of named values
    Tuple(Vec<(ClarityName, ClarityValue)>),
}

impl ClarityValue {
    /// Serializes the value in SIP-005 consensus wire format
    pub fn serialize(&self) -> Result<Vec<u8>, SettlementError> {
        let mut out = Vec::new();
        self.serialize_into(&mut out)?;
        Ok(out)
    }

    /// Serializes the value into an existing buffer
    ///
    /// Integers are big-endian. Tuple entries are sorted by key, matching
    /// the canonical ordering the consensus format requires.
    pub fn serialize_into(&self, out: &mut Vec<u8>) -> Result<(), SettlementError> {
        match self {
            ClarityValue::UInt(value) => {
                out.push(PREFIX_UINT);
                out.extend_from_slice(&value.to_be_bytes());
            }
            ClarityValue::Bool(true) => out.push(PREFIX_BOOL_TRUE),
            ClarityValue::Bool(false) => out.push(PREFIX_BOOL_FALSE),
            ClarityValue::Buffer(bytes) => {
                if bytes.len() > CLARITY_MAX_BUFFER_LEN {
                    return Err(SettlementError::BufferTooLarge {
                        size: bytes.len(),
                        max_size: CLARITY_MAX_BUFFER_LEN,
                    });
                }
                out.push(PREFIX_BUFFER);
                out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
                out.extend_from_slice(bytes);
            }
            ClarityValue::PrincipalStandard(address) => {
                out.push(PREFIX_PRINCIPAL_STANDARD);
                out.extend_from_slice(&address.to_bytes());
            }
            ClarityValue::Tuple(entries) => {
                out.push(PREFIX_TUPLE);
                out.extend_from_slice(&(entries.len() as u32).to_be_bytes());
                let mut sorted: Vec<&(ClarityName, ClarityValue)> = entries.iter().collect();
                sorted.sort_by(|a, b| a.0.cmp(&b.0));
                for pair in sorted.windows(2) {
                    if pair[0].0 == pair[1].0 {
                        return Err(SettlementError::DuplicateTupleKey(
                            pair[0].0.as_str().to_string(),
                        ));
                    }
                }
                for (name, value) in sorted {
                    out.push(name.as_str().len() as u8);
                    out.extend_from_slice(name.as_str().as_bytes());
                    value.serialize_into(out)?;
                }
            }
        }
        Ok(())
    }
}
