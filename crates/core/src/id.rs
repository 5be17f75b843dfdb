//! Strongly-typed wallet identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::WalletError;

/// Identifier of a wallet (globally unique, 128-bit UUID).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletId(Uuid);

impl WalletId {
    /// Create a new identifier.
    ///
    /// Uses UUIDv7 (time-ordered). Prefer passing IDs explicitly in tests
    /// for determinism.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// The all-zero identifier. Never provisioned.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for WalletId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for WalletId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<Uuid> for WalletId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<WalletId> for Uuid {
    fn from(value: WalletId) -> Self {
        value.0
    }
}

impl FromStr for WalletId {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let uuid = Uuid::from_str(s.trim())
            .map_err(|e| WalletError::invalid_id(format!("WalletId: {e}")))?;
        Ok(Self(uuid))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_uuid() {
        let id: WalletId = "00000000-0000-0000-0000-000000000000".parse().unwrap();
        assert_eq!(id, WalletId::nil());
    }

    #[test]
    fn rejects_garbage() {
        let err = "not-a-uuid".parse::<WalletId>().unwrap_err();
        assert!(matches!(err, WalletError::InvalidId(_)));
    }

    #[test]
    fn display_round_trips_through_from_str() {
        let id = WalletId::new();
        let parsed: WalletId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }
}
