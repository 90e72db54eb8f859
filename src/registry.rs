//! Channel registry and registry-level hash accumulator
//!
//! This module provides functionality for tracking many channels under one
//! owner, aggregating their snapshots under a registry-level hash
//! accumulator with a replay-protection nonce.
//!
//! Empty registries (created via `new()` or `from_channels()` with an empty
//! input) have a zero commitment value.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::channel::snapshot::ChannelSnapshot;
use crate::errors::RegistryError;
use crate::types::{Bytes32, ChannelId, MAX_CHANNELS, REGISTRY_LEAF_DOMAIN};
use crate::utils::{compute_hash_chain, hash_tagged};

/// Type alias for a collection of channel snapshots
pub type Channels = BTreeMap<ChannelId, ChannelSnapshot>;

/// A registry aggregates channel snapshots under a single hash accumulator
/// and nonce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRegistry {
    /// Deterministic aggregation of snapshots by channel id
    pub channels: Channels,
    /// The registry commitment over all channels (hash chain)
    pub commitment: Bytes32,
    /// Monotonic counter for replay protection on registry updates
    pub nonce: u64,
}

impl Default for ChannelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelRegistry {
    /// Construct an empty registry
    ///
    /// An empty registry has no channels, a zero commitment hash, and a
    /// nonce of 0.
    pub fn new() -> Self {
        Self { channels: BTreeMap::new(), commitment: [0u8; 32], nonce: 0 }
    }

    /// Construct a registry from an initial set of channel snapshots
    pub fn from_channels(channels: Channels) -> Result<Self, RegistryError> {
        if channels.len() > MAX_CHANNELS {
            return Err(RegistryError::TooManyChannels {
                channel_count: channels.len(),
                max_channels: MAX_CHANNELS,
            });
        }
        let commitment = compute_registry_commitment(&channels);
        Ok(Self { channels, commitment, nonce: 0 })
    }

    /// Looks up a channel snapshot
    pub fn channel(&self, channel_id: ChannelId) -> Result<&ChannelSnapshot, RegistryError> {
        self.channels.get(&channel_id).ok_or(RegistryError::ChannelNotFound(channel_id))
    }
}

/// Deterministic registry-level commitment:
/// - Leaf = H(REGISTRY_LEAF_DOMAIN || channel_id || snapshot_commitment)
/// - Accumulate in ascending channel_id order via hash_chain starting from 0^32
pub fn compute_registry_commitment(channels: &Channels) -> Bytes32 {
    // Start from zero for empty registries.
    let mut accumulator: Bytes32 = [0u8; 32];
    for (channel_id, snapshot) in channels.iter() {
        let leaf = hash_tagged(REGISTRY_LEAF_DOMAIN, &[channel_id, &snapshot.commitment]);
        accumulator = compute_hash_chain(accumulator, &leaf);
    }
    accumulator
}

/// Inserts (or updates) a channel in the registry and returns a new registry.
/// Nonce advances by +1 and the registry commitment changes iff the channel
/// commitment changed.
pub fn insert_channel(
    old: &ChannelRegistry,
    channel_id: ChannelId,
    snapshot: ChannelSnapshot,
) -> Result<ChannelRegistry, RegistryError> {
    let mut channels = old.channels.clone();
    channels.insert(channel_id, snapshot);
    if channels.len() > MAX_CHANNELS {
        return Err(RegistryError::TooManyChannels {
            channel_count: channels.len(),
            max_channels: MAX_CHANNELS,
        });
    }
    let commitment = compute_registry_commitment(&channels);
    let nonce = old.nonce.checked_add(1).ok_or(RegistryError::RegistryNonceOverflow)?;
    Ok(ChannelRegistry { channels, commitment, nonce })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::state::Open;
    use crate::channel::test_utils::test_participants;

    fn snapshot_for(channel_id: ChannelId, balances: [u64; 2]) -> ChannelSnapshot {
        ChannelSnapshot::of_open(channel_id, &Open::new(test_participants(), balances))
    }

    #[test]
    fn test_empty_registry() {
        let registry = ChannelRegistry::new();

        assert!(registry.channels.is_empty());
        assert_eq!(registry.commitment, [0u8; 32]);
        assert_eq!(registry.nonce, 0);

        let from_empty = ChannelRegistry::from_channels(BTreeMap::new()).expect("valid");
        assert_eq!(from_empty, registry);
    }

    #[test]
    fn test_insert_channel() {
        let channel_id = [1u8; 32];
        let registry = ChannelRegistry::new();

        let registry =
            insert_channel(&registry, channel_id, snapshot_for(channel_id, [100, 50]))
                .expect("valid");

        assert_eq!(registry.channels.len(), 1);
        assert_eq!(registry.nonce, 1);
        assert_ne!(registry.commitment, [0u8; 32]);

        // Re-inserting the same snapshot advances the nonce but not the commitment
        let commitment = registry.commitment;
        let registry =
            insert_channel(&registry, channel_id, snapshot_for(channel_id, [100, 50]))
                .expect("valid");
        assert_eq!(registry.nonce, 2);
        assert_eq!(registry.commitment, commitment);

        // Updating the snapshot changes the commitment
        let registry =
            insert_channel(&registry, channel_id, snapshot_for(channel_id, [90, 60]))
                .expect("valid");
        assert_ne!(registry.commitment, commitment);
    }

    #[test]
    fn test_commitment_is_order_independent() {
        let id_a = [1u8; 32];
        let id_b = [2u8; 32];
        let snap_a = snapshot_for(id_a, [100, 50]);
        let snap_b = snapshot_for(id_b, [30, 70]);

        let forward = {
            let registry = insert_channel(&ChannelRegistry::new(), id_a, snap_a).expect("valid");
            insert_channel(&registry, id_b, snap_b).expect("valid")
        };
        let reverse = {
            let registry = insert_channel(&ChannelRegistry::new(), id_b, snap_b).expect("valid");
            insert_channel(&registry, id_a, snap_a).expect("valid")
        };

        // BTreeMap iteration order makes the accumulator insertion-order independent
        assert_eq!(forward.commitment, reverse.commitment);
    }

    #[test]
    fn test_channel_lookup() {
        let channel_id = [1u8; 32];
        let snapshot = snapshot_for(channel_id, [100, 50]);
        let registry = insert_channel(&ChannelRegistry::new(), channel_id, snapshot)
            .expect("valid");

        assert_eq!(registry.channel(channel_id).expect("present"), &snapshot);
        assert!(matches!(
            registry.channel([9u8; 32]),
            Err(RegistryError::ChannelNotFound(_))
        ));
    }

    #[test]
    fn test_capacity_limit() {
        let mut registry = ChannelRegistry::new();
        for i in 0..MAX_CHANNELS {
            let channel_id = [i as u8; 32];
            registry = insert_channel(&registry, channel_id, snapshot_for(channel_id, [1, 1]))
                .expect("within capacity");
        }

        let overflow_id = [0xffu8; 32];
        assert!(matches!(
            insert_channel(&registry, overflow_id, snapshot_for(overflow_id, [1, 1])),
            Err(RegistryError::TooManyChannels {
                channel_count,
                max_channels: MAX_CHANNELS,
            }) if channel_count == MAX_CHANNELS + 1
        ));
    }
}
