//! Probe registry: who owns which probe and where it stands.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board::Position;
use crate::error::BoardError;

pub type ProbeId = u32;
pub type PlayerId = u32;

/// A player's probe on the solar board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Probe {
    pub id: ProbeId,
    pub owner: PlayerId,
    /// Absolute board cell.
    pub position: Position,
}

/// Every probe currently on the board.
///
/// Ids are handed out once and never reused. A loaded registry has every
/// probe keyed by its own id and a `next_id` above all of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRegistry", into = "StoredRegistry")]
pub struct ProbeRegistry {
    probes: BTreeMap<ProbeId, Probe>,
    next_id: ProbeId,
}

/// Plain serialized form of [`ProbeRegistry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRegistry {
    probes: BTreeMap<ProbeId, Probe>,
    next_id: ProbeId,
}

impl TryFrom<StoredRegistry> for ProbeRegistry {
    type Error = BoardError;

    fn try_from(stored: StoredRegistry) -> Result<Self, Self::Error> {
        if let Some((&key, probe)) = stored.probes.iter().find(|(k, p)| **k != p.id) {
            return Err(BoardError::ProbeIdMismatch { key, id: probe.id });
        }
        let mut next_id = stored.next_id;
        if let Some(&max_id) = stored.probes.keys().next_back() {
            let above = max_id.checked_add(1).ok_or(BoardError::ProbeIdsExhausted)?;
            if above > next_id {
                log::warn!("saved next probe id {} raised to {}", next_id, above);
                next_id = above;
            }
        }
        Ok(Self {
            probes: stored.probes,
            next_id,
        })
    }
}

impl From<ProbeRegistry> for StoredRegistry {
    fn from(registry: ProbeRegistry) -> Self {
        Self {
            probes: registry.probes,
            next_id: registry.next_id,
        }
    }
}

impl ProbeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a new probe for `owner` on `position` and return its id.
    ///
    /// Fails with [`BoardError::ProbeIdsExhausted`] once every id below
    /// `ProbeId::MAX` has been handed out.
    pub fn deploy(&mut self, owner: PlayerId, position: Position) -> Result<ProbeId, BoardError> {
        let id = self.next_id;
        self.next_id = id.checked_add(1).ok_or(BoardError::ProbeIdsExhausted)?;
        self.probes.insert(
            id,
            Probe {
                id,
                owner,
                position,
            },
        );
        log::info!("player {} deployed probe {} at {}", owner, id, position);
        Ok(id)
    }

    pub fn get(&self, id: ProbeId) -> Option<&Probe> {
        self.probes.get(&id)
    }

    /// Set a probe's position. Energy and reachability are the caller's concern.
    pub fn move_probe(&mut self, id: ProbeId, to: Position) -> Result<(), BoardError> {
        let probe = self.probes.get_mut(&id).ok_or(BoardError::UnknownProbe(id))?;
        log::info!("probe {} moved {} -> {}", id, probe.position, to);
        probe.position = to;
        Ok(())
    }

    pub fn remove(&mut self, id: ProbeId) -> Option<Probe> {
        self.probes.remove(&id)
    }

    /// All probes in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Probe> {
        self.probes.values()
    }

    pub fn owned_by(&self, owner: PlayerId) -> impl Iterator<Item = &Probe> {
        self.probes.values().filter(move |p| p.owner == owner)
    }

    /// Probes standing on `position`; several may share a cell.
    pub fn at(&self, position: Position) -> impl Iterator<Item = &Probe> {
        self.probes.values().filter(move |p| p.position == position)
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}
