//! Error type shared by every board operation.

use thiserror::Error;

use crate::board::Position;
use crate::catalog::CatalogIssue;
use crate::probes::ProbeId;

/// Contract violations raised by the board logic.
///
/// Expected absences (an unknown object id, a void cell) are reported as
/// `Option::None` by the lookups themselves and never reach this enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("sector {0} is outside 1..=8")]
    SectorOutOfRange(u8),

    #[error("unknown disk '{0}' (expected A-E)")]
    UnknownDisk(char),

    #[error("level {0} is outside 0..=3")]
    LevelOutOfRange(u8),

    #[error("rotation of {0} degrees is not a multiple of 45")]
    MisalignedRotation(i32),

    #[error("cannot parse cell key {0:?}")]
    BadCellKey(String),

    #[error("no probe with id {0}")]
    UnknownProbe(ProbeId),

    #[error("probe stored under key {key} carries id {id}")]
    ProbeIdMismatch { key: ProbeId, id: ProbeId },

    #[error("no probe ids left to assign")]
    ProbeIdsExhausted,

    #[error("{to} is not reachable from {from} with {energy} energy")]
    Unreachable {
        from: Position,
        to: Position,
        energy: u32,
    },

    #[error("invalid board catalog ({} issue(s)): {}", .0.len(), first_issue(.0))]
    InvalidCatalog(Vec<CatalogIssue>),
}

fn first_issue(issues: &[CatalogIssue]) -> String {
    issues
        .first()
        .map(|i| i.to_string())
        .unwrap_or_default()
}
