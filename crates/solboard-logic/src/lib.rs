//! Pure board logic for the rotating solar board.
//!
//! Five concentric disks of eight sectors, with the inner disks mounted on
//! three nested rotating platforms. This crate answers where catalog
//! objects currently sit and where a probe can move with a given amount of
//! energy. Everything is plain data in, plain data out: rendering, timing
//! and turn rules belong to the caller.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`board`] | Disks, sectors, platform levels, cell positions |
//! | [`catalog`] | Board objects per level, hollow cut-outs, validation |
//! | [`rotation`] | Platform angles and the carry-along rule |
//! | [`resolver`] | Relative/absolute sector mapping, visible cell lookup |
//! | [`reachability`] | Energy-bounded BFS over the current board |
//! | [`probes`] | Probe ownership and positions |
//! | [`game`] | `SolarBoard` facade owning one game's board state |
//! | [`error`] | `BoardError` |

pub mod board;
pub mod catalog;
pub mod error;
pub mod game;
pub mod probes;
pub mod reachability;
pub mod resolver;
pub mod rotation;

pub use board::{Disk, Level, Position, Sector};
pub use catalog::{Catalog, CatalogBuilder, CelestialObject, ObjectType};
pub use error::BoardError;
pub use game::SolarBoard;
pub use reachability::{ReachabilityEntry, ReachabilityMap};
pub use rotation::{Direction, RotationState};
