//! Translation between platform frames and the absolute board frame.
//!
//! A platform turned by `r` degrees moves everything on it `r / 45`
//! sectors clockwise, so relative sector `s` shows up at absolute sector
//! `s + r / 45` (mod 8). Looking up what sits under an absolute cell runs
//! the same arithmetic backwards before consulting the [`Catalog`].

use serde::Serialize;

use crate::board::{Disk, Level, Position, Sector, SECTOR_COUNT, SECTOR_DEGREES};
use crate::catalog::{Catalog, CelestialObject};
use crate::error::BoardError;
use crate::rotation::RotationState;

fn rotation_steps(degrees: i32) -> Result<i32, BoardError> {
    if degrees % SECTOR_DEGREES != 0 {
        return Err(BoardError::MisalignedRotation(degrees));
    }
    Ok((degrees / SECTOR_DEGREES).rem_euclid(SECTOR_COUNT as i32))
}

/// Absolute sector of relative `sector` on a platform turned by `degrees`.
pub fn relative_to_absolute(sector: Sector, degrees: i32) -> Result<Sector, BoardError> {
    Ok(sector.offset(rotation_steps(degrees)?))
}

/// Relative sector found under absolute `sector` on a platform turned by `degrees`.
pub fn absolute_to_relative(sector: Sector, degrees: i32) -> Result<Sector, BoardError> {
    Ok(sector.offset(-rotation_steps(degrees)?))
}

/// Current absolute position of a platform-relative position on `level`.
pub fn to_absolute(relative: Position, level: Level, rotation: &RotationState) -> Position {
    let sector = relative.sector.offset(rotation.total_steps(level));
    Position::new(relative.disk, sector)
}

/// Platform-relative position on `level` currently lying under `absolute`.
pub fn to_relative(absolute: Position, level: Level, rotation: &RotationState) -> Position {
    let sector = absolute.sector.offset(-rotation.total_steps(level));
    Position::new(absolute.disk, sector)
}

/// Where catalog object `id` currently sits, or `None` for an unknown id.
pub fn locate(catalog: &Catalog, id: &str, rotation: &RotationState) -> Option<Position> {
    catalog
        .get(id)
        .map(|obj| to_absolute(obj.position, obj.level, rotation))
}

/// The entry visible at an absolute cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedCell<'a> {
    pub position: Position,
    /// Level the visible entry belongs to.
    pub level: Level,
    /// Sector of the entry in its level's own frame.
    pub relative: Sector,
    pub object: &'a CelestialObject,
}

/// Resolve what is visible at `position` under the current rotation.
///
/// Platforms covering the disk are checked from the top down; a hollow
/// entry exposes the next level beneath. Returns `None` when no level has
/// a physical cell there, i.e. the cell is void.
pub fn cell_at<'a>(
    catalog: &'a Catalog,
    position: Position,
    rotation: &RotationState,
) -> Option<ResolvedCell<'a>> {
    catalog.levels_covering(position.disk).find_map(|level| {
        let relative = to_relative(position, level, rotation).sector;
        catalog
            .lookup(level, position.disk, relative)
            .filter(|obj| obj.kind.is_physical())
            .map(|object| ResolvedCell {
                position,
                level,
                relative,
                object,
            })
    })
}

/// Whether a probe may stand on `position` under the current rotation.
pub fn is_open(catalog: &Catalog, position: Position, rotation: &RotationState) -> bool {
    cell_at(catalog, position, rotation).is_some()
}

/// Every absolute cell in A1..E8 order with its visible entry, `None` when void.
pub fn snapshot<'a>(
    catalog: &'a Catalog,
    rotation: &RotationState,
) -> Vec<(Position, Option<ResolvedCell<'a>>)> {
    Position::all()
        .map(|p| (p, cell_at(catalog, p, rotation)))
        .collect()
}

/// Number of open cells on `disk` under the current rotation.
pub fn open_cells(catalog: &Catalog, disk: Disk, rotation: &RotationState) -> usize {
    Sector::all()
        .filter(|&s| is_open(catalog, Position::new(disk, s), rotation))
        .count()
}
