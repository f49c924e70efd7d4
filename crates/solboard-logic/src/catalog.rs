//! Board catalog: every object printed on the fixed board or a platform.
//!
//! Object positions are stored in the unrotated frame of the level they sit
//! on, so rotating a platform never rewrites the catalog. A level *covers*
//! a disk when it defines all eight sectors of that ring; `hollow` entries
//! mark cut-outs in a platform and `empty` entries mark plain cells.
//!
//! # Usage
//!
//! ```
//! use solboard_logic::board::{Disk, Level, Sector};
//! use solboard_logic::catalog::{CatalogBuilder, ObjectType};
//!
//! let catalog = CatalogBuilder::new()
//!     .ring(Level::ONE, Disk::A)
//!     .hollow(Level::ONE, Disk::A, 4)
//!     .build()
//!     .unwrap();
//! let cell = catalog.lookup(Level::ONE, Disk::A, Sector::new(4).unwrap()).unwrap();
//! assert_eq!(cell.kind, ObjectType::Hollow);
//! ```

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Disk, Level, Position, Sector};
use crate::error::BoardError;

/// What occupies a catalog cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectType {
    Planet,
    Comet,
    Asteroid,
    /// Cut-out: no cell exists here on this level.
    Hollow,
    /// A plain traversable cell with nothing named on it.
    Empty,
}

impl ObjectType {
    /// Whether a probe can stand on a cell of this type.
    pub fn is_physical(self) -> bool {
        self != ObjectType::Hollow
    }

    /// Named objects are the ones worth showing to a player.
    pub fn is_named(self) -> bool {
        !matches!(self, ObjectType::Hollow | ObjectType::Empty)
    }
}

/// An entry of the catalog, positioned in its own level's unrotated frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelestialObject {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ObjectType,
    pub level: Level,
    pub position: Position,
}

/// A problem found while validating catalog entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogIssue {
    /// Two entries share an id.
    DuplicateId(String),
    /// Two entries claim the same cell of the same level.
    Overlap {
        level: Level,
        position: Position,
        first: String,
        second: String,
    },
    /// A rotating level placed an entry on a fixed disk.
    RotatingFixedDisk { id: String, level: Level, disk: Disk },
    /// A level defines some but not all sectors of a disk.
    IncompleteRing {
        level: Level,
        disk: Disk,
        missing: Vec<Sector>,
    },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogIssue::DuplicateId(id) => write!(f, "duplicate id {:?}", id),
            CatalogIssue::Overlap {
                level,
                position,
                first,
                second,
            } => write!(
                f,
                "{:?} and {:?} both occupy {} on {}",
                first, second, position, level
            ),
            CatalogIssue::RotatingFixedDisk { id, level, disk } => write!(
                f,
                "{:?} is on fixed disk {} but belongs to rotating {}",
                id, disk, level
            ),
            CatalogIssue::IncompleteRing {
                level,
                disk,
                missing,
            } => {
                let missing: Vec<String> = missing.iter().map(|s| s.to_string()).collect();
                write!(
                    f,
                    "ring {} on {} is missing sector(s) {}",
                    disk,
                    level,
                    missing.join(", ")
                )
            }
        }
    }
}

/// Check a list of entries, returning every problem found.
pub fn validate_objects(objects: &[CelestialObject]) -> Vec<CatalogIssue> {
    let mut issues = Vec::new();

    let mut ids: HashMap<&str, usize> = HashMap::new();
    for obj in objects {
        let seen = ids.entry(obj.id.as_str()).or_insert(0);
        *seen += 1;
        if *seen == 2 {
            issues.push(CatalogIssue::DuplicateId(obj.id.clone()));
        }
    }

    let mut cells: BTreeMap<(Level, Position), &str> = BTreeMap::new();
    let mut rings: BTreeMap<(Level, Disk), BTreeSet<Sector>> = BTreeMap::new();
    for obj in objects {
        if !obj.level.is_fixed() && obj.position.disk.is_fixed() {
            issues.push(CatalogIssue::RotatingFixedDisk {
                id: obj.id.clone(),
                level: obj.level,
                disk: obj.position.disk,
            });
        }
        if let Some(first) = cells.insert((obj.level, obj.position), obj.id.as_str()) {
            issues.push(CatalogIssue::Overlap {
                level: obj.level,
                position: obj.position,
                first: first.to_string(),
                second: obj.id.clone(),
            });
        }
        rings
            .entry((obj.level, obj.position.disk))
            .or_default()
            .insert(obj.position.sector);
    }

    for ((level, disk), sectors) in rings {
        let missing: Vec<Sector> = Sector::all().filter(|s| !sectors.contains(s)).collect();
        if !missing.is_empty() {
            issues.push(CatalogIssue::IncompleteRing {
                level,
                disk,
                missing,
            });
        }
    }

    issues
}

/// Serde-facing board configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardDefinition {
    pub objects: Vec<CelestialObject>,
}

/// Validated, immutable catalog of board entries.
#[derive(Debug, Clone)]
pub struct Catalog {
    objects: Vec<CelestialObject>,
    by_id: HashMap<String, usize>,
    cells: BTreeMap<(Level, Position), usize>,
}

impl Catalog {
    /// Build a catalog, refusing entries that fail [`validate_objects`].
    pub fn new(objects: Vec<CelestialObject>) -> Result<Self, BoardError> {
        let issues = validate_objects(&objects);
        if !issues.is_empty() {
            return Err(BoardError::InvalidCatalog(issues));
        }
        let by_id = objects
            .iter()
            .enumerate()
            .map(|(i, o)| (o.id.clone(), i))
            .collect();
        let cells = objects
            .iter()
            .enumerate()
            .map(|(i, o)| ((o.level, o.position), i))
            .collect();
        Ok(Self {
            objects,
            by_id,
            cells,
        })
    }

    pub fn from_definition(definition: BoardDefinition) -> Result<Self, BoardError> {
        Self::new(definition.objects)
    }

    pub fn to_definition(&self) -> BoardDefinition {
        BoardDefinition {
            objects: self.objects.clone(),
        }
    }

    /// The entry at `relative` sector of `disk` on `level`, if that level covers the disk.
    pub fn lookup(&self, level: Level, disk: Disk, relative: Sector) -> Option<&CelestialObject> {
        self.cells
            .get(&(level, Position::new(disk, relative)))
            .map(|&i| &self.objects[i])
    }

    pub fn get(&self, id: &str) -> Option<&CelestialObject> {
        self.by_id.get(id).map(|&i| &self.objects[i])
    }

    /// Whether `level` defines the ring of `disk`.
    pub fn covers(&self, level: Level, disk: Disk) -> bool {
        // Rings are complete after validation, so sector 1 stands for the ring.
        self.cells
            .contains_key(&(level, Position::new(disk, Sector::ONE)))
    }

    /// Levels covering `disk`, topmost first.
    pub fn levels_covering(&self, disk: Disk) -> impl Iterator<Item = Level> + '_ {
        Level::TOP_DOWN
            .into_iter()
            .filter(move |&level| self.covers(level, disk))
    }

    /// Number of non-hollow cells `level` contributes to `disk`.
    pub fn cell_count(&self, level: Level, disk: Disk) -> usize {
        Sector::all()
            .filter_map(|s| self.lookup(level, disk, s))
            .filter(|o| o.kind.is_physical())
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CelestialObject> {
        self.objects.iter()
    }

    /// Planets, comets and asteroid fields, skipping placeholders.
    pub fn named_objects(&self) -> impl Iterator<Item = &CelestialObject> {
        self.objects.iter().filter(|o| o.kind.is_named())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The built-in solar board.
    ///
    /// Level 0 carries the outer planets on disks D and E. Level 1 spans
    /// disks A..C, level 2 spans A..B and the small level 3 platform spans
    /// only A; each platform has cut-outs that expose the one beneath.
    pub fn standard() -> Self {
        let mut builder = CatalogBuilder::new();
        for &(level, disk) in STANDARD_RINGS {
            builder = builder.ring(level, disk);
        }
        for &(level, disk, sector) in STANDARD_HOLLOWS {
            builder = builder.hollow(level, disk, sector);
        }
        for &(id, name, kind, level, disk, sector) in STANDARD_OBJECTS {
            builder = builder.object(id, name, kind, level, disk, sector);
        }
        builder
            .build()
            .expect("standard board definition is valid")
    }
}

const STANDARD_RINGS: &[(Level, Disk)] = &[
    (Level::FIXED, Disk::D),
    (Level::FIXED, Disk::E),
    (Level::ONE, Disk::A),
    (Level::ONE, Disk::B),
    (Level::ONE, Disk::C),
    (Level::TWO, Disk::A),
    (Level::TWO, Disk::B),
    (Level::THREE, Disk::A),
];

const STANDARD_HOLLOWS: &[(Level, Disk, u8)] = &[
    (Level::ONE, Disk::A, 3),
    (Level::ONE, Disk::A, 7),
    (Level::ONE, Disk::B, 2),
    (Level::ONE, Disk::B, 6),
    (Level::ONE, Disk::C, 7),
    (Level::TWO, Disk::A, 1),
    (Level::TWO, Disk::A, 3),
    (Level::TWO, Disk::A, 5),
    (Level::TWO, Disk::A, 7),
    (Level::TWO, Disk::B, 3),
    (Level::TWO, Disk::B, 5),
    (Level::THREE, Disk::A, 2),
    (Level::THREE, Disk::A, 4),
    (Level::THREE, Disk::A, 6),
    (Level::THREE, Disk::A, 8),
];

#[rustfmt::skip]
const STANDARD_OBJECTS: &[(&str, &str, ObjectType, Level, Disk, u8)] = &[
    // Fixed board
    ("jupiter",         "Jupiter",              ObjectType::Planet,   Level::FIXED, Disk::D, 2),
    ("asteroids-outer", "Outer Asteroid Field", ObjectType::Asteroid, Level::FIXED, Disk::D, 4),
    ("saturn",          "Saturn",               ObjectType::Planet,   Level::FIXED, Disk::D, 6),
    ("kuiper-comet",    "Kuiper Comet",         ObjectType::Comet,    Level::FIXED, Disk::E, 1),
    ("uranus",          "Uranus",               ObjectType::Planet,   Level::FIXED, Disk::E, 3),
    ("neptune",         "Neptune",              ObjectType::Planet,   Level::FIXED, Disk::E, 7),
    // Level 1
    ("earth",           "Earth",                ObjectType::Planet,   Level::ONE,   Disk::C, 1),
    ("encke",           "Comet Encke",          ObjectType::Comet,    Level::ONE,   Disk::C, 3),
    ("mars",            "Mars",                 ObjectType::Planet,   Level::ONE,   Disk::C, 5),
    ("asteroids-main",  "Main Asteroid Belt",   ObjectType::Asteroid, Level::ONE,   Disk::B, 4),
    // Level 2
    ("venus",           "Venus",                ObjectType::Planet,   Level::TWO,   Disk::B, 1),
    ("halley",          "Comet Halley",         ObjectType::Comet,    Level::TWO,   Disk::B, 7),
    // Level 3
    ("mercury",         "Mercury",              ObjectType::Planet,   Level::THREE, Disk::A, 3),
    ("asteroids-inner", "Inner Asteroid Swarm", ObjectType::Asteroid, Level::THREE, Disk::A, 7),
];

/// Assembles a catalog in code.
///
/// Entries given through [`object`](Self::object) and
/// [`hollow`](Self::hollow) win over the `empty` placeholders that
/// [`ring`](Self::ring) generates for the rest of the disk.
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    rings: Vec<(Level, Disk)>,
    objects: Vec<CelestialObject>,
    errors: Vec<BoardError>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare that `level` covers every sector of `disk`.
    pub fn ring(mut self, level: Level, disk: Disk) -> Self {
        if !self.rings.contains(&(level, disk)) {
            self.rings.push((level, disk));
        }
        self
    }

    pub fn object(
        mut self,
        id: &str,
        name: &str,
        kind: ObjectType,
        level: Level,
        disk: Disk,
        sector: u8,
    ) -> Self {
        match Position::from_parts(disk, sector) {
            Ok(position) => self.objects.push(CelestialObject {
                id: id.to_string(),
                name: name.to_string(),
                kind,
                level,
                position,
            }),
            Err(e) => self.errors.push(e),
        }
        self
    }

    /// Cut a hole in `level` at `disk`/`sector`.
    pub fn hollow(self, level: Level, disk: Disk, sector: u8) -> Self {
        let id = placeholder_id("hollow", level, disk, sector);
        self.object(&id, "Hollow", ObjectType::Hollow, level, disk, sector)
    }

    pub fn build(mut self) -> Result<Catalog, BoardError> {
        if let Some(e) = self.errors.into_iter().next() {
            return Err(e);
        }
        let placed: BTreeSet<(Level, Position)> =
            self.objects.iter().map(|o| (o.level, o.position)).collect();
        for &(level, disk) in &self.rings {
            for sector in Sector::all() {
                if placed.contains(&(level, Position::new(disk, sector))) {
                    continue;
                }
                self.objects.push(CelestialObject {
                    id: placeholder_id("empty", level, disk, sector.number()),
                    name: "Empty".to_string(),
                    kind: ObjectType::Empty,
                    level,
                    position: Position::new(disk, sector),
                });
            }
        }
        Catalog::new(self.objects)
    }
}

fn placeholder_id(prefix: &str, level: Level, disk: Disk, sector: u8) -> String {
    format!("{}-{}-{}{}", prefix, level.number(), disk, sector)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(n: u8) -> Sector {
        Sector::new(n).unwrap()
    }

    fn entry(id: &str, kind: ObjectType, level: Level, disk: Disk, sector: u8) -> CelestialObject {
        CelestialObject {
            id: id.to_string(),
            name: id.to_string(),
            kind,
            level,
            position: Position::from_parts(disk, sector).unwrap(),
        }
    }

    #[test]
    fn standard_board_is_complete() {
        let catalog = Catalog::standard();
        // 2 fixed rings + 3 + 2 + 1 platform rings, 8 cells each
        assert_eq!(catalog.len(), 8 * 8);
        assert!(catalog.covers(Level::THREE, Disk::A));
        assert!(!catalog.covers(Level::THREE, Disk::B));
        assert!(!catalog.covers(Level::FIXED, Disk::A));
        assert_eq!(catalog.named_objects().count(), 14);
    }

    #[test]
    fn levels_covering_is_top_down() {
        let catalog = Catalog::standard();
        let levels: Vec<_> = catalog.levels_covering(Disk::A).collect();
        assert_eq!(levels, vec![Level::THREE, Level::TWO, Level::ONE]);
        let levels: Vec<_> = catalog.levels_covering(Disk::E).collect();
        assert_eq!(levels, vec![Level::FIXED]);
    }

    #[test]
    fn lookup_distinguishes_hollow_from_empty() {
        let catalog = Catalog::standard();
        let hole = catalog.lookup(Level::THREE, Disk::A, s(2)).unwrap();
        assert_eq!(hole.kind, ObjectType::Hollow);
        let plain = catalog.lookup(Level::THREE, Disk::A, s(1)).unwrap();
        assert_eq!(plain.kind, ObjectType::Empty);
        assert!(catalog.lookup(Level::THREE, Disk::B, s(1)).is_none());
        assert_eq!(catalog.cell_count(Level::THREE, Disk::A), 4);
        assert_eq!(catalog.cell_count(Level::ONE, Disk::C), 7);
    }

    #[test]
    fn get_by_id() {
        let catalog = Catalog::standard();
        let venus = catalog.get("venus").unwrap();
        assert_eq!(venus.level, Level::TWO);
        assert_eq!(venus.position.to_string(), "B1");
        assert!(catalog.get("pluto").is_none());
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let objects = vec![
            entry("x", ObjectType::Planet, Level::FIXED, Disk::D, 1),
            entry("x", ObjectType::Planet, Level::FIXED, Disk::E, 1),
        ];
        let issues = validate_objects(&objects);
        assert!(issues.contains(&CatalogIssue::DuplicateId("x".into())));
    }

    #[test]
    fn overlaps_are_reported() {
        let result = CatalogBuilder::new()
            .ring(Level::FIXED, Disk::D)
            .object("a", "A", ObjectType::Planet, Level::FIXED, Disk::D, 1)
            .object("b", "B", ObjectType::Comet, Level::FIXED, Disk::D, 1)
            .build();
        match result {
            Err(BoardError::InvalidCatalog(issues)) => {
                assert!(matches!(issues[0], CatalogIssue::Overlap { .. }));
            }
            other => panic!("expected overlap, got {other:?}"),
        }
    }

    #[test]
    fn partial_rings_are_reported() {
        let objects = vec![entry("lonely", ObjectType::Planet, Level::ONE, Disk::B, 5)];
        let issues = validate_objects(&objects);
        assert_eq!(issues.len(), 1);
        match &issues[0] {
            CatalogIssue::IncompleteRing { missing, .. } => assert_eq!(missing.len(), 7),
            other => panic!("unexpected issue {other:?}"),
        }
    }

    #[test]
    fn rotating_entries_on_fixed_disks_are_reported() {
        let result = CatalogBuilder::new().ring(Level::TWO, Disk::E).build();
        let err = result.unwrap_err();
        assert!(err.to_string().contains("fixed disk E"));
    }

    #[test]
    fn builder_rejects_bad_sector() {
        let result = CatalogBuilder::new()
            .hollow(Level::ONE, Disk::A, 9)
            .build();
        assert_eq!(result.unwrap_err(), BoardError::SectorOutOfRange(9));
    }

    #[test]
    fn definition_round_trips_through_json() {
        let catalog = Catalog::standard();
        let json = serde_json::to_string(&catalog.to_definition()).unwrap();
        assert!(json.contains(r#""type":"planet""#));
        let definition: BoardDefinition = serde_json::from_str(&json).unwrap();
        let reloaded = Catalog::from_definition(definition).unwrap();
        assert_eq!(reloaded.len(), catalog.len());
        assert_eq!(reloaded.get("mars"), catalog.get("mars"));
    }
}
