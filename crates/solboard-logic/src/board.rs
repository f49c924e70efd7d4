//! Board coordinates: disks, sectors, platform levels and cell positions.
//!
//! The board is five concentric disks (A innermost, E outermost) cut into
//! eight angular sectors. Sector numbers are absolute: they never rotate.
//! Disks A..C may sit on rotating platforms; D and E are printed on the
//! fixed board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BoardError;

/// Number of angular sectors on every disk.
pub const SECTOR_COUNT: u8 = 8;

/// Degrees covered by one sector.
pub const SECTOR_DEGREES: i32 = 45;

/// One of the five concentric rings, ordered from the center outward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Disk {
    A,
    B,
    C,
    D,
    E,
}

impl Disk {
    /// All disks, innermost first.
    pub const ALL: [Disk; 5] = [Disk::A, Disk::B, Disk::C, Disk::D, Disk::E];

    /// Zero-based distance band from the center.
    pub fn index(self) -> usize {
        self as usize
    }

    /// The disk one band closer to the center, if any.
    pub fn inner(self) -> Option<Disk> {
        self.index().checked_sub(1).map(|i| Disk::ALL[i])
    }

    /// The disk one band further from the center, if any.
    pub fn outer(self) -> Option<Disk> {
        Disk::ALL.get(self.index() + 1).copied()
    }

    /// Disks D and E are printed on the fixed board and never rotate.
    pub fn is_fixed(self) -> bool {
        matches!(self, Disk::D | Disk::E)
    }

    pub fn letter(self) -> char {
        match self {
            Disk::A => 'A',
            Disk::B => 'B',
            Disk::C => 'C',
            Disk::D => 'D',
            Disk::E => 'E',
        }
    }
}

impl TryFrom<char> for Disk {
    type Error = BoardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_uppercase() {
            'A' => Ok(Disk::A),
            'B' => Ok(Disk::B),
            'C' => Ok(Disk::C),
            'D' => Ok(Disk::D),
            'E' => Ok(Disk::E),
            _ => Err(BoardError::UnknownDisk(c)),
        }
    }
}

impl fmt::Display for Disk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// An angular sector, 1..=8, cyclic (8 is adjacent to 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Sector(u8);

impl Sector {
    pub const ONE: Sector = Sector(1);

    pub fn new(n: u8) -> Result<Self, BoardError> {
        if (1..=SECTOR_COUNT).contains(&n) {
            Ok(Sector(n))
        } else {
            Err(BoardError::SectorOutOfRange(n))
        }
    }

    /// All sectors in ascending order.
    pub fn all() -> impl Iterator<Item = Sector> {
        (1..=SECTOR_COUNT).map(Sector)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based index used for modular arithmetic.
    pub fn index(self) -> i32 {
        self.0 as i32 - 1
    }

    /// Sector reached after `steps` clockwise steps (negative goes back).
    pub fn offset(self, steps: i32) -> Sector {
        let idx = (self.index() + steps).rem_euclid(SECTOR_COUNT as i32);
        Sector(idx as u8 + 1)
    }

    pub fn next(self) -> Sector {
        self.offset(1)
    }

    pub fn prev(self) -> Sector {
        self.offset(-1)
    }
}

impl TryFrom<u8> for Sector {
    type Error = BoardError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Sector::new(n)
    }
}

impl From<Sector> for u8 {
    fn from(s: Sector) -> u8 {
        s.0
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Platform level: 0 is the fixed board, 1..=3 are nested rotating platforms.
///
/// Level 2 is mounted on level 1 and level 3 on level 2, so a higher level
/// is carried by every rotation below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

impl Level {
    pub const FIXED: Level = Level(0);
    pub const ONE: Level = Level(1);
    pub const TWO: Level = Level(2);
    pub const THREE: Level = Level(3);

    /// Rotating platforms, outermost (lowest) first.
    pub const ROTATING: [Level; 3] = [Level::ONE, Level::TWO, Level::THREE];

    /// Every level from the top platform down to the fixed board.
    pub const TOP_DOWN: [Level; 4] = [Level::THREE, Level::TWO, Level::ONE, Level::FIXED];

    pub fn new(n: u8) -> Result<Self, BoardError> {
        if n <= 3 {
            Ok(Level(n))
        } else {
            Err(BoardError::LevelOutOfRange(n))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn is_fixed(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Level {
    type Error = BoardError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        Level::new(n)
    }
}

impl From<Level> for u8 {
    fn from(l: Level) -> u8 {
        l.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// One cell of the board. Also serves as the cell key ("A1", "E8").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    pub disk: Disk,
    pub sector: Sector,
}

impl Position {
    pub const fn new(disk: Disk, sector: Sector) -> Self {
        Self { disk, sector }
    }

    /// Build from raw parts, validating the sector.
    pub fn from_parts(disk: Disk, sector: u8) -> Result<Self, BoardError> {
        Ok(Self::new(disk, Sector::new(sector)?))
    }

    /// Every cell on the board, A1..A8 through E1..E8.
    pub fn all() -> impl Iterator<Item = Position> {
        Disk::ALL
            .into_iter()
            .flat_map(|d| Sector::all().map(move |s| Position::new(d, s)))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.disk, self.sector)
    }
}

impl FromStr for Position {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || BoardError::BadCellKey(s.to_string());
        // Exactly a disk letter followed by one digit.
        let mut chars = s.chars();
        let (disk, digit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(disk), Some(digit), None) => (disk, digit),
            _ => return Err(bad()),
        };
        let disk = Disk::try_from(disk).map_err(|_| bad())?;
        let sector = digit.to_digit(10).ok_or_else(bad)? as u8;
        Position::from_parts(disk, sector)
    }
}

impl TryFrom<String> for Position {
    type Error = BoardError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Position> for String {
    fn from(p: Position) -> String {
        p.to_string()
    }
}
