//! Rotation state of the three nested platforms.
//!
//! Each stored angle is the platform's effective rotation in the board
//! frame. Platforms are stacked (level 2 rides on level 1, level 3 on
//! level 2), so rotating a level also turns every level mounted on it.
//! Resetting a level restores only that level's stored angle: the levels
//! it carried keep the rotation they were given.

use serde::{Deserialize, Serialize};

use crate::board::{Level, SECTOR_DEGREES};
use crate::error::BoardError;

const FULL_TURN: i32 = 360;

/// Rotation direction for one-step UI controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Clockwise,
    CounterClockwise,
}

impl Direction {
    pub fn steps(self) -> i32 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }
}

/// The angles of platforms 1, 2 and 3, always multiples of 45 in `0..360`.
///
/// Deserialization goes through [`RotationState::with_initial`]-style
/// checks, so a loaded state upholds the same invariant as a built one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredRotation", into = "StoredRotation")]
pub struct RotationState {
    angles: [i32; 3],
    initial: [i32; 3],
}

/// Plain serialized form of [`RotationState`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StoredRotation {
    angles: [i32; 3],
    initial: [i32; 3],
}

impl TryFrom<StoredRotation> for RotationState {
    type Error = BoardError;

    fn try_from(stored: StoredRotation) -> Result<Self, Self::Error> {
        let mut state = RotationState::with_initial(stored.initial)?;
        for (slot, &deg) in state.angles.iter_mut().zip(stored.angles.iter()) {
            *slot = normalize(deg)?;
        }
        Ok(state)
    }
}

impl From<RotationState> for StoredRotation {
    fn from(state: RotationState) -> Self {
        Self {
            angles: state.angles,
            initial: state.initial,
        }
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::new()
    }
}

impl RotationState {
    /// All platforms at their printed orientation.
    pub fn new() -> Self {
        Self {
            angles: [0; 3],
            initial: [0; 3],
        }
    }

    /// Start from explicit effective angles, which also become the reset targets.
    pub fn with_initial(angles: [i32; 3]) -> Result<Self, BoardError> {
        let mut normalized = [0; 3];
        for (slot, &deg) in normalized.iter_mut().zip(angles.iter()) {
            *slot = normalize(deg)?;
        }
        Ok(Self {
            angles: normalized,
            initial: normalized,
        })
    }

    /// Turn `level` by `steps` sectors, carrying every level mounted on it.
    ///
    /// Rotating the fixed board is a no-op.
    pub fn rotate(&mut self, level: Level, steps: i32) {
        if level.is_fixed() {
            return;
        }
        let delta = steps.rem_euclid(8) * SECTOR_DEGREES;
        for slot in &mut self.angles[slot_index(level)..] {
            *slot = (*slot + delta).rem_euclid(FULL_TURN);
        }
        log::debug!("rotated {} by {} step(s): {:?}", level, steps, self.angles);
    }

    pub fn rotate_dir(&mut self, level: Level, direction: Direction) {
        self.rotate(level, direction.steps());
    }

    /// Put `level` back to its initial angle without touching the others.
    pub fn reset(&mut self, level: Level) {
        if level.is_fixed() {
            return;
        }
        let i = slot_index(level);
        self.angles[i] = self.initial[i];
        log::debug!("reset {}: {:?}", level, self.angles);
    }

    /// Effective rotation in degrees of anything sitting on `level`.
    pub fn total_rotation(&self, level: Level) -> i32 {
        if level.is_fixed() {
            0
        } else {
            self.angles[slot_index(level)]
        }
    }

    /// Effective rotation of `level` expressed in sectors.
    pub fn total_steps(&self, level: Level) -> i32 {
        self.total_rotation(level) / SECTOR_DEGREES
    }

    /// Rotation of `level` relative to the platform carrying it.
    ///
    /// Summing `own_rotation` over levels 1..=N gives `total_rotation(N)`
    /// modulo a full turn.
    pub fn own_rotation(&self, level: Level) -> i32 {
        let below = match level.number() {
            0 | 1 => 0,
            n => self.angles[n as usize - 2],
        };
        (self.total_rotation(level) - below).rem_euclid(FULL_TURN)
    }
}

fn slot_index(level: Level) -> usize {
    level.number() as usize - 1
}

fn normalize(deg: i32) -> Result<i32, BoardError> {
    if deg % SECTOR_DEGREES != 0 {
        return Err(BoardError::MisalignedRotation(deg));
    }
    Ok(deg.rem_euclid(FULL_TURN))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unrotated() {
        let r = RotationState::new();
        for level in Level::TOP_DOWN {
            assert_eq!(r.total_rotation(level), 0);
        }
    }

    #[test]
    fn level_one_carries_upper_levels() {
        let mut r = RotationState::new();
        r.rotate(Level::ONE, 2);
        assert_eq!(r.total_rotation(Level::ONE), 90);
        assert_eq!(r.total_rotation(Level::TWO), 90);
        assert_eq!(r.total_rotation(Level::THREE), 90);
        assert_eq!(r.total_rotation(Level::FIXED), 0);
    }

    #[test]
    fn level_three_moves_alone() {
        let mut r = RotationState::new();
        r.rotate(Level::THREE, 1);
        assert_eq!(r.total_rotation(Level::ONE), 0);
        assert_eq!(r.total_rotation(Level::TWO), 0);
        assert_eq!(r.total_rotation(Level::THREE), 45);
    }

    #[test]
    fn negative_steps_wrap() {
        let mut r = RotationState::new();
        r.rotate(Level::TWO, -1);
        assert_eq!(r.total_rotation(Level::TWO), 315);
        assert_eq!(r.total_steps(Level::TWO), 7);
        r.rotate_dir(Level::TWO, Direction::Clockwise);
        assert_eq!(r.total_rotation(Level::TWO), 0);
    }

    #[test]
    fn own_rotation_sums_to_total() {
        let mut r = RotationState::new();
        r.rotate(Level::ONE, 1);
        r.rotate(Level::TWO, 2);
        r.rotate(Level::THREE, 3);
        assert_eq!(r.own_rotation(Level::ONE), 45);
        assert_eq!(r.own_rotation(Level::TWO), 90);
        assert_eq!(r.own_rotation(Level::THREE), 135);
        let sum: i32 = Level::ROTATING.iter().map(|&l| r.own_rotation(l)).sum();
        assert_eq!(sum % 360, r.total_rotation(Level::THREE));
    }

    #[test]
    fn reset_does_not_uncarry() {
        let mut r = RotationState::new();
        r.rotate(Level::ONE, 1);
        r.reset(Level::ONE);
        assert_eq!(r.total_rotation(Level::ONE), 0);
        assert_eq!(r.total_rotation(Level::TWO), 45);
        assert_eq!(r.total_rotation(Level::THREE), 45);
    }

    #[test]
    fn reset_returns_to_initial() {
        let mut r = RotationState::with_initial([90, 90, 180]).unwrap();
        r.rotate(Level::TWO, 3);
        r.reset(Level::TWO);
        assert_eq!(r.total_rotation(Level::TWO), 90);
        assert_eq!(r.total_rotation(Level::THREE), 315);
    }

    #[test]
    fn misaligned_initial_is_rejected() {
        assert_eq!(
            RotationState::with_initial([0, 30, 0]),
            Err(BoardError::MisalignedRotation(30))
        );
        assert_eq!(
            RotationState::with_initial([-45, 405, 0]).unwrap().total_rotation(Level::TWO),
            45
        );
    }

    #[test]
    fn deserialization_enforces_alignment() {
        let bad = serde_json::from_str::<RotationState>(r#"{"angles":[0,10,0],"initial":[0,0,0]}"#);
        assert!(bad.is_err());

        let mut r = RotationState::new();
        r.rotate(Level::TWO, 3);
        let json = serde_json::to_string(&r).unwrap();
        let back: RotationState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
