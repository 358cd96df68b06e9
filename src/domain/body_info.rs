//! Per-body gameplay payload.
//!
//! The physics never looks inside a [`BodyInfo`]; only the gameplay force
//! creators in `systems::forces` and the wiring helpers do.

use serde::{Deserialize, Serialize};

/// What a body is, for the purposes of wiring forces and collision responses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyKind {
    Player,
    Floor,
    MovingFloor,
    Enemy,
    Boss,
    BulletPowerup,
    FinishedLevelPowerup,
    BoostPowerup,
    GravityWell,
    Spike,
    /// Fired by the player.
    Bullet,
    EnemyBullet,
}

impl BodyKind {
    pub fn is_platform(self) -> bool {
        matches!(self, BodyKind::Floor | BodyKind::MovingFloor)
    }

    pub fn is_powerup(self) -> bool {
        matches!(
            self,
            BodyKind::BulletPowerup | BodyKind::FinishedLevelPowerup | BodyKind::BoostPowerup
        )
    }

    /// Stable numeric id for the JS side.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        use BodyKind::*;
        const ALL: [BodyKind; 12] = [
            Player,
            Floor,
            MovingFloor,
            Enemy,
            Boss,
            BulletPowerup,
            FinishedLevelPowerup,
            BoostPowerup,
            GravityWell,
            Spike,
            Bullet,
            EnemyBullet,
        ];
        ALL.get(v as usize).copied()
    }
}

/// Vertical movement state, driven by platform contacts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Movement {
    Falling,
    Grounded,
    /// Not subject to platform logic (floors, powerups, bullets).
    #[default]
    Static,
}

/// Which side of the body is pressed against a wall.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallTouch {
    #[default]
    None,
    Left,
    Right,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyInfo {
    pub kind: BodyKind,
    pub movement: Movement,
    pub touch: WallTouch,
    /// Jumps taken since the last floor landing.
    pub jumps: u32,
    /// Boss hit points; starts at 1.0 and drains per bullet.
    pub health: f64,
    /// Bullets currently out of the magazine.
    pub bullet_count: u32,
    pub max_bullets: u32,
    /// Scene time of the last regeneration.
    pub last_shot_time: f64,
}

impl BodyInfo {
    pub const DEFAULT_MAX_BULLETS: u32 = 3;

    pub fn new(kind: BodyKind, movement: Movement) -> Self {
        Self {
            kind,
            movement,
            touch: WallTouch::None,
            jumps: 0,
            health: 1.0,
            bullet_count: 0,
            max_bullets: Self::DEFAULT_MAX_BULLETS,
            last_shot_time: 0.0,
        }
    }

    /// Payload for a body that starts airborne (players, enemies, bosses).
    pub fn falling(kind: BodyKind) -> Self {
        Self::new(kind, Movement::Falling)
    }

    pub fn fixed(kind: BodyKind) -> Self {
        Self::new(kind, Movement::Static)
    }

    pub fn is_falling(&self) -> bool {
        self.movement == Movement::Falling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_ids_round_trip() {
        for id in 0..12u8 {
            let kind = BodyKind::from_u8(id).unwrap();
            assert_eq!(kind.to_u8(), id);
        }
        assert_eq!(BodyKind::from_u8(12), None);
    }

    #[test]
    fn new_info_defaults() {
        let info = BodyInfo::falling(BodyKind::Player);
        assert!(info.is_falling());
        assert_eq!(info.touch, WallTouch::None);
        assert_eq!(info.max_bullets, 3);
        assert_eq!(info.health, 1.0);
        assert!(!BodyInfo::fixed(BodyKind::Floor).is_falling());
    }
}
