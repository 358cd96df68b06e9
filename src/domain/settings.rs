use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Tunable gameplay constants, loaded from the host as JSON.
///
/// Handlers copy what they need when they are wired, so changing settings
/// only affects handlers registered afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsSettings {
    /// `G` for the inverse-square pull toward gravity wells.
    pub platform_gravity: f64,
    pub player_max_speed: f64,
    /// Total upward impulse of a full jump, split evenly over `max_jumps` ticks.
    pub player_jump_impulse: f64,
    pub max_jumps: u32,
    /// Horizontal drag coefficient on the player.
    pub ground_friction: f64,

    pub bullet_speed: f64,
    pub bullet_mass: f64,
    /// Star radius of a bullet is `bullet_size / 5`.
    pub bullet_size: f64,
    pub bullet_damage: f64,
    /// A boss is removed once its health drops below this.
    pub boss_health_floor: f64,
    pub bullet_regen_time: f64,

    /// Per-tick probability that an enemy fires.
    pub shoot_chance: f64,
    pub boss_shoot_multiplier: f64,

    /// Positional correction applied while resting on a platform,
    /// as multiples of the contact axis components.
    pub platform_shift_x: f64,
    pub platform_shift_y: f64,
    /// `|axis.x|` above this classifies a contact as a wall touch.
    pub touch_threshold: f64,

    pub seed: u64,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            platform_gravity: 0.00009,
            player_max_speed: 650.0,
            player_jump_impulse: 7.5e4,
            max_jumps: 10,
            ground_friction: 1000.0,
            bullet_speed: 1500.0,
            bullet_mass: 20.0,
            bullet_size: 100.0,
            bullet_damage: 0.1,
            boss_health_floor: -1.0,
            bullet_regen_time: 3.0,
            shoot_chance: 0.0008,
            boss_shoot_multiplier: 2.0,
            platform_shift_x: 2.0,
            platform_shift_y: 0.5,
            touch_threshold: 0.5,
            seed: 0x5EED_CAFE,
        }
    }
}

impl PhysicsSettings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: PhysicsSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let non_negative = [
            ("platformGravity", self.platform_gravity),
            ("playerMaxSpeed", self.player_max_speed),
            ("playerJumpImpulse", self.player_jump_impulse),
            ("groundFriction", self.ground_friction),
            ("bulletSpeed", self.bullet_speed),
            ("bulletDamage", self.bullet_damage),
            ("bulletRegenTime", self.bullet_regen_time),
            ("bossShootMultiplier", self.boss_shoot_multiplier),
            ("platformShiftX", self.platform_shift_x),
            ("platformShiftY", self.platform_shift_y),
            ("touchThreshold", self.touch_threshold),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::OutOfRange { name, value });
            }
        }
        for (name, value) in [("bulletMass", self.bullet_mass), ("bulletSize", self.bullet_size)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::OutOfRange { name, value });
            }
        }
        if !self.boss_health_floor.is_finite() {
            return Err(SettingsError::OutOfRange {
                name: "bossHealthFloor",
                value: self.boss_health_floor,
            });
        }
        if !(0.0..=1.0).contains(&self.shoot_chance) {
            return Err(SettingsError::OutOfRange { name: "shootChance", value: self.shoot_chance });
        }
        if self.max_jumps == 0 {
            return Err(SettingsError::OutOfRange { name: "maxJumps", value: 0.0 });
        }
        Ok(())
    }

    /// Upward impulse of a single jump step.
    pub fn jump_step_impulse(&self) -> f64 {
        self.player_jump_impulse / self.max_jumps as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(PhysicsSettings::default().validate().is_ok());
        assert_eq!(PhysicsSettings::default().jump_step_impulse(), 7500.0);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = PhysicsSettings::from_json(r#"{"playerMaxSpeed": 300, "seed": 9}"#).unwrap();
        assert_eq!(s.player_max_speed, 300.0);
        assert_eq!(s.seed, 9);
        assert_eq!(s.max_jumps, 10);
    }

    #[test]
    fn rejects_out_of_range() {
        let err = PhysicsSettings::from_json(r#"{"shootChance": 1.5}"#).unwrap_err();
        assert!(matches!(err, SettingsError::OutOfRange { name: "shootChance", .. }));
        assert!(PhysicsSettings::from_json(r#"{"maxJumps": 0}"#).is_err());
        assert!(PhysicsSettings::from_json(r#"{"bulletMass": 0}"#).is_err());
        assert!(matches!(
            PhysicsSettings::from_json("{not json"),
            Err(SettingsError::Parse(_))
        ));
    }
}
