//! Registers the standard handler set for each gameplay body kind against
//! the bodies already in the registry.

use log::{debug, warn};

use crate::domain::body_info::BodyKind;
use crate::domain::input::FIRE;
use crate::domain::prefabs::{self, BulletSpec};
use crate::domain::settings::PhysicsSettings;
use crate::error::BodyError;
use crate::rigid_body::{RgbColor, Vec2};
use crate::rigid_body_system::BodyHandle;

use super::gameplay::{apply_powerup, bullet_hit, enemy_contact, spike_contact, BossHit, EnemyShooter, PlayerGun};
use super::platformer::{MovementKeys, PlatformCollision, PlatformTuning, PlayerMovement};
use super::{Friction, ForceRegistry, PlatformGravity, Spring};

/// Snapshot of `(handle, kind)` so registration can mutate the registry.
fn kinds<R: ForceRegistry>(registry: &R) -> Vec<(BodyHandle, BodyKind)> {
    registry
        .bodies()
        .iter()
        .filter_map(|(h, body)| body.info().map(|info| (h, info.kind)))
        .collect()
}

/// Platforms, gravity wells, spikes and powerups for the player, plus
/// friction, keyboard movement and the gun. Returns the handler count.
pub fn wire_player_forces<R: ForceRegistry>(
    registry: &mut R,
    player: BodyHandle,
    keys: MovementKeys,
    settings: &PhysicsSettings,
) -> usize {
    let platform = PlatformCollision::new(PlatformTuning::from_settings(settings));
    let mut count = 0;
    for (handle, kind) in kinds(registry) {
        match kind {
            BodyKind::Floor | BodyKind::MovingFloor => {
                registry.register_collision_handler(player, handle, platform)
            }
            BodyKind::GravityWell => registry.register_force_handler(
                PlatformGravity::new(settings.platform_gravity, player, handle),
                vec![player, handle],
            ),
            BodyKind::Spike => registry.register_collision_handler(player, handle, enemy_contact),
            k if k.is_powerup() => registry.register_collision_handler(player, handle, apply_powerup),
            _ => continue,
        }
        count += 1;
    }

    registry.register_force_handler(Friction::new(settings.ground_friction, player), vec![player]);
    registry.register_force_handler(PlayerMovement::from_settings(player, keys, settings), vec![player]);
    registry.register_force_handler(PlayerGun::new(player, FIRE, settings), vec![player]);
    count += 3;

    debug!("wired {count} handlers for player {player:?}");
    count
}

fn wire_hostile<R: ForceRegistry>(
    registry: &mut R,
    hostile: BodyHandle,
    chance: f64,
    boss: bool,
    settings: &PhysicsSettings,
) -> usize {
    let platform = PlatformCollision::new(PlatformTuning::from_settings(settings));
    let mut count = 0;
    for (handle, kind) in kinds(registry) {
        match kind {
            BodyKind::Floor => registry.register_collision_handler(hostile, handle, platform),
            BodyKind::MovingFloor if !boss => registry.register_collision_handler(hostile, handle, platform),
            BodyKind::Player => registry.register_collision_handler(hostile, handle, enemy_contact),
            BodyKind::GravityWell => registry.register_force_handler(
                PlatformGravity::new(settings.platform_gravity, hostile, handle),
                vec![hostile, handle],
            ),
            BodyKind::Spike if boss => registry.register_collision_handler(hostile, handle, spike_contact),
            _ => continue,
        }
        count += 1;
    }

    match registry.first_body_of_kind(BodyKind::Player) {
        Some(player) => {
            let shooter = EnemyShooter::new(hostile, player, chance, BulletSpec::from_settings(settings));
            registry.register_force_handler(shooter, vec![hostile]);
            count += 1;
        }
        None => warn!("no player in scene; {hostile:?} will not shoot"),
    }
    count
}

/// Platforms, player contact, gravity wells and shooting for an enemy.
pub fn wire_enemy_forces<R: ForceRegistry>(registry: &mut R, enemy: BodyHandle, settings: &PhysicsSettings) -> usize {
    let count = wire_hostile(registry, enemy, settings.shoot_chance, false, settings);
    debug!("wired {count} handlers for enemy {enemy:?}");
    count
}

/// Like an enemy, but bounces off spikes, ignores moving floors and fires
/// more often.
pub fn wire_boss_forces<R: ForceRegistry>(registry: &mut R, boss: BodyHandle, settings: &PhysicsSettings) -> usize {
    let chance = (settings.shoot_chance * settings.boss_shoot_multiplier).min(1.0);
    let count = wire_hostile(registry, boss, chance, true, settings);
    debug!("wired {count} handlers for boss {boss:?}");
    count
}

/// Player bullets hit enemies and bosses; enemy bullets hit the player.
pub fn wire_bullet_forces<R: ForceRegistry>(registry: &mut R, bullet: BodyHandle, settings: &PhysicsSettings) -> usize {
    let mut count = 0;
    match registry.kind_of(bullet) {
        Some(BodyKind::Bullet) => {
            for (handle, kind) in kinds(registry) {
                match kind {
                    BodyKind::Enemy => registry.register_collision_handler(bullet, handle, bullet_hit),
                    BodyKind::Boss => {
                        registry.register_collision_handler(bullet, handle, BossHit::from_settings(settings))
                    }
                    _ => continue,
                }
                count += 1;
            }
        }
        Some(BodyKind::EnemyBullet) => {
            if let Some(player) = registry.first_body_of_kind(BodyKind::Player) {
                registry.register_collision_handler(player, bullet, enemy_contact);
                count += 1;
            }
        }
        other => warn!("wire_bullet_forces called on {other:?}"),
    }
    count
}

/// Player first, then every enemy and boss. Returns the handler count.
pub fn wire_level<R: ForceRegistry>(registry: &mut R, keys: MovementKeys, settings: &PhysicsSettings) -> usize {
    let mut count = 0;
    if let Some(player) = registry.first_body_of_kind(BodyKind::Player) {
        count += wire_player_forces(registry, player, keys, settings);
    }
    for enemy in registry.bodies_of_kind(BodyKind::Enemy) {
        count += wire_enemy_forces(registry, enemy, settings);
    }
    for boss in registry.bodies_of_kind(BodyKind::Boss) {
        count += wire_boss_forces(registry, boss, settings);
    }
    count
}

/// Add a moving floor displaced by `displacement` from an anchor at
/// `centroid`, joined by a spring of stiffness `k`.
pub fn spawn_moving_floor<R: ForceRegistry>(
    registry: &mut R,
    size: Vec2,
    mass: f64,
    k: f64,
    centroid: Vec2,
    displacement: Vec2,
    color: RgbColor,
) -> Result<BodyHandle, BodyError> {
    let (mut floor, mut anchor) = prefabs::moving_floor(size.x, size.y, mass, color)?;
    anchor.set_centroid(centroid);
    floor.set_centroid(centroid + displacement);
    let floor = registry.add_body(floor);
    let anchor = registry.add_body(anchor);
    registry.register_force_handler(Spring::new(k, floor, anchor), vec![floor, anchor]);
    Ok(floor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SceneCore;

    fn place(scene: &mut SceneCore, mut body: crate::rigid_body::Body, x: f64, y: f64) -> BodyHandle {
        body.set_centroid(Vec2::new(x, y));
        scene.add_body(body)
    }

    fn level() -> SceneCore {
        let mut scene = SceneCore::new();
        place(&mut scene, prefabs::player(10.0).unwrap(), 0.0, 20.0);
        place(&mut scene, prefabs::floor(200.0, 10.0, RgbColor::BLACK).unwrap(), 0.0, 0.0);
        place(&mut scene, prefabs::gravity_well().unwrap(), 0.0, -1e6);
        place(&mut scene, prefabs::spike(5.0).unwrap(), 80.0, 10.0);
        place(
            &mut scene,
            prefabs::powerup(5.0, BodyKind::BulletPowerup, RgbColor::BLUE).unwrap(),
            40.0,
            20.0,
        );
        scene
    }

    #[test]
    fn player_gets_one_handler_per_relevant_body_plus_controls() {
        let mut scene = level();
        let player = scene.first_body_of_kind(BodyKind::Player).unwrap();
        let settings = PhysicsSettings::default();
        let count = wire_player_forces(&mut scene, player, MovementKeys::default(), &settings);
        // floor, well, spike, powerup, then friction, movement, gun
        assert_eq!(count, 7);
        assert_eq!(scene.handler_count(), 7);
    }

    #[test]
    fn boss_skips_moving_floors_and_watches_spikes() {
        let mut scene = level();
        spawn_moving_floor(
            &mut scene,
            Vec2::new(20.0, 2.0),
            10.0,
            1.0,
            Vec2::new(100.0, 50.0),
            Vec2::new(5.0, 0.0),
            RgbColor::BLACK,
        )
        .unwrap();
        let enemy = place(&mut scene, prefabs::enemy(5.0, 10.0).unwrap(), -50.0, 20.0);
        let boss = place(&mut scene, prefabs::boss(10.0).unwrap(), 50.0, 20.0);
        let settings = PhysicsSettings::default();

        // floor, moving floor, player, well, shooter
        assert_eq!(wire_enemy_forces(&mut scene, enemy, &settings), 5);
        // floor, player, well, spike, shooter
        assert_eq!(wire_boss_forces(&mut scene, boss, &settings), 5);
    }

    #[test]
    fn enemy_without_a_player_does_not_shoot() {
        let mut scene = SceneCore::new();
        place(&mut scene, prefabs::floor(200.0, 10.0, RgbColor::BLACK).unwrap(), 0.0, 0.0);
        let enemy = place(&mut scene, prefabs::enemy(5.0, 10.0).unwrap(), 0.0, 20.0);
        assert_eq!(wire_enemy_forces(&mut scene, enemy, &PhysicsSettings::default()), 1);
    }

    #[test]
    fn bullets_are_wired_by_owner() {
        let mut scene = level();
        place(&mut scene, prefabs::enemy(5.0, 10.0).unwrap(), -50.0, 20.0);
        place(&mut scene, prefabs::boss(10.0).unwrap(), 50.0, 20.0);
        let spec = BulletSpec::default();
        let ours = scene.add_body(spec.build(BodyKind::Bullet, Vec2::zero(), 0.0).unwrap());
        let theirs = scene.add_body(spec.build(BodyKind::EnemyBullet, Vec2::zero(), 0.0).unwrap());
        let settings = PhysicsSettings::default();

        assert_eq!(wire_bullet_forces(&mut scene, ours, &settings), 2);
        assert_eq!(wire_bullet_forces(&mut scene, theirs, &settings), 1);
        let floor = scene.first_body_of_kind(BodyKind::Floor).unwrap();
        assert_eq!(wire_bullet_forces(&mut scene, floor, &settings), 0);
    }

    #[test]
    fn wire_level_covers_player_enemies_and_bosses() {
        let mut scene = level();
        place(&mut scene, prefabs::enemy(5.0, 10.0).unwrap(), -50.0, 20.0);
        place(&mut scene, prefabs::enemy(5.0, 10.0).unwrap(), -80.0, 20.0);
        place(&mut scene, prefabs::boss(10.0).unwrap(), 50.0, 20.0);
        let count = wire_level(&mut scene, MovementKeys::default(), &PhysicsSettings::default());
        // player 7, each enemy 4 (floor, player, well, shooter), boss 5
        assert_eq!(count, 7 + 4 + 4 + 5);
        assert_eq!(scene.handler_count(), count);
    }
}
