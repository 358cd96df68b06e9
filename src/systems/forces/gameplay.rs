use log::{debug, warn};
use rand::Rng;

use crate::domain::body_info::BodyKind;
use crate::domain::prefabs::BulletSpec;
use crate::domain::settings::PhysicsSettings;
use crate::rigid_body_system::BodyHandle;
use crate::systems::collision::{CollisionEvent, Contact};

use super::{CollisionHandler, ForceContext, ForceCreator, ForceRegistry};

/// Player (`a`) picks up a powerup (`b`).
pub fn apply_powerup(ctx: &mut ForceContext<'_>, contact: Contact) {
    if contact.event != CollisionEvent::Start {
        return;
    }
    match ctx.info(contact.b).map(|info| info.kind) {
        Some(BodyKind::BulletPowerup) => {
            if let Some(info) = ctx.info_mut(contact.a) {
                info.max_bullets += 1;
            }
        }
        Some(BodyKind::FinishedLevelPowerup) => ctx.status_mut().finished_level = true,
        Some(BodyKind::BoostPowerup) => random_boost(ctx, contact.a),
        _ => {}
    }
    ctx.mark_removed(contact.b);
}

/// Anything hostile touching the player ends the run.
pub fn enemy_contact(ctx: &mut ForceContext<'_>, _contact: Contact) {
    if !ctx.status().done {
        debug!("player caught, scene done");
    }
    ctx.status_mut().done = true;
}

/// Player bullet (`a`) destroys an enemy (`b`).
pub fn bullet_hit(ctx: &mut ForceContext<'_>, contact: Contact) {
    ctx.mark_removed(contact.a);
    ctx.mark_removed(contact.b);
}

/// Boss (`a`) bounces back off a spike (`b`).
pub fn spike_contact(ctx: &mut ForceContext<'_>, contact: Contact) {
    if contact.event == CollisionEvent::End {
        return;
    }
    if let Some(boss) = ctx.body_mut(contact.a) {
        let reversed = -boss.velocity();
        boss.set_velocity(reversed);
    }
}

/// Multiply a body's velocity by a random factor in `2..=5` via an impulse.
pub fn random_boost(ctx: &mut ForceContext<'_>, handle: BodyHandle) {
    let factor = ctx.rng().random_range(2..=5) as f64;
    if let Some(body) = ctx.body_mut(handle) {
        let impulse = body.velocity() * factor;
        body.add_impulse(impulse);
    }
}

/// Player bullet (`a`) chips health off a boss (`b`).
#[derive(Clone, Copy, Debug)]
pub struct BossHit {
    damage: f64,
    health_floor: f64,
}

impl BossHit {
    pub fn new(damage: f64, health_floor: f64) -> Self {
        Self { damage, health_floor }
    }

    pub fn from_settings(settings: &PhysicsSettings) -> Self {
        Self::new(settings.bullet_damage, settings.boss_health_floor)
    }
}

impl CollisionHandler for BossHit {
    fn on_collision(&mut self, ctx: &mut ForceContext<'_>, contact: Contact) {
        ctx.mark_removed(contact.a);
        let Some(info) = ctx.info_mut(contact.b) else {
            return;
        };
        info.health -= self.damage;
        if info.health < self.health_floor {
            debug!("boss {:?} destroyed", contact.b);
            ctx.mark_removed(contact.b);
        }
    }
}

/// Enemy that fires at the player with a fixed per-tick probability.
#[derive(Clone, Copy, Debug)]
pub struct EnemyShooter {
    enemy: BodyHandle,
    player: BodyHandle,
    chance: f64,
    bullet: BulletSpec,
}

impl EnemyShooter {
    pub fn new(enemy: BodyHandle, player: BodyHandle, chance: f64, bullet: BulletSpec) -> Self {
        Self { enemy, player, chance, bullet }
    }
}

impl ForceCreator for EnemyShooter {
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        let roll: f64 = ctx.rng().random();
        if roll >= self.chance {
            return;
        }
        let (Some(enemy), Some(player)) = (ctx.body(self.enemy), ctx.body(self.player)) else {
            return;
        };
        let origin = enemy.centroid();
        let aim = player.centroid() - origin;
        let heading = aim.y.atan2(aim.x);

        match self.bullet.build(BodyKind::EnemyBullet, origin, heading) {
            Ok(body) => {
                let bullet = ctx.spawn_body(body);
                ctx.register_collision_handler(self.player, bullet, enemy_contact);
            }
            Err(err) => warn!("enemy {:?} could not fire: {err}", self.enemy),
        }
    }
}

/// Fires a player bullet on each press of the fire key while the magazine
/// has room, and regenerates one bullet every `regen_time` seconds.
#[derive(Clone, Copy, Debug)]
pub struct PlayerGun {
    player: BodyHandle,
    fire_slot: usize,
    regen_time: f64,
    bullet: BulletSpec,
    boss_hit: BossHit,
    was_pressed: bool,
}

impl PlayerGun {
    pub fn new(player: BodyHandle, fire_slot: usize, settings: &PhysicsSettings) -> Self {
        Self {
            player,
            fire_slot,
            regen_time: settings.bullet_regen_time,
            bullet: BulletSpec::from_settings(settings),
            boss_hit: BossHit::from_settings(settings),
            was_pressed: false,
        }
    }

    fn regenerate(&self, ctx: &mut ForceContext<'_>, now: f64) {
        if let Some(info) = ctx.info_mut(self.player) {
            if info.bullet_count > 0 && now - info.last_shot_time > self.regen_time {
                info.last_shot_time = now;
                info.bullet_count -= 1;
            }
        }
    }

    /// Firing leaves the regeneration clock alone.
    fn fire(&self, ctx: &mut ForceContext<'_>) {
        let Some(body) = ctx.body_mut(self.player) else {
            return;
        };
        let origin = body.centroid();
        let Some(info) = body.info_mut() else {
            return;
        };
        if info.bullet_count >= info.max_bullets {
            return;
        }
        info.bullet_count += 1;

        let bullet = match self.bullet.build(BodyKind::Bullet, origin, 0.0) {
            Ok(body) => ctx.spawn_body(body),
            Err(err) => {
                warn!("player bullet could not be built: {err}");
                return;
            }
        };
        for enemy in ctx.bodies_of_kind(BodyKind::Enemy) {
            ctx.register_collision_handler(bullet, enemy, bullet_hit);
        }
        for boss in ctx.bodies_of_kind(BodyKind::Boss) {
            ctx.register_collision_handler(bullet, boss, self.boss_hit);
        }
    }
}

impl ForceCreator for PlayerGun {
    fn apply(&mut self, ctx: &mut ForceContext<'_>) {
        let pressed = ctx.input().is_pressed(self.fire_slot);
        let press_edge = pressed && !self.was_pressed;
        self.was_pressed = pressed;

        let now = ctx.time();
        self.regenerate(ctx, now);
        if press_edge {
            self.fire(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::prefabs;
    use crate::rigid_body::{Body, RgbColor, Vec2};
    use crate::simulation::SceneCore;

    fn place(scene: &mut SceneCore, mut body: Body, at: Vec2) -> BodyHandle {
        body.set_centroid(at);
        scene.add_body(body)
    }

    fn pickup(kind: BodyKind) -> (SceneCore, BodyHandle, BodyHandle) {
        let mut scene = SceneCore::new();
        let player = place(&mut scene, prefabs::player(10.0).unwrap(), Vec2::zero());
        let powerup = place(&mut scene, prefabs::powerup(6.0, kind, RgbColor::BLUE).unwrap(), Vec2::new(3.0, 0.0));
        scene.register_collision_handler(player, powerup, apply_powerup);
        (scene, player, powerup)
    }

    #[test]
    fn bullet_powerup_grows_the_magazine() {
        let (mut scene, player, powerup) = pickup(BodyKind::BulletPowerup);
        scene.tick(0.01);
        assert_eq!(scene.body(player).unwrap().info().unwrap().max_bullets, 4);
        assert!(scene.body(powerup).is_none());
        assert!(!scene.finished_level());
    }

    #[test]
    fn boost_powerup_adds_a_multiple_of_velocity_as_impulse() {
        let (mut scene, player, _) = pickup(BodyKind::BoostPowerup);
        scene.body_mut(player).unwrap().set_velocity(Vec2::new(1.0, 0.0));
        scene.tick(0.01);
        let vx = scene.body(player).unwrap().velocity().x;
        let mass = prefabs::PLAYER_MASS;
        assert!(
            (2..=5).any(|k| (vx - (1.0 + k as f64 / mass)).abs() < 1e-12),
            "unexpected boost {vx}"
        );
    }

    #[test]
    fn boss_survives_until_health_drops_below_the_floor() {
        let mut scene = SceneCore::new();
        let boss = place(&mut scene, prefabs::boss(20.0).unwrap(), Vec2::zero());
        let spec = BulletSpec::default();

        for hit in 0..2 {
            let mut bullet = spec.build(BodyKind::Bullet, Vec2::zero(), 0.0).unwrap();
            bullet.set_velocity(Vec2::zero());
            let bullet = scene.add_body(bullet);
            scene.register_collision_handler(bullet, boss, BossHit::new(0.6, 0.0));
            scene.tick(0.01);

            assert!(scene.body(bullet).is_none());
            if hit == 0 {
                let health = scene.body(boss).unwrap().info().unwrap().health;
                assert!((health - 0.4).abs() < 1e-12);
            }
        }
        assert!(scene.body(boss).is_none());
    }

    #[test]
    fn spikes_turn_the_boss_around() {
        let mut scene = SceneCore::new();
        let boss = place(&mut scene, prefabs::boss(10.0).unwrap(), Vec2::zero());
        let spike = place(&mut scene, prefabs::spike(10.0).unwrap(), Vec2::new(4.0, 0.0));
        scene.body_mut(boss).unwrap().set_velocity(Vec2::new(2.0, 0.0));
        scene.register_collision_handler(boss, spike, spike_contact);

        scene.tick(0.01);
        assert_eq!(scene.body(boss).unwrap().velocity(), Vec2::new(-2.0, 0.0));
        assert_eq!(scene.body(spike).unwrap().velocity(), Vec2::zero());
    }

    #[test]
    fn bullets_destroy_enemies_on_contact() {
        let mut scene = SceneCore::new();
        let enemy = place(&mut scene, prefabs::enemy(10.0, 50.0).unwrap(), Vec2::zero());
        let bullet = place(
            &mut scene,
            BulletSpec::default().build(BodyKind::Bullet, Vec2::new(5.0, 0.0), 0.0).unwrap(),
            Vec2::new(5.0, 0.0),
        );
        scene.register_collision_handler(bullet, enemy, bullet_hit);
        scene.tick(0.01);
        assert_eq!(scene.body_count(), 0);
    }

    #[test]
    fn shooter_never_fires_at_zero_chance() {
        let mut scene = SceneCore::new();
        let enemy = place(&mut scene, prefabs::enemy(10.0, 50.0).unwrap(), Vec2::zero());
        let player = place(&mut scene, prefabs::player(10.0).unwrap(), Vec2::new(500.0, 0.0));
        scene.register_force_handler(EnemyShooter::new(enemy, player, 0.0, BulletSpec::default()), vec![enemy]);
        for _ in 0..100 {
            scene.tick(0.01);
        }
        assert_eq!(scene.body_count(), 2);
        assert!(!scene.is_done());
    }

    #[test]
    fn magazine_regenerates_over_time() {
        let settings = PhysicsSettings { bullet_regen_time: 0.05, ..PhysicsSettings::default() };
        let mut scene = SceneCore::with_settings(settings.clone());
        let player = place(&mut scene, prefabs::player(10.0).unwrap(), Vec2::zero());
        scene.body_mut(player).unwrap().info_mut().unwrap().bullet_count = 2;
        scene.register_force_handler(PlayerGun::new(player, crate::domain::input::FIRE, &settings), vec![player]);

        for _ in 0..20 {
            scene.tick(0.01);
        }
        // One bullet back every 0.05 s, and never below zero.
        assert_eq!(scene.body(player).unwrap().info().unwrap().bullet_count, 0);
    }

    #[test]
    fn pressing_fire_on_a_full_magazine_does_not_delay_regeneration() {
        let settings = PhysicsSettings { bullet_regen_time: 0.1, ..PhysicsSettings::default() };
        let mut scene = SceneCore::with_settings(settings.clone());
        let player = place(&mut scene, prefabs::player(10.0).unwrap(), Vec2::zero());
        let max = scene.body(player).unwrap().info().unwrap().max_bullets;
        scene.body_mut(player).unwrap().info_mut().unwrap().bullet_count = max;
        scene.register_force_handler(PlayerGun::new(player, crate::domain::input::FIRE, &settings), vec![player]);

        // Scene time runs 0.00 to 0.12; fire is pressed at 0.05.
        for i in 0..13 {
            if i == 5 {
                scene.input_mut().press(crate::domain::input::FIRE);
            } else {
                scene.input_mut().release(crate::domain::input::FIRE);
            }
            scene.tick(0.01);
        }

        assert_eq!(scene.body_count(), 1);
        assert_eq!(scene.body(player).unwrap().info().unwrap().bullet_count, max - 1);
    }
}
