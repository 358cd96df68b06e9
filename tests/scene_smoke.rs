use polyscene_engine::domain::input::RIGHT_ARROW;
use polyscene_engine::forces::{
    spawn_moving_floor, wire_level, wire_player_forces, Gravity, MovementKeys,
};
use polyscene_engine::prelude::*;

fn place(scene: &mut SceneCore, mut body: Body, x: f64, y: f64) -> BodyHandle {
    body.set_centroid(Vec2::new(x, y));
    scene.add_body(body)
}

#[test]
fn picking_up_the_finish_star_ends_the_level() {
    let mut scene = SceneCore::new();
    let player = place(&mut scene, prefabs::player(10.0).unwrap(), 0.0, 0.0);
    let star = prefabs::powerup(8.0, BodyKind::FinishedLevelPowerup, RgbColor::GOLD).unwrap();
    let star = place(&mut scene, star, 2.0, 0.0);

    let settings = scene.settings().clone();
    assert!(wire_level(&mut scene, MovementKeys::default(), &settings) > 0);

    scene.tick(1.0 / 60.0);

    assert!(scene.finished_level());
    assert!(!scene.is_done());
    assert!(scene.body(star).is_none());
    assert!(scene.body(player).is_some());
}

#[test]
fn enemy_touching_the_player_ends_the_run() {
    let mut scene = SceneCore::new();
    place(&mut scene, prefabs::player(10.0).unwrap(), 0.0, 0.0);
    place(&mut scene, prefabs::enemy(10.0, 50.0).unwrap(), 5.0, 0.0);

    let settings = scene.settings().clone();
    wire_level(&mut scene, MovementKeys::default(), &settings);
    assert!(!scene.is_done());

    scene.tick(1.0 / 60.0);
    assert!(scene.is_done());
}

#[test]
fn held_direction_key_snaps_to_max_speed() {
    let mut scene = SceneCore::new();
    let player = place(&mut scene, prefabs::player(10.0).unwrap(), 0.0, 0.0);
    let settings = scene.settings().clone();
    wire_player_forces(&mut scene, player, MovementKeys::default(), &settings);

    scene.input_mut().press(RIGHT_ARROW);
    scene.tick(1.0 / 60.0);

    let velocity = scene.body(player).unwrap().velocity();
    assert_eq!(velocity.x, settings.player_max_speed);
    assert!(scene.body(player).unwrap().centroid().x > 0.0);
}

#[test]
fn moving_floor_is_pulled_back_toward_its_anchor() {
    let mut scene = SceneCore::new();
    let floor = spawn_moving_floor(
        &mut scene,
        Vec2::new(20.0, 2.0),
        10.0,
        5.0,
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        RgbColor::BLACK,
    )
    .unwrap();
    assert_eq!(scene.body_count(), 2);
    assert_eq!(scene.handler_count(), 1);

    for _ in 0..10 {
        scene.tick(0.01);
    }
    let body = scene.body(floor).unwrap();
    assert!(body.velocity().x < 0.0);
    assert!(body.centroid().x < 10.0);
}

#[test]
fn mutual_gravity_conserves_momentum() {
    let mut scene = SceneCore::new();
    let a = scene
        .create_body(shapes::circle(1.0, 12).unwrap(), 2.0, RgbColor::WHITE)
        .unwrap();
    let b = scene
        .create_body(shapes::circle(1.0, 12).unwrap(), 6.0, RgbColor::WHITE)
        .unwrap();
    scene.body_mut(b).unwrap().set_centroid(Vec2::new(100.0, 0.0));
    scene.register_force_handler(Gravity::new(1000.0, a, b), vec![a, b]);

    for _ in 0..100 {
        scene.tick(0.01);
    }

    let (va, vb) = (scene.body(a).unwrap().velocity(), scene.body(b).unwrap().velocity());
    assert!(va.x > 0.0);
    assert!(vb.x < 0.0);
    let momentum = va * 2.0 + vb * 6.0;
    assert!(momentum.length() < 1e-9);
}

#[test]
fn render_snapshot_follows_the_scene() {
    use polyscene_engine::simulation::{Camera, RenderSnapshot};

    let mut scene = SceneCore::new();
    place(&mut scene, prefabs::floor(100.0, 10.0, RgbColor::BLACK).unwrap(), 0.0, -20.0);
    let doomed = place(&mut scene, prefabs::boss(10.0).unwrap(), 0.0, 50.0);

    let mut snapshot = RenderSnapshot::new();
    snapshot.extract(&scene, &Camera::new());
    assert_eq!(snapshot.body_count(), 2);

    scene.remove_body(doomed);
    scene.tick(0.01);
    snapshot.extract(&scene, &Camera::new());
    assert_eq!(snapshot.body_count(), 1);
    assert_eq!(snapshot.offsets(), &[0, 4]);
}
