use log::debug;

use crate::systems::collision::CollisionCounters;
use crate::systems::forces::HandlerEnv;

use super::{PerfTimer, SceneCore};

/// What one tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    pub handlers_invoked: u32,
    pub handlers_pruned: u32,
    /// Registered by handlers during this tick; first invoked next tick.
    pub handlers_added: u32,
    pub bodies_integrated: u32,
    pub bodies_pruned: u32,
}

pub(super) fn tick(scene: &mut SceneCore, dt: f64) -> TickReport {
    debug_assert!(dt.is_finite() && dt >= 0.0, "tick dt must be finite and non-negative, got {dt}");

    let perf_on = scene.perf_enabled;
    let tick_timer = perf_on.then(PerfTimer::start);
    scene.counters = CollisionCounters::default();

    // === HANDLER PASS ===
    // Runs before integration so a body flagged by a handler is swept in
    // the same tick.
    let (mut report, handlers_ms) = PerfTimer::measure(perf_on, || run_handlers(scene));

    // === BODY PASS ===
    let (bodies, integrate_ms) = PerfTimer::measure(perf_on, || scene.bodies.integrate_and_sweep(dt));
    report.bodies_integrated = bodies.integrated;
    report.bodies_pruned = bodies.pruned;

    scene.status.time += dt;
    scene.frame += 1;

    if report.handlers_pruned > 0 || report.bodies_pruned > 0 {
        debug!(
            "frame {}: pruned {} handlers, {} bodies",
            scene.frame, report.handlers_pruned, report.bodies_pruned
        );
    }

    if let Some(timer) = tick_timer {
        let stats = &mut scene.perf_stats;
        stats.reset();
        stats.handlers_ms = handlers_ms;
        stats.integrate_ms = integrate_ms;
        stats.handlers_invoked = report.handlers_invoked;
        stats.handlers_pruned = report.handlers_pruned;
        stats.handlers_added = report.handlers_added;
        stats.bodies_integrated = report.bodies_integrated;
        stats.bodies_pruned = report.bodies_pruned;
        stats.narrow_phase_tests = scene.counters.narrow_phase_tests;
        stats.broad_phase_rejects = scene.counters.broad_phase_rejects;
        stats.collision_events = scene.counters.events;
        stats.body_count = scene.bodies.len() as u32;
        stats.handler_count = scene.handlers.len() as u32;
        stats.tick_ms = timer.elapsed_ms();
    }

    report
}

/// Back-to-front over the handler list: drop any handler with a flagged
/// dependent, invoke the rest, then append handlers registered meanwhile.
fn run_handlers(scene: &mut SceneCore) -> TickReport {
    let SceneCore {
        bodies,
        handlers,
        pending,
        input,
        rng,
        status,
        counters,
        ..
    } = scene;

    let mut report = TickReport::default();
    let mut env = HandlerEnv {
        bodies,
        input: &*input,
        rng: &mut **rng,
        status,
        pending,
        counters,
    };

    for i in (0..handlers.len()).rev() {
        if handlers[i].is_stale(&*env.bodies) {
            // Dropping the handler drops whatever its creator captured.
            handlers.remove(i);
            report.handlers_pruned += 1;
            continue;
        }
        handlers[i].invoke(&mut env);
        report.handlers_invoked += 1;
    }

    report.handlers_added = env.pending.len() as u32;
    handlers.append(env.pending);
    report
}
