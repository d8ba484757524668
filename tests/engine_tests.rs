// Host-side tests for the particle system.

use flow_core::*;
use std::time::Duration;

fn quiet_config() -> EngineConfig {
    let mut cfg = EngineConfig::default();
    cfg.output.emit_interval = None;
    cfg
}

fn engine_with(cfg: EngineConfig) -> FlowEngine<ConstantRandom> {
    FlowEngine::new(cfg, DEFAULT_SOURCES.to_vec(), ConstantRandom(0.5)).unwrap()
}

fn laid_out(cfg: EngineConfig) -> (FlowEngine<ConstantRandom>, Vec<FlowEvent>) {
    let mut engine = engine_with(cfg);
    let mut events = Vec::new();
    engine.resize(Viewport::new(1920.0, 1080.0), &mut events);
    (engine, events)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn created_for_source(events: &[FlowEvent], index: usize) -> Vec<ParticleId> {
    events
        .iter()
        .filter_map(|ev| match ev {
            FlowEvent::Created { particle, .. }
                if particle.kind == (ParticleKind::Source { index }) =>
            {
                Some(particle.id)
            }
            _ => None,
        })
        .collect()
}

fn assert_caps<R: RandomSource>(engine: &FlowEngine<R>) {
    let limits = &engine.config().limits;
    for i in 0..engine.sources().len() {
        assert!(engine.registry().source_count(i) <= limits.max_per_source);
    }
    assert!(engine.registry().output_count() <= limits.max_output);
}

#[test]
fn resize_emits_geometry_and_initializes() {
    let (engine, events) = laid_out(quiet_config());
    assert!(engine.is_initialized());
    assert_eq!(engine.live_count(), 0);
    assert_eq!(engine.scaling_factor(), Some(1.0));
    let geometry = events.iter().find_map(|ev| match ev {
        FlowEvent::GeometryChanged { paths } => Some(paths),
        _ => None,
    });
    let paths = geometry.expect("geometry event");
    assert_eq!(paths.sources.len(), DEFAULT_SOURCES.len());
    // One pending first spawn per source
    for i in 0..DEFAULT_SOURCES.len() {
        assert!(engine.has_pending_spawn(i));
    }
}

#[test]
fn first_spawns_are_staggered_by_source_order() {
    // start delay 1..2 at 0.5 -> 1.5s per index
    let (mut engine, _) = laid_out(quiet_config());
    let mut events = Vec::new();

    engine.tick(ms(10), &mut events);
    assert_eq!(created_for_source(&events, 0).len(), 1);
    assert!(created_for_source(&events, 1).is_empty());

    events.clear();
    engine.tick(ms(1400), &mut events);
    assert!(created_for_source(&events, 1).is_empty());

    events.clear();
    engine.tick(ms(200), &mut events);
    assert_eq!(created_for_source(&events, 1).len(), 1);
    assert!(created_for_source(&events, 2).is_empty());
}

#[test]
fn spawn_at_capacity_is_dropped_but_retried() {
    let (mut engine, _) = laid_out(quiet_config());
    let mut events = Vec::new();
    assert_eq!(engine.config().limits.max_per_source, 2);

    assert!(engine.spawn_source_particle(0, &mut events).is_some());
    assert!(engine.spawn_source_particle(0, &mut events).is_some());
    assert_eq!(engine.registry().source_count(0), 2);

    events.clear();
    assert!(engine.spawn_source_particle(0, &mut events).is_none());
    assert!(events.is_empty(), "no element created at capacity");
    assert_eq!(engine.registry().source_count(0), 2);
    assert!(engine.has_pending_spawn(0));

    // Particles live 3.5s; retries come every 3s. A slot frees and the
    // source grows again without any further external call.
    let mut grew = false;
    for _ in 0..100 {
        events.clear();
        engine.tick(ms(100), &mut events);
        assert_caps(&engine);
        if !created_for_source(&events, 0).is_empty() {
            grew = true;
            break;
        }
    }
    assert!(grew);
    assert!(engine.now() > Duration::from_secs_f32(3.5));
}

#[test]
fn completion_removes_and_reschedules() {
    let (mut engine, _) = laid_out(quiet_config());
    let mut events = Vec::new();
    engine.tick(Duration::ZERO, &mut events);
    let id = created_for_source(&events, 0)[0];

    events.clear();
    engine.tick(ms(3400), &mut events);
    assert!(engine.particle(id).is_some());

    events.clear();
    engine.tick(ms(200), &mut events);
    assert!(engine.particle(id).is_none());
    assert!(events.contains(&FlowEvent::Removed {
        id,
        kind: ParticleKind::Source { index: 0 },
        reason: RemovalReason::Completed,
    }));
    assert_eq!(engine.registry().source_count(0), 0);
    assert!(engine.has_pending_spawn(0));
}

#[test]
fn source_particle_tweens_linearly_along_its_path() {
    let (mut engine, _) = laid_out(quiet_config());
    let mut events = Vec::new();
    engine.tick(Duration::ZERO, &mut events);
    let id = created_for_source(&events, 0)[0];
    let particle = engine.particle(id).unwrap().clone();
    assert_eq!(particle.path, PathId::Source(0));
    assert_eq!(particle.ease, Ease::Linear);
    assert!((particle.start_scale - 0.35).abs() < 1e-6);
    assert!((particle.start_opacity - 0.9).abs() < 1e-6);
    assert_eq!(particle.duration, Duration::from_secs_f32(3.5));

    events.clear();
    engine.tick(ms(1750), &mut events);
    let frame = events
        .iter()
        .find_map(|ev| match ev {
            FlowEvent::Updated { id: u, frame } if *u == id => Some(*frame),
            _ => None,
        })
        .unwrap();
    let curve = engine.paths().unwrap().sources[0];
    assert!((frame.position - curve.point_at(0.5)).length() < 1e-2);
    assert!((frame.rotation - curve.angle_at(0.5)).abs() < 1e-2);
    assert!((frame.opacity - 0.45).abs() < 1e-3);
    assert!((frame.scale - 0.675).abs() < 1e-3);
}

#[test]
fn output_particle_starts_at_tube_and_eases_out() {
    let (mut engine, _) = laid_out(quiet_config());
    let mut events = Vec::new();
    let id = engine
        .spawn_output_particle(OutputCategory::Geospatial, &mut events)
        .unwrap();
    let tube = engine.paths().unwrap().tube;
    match &events[0] {
        FlowEvent::Created { particle, frame } => {
            assert_eq!(particle.path, PathId::Tube);
            assert_eq!(particle.ease, Ease::OutCubic);
            assert_eq!(
                particle.kind,
                ParticleKind::Output {
                    category: OutputCategory::Geospatial
                }
            );
            // 1.5s base + 0.5 * 0.4s jitter
            assert!((particle.duration.as_secs_f32() - 1.7).abs() < 1e-5);
            assert!((frame.position - tube.start).length() < 1e-3);
        }
        other => panic!("unexpected {other:?}"),
    }

    events.clear();
    engine.tick(ms(850), &mut events);
    let frame = events
        .iter()
        .find_map(|ev| match ev {
            FlowEvent::Updated { id: u, frame } if *u == id => Some(*frame),
            _ => None,
        })
        .unwrap();
    // Ease-out is ahead of linear at the midpoint
    assert!((frame.position - tube.point_at(0.875)).length() < 0.5);
    assert_eq!(frame.opacity, 1.0);

    events.clear();
    engine.tick(ms(900), &mut events);
    assert_eq!(engine.registry().output_count(), 0);
    assert!(events.iter().any(|ev| matches!(
        ev,
        FlowEvent::Removed { id: r, reason: RemovalReason::Completed, .. } if *r == id
    )));
}

#[test]
fn output_spawn_at_capacity_is_dropped() {
    let mut cfg = quiet_config();
    cfg.limits.max_output = 2;
    let (mut engine, _) = laid_out(cfg);
    let mut events = Vec::new();
    assert!(engine.spawn_output_particle(OutputCategory::Api, &mut events).is_some());
    assert!(engine.spawn_output_particle(OutputCategory::Pdf, &mut events).is_some());
    let before = events.len();
    assert!(engine.spawn_output_particle(OutputCategory::Api, &mut events).is_none());
    assert_eq!(events.len(), before);
    assert_eq!(engine.registry().output_count(), 2);
}

#[test]
fn missing_targets_are_ignored() {
    let mut engine = engine_with(quiet_config());
    let mut events = Vec::new();
    // No geometry yet
    assert!(engine.spawn_source_particle(0, &mut events).is_none());
    assert!(engine.spawn_output_particle(OutputCategory::Api, &mut events).is_none());
    engine.initialize();
    assert!(!engine.is_initialized());
    assert_eq!(engine.pending_tasks(), 0);
    assert!(events.is_empty());
    // Nothing holds a registry slot after a rejected spawn
    assert!(engine.registry().is_empty());

    engine.resize(Viewport::new(800.0, 600.0), &mut events);
    events.clear();
    assert!(engine.spawn_source_particle(99, &mut events).is_none());
    assert!(!engine.has_pending_spawn(99));
    assert!(events.is_empty());
    assert!(engine.registry().is_empty());
}

fn outputs_created_in(engine: &mut FlowEngine<ConstantRandom>, span: Duration) -> usize {
    let mut events = Vec::new();
    let mut elapsed = Duration::ZERO;
    let mut created = 0;
    while elapsed < span {
        events.clear();
        engine.tick(ms(10), &mut events);
        elapsed += ms(10);
        created += events
            .iter()
            .filter(|ev| {
                matches!(
                    ev,
                    FlowEvent::Created { particle, .. }
                        if matches!(particle.kind, ParticleKind::Output { .. })
                )
            })
            .count();
    }
    created
}

#[test]
fn initialize_again_replaces_pending_work() {
    let (mut once, _) = laid_out(EngineConfig::default());
    let (mut twice, _) = laid_out(EngineConfig::default());
    // One first spawn per source plus the emitter
    let pending = DEFAULT_SOURCES.len() + 1;
    assert_eq!(twice.pending_tasks(), pending);

    twice.initialize();
    twice.initialize();
    assert_eq!(twice.pending_tasks(), pending);

    // 250ms emitter over one second, well under the output cap
    let expected = outputs_created_in(&mut once, ms(1000));
    assert_eq!(expected, 4);
    assert_eq!(outputs_created_in(&mut twice, ms(1000)), expected);
}

#[test]
fn teardown_twice_is_safe() {
    let (mut engine, _) = laid_out(EngineConfig::default());
    let mut events = Vec::new();
    engine.tick(ms(2000), &mut events);
    assert!(engine.live_count() > 0);

    events.clear();
    engine.teardown(&mut events);
    assert_eq!(engine.live_count(), 0);
    assert!(engine.registry().is_empty());
    assert_eq!(engine.pending_tasks(), 0);
    assert!(events
        .iter()
        .all(|ev| matches!(ev, FlowEvent::Removed { reason: RemovalReason::Teardown, .. })));

    events.clear();
    engine.teardown(&mut events);
    assert!(events.is_empty());
    assert_eq!(engine.live_count(), 0);
    assert!(engine.registry().is_empty());

    // Nothing fires after teardown
    engine.tick(ms(10_000), &mut events);
    assert_eq!(engine.live_count(), 0);

    // And it can start again
    engine.initialize();
    engine.tick(ms(10), &mut events);
    assert!(engine.live_count() > 0);
}

#[test]
fn resize_with_particles_in_flight_clears_everything() {
    let (mut engine, _) = laid_out(quiet_config());
    let mut events = Vec::new();
    for i in 0..3 {
        assert!(engine.spawn_source_particle(i, &mut events).is_some());
    }
    for category in [OutputCategory::Api, OutputCategory::Pdf] {
        assert!(engine.spawn_output_particle(category, &mut events).is_some());
    }
    assert_eq!(engine.live_count(), 5);

    events.clear();
    let vp = Viewport::new(1280.0, 720.0);
    engine.resize(vp, &mut events);
    assert_eq!(engine.live_count(), 0);
    assert!(engine.registry().is_empty());

    let torn_down = events
        .iter()
        .filter(|ev| matches!(ev, FlowEvent::Removed { reason: RemovalReason::Teardown, .. }))
        .count();
    assert_eq!(torn_down, 5);

    let paths = engine.paths().unwrap();
    assert_eq!(paths.viewport, vp);
    assert_eq!(paths.sources.len(), DEFAULT_SOURCES.len());
    for s in &paths.sources {
        assert_eq!(s.end, vp.center());
    }
    // Removals precede the new geometry
    let geometry_at = events
        .iter()
        .position(|ev| matches!(ev, FlowEvent::GeometryChanged { .. }))
        .unwrap();
    assert_eq!(geometry_at, torn_down);
}

#[test]
fn resize_before_layout_leaves_engine_idle() {
    let (mut engine, _) = laid_out(EngineConfig::default());
    let mut events = Vec::new();
    engine.tick(ms(500), &mut events);
    engine.resize(Viewport::new(0.0, 0.0), &mut events);
    assert!(engine.paths().is_none());
    assert_eq!(engine.pending_tasks(), 0);
    assert_eq!(engine.live_count(), 0);
}

#[test]
fn caps_hold_over_long_unattended_run() {
    let mut engine =
        FlowEngine::new(EngineConfig::default(), DEFAULT_SOURCES.to_vec(), seeded(7)).unwrap();
    let mut events = Vec::new();
    engine.resize(Viewport::new(1920.0, 1080.0), &mut events);
    let mut created = 0usize;
    let mut peak_output = 0usize;
    for step in 0..20_000u32 {
        events.clear();
        engine.tick(ms(16), &mut events);
        assert_caps(&engine);
        created += events
            .iter()
            .filter(|ev| matches!(ev, FlowEvent::Created { .. }))
            .count();
        peak_output = peak_output.max(engine.registry().output_count());
        if step == 10_000 {
            engine.resize(Viewport::new(1024.0, 768.0), &mut events);
            assert_eq!(engine.live_count(), 0);
        }
    }
    assert!(created > 100);
    assert!(peak_output > 0);
    // Live particles are bounded by the caps
    let limits = &engine.config().limits;
    assert!(engine.live_count() <= limits.max_per_source * DEFAULT_SOURCES.len() + limits.max_output);
}

#[test]
fn highlight_advances_every_cycle_interval() {
    let (mut engine, _) = laid_out(quiet_config());
    let mut events = Vec::new();
    assert_eq!(engine.highlighted_output(), 0);
    engine.tick(ms(2999), &mut events);
    assert!(!events
        .iter()
        .any(|ev| matches!(ev, FlowEvent::HighlightChanged { .. })));
    events.clear();
    engine.tick(ms(1), &mut events);
    assert!(events.contains(&FlowEvent::HighlightChanged { index: 1 }));
    // Teardown does not reset the tray
    engine.teardown(&mut events);
    assert_eq!(engine.highlighted_output(), 1);
}

#[test]
fn output_emitter_uses_injected_randomness() {
    let mut cfg = EngineConfig::default();
    cfg.output.emit_interval = Some(0.25);
    // Every draw is 0.9: pick(3) -> index 2 (pdf)
    let mut engine =
        FlowEngine::new(cfg, DEFAULT_SOURCES.to_vec(), ConstantRandom(0.9)).unwrap();
    let mut events = Vec::new();
    engine.resize(Viewport::new(1920.0, 1080.0), &mut events);
    events.clear();
    engine.tick(ms(260), &mut events);
    let outputs: Vec<_> = events
        .iter()
        .filter_map(|ev| match ev {
            FlowEvent::Created { particle, .. } => match particle.kind {
                ParticleKind::Output { category } => Some(category),
                _ => None,
            },
            _ => None,
        })
        .collect();
    assert_eq!(outputs, vec![OutputCategory::Pdf]);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = EngineConfig::default();
    cfg.particles.duration = Range::new(5.0, 2.0);
    assert!(matches!(
        FlowEngine::new(cfg, DEFAULT_SOURCES.to_vec(), ConstantRandom(0.5)),
        Err(FlowError::InvalidConfig(_))
    ));

    let mut cfg = EngineConfig::default();
    cfg.limits.max_per_source = 0;
    assert!(FlowEngine::new(cfg, DEFAULT_SOURCES.to_vec(), ConstantRandom(0.5)).is_err());
}
