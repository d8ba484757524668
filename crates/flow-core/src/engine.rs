//! The particle system.
//!
//! [`FlowEngine`] owns path geometry, the particle registries and every
//! pending timer. Hosts drive it with [`FlowEngine::tick`] and apply the
//! [`FlowEvent`]s it emits to whatever they render with.

use crate::catalog::{DataSource, OutputCategory, OutputFormat};
use crate::config::EngineConfig;
use crate::cycler::OutputCycler;
use crate::ease::Ease;
use crate::error::{FlowError, FlowResult};
use crate::geometry::{CubicBezier, PathId, PathSpec};
use crate::particle::{Particle, ParticleFrame, ParticleId, ParticleKind};
use crate::registry::ParticleRegistry;
use crate::rng::RandomSource;
use crate::scaling::Viewport;
use crate::scheduler::{Scheduler, TaskHandle};
use rand::rngs::StdRng;
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemovalReason {
    /// The particle reached the end of its path.
    Completed,
    /// Forcibly removed by a teardown (resize or shutdown).
    Teardown,
}

/// What a rendering layer has to apply.
#[derive(Clone, Debug, PartialEq)]
pub enum FlowEvent {
    Created {
        particle: Particle,
        frame: ParticleFrame,
    },
    Updated {
        id: ParticleId,
        frame: ParticleFrame,
    },
    Removed {
        id: ParticleId,
        kind: ParticleKind,
        reason: RemovalReason,
    },
    GeometryChanged {
        paths: PathSpec,
    },
    HighlightChanged {
        index: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    SpawnSource(usize),
    Complete(ParticleId),
    EmitOutput,
}

pub struct FlowEngine<R: RandomSource = StdRng> {
    config: EngineConfig,
    sources: Vec<DataSource>,
    rng: R,
    scheduler: Scheduler<Task>,
    registry: ParticleRegistry,
    particles: BTreeMap<ParticleId, Particle>,
    paths: Option<PathSpec>,
    cycler: OutputCycler,
    // At most one pending spawn attempt per source.
    pending_spawns: Vec<Option<TaskHandle>>,
    emitter: Option<TaskHandle>,
    initialized: bool,
    now: Duration,
    next_id: u64,
}

impl<R: RandomSource> FlowEngine<R> {
    pub fn new(config: EngineConfig, sources: Vec<DataSource>, rng: R) -> FlowResult<Self> {
        config.validate()?;
        let registry =
            ParticleRegistry::new(config.limits.max_per_source, config.limits.max_output);
        let cycler = OutputCycler::new(OutputFormat::ALL.len(), config.cycle_interval);
        let pending_spawns = vec![None; sources.len()];
        Ok(Self {
            config,
            sources,
            rng,
            scheduler: Scheduler::new(),
            registry,
            particles: BTreeMap::new(),
            paths: None,
            cycler,
            pending_spawns,
            emitter: None,
            initialized: false,
            now: Duration::ZERO,
            next_id: 0,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sources(&self) -> &[DataSource] {
        &self.sources
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn paths(&self) -> Option<&PathSpec> {
        self.paths.as_ref()
    }

    /// Scaling factor of the current geometry; `None` before the first resize.
    pub fn scaling_factor(&self) -> Option<f32> {
        self.paths.as_ref().map(|p| p.scaling_factor)
    }

    pub fn registry(&self) -> &ParticleRegistry {
        &self.registry
    }

    pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.get(&id)
    }

    pub fn live_particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.values()
    }

    pub fn live_count(&self) -> usize {
        self.particles.len()
    }

    pub fn highlighted_output(&self) -> usize {
        self.cycler.index()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn has_pending_spawn(&self, index: usize) -> bool {
        self.pending_spawns
            .get(index)
            .copied()
            .flatten()
            .is_some_and(|h| self.scheduler.is_pending(h))
    }

    /// Tear down, recompute geometry for `viewport`, then start again.
    ///
    /// Returns with zero live particles. A viewport that has not been laid out
    /// yet leaves the engine torn down without geometry.
    pub fn resize(&mut self, viewport: Viewport, out: &mut Vec<FlowEvent>) {
        self.teardown(out);
        if !viewport.is_laid_out() {
            log::debug!(
                "[flow] ignoring resize to {}x{} before layout",
                viewport.width,
                viewport.height
            );
            self.paths = None;
            return;
        }
        let paths = PathSpec::compute(viewport, self.sources.len(), &self.config.geometry);
        log::info!(
            "[flow] geometry {}x{} scale={:.3}",
            viewport.width,
            viewport.height,
            paths.scaling_factor
        );
        self.paths = Some(paths.clone());
        out.push(FlowEvent::GeometryChanged { paths });
        self.initialize();
    }

    /// Schedule the first spawn of every source, staggered by source order,
    /// and arm the output emitter.
    ///
    /// Calling it again replaces the pending first spawns and the emitter
    /// rather than adding to them.
    pub fn initialize(&mut self) {
        if self.paths.is_none() {
            log::debug!("[flow] initialize skipped: no geometry");
            return;
        }
        let start_delay = self.config.sources.start_delay;
        for index in 0..self.sources.len() {
            let delay = index as f32 * self.rng.in_range(start_delay);
            self.schedule_spawn(index, Duration::from_secs_f32(delay));
        }
        if let Some(previous) = self.emitter.take() {
            self.scheduler.cancel(previous);
        }
        if let Some(interval) = self.config.output.emit_interval {
            let due = self.now + Duration::from_secs_f32(interval);
            self.emitter = Some(self.scheduler.schedule_at(due, Task::EmitOutput));
        }
        self.initialized = true;
        log::info!("[flow] initialized {} sources", self.sources.len());
    }

    /// Cancel every pending task and remove every live particle.
    ///
    /// Idempotent; the engine can be initialized again afterwards.
    pub fn teardown(&mut self, out: &mut Vec<FlowEvent>) {
        let cancelled = self.scheduler.cancel_all();
        self.pending_spawns.iter_mut().for_each(|h| *h = None);
        self.emitter = None;
        let removed = self.particles.len();
        for (id, particle) in std::mem::take(&mut self.particles) {
            out.push(FlowEvent::Removed {
                id,
                kind: particle.kind,
                reason: RemovalReason::Teardown,
            });
        }
        self.registry.clear();
        self.initialized = false;
        if cancelled > 0 || removed > 0 {
            log::info!("[flow] teardown: {removed} particles removed, {cancelled} tasks cancelled");
        }
    }

    /// Try to start one particle on `path-index`.
    ///
    /// At capacity nothing is created and a retry is scheduled. Unknown
    /// sources and missing geometry are ignored.
    pub fn spawn_source_particle(
        &mut self,
        index: usize,
        out: &mut Vec<FlowEvent>,
    ) -> Option<ParticleId> {
        match self.try_spawn_source(index, out) {
            Ok(id) => Some(id),
            Err(FlowError::CapacityExceeded { registry, cap }) => {
                log::debug!("[flow] {registry} at capacity ({cap}); retrying later");
                self.schedule_next_spawn(index);
                None
            }
            Err(e) => {
                log::debug!("[flow] spawn on source {index} dropped: {e}");
                None
            }
        }
    }

    /// Try to start one particle down the tube. Dropped at capacity.
    pub fn spawn_output_particle(
        &mut self,
        category: OutputCategory,
        out: &mut Vec<FlowEvent>,
    ) -> Option<ParticleId> {
        match self.try_spawn_output(category, out) {
            Ok(id) => Some(id),
            Err(e) => {
                log::trace!("[flow] output particle dropped: {e}");
                None
            }
        }
    }

    /// Advance the clock by `dt`, run every task that falls due, then emit a
    /// frame for each live particle.
    pub fn tick(&mut self, dt: Duration, out: &mut Vec<FlowEvent>) {
        let target = self.now + dt;
        while let Some((due, _, task)) = self.scheduler.pop_due(target) {
            self.now = self.now.max(due);
            self.run(task, out);
        }
        self.now = target;

        if self.cycler.tick(dt) {
            out.push(FlowEvent::HighlightChanged {
                index: self.cycler.index(),
            });
        }

        if let Some(paths) = &self.paths {
            for p in self.particles.values() {
                if let Some(frame) = p.sample(self.now, paths) {
                    out.push(FlowEvent::Updated { id: p.id, frame });
                }
            }
        }
    }

    fn run(&mut self, task: Task, out: &mut Vec<FlowEvent>) {
        match task {
            Task::SpawnSource(index) => {
                if let Some(slot) = self.pending_spawns.get_mut(index) {
                    *slot = None;
                }
                self.spawn_source_particle(index, out);
            }
            Task::Complete(id) => self.complete(id, out),
            Task::EmitOutput => {
                self.emitter = None;
                let category =
                    OutputCategory::ALL[self.rng.pick(OutputCategory::ALL.len())];
                self.spawn_output_particle(category, out);
                if let Some(interval) = self.config.output.emit_interval {
                    let due = self.now + Duration::from_secs_f32(interval);
                    self.emitter = Some(self.scheduler.schedule_at(due, Task::EmitOutput));
                }
            }
        }
    }

    fn try_spawn_source(&mut self, index: usize, out: &mut Vec<FlowEvent>) -> FlowResult<ParticleId> {
        if index >= self.sources.len() {
            return Err(FlowError::UnknownSource(index));
        }
        if self.path(PathId::Source(index)).is_none() {
            return Err(FlowError::MissingGeometry);
        }
        let id = ParticleId(self.next_id);
        self.registry.register_source(index, id)?;
        self.next_id += 1;

        let tuning = &self.config.particles;
        let (scale, opacity, duration, end_scale) =
            (tuning.scale, tuning.opacity, tuning.duration, tuning.end_scale);
        let particle = Particle {
            id,
            kind: ParticleKind::Source { index },
            path: PathId::Source(index),
            start_scale: self.rng.in_range(scale),
            end_scale,
            start_opacity: self.rng.in_range(opacity),
            end_opacity: 0.0,
            spawned_at: self.now,
            duration: Duration::from_secs_f32(self.rng.in_range(duration)),
            ease: Ease::Linear,
        };
        log::trace!("[flow] source {index} spawned {:?} for {:?}", id, particle.duration);
        self.start(particle, out);
        Ok(id)
    }

    fn try_spawn_output(
        &mut self,
        category: OutputCategory,
        out: &mut Vec<FlowEvent>,
    ) -> FlowResult<ParticleId> {
        if self.path(PathId::Tube).is_none() {
            return Err(FlowError::MissingGeometry);
        }
        let id = ParticleId(self.next_id);
        self.registry.register_output(id)?;
        self.next_id += 1;

        let o = &self.config.output;
        let seconds = o.base_duration + self.rng.next_unit() * o.duration_jitter;
        let particle = Particle {
            id,
            kind: ParticleKind::Output { category },
            path: PathId::Tube,
            start_scale: 1.0,
            end_scale: 1.0,
            start_opacity: 1.0,
            end_opacity: 1.0,
            spawned_at: self.now,
            duration: Duration::from_secs_f32(seconds),
            ease: Ease::OutCubic,
        };
        self.start(particle, out);
        Ok(id)
    }

    fn path(&self, id: PathId) -> Option<&CubicBezier> {
        self.paths.as_ref().and_then(|p| p.get(id))
    }

    fn start(&mut self, particle: Particle, out: &mut Vec<FlowEvent>) {
        let frame = self
            .paths
            .as_ref()
            .and_then(|paths| particle.sample(self.now, paths));
        let Some(frame) = frame else {
            // Registered but not placeable: give the slot back.
            self.release(&particle);
            return;
        };
        self.scheduler
            .schedule_at(particle.completes_at(), Task::Complete(particle.id));
        out.push(FlowEvent::Created {
            particle: particle.clone(),
            frame,
        });
        self.particles.insert(particle.id, particle);
    }

    fn release(&mut self, particle: &Particle) {
        match particle.kind {
            ParticleKind::Source { index } => {
                self.registry.release_source(index, particle.id);
            }
            ParticleKind::Output { .. } => {
                self.registry.release_output(particle.id);
            }
        }
    }

    fn complete(&mut self, id: ParticleId, out: &mut Vec<FlowEvent>) {
        // Already gone after a teardown: nothing to release.
        let Some(particle) = self.particles.remove(&id) else {
            return;
        };
        self.release(&particle);
        out.push(FlowEvent::Removed {
            id,
            kind: particle.kind,
            reason: RemovalReason::Completed,
        });
        if let ParticleKind::Source { index } = particle.kind {
            self.schedule_next_spawn(index);
        }
    }

    fn schedule_next_spawn(&mut self, index: usize) {
        if self.has_pending_spawn(index) {
            return;
        }
        let delay = self.rng.in_range(self.config.particles.frequency);
        self.schedule_spawn(index, Duration::from_secs_f32(delay));
    }

    fn schedule_spawn(&mut self, index: usize, delay: Duration) {
        let Some(slot) = self.pending_spawns.get(index).copied() else {
            return;
        };
        if let Some(previous) = slot {
            self.scheduler.cancel(previous);
        }
        let handle = self
            .scheduler
            .schedule_at(self.now + delay, Task::SpawnSource(index));
        self.pending_spawns[index] = Some(handle);
    }
}
