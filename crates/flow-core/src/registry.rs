use crate::error::{FlowError, FlowResult, RegistryKind};
use crate::particle::ParticleId;
use fnv::{FnvHashMap, FnvHashSet};
use smallvec::SmallVec;

/// Live particle bookkeeping with hard caps.
///
/// Invariants: each source list holds at most `max_per_source` ids and the
/// output set at most `max_output`; an id is released at most once.
#[derive(Debug, Clone)]
pub struct ParticleRegistry {
    sources: FnvHashMap<usize, SmallVec<[ParticleId; 4]>>,
    output: FnvHashSet<ParticleId>,
    max_per_source: usize,
    max_output: usize,
}

impl ParticleRegistry {
    pub fn new(max_per_source: usize, max_output: usize) -> Self {
        Self {
            sources: FnvHashMap::default(),
            output: FnvHashSet::default(),
            max_per_source,
            max_output,
        }
    }

    pub fn source_count(&self, source: usize) -> usize {
        self.sources.get(&source).map_or(0, |l| l.len())
    }

    pub fn output_count(&self) -> usize {
        self.output.len()
    }

    pub fn total(&self) -> usize {
        self.sources.values().map(|l| l.len()).sum::<usize>() + self.output.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn has_source_capacity(&self, source: usize) -> bool {
        self.source_count(source) < self.max_per_source
    }

    pub fn has_output_capacity(&self) -> bool {
        self.output.len() < self.max_output
    }

    /// Check-cap-then-register in one step.
    pub fn register_source(&mut self, source: usize, id: ParticleId) -> FlowResult<()> {
        let list = self.sources.entry(source).or_default();
        if list.len() >= self.max_per_source {
            return Err(FlowError::CapacityExceeded {
                registry: RegistryKind::Source(source),
                cap: self.max_per_source,
            });
        }
        list.push(id);
        Ok(())
    }

    pub fn register_output(&mut self, id: ParticleId) -> FlowResult<()> {
        if self.output.len() >= self.max_output {
            return Err(FlowError::CapacityExceeded {
                registry: RegistryKind::Output,
                cap: self.max_output,
            });
        }
        self.output.insert(id);
        Ok(())
    }

    pub fn release_source(&mut self, source: usize, id: ParticleId) -> bool {
        let Some(list) = self.sources.get_mut(&source) else {
            return false;
        };
        let Some(pos) = list.iter().position(|p| *p == id) else {
            return false;
        };
        list.remove(pos);
        if list.is_empty() {
            self.sources.remove(&source);
        }
        true
    }

    pub fn release_output(&mut self, id: ParticleId) -> bool {
        self.output.remove(&id)
    }

    pub fn clear(&mut self) {
        self.sources.clear();
        self.output.clear();
    }
}
