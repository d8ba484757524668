use crate::layout;
use crate::scene;
use flow_core::{DataSource, FlowEvent, ParticleFrame, ParticleId, ParticleKind};
use fnv::FnvHashMap;
use web_sys as web;

/// Applies engine events to particle elements inside the container.
///
/// Elements the renderer no longer finds (container detached, node removed
/// by someone else) are dropped from tracking without error.
pub struct ParticleRenderer {
    document: web::Document,
    container: web::Element,
    sources: Vec<DataSource>,
    elements: FnvHashMap<ParticleId, (web::Element, Option<&'static str>)>,
}

impl ParticleRenderer {
    pub fn new(document: web::Document, container: web::Element, sources: Vec<DataSource>) -> Self {
        Self {
            document,
            container,
            sources,
            elements: FnvHashMap::default(),
        }
    }

    pub fn apply(&mut self, events: &[FlowEvent]) {
        for ev in events {
            match ev {
                FlowEvent::Created { particle, frame } => self.create(particle.id, particle.kind, frame),
                FlowEvent::Updated { id, frame } => self.update(*id, frame),
                FlowEvent::Removed { id, .. } => self.remove(*id),
                FlowEvent::GeometryChanged { paths } => scene::apply_geometry(&self.document, paths),
                FlowEvent::HighlightChanged { index } => {
                    scene::highlight_output(&self.document, *index)
                }
            }
        }
    }

    fn create(&mut self, id: ParticleId, kind: ParticleKind, frame: &ParticleFrame) {
        let Ok(el) = self.document.create_element("div") else {
            return;
        };
        let (class, color) = layout::particle_appearance(kind, &self.sources);
        el.set_class_name(&class);
        _ = el.set_attribute("style", &layout::particle_style(frame, color));
        if self.container.append_child(&el).is_err() {
            log::debug!("[render] container rejected particle {:?}", id);
            return;
        }
        self.elements.insert(id, (el, color));
    }

    fn update(&mut self, id: ParticleId, frame: &ParticleFrame) {
        let Some((el, color)) = self.elements.get(&id) else {
            return;
        };
        if !el.is_connected() {
            self.elements.remove(&id);
            return;
        }
        _ = el.set_attribute("style", &layout::particle_style(frame, *color));
    }

    fn remove(&mut self, id: ParticleId) {
        if let Some((el, _)) = self.elements.remove(&id) {
            el.remove();
        }
    }

    /// Remove every tracked element, plus any stray particle nodes left in
    /// the container.
    pub fn clear(&mut self) {
        for (_, (el, _)) in self.elements.drain() {
            el.remove();
        }
        for selector in [
            crate::constants::SOURCE_PARTICLE_CLASS,
            crate::constants::OUTPUT_PARTICLE_CLASS,
        ] {
            if let Ok(nodes) = self.container.query_selector_all(&format!(".{selector}")) {
                for i in 0..nodes.length() {
                    if let Some(node) = nodes.item(i) {
                        if let Some(parent) = node.parent_node() {
                            _ = parent.remove_child(&node);
                        }
                    }
                }
            }
        }
    }
}
