use crate::constants::SVG_NS;
use flow_core::Viewport;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Current `innerWidth` x `innerHeight`, or `None` if the window is gone.
pub fn viewport_size() -> Option<Viewport> {
    let w = web::window()?;
    let width = w.inner_width().ok()?.as_f64()?;
    let height = w.inner_height().ok()?.as_f64()?;
    Some(Viewport::new(width as f32, height as f32))
}

pub fn create_svg_element(document: &web::Document, tag: &str) -> Option<web::Element> {
    document.create_element_ns(Some(SVG_NS), tag).ok()
}

pub fn set_style(el: &web::Element, style: &str) {
    _ = el.set_attribute("style", style);
}

/// Replace or create the child of `parent` with the given id.
pub fn ensure_child(
    document: &web::Document,
    parent: &web::Element,
    id: &str,
    make: impl FnOnce(&web::Document) -> Option<web::Element>,
) -> Option<web::Element> {
    if let Some(el) = document.get_element_by_id(id) {
        return Some(el);
    }
    let el = make(document)?;
    el.set_id(id);
    parent.append_child(&el).ok()?;
    Some(el)
}
