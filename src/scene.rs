use crate::constants::*;
use crate::dom;
use crate::layout;
use flow_core::{PathId, PathSpec};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Write every path of `paths` into the SVG and move the hub, source icons
/// and tray to match. Missing elements are skipped.
pub fn apply_geometry(document: &web::Document, paths: &PathSpec) {
    let Some(svg) = document.get_element_by_id(SVG_ID) else {
        log::warn!("[scene] missing #{SVG_ID}");
        return;
    };
    let (w, h) = (paths.viewport.width, paths.viewport.height);
    _ = svg.set_attribute("viewBox", &format!("0 0 {w} {h}"));

    for (id, curve) in paths.iter() {
        let el = dom::ensure_child(document, &svg, &id.to_string(), |doc| {
            dom::create_svg_element(doc, "path")
        });
        if let Some(el) = el {
            _ = el.set_attribute("d", &curve.to_svg_path());
            _ = el.set_attribute("fill", "none");
            if let PathId::Source(_) = id {
                _ = el.set_attribute("class", "path-line");
            }
        }
    }
    apply_tunnel(document, &svg, paths);
    apply_transforms(document, paths);
}

fn apply_tunnel(document: &web::Document, svg: &web::Element, paths: &PathSpec) {
    let Some(group) = dom::ensure_child(document, svg, TUNNEL_GROUP_ID, |doc| {
        dom::create_svg_element(doc, "g")
    }) else {
        return;
    };
    _ = group.set_attribute("class", "tunnel-effect");
    let d = paths.tube.to_svg_path();
    for i in 0..TUNNEL_LAYERS {
        let (stroke, opacity) = layout::tunnel_layer(i);
        let id = layout::tunnel_layer_id(i);
        if let Some(el) = dom::ensure_child(document, &group, &id, |doc| {
            dom::create_svg_element(doc, "path")
        }) {
            _ = el.set_attribute("d", &d);
            _ = el.set_attribute("class", "tunnel-layer");
            dom::set_style(
                &el,
                &format!(
                    "fill:none;stroke:url(#tunnelGradient);stroke-width:{stroke};opacity:{opacity};filter:url(#tunnelGlow)"
                ),
            );
        }
    }
    let flow_id = format!("{TUNNEL_GROUP_ID}-flow");
    if let Some(el) = dom::ensure_child(document, &group, &flow_id, |doc| {
        dom::create_svg_element(doc, "path")
    }) {
        _ = el.set_attribute("d", &d);
        _ = el.set_attribute("class", "tunnel-flow");
        _ = el.set_attribute("fill", "none");
        _ = el.set_attribute("stroke-dasharray", TUNNEL_FLOW_DASH);
        _ = el.set_attribute("stroke-width", &TUNNEL_FLOW_STROKE.to_string());
    }
}

fn apply_transforms(document: &web::Document, paths: &PathSpec) {
    let s = paths.scaling_factor;
    if let Some(hub) = document.get_element_by_id(HUB_ID) {
        set_transform(&hub, &layout::centered_transform(layout::hub_position(paths), s));
    }
    if let Some(tray) = document.get_element_by_id(TRAY_ID) {
        set_transform(&tray, &layout::centered_transform(layout::tray_position(paths), s));
    }
    let icons = document.get_elements_by_class_name(SOURCE_ICON_CLASS);
    for (i, pos) in layout::source_icon_positions(paths).into_iter().enumerate() {
        if let Some(icon) = icons.item(i as u32) {
            set_transform(&icon, &layout::centered_transform(pos, s));
        }
    }
}

fn set_transform(el: &web::Element, transform: &str) {
    if let Some(html) = el.dyn_ref::<web::HtmlElement>() {
        _ = html.style().set_property("transform", transform);
    }
}

/// Mark output icon `index` active and clear the others.
pub fn highlight_output(document: &web::Document, index: usize) {
    let Ok(icons) = document.query_selector_all(&format!("[{OUTPUT_ICON_ATTR}]")) else {
        return;
    };
    for i in 0..icons.length() {
        let Some(el) = icons.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) else {
            continue;
        };
        let active = el
            .get_attribute(OUTPUT_ICON_ATTR)
            .and_then(|v| v.parse::<usize>().ok())
            == Some(index);
        _ = el.class_list().toggle_with_force(ACTIVE_CLASS, active);
    }
}
