#![forbid(unsafe_code)]

//! Real-DOM side of the view tree.
//!
//! The mount element has exactly one child: the node built from the view
//! root. Patch paths are child indices from that child, and every view
//! [`Node`] maps to one DOM node (text nodes included), so paths resolve
//! with `childNodes` lookups.
//!
//! Form controls get `value`/`checked` as properties as well as
//! attributes; the attribute alone does not move a control the user has
//! already touched.
//!
//! Input is captured with listeners delegated on the mount element:
//!
//! | DOM event | Target | Program event |
//! |-----------|--------|---------------|
//! | `click` | closest `[data-link]` | `Navigate` (default prevented) |
//! | `click` | closest `[data-action]` | `Action` |
//! | `change` | `select[data-action-select]` | `Action` (option value) |
//! | `input` / `change` | `[data-field]` | `Input` |
//! | `error` (capture) | `img[data-asset]` | `AssetError` |

use std::fmt;

use folio_core::Event;
use folio_core::diff::Patch;
use folio_core::view::{Element as VElement, Node};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
};

use crate::storage::js_error;

#[derive(Debug)]
pub(crate) enum DomError {
    /// A patch path did not resolve against the live DOM.
    BadPath(Vec<usize>),
    /// A DOM call threw.
    Js(String),
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadPath(path) => write!(f, "no DOM node at {path:?}"),
            Self::Js(msg) => write!(f, "DOM call failed: {msg}"),
        }
    }
}

impl std::error::Error for DomError {}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error(&value))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Building and patching
// ─────────────────────────────────────────────────────────────────────────────

fn build(doc: &Document, node: &Node) -> Result<web_sys::Node, DomError> {
    match node {
        Node::Text(text) => Ok(doc.create_text_node(text).into()),
        Node::Element(el) => Ok(build_element(doc, el)?.into()),
    }
}

fn build_element(doc: &Document, el: &VElement) -> Result<Element, DomError> {
    let out = doc.create_element(el.tag)?;
    for child in &el.children {
        out.append_child(&build(doc, child)?)?;
    }
    // Attributes after children: a select's value needs its options.
    for (name, value) in &el.attrs {
        set_attr(&out, name, value)?;
    }
    Ok(out)
}

fn set_attr(el: &Element, name: &str, value: &str) -> Result<(), DomError> {
    el.set_attribute(name, value)?;
    match name {
        "value" => set_value(el, value),
        "checked" => set_checked(el, true),
        _ => {}
    }
    Ok(())
}

fn remove_attr(el: &Element, name: &str) -> Result<(), DomError> {
    el.remove_attribute(name)?;
    match name {
        "value" => set_value(el, ""),
        "checked" => set_checked(el, false),
        _ => {}
    }
    Ok(())
}

fn set_value(el: &Element, value: &str) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        if input.type_() != "radio" && input.value() != value {
            input.set_value(value);
        }
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        if area.value() != value {
            area.set_value(value);
        }
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.set_value(value);
    }
}

fn set_checked(el: &Element, on: bool) {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.set_checked(on);
    }
}

fn resolve(mount: &Element, path: &[usize]) -> Result<web_sys::Node, DomError> {
    let bad = || DomError::BadPath(path.to_vec());
    let mut node = mount.first_child().ok_or_else(bad)?;
    for &index in path {
        let index = u32::try_from(index).map_err(|_| bad())?;
        node = node.child_nodes().item(index).ok_or_else(bad)?;
    }
    Ok(node)
}

fn as_element(node: web_sys::Node, path: &[usize]) -> Result<Element, DomError> {
    node.dyn_into::<Element>()
        .map_err(|_| DomError::BadPath(path.to_vec()))
}

/// Apply `patches` in order under `mount`.
pub(crate) fn apply(doc: &Document, mount: &Element, patches: &[Patch]) -> Result<(), DomError> {
    for patch in patches {
        match patch {
            Patch::Replace { path, node } => {
                let fresh = build(doc, node)?;
                if path.is_empty() {
                    mount.set_text_content(None);
                    mount.append_child(&fresh)?;
                } else {
                    let old = resolve(mount, path)?;
                    let parent = old
                        .parent_node()
                        .ok_or_else(|| DomError::BadPath(path.clone()))?;
                    parent.replace_child(&fresh, &old)?;
                }
            }
            Patch::SetText { path, text } => {
                resolve(mount, path)?.set_text_content(Some(text));
            }
            Patch::SetAttr { path, name, value } => {
                set_attr(&as_element(resolve(mount, path)?, path)?, name, value)?;
            }
            Patch::RemoveAttr { path, name } => {
                remove_attr(&as_element(resolve(mount, path)?, path)?, name)?;
            }
            Patch::Append { path, node } => {
                resolve(mount, path)?.append_child(&build(doc, node)?)?;
            }
            Patch::Truncate { path, len } => {
                let parent = resolve(mount, path)?;
                let keep = u32::try_from(*len).unwrap_or(u32::MAX);
                while parent.child_nodes().length() > keep {
                    match parent.last_child() {
                        Some(last) => {
                            parent.remove_child(&last)?;
                        }
                        None => break,
                    }
                }
            }
        }
    }
    Ok(())
}

/// Throw away the mounted DOM and rebuild it from `root`.
pub(crate) fn rebuild(doc: &Document, mount: &Element, root: &Node) -> Result<(), DomError> {
    mount.set_text_content(None);
    mount.append_child(&build(doc, root)?)?;
    Ok(())
}

/// Focus the control bound to `field`.
pub(crate) fn focus_field(mount: &Element, field: &str) {
    let selector = format!("[data-field=\"{field}\"]");
    let target = mount
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok());
    match target {
        Some(el) => {
            let _ = el.focus();
        }
        None => tracing::debug!(field, "no control to focus"),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Delegated input
// ─────────────────────────────────────────────────────────────────────────────

fn control_value(el: &Element) -> Option<String> {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        Some(area.value())
    } else {
        el.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
    }
}

fn target_element(event: &web_sys::Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

fn on_click(event: &web_sys::Event) -> Option<Event> {
    let target = target_element(event)?;
    let hit = target
        .closest("[data-link], [data-action]")
        .ok()
        .flatten()?;
    if hit.has_attribute("data-link") {
        let href = hit.get_attribute("href")?;
        event.prevent_default();
        return Some(Event::link(href));
    }
    if hit.tag_name().eq_ignore_ascii_case("select") {
        return None;
    }
    hit.get_attribute("data-action").map(Event::action)
}

fn on_edit(event: &web_sys::Event) -> Option<Event> {
    let target = target_element(event)?;
    if event.type_() == "change" && target.has_attribute("data-action-select") {
        return control_value(&target).map(Event::action);
    }
    let field = target.get_attribute("data-field")?;
    let is_text = target.dyn_ref::<HtmlTextAreaElement>().is_some()
        || target
            .dyn_ref::<HtmlInputElement>()
            .is_some_and(|input| input.type_() != "radio");
    // Text controls report on `input`, radios and selects on `change`.
    if is_text != (event.type_() == "input") {
        return None;
    }
    Some(Event::input(field, control_value(&target)?))
}

fn on_error(event: &web_sys::Event) -> Option<Event> {
    let asset = target_element(event)?.get_attribute("data-asset")?;
    Some(Event::AssetError { asset })
}

/// Delegated listeners on the mount element. Dropping this value does not
/// detach them; call [`Delegates::detach`].
pub(crate) struct Delegates {
    bound: Vec<(&'static str, bool, Closure<dyn FnMut(web_sys::Event)>)>,
}

impl Delegates {
    pub(crate) fn attach(
        mount: &Element,
        emit: impl Fn(Event) + Clone + 'static,
    ) -> Result<Self, DomError> {
        type Translate = fn(&web_sys::Event) -> Option<Event>;
        let table: [(&'static str, bool, Translate); 4] = [
            ("click", false, on_click),
            ("input", false, on_edit),
            ("change", false, on_edit),
            // `error` does not bubble.
            ("error", true, on_error),
        ];
        let mut bound = Vec::with_capacity(table.len());
        for (name, capture, translate) in table {
            let emit = emit.clone();
            let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
                if let Some(event) = translate(&ev) {
                    emit(event);
                }
            });
            mount.add_event_listener_with_callback_and_bool(
                name,
                callback.as_ref().unchecked_ref(),
                capture,
            )?;
            bound.push((name, capture, callback));
        }
        Ok(Self { bound })
    }

    pub(crate) fn detach(&mut self, mount: &Element) {
        for (name, capture, callback) in self.bound.drain(..) {
            let _ = mount.remove_event_listener_with_callback_and_bool(
                name,
                callback.as_ref().unchecked_ref(),
                capture,
            );
        }
    }
}
