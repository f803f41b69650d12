//! Small DOM helpers shared by the page controllers

use phishscan_core::MessagePlacement;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Node};

pub fn document_of(root: &Element) -> Result<Document, JsValue> {
    root.owner_document()
        .ok_or_else(|| JsValue::from_str("Element has no owner document"))
}

pub fn query(root: &Element, selector: &str) -> Result<Option<Element>, JsValue> {
    root.query_selector(selector)
}

/// All matches in document order
pub fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, JsValue> {
    let list = root.query_selector_all(selector)?;
    let mut elements = Vec::with_capacity(list.length() as usize);
    for i in 0..list.length() {
        if let Some(element) = list.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
            elements.push(element);
        }
    }
    Ok(elements)
}

/// Trimmed text content of an optional element, empty when missing
pub fn text_of(element: Option<Element>) -> String {
    element
        .and_then(|element| element.text_content())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

pub fn create_element(
    document: &Document,
    tag: &str,
    class: &str,
    text: Option<&str>,
) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    if let Some(text) = text {
        element.set_text_content(Some(text));
    }
    Ok(element)
}

pub fn create_button(document: &Document, class: &str, label: &str) -> Result<Element, JsValue> {
    let button = create_element(document, "button", class, Some(label))?;
    button.set_attribute("type", "button")?;
    Ok(button)
}

pub fn set_styles(element: &Element, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
        let style = html_element.style();
        for (property, value) in styles {
            style.set_property(property, value)?;
        }
    }
    Ok(())
}

pub fn clear_styles(element: &Element, properties: &[&str]) -> Result<(), JsValue> {
    if let Some(html_element) = element.dyn_ref::<HtmlElement>() {
        let style = html_element.style();
        for property in properties {
            style.remove_property(property)?;
        }
    }
    Ok(())
}

pub fn set_visible(element: &Element, visible: bool) -> Result<(), JsValue> {
    if visible {
        clear_styles(element, &["display"])
    } else {
        set_styles(element, &[("display", "none")])
    }
}

pub fn is_hidden(element: &Element) -> bool {
    element
        .dyn_ref::<HtmlElement>()
        .and_then(|html_element| html_element.style().get_property_value("display").ok())
        .map(|display| display == "none")
        .unwrap_or(false)
}

/// Remove the children of `parent` carrying `class`. Returns how many were removed.
pub fn remove_children_with_class(parent: &Element, class: &str) -> Result<usize, JsValue> {
    let parent_node: &Node = parent.as_ref();
    let mut removed = 0;
    for element in query_all(parent, &format!(".{}", class))? {
        let is_child = element
            .parent_node()
            .map(|node| node.is_same_node(Some(parent_node)))
            .unwrap_or(false);
        if is_child {
            element.remove();
            removed += 1;
        }
    }
    Ok(removed)
}

/// Insert `node` relative to `anchor`, first removing any sibling (or child, for
/// `FormTop`) with the same `class`. Afterwards exactly one node of that class
/// exists at the placement.
pub fn replace_or_insert(
    anchor: &Element,
    placement: MessagePlacement,
    class: &str,
    node: &Element,
) -> Result<(), JsValue> {
    match placement {
        MessagePlacement::AfterFileInput => {
            if let Some(parent) = anchor.parent_element() {
                remove_children_with_class(&parent, class)?;
            }
            anchor.after_with_node_1(node)?;
        }
        MessagePlacement::FormTop => {
            remove_children_with_class(anchor, class)?;
            anchor.prepend_with_node_1(node)?;
        }
    }
    Ok(())
}

/// Mark `elements` as owned by a controller. Returns `false`, marking nothing,
/// when any of them was already claimed by an earlier attach.
pub fn claim(elements: &[&Element], marker: &str) -> Result<bool, JsValue> {
    if elements.iter().any(|element| element.has_attribute(marker)) {
        return Ok(false);
    }
    for element in elements {
        element.set_attribute(marker, "")?;
    }
    Ok(true)
}

/// Register an event handler for the lifetime of the page
pub fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Run `callback` once after `millis`. Never cancelled.
pub fn schedule<F>(millis: u32, callback: F)
where
    F: FnOnce() + 'static,
{
    gloo_timers::callback::Timeout::new(millis, callback).forget();
}

/// Log a failed handler to the console; event handlers have nobody to return errors to
pub fn report<T>(result: Result<T, JsValue>) {
    if let Err(err) = result {
        web_sys::console::error_2(&"phishscan:".into(), &err);
    }
}

/// Best-effort message from a rejected promise or thrown value
pub fn describe_js_error(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string()
        .unwrap_or_else(|| "unknown error".to_string())
}
