//! DOM element bindings.
//!
//! All fields are resolved once at startup. To add new UI elements, add a
//! field here and bind it in `Elements::bind()`.

use serde_json::{Map, Value};
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlAnchorElement, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

// ── Helpers ──

pub fn window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

pub fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

pub fn by_id(id: &str) -> Option<Element> {
    document().ok()?.get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query_all_within(parent: &Element, selector: &str) -> Vec<Element> {
    let Ok(nl) = parent.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nl.length())
        .filter_map(|i| nl.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn set_hidden(el: &Element, hidden: bool) {
    toggle_class(el, "hidden", hidden);
}

pub fn create_element(tag: &str) -> Result<Element, JsValue> {
    document()?.create_element(tag)
}

pub fn create_option(value: &str, text: &str, selected: bool) -> Result<HtmlOptionElement, JsValue> {
    let opt: HtmlOptionElement = create_element("option")?.dyn_into()?;
    opt.set_value(value);
    opt.set_text_content(Some(text));
    opt.set_selected(selected);
    Ok(opt)
}

/// Collects every named control inside `form` as a string map.
///
/// Checkboxes report `"true"` when ticked and `""` otherwise.
pub fn form_fields(form: &HtmlFormElement) -> Map<String, Value> {
    let mut fields = Map::new();
    for el in query_all_within(form, "input[name], select[name], textarea[name]") {
        let (name, value) = if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            let value = if input.type_() == "checkbox" {
                if input.checked() { "true".to_owned() } else { String::new() }
            } else {
                input.value().trim().to_owned()
            };
            (input.name(), value)
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            (select.name(), select.value())
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            (area.name(), area.value().trim().to_owned())
        } else {
            continue;
        };
        if !name.is_empty() {
            fields.insert(name, Value::String(value));
        }
    }
    fields
}

// ── Elements struct ──

/// DOM references used by the dashboard.
/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    // Header
    pub network_select: HtmlSelectElement,
    pub network_badge: Element,
    pub wallet_status: Element,
    pub connect_btn: HtmlElement,
    pub disconnect_btn: HtmlElement,

    // Wallet selection modal
    pub wallet_modal: Element,
    pub wallet_modal_list: Element,
    pub wallet_modal_close: HtmlElement,

    // Transaction form
    pub tx_kind_select: HtmlSelectElement,
    pub tx_title: Element,
    pub tx_form: HtmlFormElement,
    pub tx_submit_btn: HtmlElement,
    pub tx_build_error: Element,

    // Network mismatch dialog
    pub mismatch_dialog: Element,
    pub mismatch_text: Element,
    pub mismatch_close: HtmlElement,

    // Result view
    pub tx_result: Element,
    pub tx_result_code: Element,
    pub tx_result_hash: Element,
    pub tx_result_message: Element,
    pub tx_explorer_link: HtmlAnchorElement,
    pub tx_back_btn: HtmlElement,

    // Scheme wizard
    pub scheme_panel: Element,
    pub scheme_title: Element,
    pub scheme_step: Element,
    pub scheme_prev_btn: HtmlElement,
    pub scheme_next_btn: HtmlElement,
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        by_id_typed::<$ty>($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after DOMContentLoaded.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            network_select: get_typed!(HtmlSelectElement, "networkSelect"),
            network_badge: get_typed!(Element, "networkBadge"),
            wallet_status: get_typed!(Element, "walletStatus"),
            connect_btn: get_typed!(HtmlElement, "connectBtn"),
            disconnect_btn: get_typed!(HtmlElement, "disconnectBtn"),

            wallet_modal: get_typed!(Element, "walletModal"),
            wallet_modal_list: get_typed!(Element, "walletModalList"),
            wallet_modal_close: get_typed!(HtmlElement, "walletModalClose"),

            tx_kind_select: get_typed!(HtmlSelectElement, "txKindSelect"),
            tx_title: get_typed!(Element, "txTitle"),
            tx_form: get_typed!(HtmlFormElement, "txForm"),
            tx_submit_btn: get_typed!(HtmlElement, "txSubmitBtn"),
            tx_build_error: get_typed!(Element, "txBuildError"),

            mismatch_dialog: get_typed!(Element, "mismatchDialog"),
            mismatch_text: get_typed!(Element, "mismatchText"),
            mismatch_close: get_typed!(HtmlElement, "mismatchClose"),

            tx_result: get_typed!(Element, "txResult"),
            tx_result_code: get_typed!(Element, "txResultCode"),
            tx_result_hash: get_typed!(Element, "txResultHash"),
            tx_result_message: get_typed!(Element, "txResultMessage"),
            tx_explorer_link: get_typed!(HtmlAnchorElement, "txExplorerLink"),
            tx_back_btn: get_typed!(HtmlElement, "txBackBtn"),

            scheme_panel: get_typed!(Element, "schemePanel"),
            scheme_title: get_typed!(Element, "schemeTitle"),
            scheme_step: get_typed!(Element, "schemeStep"),
            scheme_prev_btn: get_typed!(HtmlElement, "schemePrevBtn"),
            scheme_next_btn: get_typed!(HtmlElement, "schemeNextBtn"),
        })
    }
}
