//! Wallet extensions published on `window`.
//!
//! Each wallet injects a global object whose methods may or may not be
//! present. Capabilities are checked once at discovery; calls into missing
//! methods fail with `WalletError::Unavailable`.

use async_trait::async_trait;
use gloo_console as console;
use js_sys::{Array, Function, Object, Promise, Reflect};
use rp_api_types::{NetworkKind, WalletKind};
use rp_wallet_core::bridge::address_from_payload;
use rp_wallet_core::error::is_cancel_reply;
use rp_wallet_core::{
    Capabilities, EventListener, ExtensionRegistry, ListenerId, SignedSubmission, WalletError, WalletEvent,
    WalletExtension,
};
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Global each wallet installs itself under.
pub fn global_name(kind: WalletKind) -> &'static str {
    match kind {
        WalletKind::GemWallet => "gemWallet",
        WalletKind::Crossmark => "crossmark",
        WalletKind::Xaman => "xaman",
    }
}

/// Registers every wallet whose global object is present on the page.
pub fn discover() -> ExtensionRegistry {
    let mut registry = ExtensionRegistry::default();
    let Some(window) = web_sys::window() else {
        return registry;
    };
    for kind in WalletKind::ALL {
        if let Some(extension) = JsWalletExtension::from_global(&window, kind) {
            console::log!(format!("wallet detected: {}", kind.display_name()));
            registry.register(Rc::new(extension));
        }
    }
    registry
}

pub struct JsWalletExtension {
    kind: WalletKind,
    global: Object,
    capabilities: Capabilities,
    listeners: RefCell<HashMap<ListenerId, Closure<dyn FnMut(JsValue)>>>,
}

impl JsWalletExtension {
    pub fn from_global(window: &web_sys::Window, kind: WalletKind) -> Option<Self> {
        let value = Reflect::get(window, &JsValue::from_str(global_name(kind))).ok()?;
        if !value.is_object() {
            return None;
        }
        let global: Object = value.unchecked_into();
        let has = |name: &str| method(&global, name).is_some();
        let capabilities = Capabilities {
            on: has("on"),
            off: has("off"),
            get_address: has("getAddress"),
            get_network: has("getNetwork"),
            sign_and_submit: has("signAndSubmit"),
        };
        Some(Self {
            kind,
            global,
            capabilities,
            listeners: RefCell::default(),
        })
    }

    async fn invoke(&self, name: &str, args: &Array) -> Result<JsValue, JsValue> {
        let function = method(&self.global, name).ok_or_else(|| JsValue::from_str(&format!("{name} is not available")))?;
        let returned = function.apply(&self.global, args)?;
        JsFuture::from(Promise::resolve(&returned)).await
    }
}

fn method(target: &Object, name: &str) -> Option<Function> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<Function>()
        .ok()
}

fn to_json(value: JsValue) -> Value {
    serde_wasm_bindgen::from_value(value).unwrap_or(Value::Null)
}

/// Best-effort message from a rejected promise.
fn rejection_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return error.message().into();
    }
    if let Some(text) = err.as_string() {
        return text;
    }
    Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|message| message.as_string())
        .unwrap_or_else(|| format!("{err:?}"))
}

/// Classifies a rejected signing call from both its message and its payload.
fn sign_error(err: &JsValue, expected: NetworkKind) -> WalletError {
    WalletError::classify_rejection(&to_json(err.clone()), rejection_message(err), expected)
}

/// Network label out of a `getNetwork` reply: a string or an object carrying one.
pub fn network_label(reply: &Value) -> Option<String> {
    match reply {
        Value::String(label) => Some(label.clone()),
        Value::Object(map) => ["network", "name", "networkKey", "chain", "result"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(network_label),
        _ => None,
    }
}

/// Hash and preliminary result out of a `signAndSubmit` reply.
pub fn signed_submission(reply: &Value) -> Option<SignedSubmission> {
    let Value::Object(map) = reply else {
        return None;
    };
    if let Some(hash) = map.get("hash").and_then(Value::as_str) {
        let engine_result = ["engine_result", "engineResult"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_owned);
        return Some(SignedSubmission {
            hash: hash.to_owned(),
            engine_result,
        });
    }
    ["result", "response", "data", "tx_json"]
        .iter()
        .filter_map(|key| map.get(*key))
        .find_map(signed_submission)
}

#[async_trait(?Send)]
impl WalletExtension for JsWalletExtension {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn on(&self, event: WalletEvent, listener: EventListener) -> Option<ListenerId> {
        let on = method(&self.global, "on")?;
        let callback = Closure::wrap(Box::new(move |payload: JsValue| {
            listener(to_json(payload));
        }) as Box<dyn FnMut(JsValue)>);

        if let Err(err) = on.call2(&self.global, &JsValue::from_str(event.as_str()), callback.as_ref()) {
            console::warn!(format!("{} refused {event} listener: {}", self.kind, rejection_message(&err)));
            return None;
        }
        let id = ListenerId::new();
        self.listeners.borrow_mut().insert(id, callback);
        Some(id)
    }

    fn off(&self, event: WalletEvent, id: ListenerId) {
        let Some(callback) = self.listeners.borrow_mut().remove(&id) else {
            return;
        };
        if let Some(off) = method(&self.global, "off") {
            if let Err(err) = off.call2(&self.global, &JsValue::from_str(event.as_str()), callback.as_ref()) {
                console::warn!(format!("{} failed to remove {event} listener: {}", self.kind, rejection_message(&err)));
            }
        }
    }

    async fn get_address(&self) -> Result<String, WalletError> {
        if !self.capabilities.get_address {
            return Err(WalletError::Unavailable(self.kind));
        }
        let reply = self
            .invoke("getAddress", &Array::new())
            .await
            .map_err(|err| WalletError::classify(rejection_message(&err)))?;
        address_from_payload(&to_json(reply))
            .ok_or_else(|| WalletError::Rejected(format!("{} returned no address", self.kind)))
    }

    async fn get_network(&self) -> Result<String, WalletError> {
        if !self.capabilities.get_network {
            return Err(WalletError::Unavailable(self.kind));
        }
        let reply = self
            .invoke("getNetwork", &Array::new())
            .await
            .map_err(|err| WalletError::classify(rejection_message(&err)))?;
        network_label(&to_json(reply)).ok_or_else(|| WalletError::Rejected(format!("{} returned no network", self.kind)))
    }

    async fn sign_and_submit(&self, tx_json: &Value, expected_network: NetworkKind) -> Result<SignedSubmission, WalletError> {
        if !self.capabilities.sign_and_submit {
            return Err(WalletError::Unavailable(self.kind));
        }
        let transaction = tx_json
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|err| WalletError::Rejected(format!("could not hand transaction to wallet: {err}")))?;
        let args = Array::of2(&transaction, &JsValue::from_str(expected_network.as_str()));

        let reply = self
            .invoke("signAndSubmit", &args)
            .await
            .map_err(|err| sign_error(&err, expected_network))?;
        let reply = to_json(reply);
        if is_cancel_reply(&reply) {
            return Err(WalletError::Cancelled);
        }
        signed_submission(&reply).ok_or_else(|| WalletError::Rejected(format!("{} returned no transaction hash", self.kind)))
    }
}
