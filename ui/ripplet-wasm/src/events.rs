//! Event binding.
//!
//! Wires all UI event listeners. Async handlers are spawned via
//! `wasm_bindgen_futures::spawn_local`; handlers fetch the application
//! context from `state::app()`.

use crate::dom::{self, Elements};
use crate::render;
use crate::state::{self, App};
use gloo_console as console;
use rp_api_types::{NetworkKind, WalletKind};
use rp_tx_builders::{DynamicForm, TransactionKind};
use rp_wallet_core::bridge::request_account;
use rp_wallet_core::{Route, SubmitOutcome, TransactionPage};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Helper: attach sync handler for any event name.
macro_rules! on_event {
    ($el:expr, $name:expr, $cb:expr) => {{
        let cb = Closure::wrap(Box::new($cb) as Box<dyn FnMut(web_sys::Event)>);
        $el.add_event_listener_with_callback($name, cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements) -> Result<(), JsValue> {
    // ── Network switcher ──
    {
        let els2 = els.clone();
        on_event!(els.network_select, "change", move |_: web_sys::Event| {
            on_network_selected(&els2);
        });
    }

    // ── Wallet ──
    {
        let els2 = els.clone();
        on_event!(els.connect_btn, "click", move |_: web_sys::Event| {
            dom::set_hidden(&els2.wallet_modal, false);
        });
    }
    {
        let els2 = els.clone();
        on_event!(els.wallet_modal_close, "click", move |_: web_sys::Event| {
            close_wallet_modal(&els2);
        });
    }
    on_event!(els.disconnect_btn, "click", move |_: web_sys::Event| {
        if let Some(app) = state::app() {
            app.store.disconnect();
        }
    });
    bind_wallet_choices(els)?;

    // ── Transaction page ──
    {
        let els2 = els.clone();
        on_event!(els.tx_kind_select, "change", move |_: web_sys::Event| {
            let slug = els2.tx_kind_select.value();
            if let (Some(app), Some(kind)) = (state::app(), TransactionKind::from_slug(&slug)) {
                // picking a kind by hand leaves the guided flow
                app.end_scheme();
                open_page(&els2, &app, kind);
                push_route(Route::Transaction(kind));
            }
        });
    }
    {
        let els2 = els.clone();
        on_event!(els.tx_form, "submit", move |event: web_sys::Event| {
            event.prevent_default();
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                on_submit(&els3).await;
            });
        });
    }
    {
        let els2 = els.clone();
        on_event!(els.mismatch_close, "click", move |_: web_sys::Event| {
            if let Some(app) = state::app() {
                app.page().dismiss_mismatch();
                render::render_page(&els2, &app);
            }
        });
    }
    on_event!(els.tx_back_btn, "click", move |_: web_sys::Event| {
        // the page observer re-renders
        if let Some(app) = state::app() {
            app.page().back();
        }
    });

    // ── Scheme wizard ──
    {
        let els2 = els.clone();
        on_event!(els.scheme_prev_btn, "click", move |_: web_sys::Event| {
            step_scheme(&els2, SchemeMove::Previous);
        });
    }
    {
        let els2 = els.clone();
        on_event!(els.scheme_next_btn, "click", move |_: web_sys::Event| {
            step_scheme(&els2, SchemeMove::Next);
        });
    }

    Ok(())
}

#[derive(Clone, Copy)]
enum SchemeMove {
    Previous,
    Next,
}

/// Moves the wizard and opens the page for the step it lands on.
fn step_scheme(els: &Elements, direction: SchemeMove) {
    let Some(app) = state::app() else {
        return;
    };
    let moved = app.with_wizard(|wizard| {
        let before = wizard.current_index();
        let after = match direction {
            SchemeMove::Previous => wizard.previous(),
            SchemeMove::Next => wizard.next(),
        };
        (before != after).then(|| wizard.current_kind()).flatten()
    });
    match moved {
        Some(Some(kind)) => open_page(els, &app, kind),
        // finishing keeps the last page; only the panel changes
        Some(None) => render::render_scheme(els, &app),
        None => {}
    }
}

/// One button per supported wallet; wallets not on the page are disabled.
fn bind_wallet_choices(els: &Elements) -> Result<(), JsValue> {
    let installed = state::app().map(|app| app.registry.installed()).unwrap_or_default();
    for kind in WalletKind::ALL {
        let button = dom::create_element("button")?;
        button.set_attribute("type", "button")?;
        dom::set_text(&button, kind.display_name());
        if !installed.contains(&kind) {
            button.set_attribute("disabled", "")?;
            button.set_attribute("title", &format!("{} is not installed", kind.display_name()))?;
        }
        els.wallet_modal_list.append_child(&button)?;

        let els2 = els.clone();
        on_event!(button, "click", move |_: web_sys::Event| {
            let els3 = els2.clone();
            wasm_bindgen_futures::spawn_local(async move {
                on_wallet_chosen(&els3, kind).await;
            });
        });
    }
    Ok(())
}

/// Builds a page for `kind` that re-renders on every state transition.
pub fn open_page(els: &Elements, app: &App, kind: TransactionKind) {
    let els2 = els.clone();
    let app2 = app.clone();
    app.set_page(TransactionPage::new(kind).with_observer(move |_| render::render_page(&els2, &app2)));
    els.tx_form.reset();
    els.tx_kind_select.set_value(kind.slug());
    render::render_page(els, app);
}

fn push_route(route: Route) {
    let pushed = dom::window()
        .and_then(|window| window.history())
        .and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(route.path().as_str())));
    if let Err(err) = pushed {
        console::warn!(format!("history update failed: {err:?}"));
    }
    if let Ok(document) = dom::document() {
        document.set_title(route.title());
    }
}

fn on_network_selected(els: &Elements) {
    let Some(app) = state::app() else {
        return;
    };
    let value = els.network_select.value();
    match NetworkKind::parse(&value) {
        Some(network) => {
            // badge, persistence and reconnect follow from the store observer
            app.store.set_network(network);
        }
        None => console::warn!(format!("unknown network option: {value}")),
    }
}

fn close_wallet_modal(els: &Elements) {
    if let Some(app) = state::app() {
        app.page().close_wallet_modal();
    }
    dom::set_hidden(&els.wallet_modal, true);
}

async fn on_wallet_chosen(els: &Elements, kind: WalletKind) {
    let Some(app) = state::app() else {
        return;
    };
    match request_account(&app.registry, kind).await {
        Ok(address) => {
            console::log!(format!("{} connected: {address}", kind.display_name()));
            app.store.connect(kind, address);
            close_wallet_modal(els);
        }
        Err(err) if err.is_cancelled() => {}
        Err(err) => {
            console::error!(format!("wallet connection failed: {err}"));
            dom::set_text(&els.wallet_status, &err.to_string());
        }
    }
}

async fn on_submit(els: &Elements) {
    let Some(app) = state::app() else {
        return;
    };
    let page = app.page();
    let form = DynamicForm::new(page.kind(), dom::form_fields(&els.tx_form));

    let outcome = page.submit(&form, &app.submit_context()).await;
    match &outcome {
        SubmitOutcome::Completed(result) if !result.success => {
            console::warn!(format!("{} finished with {}", page.kind().label(), result.result_code));
        }
        SubmitOutcome::Completed(result) => {
            app.with_wizard(|wizard| wizard.record_result(result));
        }
        SubmitOutcome::Ignored => console::log!("submit ignored while not on the form"),
        _ => {}
    }
    render::render_page(els, &app);
}

/// Keeps the header, the event bridge and the ledger connection in step
/// with the wallet session.
pub fn observe_session(els: &Elements, app: &App) {
    let els2 = els.clone();
    let app2 = app.clone();
    app.store.observe(move |session| {
        render::render_header(&els2, session);
        render::render_page(&els2, &app2);
        app2.sync_bridge();

        let ledger = app2.ledger.clone();
        let network = session.network;
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = ledger.sync_network(network).await {
                console::error!(format!("could not connect to {network}: {err}"));
            }
        });
    });
}
