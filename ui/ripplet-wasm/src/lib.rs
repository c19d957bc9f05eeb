//! Ripplet browser front end.
//!
//! Binds the dashboard markup to the wallet core: session store over
//! `localStorage`, the wallet extensions found on `window`, the ledger
//! client and a generic transaction form.

pub mod dom;
pub mod events;
pub mod extensions;
pub mod render;
pub mod state;
pub mod storage;

use gloo_console as console;
use rp_tx_builders::TransactionKind;
use rp_wallet_core::{Route, Scheme};
use rp_wallet_core::wizard;
use wasm_bindgen::prelude::*;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();

    init().await
}

fn scheme_of(route: Route) -> Option<&'static Scheme> {
    match route {
        Route::Scheme(name) => wizard::scheme(name),
        _ => None,
    }
}

/// Transaction page opened for a route. Scheme routes start at their first step.
fn initial_kind(route: Route) -> TransactionKind {
    match route {
        Route::Transaction(kind) => kind,
        Route::Scheme(_) => scheme_of(route)
            .and_then(|scheme| scheme.steps.first())
            .map_or(TransactionKind::Payment, |step| step.kind),
        Route::Home | Route::NotFound => TransactionKind::Payment,
    }
}

async fn init() -> Result<(), JsValue> {
    let els = dom::Elements::bind()?;

    let path = dom::window()?.location().pathname()?;
    let route = Route::parse(&path);
    if route == Route::NotFound {
        console::warn!(format!("no page for {path}, showing the dashboard"));
    }
    let kind = initial_kind(route);

    let app = state::App::new(kind);
    if let Some(scheme) = scheme_of(route) {
        app.start_scheme(scheme);
    }
    state::install(app.clone());

    let session = app.store.session();
    render::populate_selects(&els, &session, kind)?;
    render::render_header(&els, &session);

    events::observe_session(&els, &app);
    events::open_page(&els, &app, kind);
    events::bind_events(&els)?;
    app.sync_bridge();

    if let Err(err) = app.ledger.sync_network(session.network).await {
        console::error!(format!("could not connect to {}: {err}", session.network));
    }

    Ok(())
}
