//! Rendering of the header and the transaction page.

use crate::dom::{self, Elements};
use crate::state::App;
use rp_api_types::{NetworkKind, WalletSession};
use rp_tx_builders::TransactionKind;
use rp_wallet_core::{PageState, TransactionPage};
use wasm_bindgen::prelude::*;

/// Fills the network and transaction-kind selects.
pub fn populate_selects(els: &Elements, session: &WalletSession, kind: TransactionKind) -> Result<(), JsValue> {
    for network in NetworkKind::ALL {
        let opt = dom::create_option(network.as_str(), network.descriptor().display_name, network == session.network)?;
        els.network_select.add_with_html_option_element(&opt)?;
    }
    for candidate in TransactionKind::ALL {
        let opt = dom::create_option(candidate.slug(), candidate.label(), candidate == kind)?;
        els.tx_kind_select.add_with_html_option_element(&opt)?;
    }
    Ok(())
}

/// Badge, network select and wallet status.
pub fn render_header(els: &Elements, session: &WalletSession) {
    dom::set_text(&els.network_badge, session.network.badge());
    els.network_select.set_value(session.network.as_str());

    let status = match (&session.address, session.wallet_kind) {
        (Some(address), Some(kind)) if session.connected => format!("{} · {address}", kind.display_name()),
        _ => "Not connected".to_owned(),
    };
    dom::set_text(&els.wallet_status, &status);
    dom::set_hidden(&els.connect_btn, session.connected);
    dom::set_hidden(&els.disconnect_btn, !session.connected);
}

pub fn render_page(els: &Elements, app: &App) {
    let page = app.page();
    let state = page.state();

    dom::set_text(&els.tx_title, page.kind().label());
    let submitting = state == PageState::Submitting;
    let _ = els.tx_submit_btn.toggle_attribute_with_force("disabled", submitting);
    dom::set_text(
        &els.tx_submit_btn,
        if submitting { "Submitting…" } else { "Sign & Submit" },
    );

    render_field_errors(els, &page);
    match page.build_error() {
        Some(message) => {
            dom::set_text(&els.tx_build_error, &message);
            dom::set_hidden(&els.tx_build_error, false);
        }
        None => dom::set_hidden(&els.tx_build_error, true),
    }

    match page.mismatch() {
        Some(dialog) => {
            let text = format!(
                "Your wallet is on {} but Ripplet is set to {}. Switch networks in the wallet and try again.",
                dialog.actual,
                dialog.expected.descriptor().display_name
            );
            dom::set_text(&els.mismatch_text, &text);
            dom::set_hidden(&els.mismatch_dialog, false);
        }
        None => dom::set_hidden(&els.mismatch_dialog, true),
    }

    dom::set_hidden(&els.wallet_modal, !page.wallet_modal_open());

    let showing_result = matches!(state, PageState::Result(_));
    dom::set_hidden(&els.tx_form, showing_result);
    dom::set_hidden(&els.tx_result, !showing_result);
    if let Some(result) = page.result() {
        dom::set_text(&els.tx_result_code, &result.result_code);
        dom::set_text(&els.tx_result_hash, &result.transaction_hash);
        dom::set_text(&els.tx_result_message, result.message.as_deref().unwrap_or_default());
        dom::toggle_class(&els.tx_result, "success", result.success);
        dom::toggle_class(&els.tx_result, "failure", !result.success);

        match page.explorer_link(app.store.network()) {
            Some(link) => {
                els.tx_explorer_link.set_href(&link);
                dom::set_hidden(&els.tx_explorer_link, false);
            }
            None => dom::set_hidden(&els.tx_explorer_link, true),
        }
    }

    render_scheme(els, app);
}

/// Scheme title, current step and the prev/next controls.
pub fn render_scheme(els: &Elements, app: &App) {
    let Some(scheme) = app.scheme() else {
        dom::set_hidden(&els.scheme_panel, true);
        return;
    };
    dom::set_hidden(&els.scheme_panel, false);
    dom::set_text(&els.scheme_title, scheme.title);

    let finished = app.scheme_finished();
    let view = app.with_wizard(|wizard| (wizard.progress_label(), wizard.is_first(), wizard.is_last()));
    let Some((label, first, last)) = view else {
        return;
    };
    if finished {
        dom::set_text(&els.scheme_step, &format!("{} complete", scheme.title));
    } else {
        dom::set_text(&els.scheme_step, &label);
    }
    let _ = els.scheme_prev_btn.toggle_attribute_with_force("disabled", first);
    let _ = els.scheme_next_btn.toggle_attribute_with_force("disabled", finished);
    dom::set_text(&els.scheme_next_btn, if last { "Finish" } else { "Next step" });
}

/// Writes each field error into its `[data-error-for]` slot.
fn render_field_errors(els: &Elements, page: &TransactionPage) {
    let errors = page.field_errors();
    for slot in dom::query_all_within(&els.tx_form, "[data-error-for]") {
        let field = slot.get_attribute("data-error-for").unwrap_or_default();
        let message = errors.get(&field).unwrap_or_default();
        dom::set_text(&slot, message);
        dom::set_hidden(&slot, message.is_empty());
    }
}
