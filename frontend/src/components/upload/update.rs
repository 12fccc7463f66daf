//! Update function for the upload form, Elm-style: it receives the current
//! `UploadForm`, the `Context` and a `Msg`, forwards the change to the
//! workflow, and returns whether the view should re-render.
//!
//! Requests are spawned here and come back as `PoolLoaded`, `DetailLoaded`
//! or `Submitted`. Notices the workflow produced along the way are shown as
//! toasts before returning.

use common::model::attachment::Attachment;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::RecordsApi;
use crate::workflow::{DetailApplied, EditRejected, PendingSubmission};

use super::helpers::show_toast;
use super::messages::Msg;
use super::props::Confirmation;
use super::state::UploadForm;

pub fn update(form: &mut UploadForm, ctx: &Context<UploadForm>, msg: Msg) -> bool {
    let render = match msg {
        Msg::LoadPool => {
            let ticket = form.workflow.begin_pool_load();
            let api = form.api.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = api.pool(ticket.kind).await;
                link.send_message(Msg::PoolLoaded(ticket, result));
            });
            true
        }
        Msg::PoolLoaded(ticket, result) => {
            form.workflow.apply_pool(ticket, result);
            true
        }
        Msg::Select(id) => {
            if let Some(ticket) = form.workflow.select(&id) {
                let api = form.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.detail(&ticket.id).await;
                    link.send_message(Msg::DetailLoaded(ticket, result));
                });
            }
            true
        }
        Msg::DetailLoaded(ticket, result) => {
            form.workflow.apply_detail(&ticket, result) != DetailApplied::Stale
        }
        Msg::Attach { slot, file } => {
            let attachment = Attachment::new(file.name(), Some(file.type_()), file);
            edited(form.workflow.attach(slot, attachment))
        }
        Msg::Detach(slot) => edited(form.workflow.detach(slot)),
        Msg::SetAnswer { name, value } => edited(form.workflow.set_answer(name, &value)),
        Msg::Submit => {
            if let Ok(PendingSubmission { attempt, request }) = form.workflow.begin_submit() {
                let api = form.api.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    let result = api.submit(&request, attempt.id).await;
                    link.send_message(Msg::Submitted(attempt, result));
                });
            }
            true
        }
        Msg::Submitted(attempt, result) => {
            let details = shown_details(form, &attempt.record_id);
            if let Ok(outcome) = form.workflow.complete_submit(&attempt, result) {
                if let Some(route) = outcome.navigate_to {
                    ctx.props().on_submitted.emit(Confirmation {
                        upload_type: form.workflow.upload_type(),
                        record_id: outcome.removed_id,
                        route,
                        details,
                    });
                }
                ctx.link().send_message(Msg::LoadPool);
            }
            true
        }
    };

    for notice in form.workflow.take_notices() {
        show_toast(&notice);
    }
    render
}

fn edited(result: Result<(), EditRejected>) -> bool {
    match result {
        Ok(()) => true,
        Err(rejected) => {
            log::warn!("edit ignored: {}", rejected);
            false
        }
    }
}

/// Detail fields currently on screen for `record_id`, captured before a
/// confirmed submission resets the form.
fn shown_details(form: &UploadForm, record_id: &str) -> Vec<(String, String)> {
    let selection = form.workflow.selection();
    if selection.selected_id() != Some(record_id) {
        return Vec::new();
    }
    selection
        .detail()
        .map(|detail| {
            detail
                .display_fields(form.workflow.upload_type().detail_keys())
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect()
        })
        .unwrap_or_default()
}
