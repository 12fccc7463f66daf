//! View rendering for the upload form.
//!
//! Layout, top to bottom: the pool selector, the detail panel of the selected
//! record, one file input per slot, one radio group per answer, the live
//! validation reason and the submit button.

use common::model::upload::{AnswerSpec, SlotSpec, ACCEPT_FILTER};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::html::Scope;
use yew::prelude::*;

use crate::workflow::WorkflowState;

use super::helpers::picked_file;
use super::messages::Msg;
use super::state::UploadForm;

pub fn view(form: &UploadForm, ctx: &Context<UploadForm>) -> Html {
    let link = ctx.link();
    let upload_type = form.workflow.upload_type();
    let editable = matches!(
        form.workflow.state(),
        WorkflowState::Selecting | WorkflowState::DetailLoaded
    );
    // Re-created per record so file inputs never show a previous pick.
    let form_key = form
        .workflow
        .selection()
        .selected_id()
        .unwrap_or_default()
        .to_string();

    html! {
        <div class="upload-form">
            <h2>{ upload_type.title() }</h2>
            { build_pool_selector(form, link) }
            { build_detail_panel(form) }
            <div key={form_key} class="upload-fields">
                { for upload_type.slots().iter().map(|slot| build_slot(form, link, slot, editable)) }
                { for upload_type.answers().iter().map(|answer| build_answer(form, link, answer, editable)) }
            </div>
            { build_validation_reason(form) }
            { build_submit_button(form, link) }
        </div>
    }
}

fn build_pool_selector(form: &UploadForm, link: &Scope<UploadForm>) -> Html {
    let pool = form.workflow.pool();
    let selected = form.workflow.selection().selected_id().unwrap_or_default();

    if pool.is_loading() && !pool.has_loaded() {
        return html! { <p class="pool-status">{ "Loading…" }</p> };
    }
    if pool.has_loaded() && pool.records().is_empty() {
        return html! { <p class="pool-status">{ "No records available" }</p> };
    }

    let onchange = link.callback(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        Msg::Select(select.value())
    });
    let disabled = form.workflow.state() == WorkflowState::Submitting;

    html! {
        <label class="pool-selector">
            { "GR Number" }
            <select {onchange} {disabled}>
                <option value="" selected={selected.is_empty()}>{ "Select GR number" }</option>
                { for pool.records().iter().map(|record| html! {
                    <option value={record.id.clone()} selected={record.id == selected}>
                        { record.display_label.clone() }
                    </option>
                }) }
            </select>
        </label>
    }
}

fn build_detail_panel(form: &UploadForm) -> Html {
    let selection = form.workflow.selection();
    if form.workflow.state() == WorkflowState::Selecting {
        return html! { <p class="detail-status">{ "Loading details…" }</p> };
    }
    let Some(detail) = selection.detail() else {
        return Html::default();
    };

    let fields = detail.display_fields(form.workflow.upload_type().detail_keys());
    html! {
        <dl class="record-detail">
            { for fields.into_iter().map(|(key, value)| html! {
                <>
                    <dt>{ key.to_string() }</dt>
                    <dd>{ value.to_string() }</dd>
                </>
            }) }
        </dl>
    }
}

fn build_slot(
    form: &UploadForm,
    link: &Scope<UploadForm>,
    slot: &'static SlotSpec,
    editable: bool,
) -> Html {
    let name = slot.name;
    let onchange = link.callback(move |e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        match picked_file(&input) {
            Some(file) => Msg::Attach { slot: name, file },
            None => Msg::Detach(name),
        }
    });
    let current = form
        .workflow
        .selection()
        .attachments()
        .get(name)
        .map(|attachment| attachment.file_name.clone());

    html! {
        <div class="upload-slot">
            <label>
                { slot.label }
                if slot.required {
                    <span class="required">{ " *" }</span>
                }
                <input
                    type="file"
                    accept={ACCEPT_FILTER}
                    disabled={!editable}
                    {onchange}
                />
            </label>
            if let Some(file_name) = current {
                <span class="file-name">{ file_name }</span>
            }
        </div>
    }
}

fn build_answer(
    form: &UploadForm,
    link: &Scope<UploadForm>,
    answer: &'static AnswerSpec,
    editable: bool,
) -> Html {
    let current = form.workflow.selection().answers().get(answer.name);

    html! {
        <fieldset class="answer-group">
            <legend>{ answer.label }</legend>
            { for answer.options.iter().map(|option| {
                let name = answer.name;
                let value = option.value;
                let onchange = link.callback(move |_: Event| Msg::SetAnswer {
                    name,
                    value: value.to_string(),
                });
                html! {
                    <label class="answer-option">
                        <input
                            type="radio"
                            name={answer.field}
                            value={option.value}
                            checked={current == Some(option.value)}
                            disabled={!editable}
                            {onchange}
                        />
                        { option.label }
                    </label>
                }
            }) }
        </fieldset>
    }
}

fn build_validation_reason(form: &UploadForm) -> Html {
    let selection = form.workflow.selection();
    match (form.workflow.state(), selection.validation()) {
        (WorkflowState::DetailLoaded, Err(reason)) => html! {
            <p class="validation-reason">{ reason.to_string() }</p>
        },
        _ => Html::default(),
    }
}

fn build_submit_button(form: &UploadForm, link: &Scope<UploadForm>) -> Html {
    let submitting = form.workflow.state() == WorkflowState::Submitting;
    let onclick = link.callback(|_: MouseEvent| Msg::Submit);

    html! {
        <button
            class="submit-btn"
            disabled={!form.workflow.currently_submittable()}
            {onclick}
        >
            { if submitting { "Submitting…" } else { "Submit" } }
        </button>
    }
}
