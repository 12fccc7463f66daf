//! Application shell: loads the client settings, then shows one tab per
//! upload type and, above the active form, the confirmation panel after an
//! accepted submission.

use std::rc::Rc;

use common::model::config::ClientConfig;
use common::model::upload::UploadType;
use yew::platform::spawn_local;
use yew::{classes, html, Component, Context, Html};

use crate::components::upload::{Confirmation, UploadForm};
use crate::{config, logging};

pub enum Msg {
    ConfigLoaded(ClientConfig),
    SetTab(UploadType),
    Submitted(Confirmation),
    DismissConfirmation,
}

pub struct App {
    config: Option<Rc<ClientConfig>>,
    active: UploadType,
    confirmation: Option<Confirmation>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ConfigLoaded(config::load().await));
        });

        App::new()
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        self.apply(msg);
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let Some(config) = self.config.clone() else {
            return html! { <p class="app-status">{ "Loading…" }</p> };
        };

        html! {
            <div class="portal">
                <div class="tab-bar">
                    { for UploadType::ALL.iter().map(|&upload_type| html! {
                        <button
                            class={classes!("tab-btn", (upload_type == self.active).then_some("active"))}
                            onclick={link.callback(move |_| Msg::SetTab(upload_type))}
                        >
                            { upload_type.tab_label() }
                        </button>
                    }) }
                </div>
                {
                    match &self.confirmation {
                        Some(confirmation) => view_confirmation(confirmation, ctx),
                        None => Html::default(),
                    }
                }
                { for self.mounted_forms().map(|(upload_type, hidden)| html! {
                    <div key={upload_type.path_segment()} class="upload-tab" {hidden}>
                        <UploadForm
                            upload_type={upload_type}
                            config={config.clone()}
                            on_submitted={link.callback(Msg::Submitted)}
                        />
                    </div>
                }) }
            </div>
        }
    }
}

impl App {
    fn new() -> Self {
        Self {
            config: None,
            active: UploadType::AcademicPerformance,
            confirmation: None,
        }
    }

    fn apply(&mut self, msg: Msg) {
        match msg {
            Msg::ConfigLoaded(config) => {
                logging::init(logging::parse_level(&config.log_level));
                self.config = Some(Rc::new(config));
            }
            Msg::SetTab(upload_type) => {
                self.active = upload_type;
                self.confirmation = None;
            }
            Msg::Submitted(confirmation) => {
                log::info!(
                    "showing {} for {}",
                    confirmation.route,
                    confirmation.record_id
                );
                self.confirmation = Some(confirmation);
            }
            Msg::DismissConfirmation => self.confirmation = None,
        }
    }

    /// Every upload form with whether it is hidden. All of them stay mounted
    /// so a pool trimmed by a submission, and its refresh, outlive tab
    /// switches and the confirmation panel.
    fn mounted_forms(&self) -> impl Iterator<Item = (UploadType, bool)> + '_ {
        UploadType::ALL
            .into_iter()
            .map(|upload_type| (upload_type, upload_type != self.active))
    }
}

fn view_confirmation(confirmation: &Confirmation, ctx: &Context<App>) -> Html {
    html! {
        <div class="confirmation" data-route={confirmation.route}>
            <h2>{ confirmation.upload_type.success_text() }</h2>
            <p>{ format!("GR number {}", confirmation.record_id) }</p>
            <dl>
                { for confirmation.details.iter().map(|(key, value)| html! {
                    <>
                        <dt>{ key.clone() }</dt>
                        <dd>{ value.clone() }</dd>
                    </>
                }) }
            </dl>
            <button onclick={ctx.link().callback(|_| Msg::DismissConfirmation)}>
                { "Dismiss" }
            </button>
        </div>
    }
}
