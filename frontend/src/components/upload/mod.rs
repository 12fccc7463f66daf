//! Upload form: root module wiring the Yew `Component` implementation with
//! submodules for state, update logic, view rendering and helpers.
//!
//! The component is a thin shell around `UploadWorkflow`. Every request is
//! spawned with `spawn_local` and reports back through a `Msg`, where the
//! workflow decides whether its result still applies.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::{Confirmation, UploadFormProps};
pub use state::UploadForm;

impl Component for UploadForm {
    type Message = Msg;
    type Properties = UploadFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        UploadForm::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.upload_type != old_props.upload_type || props.config != old_props.config {
            log::debug!("{:?} form reset by new properties", props.upload_type);
            *self = UploadForm::new(props);
            ctx.link().send_message(Msg::LoadPool);
            self.started = true;
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.started {
            self.started = true;
            ctx.link().send_message(Msg::LoadPool);
        }
    }
}
