//! Properties of the `UploadForm` component.

use std::rc::Rc;

use common::model::config::ClientConfig;
use common::model::upload::UploadType;
use yew::prelude::*;

/// A confirmed submission, handed to the shell so it can show the
/// confirmation panel for `route`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub upload_type: UploadType,
    pub record_id: String,
    pub route: &'static str,
    /// Detail fields of the record as they were shown when it was submitted.
    pub details: Vec<(String, String)>,
}

#[derive(Properties, PartialEq, Clone)]
pub struct UploadFormProps {
    pub upload_type: UploadType,

    /// Settings loaded by the shell at startup.
    pub config: Rc<ClientConfig>,

    /// Emitted after the records service accepted a submission for the
    /// record still shown in the form.
    #[prop_or_default]
    pub on_submitted: Callback<Confirmation>,
}
