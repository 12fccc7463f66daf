//! Runtime state of the upload form component.

use std::rc::Rc;

use crate::api::http::HttpRecordsApi;
use crate::workflow::UploadWorkflow;

use super::props::UploadFormProps;

/// One upload form: the workflow it drives and the client it drives it with.
///
/// Fields are `pub` because they are accessed by `view` and `update`.
pub struct UploadForm {
    pub workflow: UploadWorkflow<web_sys::File>,

    /// Shared with the futures spawned for in-flight requests.
    pub api: Rc<HttpRecordsApi>,

    /// Guard to load the pool only on the first render.
    pub started: bool,
}

impl UploadForm {
    pub fn new(props: &UploadFormProps) -> Self {
        Self {
            workflow: UploadWorkflow::new(props.upload_type),
            api: Rc::new(HttpRecordsApi::new(props.config.as_ref().clone())),
            started: false,
        }
    }
}
