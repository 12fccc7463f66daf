//! Shapes exchanged with the records service when submitting.

use serde::Deserialize;

use crate::model::attachment::{AnswerSet, AttachmentSet};
use crate::model::upload::{UploadType, ID_FIELD};

/// Everything a submission sends, assembled at submit time from the
/// selection, the attachments and the answers.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest<H> {
    pub upload_type: UploadType,
    pub record_id: String,
    pub attachments: AttachmentSet<H>,
    pub answers: AnswerSet,
}

/// One multipart part, borrowed from the request.
#[derive(Debug, PartialEq)]
pub enum FormPart<'a, H> {
    Text {
        name: &'static str,
        value: &'a str,
    },
    File {
        name: &'static str,
        file_name: &'a str,
        handle: &'a H,
    },
}

impl<H> SubmissionRequest<H> {
    /// Parts in wire order: the record identifier, one part per answer, then
    /// one part per attached file. Field names are fixed by the upload type.
    pub fn parts(&self) -> Vec<FormPart<'_, H>> {
        let mut parts = vec![FormPart::Text {
            name: ID_FIELD,
            value: &self.record_id,
        }];

        parts.extend(self.upload_type.answers().iter().filter_map(|answer| {
            self.answers.get(answer.name).map(|value| FormPart::Text {
                name: answer.field,
                value,
            })
        }));

        parts.extend(self.upload_type.slots().iter().filter_map(|slot| {
            self.attachments.get(slot.name).map(|attachment| FormPart::File {
                name: slot.field,
                file_name: &attachment.file_name,
                handle: &attachment.handle,
            })
        }));

        parts
    }
}

/// Body the records service sends with a submission reply. On failure the
/// user-facing reason is `error`, else `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerReply {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ServerReply {
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn reason(&self) -> Option<&str> {
        [self.error.as_deref(), self.message.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|reason| !reason.is_empty())
    }
}
