//! Contract with the remote records service.
//!
//! The workflow only talks to the service through `RecordsApi`, so the same
//! state machine runs against `http::HttpRecordsApi` in the browser and
//! against an in-memory fake in the unit tests.

pub mod http;

use common::model::record::{DecodeError, EligibleRecord, RecordDetail};
use common::model::upload::PoolKind;
use common::requests::SubmissionRequest;
use common::validation::ValidationError;
use uuid::Uuid;

use crate::workflow::WorkflowState;

/// Pool or detail retrieval failed. Always recovered locally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("the records service did not answer in time")]
    Timeout,
    #[error("the records service answered with status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(#[from] DecodeError),
}

/// A submission attempt that did not go through.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission rejected with status {status}")]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    #[error("network error: {0}")]
    Transport(String),
    #[error("the records service did not answer in time")]
    Timeout,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("nothing to submit while {0:?}")]
    NotReady(WorkflowState),
}

impl SubmissionError {
    /// Text shown to the user: the server's reason when it sent one, the
    /// validator's reason for local rejections, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            SubmissionError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            SubmissionError::Invalid(reason) => reason.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// What the service returned for an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub status: u16,
    pub message: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait RecordsApi {
    /// Platform handle of the files this implementation can upload.
    type File;

    /// `GET /pool/{kind}`
    async fn pool(&self, kind: PoolKind) -> Result<Vec<EligibleRecord>, FetchError>;

    /// `GET /detail/{id}`
    async fn detail(&self, id: &str) -> Result<RecordDetail, FetchError>;

    /// `POST /submit/{uploadType}` as multipart form data. `attempt` tags the
    /// request for log correlation.
    async fn submit(
        &self,
        request: &SubmissionRequest<Self::File>,
        attempt: Uuid,
    ) -> Result<SubmissionReceipt, SubmissionError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_the_server_reason() {
        let rejected = SubmissionError::Rejected {
            status: 500,
            message: Some("Student not found".into()),
        };
        assert_eq!(rejected.user_message("Failed to submit details"), "Student not found");

        let silent = SubmissionError::Rejected {
            status: 500,
            message: None,
        };
        assert_eq!(silent.user_message("Failed to submit details"), "Failed to submit details");
        assert_eq!(
            SubmissionError::Transport("offline".into()).user_message("Failed to upload documents"),
            "Failed to upload documents"
        );
    }

    #[test]
    fn local_rejections_explain_themselves() {
        let invalid = SubmissionError::from(ValidationError::MissingRequiredSlot("proof".into()));
        assert_eq!(invalid.user_message("unused"), "Please upload the proof document");
    }
}
