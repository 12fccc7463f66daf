use common::requests::SubmissionRequest;
use uuid::Uuid;

use crate::api::{RecordsApi, SubmissionError, SubmissionReceipt};

use super::{Notice, UploadWorkflow};

/// Identifies one submission attempt until its response is settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitAttempt {
    pub id: Uuid,
    pub record_id: String,
}

/// A request that passed validation and is ready to be sent.
#[derive(Debug)]
pub struct PendingSubmission<H> {
    pub attempt: SubmitAttempt,
    pub request: SubmissionRequest<H>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub removed_id: String,
    /// Confirmation route to show, unless the user already moved on to
    /// another record while the request was in flight.
    pub navigate_to: Option<&'static str>,
}

impl<H: Clone> UploadWorkflow<H> {
    /// Validates once more and, if the form passes, enters `Submitting`.
    /// A rejected form never reaches the network.
    pub fn begin_submit(&mut self) -> Result<PendingSubmission<H>, SubmissionError> {
        match self.selection.begin_submit() {
            Ok(request) => {
                let attempt = SubmitAttempt {
                    id: Uuid::new_v4(),
                    record_id: request.record_id.clone(),
                };
                log::info!(
                    "submitting {} for {} (attempt {})",
                    self.upload_type.path_segment(),
                    attempt.record_id,
                    attempt.id
                );
                Ok(PendingSubmission { attempt, request })
            }
            Err(err) => {
                match &err {
                    SubmissionError::Invalid(reason) => {
                        self.notify(Notice::error(reason.to_string()))
                    }
                    other => log::debug!("submit ignored: {}", other),
                }
                Err(err)
            }
        }
    }

    /// Sends the form through `api`, settles the attempt and, on success,
    /// refreshes the pool.
    pub async fn submit_with<A>(&mut self, api: &A) -> Result<SubmissionOutcome, SubmissionError>
    where
        A: RecordsApi<File = H>,
    {
        let PendingSubmission { attempt, request } = self.begin_submit()?;
        let result = api.submit(&request, attempt.id).await;
        let outcome = self.complete_submit(&attempt, result)?;
        self.load_pool_with(api).await;
        Ok(outcome)
    }
}

impl<H> UploadWorkflow<H> {
    /// Settles `attempt` with the service's answer.
    ///
    /// On success the record leaves the pool, the form is reset and the
    /// workflow waits in `Succeeded` for the pool refresh. On failure the
    /// selection and attachments stay as they were, back in `DetailLoaded`.
    pub fn complete_submit(
        &mut self,
        attempt: &SubmitAttempt,
        result: Result<SubmissionReceipt, SubmissionError>,
    ) -> Result<SubmissionOutcome, SubmissionError> {
        match result {
            Ok(receipt) => {
                self.pool.remove(&attempt.record_id);
                let current = self.selection.finish_submission(&attempt.record_id, true);
                match &receipt.message {
                    Some(message) => log::info!(
                        "attempt {} accepted with status {}: {}",
                        attempt.id,
                        receipt.status,
                        message
                    ),
                    None => log::info!(
                        "attempt {} accepted with status {}",
                        attempt.id,
                        receipt.status
                    ),
                }
                self.notify(Notice::success(self.upload_type.success_text()));
                Ok(SubmissionOutcome {
                    removed_id: attempt.record_id.clone(),
                    navigate_to: current.then(|| self.upload_type.confirmation_route()),
                })
            }
            Err(err) => {
                self.selection.finish_submission(&attempt.record_id, false);
                log::error!("attempt {} failed: {}", attempt.id, err);
                self.notify(Notice::error(
                    err.user_message(self.upload_type.failure_text()),
                ));
                Err(err)
            }
        }
    }
}
