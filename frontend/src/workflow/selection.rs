use common::model::attachment::{AnswerSet, Attachment, AttachmentSet};
use common::model::record::RecordDetail;
use common::model::upload::UploadType;
use common::requests::SubmissionRequest;
use common::validation::{validate, ValidationError, ValidationResult};

use crate::api::{FetchError, SubmissionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowState {
    Idle,
    Selecting,
    DetailLoaded,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// Issued by `select` for the detail fetch it requires. A result is only
/// applied while its ticket still names the live selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    pub id: String,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailApplied {
    Loaded,
    Failed(FetchError),
    /// The selection moved on before the fetch resolved; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditRejected {
    #[error("the form cannot be edited while {0:?}")]
    NotEditable(WorkflowState),
    #[error("unknown attachment slot {0}")]
    UnknownSlot(String),
    #[error("unknown answer {0}")]
    UnknownAnswer(String),
}

/// Current identifier, its detail, the attached files, the answers and the
/// result of the last validation run.
#[derive(Debug)]
pub struct SelectionState<H> {
    upload_type: UploadType,
    state: WorkflowState,
    selected: Option<String>,
    generation: u64,
    detail: Option<RecordDetail>,
    attachments: AttachmentSet<H>,
    answers: AnswerSet,
    validation: ValidationResult,
}

impl<H> SelectionState<H> {
    pub fn new(upload_type: UploadType) -> Self {
        Self {
            upload_type,
            state: WorkflowState::Idle,
            selected: None,
            generation: 0,
            detail: None,
            attachments: AttachmentSet::new(upload_type),
            answers: AnswerSet::default(),
            validation: Err(ValidationError::MissingSelection),
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn detail(&self) -> Option<&RecordDetail> {
        self.detail.as_ref()
    }

    pub fn attachments(&self) -> &AttachmentSet<H> {
        &self.attachments
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    /// Outcome of the last validator run.
    pub fn validation(&self) -> &ValidationResult {
        &self.validation
    }

    pub fn currently_submittable(&self) -> bool {
        self.state == WorkflowState::DetailLoaded && self.validation.is_ok()
    }

    /// Selects `id`. Returns the ticket of the detail fetch to start, if any.
    ///
    /// An empty id clears the form and returns to `Idle`. Switching to another
    /// id drops the previous detail, attachments and answers.
    pub fn select(&mut self, id: &str) -> Option<DetailTicket> {
        let id = id.trim();
        if id.is_empty() {
            self.clear();
            self.transition(WorkflowState::Idle);
            return None;
        }

        let same = self.selected.as_deref() == Some(id);
        if same
            && matches!(
                self.state,
                WorkflowState::Selecting
                    | WorkflowState::DetailLoaded
                    | WorkflowState::Validating
                    | WorkflowState::Submitting
            )
        {
            return None;
        }
        if !same {
            self.attachments.clear();
            self.answers.clear();
        }

        self.selected = Some(id.to_string());
        self.detail = None;
        self.generation += 1;
        self.transition(WorkflowState::Selecting);
        self.revalidate();

        Some(DetailTicket {
            id: id.to_string(),
            generation: self.generation,
        })
    }

    /// Applies the detail fetched for `ticket`, unless a later selection
    /// superseded it.
    pub fn apply_detail(
        &mut self,
        ticket: &DetailTicket,
        result: Result<RecordDetail, FetchError>,
    ) -> DetailApplied {
        let live = ticket.generation == self.generation
            && self.selected.as_deref() == Some(ticket.id.as_str())
            && self.state == WorkflowState::Selecting;
        if !live {
            log::debug!("discarding stale detail for {}", ticket.id);
            return DetailApplied::Stale;
        }

        match result {
            Ok(detail) => {
                self.detail = Some(detail);
                self.transition(WorkflowState::DetailLoaded);
                self.revalidate();
                DetailApplied::Loaded
            }
            Err(err) => {
                // The selection itself is kept so the user can retry it.
                self.detail = None;
                self.transition(WorkflowState::Idle);
                DetailApplied::Failed(err)
            }
        }
    }

    pub fn attach(&mut self, slot: &str, attachment: Attachment<H>) -> Result<(), EditRejected> {
        self.ensure_editable()?;
        self.attachments
            .put(slot, attachment)
            .map_err(|_| EditRejected::UnknownSlot(slot.to_string()))?;
        self.revalidate();
        Ok(())
    }

    pub fn detach(&mut self, slot: &str) -> Result<(), EditRejected> {
        self.ensure_editable()?;
        if self.upload_type.slot(slot).is_none() {
            return Err(EditRejected::UnknownSlot(slot.to_string()));
        }
        self.attachments.take(slot);
        self.revalidate();
        Ok(())
    }

    pub fn set_answer(&mut self, name: &str, value: &str) -> Result<(), EditRejected> {
        self.ensure_editable()?;
        if self.upload_type.answer(name).is_none() {
            return Err(EditRejected::UnknownAnswer(name.to_string()));
        }
        self.answers.set(name, value.trim());
        self.revalidate();
        Ok(())
    }

    /// Runs the validator authoritatively and, when it passes, moves to
    /// `Submitting` and hands out the request to send.
    pub(super) fn begin_submit(&mut self) -> Result<SubmissionRequest<H>, SubmissionError>
    where
        H: Clone,
    {
        if self.state != WorkflowState::DetailLoaded {
            return Err(SubmissionError::NotReady(self.state));
        }

        self.transition(WorkflowState::Validating);
        self.revalidate();
        if let Err(reason) = &self.validation {
            let reason = reason.clone();
            self.transition(WorkflowState::DetailLoaded);
            return Err(reason.into());
        }
        let Some(record_id) = self.selected.clone() else {
            self.transition(WorkflowState::DetailLoaded);
            return Err(ValidationError::MissingSelection.into());
        };

        self.transition(WorkflowState::Submitting);
        Ok(SubmissionRequest {
            upload_type: self.upload_type,
            record_id,
            attachments: self.attachments.clone(),
            answers: self.answers.clone(),
        })
    }

    /// Settles the submission of `record_id`. Returns `false` when the form
    /// has moved on to another selection meanwhile, in which case it is left
    /// untouched.
    pub(super) fn finish_submission(&mut self, record_id: &str, succeeded: bool) -> bool {
        let current = self.state == WorkflowState::Submitting
            && self.selected.as_deref() == Some(record_id);
        if !current {
            return false;
        }

        if succeeded {
            self.transition(WorkflowState::Succeeded);
            self.clear();
        } else {
            self.transition(WorkflowState::Failed);
            self.transition(WorkflowState::DetailLoaded);
        }
        true
    }

    /// Ends the post-submission pool refresh.
    pub(super) fn finish_refresh(&mut self) {
        if self.state == WorkflowState::Succeeded {
            self.transition(WorkflowState::Idle);
        }
    }

    fn ensure_editable(&self) -> Result<(), EditRejected> {
        match self.state {
            WorkflowState::Selecting | WorkflowState::DetailLoaded => Ok(()),
            other => Err(EditRejected::NotEditable(other)),
        }
    }

    fn clear(&mut self) {
        self.selected = None;
        self.detail = None;
        self.generation += 1;
        self.attachments.clear();
        self.answers.clear();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.validation = validate(self.selected.as_deref(), &self.attachments, &self.answers);
    }

    fn transition(&mut self, next: WorkflowState) {
        if self.state != next {
            log::debug!(
                "{:?}: {:?} -> {:?}",
                self.upload_type,
                self.state,
                next
            );
            self.state = next;
        }
    }
}
