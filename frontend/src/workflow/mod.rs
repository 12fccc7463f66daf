//! Dependent-selection upload workflow.
//!
//! `UploadWorkflow` is the single owner of one form's state: the eligible
//! pool, the selection with its detail, attachments and answers, and the
//! notices waiting to be shown. Every asynchronous step is split in two: a
//! `begin_*` call that records what is in flight and hands out a ticket, and
//! an `apply_*`/`complete_*` call that settles it. The Yew component drives
//! the halves through messages; the `*_with` helpers chain them against a
//! `RecordsApi` directly.

mod eligibility;
mod selection;
mod submission;

#[cfg(test)]
mod fake;

use common::model::attachment::Attachment;
use common::model::record::{EligibleRecord, RecordDetail};
use common::model::upload::UploadType;

use crate::api::{FetchError, RecordsApi};

pub use eligibility::{EligibilityPool, PoolApplied, PoolTicket};
pub use selection::{DetailApplied, DetailTicket, EditRejected, SelectionState, WorkflowState};
pub use submission::{PendingSubmission, SubmissionOutcome, SubmitAttempt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug)]
pub struct UploadWorkflow<H> {
    upload_type: UploadType,
    pool: EligibilityPool,
    selection: SelectionState<H>,
    notices: Vec<Notice>,
}

impl<H> UploadWorkflow<H> {
    pub fn new(upload_type: UploadType) -> Self {
        Self {
            upload_type,
            pool: EligibilityPool::new(upload_type.pool_kind()),
            selection: SelectionState::new(upload_type),
            notices: Vec::new(),
        }
    }

    pub fn upload_type(&self) -> UploadType {
        self.upload_type
    }

    pub fn pool(&self) -> &EligibilityPool {
        &self.pool
    }

    pub fn selection(&self) -> &SelectionState<H> {
        &self.selection
    }

    pub fn state(&self) -> WorkflowState {
        self.selection.state()
    }

    pub fn currently_submittable(&self) -> bool {
        self.selection.currently_submittable()
    }

    /// Drains the notices produced since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn begin_pool_load(&mut self) -> PoolTicket {
        self.pool.begin_load()
    }

    /// Settles a pool load. A failure keeps the previous pool and produces a
    /// notice. Either way, a refresh that follows a successful submission
    /// returns the workflow to `Idle`.
    pub fn apply_pool(
        &mut self,
        ticket: PoolTicket,
        result: Result<Vec<EligibleRecord>, FetchError>,
    ) -> PoolApplied {
        let applied = self.pool.apply_load(ticket, result);
        match &applied {
            PoolApplied::Failed(err) => {
                self.notify(Notice::error(format!("Failed to load GR numbers: {}", err)));
                self.selection.finish_refresh();
            }
            PoolApplied::Replaced(_) => self.selection.finish_refresh(),
            PoolApplied::Stale => {}
        }
        applied
    }

    pub fn select(&mut self, id: &str) -> Option<DetailTicket> {
        self.selection.select(id)
    }

    pub fn apply_detail(
        &mut self,
        ticket: &DetailTicket,
        result: Result<RecordDetail, FetchError>,
    ) -> DetailApplied {
        let applied = self.selection.apply_detail(ticket, result);
        if let DetailApplied::Failed(err) = &applied {
            log::warn!("detail for {} could not be loaded: {}", ticket.id, err);
            self.notify(Notice::error(format!(
                "Failed to load details for {}: {}",
                ticket.id, err
            )));
        }
        applied
    }

    pub fn attach(&mut self, slot: &str, attachment: Attachment<H>) -> Result<(), EditRejected> {
        self.selection.attach(slot, attachment)
    }

    pub fn detach(&mut self, slot: &str) -> Result<(), EditRejected> {
        self.selection.detach(slot)
    }

    pub fn set_answer(&mut self, name: &str, value: &str) -> Result<(), EditRejected> {
        self.selection.set_answer(name, value)
    }

    /// Loads the pool through `api`. Invoked on workflow entry.
    pub async fn load_pool_with<A>(&mut self, api: &A) -> PoolApplied
    where
        A: RecordsApi<File = H>,
    {
        let ticket = self.begin_pool_load();
        let result = api.pool(ticket.kind).await;
        self.apply_pool(ticket, result)
    }

    /// Selects `id` and, when that requires it, fetches its detail.
    pub async fn select_with<A>(&mut self, id: &str, api: &A) -> Option<DetailApplied>
    where
        A: RecordsApi<File = H>,
    {
        let ticket = self.select(id)?;
        let result = api.detail(&ticket.id).await;
        Some(self.apply_detail(&ticket, result))
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
