use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use common::model::record::{EligibleRecord, RecordDetail};
use common::model::upload::PoolKind;
use common::requests::{FormPart, SubmissionRequest};
use uuid::Uuid;

use crate::api::{FetchError, RecordsApi, SubmissionError, SubmissionReceipt};

/// In-memory records service. Files are represented by their content.
#[derive(Default)]
pub struct FakeRecordsApi {
    pools: RefCell<HashMap<PoolKind, Result<Vec<EligibleRecord>, FetchError>>>,
    details: HashMap<String, Result<RecordDetail, FetchError>>,
    submit_result: RefCell<Option<Result<SubmissionReceipt, SubmissionError>>>,
    calls: RefCell<Vec<String>>,
    submitted: RefCell<Vec<Vec<(String, String)>>>,
}

pub fn record(id: &str) -> EligibleRecord {
    EligibleRecord {
        id: id.to_string(),
        display_label: id.to_string(),
    }
}

pub fn detail(id: &str, fields: &[(&str, &str)]) -> RecordDetail {
    RecordDetail {
        id: id.to_string(),
        fields: fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
    }
}

impl FakeRecordsApi {
    pub fn with_pool(self, kind: PoolKind, ids: &[&str]) -> Self {
        self.set_pool(kind, Ok(ids.iter().map(|id| record(id)).collect()));
        self
    }

    pub fn set_pool(&self, kind: PoolKind, result: Result<Vec<EligibleRecord>, FetchError>) {
        self.pools.borrow_mut().insert(kind, result);
    }

    pub fn with_detail(mut self, id: &str, fields: &[(&str, &str)]) -> Self {
        self.details.insert(id.to_string(), Ok(detail(id, fields)));
        self
    }

    pub fn answering(self, result: Result<SubmissionReceipt, SubmissionError>) -> Self {
        *self.submit_result.borrow_mut() = Some(result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Parts of every submission received, as `(field, value)` pairs where
    /// files appear as `file:<name>`.
    pub fn submitted(&self) -> Vec<Vec<(String, String)>> {
        self.submitted.borrow().clone()
    }
}

impl RecordsApi for FakeRecordsApi {
    type File = String;

    async fn pool(&self, kind: PoolKind) -> Result<Vec<EligibleRecord>, FetchError> {
        self.calls
            .borrow_mut()
            .push(format!("GET /pool/{}", kind.path_segment()));
        self.pools
            .borrow()
            .get(&kind)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }

    async fn detail(&self, id: &str) -> Result<RecordDetail, FetchError> {
        self.calls.borrow_mut().push(format!("GET /detail/{}", id));
        self.details
            .get(id)
            .cloned()
            .unwrap_or(Err(FetchError::Status(404)))
    }

    async fn submit(
        &self,
        request: &SubmissionRequest<String>,
        _attempt: Uuid,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.calls.borrow_mut().push(format!(
            "POST /submit/{}",
            request.upload_type.path_segment()
        ));
        let parts = request
            .parts()
            .into_iter()
            .map(|part| match part {
                FormPart::Text { name, value } => (name.to_string(), value.to_string()),
                FormPart::File {
                    name, file_name, ..
                } => (name.to_string(), format!("file:{}", file_name)),
            })
            .collect();
        self.submitted.borrow_mut().push(parts);

        self.submit_result.borrow().clone().unwrap_or(Ok(SubmissionReceipt {
            status: 200,
            message: None,
        }))
    }
}
