use common::model::record::{EligibleRecord, RecordDetail};

use crate::api::{FetchError, SubmissionError, SubmissionReceipt};
use crate::workflow::{DetailTicket, PoolTicket, SubmitAttempt};

pub enum Msg {
    LoadPool,
    PoolLoaded(PoolTicket, Result<Vec<EligibleRecord>, FetchError>),
    Select(String),
    DetailLoaded(DetailTicket, Result<RecordDetail, FetchError>),
    Attach {
        slot: &'static str,
        file: web_sys::File,
    },
    Detach(&'static str),
    SetAnswer {
        name: &'static str,
        value: String,
    },
    Submit,
    Submitted(SubmitAttempt, Result<SubmissionReceipt, SubmissionError>),
}
