use std::collections::BTreeSet;

use common::model::record::EligibleRecord;
use common::model::upload::PoolKind;

use crate::api::FetchError;

/// Issued by `begin_load`; only the newest load may replace the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolTicket {
    pub kind: PoolKind,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PoolApplied {
    Replaced(usize),
    /// The previous pool is kept.
    Failed(FetchError),
    Stale,
}

/// Cached pool of records eligible for one upload type.
///
/// Written only by `apply_load` and, after a confirmed submission, by
/// `remove`. A removed id stays out of every later load in this session,
/// whatever the service lists.
#[derive(Debug, Clone)]
pub struct EligibilityPool {
    kind: PoolKind,
    records: Vec<EligibleRecord>,
    submitted: BTreeSet<String>,
    generation: u64,
    loading: bool,
    loaded: bool,
}

impl EligibilityPool {
    pub fn new(kind: PoolKind) -> Self {
        Self {
            kind,
            records: Vec::new(),
            submitted: BTreeSet::new(),
            generation: 0,
            loading: false,
            loaded: false,
        }
    }

    /// Records in server order.
    pub fn records(&self) -> &[EligibleRecord] {
        &self.records
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether at least one load has succeeded.
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn begin_load(&mut self) -> PoolTicket {
        self.generation += 1;
        self.loading = true;
        PoolTicket {
            kind: self.kind,
            generation: self.generation,
        }
    }

    pub fn apply_load(
        &mut self,
        ticket: PoolTicket,
        result: Result<Vec<EligibleRecord>, FetchError>,
    ) -> PoolApplied {
        if ticket.generation != self.generation || ticket.kind != self.kind {
            return PoolApplied::Stale;
        }
        self.loading = false;

        match result {
            Ok(mut records) => {
                records.retain(|record| !self.submitted.contains(&record.id));
                log::debug!("{:?} pool holds {} records", self.kind, records.len());
                self.records = records;
                self.loaded = true;
                PoolApplied::Replaced(self.records.len())
            }
            Err(err) => {
                log::warn!("{:?} pool could not be loaded: {}", self.kind, err);
                PoolApplied::Failed(err)
            }
        }
    }

    pub(super) fn remove(&mut self, id: &str) -> Option<EligibleRecord> {
        self.submitted.insert(id.to_string());
        let index = self.records.iter().position(|record| record.id == id)?;
        Some(self.records.remove(index))
    }
}
