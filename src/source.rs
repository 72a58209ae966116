//! Seam to the external timing data source.

use anyhow::Result;

use crate::model::{JobDetail, SubtaskTimings};
use crate::types::Granularity;

/// External collaborator providing the job engine's timing data.
///
/// Implementations do the actual I/O (whatever the transport is); the engine
/// only schedules calls and consumes the returned snapshots.
pub trait TimingSource {
    fn job_detail(&mut self, job_id: &str) -> Result<JobDetail>;

    fn subtask_timings(&mut self, job_id: &str, vertex_id: &str) -> Result<SubtaskTimings>;
}

/// One scheduled timing fetch.
///
/// The generation ties a completion back to the selection that requested it.
/// Every selection change that needs new data bumps the controller's
/// generation, so a completion carrying an older generation is known to be
/// stale and gets discarded instead of overwriting newer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub generation: u64,
    pub job_id: String,
    pub vertex_id: String,
    pub granularity: Granularity,
}
