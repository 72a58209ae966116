//! Drill-down state machine for the timeline view.
//!
//! Owns the current selection (vertex, granularity, subtask, attempt),
//! schedules debounced timing fetches, and filters the aggregated segment
//! collection for display. Time is passed into the scheduling entry points
//! explicitly, which keeps the debounce window deterministic and testable.
//!
//! Everything here runs on one thread. Asynchrony is cooperative: a selection
//! change arms a pending fetch, [DrilldownController::poll_due] hands it out
//! once the debounce window has elapsed, and the caller feeds the outcome back
//! through [DrilldownController::complete_fetch]. Completions from superseded
//! selections or from after teardown are discarded, never merged.

use anyhow::Result;

use crate::aggregate::{aggregate_segments, attempt_ids_for_subtask, SegmentCollection};
use crate::height::height_for_rows;
use crate::model::{JobDetail, SubtaskTimings};
use crate::source::{FetchRequest, TimingSource};
use crate::types::{Granularity, Segment, TimeMillis};
use crate::vertex_ranges::{derive_vertex_ranges, VertexRange};

/// How long a selection must stay settled before its fetch is issued. Rapid
/// re-selection within this window replaces the pending fetch instead of
/// issuing one per click.
pub const DEBOUNCE_MS: TimeMillis = 100;

/// Filter choice for one drill-down axis (subtask or attempt).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Choice {
    /// Pass-through: no filtering at this axis.
    #[default]
    All,
    One(u32),
}

impl Choice {
    fn admits(self, id: u32) -> bool {
        match self {
            Choice::All => true,
            Choice::One(chosen) => chosen == id,
        }
    }
}

/// Current drill-down selection.
///
/// `attempt` only carries meaning at [Granularity::Attempt]; subtask-level
/// rows are not attempt-addressable. Changing the vertex resets both axis
/// choices to [Choice::All].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Selection {
    pub vertex_id: Option<String>,
    pub granularity: Granularity,
    pub subtask: Choice,
    pub attempt: Choice,
}

/// How deep the current drill-down goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillScope {
    Root,
    Vertex,
    Subtask,
    Attempt,
}

#[derive(Debug)]
struct PendingFetch {
    due_at: TimeMillis,
    request: FetchRequest,
}

/// The engine behind the timeline view: root rows, drill-down state, and the
/// fetch scheduler gluing them to the external data source.
#[derive(Debug, Default)]
pub struct DrilldownController {
    job_id: Option<String>,
    root_rows: Vec<VertexRange>,
    selection: Selection,
    /// Snapshot backing `collection`; kept to recompute attempt index lists
    /// without refetching.
    timings: Option<SubtaskTimings>,
    collection: SegmentCollection,
    attempt_ids: Vec<u32>,
    is_loading: bool,
    closed: bool,
    generation: u64,
    pending: Option<PendingFetch>,
}

impl DrilldownController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a job-detail snapshot from the periodic refresh.
    ///
    /// A refresh of the same job only rebuilds the root rows; drill-down
    /// selection survives. A different job id resets everything, including any
    /// in-flight fetch.
    pub fn apply_job_detail(&mut self, detail: &JobDetail) {
        if self.closed {
            return;
        }
        let same_job = self.job_id.as_deref() == Some(detail.jid.as_str());
        self.root_rows = derive_vertex_ranges(&detail.vertices);
        if !same_job {
            self.job_id = Some(detail.jid.clone());
            self.selection = Selection::default();
            self.timings = None;
            self.collection = SegmentCollection::default();
            self.attempt_ids.clear();
            self.pending = None;
            self.is_loading = false;
            // Stale completions for the previous job carry an older generation.
            self.generation += 1;
        }
    }

    /// Select a vertex from the root chart and arm the (debounced) timing
    /// fetch for it. Subtask and attempt choices reset to All.
    pub fn select_vertex(&mut self, vertex_id: &str, now: TimeMillis) {
        if self.closed || self.job_id.is_none() {
            return;
        }
        self.selection.vertex_id = Some(vertex_id.to_string());
        self.selection.subtask = Choice::All;
        self.selection.attempt = Choice::All;
        self.schedule_fetch(now);
    }

    /// Switch between subtask and attempt granularity.
    ///
    /// Subtask-level and attempt-level rows are not comparable row sets, so a
    /// real toggle while a vertex is selected discards the collection and
    /// re-fetches; axis choices reset to All. Setting the granularity already
    /// in effect is a no-op.
    pub fn set_granularity(&mut self, granularity: Granularity, now: TimeMillis) {
        if self.closed || self.selection.granularity == granularity {
            return;
        }
        self.selection.granularity = granularity;
        if self.selection.vertex_id.is_some() {
            self.selection.subtask = Choice::All;
            self.selection.attempt = Choice::All;
            self.schedule_fetch(now);
        }
    }

    /// Narrow the view to one subtask (or back to all of them). Filters the
    /// held collection without refetching, recomputes the attempt index list
    /// for that subtask, and resets the attempt choice.
    pub fn select_subtask(&mut self, choice: Choice) {
        if self.closed || self.selection.vertex_id.is_none() {
            return;
        }
        self.selection.subtask = choice;
        self.selection.attempt = Choice::All;
        self.attempt_ids = match (choice, &self.timings) {
            (Choice::One(subtask), Some(timings)) => attempt_ids_for_subtask(timings, subtask),
            _ => Vec::new(),
        };
    }

    /// Narrow further to one attempt. Only meaningful at attempt granularity;
    /// ignored otherwise.
    pub fn select_attempt(&mut self, choice: Choice) {
        if self.closed || self.selection.granularity != Granularity::Attempt {
            return;
        }
        if self.selection.vertex_id.is_none() {
            return;
        }
        self.selection.attempt = choice;
    }

    fn schedule_fetch(&mut self, now: TimeMillis) {
        let Some(job_id) = self.job_id.clone() else {
            return;
        };
        let Some(vertex_id) = self.selection.vertex_id.clone() else {
            return;
        };
        // The old collection belongs to a superseded selection; clear it now
        // so a consistent (vertex, granularity) pair is all the view ever sees.
        self.timings = None;
        self.collection = SegmentCollection::default();
        self.attempt_ids.clear();
        self.generation += 1;
        self.is_loading = true;
        self.pending = Some(PendingFetch {
            due_at: now + DEBOUNCE_MS,
            request: FetchRequest {
                generation: self.generation,
                job_id,
                vertex_id,
                granularity: self.selection.granularity,
            },
        });
    }

    /// Hand out the pending fetch once its debounce window has elapsed.
    /// Returns at most one request per settled selection.
    pub fn poll_due(&mut self, now: TimeMillis) -> Option<FetchRequest> {
        if self.closed {
            return None;
        }
        if self.pending.as_ref()?.due_at > now {
            return None;
        }
        self.pending.take().map(|pending| pending.request)
    }

    /// Feed a fetch outcome back into the controller.
    ///
    /// Last selection wins: a completion whose generation is not the latest is
    /// dropped. A failed fetch degrades to an empty collection with the cause
    /// logged; the user re-triggers by reselecting.
    pub fn complete_fetch(&mut self, request: &FetchRequest, result: Result<SubtaskTimings>) {
        if self.closed {
            return;
        }
        if request.generation != self.generation {
            log::debug!(
                "discarding stale timing fetch for vertex {} (generation {} < {})",
                request.vertex_id,
                request.generation,
                self.generation
            );
            return;
        }
        self.is_loading = false;
        match result {
            Ok(timings) => {
                self.collection = aggregate_segments(&timings, request.granularity);
                self.timings = Some(timings);
            }
            Err(err) => {
                log::warn!(
                    "timing fetch for vertex {} of job {} failed: {:#}",
                    request.vertex_id,
                    request.job_id,
                    err
                );
                self.timings = None;
                self.collection = SegmentCollection::default();
                self.attempt_ids.clear();
            }
        }
    }

    /// Synchronous driver: issue the due fetch (if any) against `source` and
    /// apply its outcome.
    pub fn pump(&mut self, now: TimeMillis, source: &mut impl TimingSource) {
        if let Some(request) = self.poll_due(now) {
            let result = source.subtask_timings(&request.job_id, &request.vertex_id);
            self.complete_fetch(&request, result);
        }
    }

    /// Teardown: cancel pending work and stop reacting to anything further.
    pub fn close(&mut self) {
        self.closed = true;
        self.pending = None;
        self.is_loading = false;
    }

    pub fn job_id(&self) -> Option<&str> {
        self.job_id.as_deref()
    }

    pub fn root_rows(&self) -> &[VertexRange] {
        &self.root_rows
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn scope(&self) -> DrillScope {
        if self.selection.vertex_id.is_none() {
            DrillScope::Root
        } else if matches!(self.selection.attempt, Choice::One(_)) {
            DrillScope::Attempt
        } else if matches!(self.selection.subtask, Choice::One(_)) {
            DrillScope::Subtask
        } else {
            DrillScope::Vertex
        }
    }

    /// Distinct subtask ids of the current collection, for the subtask selector.
    pub fn subtask_ids(&self) -> &[u32] {
        &self.collection.subtask_ids
    }

    /// Distinct attempt numbers of the currently selected subtask, for the
    /// attempt selector. Empty unless a specific subtask is chosen.
    pub fn attempt_ids(&self) -> &[u32] {
        &self.attempt_ids
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// The segment subset to display at the current drill level. All-choices
    /// are pass-through filters.
    pub fn visible_segments(&self) -> Vec<&Segment> {
        self.collection
            .segments
            .iter()
            .filter(|segment| {
                self.selection.subtask.admits(segment.subtask)
                    && self.selection.attempt.admits(segment.attempt)
            })
            .collect()
    }

    pub fn main_chart_height(&self) -> u32 {
        height_for_rows(self.root_rows.len())
    }

    /// Height of the drill-down chart: one row per distinct
    /// (subtask, attempt) pair among the visible segments.
    pub fn drill_chart_height(&self) -> u32 {
        let mut pairs: Vec<(u32, u32)> = self
            .visible_segments()
            .iter()
            .map(|segment| (segment.subtask, segment.attempt))
            .collect();
        pairs.sort_unstable();
        pairs.dedup();
        height_for_rows(pairs.len())
    }
}
