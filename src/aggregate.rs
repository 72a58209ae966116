//! Walks the subtask/attempt hierarchy of one vertex and flattens it into the
//! segment collection the drill-down chart renders. The granularity flag picks
//! the row unit: one timeline per attempt, or one per subtask using the
//! subtask's representative timestamps.

use crate::model::SubtaskTimings;
use crate::segments::{build_attempt_segments, normalize_timestamps, AttemptMeta};
use crate::types::{Granularity, Segment};

/// Flat segment collection for one (vertex, granularity) pair, plus the index
/// list used to populate the subtask selector.
#[derive(Debug, Clone, Default)]
pub struct SegmentCollection {
    pub segments: Vec<Segment>,
    /// Distinct subtask ids present in the timing data, sorted ascending.
    pub subtask_ids: Vec<u32>,
}

/// Aggregate all timelines under one vertex into a single segment collection.
/// Always produces a fresh collection; callers replace the previous one
/// wholesale rather than patching it.
pub fn aggregate_segments(timings: &SubtaskTimings, granularity: Granularity) -> SegmentCollection {
    let mut segments = Vec::new();
    for subtask in &timings.subtasks {
        match granularity {
            Granularity::Attempt => {
                for attempt in &subtask.attempts {
                    let events = normalize_timestamps(&attempt.timestamps);
                    segments.extend(build_attempt_segments(
                        &events,
                        &AttemptMeta {
                            subtask: subtask.subtask,
                            attempt: attempt.attempt,
                            host: &attempt.host,
                            taskmanager_id: &attempt.taskmanager_id,
                            duration: attempt.duration,
                        },
                    ));
                }
            }
            Granularity::Subtask => {
                // The subtask's own timestamps stand in for its representative attempt.
                let events = normalize_timestamps(&subtask.timestamps);
                segments.extend(build_attempt_segments(
                    &events,
                    &AttemptMeta {
                        subtask: subtask.subtask,
                        attempt: subtask.attempt,
                        host: &subtask.host,
                        taskmanager_id: &subtask.taskmanager_id,
                        duration: subtask.duration,
                    },
                ));
            }
        }
    }

    let mut subtask_ids: Vec<u32> = timings.subtasks.iter().map(|s| s.subtask).collect();
    subtask_ids.sort_unstable();
    subtask_ids.dedup();

    SegmentCollection {
        segments,
        subtask_ids,
    }
}

/// Distinct attempt numbers of one subtask, sorted ascending. Used to populate
/// the attempt selector once a specific subtask is chosen. An unknown subtask
/// id yields an empty list.
pub fn attempt_ids_for_subtask(timings: &SubtaskTimings, subtask: u32) -> Vec<u32> {
    let Some(found) = timings.subtasks.iter().find(|s| s.subtask == subtask) else {
        return Vec::new();
    };
    let mut attempt_ids: Vec<u32> = found.attempts.iter().map(|a| a.attempt).collect();
    attempt_ids.sort_unstable();
    attempt_ids.dedup();
    attempt_ids
}
