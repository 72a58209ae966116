//! Turns one attempt's raw state-transition timestamps into contiguous display
//! segments. The timestamp map only defines points in time; durations between
//! consecutive states are implicit, and the final state's duration has to be
//! recovered from the attempt's reported total duration.

use std::collections::BTreeMap;

use crate::types::{segment_label, worker_log_link, Event, Segment, TimeMillis};

/// Extract the events an attempt actually reached from its state → time map,
/// sorted ascending by time.
///
/// Entries with non-positive times mark states the attempt never entered and
/// are dropped. Equal timestamps keep the map's enumeration order (the sort is
/// stable); no meaning should be attached to that order.
pub fn normalize_timestamps(timestamps: &BTreeMap<String, TimeMillis>) -> Vec<Event> {
    let mut events: Vec<Event> = timestamps
        .iter()
        .filter(|(_, &time)| time > 0)
        .map(|(state, &time)| Event {
            state: state.clone(),
            time,
        })
        .collect();
    events.sort_by_key(|event| event.time);
    events
}

/// Identifies the attempt (or the subtask's representative attempt) whose
/// events are being turned into segments, plus what's needed for labeling.
#[derive(Debug, Clone)]
pub struct AttemptMeta<'a> {
    pub subtask: u32,
    pub attempt: u32,
    pub host: &'a str,
    pub taskmanager_id: &'a str,
    pub duration: TimeMillis,
}

/// Build the segment sequence for one attempt from its sorted events.
///
/// Each adjacent event pair becomes one segment. The last event has no
/// successor, so the terminal segment ends at `first event time + duration`,
/// clamped up to the last event's time when the reported duration is too short
/// to cover the observed events (a zero-width terminal segment, never a
/// negative-width one). A single event yields exactly one terminal segment; no
/// events yield no segments.
pub fn build_attempt_segments(events: &[Event], meta: &AttemptMeta) -> Vec<Segment> {
    let Some(first) = events.first() else {
        return Vec::new();
    };
    let name = segment_label(meta.subtask, meta.host, meta.attempt);
    let link = worker_log_link(meta.taskmanager_id);

    let mut segments = Vec::with_capacity(events.len());
    for (index, event) in events.iter().enumerate() {
        let end = match events.get(index + 1) {
            Some(next) => next.time,
            None => (first.time + meta.duration).max(event.time),
        };
        segments.push(Segment {
            name: name.clone(),
            status: event.state.clone(),
            start_time: event.time,
            range: [event.time, end],
            subtask: meta.subtask,
            attempt: meta.attempt,
            link: link.clone(),
        });
    }
    segments
}
