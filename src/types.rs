/// Milliseconds since epoch, as reported by the job engine's monitoring API.
/// Negative values are sentinels for "not reached yet".
pub type TimeMillis = i64;

/// Sentinel the API uses for start/end times that do not exist yet.
pub const UNSET_TIME: TimeMillis = -1;

pub fn time_millis_to_utc_string(time: TimeMillis) -> String {
    let date_time = chrono::DateTime::from_timestamp_millis(time).unwrap_or_default();
    date_time.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// Short form used on the chart time axis.
pub fn format_time_millis(time: TimeMillis) -> String {
    let date_time = chrono::DateTime::from_timestamp_millis(time).unwrap_or_default();
    date_time.format("%m-%d %H:%M:%S").to_string()
}

/// One state transition of an attempt, extracted from its timestamp map.
/// Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub state: String,
    pub time: TimeMillis,
}

/// Drill-down resolution: one row per subtask, or one row per execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    #[default]
    Subtask,
    Attempt,
}

/// One renderable Gantt bar: a single state of one attempt (or subtask row),
/// bounded in time.
///
/// Invariants: `range[0] <= range[1]`, and the segments of one attempt are
/// contiguous (each ends where the next one starts, except the last).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub name: String,
    pub status: String,
    /// Time of the event that opened this segment.
    pub start_time: TimeMillis,
    pub range: [TimeMillis; 2],
    pub subtask: u32,
    pub attempt: u32,
    /// Reference to the worker log of the attempt this segment belongs to.
    pub link: String,
}

pub fn segment_label(subtask: u32, host: &str, attempt: u32) -> String {
    format!("Subtask-{subtask} | Host-{host} | Attempt-{attempt}")
}

pub fn worker_log_link(taskmanager_id: &str) -> String {
    format!("#/task-manager/{taskmanager_id}/log")
}

/// Display color for an execution state, as a CSS hex string.
/// Unknown states get a neutral gray.
pub fn status_color(status: &str) -> &'static str {
    match status {
        "CREATED" => "#2f54eb",
        "SCHEDULED" => "#722ed1",
        "DEPLOYING" => "#13c2c2",
        "INITIALIZING" => "#738df0",
        "RUNNING" => "#52c41a",
        "FINISHED" => "#1890ff",
        "CANCELING" => "#faad14",
        "CANCELED" => "#fa8c16",
        "FAILED" => "#f5222d",
        "RECONCILING" => "#eb2f96",
        _ => "#d9d9d9",
    }
}
