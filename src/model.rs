//! Fetch-side data model: the shapes the monitoring API returns for a job and
//! for a vertex's subtask/attempt timing data. Each fetch result is an
//! immutable snapshot; refreshes replace it wholesale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::TimeMillis;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobDetail {
    pub jid: String,
    #[serde(default)]
    pub name: String,
    pub vertices: Vec<Vertex>,
}

/// One stage of the execution graph (a logical operator/task).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    pub id: String,
    pub name: String,
    #[serde(rename = "start-time")]
    pub start_time: TimeMillis,
    /// -1 while the vertex is still running.
    #[serde(rename = "end-time")]
    pub end_time: TimeMillis,
    pub duration: TimeMillis,
    pub status: String,
}

/// Timing data for every subtask of one vertex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtaskTimings {
    pub subtasks: Vec<Subtask>,
}

/// One parallel instance of a vertex. Its own `timestamps` mirror the
/// representative (latest) attempt, so subtask-granularity rows can be built
/// without touching the attempt list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub subtask: u32,
    pub host: String,
    #[serde(default)]
    pub status: String,
    pub duration: TimeMillis,
    /// Representative attempt number; the API omits it for single-attempt runs.
    #[serde(rename = "attempt-num", default)]
    pub attempt: u32,
    #[serde(rename = "taskmanager-id", default)]
    pub taskmanager_id: String,
    #[serde(default)]
    pub timestamps: BTreeMap<String, TimeMillis>,
    #[serde(rename = "attempts-time-info", default)]
    pub attempts: Vec<Attempt>,
}

/// One execution attempt of a subtask (subtasks may be retried).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    #[serde(rename = "attempt-num")]
    pub attempt: u32,
    pub host: String,
    #[serde(rename = "taskmanager-id", default)]
    pub taskmanager_id: String,
    pub duration: TimeMillis,
    #[serde(default)]
    pub timestamps: BTreeMap<String, TimeMillis>,
}
