//! Derives the job-level (root) chart rows from the vertex list.

use crate::model::Vertex;
use crate::types::{TimeMillis, UNSET_TIME};

/// One root-chart row: a vertex with a resolved time range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRange {
    pub id: String,
    pub name: String,
    pub status: String,
    pub range: [TimeMillis; 2],
}

/// Map the vertex list to ranged root rows.
///
/// Vertices that were never scheduled (no start time) have nothing to draw and
/// are dropped. A vertex still running has no end time; its end falls back to
/// `start + duration`. Rows come out ascending by range start, with the
/// original enumeration order kept for vertices starting at the same instant.
pub fn derive_vertex_ranges(vertices: &[Vertex]) -> Vec<VertexRange> {
    let mut rows: Vec<VertexRange> = vertices
        .iter()
        .filter(|vertex| vertex.start_time > UNSET_TIME)
        .map(|vertex| {
            let end = if vertex.end_time > UNSET_TIME {
                vertex.end_time
            } else {
                vertex.start_time + vertex.duration
            };
            VertexRange {
                id: vertex.id.clone(),
                name: vertex.name.clone(),
                status: vertex.status.clone(),
                range: [vertex.start_time, end],
            }
        })
        .collect();
    rows.sort_by_key(|row| row.range[0]);
    rows
}
