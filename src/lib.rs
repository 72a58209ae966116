pub mod aggregate;
pub mod drilldown;
pub mod height;
pub mod model;
pub mod segments;
pub mod source;
pub mod types;
pub mod vertex_ranges;

pub use aggregate::{aggregate_segments, attempt_ids_for_subtask, SegmentCollection};
pub use drilldown::{Choice, DrillScope, DrilldownController, Selection, DEBOUNCE_MS};
pub use model::{Attempt, JobDetail, Subtask, SubtaskTimings, Vertex};
pub use source::{FetchRequest, TimingSource};
pub use types::{Event, Granularity, Segment, TimeMillis};
pub use vertex_ranges::{derive_vertex_ranges, VertexRange};
