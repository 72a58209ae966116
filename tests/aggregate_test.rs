use jobviz::aggregate::{aggregate_segments, attempt_ids_for_subtask};
use jobviz::model::SubtaskTimings;
use jobviz::types::Granularity;

use test_helpers::*;

/// Two subtasks with one attempt each, at attempt granularity: two independent
/// segment groups, each internally contiguous, never interleaved.
#[test]
fn test_attempt_granularity_groups_do_not_interleave() {
    let timings = two_subtask_timings();
    let collection = aggregate_segments(&timings, Granularity::Attempt);

    assert_eq!(collection.segments.len(), 5); // 3 events + 2 events
    assert_eq!(collection.subtask_ids, vec![0, 1]);

    // Segments of one attempt stay together in the flat collection.
    let group_order: Vec<u32> = collection.segments.iter().map(|s| s.subtask).collect();
    assert_eq!(group_order, vec![0, 0, 0, 1, 1]);

    // And each group is contiguous on its own.
    for group in [&collection.segments[..3], &collection.segments[3..]] {
        for window in group.windows(2) {
            assert_eq!(window[0].range[1], window[1].range[0]);
        }
    }
}

#[test]
fn test_attempt_granularity_covers_retried_subtasks() {
    let timings = SubtaskTimings {
        subtasks: vec![subtask(
            0,
            "host-a",
            300,
            &[("CREATED", 500), ("RUNNING", 520)],
            vec![
                attempt(0, "host-a", "tm-a", 80, &[("CREATED", 100), ("FAILED", 180)]),
                attempt(1, "host-b", "tm-b", 300, &[("CREATED", 500), ("RUNNING", 520)]),
            ],
        )],
    };
    let collection = aggregate_segments(&timings, Granularity::Attempt);

    let attempts: Vec<u32> = collection.segments.iter().map(|s| s.attempt).collect();
    assert_eq!(attempts, vec![0, 0, 1, 1]);

    // Labels carry the host of the attempt, not of the subtask.
    assert!(collection.segments[2].name.contains("Host-host-b"));
    assert_eq!(collection.segments[2].link, "#/task-manager/tm-b/log");
}

/// Subtask granularity builds one timeline per subtask from the subtask's own
/// representative timestamps, ignoring the attempt list.
#[test]
fn test_subtask_granularity_uses_representative_timestamps() {
    let timings = SubtaskTimings {
        subtasks: vec![subtask(
            2,
            "host-c",
            200,
            &[("CREATED", 100), ("DEPLOYING", 150)],
            vec![
                attempt(0, "host-x", "tm-x", 10, &[("CREATED", 1)]),
                attempt(4, "host-c", "tm-c", 200, &[("CREATED", 100), ("DEPLOYING", 150)]),
            ],
        )],
    };
    let collection = aggregate_segments(&timings, Granularity::Subtask);

    assert_eq!(collection.segments.len(), 2);
    assert_eq!(collection.segments[0].subtask, 2);
    // Representative attempt number comes from the subtask itself.
    assert_eq!(collection.segments[0].attempt, 4);
    assert_eq!(collection.segments[0].range, [100, 150]);
    assert_eq!(collection.segments[1].range, [150, 300]);
}

#[test]
fn test_subtask_ids_are_distinct_and_sorted() {
    let mut timings = two_subtask_timings();
    timings.subtasks.reverse();
    let collection = aggregate_segments(&timings, Granularity::Subtask);
    assert_eq!(collection.subtask_ids, vec![0, 1]);
}

#[test]
fn test_attempt_ids_for_subtask() {
    let timings = SubtaskTimings {
        subtasks: vec![subtask(
            0,
            "host-a",
            100,
            &[("CREATED", 10)],
            vec![
                attempt(2, "host-a", "tm-a", 100, &[("CREATED", 10)]),
                attempt(0, "host-a", "tm-a", 100, &[("CREATED", 1)]),
                attempt(1, "host-a", "tm-a", 100, &[("CREATED", 5)]),
            ],
        )],
    };
    assert_eq!(attempt_ids_for_subtask(&timings, 0), vec![0, 1, 2]);
    assert_eq!(attempt_ids_for_subtask(&timings, 7), Vec::<u32>::new());
}

#[test]
fn test_subtask_without_positive_timestamps_contributes_nothing() {
    let timings = SubtaskTimings {
        subtasks: vec![subtask(
            0,
            "host-a",
            100,
            &[("CREATED", -1), ("SCHEDULED", 0)],
            vec![attempt(0, "host-a", "tm-a", 100, &[("CREATED", -1)])],
        )],
    };
    assert!(aggregate_segments(&timings, Granularity::Subtask).segments.is_empty());
    assert!(aggregate_segments(&timings, Granularity::Attempt).segments.is_empty());
}

/// The timing payload arrives with kebab-case field names; make sure the model
/// deserializes them and the aggregation reads the right fields.
#[test]
fn test_timings_deserialized_from_api_shape() {
    let timings: SubtaskTimings = serde_json::from_str(
        r#"{
            "subtasks": [
                {
                    "subtask": 0,
                    "host": "worker-1",
                    "duration": 200,
                    "timestamps": { "CREATED": 100, "DEPLOYING": 150 },
                    "attempts-time-info": [
                        {
                            "attempt-num": 1,
                            "host": "worker-1",
                            "taskmanager-id": "tm-1",
                            "duration": 200,
                            "timestamps": { "CREATED": 100, "DEPLOYING": 150 }
                        }
                    ]
                }
            ]
        }"#,
    )
    .expect("payload should deserialize");

    let collection = aggregate_segments(&timings, Granularity::Attempt);
    assert_eq!(collection.segments.len(), 2);
    assert_eq!(collection.segments[0].attempt, 1);
    assert_eq!(collection.segments[0].link, "#/task-manager/tm-1/log");
    assert_eq!(collection.segments[1].range, [150, 300]);
}
