//! Collapsing bursts of near-identical captures.

use std::time::Duration;

use chrono::NaiveDateTime;

use crate::PhotoRecord;

pub const DEFAULT_DUPLICATE_WINDOW: Duration = Duration::from_secs(300);

/// Records sorted ascending by capture time, undated records first.
///
/// The sort is stable, so records sharing a timestamp keep their input order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeOrdered(Vec<PhotoRecord>);

impl TimeOrdered {
    pub fn sort(mut records: Vec<PhotoRecord>) -> Self {
        records.sort_by_key(|record| record.timestamp);
        Self(records)
    }

    pub fn as_slice(&self) -> &[PhotoRecord] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<PhotoRecord> {
        self.0
    }
}

/// Drops every record that duplicates the record immediately before it in
/// `ordered`.
///
/// A record is a duplicate when both it and its predecessor are dated, they
/// were taken less than `window` apart, and they carry the same number of
/// annotations. The predecessor is the previous input record whether or not
/// it was kept, so a slow drift of captures collapses pairwise.
pub fn deduplicate(ordered: TimeOrdered, window: Duration) -> Vec<PhotoRecord> {
    let records = ordered.into_inner();
    let mut kept = Vec::with_capacity(records.len());
    let mut previous: Option<(Option<NaiveDateTime>, usize)> = None;

    for record in records {
        let current = (record.timestamp, record.annotation_count());
        let duplicate = previous.is_some_and(|prior| is_duplicate(prior, current, window));
        previous = Some(current);
        if !duplicate {
            kept.push(record);
        }
    }

    kept
}

fn is_duplicate(
    (previous_time, previous_count): (Option<NaiveDateTime>, usize),
    (current_time, current_count): (Option<NaiveDateTime>, usize),
    window: Duration,
) -> bool {
    let (Some(previous_time), Some(current_time)) = (previous_time, current_time) else {
        return false;
    };
    if previous_count != current_count {
        return false;
    }
    current_time
        .signed_duration_since(previous_time)
        .num_microseconds()
        .is_some_and(|micros| u128::from(micros.unsigned_abs()) < window.as_micros())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Annotation, BlobHandle, BoundingBox, PhotoId, WeldLabel};
    use chrono::DateTime;

    fn record(id: &str, seconds: Option<i64>, annotations: usize) -> PhotoRecord {
        PhotoRecord {
            id: PhotoId::new(id).expect("id"),
            file_name: format!("{id}.jpg"),
            timestamp: seconds.map(|secs| {
                DateTime::from_timestamp(secs, 0)
                    .expect("valid")
                    .naive_utc()
            }),
            annotations: (0..annotations)
                .map(|_| Annotation {
                    label: WeldLabel::Good,
                    bounds: BoundingBox::new(0, 0, 10, 10),
                    reviewed: false,
                })
                .collect(),
            source: BlobHandle::new(format!("photos/{id}.jpg")),
        }
    }

    fn ids(records: &[PhotoRecord]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn sort_places_undated_records_first_and_is_stable() {
        let ordered = TimeOrdered::sort(vec![
            record("late", Some(500), 1),
            record("undated-a", None, 1),
            record("early", Some(100), 1),
            record("undated-b", None, 1),
        ]);
        assert_eq!(
            ids(ordered.as_slice()),
            vec!["undated-a", "undated-b", "early", "late"]
        );
    }

    #[test]
    fn chain_collapses_against_previous_input_record() {
        let ordered = TimeOrdered::sort(vec![
            record("a", Some(0), 2),
            record("b", Some(100), 2),
            record("c", Some(150), 2),
        ]);
        let kept = deduplicate(ordered, DEFAULT_DUPLICATE_WINDOW);
        assert_eq!(ids(&kept), vec!["a"]);
    }

    #[test]
    fn drift_is_measured_from_the_dropped_neighbour() {
        // c is 400s from a but only 200s from the dropped b.
        let ordered = TimeOrdered::sort(vec![
            record("a", Some(0), 1),
            record("b", Some(200), 1),
            record("c", Some(400), 1),
        ]);
        let kept = deduplicate(ordered, DEFAULT_DUPLICATE_WINDOW);
        assert_eq!(ids(&kept), vec!["a"]);
    }

    #[test]
    fn different_annotation_counts_are_kept() {
        let ordered = TimeOrdered::sort(vec![
            record("a", Some(0), 1),
            record("b", Some(10), 2),
            record("c", Some(20), 2),
        ]);
        let kept = deduplicate(ordered, DEFAULT_DUPLICATE_WINDOW);
        assert_eq!(ids(&kept), vec!["a", "b"]);
    }

    #[test]
    fn window_boundary_is_exclusive() {
        let ordered = TimeOrdered::sort(vec![record("a", Some(0), 1), record("b", Some(300), 1)]);
        let kept = deduplicate(ordered, DEFAULT_DUPLICATE_WINDOW);
        assert_eq!(ids(&kept), vec!["a", "b"]);
    }

    #[test]
    fn undated_records_are_never_duplicates() {
        let ordered = TimeOrdered::sort(vec![
            record("x", None, 3),
            record("y", None, 3),
            record("z", Some(0), 3),
        ]);
        let kept = deduplicate(ordered, DEFAULT_DUPLICATE_WINDOW);
        assert_eq!(ids(&kept), vec!["x", "y", "z"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(deduplicate(TimeOrdered::default(), DEFAULT_DUPLICATE_WINDOW).is_empty());
    }
}
