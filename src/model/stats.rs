//! Aggregate status counts and recent activity for the dashboard

use super::record::{Record, Status};
use std::collections::HashMap;

/// Count occurrences of each status in the collection
///
/// Statuses with zero occurrences are simply absent; callers default
/// missing keys to 0. Unrecognized statuses count under their own key.
pub fn aggregate(records: &[Record]) -> HashMap<Status, usize> {
    let mut counts = HashMap::new();
    for record in records {
        *counts.entry(record.status.clone()).or_insert(0) += 1;
    }
    counts
}

/// The `limit` records with the most recent registration date, descending,
/// ties stable by input order. Always fed the full collection, never a page.
pub fn recent_activity(records: &[Record], limit: usize) -> Vec<&Record> {
    let mut sorted: Vec<&Record> = records.iter().collect();
    sorted.sort_by(|a, b| b.date_key().cmp(&a.date_key()));
    sorted.truncate(limit);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::seed_records;

    fn record(name: &str, date: &str, status: Status) -> Record {
        Record {
            full_name: name.to_string(),
            registration_date: date.to_string(),
            status,
            ..seed_records().remove(0)
        }
    }

    #[test]
    fn test_aggregate_counts_and_omits_absent_statuses() {
        let records = vec![
            record("A", "2024-01-01", Status::Pending),
            record("B", "2024-01-02", Status::Pending),
            record("C", "2024-01-03", Status::Pending),
            record("D", "2024-01-04", Status::Authorized),
            record("E", "2024-01-05", Status::Authorized),
        ];
        let counts = aggregate(&records);
        assert_eq!(counts.get(&Status::Pending), Some(&3));
        assert_eq!(counts.get(&Status::Authorized), Some(&2));
        assert_eq!(counts.get(&Status::Rejected), None);
        assert_eq!(counts.values().sum::<usize>(), records.len());
    }

    #[test]
    fn test_aggregate_empty_collection() {
        assert!(aggregate(&[]).is_empty());
    }

    #[test]
    fn test_aggregate_keeps_unrecognized_status_as_distinct_bucket() {
        let records = vec![
            record("A", "2024-01-01", Status::Other("Limbo".to_string())),
            record("B", "2024-01-02", Status::Other("Limbo".to_string())),
            record("C", "2024-01-03", Status::Pending),
        ];
        let counts = aggregate(&records);
        assert_eq!(counts.get(&Status::Other("Limbo".to_string())), Some(&2));
        assert_eq!(counts.values().sum::<usize>(), 3);
    }

    #[test]
    fn test_recent_activity_orders_by_date_desc() {
        let records = vec![
            record("Old", "2020-01-01", Status::Pending),
            record("New", "2024-06-01", Status::Pending),
            record("Mid", "2022-03-15", Status::Pending),
        ];
        let recent = recent_activity(&records, 5);
        let names: Vec<&str> = recent.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["New", "Mid", "Old"]);
    }

    #[test]
    fn test_recent_activity_truncates_and_breaks_ties_by_input_order() {
        let records = vec![
            record("First", "2024-01-01", Status::Pending),
            record("Second", "2024-01-01", Status::Pending),
            record("Third", "2024-01-01", Status::Pending),
        ];
        let recent = recent_activity(&records, 2);
        let names: Vec<&str> = recent.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second"]);
    }
}
