use crate::models::Record;
use crate::traits::PollutedInfo;

/// PM2.5 level (μg/m³) above which a site goes into the high list.
pub const DEFAULT_HIGH_THRESHOLD: f64 = 10.0;

/// Split records into high (PM2.5 above `threshold`) and low (at or below).
///
/// Records without a usable PM2.5 reading belong to neither list. Feed order
/// is preserved within each list.
pub fn partition_by_pm25(records: Vec<Record>, threshold: f64) -> PollutedInfo {
    let mut info = PollutedInfo::default();
    let mut skipped = 0usize;

    for record in records {
        match record.pm25() {
            Some(value) if value > threshold => info.high.push(record),
            Some(_) => info.low.push(record),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Dropped records without a PM2.5 reading");
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site(name: &str, pm25: &str) -> Record {
        Record {
            site_name: name.to_string(),
            pm25: pm25.to_string(),
            ..Default::default()
        }
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.site_name.as_str()).collect()
    }

    #[test]
    fn test_partition_splits_on_threshold() {
        let records = vec![
            site("a", "25"),
            site("b", "10"),
            site("c", "3"),
            site("d", "10.5"),
        ];
        let info = partition_by_pm25(records, DEFAULT_HIGH_THRESHOLD);
        assert_eq!(names(&info.high), vec!["a", "d"]);
        assert_eq!(names(&info.low), vec!["b", "c"]);
    }

    #[test]
    fn test_partition_skips_missing_readings() {
        let records = vec![site("a", ""), site("b", "-"), site("c", "4")];
        let info = partition_by_pm25(records, DEFAULT_HIGH_THRESHOLD);
        assert!(info.high.is_empty());
        assert_eq!(names(&info.low), vec!["c"]);
        assert_eq!(info.len(), 1);
    }

    #[test]
    fn test_partition_custom_threshold() {
        let records = vec![site("a", "20"), site("b", "40")];
        let info = partition_by_pm25(records, 35.0);
        assert_eq!(names(&info.high), vec!["b"]);
        assert_eq!(names(&info.low), vec!["a"]);
    }

    #[test]
    fn test_partition_empty() {
        assert!(partition_by_pm25(Vec::new(), DEFAULT_HIGH_THRESHOLD).is_empty());
    }
}
