//! Statistics Calculator Module
//! Descriptive statistics over the marks column of the roster.

use crate::data::Student;

/// Summary statistics for the marks of a roster.
#[derive(Debug, Clone, PartialEq)]
pub struct RosterStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: i64,
    pub max: i64,
    pub p95: f64,
    pub p05: f64,
    /// Name of the student with the highest marks.
    pub top: String,
    /// Name of the student with the lowest marks.
    pub bottom: String,
}

impl RosterStats {
    /// Compute statistics for a roster. Returns `None` for an empty roster so
    /// the summary panel can render blank instead of NaN.
    pub fn compute(students: &[Student]) -> Option<Self> {
        if students.is_empty() {
            return None;
        }

        let n = students.len();
        let values: Vec<f64> = students.iter().map(|s| s.marks as f64).collect();
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        let variance = if n > 1 {
            values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
        } else {
            0.0
        };

        let top = students
            .iter()
            .max_by_key(|s| s.marks)
            .map(|s| s.name.clone())
            .unwrap_or_default();
        let bottom = students
            .iter()
            .min_by_key(|s| s.marks)
            .map(|s| s.name.clone())
            .unwrap_or_default();

        Some(Self {
            count: n,
            mean,
            median,
            std: variance.sqrt(),
            min: students.iter().map(|s| s.marks).min().unwrap_or(0),
            max: students.iter().map(|s| s.marks).max().unwrap_or(0),
            p95: percentile(&sorted, 95.0),
            p05: percentile(&sorted, 5.0),
            top,
            bottom,
        })
    }
}

/// Percentile with linear interpolation between ranks.
fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster(marks: &[(&str, i64)]) -> Vec<Student> {
        marks
            .iter()
            .enumerate()
            .map(|(i, (name, m))| Student {
                id: i as i64 + 1,
                name: name.to_string(),
                roll: format!("R-{:02}", i + 1),
                marks: *m,
            })
            .collect()
    }

    #[test]
    fn test_empty_roster_has_no_stats() {
        assert_eq!(RosterStats::compute(&[]), None);
    }

    #[test]
    fn test_single_student() {
        let stats = RosterStats::compute(&roster(&[("Alice", 80)])).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 80.0);
        assert_eq!(stats.median, 80.0);
        assert_eq!(stats.std, 0.0);
        assert_eq!(stats.top, "Alice");
        assert_eq!(stats.bottom, "Alice");
    }

    #[test]
    fn test_known_values() {
        let stats =
            RosterStats::compute(&roster(&[("A", 60), ("B", 70), ("C", 80), ("D", 90)])).unwrap();
        assert_eq!(stats.mean, 75.0);
        assert_eq!(stats.median, 75.0);
        assert_eq!(stats.min, 60);
        assert_eq!(stats.max, 90);
        assert_eq!(stats.top, "D");
        assert_eq!(stats.bottom, "A");
        // sample std of 60,70,80,90
        assert!((stats.std - 12.909944).abs() < 1e-5);
    }

    #[test]
    fn test_percentile_interpolates() {
        let sorted = [10.0, 20.0, 30.0, 40.0, 50.0];
        assert_eq!(percentile(&sorted, 0.0), 10.0);
        assert_eq!(percentile(&sorted, 50.0), 30.0);
        assert_eq!(percentile(&sorted, 100.0), 50.0);
        assert_eq!(percentile(&sorted, 25.0), 20.0);
        // 95th lands between the last two ranks
        assert!((percentile(&sorted, 95.0) - 48.0).abs() < 1e-9);
    }
}
