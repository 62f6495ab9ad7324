use chrono::Datelike;
use serde::Serialize;

use crate::models::{round_to_tenth, Unit, Workout, WorkoutSet};

/// Default number of points on a progress chart.
pub const DEFAULT_CHART_POINTS: usize = 10;

/// Training volume (reps × weight) of a set list, in `unit`.
pub fn total_volume(sets: &[WorkoutSet], unit: Unit) -> f64 {
    sets.iter()
        .map(|s| f64::from(s.reps) * s.weight_in(unit))
        .sum()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    /// `month/day` of each point.
    pub labels: Vec<String>,
    /// Heaviest set of each workout.
    pub values: Vec<f64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Max-weight trend over chronologically ordered workouts.
///
/// With more than `max_points` workouts, every Nth one is kept
/// (N = ceil(count / max_points)) plus the most recent, then only the last
/// `max_points` survive. The most recent workout is always the final point.
pub fn chart_series(workouts: &[Workout], unit: Unit, max_points: usize) -> ChartSeries {
    if max_points == 0 {
        return ChartSeries::default();
    }

    let count = workouts.len();
    let step = if count > max_points {
        count.div_ceil(max_points)
    } else {
        1
    };

    let kept: Vec<&Workout> = workouts
        .iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0 || *i == count - 1)
        .map(|(_, w)| w)
        .collect();
    let kept = &kept[kept.len().saturating_sub(max_points)..];

    ChartSeries {
        labels: kept
            .iter()
            .map(|w| format!("{}/{}", w.date.month(), w.date.day()))
            .collect(),
        values: kept.iter().map(|w| w.max_weight(unit)).collect(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_workouts: usize,
    pub max_weight: f64,
    pub total_reps: u64,
    pub total_volume: f64,
    /// Mean weight over all sets, one decimal place.
    pub avg_weight: f64,
    /// Percent change of the heaviest set from the first workout to the last,
    /// one decimal place. `None` when the first workout has no weight to
    /// compare against.
    pub progress: Option<f64>,
}

/// Aggregate statistics over chronologically ordered workouts, in `unit`.
/// Returns `None` for an empty list.
pub fn summary_stats(workouts: &[Workout], unit: Unit) -> Option<SummaryStats> {
    let first = workouts.first()?;
    let last = workouts.last()?;

    let sets: Vec<&WorkoutSet> = workouts.iter().flat_map(|w| &w.sets).collect();
    let weights: Vec<f64> = sets.iter().map(|s| s.weight_in(unit)).collect();

    let max_weight = weights.iter().copied().fold(0.0, f64::max);
    let total_reps = sets.iter().map(|s| u64::from(s.reps)).sum();
    let volume = workouts.iter().map(|w| total_volume(&w.sets, unit)).sum();
    let avg_weight = if weights.is_empty() {
        0.0
    } else {
        round_to_tenth(weights.iter().sum::<f64>() / weights.len() as f64)
    };

    let first_max = first.max_weight(unit);
    let last_max = last.max_weight(unit);
    let progress = if first_max > 0.0 {
        Some(round_to_tenth((last_max - first_max) / first_max * 100.0))
    } else {
        None
    };

    Some(SummaryStats {
        total_workouts: workouts.len(),
        max_weight,
        total_reps,
        total_volume: volume,
        avg_weight,
        progress,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DATE_FORMAT;
    use chrono::{DateTime, Days, NaiveDate};

    fn workout(day: NaiveDate, sets: Vec<WorkoutSet>) -> Workout {
        Workout {
            id: day.to_string(),
            exercise_id: "squat".to_string(),
            date: day,
            sets,
            notes: None,
            created_at: DateTime::from_timestamp_millis(0).unwrap(),
        }
    }

    fn kg(reps: u32, weight: f64) -> WorkoutSet {
        WorkoutSet::new(reps, weight, Unit::Kg)
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn daily(count: u64) -> Vec<Workout> {
        let start = date("2024-01-01");
        (0..count)
            .map(|i| {
                workout(
                    start.checked_add_days(Days::new(i)).unwrap(),
                    vec![kg(5, 50.0 + i as f64)],
                )
            })
            .collect()
    }

    #[test]
    fn test_total_volume() {
        assert_eq!(total_volume(&[kg(5, 100.0), kg(3, 110.0), kg(10, 0.0)], Unit::Kg), 830.0);
        assert_eq!(total_volume(&[], Unit::Kg), 0.0);
    }

    #[test]
    fn test_total_volume_normalizes_units() {
        let sets = [kg(1, 100.0), WorkoutSet::new(2, 220.5, Unit::Lbs)];
        assert_eq!(total_volume(&sets, Unit::Kg), 300.0);
    }

    #[test]
    fn test_chart_series_small_input_is_untouched() {
        let workouts = vec![
            workout(date("2024-01-05"), vec![kg(5, 60.0), kg(3, 70.0)]),
            workout(date("2024-02-10"), vec![kg(5, 72.5)]),
        ];

        let series = chart_series(&workouts, Unit::Kg, DEFAULT_CHART_POINTS);

        assert_eq!(series.labels, vec!["1/5", "2/10"]);
        assert_eq!(series.values, vec![70.0, 72.5]);
    }

    #[test]
    fn test_chart_series_downsample_keeps_latest() {
        let workouts = daily(23);

        let series = chart_series(&workouts, Unit::Kg, 10);

        // every third point (0, 3, .., 21) plus the last (22)
        assert_eq!(series.len(), 9);
        assert_eq!(series.labels.last().unwrap(), "1/23");
        assert_eq!(*series.values.last().unwrap(), 72.0);
        assert_eq!(series.values[0], 50.0);
        assert_eq!(series.values[7], 71.0);
    }

    #[test]
    fn test_chart_series_truncates_to_max_points() {
        // step 2 keeps 0, 2, .., 18 and the last (19): eleven points
        let workouts = daily(20);

        let series = chart_series(&workouts, Unit::Kg, 10);

        assert_eq!(series.len(), 10);
        assert_eq!(series.values.first(), Some(&52.0));
        assert_eq!(series.values.last(), Some(&69.0));
    }

    #[test]
    fn test_chart_series_zero_points() {
        assert!(chart_series(&daily(5), Unit::Kg, 0).is_empty());
        assert!(chart_series(&[], Unit::Kg, 10).is_empty());
    }

    #[test]
    fn test_summary_stats_single_workout() {
        let workouts = vec![workout(date("2024-01-01"), vec![kg(5, 100.0), kg(5, 100.0)])];

        let stats = summary_stats(&workouts, Unit::Kg).unwrap();

        assert_eq!(
            stats,
            SummaryStats {
                total_workouts: 1,
                max_weight: 100.0,
                total_reps: 10,
                total_volume: 1000.0,
                avg_weight: 100.0,
                progress: Some(0.0),
            }
        );
    }

    #[test]
    fn test_summary_stats_progress() {
        let workouts = vec![
            workout(date("2024-01-01"), vec![kg(5, 80.0), kg(5, 60.0)]),
            workout(date("2024-01-08"), vec![kg(5, 120.0)]),
            workout(date("2024-01-15"), vec![kg(3, 90.0), kg(5, 85.0)]),
        ];

        let stats = summary_stats(&workouts, Unit::Kg).unwrap();

        assert_eq!(stats.total_workouts, 3);
        assert_eq!(stats.max_weight, 120.0);
        assert_eq!(stats.total_reps, 23);
        assert_eq!(stats.total_volume, 400.0 + 300.0 + 600.0 + 270.0 + 425.0);
        assert_eq!(stats.avg_weight, 87.0);
        assert_eq!(stats.progress, Some(12.5));
    }

    #[test]
    fn test_summary_stats_rounds_to_one_decimal() {
        let workouts = vec![
            workout(date("2024-01-01"), vec![kg(5, 60.0)]),
            workout(date("2024-01-02"), vec![kg(5, 62.5), kg(5, 61.0)]),
        ];

        let stats = summary_stats(&workouts, Unit::Kg).unwrap();

        // mean 61.1666.., (62.5 - 60) / 60 = 4.1666..%
        assert_eq!(stats.avg_weight, 61.2);
        assert_eq!(stats.progress, Some(4.2));
    }

    #[test]
    fn test_summary_stats_without_baseline() {
        let workouts = vec![
            workout(date("2024-01-01"), vec![kg(20, 0.0)]),
            workout(date("2024-01-02"), vec![kg(10, 20.0)]),
        ];

        let stats = summary_stats(&workouts, Unit::Kg).unwrap();

        assert_eq!(stats.progress, None);
        assert_eq!(stats.max_weight, 20.0);
    }

    #[test]
    fn test_summary_stats_empty() {
        assert_eq!(summary_stats(&[], Unit::Kg), None);
    }

    #[test]
    fn test_summary_stats_in_display_unit() {
        let workouts = vec![
            workout(date("2024-01-01"), vec![kg(5, 100.0)]),
            workout(date("2024-01-02"), vec![WorkoutSet::new(5, 225.0, Unit::Lbs)]),
        ];

        let stats = summary_stats(&workouts, Unit::Lbs).unwrap();

        assert_eq!(stats.max_weight, 225.0);
        assert_eq!(stats.avg_weight, 222.8);
        // 220.5 -> 225.0
        assert_eq!(stats.progress, Some(2.0));
    }
}
