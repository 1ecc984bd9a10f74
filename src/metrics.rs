//! Classification metrics: per-query latency and per-label accuracy.

use std::collections::BTreeMap;
use std::time::Duration;

/// Hit counts for one expected label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelStats {
    pub correct: u64,
    pub total: u64,
}

impl LabelStats {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.correct as f64 / self.total as f64
    }
}

/// Collects timings and prediction outcomes for a classification run.
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    latencies: Vec<Duration>,
    by_label: BTreeMap<char, LabelStats>,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the time one query took.
    pub fn record_query(&mut self, duration: Duration) {
        self.latencies.push(duration);
    }

    /// Record a prediction against the label it should have produced.
    pub fn record_prediction(&mut self, expected: char, predicted: char) {
        let stats = self.by_label.entry(expected).or_default();
        stats.total += 1;
        if expected == predicted {
            stats.correct += 1;
        }
    }

    pub fn total_queries(&self) -> u64 {
        self.latencies.len() as u64
    }

    pub fn correct(&self) -> u64 {
        self.by_label.values().map(|s| s.correct).sum()
    }

    pub fn incorrect(&self) -> u64 {
        self.by_label.values().map(|s| s.total - s.correct).sum()
    }

    /// Fraction of scored predictions that were correct, 0 when none were scored.
    pub fn accuracy(&self) -> f64 {
        let scored = self.correct() + self.incorrect();
        if scored == 0 {
            return 0.0;
        }
        self.correct() as f64 / scored as f64
    }

    /// Outcomes grouped by expected label, in label order.
    pub fn per_label(&self) -> impl Iterator<Item = (char, LabelStats)> + '_ {
        self.by_label.iter().map(|(&label, &stats)| (label, stats))
    }

    /// Average query latency in microseconds.
    pub fn avg_query_latency_us(&self) -> f64 {
        if self.latencies.is_empty() {
            return 0.0;
        }
        let total: Duration = self.latencies.iter().sum();
        total.as_secs_f64() * 1e6 / self.latencies.len() as f64
    }

    /// Nearest-rank latency percentile in microseconds (e.g. 50.0, 99.0).
    pub fn percentile_query_latency_us(&self, percentile: f64) -> f64 {
        if self.latencies.is_empty() {
            return 0.0;
        }
        let mut sorted = self.latencies.clone();
        sorted.sort_unstable();

        let rank = ((percentile / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        sorted[rank.min(sorted.len() - 1)].as_secs_f64() * 1e6
    }
}
