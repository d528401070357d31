use crate::logging::{LogEvent, LogFields, LogLevel, TARGET_METRICS};
use serde_json::json;
use std::time::Duration;

/// Running counters for layout passes and viewport queries.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    passes: u64,
    sections: u64,
    items_placed: u64,
    queries: u64,
    runs_touched: u64,
    attributes_scanned: u64,
    attributes_returned: u64,
    last_pass: Duration,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pass(&mut self, sections: usize, items: usize, elapsed: Duration) {
        self.passes = self.passes.saturating_add(1);
        self.sections = self.sections.saturating_add(sections as u64);
        self.items_placed = self.items_placed.saturating_add(items as u64);
        self.last_pass = elapsed;
    }

    pub fn record_query(&mut self, runs_touched: usize, scanned: usize, returned: usize) {
        self.queries = self.queries.saturating_add(1);
        self.runs_touched = self.runs_touched.saturating_add(runs_touched as u64);
        self.attributes_scanned = self.attributes_scanned.saturating_add(scanned as u64);
        self.attributes_returned = self.attributes_returned.saturating_add(returned as u64);
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub fn queries(&self) -> u64 {
        self.queries
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            passes: self.passes,
            sections: self.sections,
            items_placed: self.items_placed,
            queries: self.queries,
            runs_touched: self.runs_touched,
            attributes_scanned: self.attributes_scanned,
            attributes_returned: self.attributes_returned,
            last_pass_us: self.last_pass.as_micros() as u64,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub passes: u64,
    pub sections: u64,
    pub items_placed: u64,
    pub queries: u64,
    pub runs_touched: u64,
    pub attributes_scanned: u64,
    pub attributes_returned: u64,
    pub last_pass_us: u64,
}

impl MetricSnapshot {
    /// Share of scanned attributes that ended up in query results.
    pub fn scan_hit_ratio(&self) -> f64 {
        if self.attributes_scanned == 0 {
            return 0.0;
        }
        self.attributes_returned as f64 / self.attributes_scanned as f64
    }

    pub fn to_log_event(&self) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            TARGET_METRICS,
            "layout_metrics",
            self.as_fields(),
        )
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("passes".to_string(), json!(self.passes));
        map.insert("sections".to_string(), json!(self.sections));
        map.insert("items_placed".to_string(), json!(self.items_placed));
        map.insert("queries".to_string(), json!(self.queries));
        map.insert("runs_touched".to_string(), json!(self.runs_touched));
        map.insert("attributes_scanned".to_string(), json!(self.attributes_scanned));
        map.insert("attributes_returned".to_string(), json!(self.attributes_returned));
        map.insert("last_pass_us".to_string(), json!(self.last_pass_us));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate_into_snapshot() {
        let mut metrics = LayoutMetrics::new();
        metrics.record_pass(2, 30, Duration::from_micros(150));
        metrics.record_query(1, 20, 5);
        metrics.record_query(2, 20, 15);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.passes, 1);
        assert_eq!(snapshot.items_placed, 30);
        assert_eq!(snapshot.queries, 2);
        assert_eq!(snapshot.attributes_scanned, 40);
        assert_eq!(snapshot.scan_hit_ratio(), 0.5);
        assert_eq!(snapshot.last_pass_us, 150);

        let event = snapshot.to_log_event();
        assert_eq!(event.target, TARGET_METRICS);
        assert_eq!(event.fields["runs_touched"], json!(3));
    }
}
