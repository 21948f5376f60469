use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BatchStats {
    pub values: u64,
    pub bytes: u64,
    pub avg_bytes_per_value: f64,
    /// Encoded length -> number of values with that length
    pub length_histogram: BTreeMap<usize, u64>,
}

#[derive(Debug, Default)]
pub struct StatsCollector {
    values: u64,
    bytes: u64,
    lengths: BTreeMap<usize, u64>,
}

impl StatsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, encoded_len: usize) {
        self.values += 1;
        self.bytes += encoded_len as u64;
        *self.lengths.entry(encoded_len).or_insert(0) += 1;
    }

    pub fn get_stats(&self) -> BatchStats {
        let avg = if self.values == 0 {
            0.0
        } else {
            self.bytes as f64 / self.values as f64
        };

        BatchStats {
            values: self.values,
            bytes: self.bytes,
            avg_bytes_per_value: avg,
            length_histogram: self.lengths.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let stats = StatsCollector::new().get_stats();
        assert_eq!(stats.values, 0);
        assert_eq!(stats.avg_bytes_per_value, 0.0);
        assert!(stats.length_histogram.is_empty());
    }

    #[test]
    fn test_record() {
        let mut collector = StatsCollector::new();
        for len in [1, 1, 2, 10] {
            collector.record(len);
        }
        let stats = collector.get_stats();
        assert_eq!(stats.values, 4);
        assert_eq!(stats.bytes, 14);
        assert_eq!(stats.avg_bytes_per_value, 3.5);
        assert_eq!(stats.length_histogram.get(&1), Some(&2));
        assert_eq!(stats.length_histogram.get(&10), Some(&1));
    }
}
