use std::ops::RangeInclusive;

use crate::sample::{Direction, SampleKey};

/// Porosity of one source image at one threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRecord {
    pub sample: u64,
    pub iteration: u64,
    pub direction: Direction,
    pub threshold: u8,
    /// Percentage of black pixels, 0..=100
    pub porosity: f64,
}

impl ResultRecord {
    pub fn new(key: SampleKey, threshold: u8, porosity: f64) -> Self {
        Self {
            sample: key.sample,
            iteration: key.iteration,
            direction: key.direction,
            threshold,
            porosity,
        }
    }

    /// Identity of the record within a sweep
    pub fn key(&self) -> (u64, u64, Direction, u8) {
        (self.sample, self.iteration, self.direction, self.threshold)
    }
}

/// The fixed set of threshold cut points swept, 0..=255
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdDomain {
    range: RangeInclusive<u8>,
}

impl ThresholdDomain {
    pub fn full() -> Self {
        Self { range: 0..=u8::MAX }
    }

    pub fn len(&self) -> usize {
        self.range.clone().count()
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = u8> + '_ {
        self.range.clone()
    }

    /// Number of records a sweep over `image_count` images must produce
    pub fn expected_records(&self, image_count: usize) -> usize {
        self.len() * image_count
    }
}

impl Default for ThresholdDomain {
    fn default() -> Self {
        Self::full()
    }
}

/// Statistics from a completed sweep
#[derive(Debug, Default, Clone)]
pub struct SweepStats {
    pub images: usize,
    pub thresholds: usize,
    pub records: usize,
    pub images_written: usize,
    pub workers: usize,
    pub writers: usize,
    pub duration_ms: u64,
}

/// Result of a completed sweep
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    pub stats: SweepStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_domain_has_256_values() {
        let domain = ThresholdDomain::full();
        assert_eq!(domain.len(), 256);
        assert!(!domain.is_empty());
        assert_eq!(domain.values().next(), Some(0));
        assert_eq!(domain.values().last(), Some(255));
        assert_eq!(domain.expected_records(3), 768);
        assert_eq!(domain.expected_records(0), 0);
    }
}
