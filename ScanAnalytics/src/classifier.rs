use serde::{Deserialize, Serialize};
use std::fmt;

const CRITICAL_THRESHOLD: i64 = 8;
const HIGH_THRESHOLD: i64 = 5;
const MEDIUM_THRESHOLD: i64 = 3;

/// Discrete risk category derived from a record's vulnerability count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeverityTier {
    Critical,
    High,
    Medium,
    Low,
}

impl SeverityTier {
    /// All tiers, most severe first.
    pub const ALL: [SeverityTier; 4] = [
        SeverityTier::Critical,
        SeverityTier::High,
        SeverityTier::Medium,
        SeverityTier::Low,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SeverityTier::Critical => "Critical",
            SeverityTier::High => "High",
            SeverityTier::Medium => "Medium",
            SeverityTier::Low => "Low",
        }
    }

    /// Chart fill color for the tier.
    pub fn color(&self) -> &'static str {
        match self {
            SeverityTier::Critical => "#ef4444",
            SeverityTier::High => "#f97316",
            SeverityTier::Medium => "#eab308",
            SeverityTier::Low => "#22c55e",
        }
    }

    /// Display weight, 4 for critical down to 1 for low.
    pub fn weight(&self) -> u8 {
        match self {
            SeverityTier::Critical => 4,
            SeverityTier::High => 3,
            SeverityTier::Medium => 2,
            SeverityTier::Low => 1,
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn tier(vulnerability_count: i64) -> SeverityTier {
    if vulnerability_count >= CRITICAL_THRESHOLD {
        SeverityTier::Critical
    } else if vulnerability_count >= HIGH_THRESHOLD {
        SeverityTier::High
    } else if vulnerability_count >= MEDIUM_THRESHOLD {
        SeverityTier::Medium
    } else {
        SeverityTier::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_counts_map_to_exact_tiers() {
        let cases = [
            (0, SeverityTier::Low),
            (2, SeverityTier::Low),
            (3, SeverityTier::Medium),
            (4, SeverityTier::Medium),
            (5, SeverityTier::High),
            (7, SeverityTier::High),
            (8, SeverityTier::Critical),
            (250, SeverityTier::Critical),
        ];
        for (count, expected) in cases {
            assert_eq!(tier(count), expected, "count {}", count);
        }
    }

    #[test]
    fn severity_never_increases_as_count_drops() {
        let mut previous = tier(20).weight();
        for count in (0..20).rev() {
            let weight = tier(count).weight();
            assert!(weight <= previous);
            previous = weight;
        }
    }
}
