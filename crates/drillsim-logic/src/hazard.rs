//! Hazard taxonomy for drill scenarios.

use serde::{Deserialize, Serialize};

/// Disaster categories a drill can train for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardType {
    Earthquake,
    Fire,
    Flood,
    Medical,
    Tsunami,
    Evacuation,
}

impl HazardType {
    /// Every hazard type, in catalog order.
    pub const ALL: [HazardType; 6] = [
        HazardType::Earthquake,
        HazardType::Fire,
        HazardType::Flood,
        HazardType::Medical,
        HazardType::Tsunami,
        HazardType::Evacuation,
    ];

    /// Display label, also used as the checklist category key.
    pub fn label(&self) -> &'static str {
        match self {
            HazardType::Earthquake => "Earthquake",
            HazardType::Fire => "Fire",
            HazardType::Flood => "Flood",
            HazardType::Medical => "Medical",
            HazardType::Tsunami => "Tsunami",
            HazardType::Evacuation => "Evacuation",
        }
    }

    /// Baseline danger of the hazard class, 1 (routine) to 5 (catastrophic).
    /// Drill content uses this as the default scenario difficulty.
    pub fn severity(&self) -> u8 {
        match self {
            HazardType::Earthquake => 4,
            HazardType::Fire => 4,
            HazardType::Flood => 3,
            HazardType::Medical => 3,
            HazardType::Tsunami => 5,
            HazardType::Evacuation => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_covers_every_variant() {
        assert_eq!(HazardType::ALL.len(), 6);
        for (i, a) in HazardType::ALL.iter().enumerate() {
            for b in &HazardType::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn severity_in_difficulty_range() {
        for hazard in HazardType::ALL {
            let s = hazard.severity();
            assert!((1..=5).contains(&s), "{:?} severity {}", hazard, s);
        }
    }

    #[test]
    fn labels_are_unique() {
        for (i, a) in HazardType::ALL.iter().enumerate() {
            for b in &HazardType::ALL[i + 1..] {
                assert_ne!(a.label(), b.label());
            }
        }
    }
}
