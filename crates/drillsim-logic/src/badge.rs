//! Achievement badges derived from preparedness progress.
//!
//! Earned status is never stored. Every call recomputes from the snapshot,
//! so a badge can never disagree with the checklist state underneath it.

use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::hazard::HazardType;

/// What a badge requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    /// At least `target` checklist items completed overall.
    ChecklistCompletion { target: u32 },
    /// At least `target` completed checklist items in one category.
    CategoryMastery { category: String, target: u32 },
    /// At least `target` educational modules completed.
    ContentCompletion { target: u32 },
    /// At least `target` accumulated points.
    Points { target: u32 },
}

/// A badge definition. Earned status is derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: String,
    pub name: String,
    pub description: String,
    pub requirement: Requirement,
}

/// Aggregate progress handed in by the progress tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Ids of completed checklist items.
    pub completed_items: HashSet<String>,
    /// Checklist item id to the category it belongs to.
    pub item_categories: HashMap<String, String>,
    /// Ids of completed educational modules.
    pub completed_modules: HashSet<String>,
    pub total_points: u32,
}

impl ProgressSnapshot {
    fn completed_in_category(&self, category: &str) -> u32 {
        self.completed_items
            .iter()
            .filter(|item| {
                self.item_categories.get(item.as_str()).map(String::as_str) == Some(category)
            })
            .count() as u32
    }

    /// Progress toward a requirement as (achieved, target).
    fn measure(&self, requirement: &Requirement) -> (u32, u32) {
        match requirement {
            Requirement::ChecklistCompletion { target } => {
                (self.completed_items.len() as u32, *target)
            }
            Requirement::CategoryMastery { category, target } => {
                (self.completed_in_category(category), *target)
            }
            Requirement::ContentCompletion { target } => {
                (self.completed_modules.len() as u32, *target)
            }
            Requirement::Points { target } => (self.total_points, *target),
        }
    }
}

/// Whether `badge` is earned under `snapshot`.
pub fn is_earned(badge: &Badge, snapshot: &ProgressSnapshot) -> bool {
    let (achieved, target) = snapshot.measure(&badge.requirement);
    achieved >= target
}

/// Ids of every earned badge, recomputed fresh on each call.
pub fn earned_badges(badges: &[Badge], snapshot: &ProgressSnapshot) -> BTreeSet<String> {
    badges
        .iter()
        .filter(|b| is_earned(b, snapshot))
        .map(|b| b.id.clone())
        .collect()
}

/// Fractional progress toward `badge` in [0, 1], for progress bars.
pub fn badge_progress(badge: &Badge, snapshot: &ProgressSnapshot) -> f64 {
    let (achieved, target) = snapshot.measure(&badge.requirement);
    if target == 0 {
        return 1.0;
    }
    (f64::from(achieved) / f64::from(target)).min(1.0)
}

/// The badge set shipped with the runtime.
pub fn standard_badges() -> Vec<Badge> {
    vec![
        Badge {
            id: "first_steps".into(),
            name: "First Steps".into(),
            description: "Complete your first checklist item".into(),
            requirement: Requirement::ChecklistCompletion { target: 1 },
        },
        Badge {
            id: "getting_prepared".into(),
            name: "Getting Prepared".into(),
            description: "Complete 10 checklist items".into(),
            requirement: Requirement::ChecklistCompletion { target: 10 },
        },
        Badge {
            id: "preparedness_pro".into(),
            name: "Preparedness Pro".into(),
            description: "Complete 25 checklist items".into(),
            requirement: Requirement::ChecklistCompletion { target: 25 },
        },
        Badge {
            id: "earthquake_ready".into(),
            name: "Earthquake Ready".into(),
            description: "Complete 5 earthquake checklist items".into(),
            requirement: Requirement::CategoryMastery {
                category: HazardType::Earthquake.label().into(),
                target: 5,
            },
        },
        Badge {
            id: "fire_marshal".into(),
            name: "Fire Marshal".into(),
            description: "Complete 5 fire checklist items".into(),
            requirement: Requirement::CategoryMastery {
                category: HazardType::Fire.label().into(),
                target: 5,
            },
        },
        Badge {
            id: "student_of_safety".into(),
            name: "Student of Safety".into(),
            description: "Finish 3 educational modules".into(),
            requirement: Requirement::ContentCompletion { target: 3 },
        },
        Badge {
            id: "century".into(),
            name: "Century".into(),
            description: "Earn 100 points".into(),
            requirement: Requirement::Points { target: 100 },
        },
        Badge {
            id: "point_collector".into(),
            name: "Point Collector".into(),
            description: "Earn 1000 points".into(),
            requirement: Requirement::Points { target: 1000 },
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn badge(requirement: Requirement) -> Badge {
        Badge {
            id: "test_badge".into(),
            name: "Test Badge".into(),
            description: String::new(),
            requirement,
        }
    }

    fn snapshot_with_items(count: usize, category: &str) -> ProgressSnapshot {
        let mut snapshot = ProgressSnapshot::default();
        for i in 0..count {
            let id = format!("item_{}", i);
            snapshot.completed_items.insert(id.clone());
            snapshot.item_categories.insert(id, category.into());
        }
        snapshot
    }

    #[test]
    fn points_badge_needs_the_full_target() {
        let badge = badge(Requirement::Points { target: 100 });
        let mut snapshot = ProgressSnapshot::default();

        snapshot.total_points = 99;
        assert!(!is_earned(&badge, &snapshot));

        snapshot.total_points = 100;
        assert!(is_earned(&badge, &snapshot));
    }

    #[test]
    fn checklist_badge_counts_completed_items() {
        let badge = badge(Requirement::ChecklistCompletion { target: 3 });
        assert!(!is_earned(&badge, &snapshot_with_items(2, "Fire")));
        assert!(is_earned(&badge, &snapshot_with_items(3, "Fire")));
    }

    #[test]
    fn category_badge_ignores_other_categories() {
        let badge = badge(Requirement::CategoryMastery {
            category: "Earthquake".into(),
            target: 2,
        });

        let mut snapshot = snapshot_with_items(5, "Fire");
        assert!(!is_earned(&badge, &snapshot));

        snapshot.completed_items.insert("quake_a".into());
        snapshot.completed_items.insert("quake_b".into());
        snapshot
            .item_categories
            .insert("quake_a".into(), "Earthquake".into());
        snapshot
            .item_categories
            .insert("quake_b".into(), "Earthquake".into());
        assert!(is_earned(&badge, &snapshot));
    }

    #[test]
    fn module_badge_counts_modules() {
        let badge = badge(Requirement::ContentCompletion { target: 2 });
        let mut snapshot = ProgressSnapshot::default();
        snapshot.completed_modules.insert("quake_101".into());
        assert!(!is_earned(&badge, &snapshot));

        snapshot.completed_modules.insert("fire_101".into());
        assert!(is_earned(&badge, &snapshot));
    }

    #[test]
    fn progress_is_fractional_and_capped() {
        let badge = badge(Requirement::Points { target: 200 });
        let mut snapshot = ProgressSnapshot::default();

        snapshot.total_points = 50;
        assert!((badge_progress(&badge, &snapshot) - 0.25).abs() < 1e-12);

        snapshot.total_points = 400;
        assert_eq!(badge_progress(&badge, &snapshot), 1.0);
    }

    #[test]
    fn earned_set_tracks_the_snapshot() {
        let badges = standard_badges();
        let empty = ProgressSnapshot::default();
        let earned = earned_badges(&badges, &empty);
        assert!(earned.is_empty());

        let mut snapshot = snapshot_with_items(1, "Flood");
        snapshot.total_points = 150;
        let earned = earned_badges(&badges, &snapshot);
        assert!(earned.contains("first_steps"));
        assert!(earned.contains("century"));
        assert!(!earned.contains("point_collector"));

        // Dropping the points drops the badge on the next computation.
        snapshot.total_points = 0;
        let earned = earned_badges(&badges, &snapshot);
        assert!(!earned.contains("century"));
    }

    #[test]
    fn standard_badges_have_unique_ids() {
        let badges = standard_badges();
        let ids: BTreeSet<&str> = badges.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids.len(), badges.len());
    }
}
