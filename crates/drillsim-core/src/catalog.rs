//! Scenario library: validated packs with hazard-type lookup.
//!
//! A catalog validates every scenario when it is built, so sessions can
//! trust whatever they pull out of it. Lookups never substitute: asking
//! for a hazard the catalog does not carry is an error, not a fallback.

use std::fmt;

use rand::seq::SliceRandom;
use rand::Rng;

use drillsim_logic::hazard::HazardType;
use drillsim_logic::scenario::{Scenario, ScenarioError};

mod builtin;

/// An immutable library of drill scenarios.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// Build a catalog, validating every scenario up front. Any failure
    /// rejects the whole pack.
    pub fn from_scenarios(scenarios: Vec<Scenario>) -> Result<Self, CatalogError> {
        if scenarios.is_empty() {
            return Err(CatalogError::Empty);
        }
        for scenario in &scenarios {
            scenario.validate().map_err(|source| CatalogError::BadScenario {
                id: scenario.id.clone(),
                source,
            })?;
        }
        Ok(Self { scenarios })
    }

    /// Parse an externally generated scenario pack (a JSON array) and
    /// validate it like any other pack.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let scenarios: Vec<Scenario> = serde_json::from_str(json).map_err(CatalogError::Parse)?;
        Self::from_scenarios(scenarios)
    }

    /// The builtin six-hazard drill library. Unit tests pin every entry
    /// through the same validation as external packs.
    pub fn builtin() -> Self {
        Self {
            scenarios: builtin::scenarios(),
        }
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    /// Scenario with the given id.
    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    /// Uniform random pick across the whole catalog.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Result<&Scenario, CatalogError> {
        self.scenarios.choose(rng).ok_or(CatalogError::Empty)
    }

    /// First scenario for `hazard`. Missing hazards are an error; the
    /// catalog never hands back a different type instead.
    pub fn for_hazard(&self, hazard: HazardType) -> Result<&Scenario, CatalogError> {
        self.scenarios
            .iter()
            .find(|s| s.hazard == hazard)
            .ok_or(CatalogError::NoScenarioForHazard(hazard))
    }

    /// Uniform random pick among the scenarios for `hazard`. Missing
    /// hazards are an error, exactly as in [`for_hazard`](Self::for_hazard).
    pub fn random_for<R: Rng>(
        &self,
        hazard: HazardType,
        rng: &mut R,
    ) -> Result<&Scenario, CatalogError> {
        let matching: Vec<&Scenario> = self.by_hazard(hazard).collect();
        matching
            .choose(rng)
            .copied()
            .ok_or(CatalogError::NoScenarioForHazard(hazard))
    }

    /// Every scenario for `hazard`.
    pub fn by_hazard(&self, hazard: HazardType) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter().filter(move |s| s.hazard == hazard)
    }
}

/// Catalog construction and lookup failures.
#[derive(Debug)]
pub enum CatalogError {
    /// The pack contains no scenarios.
    Empty,
    /// No scenario of the requested hazard type exists.
    NoScenarioForHazard(HazardType),
    /// A scenario in the pack failed validation.
    BadScenario { id: String, source: ScenarioError },
    /// The pack is not valid JSON.
    Parse(serde_json::Error),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "catalog has no scenarios"),
            CatalogError::NoScenarioForHazard(hazard) => {
                write!(f, "no scenario for hazard {}", hazard.label())
            }
            CatalogError::BadScenario { id, source } => {
                write!(f, "scenario '{}' is invalid: {}", id, source)
            }
            CatalogError::Parse(e) => write!(f, "scenario pack is not valid JSON: {}", e),
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_passes_full_validation() {
        let catalog = ScenarioCatalog::from_scenarios(builtin::scenarios());
        assert!(catalog.is_ok());
    }

    #[test]
    fn builtin_covers_every_hazard() {
        let catalog = ScenarioCatalog::builtin();
        for hazard in HazardType::ALL {
            assert!(
                catalog.for_hazard(hazard).is_ok(),
                "no builtin drill for {:?}",
                hazard
            );
        }
    }

    #[test]
    fn builtin_ids_are_unique() {
        let catalog = ScenarioCatalog::builtin();
        let mut ids: Vec<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn empty_pack_is_rejected() {
        assert!(matches!(
            ScenarioCatalog::from_scenarios(vec![]),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn invalid_scenario_rejects_the_whole_pack() {
        let mut scenarios = builtin::scenarios();
        scenarios[0].difficulty = 9;
        let id = scenarios[0].id.clone();

        match ScenarioCatalog::from_scenarios(scenarios) {
            Err(CatalogError::BadScenario { id: bad, .. }) => assert_eq!(bad, id),
            other => panic!("expected BadScenario, got {:?}", other),
        }
    }

    #[test]
    fn missing_hazard_is_an_error_not_a_substitute() {
        let fire_only: Vec<Scenario> = builtin::scenarios()
            .into_iter()
            .filter(|s| s.hazard == HazardType::Fire)
            .collect();
        let catalog = ScenarioCatalog::from_scenarios(fire_only).unwrap();

        assert!(matches!(
            catalog.for_hazard(HazardType::Tsunami),
            Err(CatalogError::NoScenarioForHazard(HazardType::Tsunami))
        ));
    }

    #[test]
    fn random_for_stays_inside_the_hazard() {
        let catalog = ScenarioCatalog::builtin();
        let mut rng = rand::thread_rng();
        for hazard in HazardType::ALL {
            for _ in 0..8 {
                let picked = catalog.random_for(hazard, &mut rng).unwrap();
                assert_eq!(picked.hazard, hazard);
            }
        }
    }

    #[test]
    fn random_for_missing_hazard_is_an_error() {
        let fire_only: Vec<Scenario> = builtin::scenarios()
            .into_iter()
            .filter(|s| s.hazard == HazardType::Fire)
            .collect();
        let catalog = ScenarioCatalog::from_scenarios(fire_only).unwrap();

        let mut rng = rand::thread_rng();
        assert!(matches!(
            catalog.random_for(HazardType::Medical, &mut rng),
            Err(CatalogError::NoScenarioForHazard(HazardType::Medical))
        ));
    }

    #[test]
    fn random_draws_from_the_catalog() {
        let catalog = ScenarioCatalog::builtin();
        let mut rng = rand::thread_rng();
        for _ in 0..16 {
            let picked = catalog.random(&mut rng).unwrap();
            assert!(catalog.get(&picked.id).is_some());
        }
    }

    #[test]
    fn json_packs_round_through_the_same_validation() {
        let json = r#"[
            {
                "id": "pack_fire_kitchen",
                "hazard": "Fire",
                "title": "Kitchen Flare-Up",
                "description": "A pan catches while you cook.",
                "initial_situation": "Flames jump from the stove.",
                "environment": "Kitchen",
                "time_budget_s": 60,
                "difficulty": 2,
                "objectives": [],
                "resources": ["lid"],
                "stages": [
                    {
                        "Choice": {
                            "prompt": "The pan is burning.",
                            "choices": [
                                {
                                    "label": "Slide the lid over the pan",
                                    "correct": true,
                                    "score_delta": 15,
                                    "exit": "Victory"
                                },
                                {
                                    "label": "Pour water on it",
                                    "correct": false,
                                    "score_delta": -15,
                                    "exit": "Defeat"
                                }
                            ]
                        }
                    }
                ]
            }
        ]"#;

        let catalog = ScenarioCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        let scenario = catalog.get("pack_fire_kitchen").unwrap();
        assert_eq!(scenario.hazard, HazardType::Fire);
        assert_eq!(scenario.time_budget_s, 60);
    }

    #[test]
    fn bad_json_is_a_parse_error() {
        assert!(matches!(
            ScenarioCatalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
