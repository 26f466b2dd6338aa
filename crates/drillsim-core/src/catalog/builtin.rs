//! The builtin drill library: one scenario per hazard type.
//!
//! Pure content. Rules live in `drillsim-logic`; nothing here is special
//! to the runtime, and external packs can define the same shapes in JSON.

use drillsim_logic::action::{Action, ActionKind, Consequence};
use drillsim_logic::hazard::HazardType;
use drillsim_logic::scenario::{
    ActionStage, Choice, ChoiceStage, Objective, Scenario, Stage, StageExit,
};

pub fn scenarios() -> Vec<Scenario> {
    vec![
        earthquake(),
        fire(),
        flood(),
        medical(),
        tsunami(),
        evacuation(),
    ]
}

fn obj(id: &str, description: &str) -> Objective {
    Objective {
        id: id.into(),
        description: description.into(),
    }
}

fn earthquake() -> Scenario {
    Scenario {
        id: "quake_apartment".into(),
        hazard: HazardType::Earthquake,
        title: "Apartment Shakedown".into(),
        description: "Ride out a strong quake at home and get clear of the building.".into(),
        initial_situation: "The floor lurches. Shelves topple and the lights cut out.".into(),
        environment: "Third-floor apartment".into(),
        time_budget_s: 240,
        difficulty: HazardType::Earthquake.severity(),
        objectives: vec![
            obj("cover", "Take cover from falling debris"),
            obj("gas_off", "Deal with the gas leak"),
            obj("exit_safe", "Get clear of the building"),
        ],
        hazards: vec!["falling debris".into(), "gas leak".into(), "aftershocks".into()],
        resources: vec!["flashlight".into(), "water_bottle".into(), "first_aid_kit".into()],
        stages: vec![
            Stage::Actions(ActionStage {
                prompt: "The shaking builds. Everything not bolted down is moving.".into(),
                actions: vec![
                    Action {
                        id: "drop_cover_hold".into(),
                        description: "Drop under the table, cover your neck, hold on".into(),
                        kind: ActionKind::Move,
                        resource_cost: vec![],
                        time_cost: 10,
                        success_probability: 0.9,
                        consequences: vec![
                            Consequence {
                                description: "You wedge in as glass bursts across the room.".into(),
                                weight: 0.9,
                                situation_change: Some(
                                    "Under the table, dust raining down.".into(),
                                ),
                                advances_objective: Some("cover".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "A falling shelf clips your shoulder.".into(),
                                weight: 0.15,
                                health_change: -20,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "run_outside".into(),
                        description: "Sprint for the courtyard".into(),
                        kind: ActionKind::Move,
                        resource_cost: vec![],
                        time_cost: 15,
                        success_probability: 0.35,
                        consequences: vec![
                            Consequence {
                                description: "You thread the stairwell before it jams.".into(),
                                weight: 0.8,
                                situation_change: Some("In the courtyard, clear of glass.".into()),
                                advances_objective: Some("cover".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "Masonry rains down in the stairwell.".into(),
                                weight: 0.1,
                                health_change: -35,
                                ..Default::default()
                            },
                        ],
                    },
                ],
            }),
            Stage::Actions(ActionStage {
                prompt: "The shaking stops. You smell gas.".into(),
                actions: vec![
                    Action {
                        id: "shut_off_gas".into(),
                        description: "Find the valve and shut it off".into(),
                        kind: ActionKind::Use,
                        resource_cost: vec!["flashlight".into()],
                        time_cost: 30,
                        success_probability: 0.75,
                        consequences: vec![
                            Consequence {
                                description: "The valve squeals closed. The hiss stops.".into(),
                                weight: 0.85,
                                advances_objective: Some("gas_off".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "You fumble in the dark and breathe fumes.".into(),
                                weight: 0.2,
                                health_change: -10,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "open_windows".into(),
                        description: "Vent the room and back away".into(),
                        kind: ActionKind::Move,
                        resource_cost: vec![],
                        time_cost: 20,
                        success_probability: 0.6,
                        consequences: vec![
                            Consequence {
                                description: "Cross-breeze thins the smell to nothing.".into(),
                                weight: 0.8,
                                advances_objective: Some("gas_off".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "A window is jammed; the smell thickens.".into(),
                                weight: 0.25,
                                health_change: -5,
                                ..Default::default()
                            },
                        ],
                    },
                ],
            }),
            Stage::Actions(ActionStage {
                prompt: "Aftershocks are coming. Time to get out.".into(),
                actions: vec![
                    Action {
                        id: "take_stairs".into(),
                        description: "Take the stairs, away from windows".into(),
                        kind: ActionKind::Evacuate,
                        resource_cost: vec![],
                        time_cost: 40,
                        success_probability: 0.8,
                        consequences: vec![
                            Consequence {
                                description: "You pick through debris to the street.".into(),
                                weight: 0.9,
                                situation_change: Some("Outside, at the muster point.".into()),
                                advances_objective: Some("exit_safe".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "An aftershock throws you against the rail.".into(),
                                weight: 0.2,
                                health_change: -25,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "wait_for_help".into(),
                        description: "Shelter in the doorframe and wait".into(),
                        kind: ActionKind::Wait,
                        resource_cost: vec!["water_bottle".into()],
                        time_cost: 60,
                        success_probability: 0.4,
                        consequences: vec![
                            Consequence {
                                description: "A warden sweeps the floor and walks you out.".into(),
                                weight: 0.75,
                                advances_objective: Some("exit_safe".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "Nobody comes. Dust hangs in the air.".into(),
                                weight: 0.1,
                                health_change: -10,
                                ..Default::default()
                            },
                        ],
                    },
                ],
            }),
        ],
    }
}

fn fire() -> Scenario {
    Scenario {
        id: "fire_office".into(),
        hazard: HazardType::Fire,
        title: "Server Room Fire".into(),
        description: "Smoke on your floor. Get everyone out the right way.".into(),
        initial_situation: "Grey smoke curls out of the server room door.".into(),
        environment: "Fourth-floor office".into(),
        time_budget_s: 180,
        difficulty: HazardType::Fire.severity(),
        objectives: vec![obj("evacuate_floor", "Get yourself off the floor safely")],
        hazards: vec!["smoke".into(), "blocked corridor".into()],
        resources: vec!["fire_extinguisher".into(), "wet_cloth".into()],
        stages: vec![
            Stage::Actions(ActionStage {
                prompt: "The smoke is spreading along the ceiling.".into(),
                actions: vec![
                    Action {
                        id: "pull_alarm".into(),
                        description: "Pull the alarm and shout the floor awake".into(),
                        kind: ActionKind::Communicate,
                        resource_cost: vec![],
                        time_cost: 5,
                        success_probability: 0.95,
                        consequences: vec![
                            Consequence {
                                description: "The building erupts in klaxons.".into(),
                                weight: 0.9,
                                situation_change: Some(
                                    "Alarm ringing. Colleagues heading for the exits.".into(),
                                ),
                                ..Default::default()
                            },
                            Consequence {
                                description: "The panel is dead. You shout instead.".into(),
                                weight: 0.2,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "fight_fire".into(),
                        description: "Hit the flames with the extinguisher".into(),
                        kind: ActionKind::Use,
                        resource_cost: vec!["fire_extinguisher".into()],
                        time_cost: 30,
                        success_probability: 0.4,
                        consequences: vec![
                            Consequence {
                                description: "The flames knock down to embers.".into(),
                                weight: 0.75,
                                situation_change: Some("Fire out, but the smoke lingers.".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "Heat drives you back, coughing.".into(),
                                weight: 0.2,
                                health_change: -20,
                                ..Default::default()
                            },
                        ],
                    },
                ],
            }),
            Stage::Actions(ActionStage {
                prompt: "The corridor to the stairs is filling with smoke.".into(),
                actions: vec![
                    Action {
                        id: "crawl_low".into(),
                        description: "Crawl below the smoke line, cloth over your mouth".into(),
                        kind: ActionKind::Move,
                        resource_cost: vec!["wet_cloth".into()],
                        time_cost: 25,
                        success_probability: 0.8,
                        consequences: vec![
                            Consequence {
                                description: "You stay under the worst of it and reach the stairwell.".into(),
                                weight: 0.85,
                                advances_objective: Some("evacuate_floor".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "Smoke stings your eyes; you backtrack once.".into(),
                                weight: 0.25,
                                health_change: -20,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "sprint_through".into(),
                        description: "Hold your breath and sprint for the door".into(),
                        kind: ActionKind::Move,
                        resource_cost: vec![],
                        time_cost: 10,
                        success_probability: 0.5,
                        consequences: vec![
                            Consequence {
                                description: "You burst into the stairwell gasping.".into(),
                                weight: 0.8,
                                advances_objective: Some("evacuate_floor".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "You inhale a lungful and stagger back.".into(),
                                weight: 0.1,
                                health_change: -30,
                                ..Default::default()
                            },
                        ],
                    },
                ],
            }),
        ],
    }
}

fn flood() -> Scenario {
    Scenario {
        id: "flood_street".into(),
        hazard: HazardType::Flood,
        title: "Flash Flood Commute".into(),
        description: "Rising water on the drive home. Every minute counts.".into(),
        initial_situation: "Rain hammers the windshield. Water is past the curb.".into(),
        environment: "Suburban street".into(),
        time_budget_s: 120,
        difficulty: HazardType::Flood.severity(),
        objectives: vec![],
        hazards: vec!["fast-moving water".into(), "submerged road".into()],
        resources: vec![],
        stages: vec![
            Stage::Choice(ChoiceStage {
                prompt: "The road ahead dips under brown water.".into(),
                choices: vec![
                    Choice {
                        label: "Turn around and climb to higher ground".into(),
                        correct: true,
                        score_delta: 15,
                        exit: StageExit::Stage(1),
                    },
                    Choice {
                        label: "Drive through the flooded underpass".into(),
                        correct: false,
                        score_delta: -20,
                        exit: StageExit::Defeat,
                    },
                    Choice {
                        label: "Wait it out in the car".into(),
                        correct: false,
                        score_delta: 0,
                        exit: StageExit::Stage(2),
                    },
                ],
            }),
            Stage::Choice(ChoiceStage {
                prompt: "From the overpass you spot a cyclist clinging to a sign post.".into(),
                choices: vec![
                    Choice {
                        label: "Call rescue services and keep eyes on them".into(),
                        correct: true,
                        score_delta: 20,
                        exit: StageExit::Victory,
                    },
                    Choice {
                        label: "Wade in to pull them out yourself".into(),
                        correct: false,
                        score_delta: -25,
                        exit: StageExit::Defeat,
                    },
                ],
            }),
            Stage::Choice(ChoiceStage {
                prompt: "Water reaches the door sill and the car shifts.".into(),
                choices: vec![
                    Choice {
                        label: "Abandon the car for high ground now".into(),
                        correct: true,
                        score_delta: 10,
                        exit: StageExit::Stage(1),
                    },
                    Choice {
                        label: "Stay put and hope it crests".into(),
                        correct: false,
                        score_delta: -15,
                        exit: StageExit::Defeat,
                    },
                ],
            }),
        ],
    }
}

fn medical() -> Scenario {
    Scenario {
        id: "medical_park".into(),
        hazard: HazardType::Medical,
        title: "Collapse on the Trail".into(),
        description: "A stranger goes down. Keep them alive until help arrives.".into(),
        initial_situation: "A jogger crumples mid-stride on the park path.".into(),
        environment: "City park".into(),
        time_budget_s: 150,
        difficulty: HazardType::Medical.severity(),
        objectives: vec![
            obj("assess", "Check responsiveness and breathing"),
            obj("get_help", "Get emergency services moving"),
            obj("stabilize", "Keep them stable until EMS arrives"),
        ],
        hazards: vec!["cardiac arrest".into()],
        resources: vec!["phone".into(), "first_aid_kit".into()],
        stages: vec![
            Stage::Actions(ActionStage {
                prompt: "They are face-down and not moving.".into(),
                actions: vec![
                    Action {
                        id: "check_response".into(),
                        description: "Tap their shoulders, shout, watch the chest".into(),
                        kind: ActionKind::Use,
                        resource_cost: vec![],
                        time_cost: 10,
                        success_probability: 0.9,
                        consequences: vec![
                            Consequence {
                                description: "Breathing, but unresponsive.".into(),
                                weight: 0.9,
                                situation_change: Some(
                                    "They breathe shallowly and do not respond.".into(),
                                ),
                                advances_objective: Some("assess".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "You hesitate, unsure what you are seeing.".into(),
                                weight: 0.2,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "shake_awake".into(),
                        description: "Roll them over and shake hard".into(),
                        kind: ActionKind::Move,
                        resource_cost: vec![],
                        time_cost: 5,
                        success_probability: 0.3,
                        consequences: vec![
                            Consequence {
                                description: "They groan. At least you know they breathe.".into(),
                                weight: 0.8,
                                advances_objective: Some("assess".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "Rough handling. You may have made it worse.".into(),
                                weight: 0.15,
                                ..Default::default()
                            },
                        ],
                    },
                ],
            }),
            Stage::Actions(ActionStage {
                prompt: "You need help on the way, fast.".into(),
                actions: vec![
                    Action {
                        id: "call_ems".into(),
                        description: "Call emergency services with your location".into(),
                        kind: ActionKind::Communicate,
                        resource_cost: vec!["phone".into()],
                        time_cost: 15,
                        success_probability: 0.95,
                        consequences: vec![
                            Consequence {
                                description: "Dispatcher confirms: eight minutes out.".into(),
                                weight: 0.9,
                                advances_objective: Some("get_help".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "No signal under the trees. You move and redial.".into(),
                                weight: 0.2,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "flag_passerby".into(),
                        description: "Wave down another walker to call and fetch the AED".into(),
                        kind: ActionKind::Communicate,
                        resource_cost: vec![],
                        time_cost: 20,
                        success_probability: 0.6,
                        consequences: vec![
                            Consequence {
                                description: "They sprint for the kiosk AED, phone to ear.".into(),
                                weight: 0.8,
                                advances_objective: Some("get_help".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "The path stays empty.".into(),
                                weight: 0.1,
                                ..Default::default()
                            },
                        ],
                    },
                ],
            }),
            Stage::Actions(ActionStage {
                prompt: "Minutes to hold the line before EMS arrives.".into(),
                actions: vec![
                    Action {
                        id: "recovery_position".into(),
                        description: "Ease them into the recovery position and monitor".into(),
                        kind: ActionKind::Use,
                        resource_cost: vec![],
                        time_cost: 20,
                        success_probability: 0.7,
                        consequences: vec![
                            Consequence {
                                description: "Airway clear, breathing steady. You keep watch.".into(),
                                weight: 0.85,
                                advances_objective: Some("stabilize".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "They vomit; you scramble to clear the airway.".into(),
                                weight: 0.2,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "treat_with_kit".into(),
                        description: "Blanket from the kit, track their pulse".into(),
                        kind: ActionKind::Use,
                        resource_cost: vec!["first_aid_kit".into()],
                        time_cost: 25,
                        success_probability: 0.75,
                        consequences: vec![
                            Consequence {
                                description: "Warm and monitored, they hold on.".into(),
                                weight: 0.8,
                                advances_objective: Some("stabilize".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "Their breathing stutters while you dig in the kit.".into(),
                                weight: 0.25,
                                ..Default::default()
                            },
                        ],
                    },
                ],
            }),
        ],
    }
}

fn tsunami() -> Scenario {
    Scenario {
        id: "tsunami_harbor".into(),
        hazard: HazardType::Tsunami,
        title: "Harbor Drawback".into(),
        description: "The sea pulls out. Minutes of high ground between you and the wave.".into(),
        initial_situation: "The harbor drains. Boats settle into the mud.".into(),
        environment: "Fishing harbor".into(),
        time_budget_s: 90,
        difficulty: HazardType::Tsunami.severity(),
        objectives: vec![],
        hazards: vec!["incoming wave".into(), "debris surge".into()],
        resources: vec![],
        stages: vec![
            Stage::Choice(ChoiceStage {
                prompt: "People drift toward the seabed to stare.".into(),
                choices: vec![
                    Choice {
                        label: "Head inland and uphill immediately".into(),
                        correct: true,
                        score_delta: 20,
                        exit: StageExit::Stage(1),
                    },
                    Choice {
                        label: "Walk out for a closer look at the stranded boats".into(),
                        correct: false,
                        score_delta: -25,
                        exit: StageExit::Defeat,
                    },
                    Choice {
                        label: "Wait for an official siren before moving".into(),
                        correct: false,
                        score_delta: -10,
                        exit: StageExit::Stage(1),
                    },
                ],
            }),
            Stage::Choice(ChoiceStage {
                prompt: "On the hill road, an elderly couple struggles with their bags.".into(),
                choices: vec![
                    Choice {
                        label: "Take their arms, leave the bags, keep climbing".into(),
                        correct: true,
                        score_delta: 20,
                        exit: StageExit::Victory,
                    },
                    Choice {
                        label: "Stop to film the wave coming in".into(),
                        correct: false,
                        score_delta: -20,
                        exit: StageExit::Defeat,
                    },
                ],
            }),
        ],
    }
}

fn evacuation() -> Scenario {
    Scenario {
        id: "evac_school".into(),
        hazard: HazardType::Evacuation,
        title: "Mid-Lesson Evacuation".into(),
        description: "Get your class to the assembly point, all present and counted.".into(),
        initial_situation: "The evacuation tone sounds over the PA mid-lesson.".into(),
        environment: "Secondary school".into(),
        time_budget_s: 200,
        difficulty: HazardType::Evacuation.severity(),
        objectives: vec![obj("muster", "Reach the assembly point with your class")],
        hazards: vec!["crowd crush".into()],
        resources: vec!["attendance_list".into(), "whistle".into()],
        stages: vec![
            Stage::Choice(ChoiceStage {
                prompt: "Thirty students look at you.".into(),
                choices: vec![
                    Choice {
                        label: "Line them up at the door, list in hand".into(),
                        correct: true,
                        score_delta: 15,
                        exit: StageExit::Stage(1),
                    },
                    Choice {
                        label: "Let them grab bags and phones first".into(),
                        correct: false,
                        score_delta: -10,
                        exit: StageExit::Stage(1),
                    },
                ],
            }),
            Stage::Actions(ActionStage {
                prompt: "The main corridor is jammed with two other classes.".into(),
                actions: vec![
                    Action {
                        id: "lead_around_back".into(),
                        description: "Take the long way through the side doors".into(),
                        kind: ActionKind::Move,
                        resource_cost: vec![],
                        time_cost: 45,
                        success_probability: 0.8,
                        consequences: vec![
                            Consequence {
                                description: "Clear run to the field. Count comes up full.".into(),
                                weight: 0.9,
                                situation_change: Some("At the assembly point, counting heads.".into()),
                                advances_objective: Some("muster".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "A student peels off for the lockers; you double back.".into(),
                                weight: 0.2,
                                health_change: -5,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "push_through".into(),
                        description: "Merge into the corridor crowd".into(),
                        kind: ActionKind::Move,
                        resource_cost: vec![],
                        time_cost: 30,
                        success_probability: 0.45,
                        consequences: vec![
                            Consequence {
                                description: "You shepherd the line through the crush.".into(),
                                weight: 0.8,
                                advances_objective: Some("muster".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "The crowd splits your line in two.".into(),
                                weight: 0.15,
                                health_change: -15,
                                ..Default::default()
                            },
                        ],
                    },
                    Action {
                        id: "hold_and_whistle".into(),
                        description: "Hold position and whistle for a marshal".into(),
                        kind: ActionKind::Wait,
                        resource_cost: vec!["whistle".into()],
                        time_cost: 20,
                        success_probability: 0.7,
                        consequences: vec![
                            Consequence {
                                description: "A marshal waves your class into the flow.".into(),
                                weight: 0.75,
                                situation_change: Some("Moving with the marshal's group.".into()),
                                ..Default::default()
                            },
                            Consequence {
                                description: "Nobody hears you over the alarm.".into(),
                                weight: 0.25,
                                ..Default::default()
                            },
                        ],
                    },
                ],
            }),
        ],
    }
}
