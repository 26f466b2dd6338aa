use criterion::{black_box, criterion_group, criterion_main, Criterion};

use drillsim_core::catalog::ScenarioCatalog;
use drillsim_core::session::{Session, SessionConfig};
use drillsim_core::store::ResultStore;
use drillsim_logic::hazard::HazardType;
use drillsim_logic::resolver;
use drillsim_logic::scenario::Stage;
use drillsim_logic::state::{GameResult, GameState};

fn bench_resolve(c: &mut Criterion) {
    let catalog = ScenarioCatalog::builtin();
    let scenario = catalog.for_hazard(HazardType::Earthquake).unwrap().clone();
    let action = match &scenario.stages[0] {
        Stage::Actions(stage) => stage.actions[0].clone(),
        Stage::Choice(_) => panic!("earthquake drill opens with an action stage"),
    };
    let state = GameState::at_start(&scenario);

    c.bench_function("resolve_action", |b| {
        b.iter(|| resolver::resolve_with_roll(&scenario, &action, &state, black_box(0.42)))
    });
}

fn bench_deterministic_session(c: &mut Criterion) {
    let catalog = ScenarioCatalog::builtin();
    let scenario = catalog.for_hazard(HazardType::Flood).unwrap().clone();

    c.bench_function("deterministic_playthrough", |b| {
        b.iter(|| {
            let mut session =
                Session::new(scenario.clone(), SessionConfig { seed: Some(1) }).unwrap();
            session.start();
            session.choose(0).unwrap();
            session.choose(0).unwrap();
            session.take_result().unwrap()
        })
    });
}

fn bench_store_aggregation(c: &mut Criterion) {
    let mut store = ResultStore::new();
    for i in 0..10_000u32 {
        store.append(GameResult {
            scenario_id: "bench".into(),
            hazard: HazardType::Fire,
            scenario_title: "Bench Drill".into(),
            score: (i % 211) as i32 - 50,
            victory: i % 3 == 0,
            time_spent_s: i % 300,
            actions_taken: i % 7,
            health_remaining: (i % 101) as i32,
            objectives_completed: i % 3,
            objectives_total: 3,
            difficulty: (i % 5 + 1) as u8,
            completed_at: u64::from(i),
        });
    }

    c.bench_function("stats_over_10k_results", |b| {
        b.iter(|| black_box(store.stats()))
    });
    c.bench_function("high_scores_over_10k_results", |b| {
        b.iter(|| black_box(store.high_scores(10)))
    });
}

criterion_group!(
    benches,
    bench_resolve,
    bench_deterministic_session,
    bench_store_aggregation
);
criterion_main!(benches);
