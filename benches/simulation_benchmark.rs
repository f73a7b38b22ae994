//! Benchmark for playthrough performance
//!
//! Target: a full six-stage playthrough should complete in well under 1ms

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use urban_survival_core::config::{builtin_content, GameRules, GenerationConfig, PlayerConfig};
use urban_survival_core::event::{select_stage_events, SelectionContext};
use urban_survival_core::outcome::parse_outcome_hint;
use urban_survival_core::simulator::{Allocation, GameSession};

/// Play one session to its ending, always taking the first option
fn play_through(session: &mut GameSession) -> usize {
    session
        .allocate(&Allocation {
            deposit: 60_000,
            funds: 20_000,
            stocks: 20_000,
            ..Default::default()
        })
        .unwrap();

    let mut choices = 0;
    while !session.state().is_game_over() {
        session.generate_stage_events_blocking();
        while session.choose(0).is_ok() {
            choices += 1;
        }
        if session.state().is_game_over() {
            break;
        }
        let investment = session.roll_investment().total;
        session.settle(investment, None);
    }
    choices
}

fn benchmark_playthrough(c: &mut Criterion) {
    let content = builtin_content();
    let rules = GameRules::default();

    c.bench_function("full_playthrough", |b| {
        let mut seed = 0u64;
        b.iter(|| {
            seed += 1;
            let mut session = GameSession::with_seed(content.clone(), rules.clone(), seed);
            black_box(play_through(&mut session))
        })
    });
}

fn benchmark_stage_selection(c: &mut Criterion) {
    let content = builtin_content();
    let rules = GameRules::default();
    let config = PlayerConfig::default();
    let mut rng = StdRng::seed_from_u64(7);

    c.bench_function("select_stage_events", |b| {
        b.iter(|| {
            let ctx = SelectionContext {
                stage: black_box(2),
                config: &config,
                net_worth: 150_000,
            };
            black_box(select_stage_events(&content, ctx, &rules, &mut rng))
        })
    });
}

fn benchmark_hint_parsing(c: &mut Criterion) {
    let hints = [
        "[Cash +2000, HP -15] Splitting headache.",
        "[PSY -20, KAR +10] You walk away.",
        "[Cash -30000, Health +5, Mental +5, Moral -5] Expensive rest.",
        "No brackets at all",
    ];
    let jittered = GenerationConfig::default();
    let fixed = GenerationConfig::fixed();
    let mut rng = StdRng::seed_from_u64(3);

    c.bench_function("parse_outcome_hint_fixed", |b| {
        b.iter(|| {
            for hint in &hints {
                black_box(parse_outcome_hint(black_box(hint), &fixed, &mut rng));
            }
        })
    });

    c.bench_function("parse_outcome_hint_jittered", |b| {
        b.iter(|| {
            for hint in &hints {
                black_box(parse_outcome_hint(black_box(hint), &jittered, &mut rng));
            }
        })
    });
}

criterion_group!(
    benches,
    benchmark_playthrough,
    benchmark_stage_selection,
    benchmark_hint_parsing
);
criterion_main!(benches);
