//! Property tests for simulator module
//!
//! Terminal absorption, settlement cash conservation and end-to-end
//! settlement scenarios.

use proptest::prelude::*;

use crate::config::{CarType, Costs, GameRules, GenerationConfig, RentType};
use crate::event::{GameEvent, GameOption};
use crate::outcome::{parse_outcome_hint, OptionEffect};
use crate::simulator::{CycleOutcome, GameState, Screen, SessionStatus};
use crate::stats::{Ending, EndingCause, EndingType, PlayerStats};

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

fn rent_strategy() -> impl Strategy<Value = RentType> {
    prop_oneof![
        Just(RentType::Homeless),
        Just(RentType::Cheap),
        Just(RentType::Expensive),
    ]
}

fn car_strategy() -> impl Strategy<Value = CarType> {
    prop_oneof![Just(CarType::None), Just(CarType::Gas), Just(CarType::Electric)]
}

fn option_strategy() -> impl Strategy<Value = GameOption> {
    (-100_000..=100_000i64, -50..=50i32, -50..=50i32, -50..=50i32).prop_map(
        |(cash, health, mental, moral)| GameOption {
            label: "choice".to_string(),
            effect: OptionEffect {
                cash,
                health,
                mental,
                moral,
                description: String::new(),
            },
        },
    )
}

fn ending_strategy() -> impl Strategy<Value = Ending> {
    prop_oneof![
        Just(Ending::collapse(EndingCause::CreditCollapse, "loan")),
        Just(Ending::collapse(EndingCause::PhysicalFailure, "shift")),
        Just(Ending::verdict(EndingCause::Survived)),
        Just(Ending::verdict(EndingCause::Ascended)),
    ]
}

/// Cycle-closing state whose stats avoid the pay-cut tier
fn closing_state_strategy() -> impl Strategy<Value = GameState> {
    (
        0..=5usize,
        rent_strategy(),
        car_strategy(),
        -40_000..=2_000_000i64,
        41..=100i32,
        41..=100i32,
        0..=100i32,
        5_000..=20_000i64,
    )
        .prop_map(
            |(stage, rent_type, car_type, cash, health, mental, moral, base_salary)| {
                let mut state = GameState::new(&GameRules::default());
                state.stage = stage;
                state.config.rent_type = rent_type;
                state.config.car_type = car_type;
                state.stats = PlayerStats::new(cash, health, mental, moral);
                state.base_salary = base_salary;
                state.screen = Screen::Summary;
                state.status = SessionStatus::CycleClosing;
                state
            },
        )
}

fn playing_state(rules: &GameRules, events: Vec<GameEvent>) -> GameState {
    let mut state = GameState::new(rules);
    state.screen = Screen::Game;
    state.install_events(events)
}

fn closing_at_final_stage(cash: i64, health: i32, mental: i32) -> GameState {
    let rules = GameRules::default();
    let mut state = GameState::new(&rules);
    state.stage = rules.final_stage();
    state.stats = PlayerStats::new(cash, health, mental, 50);
    state.screen = Screen::Summary;
    state.status = SessionStatus::CycleClosing;
    state
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// A terminal state absorbs option selection and settlement
    #[test]
    fn prop_terminal_idempotent(
        ending in ending_strategy(),
        option in option_strategy(),
        income in -10_000..=10_000i64
    ) {
        let rules = GameRules::default();
        let mut state = GameState::new(&rules);
        state.screen = Screen::Ending;
        state.status = SessionStatus::Terminal(ending.clone());

        let after_select = state.select_option(&option, &rules);
        prop_assert_eq!(&after_select, &state);
        prop_assert!(state.settle(income, Some(RentType::Cheap), &rules).is_none());

        let after_adjust = state.adjust_asset(crate::config::AssetKind::Funds, 1);
        prop_assert_eq!(&after_adjust.stats, &state.stats);
        prop_assert_eq!(after_adjust.ending(), Some(&ending));
    }

    /// Settlement moves cash by income minus bills plus investment, exactly
    #[test]
    fn prop_settlement_conservation(
        state in closing_state_strategy(),
        investment in -10_000..=10_000i64,
        next_housing in prop::option::of(rent_strategy())
    ) {
        let rules = GameRules::default();
        let costs = Costs::default();
        let months = rules.months_per_cycle;

        let income = state.base_salary * months;
        let rent = costs.monthly_rent(state.config.rent_type) * months;
        let living = costs.living_expense * months;
        let vehicle = costs.monthly_vehicle(state.config.car_type) * months;
        let interest = state.stats.debt() / 10;

        let settlement = state.settle(investment, next_housing, &rules).unwrap();
        prop_assert_eq!(
            settlement.state.stats.cash,
            state.stats.cash + income - (rent + living + vehicle + interest) + investment
        );
        prop_assert_eq!(settlement.statement.medical_bill, 0);
    }

    /// Settlement either advances exactly one stage or ends the session
    #[test]
    fn prop_settlement_progress(
        state in closing_state_strategy(),
        next_housing in prop::option::of(rent_strategy())
    ) {
        let rules = GameRules::default();
        let settlement = state.settle(0, next_housing, &rules).unwrap();
        match settlement.outcome {
            CycleOutcome::Advanced { stage } => {
                prop_assert_eq!(stage, state.stage + 1);
                prop_assert_eq!(settlement.state.stage, stage);
                prop_assert_eq!(settlement.state.status, SessionStatus::InProgress);
                prop_assert!(settlement.state.current_events.is_empty());
                let expected_rent = next_housing.unwrap_or(state.config.rent_type);
                prop_assert_eq!(settlement.state.config.rent_type, expected_rent);
            }
            CycleOutcome::Ended(ref ending) => {
                prop_assert_eq!(settlement.state.ending(), Some(ending));
                prop_assert_eq!(settlement.state.screen, Screen::Ending);
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Scenarios
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn scenario_fixed_hint_selection() {
    let rules = GameRules::default();
    let mut rng = rand::thread_rng();
    let effect = parse_outcome_hint("[Cash +2000, HP -15]", &GenerationConfig::fixed(), &mut rng);
    let option = GameOption {
        label: "Plug in".to_string(),
        effect,
    };
    let mut events = vec![crate::event::fallback_event(); 2];
    events[0].options[0] = option.clone();

    let state = playing_state(&rules, events);
    assert_eq!(state.stats, PlayerStats::new(200_000, 80, 80, 80));
    let next = state.select_option(&option, &rules);
    assert_eq!(next.stats, PlayerStats::new(202_000, 65, 80, 80));
    assert_eq!(next.status, SessionStatus::InProgress);
}

#[test]
fn scenario_success_ending() {
    let rules = GameRules::default();
    let state = closing_at_final_stage(1_188_000, 100, 100);
    let settlement = state.settle(0, None, &rules).unwrap();
    assert_eq!(settlement.state.net_worth(&rules.costs), 1_200_000);
    assert_eq!(settlement.state.ending_type(), Some(EndingType::Success));
}

#[test]
fn scenario_survival_ending() {
    let rules = GameRules::default();
    let state = closing_at_final_stage(53_000, 25, 25);
    let settlement = state.settle(0, None, &rules).unwrap();
    assert_eq!(settlement.statement.medical_bill, 5_000);
    assert_eq!(settlement.state.net_worth(&rules.costs), 60_000);
    assert_eq!(settlement.state.ending_type(), Some(EndingType::Survival));
}

#[test]
fn scenario_worn_out_ending() {
    let rules = GameRules::default();
    let state = closing_at_final_stage(53_000, 15, 25);
    let settlement = state.settle(0, None, &rules).unwrap();
    assert_eq!(settlement.state.net_worth(&rules.costs), 60_000);
    assert_eq!(settlement.state.ending_type(), Some(EndingType::Slaughtered));
    assert_eq!(
        settlement.state.ending().map(|e| e.cause),
        Some(EndingCause::Depleted)
    );
}

#[test]
fn scenario_settlement_collapse_uses_settlement_trigger() {
    let rules = GameRules::default();
    let mut state = closing_at_final_stage(-120_000, 60, 60);
    state.stage = 1;
    let settlement = state.settle(0, None, &rules).unwrap();
    let ending = settlement.state.ending().unwrap();
    assert_eq!(ending.cause, EndingCause::CreditCollapse);
    assert!(ending.reason.contains(crate::stats::SETTLEMENT_TRIGGER));
}
