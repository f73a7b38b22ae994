//! GameSession - stateful wrapper around the pure transitions
//!
//! Owns the current [`GameState`], the shared content repository, the rule
//! set and a seedable random source. Event generation runs on tokio's
//! blocking pool so an async host is never stalled by selection work.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{
    builtin_content, AssetKind, ContentRepository, GameRules, RentType, StageTheme,
};
use crate::error::{Result, UrbanSurvivalError};
use crate::event::GameEvent;

use super::allocation::Allocation;
use super::investment::InvestmentReport;
use super::settlement::{CycleOutcome, CycleStatement, Settlement};
use super::state::GameState;

pub struct GameSession {
    content: Arc<ContentRepository>,
    rules: GameRules,
    state: GameState,
    rng: StdRng,
}

impl GameSession {
    /// Session seeded from OS entropy
    pub fn new(content: Arc<ContentRepository>, rules: GameRules) -> Self {
        Self::with_rng(content, rules, StdRng::from_entropy())
    }

    /// Reproducible session
    pub fn with_seed(content: Arc<ContentRepository>, rules: GameRules, seed: u64) -> Self {
        Self::with_rng(content, rules, StdRng::seed_from_u64(seed))
    }

    /// Session over the built-in story with default rules
    pub fn builtin() -> Self {
        Self::new(builtin_content(), GameRules::default())
    }

    fn with_rng(content: Arc<ContentRepository>, rules: GameRules, rng: StdRng) -> Self {
        let state = GameState::new(&rules);
        Self {
            content,
            rules,
            state,
            rng,
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn rules(&self) -> &GameRules {
        &self.rules
    }

    #[inline]
    pub fn content(&self) -> &Arc<ContentRepository> {
        &self.content
    }

    /// Title and summary of the current stage
    pub fn stage_theme(&self) -> Option<StageTheme> {
        self.content.stage_theme(self.state.stage)
    }

    pub fn begin_allocation(&mut self) {
        self.state = self.state.begin_allocation();
    }

    pub fn allocate(&mut self, allocation: &Allocation) -> Result<()> {
        self.state = self.state.allocate(allocation, &self.rules)?;
        Ok(())
    }

    /// Draw and install the current stage's events on the calling thread
    pub fn generate_stage_events_blocking(&mut self) -> &[GameEvent] {
        if self.state.needs_events() {
            let events = self
                .state
                .generate_events(&self.content, &self.rules, &mut self.rng);
            self.state = self.state.install_events(events);
        }
        &self.state.current_events
    }

    /// Draw and install the current stage's events on the blocking pool
    ///
    /// The selection runs with a child RNG split from the session RNG, so a
    /// seeded session stays reproducible. Does nothing if the stage already
    /// has events.
    pub async fn generate_stage_events(&mut self) -> Result<&[GameEvent]> {
        if !self.state.needs_events() {
            return Ok(&self.state.current_events);
        }

        let mut child = StdRng::from_rng(&mut self.rng)
            .map_err(|e| UrbanSurvivalError::SimulationError(e.to_string()))?;
        let snapshot = self.state.clone();
        let content = Arc::clone(&self.content);
        let rules = self.rules.clone();

        let events = tokio::task::spawn_blocking(move || {
            snapshot.generate_events(&content, &rules, &mut child)
        })
        .await
        .map_err(|e| {
            UrbanSurvivalError::SimulationError(format!("event generation task failed: {}", e))
        })?;

        self.state = self.state.install_events(events);
        Ok(&self.state.current_events)
    }

    /// Choose option `index` of the current event
    pub fn choose(&mut self, index: usize) -> Result<&GameState> {
        let event = self
            .state
            .current_event()
            .ok_or(UrbanSurvivalError::NoActiveEvent)?;
        let option = event
            .options
            .get(index)
            .ok_or(UrbanSurvivalError::OptionOutOfRange {
                index,
                len: event.options.len(),
            })?
            .clone();
        self.state = self.state.select_option(&option, &self.rules);
        Ok(&self.state)
    }

    /// Roll this cycle's investment returns
    pub fn roll_investment(&mut self) -> InvestmentReport {
        InvestmentReport::roll(&self.state.config, &self.rules.investment, &mut self.rng)
    }

    /// Bill the next settlement would charge
    pub fn statement(&self, investment_income: i64) -> CycleStatement {
        self.state.statement(investment_income, &self.rules)
    }

    /// Settle the closing cycle
    ///
    /// Returns `None` and leaves the state unchanged when no cycle is closing.
    pub fn settle(
        &mut self,
        investment_income: i64,
        next_housing: Option<RentType>,
    ) -> Option<CycleOutcome> {
        let Settlement { state, outcome, .. } =
            self.state.settle(investment_income, next_housing, &self.rules)?;
        self.state = state;
        Some(outcome)
    }

    pub fn adjust_asset(&mut self, kind: AssetKind, amount: i64) -> &GameState {
        self.state = self.state.adjust_asset(kind, amount);
        &self.state
    }

    pub fn sell_car(&mut self) -> &GameState {
        self.state = self.state.sell_car(&self.rules);
        &self.state
    }

    pub fn reset(&mut self) {
        self.state = self.state.reset(&self.rules);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CarType, EventArchetype, StagePools};
    use crate::simulator::{Screen, SessionStatus};

    fn tiny_content(stages: usize) -> Arc<ContentRepository> {
        let archetype: EventArchetype = serde_json::from_value(serde_json::json!({
            "id": "quiet",
            "title": "Quiet week",
            "options": [
                { "label": "Rest", "outcome_hint": "[PSY +1] Calm." },
                { "label": "Hustle", "outcome_hint": "[Cash +1000, HP -1] Tired." }
            ]
        }))
        .unwrap();
        let pools = (0..stages)
            .map(|stage| StagePools {
                stage,
                core: vec![archetype.clone()],
                ..Default::default()
            })
            .collect();
        Arc::new(ContentRepository::from_stages(pools).unwrap())
    }

    fn fixed_rules() -> GameRules {
        let mut rules = GameRules::default();
        rules.generation.randomize_effects = false;
        rules
    }

    #[tokio::test]
    async fn test_async_generation_installs_events() {
        let mut session = GameSession::with_seed(builtin_content(), GameRules::default(), 11);
        session.allocate(&Allocation::default()).unwrap();
        let count = session.generate_stage_events().await.unwrap().len();
        assert_eq!(count, 5);
        assert!(session.state().current_event().is_some());

        let again = session.generate_stage_events().await.unwrap().len();
        assert_eq!(again, 5);
    }

    #[tokio::test]
    async fn test_seeded_sessions_match() {
        let mut a = GameSession::with_seed(builtin_content(), GameRules::default(), 99);
        let mut b = GameSession::with_seed(builtin_content(), GameRules::default(), 99);
        a.allocate(&Allocation::default()).unwrap();
        b.allocate(&Allocation::default()).unwrap();
        let ea = a.generate_stage_events().await.unwrap().to_vec();
        let eb = b.generate_stage_events().await.unwrap().to_vec();
        assert_eq!(ea, eb);
    }

    #[test]
    fn test_choose_errors() {
        let mut session = GameSession::with_seed(tiny_content(6), fixed_rules(), 1);
        assert!(matches!(session.choose(0), Err(UrbanSurvivalError::NoActiveEvent)));

        session.allocate(&Allocation::default()).unwrap();
        session.generate_stage_events_blocking();
        assert!(matches!(
            session.choose(5),
            Err(UrbanSurvivalError::OptionOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_full_cycle() {
        let mut session = GameSession::with_seed(tiny_content(6), fixed_rules(), 3);
        session.begin_allocation();
        session.allocate(&Allocation::default()).unwrap();
        session.generate_stage_events_blocking();

        let state = session.choose(1).unwrap();
        assert_eq!(state.status, SessionStatus::CycleClosing);
        assert_eq!(state.stats.cash, 201_000);

        assert!(session.choose(0).is_err());
        let outcome = session.settle(0, Some(RentType::Expensive)).unwrap();
        assert_eq!(outcome, CycleOutcome::Advanced { stage: 1 });
        assert_eq!(session.state().screen, Screen::Game);
        assert_eq!(session.state().config.rent_type, RentType::Expensive);
        assert!(session.settle(0, None).is_none());
    }

    #[test]
    fn test_reset_and_sell() {
        let mut session = GameSession::with_seed(tiny_content(6), fixed_rules(), 4);
        let allocation = Allocation {
            car_type: CarType::Electric,
            ..Default::default()
        };
        session.allocate(&allocation).unwrap();
        assert_eq!(session.state().stats.cash, 60_000);
        assert_eq!(session.sell_car().stats.cash, 116_000);
        assert_eq!(session.adjust_asset(AssetKind::Deposit, 16_000).config.deposit, 16_000);

        session.reset();
        assert_eq!(session.state(), &GameState::new(session.rules()));
    }

    #[test]
    fn test_stage_theme() {
        let session = GameSession::with_seed(builtin_content(), GameRules::default(), 0);
        assert!(session.stage_theme().is_some());
    }
}
