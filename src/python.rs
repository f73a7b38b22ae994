//! Python bindings
//!
//! Content and rules are parsed once by `init_content` and cached in Rust
//! memory; each `GameSession` shares them through an `Arc`. Structured values
//! cross the boundary as JSON strings.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::config::{
    builtin_content, deserialize_content, AssetKind, ContentRepository, GameRules, RentType,
};
use crate::simulator::{Allocation, GameSession};

// ============================================================================
// Cached Content
// ============================================================================

struct CachedContent {
    content: Arc<ContentRepository>,
    rules: GameRules,
}

static CACHED_CONTENT: OnceCell<Arc<RwLock<CachedContent>>> = OnceCell::new();

// ============================================================================
// Helper Functions
// ============================================================================

fn to_json<T: Serialize + ?Sized>(value: &T) -> PyResult<String> {
    serde_json::to_string(value).map_err(|e| PyValueError::new_err(e.to_string()))
}

fn cached_content() -> PyResult<(Arc<ContentRepository>, GameRules)> {
    let cached = CACHED_CONTENT
        .get()
        .ok_or_else(|| PyRuntimeError::new_err("Content not initialized. Call init_content() first."))?
        .read();
    Ok((Arc::clone(&cached.content), cached.rules.clone()))
}

fn parse_rent(name: &str) -> PyResult<RentType> {
    Ok(name.parse::<RentType>()?)
}

// ============================================================================
// Python Functions
// ============================================================================

/// Load story content and rules (call once at startup)
///
/// # Arguments
/// * `story_json` - Story document; the built-in story when omitted
/// * `rules_json` - Partial or full rule set; defaults fill the rest
#[pyfunction]
#[pyo3(signature = (story_json=None, rules_json=None))]
fn init_content(story_json: Option<&str>, rules_json: Option<&str>) -> PyResult<()> {
    let content = match story_json {
        Some(json) => Arc::new(deserialize_content(json)?),
        None => builtin_content(),
    };
    let rules = match rules_json {
        Some(json) => GameRules::from_json(json)?,
        None => GameRules::default(),
    };

    let cached = CachedContent { content, rules };
    if let Some(existing) = CACHED_CONTENT.get() {
        *existing.write() = cached;
    } else {
        let _ = CACHED_CONTENT.set(Arc::new(RwLock::new(cached)));
    }
    Ok(())
}

#[pyfunction]
fn is_content_initialized() -> bool {
    CACHED_CONTENT.get().is_some()
}

// ============================================================================
// Session Class
// ============================================================================

/// One playthrough over the cached content
#[pyclass(name = "GameSession")]
pub struct PySession {
    inner: Arc<Mutex<GameSession>>,
}

#[pymethods]
impl PySession {
    #[new]
    #[pyo3(signature = (seed=None))]
    fn new(seed: Option<u64>) -> PyResult<Self> {
        let (content, rules) = cached_content()?;
        let session = match seed {
            Some(seed) => GameSession::with_seed(content, rules, seed),
            None => GameSession::new(content, rules),
        };
        Ok(Self {
            inner: Arc::new(Mutex::new(session)),
        })
    }

    #[getter]
    fn stage(&self) -> usize {
        self.inner.blocking_lock().state().stage
    }

    #[getter]
    fn is_game_over(&self) -> bool {
        self.inner.blocking_lock().state().is_game_over()
    }

    #[getter]
    fn ending_type(&self) -> Option<String> {
        self.inner
            .blocking_lock()
            .state()
            .ending_type()
            .map(|t| t.as_str().to_string())
    }

    #[getter]
    fn ending_reason(&self) -> Option<String> {
        self.inner
            .blocking_lock()
            .state()
            .ending_reason()
            .map(str::to_string)
    }

    /// Full game state as JSON
    fn state_json(&self) -> PyResult<String> {
        to_json(self.inner.blocking_lock().state())
    }

    /// Current stage title and summary as JSON, or None
    fn stage_theme(&self) -> PyResult<Option<String>> {
        self.inner
            .blocking_lock()
            .stage_theme()
            .map(|theme| to_json(&theme))
            .transpose()
    }

    fn begin_allocation(&self) {
        self.inner.blocking_lock().begin_allocation();
    }

    /// Apply the initial allocation, given as JSON
    fn allocate(&self, allocation_json: &str) -> PyResult<()> {
        let allocation: Allocation = serde_json::from_str(allocation_json)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        self.inner.blocking_lock().allocate(&allocation)?;
        Ok(())
    }

    /// Draw the current stage's events; returns them as JSON
    fn generate_stage_events(&self) -> PyResult<String> {
        let mut session = self.inner.blocking_lock();
        to_json(session.generate_stage_events_blocking())
    }

    /// Draw the current stage's events in a background thread
    ///
    /// Returns a Python awaitable resolving to the events as JSON.
    fn generate_stage_events_async<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyAny>> {
        let inner = Arc::clone(&self.inner);
        pyo3_async_runtimes::tokio::future_into_py(py, async move {
            let mut session = inner.lock().await;
            let events = session.generate_stage_events().await?;
            to_json(events)
        })
    }

    /// Choose an option of the current event; returns the new state as JSON
    fn choose(&self, index: usize) -> PyResult<String> {
        let mut session = self.inner.blocking_lock();
        let state = session.choose(index)?;
        to_json(state)
    }

    /// Roll this cycle's investment returns as JSON
    fn roll_investment(&self) -> PyResult<String> {
        to_json(&self.inner.blocking_lock().roll_investment())
    }

    /// Preview the settlement bill as JSON
    fn statement(&self, investment_income: i64) -> PyResult<String> {
        to_json(&self.inner.blocking_lock().statement(investment_income))
    }

    /// Settle the closing cycle; returns the outcome as JSON, or None
    #[pyo3(signature = (investment_income, next_housing=None))]
    fn settle(&self, investment_income: i64, next_housing: Option<&str>) -> PyResult<Option<String>> {
        let housing = next_housing.map(parse_rent).transpose()?;
        self.inner
            .blocking_lock()
            .settle(investment_income, housing)
            .map(|outcome| to_json(&outcome))
            .transpose()
    }

    fn adjust_asset(&self, kind: &str, amount: i64) -> PyResult<()> {
        let kind: AssetKind = kind.parse()?;
        self.inner.blocking_lock().adjust_asset(kind, amount);
        Ok(())
    }

    fn sell_car(&self) {
        self.inner.blocking_lock().sell_car();
    }

    fn reset(&self) {
        self.inner.blocking_lock().reset();
    }
}

// ============================================================================
// Python Module Definition
// ============================================================================

#[pymodule]
fn urban_survival_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(init_content, m)?)?;
    m.add_function(wrap_pyfunction!(is_content_initialized, m)?)?;
    m.add_class::<PySession>()?;
    Ok(())
}
