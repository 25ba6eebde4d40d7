//! Session state and the event dispatch table.
//!
//! [`Session`] owns the task store and the current strategy selection.
//! [`Session::handle`] is synchronous and performs no I/O: network work
//! comes back as [`Effect::Request`], which the caller runs through
//! [`execute`] and feeds back in as a `*Resolved` event.
//!
//! Requests are neither de-duplicated nor cancelled. If two analyses
//! overlap, whichever resolves last is what stays rendered.

use crate::analysis::{AnalyzedTask, ScoringClient, DEFAULT_SUGGEST_LIMIT};
use crate::error::CoreError;
use crate::events::{Effect, Event, Request, Status, StatusKind};
use crate::strategy::Strategy;
use crate::task::{TaskForm, TaskStore};

#[derive(Debug, Clone)]
pub struct Session {
    store: TaskStore,
    strategy: Strategy,
    suggest_limit: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Strategy::default(), DEFAULT_SUGGEST_LIMIT)
    }
}

impl Session {
    pub fn new(strategy: Strategy, suggest_limit: u32) -> Self {
        Self {
            store: TaskStore::new(),
            strategy,
            suggest_limit,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn suggest_limit(&self) -> u32 {
        self.suggest_limit
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    /// Initial display state.
    pub fn start(&self) -> Vec<Effect> {
        vec![
            Effect::SetStrategyDescription(self.strategy.description()),
            Effect::SetEmptyState {
                visible: self.store.is_empty(),
            },
        ]
    }

    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        tracing::debug!(event = event.name(), "handling event");
        match event {
            Event::FormSubmitted(form) => self.on_form_submitted(&form),
            Event::ClearClicked => self.on_clear(),
            Event::LoadJsonClicked(text) => self.on_load_json(&text),
            Event::StrategyChanged(key) => self.on_strategy_changed(&key),
            Event::AnalyzeClicked => self.on_analyze(),
            Event::SuggestClicked => self.on_suggest(),
            Event::AnalysisResolved { strategy, outcome } => on_analysis_resolved(strategy, outcome),
            Event::SuggestionsResolved { outcome } => on_suggestions_resolved(outcome),
        }
    }

    fn on_form_submitted(&mut self, form: &TaskForm) -> Vec<Effect> {
        match self.store.add_from_form(form) {
            Ok(task) => {
                let title = task.title().unwrap_or_default().to_string();
                vec![
                    Effect::ResetForm,
                    Effect::SetEmptyState { visible: false },
                    success(format!(
                        "Task \"{title}\" added. Total tasks in memory: {}.",
                        self.store.len()
                    )),
                ]
            }
            Err(err) => vec![error(err.to_string())],
        }
    }

    fn on_clear(&mut self) -> Vec<Effect> {
        self.store.clear();
        vec![
            Effect::ClearResults,
            Effect::ClearSuggestions,
            Effect::SetEmptyState { visible: true },
            success("Cleared all tasks from memory."),
        ]
    }

    fn on_load_json(&mut self, text: &str) -> Vec<Effect> {
        let mut effects = vec![Effect::HideJsonError];
        match self.store.load_from_json(text) {
            Ok(count) => effects.extend([
                Effect::ClearResults,
                Effect::ClearSuggestions,
                Effect::SetEmptyState { visible: count == 0 },
                success(format!(
                    "Loaded {count} task(s) from JSON. Click Analyze to score them."
                )),
            ]),
            Err(err) => {
                tracing::debug!(%err, "json import rejected");
                effects.push(Effect::ShowJsonError(err.to_string()));
            }
        }
        effects
    }

    fn on_strategy_changed(&mut self, key: &str) -> Vec<Effect> {
        self.strategy = Strategy::from_key_or_default(key);
        vec![Effect::SetStrategyDescription(self.strategy.description())]
    }

    fn on_analyze(&self) -> Vec<Effect> {
        if self.store.is_empty() {
            return vec![error(CoreError::EmptyInput.to_string())];
        }
        vec![
            Effect::SetStatus(Status::new(StatusKind::Loading, "Analyzing tasks…")),
            Effect::Request(Request::Analyze {
                strategy: self.strategy,
                tasks: self.store.snapshot().to_vec(),
            }),
        ]
    }

    fn on_suggest(&self) -> Vec<Effect> {
        vec![
            Effect::SetStatus(Status::new(StatusKind::Loading, "Fetching suggestions…")),
            Effect::ClearSuggestions,
            Effect::Request(Request::Suggest {
                strategy: self.strategy,
                limit: self.suggest_limit,
            }),
        ]
    }
}

fn on_analysis_resolved(
    strategy: Strategy,
    outcome: Result<Vec<AnalyzedTask>, CoreError>,
) -> Vec<Effect> {
    match outcome {
        Ok(analyzed) => {
            let count = analyzed.len();
            let mut effects = if analyzed.is_empty() {
                vec![Effect::ClearResults, Effect::SetEmptyState { visible: true }]
            } else {
                vec![
                    Effect::SetEmptyState { visible: false },
                    Effect::RenderResults(analyzed),
                ]
            };
            effects.push(success(format!(
                "Analyzed {count} task(s) using \"{}\" strategy.",
                strategy.display_name()
            )));
            effects
        }
        Err(err) => vec![error(format!("Failed to analyze tasks: {err}"))],
    }
}

fn on_suggestions_resolved(outcome: Result<Vec<AnalyzedTask>, CoreError>) -> Vec<Effect> {
    match outcome {
        Ok(suggested) if suggested.is_empty() => vec![
            Effect::ShowNoSuggestions,
            Effect::SetStatus(Status::new(
                StatusKind::Info,
                "No suggestions returned from backend.",
            )),
        ],
        Ok(suggested) => vec![
            Effect::RenderSuggestions(suggested),
            success("Suggested tasks updated."),
        ],
        Err(err) => vec![error(format!("Failed to fetch suggestions: {err}"))],
    }
}

fn success(message: impl Into<String>) -> Effect {
    Effect::SetStatus(Status::new(StatusKind::Success, message))
}

fn error(message: impl Into<String>) -> Effect {
    Effect::SetStatus(Status::new(StatusKind::Error, message))
}

/// Run one request against the scoring service and wrap the outcome as
/// the event that resolves it.
pub async fn execute(client: &ScoringClient, request: Request) -> Event {
    match request {
        Request::Analyze { strategy, tasks } => Event::AnalysisResolved {
            strategy,
            outcome: client.analyze(strategy, &tasks).await,
        },
        Request::Suggest { strategy, limit } => Event::SuggestionsResolved {
            outcome: client.suggest(strategy, limit).await,
        },
    }
}

/// What is currently on display, built by applying effects in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct View {
    pub status: Option<Status>,
    pub json_error: Option<String>,
    pub empty_state_visible: bool,
    pub strategy_description: &'static str,
    pub results: Vec<AnalyzedTask>,
    pub suggestions: SuggestionsView,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SuggestionsView {
    #[default]
    Empty,
    Placeholder,
    Tasks(Vec<AnalyzedTask>),
}

impl View {
    pub fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::SetStatus(status) => self.status = Some(status.clone()),
            Effect::ShowJsonError(message) => self.json_error = Some(message.clone()),
            Effect::HideJsonError => self.json_error = None,
            Effect::SetEmptyState { visible } => self.empty_state_visible = *visible,
            Effect::SetStrategyDescription(text) => self.strategy_description = *text,
            Effect::RenderResults(tasks) => self.results = tasks.clone(),
            Effect::ClearResults => self.results.clear(),
            Effect::RenderSuggestions(tasks) => {
                self.suggestions = SuggestionsView::Tasks(tasks.clone())
            }
            Effect::ShowNoSuggestions => self.suggestions = SuggestionsView::Placeholder,
            Effect::ClearSuggestions => self.suggestions = SuggestionsView::Empty,
            Effect::ResetForm | Effect::Request(_) => {}
        }
    }

    pub fn apply_all<'a>(&mut self, effects: impl IntoIterator<Item = &'a Effect>) {
        for effect in effects {
            self.apply(effect);
        }
    }
}
