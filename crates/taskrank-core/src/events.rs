use serde::Serialize;

use crate::analysis::AnalyzedTask;
use crate::error::CoreError;
use crate::strategy::Strategy;
use crate::task::{Task, TaskForm};

/// Every user action, and every network outcome, enters the session as an
/// Event. Handlers answer with a list of [`Effect`]s.
#[derive(Debug)]
pub enum Event {
    /// Add-task form submitted.
    FormSubmitted(TaskForm),
    /// "Clear" pressed.
    ClearClicked,
    /// "Load JSON" pressed with the pasted text.
    LoadJsonClicked(String),
    /// Strategy selector changed to a raw key.
    StrategyChanged(String),
    AnalyzeClicked,
    SuggestClicked,
    /// An analyze request came back.
    AnalysisResolved {
        strategy: Strategy,
        outcome: Result<Vec<AnalyzedTask>, CoreError>,
    },
    /// A suggest request came back.
    SuggestionsResolved {
        outcome: Result<Vec<AnalyzedTask>, CoreError>,
    },
}

impl Event {
    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Event::FormSubmitted(_) => "form_submitted",
            Event::ClearClicked => "clear_clicked",
            Event::LoadJsonClicked(_) => "load_json_clicked",
            Event::StrategyChanged(_) => "strategy_changed",
            Event::AnalyzeClicked => "analyze_clicked",
            Event::SuggestClicked => "suggest_clicked",
            Event::AnalysisResolved { .. } => "analysis_resolved",
            Event::SuggestionsResolved { .. } => "suggestions_resolved",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Loading,
    Success,
    Error,
}

/// One line in the status area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

impl Status {
    pub fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

/// Network work a handler asks the runner to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    Analyze { strategy: Strategy, tasks: Vec<Task> },
    Suggest { strategy: Strategy, limit: u32 },
}

/// Side effects described by a handler, applied by whoever owns the
/// display.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    SetStatus(Status),
    ShowJsonError(String),
    HideJsonError,
    /// Toggle the "no tasks yet" indicator.
    SetEmptyState { visible: bool },
    SetStrategyDescription(&'static str),
    RenderResults(Vec<AnalyzedTask>),
    ClearResults,
    RenderSuggestions(Vec<AnalyzedTask>),
    /// Explicit "no suggestions" placeholder, distinct from an empty region.
    ShowNoSuggestions,
    ClearSuggestions,
    /// Clear the add-task form fields.
    ResetForm,
    Request(Request),
}
