//! # taskrank Core Library
//!
//! Client-side logic for submitting tasks to a remote prioritization
//! service and showing the scored results. The CLI is a thin layer over
//! this crate.
//!
//! ## Architecture
//!
//! - **Task intake**: form validation and JSON import into an in-memory,
//!   ordered store
//! - **Scoring client**: `analyze` and `suggest` calls against the service
//! - **Rendering**: pure conversion of scored tasks into cards, laid out as
//!   text or HTML
//! - **Session**: an event dispatch table producing display effects and
//!   network requests
//!
//! ## Key Components
//!
//! - [`TaskStore`]: Session task collection
//! - [`ScoringClient`]: HTTP client for the scoring service
//! - [`Session`]: Event handling and view state
//! - [`Config`]: Client configuration management

pub mod analysis;
pub mod config;
pub mod error;
pub mod events;
pub mod render;
pub mod session;
pub mod strategy;
pub mod task;

pub use analysis::{AnalyzedTask, ScoreMetadata, ScoringClient};
pub use config::{Config, OutputFormat};
pub use error::{AnalysisError, ConfigError, CoreError, ParseError, ShapeError, ValidationError};
pub use events::{Effect, Event, Request, Status, StatusKind};
pub use render::{render_card, render_cards, TaskCard};
pub use session::{execute, Session, SuggestionsView, View};
pub use strategy::Strategy;
pub use task::{Task, TaskForm, TaskStore};
