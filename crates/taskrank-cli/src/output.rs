//! Print scored tasks in the selected format.

use taskrank_core::render::html::{render_cards_html, NO_SUGGESTIONS_HTML};
use taskrank_core::render::text::{render_cards_text, NO_SUGGESTIONS_TEXT};
use taskrank_core::{render_cards, AnalyzedTask, OutputFormat};

/// Scored tasks in service order. JSON output is the records as received.
pub fn format_tasks(
    tasks: &[AnalyzedTask],
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    Ok(match format {
        OutputFormat::Text => render_cards_text(&render_cards(tasks)),
        OutputFormat::Html => render_cards_html(&render_cards(tasks))?,
        OutputFormat::Json => serde_json::to_string_pretty(tasks)? + "\n",
    })
}

/// Like [`format_tasks`], with the placeholder when there are none.
pub fn format_suggestions(
    tasks: &[AnalyzedTask],
    format: OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    if !tasks.is_empty() || format == OutputFormat::Json {
        return format_tasks(tasks, format);
    }
    Ok(match format {
        OutputFormat::Html => format!("{NO_SUGGESTIONS_HTML}\n"),
        _ => format!("{NO_SUGGESTIONS_TEXT}\n"),
    })
}
