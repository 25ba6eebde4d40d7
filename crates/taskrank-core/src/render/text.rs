//! Plain-text cards for terminals.

use super::{PriorityClass, TaskCard};

pub const NO_SUGGESTIONS_TEXT: &str = "No suggestions available yet.";

fn marker(priority: PriorityClass) -> &'static str {
    match priority {
        PriorityClass::High => "[H]",
        PriorityClass::Medium => "[M]",
        PriorityClass::Low => "[L]",
    }
}

pub fn render_card_text(card: &TaskCard) -> String {
    let mut out = format!("{} {}\n", marker(card.priority), card.title);
    out.push_str(&format!(
        "    Score: {} | {} | {}\n",
        card.score, card.priority_text, card.strategy
    ));
    out.push_str(&format!(
        "    Due: {} | Est. hours: {} | Importance: {}\n",
        card.due, card.estimated_hours, card.importance
    ));
    if !card.explanation.is_empty() {
        out.push_str(&format!("    {}\n", card.explanation));
    }
    let badges: Vec<&str> = card
        .badges
        .iter()
        .chain(card.flags.iter())
        .map(String::as_str)
        .collect();
    if !badges.is_empty() {
        out.push_str(&format!("    {}\n", badges.join(" · ")));
    }
    out
}

/// Cards separated by blank lines, in the given order.
pub fn render_cards_text(cards: &[TaskCard]) -> String {
    cards
        .iter()
        .map(render_card_text)
        .collect::<Vec<_>>()
        .join("\n")
}
