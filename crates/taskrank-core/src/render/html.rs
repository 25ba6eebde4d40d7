//! HTML card markup.
//!
//! Templates are registered under `.html` names so minijinja escapes every
//! interpolated value; titles and explanations are user or server text.

use minijinja::{context, Environment};

use super::TaskCard;

const CARD_TEMPLATE: &str = r#"<article class="task-card">
  <div class="priority-indicator {{ card.priority_class }}"></div>
  <div class="task-title">{{ card.title }}</div>
  <div class="task-meta">
    <span class="pill score">Score: {{ card.score }}</span>
    <span class="pill">{{ card.priority_text }}</span>
    <span class="pill strategy">{{ card.strategy }}</span>
  </div>
  <div class="task-meta">
    <span>Due: {{ card.due }}</span>
    <span>Est. hours: {{ card.estimated_hours }}</span>
    <span>Importance: {{ card.importance }}</span>
  </div>
  <p class="explanation">{{ card.explanation }}</p>
  <div class="metadata">
    {%- for badge in card.badges %}<span>{{ badge }}</span>{% endfor -%}
    {%- for flag in card.flags %}<span>{{ flag }}</span>{% endfor -%}
  </div>
</article>
"#;

const LIST_TEMPLATE: &str = r#"{% for card in cards %}{% include "card.html" %}{% endfor %}"#;

/// Placeholder shown in the suggestions region when the service has none.
pub const NO_SUGGESTIONS_HTML: &str =
    r#"<p class="empty-state">No suggestions available yet.</p>"#;

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("card.html", CARD_TEMPLATE)?;
    env.add_template("list.html", LIST_TEMPLATE)?;
    Ok(env)
}

/// # Errors
///
/// Only fails if a template is malformed.
pub fn render_card_html(card: &TaskCard) -> Result<String, minijinja::Error> {
    environment()?
        .get_template("card.html")?
        .render(context! { card => card })
}

/// Markup for a whole results region, cards in the given order.
///
/// # Errors
///
/// Only fails if a template is malformed.
pub fn render_cards_html(cards: &[TaskCard]) -> Result<String, minijinja::Error> {
    environment()?
        .get_template("list.html")?
        .render(context! { cards => cards })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AnalyzedTask;
    use crate::render::render_card;
    use serde_json::json;

    fn card(value: serde_json::Value) -> TaskCard {
        let task: AnalyzedTask = serde_json::from_value(value).unwrap();
        render_card(&task)
    }

    #[test]
    fn card_carries_priority_class_and_badges() {
        let html = render_card_html(&card(json!({
            "title": "Ship",
            "priority_label": "High",
            "calculated_score": 91,
            "metadata": {"dependency_breadth": 0, "is_past_due": true}
        })))
        .unwrap();
        assert!(html.contains(r#"class="priority-indicator priority-high""#));
        assert!(html.contains("Score: 91"));
        assert!(html.contains("<span>Blocks 0</span>"));
        assert!(html.contains("<span>Past due</span>"));
    }

    #[test]
    fn user_text_is_escaped() {
        let html = render_card_html(&card(json!({
            "title": "<script>alert(1)</script>",
            "explanation": "a & b"
        })))
        .unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn list_keeps_order() {
        let cards = vec![
            card(json!({"title": "first"})),
            card(json!({"title": "second"})),
        ];
        let html = render_cards_html(&cards).unwrap();
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("<article").count(), 2);
    }

    #[test]
    fn empty_list_renders_nothing() {
        assert_eq!(render_cards_html(&[]).unwrap().trim(), "");
    }
}
