//! Session dispatch driven end to end, with requests executed against a
//! mocked scoring service.

use mockito::Matcher;
use serde_json::json;
use taskrank_core::{
    execute, render_cards, Effect, Event, Request, ScoringClient, Session, StatusKind,
    SuggestionsView, TaskForm, View,
};

/// Apply a handler's effects; run any request and feed its outcome back.
async fn drive(session: &mut Session, view: &mut View, client: &ScoringClient, event: Event) {
    let mut pending = vec![event];
    while let Some(event) = pending.pop() {
        for effect in session.handle(event) {
            view.apply(&effect);
            if let Effect::Request(request) = effect {
                pending.push(execute(client, request).await);
            }
        }
    }
}

/// Test: add, analyze, suggest, clear.
#[tokio::test]
async fn test_full_session() {
    let mut server = mockito::Server::new_async().await;
    let analyze = server
        .mock("POST", "/api/tasks/analyze/")
        .match_body(Matcher::PartialJson(json!({"strategy": "fastest_wins"})))
        .with_status(200)
        .with_body(
            json!([
                {"id": "T2", "title": "Quick fix", "calculated_score": 88, "priority_label": "High",
                 "strategy": "fastest_wins", "metadata": {"effort_quick_win": 1, "dependency_breadth": 0}},
                {"id": "T1", "title": "Big refactor", "calculated_score": 35.5, "priority_label": "low",
                 "strategy": "fastest_wins"}
            ])
            .to_string(),
        )
        .create_async()
        .await;
    let suggest = server
        .mock("GET", "/api/tasks/suggest/")
        .match_query(Matcher::UrlEncoded("strategy".into(), "fastest_wins".into()))
        .with_status(200)
        .with_body(json!({"tasks": [{"id": "T2", "title": "Quick fix"}]}).to_string())
        .create_async()
        .await;

    let client = ScoringClient::new(&format!("{}/api/tasks", server.url())).unwrap();
    let mut session = Session::default();
    let mut view = View::default();
    view.apply_all(&session.start());
    assert!(view.empty_state_visible);

    for title in ["Big refactor", "Quick fix"] {
        drive(&mut session, &mut view, &client, Event::FormSubmitted(TaskForm::new(title))).await;
    }
    assert!(!view.empty_state_visible);

    drive(&mut session, &mut view, &client, Event::StrategyChanged("fastest_wins".into())).await;
    drive(&mut session, &mut view, &client, Event::AnalyzeClicked).await;
    analyze.assert_async().await;

    let cards = render_cards(&view.results);
    assert_eq!(cards[0].title, "Quick fix");
    assert_eq!(cards[0].badges, vec!["Quick-win 1", "Blocks 0"]);
    assert_eq!(cards[1].priority_class, "priority-low");
    let status = view.status.clone().unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(
        status.message,
        "Analyzed 2 task(s) using \"fastest wins\" strategy."
    );

    drive(&mut session, &mut view, &client, Event::SuggestClicked).await;
    suggest.assert_async().await;
    match &view.suggestions {
        SuggestionsView::Tasks(tasks) => assert_eq!(tasks.len(), 1),
        other => panic!("expected suggestions, got {other:?}"),
    }

    drive(&mut session, &mut view, &client, Event::ClearClicked).await;
    assert!(session.store().is_empty());
    assert!(view.results.is_empty());
    assert_eq!(view.suggestions, SuggestionsView::Empty);
}

/// Test: analyze with an empty store never reaches the service.
#[tokio::test]
async fn test_analyze_empty_store_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let mock = server.mock("POST", Matcher::Any).expect(0).create_async().await;

    let client = ScoringClient::new(&format!("{}/api/tasks", server.url())).unwrap();
    let mut session = Session::default();
    let mut view = View::default();
    drive(&mut session, &mut view, &client, Event::AnalyzeClicked).await;

    mock.assert_async().await;
    let status = view.status.unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.message, "Add at least one task before analyzing.");
}

/// Test: a failed suggest keeps the region cleared and reports the detail.
#[tokio::test]
async fn test_suggest_failure_reports_detail() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/tasks/suggest/")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(r#"{"detail": "Nothing has been analyzed yet."}"#)
        .create_async()
        .await;

    let client = ScoringClient::new(&format!("{}/api/tasks", server.url())).unwrap();
    let mut session = Session::default();
    let mut view = View::default();
    drive(&mut session, &mut view, &client, Event::SuggestClicked).await;

    assert_eq!(view.suggestions, SuggestionsView::Empty);
    assert_eq!(
        view.status.unwrap().message,
        "Failed to fetch suggestions: Nothing has been analyzed yet."
    );
}

/// Test: two analyses in flight; the one applied last stays rendered.
#[tokio::test]
async fn test_overlapping_analyses_last_applied_wins() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/tasks/analyze/")
        .match_body(Matcher::PartialJson(json!({"strategy": "smart_balance"})))
        .with_body(json!([{"title": "from smart balance"}]).to_string())
        .create_async()
        .await;
    server
        .mock("POST", "/api/tasks/analyze/")
        .match_body(Matcher::PartialJson(json!({"strategy": "high_impact"})))
        .with_body(json!([{"title": "from high impact"}]).to_string())
        .create_async()
        .await;

    let client = ScoringClient::new(&format!("{}/api/tasks", server.url())).unwrap();
    let mut session = Session::default();
    let mut view = View::default();
    session.handle(Event::FormSubmitted(TaskForm::new("a")));

    let first = request_of(session.handle(Event::AnalyzeClicked));
    session.handle(Event::StrategyChanged("high_impact".into()));
    let second = request_of(session.handle(Event::AnalyzeClicked));

    // second resolves first
    let second_done = execute(&client, second).await;
    let first_done = execute(&client, first).await;
    view.apply_all(&session.handle(second_done));
    view.apply_all(&session.handle(first_done));

    assert_eq!(view.results.len(), 1);
    assert_eq!(view.results[0].task.title(), Some("from smart balance"));
    assert_eq!(
        view.status.unwrap().message,
        "Analyzed 1 task(s) using \"smart balance\" strategy."
    );
}

fn request_of(effects: Vec<Effect>) -> Request {
    effects
        .into_iter()
        .find_map(|e| match e {
            Effect::Request(r) => Some(r),
            _ => None,
        })
        .unwrap()
}
