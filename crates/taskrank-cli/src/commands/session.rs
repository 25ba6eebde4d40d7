//! Interactive session over stdin.
//!
//! Lines are read while requests are in flight, so a second `analyze` can
//! be issued before the first returns. Outcomes are applied in the order
//! they arrive. At end of input, pending requests are awaited before
//! exiting. Bytes that are not UTF-8 are replaced, never fatal.

use std::io::Write;

use taskrank_core::{
    execute, Effect, Event, ScoringClient, Session, StatusKind, TaskForm, View,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

use super::Context;
use crate::output::{format_suggestions, format_tasks};

const HELP: &str = "\
Commands:
  add <title> [| due YYYY-MM-DD | hours | importance | deps,comma,separated]
  load <json array>        replace all tasks with a pasted JSON array
  load-file <path>         same, reading the array from a file
  clear                    remove all tasks
  list                     show tasks in memory
  strategy [key]           show or change the strategy
  analyze                  score all tasks
  suggest                  fetch the top suggestions
  help                     show this help
  quit                     leave the session";

/// What a typed line asks for.
#[derive(Debug)]
enum Command {
    Dispatch(Event),
    List,
    ShowStrategy,
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

fn parse_line(line: &str) -> Result<Command, std::io::Error> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map(|(w, r)| (w, r.trim()))
        .unwrap_or((line, ""));

    Ok(match word {
        "" => Command::Nothing,
        "add" => Command::Dispatch(Event::FormSubmitted(parse_form(rest))),
        "load" => Command::Dispatch(Event::LoadJsonClicked(rest.to_string())),
        "load-file" => Command::Dispatch(Event::LoadJsonClicked(std::fs::read_to_string(rest)?)),
        "clear" => Command::Dispatch(Event::ClearClicked),
        "list" => Command::List,
        "strategy" if rest.is_empty() => Command::ShowStrategy,
        "strategy" => Command::Dispatch(Event::StrategyChanged(rest.to_string())),
        "analyze" => Command::Dispatch(Event::AnalyzeClicked),
        "suggest" => Command::Dispatch(Event::SuggestClicked),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    })
}

/// `title | due | hours | importance | deps`, trailing fields optional.
fn parse_form(rest: &str) -> TaskForm {
    let mut fields = rest.split('|').map(str::trim);
    let mut form = TaskForm::new(fields.next().unwrap_or_default());
    if let Some(due) = fields.next() {
        form = form.due_date(due);
    }
    if let Some(hours) = fields.next() {
        form = form.estimated_hours(hours);
    }
    if let Some(importance) = fields.next() {
        form = form.importance(importance);
    }
    if let Some(deps) = fields.next() {
        form = form.dependencies(deps);
    }
    form
}

/// Prints effects as they are applied and keeps the resulting view.
struct Printer {
    view: View,
    format: taskrank_core::OutputFormat,
}

impl Printer {
    fn apply(&mut self, effect: &Effect) -> Result<(), Box<dyn std::error::Error>> {
        let was_empty = self.view.empty_state_visible;
        self.view.apply(effect);

        match effect {
            Effect::SetStatus(status) => {
                let tag = match status.kind {
                    StatusKind::Info => "info",
                    StatusKind::Loading => "....",
                    StatusKind::Success => " ok ",
                    StatusKind::Error => "fail",
                };
                println!("[{tag}] {}", status.message);
            }
            Effect::ShowJsonError(message) => println!("[json] {message}"),
            Effect::SetEmptyState { visible: true } if !was_empty => {
                println!("No tasks in memory. Add one or load a JSON array.")
            }
            Effect::SetStrategyDescription(text) => println!("{text}"),
            Effect::RenderResults(tasks) => print!("{}", format_tasks(tasks, self.format)?),
            Effect::RenderSuggestions(tasks) => {
                println!("Suggestions:");
                print!("{}", format_tasks(tasks, self.format)?);
            }
            Effect::ShowNoSuggestions => print!("{}", format_suggestions(&[], self.format)?),
            _ => {}
        }
        std::io::stdout().flush()?;
        Ok(())
    }
}

pub async fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let client = ctx.client()?;
    let mut session = Session::new(
        ctx.config.session.default_strategy,
        ctx.config.session.suggest_limit,
    );
    let mut printer = Printer {
        view: View::default(),
        format: ctx.format,
    };
    printer.view.empty_state_visible = true;

    println!("taskrank session against {}", client.base_url());
    println!("Type \"help\" for commands.");
    for effect in session.start() {
        printer.apply(&effect)?;
    }

    let mut input = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    let mut inflight: JoinSet<Event> = JoinSet::new();
    let mut input_open = true;

    while input_open || !inflight.is_empty() {
        tokio::select! {
            read = input.read_until(b'\n', &mut buf), if input_open => {
                match read {
                    Ok(0) => {
                        input_open = false;
                        continue;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        println!("[fail] Could not read input: {e}");
                        input_open = false;
                        continue;
                    }
                }
                let line = String::from_utf8_lossy(&buf).into_owned();
                buf.clear();
                match parse_line(&line) {
                    Ok(Command::Dispatch(event)) => {
                        dispatch(&mut session, &mut printer, &client, &mut inflight, event)?
                    }
                    Ok(Command::List) => list(&session),
                    Ok(Command::ShowStrategy) => {
                        let strategy = session.strategy();
                        println!("{}: {}", strategy.key(), strategy.description());
                    }
                    Ok(Command::Help) => println!("{HELP}"),
                    Ok(Command::Quit) => break,
                    Ok(Command::Nothing) => {}
                    Ok(Command::Unknown(word)) => {
                        println!("Unknown command \"{word}\". Type \"help\" for commands.")
                    }
                    Err(e) => println!("[fail] Could not read file: {e}"),
                }
            }
            Some(joined) = inflight.join_next(), if !inflight.is_empty() => {
                match joined {
                    Ok(event) => {
                        dispatch(&mut session, &mut printer, &client, &mut inflight, event)?
                    }
                    Err(e) => tracing::error!(error = %e, "request task failed"),
                }
            }
        }
    }

    inflight.abort_all();
    Ok(())
}

fn dispatch(
    session: &mut Session,
    printer: &mut Printer,
    client: &ScoringClient,
    inflight: &mut JoinSet<Event>,
    event: Event,
) -> Result<(), Box<dyn std::error::Error>> {
    for effect in session.handle(event) {
        printer.apply(&effect)?;
        if let Effect::Request(request) = effect {
            let client = client.clone();
            inflight.spawn(async move { execute(&client, request).await });
        }
    }
    Ok(())
}

fn list(session: &Session) {
    let tasks = session.store().snapshot();
    if tasks.is_empty() {
        println!("No tasks in memory.");
        return;
    }
    for task in tasks {
        let title = task
            .get("title")
            .map(taskrank_core::render::display_value)
            .unwrap_or_default();
        println!("{:<6} {title}", task.id_label());
    }
    println!("{} task(s), strategy {}", tasks.len(), session.strategy());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_fields_are_pipe_separated() {
        let Ok(Command::Dispatch(Event::FormSubmitted(form))) =
            parse_line("add  Write report | 2025-12-01 | 2 | 8 | T2, T3")
        else {
            panic!("expected a form submission");
        };
        assert_eq!(
            form,
            TaskForm::new("Write report")
                .due_date("2025-12-01")
                .estimated_hours("2")
                .importance("8")
                .dependencies("T2, T3")
        );
    }

    #[test]
    fn add_with_title_only() {
        let Ok(Command::Dispatch(Event::FormSubmitted(form))) = parse_line("add Email") else {
            panic!("expected a form submission");
        };
        assert_eq!(form, TaskForm::new("Email"));
    }

    #[test]
    fn strategy_without_key_shows_current() {
        assert!(matches!(parse_line("strategy").unwrap(), Command::ShowStrategy));
        assert!(matches!(
            parse_line("strategy high_impact").unwrap(),
            Command::Dispatch(Event::StrategyChanged(key)) if key == "high_impact"
        ));
    }

    #[test]
    fn load_keeps_rest_of_line() {
        assert!(matches!(
            parse_line(r#"load [{"title": "a b"}]"#).unwrap(),
            Command::Dispatch(Event::LoadJsonClicked(text)) if text == r#"[{"title": "a b"}]"#
        ));
    }

    #[test]
    fn load_file_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(matches!(
            parse_line(&format!("load-file {}", path.display())).unwrap(),
            Command::Dispatch(Event::LoadJsonClicked(text)) if text == "[]"
        ));
        assert!(parse_line("load-file /no/such/file.json").is_err());
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert!(matches!(parse_line("   ").unwrap(), Command::Nothing));
        assert!(matches!(
            parse_line("frobnicate now").unwrap(),
            Command::Unknown(word) if word == "frobnicate"
        ));
        assert!(matches!(parse_line("quit").unwrap(), Command::Quit));
    }
}
