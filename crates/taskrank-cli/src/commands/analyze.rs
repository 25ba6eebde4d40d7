//! One-shot analysis of a JSON task file.

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use taskrank_core::{Strategy, TaskStore};

use super::Context;
use crate::output::format_tasks;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON array of tasks; "-" reads stdin
    #[arg(short, long, value_name = "PATH")]
    file: PathBuf,
    /// Strategy key (default: session.default_strategy)
    #[arg(short, long)]
    strategy: Option<Strategy>,
}

pub async fn run(args: AnalyzeArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let text = if args.file.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(&args.file)?
    };

    let mut store = TaskStore::new();
    let count = store.load_from_json(&text)?;
    tracing::debug!(count, file = %args.file.display(), "loaded tasks");

    let strategy = args
        .strategy
        .unwrap_or(ctx.config.session.default_strategy);
    let analyzed = ctx.client()?.analyze(strategy, store.snapshot()).await?;

    print!("{}", format_tasks(&analyzed, ctx.format)?);
    Ok(())
}
