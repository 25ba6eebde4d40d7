use clap::Args;
use taskrank_core::Strategy;

use super::Context;
use crate::output::format_suggestions;

#[derive(Args)]
pub struct SuggestArgs {
    /// Strategy key (default: session.default_strategy)
    #[arg(short, long)]
    strategy: Option<Strategy>,
    /// Number of suggestions, 1-50 (default: session.suggest_limit)
    #[arg(short, long)]
    limit: Option<u32>,
}

pub async fn run(args: SuggestArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let strategy = args
        .strategy
        .unwrap_or(ctx.config.session.default_strategy);
    let limit = args.limit.unwrap_or(ctx.config.session.suggest_limit);

    let suggested = ctx.client()?.suggest(strategy, limit).await?;
    print!("{}", format_suggestions(&suggested, ctx.format)?);
    Ok(())
}
