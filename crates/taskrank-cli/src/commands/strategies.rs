use taskrank_core::Strategy;

use super::Context;

/// One line per strategy; the configured default is starred.
pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let default = ctx.config.session.default_strategy;
    for strategy in Strategy::ALL {
        let marker = if strategy == default { '*' } else { ' ' };
        println!("{marker} {:<16} {}", strategy.key(), strategy.description());
    }
    Ok(())
}
