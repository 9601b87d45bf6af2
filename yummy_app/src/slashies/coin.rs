use rand::{thread_rng, Rng};

use crate::prelude::*;

/// Flips a coin.
#[poise::command(slash_command)]
pub async fn coin(
    ctx: HContext<'_>
) -> HResult {
    let content = flip(&mut thread_rng());

    let embed = CreateEmbed::new()
        .description(content)
        .color(DEFAULT_EMBED_COLOR);

    ctx.send(ctx.create_reply().embed(embed)).await?;
    Ok(())
}

fn flip(rng: &mut impl Rng) -> &'static str {
    if rng.gen_bool(0.5f64) {
        "### Heads!"
    } else {
        "### Tails!"
    }
}
