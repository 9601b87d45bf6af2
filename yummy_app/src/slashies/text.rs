use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use crate::prelude::*;

/// Transforms text in various ways.
#[poise::command(
    slash_command,
    subcommands(
        "text_varied", "text_scramble", "text_scramble_words",
        "text_reverse", "text_reverse_words", "text_uwuify"
    ),
    subcommand_required
)]
pub async fn text(_: HContext<'_>) -> HResult {
    Ok(())
}

/// VaRiEs ThE cApItAlIsAtIoN oF tHe TeXt.
#[poise::command(slash_command, rename = "varied")]
async fn text_varied(
    ctx: HContext<'_>,
    #[description = "The text to transform."]
    #[max_length = 1000]
    text: String,
) -> HResult {
    let result = varied(&text, &mut thread_rng());
    reply_text(ctx, &result).await
}

/// Scrambles the order of characters in the text.
#[poise::command(slash_command, rename = "scramble")]
async fn text_scramble(
    ctx: HContext<'_>,
    #[description = "The text to transform."]
    #[max_length = 1000]
    text: String,
) -> HResult {
    let result = scramble(&text, &mut thread_rng());
    reply_text(ctx, &result).await
}

/// Scrambles the order of words in the text.
#[poise::command(slash_command, rename = "scramble_words")]
async fn text_scramble_words(
    ctx: HContext<'_>,
    #[description = "The text to transform."]
    #[max_length = 1000]
    text: String,
) -> HResult {
    let result = scramble_words(&text, &mut thread_rng());
    reply_text(ctx, &result).await
}

/// Reverses the order of characters in the text.
#[poise::command(slash_command, rename = "reverse")]
async fn text_reverse(
    ctx: HContext<'_>,
    #[description = "The text to transform."]
    #[max_length = 1000]
    text: String,
) -> HResult {
    reply_text(ctx, &reverse(&text)).await
}

/// Reverses the order of words in the text.
#[poise::command(slash_command, rename = "reverse_words")]
async fn text_reverse_words(
    ctx: HContext<'_>,
    #[description = "The text to transform."]
    #[max_length = 1000]
    text: String,
) -> HResult {
    reply_text(ctx, &reverse_words(&text)).await
}

/// Uwuifies the text.
#[poise::command(slash_command, rename = "uwuify")]
async fn text_uwuify(
    ctx: HContext<'_>,
    #[description = "The text to transform."]
    #[max_length = 1000]
    text: String,
) -> HResult {
    reply_text(ctx, &uwu(&text)).await
}

async fn reply_text(ctx: HContext<'_>, text: &str) -> HResult {
    let embed = CreateEmbed::new()
        .description(MessageBuilder::new().push_safe(text).build())
        .color(DEFAULT_EMBED_COLOR);

    ctx.send(ctx.create_reply().embed(embed)).await?;
    Ok(())
}

/// Whether a character has distinct upper and lower case forms.
fn is_cased(c: char) -> bool {
    !c.to_uppercase().eq([c]) || !c.to_lowercase().eq([c])
}

/// Alternates between upper and lower case, starting randomly.
/// Characters without case are kept and don't affect the alternation.
fn varied(text: &str, rng: &mut impl Rng) -> String {
    let mut upper = rng.gen_bool(0.5);
    let mut result = String::with_capacity(text.len());

    for c in text.chars() {
        if !is_cased(c) {
            result.push(c);
            continue;
        }

        if upper {
            result.extend(c.to_uppercase());
        } else {
            result.extend(c.to_lowercase());
        }

        upper = !upper;
    }

    result
}

fn scramble(text: &str, rng: &mut impl Rng) -> String {
    let mut chars: Vec<char> = text.chars().collect();
    chars.shuffle(rng);
    chars.into_iter().collect()
}

/// Shuffles words separated by single spaces.
fn scramble_words(text: &str, rng: &mut impl Rng) -> String {
    let mut words: Vec<&str> = text.split(' ').collect();
    words.shuffle(rng);
    words.join(" ")
}

fn reverse(text: &str) -> String {
    text.chars().rev().collect()
}

fn reverse_words(text: &str) -> String {
    text.split(' ').rev().collect::<Vec<_>>().join(" ")
}

/// Replaces `l` and `r` with `w`, with added stutters and faces.
fn uwu(text: &str) -> String {
    uwuifier::uwuify_str_sse(text)
}
