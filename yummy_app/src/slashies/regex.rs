use regex::{Captures, Regex, RegexBuilder};
use utils::text::truncate;

use crate::prelude::*;

/// Matches beyond this count are not listed.
const MAX_LISTED_MATCHES: usize = 20;

/// The maximum length of an embed description.
const MAX_DESCRIPTION_LEN: usize = 4096;

/// Tests a regular expression against some text.
#[poise::command(slash_command)]
pub async fn regex(
    ctx: HContext<'_>,
    #[description = "The regular expression."]
    #[max_length = 500]
    pattern: String,
    #[description = "The text to search."]
    #[max_length = 1500]
    text: String,
) -> HResult {
    let size_limit = ctx.config().regex.size_limit;
    let embed = match RegexBuilder::new(&pattern).size_limit(size_limit).build() {
        Ok(re) => CreateEmbed::new()
            .description(truncate(describe_matches(&re, &text), MAX_DESCRIPTION_LEN))
            .color(DEFAULT_EMBED_COLOR),
        Err(err) => {
            let description = MessageBuilder::new()
                .push_line("The pattern is invalid.")
                .push_codeblock_safe(err.to_string(), None)
                .build();

            CreateEmbed::new()
                .description(description)
                .color(ERROR_EMBED_COLOR)
        },
    };

    ctx.send(ctx.create_reply().embed(embed)).await?;
    Ok(())
}

fn describe_matches(re: &Regex, text: &str) -> String {
    let mut builder = MessageBuilder::new();
    let mut count = 0usize;

    for captures in re.captures_iter(text) {
        count += 1;
        if count <= MAX_LISTED_MATCHES {
            push_captures(&mut builder, re, &captures);
        }
    }

    if count > MAX_LISTED_MATCHES {
        builder.push_line(format!("-# ...and {} more", count - MAX_LISTED_MATCHES));
    }

    let summary = match count {
        0 => "No matches.".to_owned(),
        1 => "Found **1** match:\n".to_owned(),
        n => format!("Found **{n}** matches:\n"),
    };

    summary + &builder.build()
}

fn push_captures(builder: &mut MessageBuilder, re: &Regex, captures: &Captures<'_>) {
    let Some(full) = captures.get(0) else {
        return;
    };

    builder.push(format!("- `{:?}`: ", full.range()));
    push_matched_text(builder, full.as_str());
    builder.push('\n');

    for (index, name) in re.capture_names().enumerate().skip(1) {
        builder.push(format!("  - group {index}"));
        if let Some(name) = name {
            builder.push(" ").push_mono_safe(name);
        }

        builder.push(": ");
        match captures.get(index) {
            Some(group) => push_matched_text(builder, group.as_str()),
            None => builder.push_italic("none"),
        };

        builder.push('\n');
    }
}

fn push_matched_text<'b>(builder: &'b mut MessageBuilder, text: &str) -> &'b mut MessageBuilder {
    if text.is_empty() {
        builder.push_italic("empty")
    } else {
        builder.push_mono_safe(text)
    }
}
