use std::sync::Arc;

use crate::fmt::DisplayResolvedArgs;
use crate::prelude::*;

mod calc;
mod coin;
mod dice;
mod fake;
mod regex;
mod roll;
mod text;

/// Gets all poise commands.
pub fn get_commands() -> Vec<poise::Command<Arc<HBotData>, HError>> {
    vec![
        calc::calc(),
        coin::coin(),
        dice::dice(),
        fake::ip(),
        fake::token(),
        regex::regex(),
        roll::roll(),
        text::text(),
    ]
}

/// Pre-command execution hook.
pub async fn pre_command(ctx: HContext<'_>) {
    log::info!("{}: /{} {}", ctx.author().name, ctx.command().qualified_name, match ctx {
        HContext::Application(ctx) => DisplayResolvedArgs::Options(ctx.args),
        HContext::Prefix(ctx) => DisplayResolvedArgs::String(ctx.args),
    })
}

/// Command execution error handler.
#[cold]
pub async fn error_handler(error: poise::FrameworkError<'_, Arc<HBotData>, HError>) {
    match &error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            command_error(ctx, error).await
        },
        poise::FrameworkError::ArgumentParse { error, input, ctx, .. } => {
            let input = MessageBuilder::new()
                .push_mono_safe(input.as_deref().unwrap_or_default())
                .build();

            context_error(ctx, format!("Argument invalid: {error}\nCaused by input: {input}")).await
        },
        poise::FrameworkError::CommandPanic { payload, ctx, .. } => {
            log::error!("Command panicked: {payload:?}");
            context_error(ctx, "Internal error: the command panicked.".to_owned()).await
        },
        _ => log::error!("Oh noes, we got an error: {error:?}"),
    }

    async fn command_error(ctx: &HContext<'_>, err: &HError) {
        let message = match err.downcast_ref::<HArgError>() {
            Some(err) => {
                format!("Command error: ```{err}```")
            }
            None => {
                log::error!("Error in command: {err:?}");
                format!("Internal error: ```{err}```")
            }
        };

        context_error(ctx, message).await
    }

    async fn context_error(ctx: &HContext<'_>, feedback: String) {
        let embed = CreateEmbed::new()
            .description(feedback)
            .color(ERROR_EMBED_COLOR);

        let reply = ctx.create_ephemeral_reply().embed(embed);
        if let Err(err) = ctx.send(reply).await {
            log::error!("Error in error handler: {err:?}")
        };
    }
}
