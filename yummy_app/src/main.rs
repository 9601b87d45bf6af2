use std::sync::Arc;

use serenity::all::{Client, GatewayIntents};

mod config;
mod data;
mod fmt;
mod prelude;
mod slashies;

use data::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load()?;
    init_logging(&config.log);

    log::info!("Starting...");

    let start = std::time::Instant::now();
    let bot_data = Arc::new(HBotData::new(config.bot));

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: slashies::get_commands(),
            pre_command: |ctx| Box::pin(slashies::pre_command(ctx)),
            on_error: |err| Box::pin(slashies::error_handler(err)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;

                log::info!("Logged in as: {} ({:.2?})", ready.user.name, start.elapsed());
                Ok(bot_data)
            })
        })
        .build();

    let mut client = Client::builder(config.discord.token, GatewayIntents::empty())
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}

fn init_logging(config: &config::HLogConfig) {
    let mut builder = env_logger::builder();
    builder.filter_level(config.default.map_or(log::LevelFilter::Warn, Into::into));

    // command invocations are logged at info
    if !config.modules.contains_key(env!("CARGO_CRATE_NAME")) {
        builder.filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Info);
    }

    for (module, &level) in &config.modules {
        builder.filter_module(module, level.into());
    }

    builder.init();
}
