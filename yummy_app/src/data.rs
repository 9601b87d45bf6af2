use std::sync::Arc;

use poise::reply::CreateReply;
use serenity::all::Color;

use crate::config::HBotConfig;

/// A general color that can be used for various embeds.
pub const DEFAULT_EMBED_COLOR: Color = Color::new(0xDD_A0_DD);

/// A general color that can be used for embeds indicating errors.
pub const ERROR_EMBED_COLOR: Color = Color::new(0xCF_00_25);

/// The error type used for the poise context.
pub type HError = anyhow::Error;
/// The full poise context type.
pub type HContext<'a> = poise::Context<'a, Arc<HBotData>, HError>;
/// The poise command result type.
pub type HResult = Result<(), HError>;

/// The global bot data. Only one instance exists per bot.
#[derive(Debug)]
pub struct HBotData {
    /// The bot configuration.
    config: HBotConfig,
}

/// A simple error that can return any error message.
#[derive(Debug, Clone)]
pub struct HArgError(
    /// The error message
    pub &'static str
);

utils::define_simple_error!(@main HArgError: e => "{}", e.0);

impl HBotData {
    /// Creates a new instance.
    #[must_use]
    pub fn new(config: HBotConfig) -> Self {
        HBotData {
            config,
        }
    }

    #[must_use]
    pub fn config(&self) -> &HBotConfig {
        &self.config
    }
}

/// Extension trait for the poise context.
pub trait HContextExtensions {
    /// Gets the bot configuration.
    #[must_use]
    fn config(&self) -> &HBotConfig;

    /// Creates a reply visible to everyone.
    #[must_use]
    fn create_reply(&self) -> CreateReply;

    /// Always creates an ephemeral reply.
    #[must_use]
    fn create_ephemeral_reply(&self) -> CreateReply;
}

impl HContextExtensions for HContext<'_> {
    fn config(&self) -> &HBotConfig {
        self.data().config()
    }

    fn create_reply(&self) -> CreateReply {
        CreateReply::default()
    }

    fn create_ephemeral_reply(&self) -> CreateReply {
        CreateReply::default().ephemeral(true)
    }
}
