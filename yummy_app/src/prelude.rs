pub use serenity::builder::*;
pub use serenity::utils::MessageBuilder;

pub use crate::data::*;
