use rand::{thread_rng, Rng};

use crate::prelude::*;

const BOUNDS_SWAPPED: HArgError = HArgError("The minimum can't be greater than the maximum.");

/// Rolls a random whole number.
#[poise::command(slash_command)]
pub async fn roll(
    ctx: HContext<'_>,
    #[description = "The maximum, or the minimum if a maximum is also given. Defaults to 6."]
    value: Option<i64>,
    #[description = "The maximum."]
    max_value: Option<i64>,
) -> HResult {
    let (min, max) = roll_bounds(value, max_value)?;
    let result = thread_rng().gen_range(min..=max);

    let embed = CreateEmbed::new()
        .description(format!("Rolled a **{result}**! \u{1F3B2}"))
        .color(DEFAULT_EMBED_COLOR);

    ctx.send(ctx.create_reply().embed(embed)).await?;
    Ok(())
}

/// Gets the inclusive range to roll in.
fn roll_bounds(value: Option<i64>, max_value: Option<i64>) -> Result<(i64, i64), HArgError> {
    let value = value.unwrap_or(6);
    let (min, max) = match max_value {
        Some(max_value) => (value, max_value),
        None => (1, value),
    };

    if min > max {
        return Err(BOUNDS_SWAPPED);
    }

    Ok((min, max))
}

#[cfg(test)]
mod test {
    use super::roll_bounds;

    #[test]
    fn bounds() {
        assert_eq!(roll_bounds(None, None).ok(), Some((1, 6)));
        assert_eq!(roll_bounds(Some(20), None).ok(), Some((1, 20)));
        assert_eq!(roll_bounds(Some(5), Some(10)).ok(), Some((5, 10)));
        assert_eq!(roll_bounds(Some(-3), Some(-3)).ok(), Some((-3, -3)));
        assert!(roll_bounds(Some(10), Some(5)).is_err());
        assert!(roll_bounds(Some(0), None).is_err());
    }
}
