use std::fmt::Write;
use std::str::FromStr;

use dice_math::dice::{parse_dice_sets, DiceParseError, DiceRoll};
use dice_math::{DieSource, RngDice};
use utils::Discard;

use crate::prelude::*;

/// The most dice a single command may roll.
const MAX_DICE: u32 = 255;

/// Rolls some dice.
#[poise::command(slash_command)]
pub async fn dice(
    ctx: HContext<'_>,
    #[description = "The sets of dice to roll, in a format like '2d6', separated by spaces."]
    #[max_length = 200]
    sets: DiceSets,
) -> HResult {
    let sets = sets.0;
    let dice_count = sets.iter().try_fold(0u32, |sum, d| sum.checked_add(d.count));
    if dice_count.map_or(true, |c| c > MAX_DICE) {
        Err(HArgError("You can't roll more than 255 dice at once."))?;
    }

    let (total_sum, content) = get_dice_roll_result(&sets, &mut RngDice::thread());
    let embed = CreateEmbed::new()
        .title(format!("Total \u{2211}{}", total_sum))
        .description(content)
        .color(DEFAULT_EMBED_COLOR);

    ctx.send(ctx.create_reply().embed(embed)).await?;
    Ok(())
}

fn get_dice_roll_result(sets: &[DiceRoll], source: &mut impl DieSource) -> (u64, String) {
    let mut content = String::new();
    let mut total_sum = 0u64;

    for d in sets {
        write!(content, "- **{d}:**").discard();

        let mut local_sum = 0u64;
        for roll in d.roll_each(source) {
            local_sum += u64::from(roll);
            write!(content, " {}", roll).discard();
        }

        if d.count > 1 && sets.len() > 1 {
            write!(content, " *(\u{2211}{})*", local_sum).discard();
        }

        total_sum += local_sum;
        content.push('\n');
    }

    (total_sum, content)
}

/// A non-empty list of dice sets.
#[derive(Debug)]
struct DiceSets(Vec<DiceRoll>);

impl FromStr for DiceSets {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_dice_sets(s).map(Self)
    }
}
