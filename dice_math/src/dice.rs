//! Dice notation like `2d6`.
//!
//! Dice are resolved into plain numbers before an expression is parsed.

use std::fmt;
use std::num::NonZero;
use std::str::FromStr;

use once_cell::sync::Lazy;
use rand::distributions::Uniform;
use rand::rngs::ThreadRng;
use rand::{thread_rng, Rng};
use regex::Regex;

use crate::{MathError, Result};

static DICE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?P<multiplier>[0-9]*)d(?P<faces>[0-9]+)$")
        .expect("dice pattern must be valid")
});

/// A source of die rolls.
pub trait DieSource {
    /// Rolls a single die, returning a value in `1..=faces`.
    fn roll_die(&mut self, faces: NonZero<u32>) -> u32;
}

impl<S: DieSource + ?Sized> DieSource for &mut S {
    fn roll_die(&mut self, faces: NonZero<u32>) -> u32 {
        (**self).roll_die(faces)
    }
}

/// Rolls dice with a random number generator.
#[derive(Debug, Clone)]
pub struct RngDice<R>(pub R);

impl RngDice<ThreadRng> {
    /// Rolls dice with the thread-local generator.
    #[must_use]
    pub fn thread() -> Self {
        Self(thread_rng())
    }
}

impl<R: Rng> DieSource for RngDice<R> {
    fn roll_die(&mut self, faces: NonZero<u32>) -> u32 {
        self.0.sample(Uniform::new_inclusive(1, faces.get()))
    }
}

/// A set of equal dice, like `2d6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceRoll {
    /// How many dice to roll.
    pub count: u32,
    /// How many faces each die has.
    pub faces: NonZero<u32>,
}

impl DiceRoll {
    /// Reads dice notation from a whole token.
    ///
    /// Returns [`None`] if the token isn't dice notation.
    /// A count too large for [`u32`] is clamped to [`u32::MAX`].
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let captures = DICE_PATTERN.captures(token)?;

        let faces = captures["faces"].parse().ok()?;
        let count = match &captures["multiplier"] {
            "" => 1,
            m => m.parse().unwrap_or(u32::MAX),
        };

        Some(Self { count, faces })
    }

    /// Rolls every die and returns each result.
    pub fn roll_each(self, source: &mut impl DieSource) -> Vec<u32> {
        (0..self.count).map(|_| source.roll_die(self.faces)).collect()
    }

    /// Rolls every die and returns the sum.
    pub fn roll(self, source: &mut impl DieSource) -> u64 {
        let sum = (0..self.count)
            .map(|_| u64::from(source.roll_die(self.faces)))
            .sum();

        log::trace!("Rolled {self}: {sum}");
        sum
    }
}

impl fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.faces)
    }
}

/// The result of resolving a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved<'a> {
    /// The token was dice notation and was rolled.
    Rolled(u64),
    /// The token wasn't dice notation and is returned unchanged.
    Literal(&'a str),
}

impl fmt::Display for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rolled(sum) => write!(f, "{sum}"),
            Self::Literal(text) => f.write_str(text),
        }
    }
}

/// Resolves a single token, rolling it if it is dice notation.
pub fn resolve_token<'a>(token: &'a str, source: &mut impl DieSource) -> Resolved<'a> {
    match DiceRoll::from_token(token) {
        Some(dice) => Resolved::Rolled(dice.roll(source)),
        None => Resolved::Literal(token),
    }
}

/// Text with all dice notation replaced by rolled values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDice {
    /// The text after replacing the dice.
    pub text: String,
    /// Whether any dice notation was found.
    pub has_dice: bool,
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '+' | '-' | '*' | '/' | '%' | '^' | '(' | ')' | ',')
}

/// Resolves all dice notation within an expression.
///
/// Fails with [`MathError::TooManyDice`] if more than `max_dice` dice would be rolled.
/// No dice of the token exceeding the limit are rolled.
pub fn resolve_dice(text: &str, mut source: impl DieSource, max_dice: u32) -> Result<ResolvedDice> {
    struct State<S> {
        source: S,
        max_dice: u32,
        used: u32,
        out: ResolvedDice,
    }

    impl<S: DieSource> State<S> {
        fn push(&mut self, fragment: &str) -> Result<()> {
            let Some(dice) = DiceRoll::from_token(fragment) else {
                self.out.text.push_str(fragment);
                return Ok(());
            };

            self.used = self.used
                .checked_add(dice.count)
                .filter(|&u| u <= self.max_dice)
                .ok_or(MathError::TooManyDice { limit: self.max_dice })?;

            let sum = dice.roll(&mut self.source);
            self.out.text.push_str(&sum.to_string());
            self.out.has_dice = true;
            Ok(())
        }
    }

    let mut state = State {
        source: &mut source,
        max_dice,
        used: 0,
        out: ResolvedDice {
            text: String::with_capacity(text.len()),
            has_dice: false,
        },
    };

    let mut last = 0;
    for (index, separator) in text.match_indices(is_separator) {
        state.push(&text[last..index])?;
        state.out.text.push_str(separator);
        last = index + separator.len();
    }

    state.push(&text[last..])?;
    Ok(state.out)
}

utils::define_simple_error!(
    #[derive(Clone, Copy)]
    DiceParseError(()):
    "Expected inputs like '2d6' or '1d20 2d4'."
);

/// Parses a list of dice sets like `2d6 1d20`.
///
/// Every set needs at least one die.
pub fn parse_dice_sets(text: &str) -> Result<Vec<DiceRoll>, DiceParseError> {
    let sets = text.split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|s| !s.is_empty())
        .map(|s| DiceRoll::from_token(s).filter(|d| d.count != 0).ok_or(DiceParseError(())))
        .collect::<Result<Vec<_>, _>>()?;

    if sets.is_empty() {
        return Err(DiceParseError(()));
    }

    Ok(sets)
}

impl FromStr for DiceRoll {
    type Err = DiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_token(s).ok_or(DiceParseError(()))
    }
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    /// Returns predetermined rolls in order.
    struct Sequence(std::vec::IntoIter<u32>);

    impl Sequence {
        fn new(rolls: &[u32]) -> Self {
            Self(rolls.to_vec().into_iter())
        }
    }

    impl DieSource for Sequence {
        fn roll_die(&mut self, faces: NonZero<u32>) -> u32 {
            let roll = self.0.next().expect("ran out of rolls");
            assert!((1..=faces.get()).contains(&roll), "roll {roll} is not a d{faces}");
            roll
        }
    }

    fn resolve(text: &str, rolls: &[u32]) -> Result<ResolvedDice> {
        resolve_dice(text, Sequence::new(rolls), 1000)
    }

    #[test]
    fn tokens() {
        let d = |count, faces| Some(DiceRoll { count, faces: NonZero::new(faces).unwrap() });

        assert_eq!(DiceRoll::from_token("2d6"), d(2, 6));
        assert_eq!(DiceRoll::from_token("d20"), d(1, 20));
        assert_eq!(DiceRoll::from_token("3D8"), d(3, 8));
        assert_eq!(DiceRoll::from_token("0d6"), d(0, 6));
        assert_eq!(DiceRoll::from_token("99999999999d6"), d(u32::MAX, 6));
        assert_eq!(DiceRoll::from_token("2d0"), None);
        assert_eq!(DiceRoll::from_token("2d99999999999"), None);
        assert_eq!(DiceRoll::from_token("2d"), None);
        assert_eq!(DiceRoll::from_token("d6d6"), None);
        assert_eq!(DiceRoll::from_token("max"), None);
        assert_eq!(DiceRoll::from_token("x2d6"), None);
    }

    #[test]
    fn literal_tokens_pass_through() {
        let mut source = Sequence::new(&[]);
        for token in ["6", "max", "d6d6", "2d0", "2d6x", "x2d6", "1.5", ""] {
            assert_eq!(resolve_token(token, &mut source), Resolved::Literal(token));
        }
    }

    #[test]
    fn resolve_expressions() {
        assert_eq!(resolve("1d20 - 2d6", &[15, 3, 4]).unwrap().text, "15 - 7");
        assert_eq!(resolve("5d8 * 1d5", &[4, 4, 4, 4, 4, 3]).unwrap().text, "20 * 3");
        assert_eq!(resolve("max(d4,2d4)+1", &[2, 1, 1]).unwrap().text, "max(2,2)+1");

        let plain = resolve("2 ** (3+1)", &[]).unwrap();
        assert_eq!(plain.text, "2 ** (3+1)");
        assert!(!plain.has_dice);
        assert!(resolve("d6", &[6]).unwrap().has_dice);
    }

    #[test]
    fn dice_limit() {
        let err = resolve_dice("600d2 + 600d2", Sequence::new(&[1; 600]), 1000);
        assert_eq!(err, Err(MathError::TooManyDice { limit: 1000 }));

        let err = resolve("99999999999d6", &[]);
        assert_eq!(err, Err(MathError::TooManyDice { limit: 1000 }));

        assert!(resolve_dice("1000d1", Sequence::new(&[1; 1000]), 1000).is_ok());
    }

    #[test]
    fn rolls_stay_in_range() {
        let mut source = RngDice(StdRng::seed_from_u64(0x5eed));
        for (count, faces) in [(1u32, 1u32), (1, 6), (3, 6), (10, 20), (7, 100)] {
            let token = format!("{count}d{faces}");
            for _ in 0..200 {
                let Resolved::Rolled(sum) = resolve_token(&token, &mut source) else {
                    panic!("{token} should be rolled");
                };

                assert!((u64::from(count)..=u64::from(count * faces)).contains(&sum), "{token}: {sum}");
            }
        }
    }

    #[test]
    fn dice_sets() {
        let sets = parse_dice_sets("2d6 1d20, d4").unwrap();
        assert_eq!(sets.iter().map(ToString::to_string).collect::<Vec<_>>(), ["2d6", "1d20", "1d4"]);
        assert!(parse_dice_sets("").is_err());
        assert!(parse_dice_sets("2d6 5").is_err());
        assert!(parse_dice_sets("0d6").is_err());
        assert_eq!(DiceRoll::from_str("4d4").map(|d| d.count).ok(), Some(4));

        let rolls = sets[0].roll_each(&mut Sequence::new(&[2, 5]));
        assert_eq!(rolls, [2, 5]);
    }
}
