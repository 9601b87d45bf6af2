use dice_math::ops::Function;
use dice_math::{Evaluation, MathError, MathErrorKind, RngDice};
use utils::text::truncate;

use crate::prelude::*;

/// Evaluates a mathematical expression. Dice like `2d6` are rolled first.
#[poise::command(slash_command)]
pub async fn calc(
    ctx: HContext<'_>,
    #[description = "The expression, f.e. '2d6 + 3' or 'max(1d20, 1d20) * 2'."]
    #[max_length = 500]
    mut expression: String,
) -> HResult {
    expression.make_ascii_lowercase();

    let config = &ctx.config().calc;
    let result = dice_math::eval_dice_text(&expression, RngDice::thread(), config.max_dice);

    let embed = match result {
        Ok(evaluation) => CreateEmbed::new()
            .description(format_evaluation(&expression, &evaluation, config.max_output_len))
            .color(DEFAULT_EMBED_COLOR),
        Err(err) => {
            log::debug!("Could not evaluate {expression:?}: {err}");
            error_embed(&err)
        },
    };

    ctx.send(ctx.create_reply().embed(embed)).await?;
    Ok(())
}

fn format_evaluation(expression: &str, evaluation: &Evaluation, max_len: usize) -> String {
    let value = evaluation.value.to_string();

    let mut builder = MessageBuilder::new();
    builder.push_mono_safe(expression);

    if let Some(resolved) = &evaluation.resolved {
        builder.push(" \u{2192} ").push_mono_safe(resolved.as_str());
    }

    builder.push(" = ")
        .push_bold_safe(truncate(value, max_len.max(1)))
        .build()
}

fn error_title(err: &MathError) -> &'static str {
    match err.kind() {
        MathErrorKind::Parse => "Could not understand the expression.",
        MathErrorKind::UnsupportedOperator => "That operator is not allowed.",
        MathErrorKind::UnknownFunction => "That function is not allowed.",
        MathErrorKind::UnsupportedExpression => "Only numbers and allowed functions can be used.",
        MathErrorKind::Argument => "Invalid function arguments.",
        MathErrorKind::OperandTooLarge => "The numbers are too large to exponentiate.",
        MathErrorKind::DivisionByZero => "Cannot divide by zero.",
        MathErrorKind::DiceLimit => "Too many dice.",
    }
}

fn error_description(err: &MathError) -> String {
    let mut builder = MessageBuilder::new();
    builder.push_line(error_title(err))
        .push_codeblock_safe(err.to_string(), None);

    if err.kind() == MathErrorKind::UnknownFunction {
        builder.push("\n-# Allowed functions: ");
        for (index, function) in Function::ALL.iter().enumerate() {
            if index != 0 {
                builder.push(", ");
            }

            builder.push_mono(function.name());
        }
    }

    builder.build()
}

fn error_embed(err: &MathError) -> CreateEmbed {
    CreateEmbed::new()
        .description(error_description(err))
        .color(ERROR_EMBED_COLOR)
}

#[cfg(test)]
mod test {
    use dice_math::{BigInt, Number};

    use super::*;

    #[test]
    fn plain_result() {
        let evaluation = Evaluation { resolved: None, value: Number::from(16) };
        let text = format_evaluation("2 ** (3+1)", &evaluation, 2000);
        assert!(text.starts_with("`2 ** (3+1)`"), "{text}");
        assert!(text.ends_with(" = **16**"), "{text}");
        assert!(!text.contains('\u{2192}'));
    }

    #[test]
    fn rolled_result() {
        let evaluation = Evaluation { resolved: Some("4 + 3".to_owned()), value: Number::from(7) };
        let text = format_evaluation("2d6 + 3", &evaluation, 2000);
        assert!(text.contains("`4 + 3`"), "{text}");
        assert!(text.ends_with("**7**"), "{text}");
    }

    #[test]
    fn long_result_is_truncated() {
        let evaluation = Evaluation { resolved: None, value: Number::from(i64::MAX) };
        let text = format_evaluation("x", &evaluation, 5);
        assert!(text.ends_with("**9223\u{2026}**"), "{text}");
    }

    #[test]
    fn huge_result_is_truncated() {
        let evaluation = dice_math::eval_dice_text("2 ** 10000", RngDice::thread(), 1000).unwrap();
        assert_eq!(evaluation.value, Number::Int(BigInt::from(2).pow(10000)));

        let text = format_evaluation("2 ** 10000", &evaluation, 2000);
        let value = text.strip_prefix("`2 ** 10000` = **").unwrap();
        let value = value.strip_suffix("\u{2026}**").unwrap();

        assert_eq!(value.len(), 1999);
        assert!(value.starts_with("19950631168807583848"), "{value}");
        assert!(value.bytes().all(|b| b.is_ascii_digit()));
    }

    #[test]
    fn unknown_function_lists_allowed() {
        let text = error_description(&MathError::UnknownFunction("open".to_owned()));
        assert!(text.starts_with("That function is not allowed.\n"), "{text}");
        assert!(text.contains("-# Allowed functions: `max`, `min`, `abs`"), "{text}");
        assert!(text.ends_with("`radians`"), "{text}");

        let text = error_description(&MathError::DivisionByZero);
        assert!(!text.contains("Allowed functions"), "{text}");
    }

    #[test]
    fn error_titles() {
        assert_eq!(error_title(&MathError::DivisionByZero), "Cannot divide by zero.");
        assert_eq!(error_title(&MathError::UnknownFunction("open".to_owned())), "That function is not allowed.");
        assert_eq!(error_title(&MathError::TooManyDice { limit: 5 }), "Too many dice.");
    }
}
