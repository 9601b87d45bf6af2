//! Commands generating fake, but plausible looking, data.

use base64::prelude::*;
use rand::seq::SliceRandom;
use rand::{thread_rng, Rng};

use crate::prelude::*;

/// Characters used in the random parts of a token.
const TOKEN_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";
const DIGITS: &[u8] = b"0123456789";

/// Chance for the old-style `mfa.` token format.
const MFA_TOKEN_CHANCE: f64 = 0.15;

/// Generates a fake IP address.
#[poise::command(slash_command)]
pub async fn ip(
    ctx: HContext<'_>
) -> HResult {
    let content = fake_ip(&mut thread_rng());
    reply_mono(ctx, content).await
}

/// Generates a fake Discord token.
#[poise::command(slash_command)]
pub async fn token(
    ctx: HContext<'_>
) -> HResult {
    let content = fake_token(&mut thread_rng());
    reply_mono(ctx, content).await
}

async fn reply_mono(ctx: HContext<'_>, content: String) -> HResult {
    let embed = CreateEmbed::new()
        .description(format!("`{content}`"))
        .color(DEFAULT_EMBED_COLOR);

    ctx.send(ctx.create_reply().embed(embed)).await?;
    Ok(())
}

fn fake_ip(rng: &mut impl Rng) -> String {
    let [a, b, c, d]: [u8; 4] = rng.gen();
    format!("{a}.{b}.{c}.{d}")
}

fn fake_token(rng: &mut impl Rng) -> String {
    if rng.gen_bool(MFA_TOKEN_CHANCE) {
        let len = rng.gen_range(20..=67);
        return format!("mfa.{}", random_string(rng, TOKEN_CHARS, len));
    }

    let id = random_string(rng, DIGITS, 18);
    let id = BASE64_STANDARD.encode(id);
    let timestamp = random_string(rng, TOKEN_CHARS, 6);
    let hmac = random_string(rng, TOKEN_CHARS, 27);
    format!("{id}.{timestamp}.{hmac}")
}

/// Creates a string of `len` characters picked from `chars`, which must be ASCII.
fn random_string(rng: &mut impl Rng, chars: &[u8], len: usize) -> String {
    (0..len)
        .filter_map(|_| chars.choose(&mut *rng))
        .map(|&c| char::from(c))
        .collect()
}

#[cfg(test)]
mod test {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn is_token_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    }

    #[test]
    fn ip_format() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..50 {
            let ip = fake_ip(&mut rng);
            let octets: Vec<_> = ip.split('.').collect();
            assert_eq!(octets.len(), 4, "{ip}");
            assert!(octets.iter().all(|o| o.parse::<u8>().is_ok()), "{ip}");
        }
    }

    #[test]
    fn token_formats() {
        let mut rng = StdRng::seed_from_u64(15);
        let (mut mfa, mut regular) = (0, 0);

        for _ in 0..200 {
            let token = fake_token(&mut rng);
            if let Some(rest) = token.strip_prefix("mfa.") {
                mfa += 1;
                assert!((20..=67).contains(&rest.len()), "{token}");
                assert!(rest.chars().all(is_token_char), "{token}");
            } else {
                regular += 1;
                let parts: Vec<_> = token.split('.').collect();
                let [id, timestamp, hmac] = parts[..] else {
                    panic!("{token} should have 3 parts");
                };

                let id = BASE64_STANDARD.decode(id).unwrap();
                assert_eq!(id.len(), 18);
                assert!(id.iter().all(u8::is_ascii_digit), "{token}");
                assert_eq!(timestamp.len(), 6);
                assert_eq!(hmac.len(), 27);
                assert!(hmac.chars().all(is_token_char), "{token}");
            }
        }

        assert!(mfa > 0 && regular > mfa);
    }
}
