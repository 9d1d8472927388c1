//! Text formatting for terminal output.

use chrono::{DateTime, Local, Utc};
use tarot_core::DrawnCard;

/// Local date and time for a millisecond timestamp.
pub fn timestamp(millis: u64) -> String {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|utc| {
            utc.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| millis.to_string())
}

/// One drawn card, e.g. `Past: The Tower (高塔), reversed`.
pub fn drawn_card(drawn: &DrawnCard) -> String {
    format!(
        "{}: {} ({}), {}",
        drawn.position.name,
        drawn.card.english_name,
        drawn.card.name,
        drawn.orientation()
    )
}

/// Keywords for a drawn card's orientation.
pub fn keywords(drawn: &DrawnCard) -> String {
    format!("{} keywords: {}", drawn.orientation(), drawn.keywords().join(", "))
}

/// Show only the ends of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..3].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Shorten text to at most `max` characters.
pub fn truncate(text: &str, max: usize) -> String {
    let mut chars = text.chars();
    let short: String = chars.by_ref().take(max).collect();
    if chars.next().is_some() {
        format!("{}…", short)
    } else {
        short
    }
}

#[cfg(test)]
mod tests {
    use tarot_core::Catalog;

    use super::*;

    fn drawn(reversed: bool) -> DrawnCard {
        let catalog = Catalog::builtin();
        let spread = catalog.spread("three_card_time").unwrap();
        DrawnCard {
            card: catalog.card("16").unwrap().clone(),
            is_reversed: reversed,
            position: spread.positions[0].clone(),
        }
    }

    #[test]
    fn test_drawn_card_line() {
        let line = drawn_card(&drawn(true));
        assert!(line.starts_with("Past: The Tower ("));
        assert!(line.ends_with("), reversed"));
    }

    #[test]
    fn test_keywords_follow_orientation() {
        let upright = drawn(false);
        assert_eq!(
            keywords(&upright),
            format!("upright keywords: {}", upright.card.upright_keywords.join(", "))
        );
        assert!(keywords(&drawn(true)).starts_with("reversed keywords: "));
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("sk-1234567890abcd"), "sk-...abcd");
        assert_eq!(mask_secret("short"), "*****");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hello…");
        assert_eq!(truncate("塔罗牌占卜", 2), "塔罗…");
    }

    #[test]
    fn test_timestamp_formats_date() {
        let formatted = timestamp(1_700_000_000_000);
        assert!(formatted.starts_with("2023-11-1"), "{}", formatted);
        assert_eq!(formatted.len(), "2023-11-14 22:13".len());
    }
}
