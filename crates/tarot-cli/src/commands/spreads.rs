//! `tarot spreads`

use tarot_core::Spread;

use super::Context;

pub fn run(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    for spread in ctx.catalog.spreads() {
        println!("{}", describe(spread));
    }
    Ok(())
}

/// Multi-line description of a spread and its positions.
pub fn describe(spread: &Spread) -> String {
    let mut out = format!(
        "{} - {} ({}, {} cards)\n  {}\n",
        spread.id, spread.english_name, spread.name, spread.card_count, spread.description
    );
    for position in &spread.positions {
        out.push_str(&format!(
            "  {:>2}. {} - {}\n",
            position.id, position.name, position.description
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use tarot_core::Catalog;

    use super::*;

    #[test]
    fn test_describe_lists_every_position() {
        let spread = Catalog::builtin().spread("celtic_cross").unwrap();
        let text = describe(spread);

        assert!(text.starts_with("celtic_cross - "));
        assert!(text.contains("10 cards"));
        assert_eq!(text.lines().count(), 2 + spread.positions.len());
        assert!(text.contains(" 1. "));
        assert!(text.contains("10. "));
    }
}
