//! `tarot read`: question, draw, and streamed interpretation.

use std::io::{self, Write};
use std::time::Duration;

use clap::Args;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tarot_core::{
    normalize, require_llm_config, Catalog, DrawSession, DrawnCard, Reading, Spread,
};
use tarot_llm::{fetch_default_config, AnalysisOutcome, LlmClient, LlmError, ReadingAnalyzer};
use tarot_store::{KeyValueStore, MemoryStore, ReadingSession};
use tracing::{debug, info};

use super::Context;
use crate::format;

#[derive(Debug, Args)]
pub struct ReadArgs {
    /// The question to ask the cards
    #[arg(short, long)]
    pub question: String,

    /// Spread id (see `tarot spreads`)
    #[arg(short, long)]
    pub spread: String,

    /// Order in which to reveal positions, e.g. 3,1,2. Unlisted positions
    /// follow in spread order.
    #[arg(long, value_delimiter = ',')]
    pub positions: Vec<u32>,

    /// Seed for a reproducible shuffle and orientations
    #[arg(long)]
    pub seed: Option<u64>,

    /// Pause while each card is revealed, in milliseconds
    #[arg(long, default_value_t = 600)]
    pub draw_delay_ms: u64,
}

pub async fn run(ctx: &Context, args: ReadArgs) -> Result<(), Box<dyn std::error::Error>> {
    let question = normalize(Some(args.question.as_str())).ok_or("Please enter a question first.")?;
    let spread = ctx.catalog.spread(&args.spread).ok_or_else(|| {
        format!(
            "Unknown spread '{}'. Run `tarot spreads` to see the options.",
            args.spread
        )
    })?;

    // Refuse to draw when there is nothing to interpret the cards with.
    let settings = ctx.settings().load()?;
    let defaults = fetch_default_config(&ctx.proxy_url).await;
    let resolved = require_llm_config(&settings, &defaults).map_err(|e| {
        format!(
            "{}\nRun `tarot settings set --base-url <URL> --api-key <KEY>` \
             or start tarot-proxy with a default configuration.",
            e
        )
    })?;
    info!(model = %resolved.model, via_proxy = resolved.uses_default(), "Resolved LLM configuration");

    let session = ReadingSession::new(MemoryStore::new());
    session.start(&question, &spread.id)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    println!("Question: {}", question);
    println!("Spread: {} ({})\n", spread.english_name, spread.name);

    let delay = Duration::from_millis(args.draw_delay_ms);
    let drawn = draw_spread(ctx.catalog, spread, &args.positions, &mut rng, delay, |drawn| {
        println!("  {}", format::drawn_card(drawn));
        println!("      {}", format::keywords(drawn));
    })
    .await?;
    session.save_drawn_cards(&drawn)?;
    println!();

    let reading = hand_off(&session, ctx.catalog)?;

    let client = LlmClient::from_resolved(&resolved, Some(&ctx.proxy_url))?;
    let history = ctx.history();
    let analyzer = ReadingAnalyzer::new(&client, &history);

    let mut stdout = io::stdout();
    let mut printed = 0;
    let outcome = analyzer
        .analyze(&reading, |text| {
            let _ = stdout.write_all(text[printed..].as_bytes());
            let _ = stdout.flush();
            printed = text.len();
        })
        .await;
    println!();

    if let Err(e) = session.clear() {
        debug!("Failed to clear reading session: {}", e);
    }

    if let Some(e) = outcome.error {
        eprintln!("\nThe interpretation failed: {}", e);
        eprintln!("{}", hint(&e));
        return Err(e.into());
    }

    println!("\n{}", saved_message(&outcome));
    Ok(())
}

/// What happened to a finished reading's history entry.
fn saved_message(outcome: &AnalysisOutcome) -> String {
    match &outcome.history_entry {
        Some(entry) => format!("Saved to history as {}", entry.id),
        None if outcome.text.trim().is_empty() => {
            "The interpretation came back empty, so nothing was saved to history.".to_string()
        }
        None => "The reading could not be saved to history.".to_string(),
    }
}

/// Positions in reveal order: the requested ones first, then the rest in
/// spread order.
pub fn reveal_order(spread: &Spread, requested: &[u32]) -> Vec<u32> {
    let mut order = requested.to_vec();
    order.extend(
        spread
            .positions
            .iter()
            .map(|position| position.id)
            .filter(|id| !requested.contains(id)),
    );
    order
}

/// Shuffle and draw every position of `spread`, pausing `delay` on each
/// reveal. Invalid or repeated requested positions are rejected by the
/// session.
pub async fn draw_spread<R, F>(
    catalog: &Catalog,
    spread: &Spread,
    requested: &[u32],
    rng: &mut R,
    delay: Duration,
    mut on_reveal: F,
) -> Result<Vec<DrawnCard>, Box<dyn std::error::Error>>
where
    R: Rng,
    F: FnMut(&DrawnCard),
{
    let mut session = DrawSession::new(catalog, spread, rng)?;

    for position_id in reveal_order(spread, requested) {
        let pending = session.begin_draw(position_id)?;
        debug!(position = %pending.position().name, "Revealing card");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        on_reveal(session.finish_draw(pending, rng));
    }

    Ok(session.into_drawn_cards())
}

/// Read the reading back from the session, as the analysis step does.
fn hand_off<S: KeyValueStore>(
    session: &ReadingSession<S>,
    catalog: &Catalog,
) -> Result<Reading, Box<dyn std::error::Error>> {
    session.completed(catalog).map_err(|e| {
        Box::<dyn std::error::Error>::from(format!(
            "The reading was lost ({}). Please start again with `tarot read`.",
            e
        ))
    })
}

fn hint(error: &LlmError) -> &'static str {
    if error.is_configuration() {
        "Check your settings with `tarot settings show` and `tarot settings test`."
    } else {
        "Check your network connection and try again, or run `tarot settings test`."
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use tarot_core::DrawRejected;

    use super::*;

    fn spread(id: &str) -> &'static Spread {
        Catalog::builtin().spread(id).unwrap()
    }

    #[test]
    fn test_reveal_order_appends_unlisted_positions() {
        assert_eq!(reveal_order(spread("three_card_time"), &[]), vec![1, 2, 3]);
        assert_eq!(reveal_order(spread("three_card_time"), &[3, 1, 2]), vec![3, 1, 2]);
        assert_eq!(reveal_order(spread("three_card_time"), &[2]), vec![2, 1, 3]);
    }

    #[tokio::test]
    async fn test_draw_spread_fills_every_position() {
        let spread = spread("celtic_cross");
        let mut rng = StdRng::seed_from_u64(3);
        let mut revealed = Vec::new();

        let drawn = draw_spread(
            Catalog::builtin(),
            spread,
            &[10, 1],
            &mut rng,
            Duration::ZERO,
            |card| revealed.push(card.position.id),
        )
        .await
        .unwrap();

        assert_eq!(drawn.len(), 10);
        assert_eq!(revealed[..2], [10, 1]);
        let ids: HashSet<_> = drawn.iter().map(|d| d.card.id.clone()).collect();
        assert_eq!(ids.len(), 10);
    }

    #[tokio::test]
    async fn test_draw_spread_rejects_unknown_position() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = draw_spread(
            Catalog::builtin(),
            spread("single_card"),
            &[4],
            &mut rng,
            Duration::ZERO,
            |_| {},
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<DrawRejected>(),
            Some(&DrawRejected::UnknownPosition(4))
        );
    }

    #[tokio::test]
    async fn test_draw_spread_rejects_repeated_position() {
        let mut rng = StdRng::seed_from_u64(3);
        let err = draw_spread(
            Catalog::builtin(),
            spread("three_card_time"),
            &[2, 2],
            &mut rng,
            Duration::ZERO,
            |_| {},
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.downcast_ref::<DrawRejected>(),
            Some(&DrawRejected::PositionFilled(2))
        );
    }

    #[tokio::test]
    async fn test_seeded_draws_repeat() {
        let spread = spread("three_card_time");
        let mut first_rng = StdRng::seed_from_u64(99);
        let mut second_rng = StdRng::seed_from_u64(99);

        let first = draw_spread(Catalog::builtin(), spread, &[], &mut first_rng, Duration::ZERO, |_| {})
            .await
            .unwrap();
        let second = draw_spread(Catalog::builtin(), spread, &[], &mut second_rng, Duration::ZERO, |_| {})
            .await
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_hand_off_roundtrip_and_missing_cards() {
        let catalog = Catalog::builtin();
        let session = ReadingSession::new(MemoryStore::new());
        session.start("Where to?", "single_card").unwrap();

        assert!(hand_off(&session, catalog).is_err());

        let spread = spread("single_card");
        let card = DrawnCard {
            card: catalog.card("0").unwrap().clone(),
            is_reversed: false,
            position: spread.positions[0].clone(),
        };
        session.save_drawn_cards(std::slice::from_ref(&card)).unwrap();

        let reading = hand_off(&session, catalog).unwrap();
        assert_eq!(reading.question, "Where to?");
        assert_eq!(reading.drawn_cards, vec![card]);
    }

    #[test]
    fn test_saved_message_distinguishes_empty_analysis() {
        let empty = AnalysisOutcome {
            text: "  ".into(),
            error: None,
            history_entry: None,
        };
        assert!(saved_message(&empty).contains("came back empty"));

        let unsaved = AnalysisOutcome {
            text: "The Fool leaps.".into(),
            error: None,
            history_entry: None,
        };
        assert_eq!(saved_message(&unsaved), "The reading could not be saved to history.");

        let history = tarot_store::HistoryStore::new(MemoryStore::new());
        let catalog = Catalog::builtin();
        let spread = spread("single_card");
        let entry = history
            .append(tarot_store::NewReading {
                question: "Where to?".into(),
                spread_name: spread.name.clone(),
                spread_id: spread.id.clone(),
                drawn_cards: vec![DrawnCard {
                    card: catalog.card("0").unwrap().clone(),
                    is_reversed: false,
                    position: spread.positions[0].clone(),
                }],
                analysis: "The Fool leaps.".into(),
            })
            .unwrap();
        let saved = AnalysisOutcome {
            text: "The Fool leaps.".into(),
            error: None,
            history_entry: Some(entry.clone()),
        };
        assert_eq!(saved_message(&saved), format!("Saved to history as {}", entry.id));
    }

    #[test]
    fn test_hint_depends_on_error_kind() {
        let unauthorized = LlmError::Status {
            status: 401,
            reason: "Unauthorized".into(),
            details: String::new(),
        };
        assert!(hint(&unauthorized).contains("settings show"));
        assert!(hint(&LlmError::IncompleteStream).contains("network"));
    }
}
