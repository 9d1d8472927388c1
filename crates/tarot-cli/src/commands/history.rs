//! `tarot history`

use clap::Subcommand;
use tarot_store::ReadingHistoryEntry;

use super::Context;
use crate::format;

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List saved readings, newest first
    List,

    /// Show one reading in full
    Show { id: String },

    /// Delete one reading
    Delete { id: String },

    /// Delete every saved reading
    Clear,
}

pub fn run(ctx: &Context, command: HistoryCommand) -> Result<(), Box<dyn std::error::Error>> {
    let history = ctx.history();

    match command {
        HistoryCommand::List => {
            let entries = history.list();
            if entries.is_empty() {
                println!("No readings yet. Start one with `tarot read`.");
            }
            for entry in &entries {
                println!("{}", summary(entry));
            }
        }
        HistoryCommand::Show { id } => {
            let entry = history
                .get(&id)
                .ok_or_else(|| format!("No reading with id {}", id))?;
            println!("{}", details(&entry));
        }
        HistoryCommand::Delete { id } => {
            if history.delete(&id)? {
                println!("Deleted {}", id);
            } else {
                println!("No reading with id {}", id);
            }
        }
        HistoryCommand::Clear => {
            history.clear()?;
            println!("Cleared reading history.");
        }
    }
    Ok(())
}

/// One line per reading for `history list`.
fn summary(entry: &ReadingHistoryEntry) -> String {
    format!(
        "{}  {}  {}  {}",
        entry.id,
        format::timestamp(entry.timestamp),
        entry.spread_name,
        format::truncate(&entry.question, 40)
    )
}

/// Full reading for `history show`.
fn details(entry: &ReadingHistoryEntry) -> String {
    let mut out = format!(
        "{}\nDate: {}\nQuestion: {}\nSpread: {}\n\nCards:\n",
        entry.id,
        format::timestamp(entry.timestamp),
        entry.question,
        entry.spread_name
    );
    for drawn in &entry.drawn_cards {
        out.push_str(&format!("  {}\n", format::drawn_card(drawn)));
    }
    out.push_str(&format!("\nInterpretation:\n{}", entry.analysis));
    out
}

#[cfg(test)]
mod tests {
    use tarot_core::{Catalog, DrawnCard};
    use tarot_store::NewReading;

    use super::*;
    use crate::commands::tests::scratch_context;

    fn save(ctx: &Context, question: &str) -> ReadingHistoryEntry {
        let catalog = Catalog::builtin();
        let spread = catalog.spread("single_card").unwrap();
        ctx.history()
            .append(NewReading {
                question: question.to_string(),
                spread_name: spread.name.clone(),
                spread_id: spread.id.clone(),
                drawn_cards: vec![DrawnCard {
                    card: catalog.card("0").unwrap().clone(),
                    is_reversed: true,
                    position: spread.positions[0].clone(),
                }],
                analysis: "A leap of faith.".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_details_include_cards_and_analysis() {
        let (ctx, dir) = scratch_context();
        let entry = save(&ctx, "Should I jump?");

        let text = details(&entry);
        assert!(text.contains("Question: Should I jump?"));
        assert!(text.contains("Present: The Fool ("));
        assert!(text.contains("reversed"));
        assert!(text.ends_with("A leap of faith."));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_delete_and_clear_commands() {
        let (ctx, dir) = scratch_context();
        let first = save(&ctx, "first");
        save(&ctx, "second");

        run(&ctx, HistoryCommand::Delete { id: first.id.clone() }).unwrap();
        assert!(ctx.history().get(&first.id).is_none());
        assert_eq!(ctx.history().list().len(), 1);

        run(&ctx, HistoryCommand::Delete { id: "missing".into() }).unwrap();
        assert_eq!(ctx.history().list().len(), 1);

        run(&ctx, HistoryCommand::Clear).unwrap();
        assert!(ctx.history().list().is_empty());

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_show_missing_id_fails() {
        let (ctx, dir) = scratch_context();
        assert!(run(&ctx, HistoryCommand::Show { id: "nope".into() }).is_err());
        std::fs::remove_dir_all(dir).unwrap();
    }
}
