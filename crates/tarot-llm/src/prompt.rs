//! Prompt construction.

use serde::Serialize;
use sha2::{Digest, Sha256};
use tarot_core::Reading;

use crate::api_types::ChatMessage;

/// Persona and interpretation guidelines sent with every reading.
pub const SYSTEM_PROMPT: &str = "\
You are an experienced, compassionate and insightful tarot reader.
Your task is to give a complete, in-depth reading based on the user's question, \
the spread they chose, and every card they drew, including its position in the \
spread, its name and whether it is upright or reversed.

Follow these guidelines:
1. **Read the cards together:** do not interpret each card in isolation. Weave \
all of the cards into one story and pay attention to how they influence each other.
2. **Respect the positions:** focus on what each card means in its specific \
position. Death in the \"Past\" position reads very differently from Death in the \
\"Future\" position.
3. **Use the orientation:** state clearly whether each card is upright or \
reversed and interpret it accordingly.
4. **Be compassionate:** keep the tone constructive, supportive and empathetic. \
Even with difficult cards such as The Tower or Death, offer positive guidance and \
a perspective of growth.
5. **Avoid fatalism:** never say \"you will certainly...\". Prefer guiding \
language such as \"this may suggest...\", \"this hints at...\" or \"consider...\".
6. **Stay within safe bounds:** never give specific medical, legal or financial \
investment advice. If the question touches these areas, steer the reading toward \
mindset and emotional insight and remind the user to consult a qualified professional.
7. **Be well structured:** end the reading with a short, clear summary and advice.";

#[derive(Debug, Serialize)]
struct CardSummary<'a> {
    position_name: &'a str,
    card_name: &'a str,
    orientation: &'static str,
}

#[derive(Debug, Serialize)]
struct CardsPayload<'a> {
    cards: Vec<CardSummary<'a>>,
}

/// Build the user prompt: question, spread name and a JSON summary of the
/// drawn cards.
pub fn build_user_prompt(reading: &Reading) -> String {
    let payload = CardsPayload {
        cards: reading
            .drawn_cards
            .iter()
            .map(|drawn| CardSummary {
                position_name: &drawn.position.name,
                card_name: &drawn.card.english_name,
                orientation: drawn.orientation().as_str(),
            })
            .collect(),
    };
    // Serializing plain strings cannot fail.
    let cards_json = serde_json::to_string_pretty(&payload).unwrap_or_default();

    format!(
        "Hello, tarot reader. I need your guidance.\n\n\
         [My question]\n{}\n\n\
         [The spread I chose]\n{}\n\n\
         [The cards I drew]\n{}\n\n\
         Based on all of the above, please give me a detailed reading and advice.",
        reading.question, reading.spread.english_name, cards_json
    )
}

/// System and user messages for a reading.
pub fn build_messages(system_prompt: &str, reading: &Reading) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_prompt),
        ChatMessage::user(build_user_prompt(reading)),
    ]
}

/// Compute a stable SHA-256 fingerprint for a prompt string.
pub fn hash_prompt(prompt: &str) -> String {
    let digest = Sha256::digest(prompt.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{:02x}", byte));
    }
    hex
}
