//! Demo content for local runs: one Greek vocabulary deck and one culture deck.

use chrono::{DateTime, Duration, Utc};
use learn_core::model::{
    CultureDraft, Deck, DeckId, DeckKind, ItemError, ItemId, ListItem, PartOfSpeech,
    VocabularyDraft,
};
use thiserror::Error;

use crate::repository::{Storage, StorageError};

pub const VOCABULARY_DECK_ID: DeckId = DeckId::new(1);
pub const CULTURE_DECK_ID: DeckId = DeckId::new(2);

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Deck(#[from] learn_core::model::DeckError),
    #[error(transparent)]
    Item(#[from] ItemError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// What `seed_demo_decks` wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub vocabulary_items: u32,
    pub culture_items: u32,
}

const WORDS: [(&str, &str, Option<PartOfSpeech>, &[&str]); 30] = [
    ("σπίτι", "house", Some(PartOfSpeech::Noun), &["house", "home"]),
    ("σπουδάζω", "to study", Some(PartOfSpeech::Verb), &["study"]),
    ("νερό", "water", Some(PartOfSpeech::Noun), &["water"]),
    ("ψωμί", "bread", Some(PartOfSpeech::Noun), &["bread"]),
    ("γάτα", "cat", Some(PartOfSpeech::Noun), &["cat"]),
    ("σκύλος", "dog", Some(PartOfSpeech::Noun), &["dog"]),
    ("βιβλίο", "book", Some(PartOfSpeech::Noun), &["book"]),
    ("θάλασσα", "sea", Some(PartOfSpeech::Noun), &["sea"]),
    ("ήλιος", "sun", Some(PartOfSpeech::Noun), &["sun"]),
    ("φίλος", "friend", Some(PartOfSpeech::Noun), &["friend"]),
    ("τρέχω", "to run", Some(PartOfSpeech::Verb), &["run"]),
    ("τρώω", "to eat", Some(PartOfSpeech::Verb), &["eat"]),
    ("πίνω", "to drink", Some(PartOfSpeech::Verb), &["drink"]),
    ("γράφω", "to write", Some(PartOfSpeech::Verb), &["write"]),
    ("διαβάζω", "to read", Some(PartOfSpeech::Verb), &["read"]),
    ("μιλάω", "to speak", Some(PartOfSpeech::Verb), &["speak", "talk"]),
    ("μεγάλος", "big", Some(PartOfSpeech::Adjective), &["big", "large"]),
    ("μικρός", "small", Some(PartOfSpeech::Adjective), &["small"]),
    ("καλός", "good", Some(PartOfSpeech::Adjective), &["good"]),
    ("ωραίος", "beautiful", Some(PartOfSpeech::Adjective), &["beautiful", "nice"]),
    ("γρήγορα", "quickly", Some(PartOfSpeech::Adverb), &["quickly"]),
    ("σήμερα", "today", Some(PartOfSpeech::Adverb), &["today"]),
    ("αύριο", "tomorrow", Some(PartOfSpeech::Adverb), &["tomorrow"]),
    ("εγώ", "I", Some(PartOfSpeech::Pronoun), &["I"]),
    ("εσύ", "you", Some(PartOfSpeech::Pronoun), &["you"]),
    ("με", "with", None, &[]),
    ("και", "and", None, &[]),
    ("αλλά", "but", None, &[]),
    ("καλημέρα", "good morning", None, &[]),
    ("ευχαριστώ", "thank you", None, &[]),
];

const QUESTIONS: [(&str, &[&str], usize, &str); 6] = [
    ("What is the capital of Greece?", &["Thessaloniki", "Athens", "Patras"], 1, "Geography"),
    ("Which day is Greek Independence Day?", &["25 March", "28 October", "15 August"], 0, "Holidays"),
    ("What is a kafeneio?", &["A bakery", "A traditional coffee house", "A church"], 1, "Daily life"),
    ("Which sea lies west of Greece?", &["Aegean", "Ionian", "Black Sea"], 1, "Geography"),
    ("What do people say on a name day?", &["Χρόνια πολλά", "Καληνύχτα", "Αντίο"], 0, "Customs"),
    ("Which mountain was home to the Olympian gods?", &["Parnassus", "Olympus", "Athos"], 1, "History"),
];

/// Write the demo decks and their items, replacing earlier seed rows with the same ids.
///
/// # Errors
///
/// Returns `SeedError` if validation or persistence fails.
pub async fn seed_demo_decks(
    storage: &Storage,
    now: DateTime<Utc>,
) -> Result<SeedReport, SeedError> {
    let vocabulary = Deck::new(VOCABULARY_DECK_ID, "Greek A1 · Vocabulary", DeckKind::Vocabulary, now)?;
    let culture = Deck::new(CULTURE_DECK_ID, "Greek A1 · Culture", DeckKind::Culture, now)?;
    storage.decks.upsert_deck(&vocabulary).await?;
    storage.decks.upsert_deck(&culture).await?;

    let mut vocabulary_items = 0u32;
    for (idx, (front, back, pos, translations)) in WORDS.iter().enumerate() {
        let draft = match pos {
            Some(pos) => VocabularyDraft::word(*front, *back, *pos)
                .with_translations(translations)
                .with_completeness(idx % 2 == 0, idx % 3 == 0, idx % 4 == 0),
            None => VocabularyDraft::legacy(*front, *back),
        };
        let created_at = now + Duration::minutes(i64::from(vocabulary_items));
        let entry = draft.validate(ItemId::new(u64::from(vocabulary_items) + 1), created_at)?;
        storage
            .items
            .upsert_item(vocabulary.id(), &ListItem::Vocabulary(entry))
            .await?;
        vocabulary_items += 1;
    }

    let mut culture_items = 0u32;
    for (question, options, correct, category) in QUESTIONS {
        let created_at = now + Duration::minutes(i64::from(culture_items));
        let entry = CultureDraft::new(question, options, correct)
            .with_category(category)
            .validate(ItemId::new(u64::from(culture_items) + 1), created_at)?;
        storage
            .items
            .upsert_item(culture.id(), &ListItem::Culture(entry))
            .await?;
        culture_items += 1;
    }

    Ok(SeedReport {
        vocabulary_items,
        culture_items,
    })
}
