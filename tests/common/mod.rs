#![allow(dead_code)]

use rust_absa::pipelines::absa::AbsaPipeline;
use rust_absa::pipelines::aliases::AliasTable;
use rust_absa::pipelines::aspect_extraction::{AspectExtractor, AspectLabel, LabeledToken};
use rust_absa::pipelines::sentiment::SentimentClassifier;
use rust_absa::pipelines::translation::{Direction, Translator};
use rust_absa::AbsaError;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const REVIEW: &str = "Pizza była pyszna, ale kelner był nieuprzejmy.";
pub const REVIEW_EN: &str = "The pizza was delicious, but the waiter was rude.";

/// Translator answering from a fixed phrase book, failing on unknown Polish input
#[derive(Default)]
pub struct PhraseBookTranslator {
    polish_to_english: HashMap<String, String>,
    english_to_polish: HashMap<String, String>,
    pub calls: Arc<AtomicUsize>,
}

impl PhraseBookTranslator {
    pub fn with_review(mut self, polish: &str, english: &str) -> Self {
        self.polish_to_english
            .insert(polish.to_string(), english.to_string());
        self
    }

    pub fn with_aspect(mut self, english: &str, polish: &str) -> Self {
        self.english_to_polish
            .insert(english.to_string(), polish.to_string());
        self
    }
}

impl Translator for PhraseBookTranslator {
    fn translate(&self, texts: &[&str], direction: Direction) -> Result<Vec<String>, AbsaError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let book = match direction {
            Direction::PolishToEnglish => &self.polish_to_english,
            Direction::EnglishToPolish => &self.english_to_polish,
        };
        texts
            .iter()
            .map(|text| {
                book.get(*text).cloned().ok_or_else(|| {
                    AbsaError::TranslationError(format!("cannot translate \"{text}\""))
                })
            })
            .collect()
    }
}

/// Translator failing on every call
pub struct UnavailableTranslator;

impl Translator for UnavailableTranslator {
    fn translate(&self, _: &[&str], _: Direction) -> Result<Vec<String>, AbsaError> {
        Err(AbsaError::TranslationError(
            "translation model unavailable".to_string(),
        ))
    }
}

/// Tags whitespace-separated words: words from `begin` get `B-ASP`, words from `inside` get
/// `I-ASP`, others `O`. Punctuation is stripped from the words.
pub struct KeywordExtractor {
    begin: Vec<String>,
    inside: Vec<String>,
}

impl KeywordExtractor {
    pub fn new(begin: &[&str], inside: &[&str]) -> Self {
        KeywordExtractor {
            begin: begin.iter().map(|word| word.to_string()).collect(),
            inside: inside.iter().map(|word| word.to_string()).collect(),
        }
    }
}

impl AspectExtractor for KeywordExtractor {
    fn extract_labels(&self, sentence: &str) -> Result<Vec<LabeledToken>, AbsaError> {
        Ok(sentence
            .split_whitespace()
            .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
            .map(|word| {
                let key = word.to_lowercase();
                let label = if self.begin.contains(&key) {
                    AspectLabel::Begin
                } else if self.inside.contains(&key) {
                    AspectLabel::Inside
                } else {
                    AspectLabel::Outside
                };
                LabeledToken::new(word, label)
            })
            .collect())
    }
}

/// Extractor failing on every call
pub struct BrokenExtractor;

impl AspectExtractor for BrokenExtractor {
    fn extract_labels(&self, _: &str) -> Result<Vec<LabeledToken>, AbsaError> {
        Err(AbsaError::ExtractionError("tokenizer failure".to_string()))
    }
}

/// Returns a fixed class id per aspect, neutral (1) by default
#[derive(Default)]
pub struct LexiconClassifier {
    classes: HashMap<String, i64>,
    pub inputs: Arc<std::sync::Mutex<Vec<(String, String)>>>,
}

impl LexiconClassifier {
    pub fn with(mut self, aspect: &str, class_id: i64) -> Self {
        self.classes.insert(aspect.to_string(), class_id);
        self
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn classify(&self, sentence: &str, aspect: &str) -> Result<i64, AbsaError> {
        self.inputs
            .lock()
            .unwrap()
            .push((sentence.to_string(), aspect.to_string()));
        Ok(*self.classes.get(aspect).unwrap_or(&1))
    }
}

/// Panics when the sentence mentions `trigger`, answers positive (2) otherwise
pub struct PanickingClassifier {
    pub trigger: &'static str,
}

impl SentimentClassifier for PanickingClassifier {
    fn classify(&self, sentence: &str, _: &str) -> Result<i64, AbsaError> {
        if sentence.contains(self.trigger) {
            panic!("index out of range for the label map");
        }
        Ok(2)
    }
}

/// Pipeline over fakes, understanding the pizza/waiter review
pub fn restaurant_pipeline() -> AbsaPipeline {
    AbsaPipeline::new(
        PhraseBookTranslator::default().with_review(REVIEW, REVIEW_EN),
        KeywordExtractor::new(&["pizza", "waiter"], &[]),
        LexiconClassifier::default()
            .with("pizza", 2)
            .with("waiter", 0),
        AliasTable::restaurant(),
    )
}

pub const FOOD_REVIEW: &str = "Jedzenie było świetne.";
pub const FOOD_REVIEW_EN: &str = "The food was great.";

/// Pipeline whose classifier panics on the pizza/waiter review and works on `FOOD_REVIEW`
pub fn panicking_pipeline() -> AbsaPipeline {
    AbsaPipeline::new(
        PhraseBookTranslator::default()
            .with_review(REVIEW, REVIEW_EN)
            .with_review(FOOD_REVIEW, FOOD_REVIEW_EN),
        KeywordExtractor::new(&["pizza", "waiter", "food"], &[]),
        PanickingClassifier { trigger: "rude" },
        AliasTable::restaurant(),
    )
}
