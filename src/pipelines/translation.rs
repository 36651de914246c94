//! # Polish ⇄ English machine translation
//! The pipeline translates whole reviews from Polish to English, and aspects missing from the
//! alias table from English to Polish. Both directions go through the `Translator` trait;
//! `MarianTranslator` implements it with two Marian models.

use crate::common::config::TranslatorResources;
use crate::common::error::AbsaError;
use rust_bert::pipelines::common::ModelType;
use rust_bert::pipelines::translation::{Language, TranslationConfig, TranslationModel};
use tch::Device;

/// # Translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    PolishToEnglish,
    EnglishToPolish,
}

impl Direction {
    pub fn source_language(&self) -> Language {
        match self {
            Direction::PolishToEnglish => Language::Polish,
            Direction::EnglishToPolish => Language::English,
        }
    }

    pub fn target_language(&self) -> Language {
        match self {
            Direction::PolishToEnglish => Language::English,
            Direction::EnglishToPolish => Language::Polish,
        }
    }
}

/// # Batch translator
pub trait Translator {
    /// Translates `texts` in the given direction. The output has one entry per input, in the same
    /// order.
    fn translate(&self, texts: &[&str], direction: Direction) -> Result<Vec<String>, AbsaError>;

    /// Translates a single text.
    fn translate_one(&self, text: &str, direction: Direction) -> Result<String, AbsaError> {
        self.translate(&[text], direction)?
            .into_iter()
            .next()
            .ok_or_else(|| AbsaError::TranslationError("empty translation output".to_string()))
    }
}

/// # Pair of Marian models (PL→EN and EN→PL)
pub struct MarianTranslator {
    polish_to_english: TranslationModel,
    english_to_polish: TranslationModel,
}

impl MarianTranslator {
    pub fn new(
        polish_to_english: &TranslatorResources,
        english_to_polish: &TranslatorResources,
        device: Device,
    ) -> Result<Self, AbsaError> {
        Ok(MarianTranslator {
            polish_to_english: Self::load(polish_to_english, Direction::PolishToEnglish, device)?,
            english_to_polish: Self::load(english_to_polish, Direction::EnglishToPolish, device)?,
        })
    }

    fn load(
        resources: &TranslatorResources,
        direction: Direction,
        device: Device,
    ) -> Result<TranslationModel, AbsaError> {
        let config = TranslationConfig::new(
            ModelType::Marian,
            resources.model.clone(),
            resources.config.clone(),
            resources.vocab.clone(),
            Some(resources.spm.clone()),
            [direction.source_language()],
            [direction.target_language()],
            device,
        );
        Ok(TranslationModel::new(config)?)
    }
}

impl Translator for MarianTranslator {
    fn translate(&self, texts: &[&str], direction: Direction) -> Result<Vec<String>, AbsaError> {
        let model = match direction {
            Direction::PolishToEnglish => &self.polish_to_english,
            Direction::EnglishToPolish => &self.english_to_polish,
        };
        let outputs = model
            .translate(
                texts,
                direction.source_language(),
                direction.target_language(),
            )
            .map_err(|e| AbsaError::TranslationError(e.to_string()))?;
        if outputs.len() != texts.len() {
            return Err(AbsaError::TranslationError(format!(
                "expected {} translations, got {}",
                texts.len(),
                outputs.len()
            )));
        }
        // Marian outputs start with the decoded word-boundary marker
        Ok(outputs
            .into_iter()
            .map(|output| output.trim().to_string())
            .collect())
    }
}
