// Copyright 2024 The rust-absa Authors
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//     http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! # Aspect-based sentiment analysis pipeline
//! Analyzes a Polish restaurant review in five steps:
//! 1. the review is translated to English,
//! 2. aspects are extracted from the English sentence (BIO token classification),
//! 3. aspects are lower-cased, deduplicated and sorted,
//! 4. the sentiment towards each aspect is classified,
//! 5. each aspect is mapped back to a Polish category (alias table, or machine translation).
//!
//! Results sharing the same Polish category are merged, keeping the first one.
//!
//! ```no_run
//! use rust_absa::pipelines::absa::AbsaPipeline;
//! # fn main() -> anyhow::Result<()> {
//! let pipeline = AbsaPipeline::from_config(&Default::default())?;
//! let output = pipeline.analyze("Pizza była pyszna, ale kelner był nieuprzejmy.");
//! # Ok(())
//! # }
//! ```
//! Output: \
//! ```no_run
//! # let output =
//! "🧩 Jedzenie → **pozytywny**\n🧩 Obsługa → **negatywny**"
//! # ;
//! ```
//!
//! Any failure aborts the analysis: `analyze` then returns a single message starting with `Błąd`.
//! `predict` exposes the same analysis with a typed result. A panic raised inside one of the models
//! is caught and reported as `AbsaError::ModelPanic`, leaving the pipeline usable.

use crate::common::config::AbsaConfig;
use crate::common::error::AbsaError;
use crate::pipelines::aliases::AliasTable;
use crate::pipelines::aspect_extraction::{AspectExtractor, BertAspectExtractor};
use crate::pipelines::sentiment::{AspectSentiment, RobertaSentimentClassifier, SentimentClassifier};
use crate::pipelines::translation::{Direction, MarianTranslator, Translator};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::{BTreeSet, HashSet};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tch::Device;
use tracing::{debug, error, info};

/// Message returned when the review mentions no aspect
pub const NO_ASPECTS_MESSAGE: &str = "Nie wykryto żadnych aspektów.";

/// Prefix of the message returned when the analysis fails
pub const ERROR_PREFIX: &str = "Błąd";

/// # Sentiment towards one (localized) aspect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectResult {
    /// Polish aspect category, lower-cased
    pub aspect: String,
    pub sentiment: AspectSentiment,
}

impl AspectResult {
    /// Markdown line for the result, e.g. `🧩 Obsługa → **negatywny**`
    pub fn render(&self) -> String {
        format!("🧩 {} → **{}**", capitalize(&self.aspect), self.sentiment)
    }
}

/// # Outcome of a successful analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsaOutput {
    /// Deduplicated results, in sorted English aspect order
    Aspects(Vec<AspectResult>),
    /// No aspect was found in the review
    NoAspects,
}

impl AbsaOutput {
    pub fn aspects(&self) -> &[AspectResult] {
        match self {
            AbsaOutput::Aspects(results) => results.as_slice(),
            AbsaOutput::NoAspects => &[],
        }
    }

    /// Newline-separated markdown lines, or the "no aspects" message
    pub fn render(&self) -> String {
        match self {
            AbsaOutput::Aspects(results) => results
                .iter()
                .map(AspectResult::render)
                .collect::<Vec<_>>()
                .join("\n"),
            AbsaOutput::NoAspects => NO_ASPECTS_MESSAGE.to_string(),
        }
    }
}

/// Renders an analysis outcome for display, failures included.
pub fn render_outcome(outcome: &Result<AbsaOutput, AbsaError>) -> String {
    match outcome {
        Ok(output) => output.render(),
        Err(error) => format!("{ERROR_PREFIX}: {error}"),
    }
}

/// Uppercases the first character and lowercases the rest.
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// # Observer of the analysis progress, as a fraction in `[0, 1]`
pub trait ProgressObserver {
    fn report(&mut self, progress: f32);
}

impl<F> ProgressObserver for F
where
    F: FnMut(f32),
{
    fn report(&mut self, progress: f32) {
        self(progress)
    }
}

/// # ABSA pipeline holding the translation, extraction and classification models
pub struct AbsaPipeline {
    translator: Box<dyn Translator + Send>,
    extractor: Box<dyn AspectExtractor + Send>,
    classifier: Box<dyn SentimentClassifier + Send>,
    aliases: AliasTable,
}

impl AbsaPipeline {
    /// Assembles a pipeline from its collaborators.
    pub fn new<T, E, C>(translator: T, extractor: E, classifier: C, aliases: AliasTable) -> Self
    where
        T: Translator + Send + 'static,
        E: AspectExtractor + Send + 'static,
        C: SentimentClassifier + Send + 'static,
    {
        AbsaPipeline {
            translator: Box::new(translator),
            extractor: Box::new(extractor),
            classifier: Box::new(classifier),
            aliases,
        }
    }

    /// Loads the four models and the alias table described by `config`. Models are placed on
    /// the GPU when one is available.
    pub fn from_config(config: &AbsaConfig) -> Result<Self, AbsaError> {
        let device = Device::cuda_if_available();
        info!("Loading ABSA models on {:?}", device);

        let aliases = match &config.aliases {
            Some(path) => AliasTable::from_csv(path)?,
            None => AliasTable::restaurant(),
        };
        info!("Alias table with {} entries", aliases.len());

        let translator = MarianTranslator::new(
            &config.polish_to_english,
            &config.english_to_polish,
            device,
        )?;
        debug!("Translation models loaded");
        let extractor = BertAspectExtractor::new(&config.aspect_model, device)?;
        debug!("Aspect extraction model loaded");
        let classifier = RobertaSentimentClassifier::new(&config.sentiment_model, device)?;
        debug!("Sentiment classification model loaded");

        Ok(Self::new(translator, extractor, classifier, aliases))
    }

    /// Analyzes a review and renders the result (or the failure) as markdown.
    pub fn analyze(&self, review: &str) -> String {
        self.analyze_with_progress(review, &mut |_: f32| {})
    }

    pub fn analyze_with_progress(
        &self,
        review: &str,
        observer: &mut dyn ProgressObserver,
    ) -> String {
        render_outcome(&self.predict_with_progress(review, observer))
    }

    /// Analyzes a review.
    ///
    /// # Returns
    ///
    /// * `AbsaOutput` the per-aspect sentiments, or `NoAspects`
    pub fn predict(&self, review: &str) -> Result<AbsaOutput, AbsaError> {
        self.predict_with_progress(review, &mut |_: f32| {})
    }

    /// Analyzes a review, reporting progress: 0.0 at start, 0.3 once translated, then
    /// 0.4 to 1.0 across the aspects.
    pub fn predict_with_progress(
        &self,
        review: &str,
        observer: &mut dyn ProgressObserver,
    ) -> Result<AbsaOutput, AbsaError> {
        catch_unwind(AssertUnwindSafe(|| self.run(review, observer))).unwrap_or_else(|payload| {
            let message = panic_message(payload.as_ref());
            error!(%message, "Model panicked during analysis");
            Err(AbsaError::ModelPanic(message))
        })
    }

    fn run(
        &self,
        review: &str,
        observer: &mut dyn ProgressObserver,
    ) -> Result<AbsaOutput, AbsaError> {
        observer.report(0.0);
        if review.trim().is_empty() {
            observer.report(1.0);
            return Ok(AbsaOutput::NoAspects);
        }

        let sentence = self
            .translator
            .translate_one(review, Direction::PolishToEnglish)?;
        debug!(sentence = %sentence, "Translated review");
        observer.report(0.3);

        let aspects: BTreeSet<String> = self
            .extractor
            .extract_aspects(&sentence)?
            .into_iter()
            .map(|aspect| aspect.to_lowercase())
            .collect();
        debug!(?aspects, "Extracted aspects");
        if aspects.is_empty() {
            observer.report(1.0);
            return Ok(AbsaOutput::NoAspects);
        }

        let total = aspects.len();
        let mut seen = HashSet::new();
        let mut results = Vec::with_capacity(total);
        for (index, aspect) in aspects.iter().enumerate() {
            observer.report(0.4 + 0.6 * index as f32 / total as f32);
            let sentiment = self.classifier.sentiment(&sentence, aspect)?;
            let localized = self.localize(aspect)?;
            debug!(aspect = %aspect, localized = %localized, %sentiment, "Classified aspect");
            if seen.insert(localized.clone()) {
                results.push(AspectResult {
                    aspect: localized,
                    sentiment,
                });
            }
        }
        observer.report(1.0);
        info!(
            "Found {} aspects ({} after localization)",
            total,
            results.len()
        );
        Ok(AbsaOutput::Aspects(results))
    }

    /// Maps an English aspect to its Polish category, translating it when it has no alias.
    pub fn localize(&self, aspect: &str) -> Result<String, AbsaError> {
        match self.aliases.get(aspect) {
            Some(polish) => Ok(polish.to_string()),
            None => Ok(self
                .translator
                .translate_one(aspect, Direction::EnglishToPolish)?
                .to_lowercase()),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
