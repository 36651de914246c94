//! # Aspect-based sentiment analysis pipelines
//!
//! The analysis of a review chains four models, each behind a trait so that it can be swapped:
//!
//! #### 1. Translation
//! `translation::Translator`, implemented by `MarianTranslator` (Marian PL→EN and EN→PL models).
//!
//! #### 2. Aspect extraction
//! `aspect_extraction::AspectExtractor`, implemented by `BertAspectExtractor` (BERT token
//! classification with `B-ASP` / `I-ASP` / `O` labels). The labels are aggregated into aspect
//! phrases by `aspect_extraction::aggregate_aspects`.
//!
//! #### 3. Sentiment classification
//! `sentiment::SentimentClassifier`, implemented by `RobertaSentimentClassifier` (RoBERTa
//! sequence classification over `"<sentence> [SEP] <aspect>"`, four classes).
//!
//! #### 4. Localization
//! `aliases::AliasTable` maps English aspects to Polish categories, with translation as a fallback.
//!
//! `absa::AbsaPipeline` orchestrates the steps. `runner::AbsaRunner` owns a pipeline on a dedicated
//! thread for use from async code.
//!
//! ```
//! use rust_absa::pipelines::absa::AbsaPipeline;
//! use rust_absa::pipelines::aliases::AliasTable;
//! use rust_absa::pipelines::aspect_extraction::{AspectExtractor, AspectLabel, LabeledToken};
//! use rust_absa::pipelines::sentiment::SentimentClassifier;
//! use rust_absa::pipelines::translation::{Direction, Translator};
//! use rust_absa::AbsaError;
//!
//! struct Identity;
//! impl Translator for Identity {
//!     fn translate(&self, texts: &[&str], _: Direction) -> Result<Vec<String>, AbsaError> {
//!         Ok(texts.iter().map(|text| text.to_string()).collect())
//!     }
//! }
//!
//! struct FirstWord;
//! impl AspectExtractor for FirstWord {
//!     fn extract_labels(&self, sentence: &str) -> Result<Vec<LabeledToken>, AbsaError> {
//!         Ok(sentence
//!             .split_whitespace()
//!             .enumerate()
//!             .map(|(i, word)| {
//!                 let label = if i == 0 { AspectLabel::Begin } else { AspectLabel::Outside };
//!                 LabeledToken::new(word, label)
//!             })
//!             .collect())
//!     }
//! }
//!
//! struct AlwaysPositive;
//! impl SentimentClassifier for AlwaysPositive {
//!     fn classify(&self, _: &str, _: &str) -> Result<i64, AbsaError> {
//!         Ok(2)
//!     }
//! }
//!
//! let pipeline = AbsaPipeline::new(Identity, FirstWord, AlwaysPositive, AliasTable::restaurant());
//! assert_eq!(pipeline.analyze("Service was quick"), "🧩 Obsługa → **pozytywny**");
//! ```

pub mod absa;
pub mod aliases;
pub mod aspect_extraction;
pub mod runner;
pub mod sentiment;
pub mod translation;
