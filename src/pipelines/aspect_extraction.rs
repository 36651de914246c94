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

//! # Aspect extraction from BIO token labels
//! A token classification model tags every sub-word of an English sentence with `B-ASP` (first
//! token of an aspect), `I-ASP` (continuation of an aspect) or `O`. Contiguous tagged tokens are
//! aggregated into aspect phrases:
//!
//! ```
//! use rust_absa::pipelines::aspect_extraction::{aggregate_aspects, AspectLabel, LabeledToken};
//!
//! let tokens = [
//!     LabeledToken::new("The", AspectLabel::Outside),
//!     LabeledToken::new("wine", AspectLabel::Begin),
//!     LabeledToken::new("list", AspectLabel::Inside),
//!     LabeledToken::new("was", AspectLabel::Outside),
//!     LabeledToken::new("short", AspectLabel::Outside),
//! ];
//! let aspects = aggregate_aspects(&tokens);
//! assert!(aspects.contains("wine list"));
//! ```
//!
//! An `I-ASP` token that does not follow an aspect token is dropped: aspects always start with
//! `B-ASP`.

use crate::common::error::AbsaError;
use crate::common::config::ClassifierResources;
use rust_bert::pipelines::common::ModelType;
use rust_bert::pipelines::token_classification::{
    LabelAggregationOption, Token, TokenClassificationConfig, TokenClassificationModel,
};
use rust_tokenizers::Mask;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tch::Device;

/// # BIO label of a token with respect to aspects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectLabel {
    /// `O`: not part of an aspect
    Outside,
    /// `B-ASP`: first token of an aspect
    Begin,
    /// `I-ASP`: continuation of an aspect
    Inside,
}

impl AspectLabel {
    /// Maps a model label to an `AspectLabel`. Labels other than `B-ASP` and `I-ASP` map to
    /// `Outside`.
    pub fn from_label(label: &str) -> AspectLabel {
        match label {
            "B-ASP" => AspectLabel::Begin,
            "I-ASP" => AspectLabel::Inside,
            _ => AspectLabel::Outside,
        }
    }
}

/// # Token of an English sentence with its aspect label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledToken {
    /// Surface text of the token
    pub text: String,
    /// BIO label
    pub label: AspectLabel,
    /// The token continues the previous word (sub-word fragment) and is glued to it
    pub continuation: bool,
}

impl LabeledToken {
    pub fn new(text: impl Into<String>, label: AspectLabel) -> LabeledToken {
        LabeledToken {
            text: text.into(),
            label,
            continuation: false,
        }
    }

    /// Sub-word fragment continuing the previous token
    pub fn continuation(text: impl Into<String>, label: AspectLabel) -> LabeledToken {
        LabeledToken {
            text: text.into(),
            label,
            continuation: true,
        }
    }
}

impl From<Token> for LabeledToken {
    fn from(token: Token) -> Self {
        LabeledToken {
            label: AspectLabel::from_label(token.label.as_str()),
            continuation: token.mask == Mask::Continuation,
            text: token.text,
        }
    }
}

/// Rebuilds a phrase from its tokens: sub-word continuations are glued to the preceding token,
/// other tokens are separated by a single space.
fn join_tokens(tokens: &[&LabeledToken]) -> String {
    let mut phrase = String::new();
    for (position, token) in tokens.iter().enumerate() {
        if position > 0 && !token.continuation {
            phrase.push(' ');
        }
        phrase.push_str(token.text.as_str());
    }
    phrase.trim().to_string()
}

/// Aggregates BIO-labelled tokens into the set of aspect phrases.
///
/// # Arguments
///
/// * `tokens` - tokens of a sentence, in order, with their labels
///
/// # Returns
///
/// * `BTreeSet<String>` distinct, non-empty aspect phrases (case-sensitive)
pub fn aggregate_aspects(tokens: &[LabeledToken]) -> BTreeSet<String> {
    let mut aspects = BTreeSet::new();
    let mut current: Vec<&LabeledToken> = vec![];

    let mut flush = |current: &mut Vec<&LabeledToken>| {
        if !current.is_empty() {
            let phrase = join_tokens(current);
            if !phrase.is_empty() {
                aspects.insert(phrase);
            }
            current.clear();
        }
    };

    for token in tokens {
        match token.label {
            AspectLabel::Begin => {
                flush(&mut current);
                current.push(token);
            }
            AspectLabel::Inside if !current.is_empty() => current.push(token),
            _ => flush(&mut current),
        }
    }
    flush(&mut current);
    aspects
}

/// # Source of BIO aspect labels for an English sentence
pub trait AspectExtractor {
    /// Tags the tokens of `sentence`, in order.
    fn extract_labels(&self, sentence: &str) -> Result<Vec<LabeledToken>, AbsaError>;

    /// Extracts the set of aspect phrases mentioned in `sentence`.
    fn extract_aspects(&self, sentence: &str) -> Result<BTreeSet<String>, AbsaError> {
        let tokens = self.extract_labels(sentence)?;
        Ok(aggregate_aspects(&tokens))
    }
}

/// # BERT token classification model tagging aspects
pub struct BertAspectExtractor {
    model: TokenClassificationModel,
}

impl BertAspectExtractor {
    /// Loads the token classification model. Sub-tokens are kept separate so that labels can be
    /// aggregated at the sub-word level.
    pub fn new(resources: &ClassifierResources, device: Device) -> Result<Self, AbsaError> {
        let mut config = TokenClassificationConfig::new(
            ModelType::Bert,
            resources.model.clone(),
            resources.config.clone(),
            resources.vocab.clone(),
            resources.merges.clone(),
            resources.lower_case,
            None,
            None,
            LabelAggregationOption::First,
        );
        config.device = device;
        let model = TokenClassificationModel::new(config)?;
        Ok(BertAspectExtractor { model })
    }
}

impl AspectExtractor for BertAspectExtractor {
    fn extract_labels(&self, sentence: &str) -> Result<Vec<LabeledToken>, AbsaError> {
        let tokens = self
            .model
            .predict(&[sentence], false, false)
            .into_iter()
            .next()
            .ok_or_else(|| {
                AbsaError::ExtractionError("no output for the input sentence".to_string())
            })?;

        Ok(tokens.into_iter().map(LabeledToken::from).collect())
    }
}
