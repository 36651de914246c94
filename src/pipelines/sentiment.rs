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

//! # Aspect-conditioned sentiment classification
//! The sentiment towards one aspect is predicted by a sequence classification model fed with the
//! sentence and the aspect joined by a `[SEP]` sentinel:
//!
//! ```
//! use rust_absa::pipelines::sentiment::aspect_input;
//!
//! assert_eq!(
//!     aspect_input("The pizza was great", "pizza"),
//!     "The pizza was great [SEP] pizza"
//! );
//! ```
//!
//! The model predicts one of four classes, mapped to an `AspectSentiment`.

use crate::common::config::ClassifierResources;
use crate::common::error::AbsaError;
use rust_bert::pipelines::common::ModelType;
use rust_bert::pipelines::sequence_classification::{
    SequenceClassificationConfig, SequenceClassificationModel,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use tch::Device;

/// Sentinel separating the sentence from the aspect in the classifier input
pub const ASPECT_SEPARATOR: &str = "[SEP]";

/// # Sentiment expressed towards an aspect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectSentiment {
    Negative,
    Neutral,
    Positive,
    /// Both positive and negative opinions
    Conflict,
}

impl AspectSentiment {
    /// Maps a classifier class id (`0..=3`) to a sentiment.
    pub fn from_class_id(class_id: i64) -> Result<AspectSentiment, AbsaError> {
        match class_id {
            0 => Ok(AspectSentiment::Negative),
            1 => Ok(AspectSentiment::Neutral),
            2 => Ok(AspectSentiment::Positive),
            3 => Ok(AspectSentiment::Conflict),
            _ => Err(AbsaError::ClassificationError(format!(
                "unexpected sentiment class id {class_id}"
            ))),
        }
    }

    /// Polish display label
    pub fn polish_label(&self) -> &'static str {
        match self {
            AspectSentiment::Negative => "negatywny",
            AspectSentiment::Neutral => "neutralny",
            AspectSentiment::Positive => "pozytywny",
            AspectSentiment::Conflict => "konfliktowy",
        }
    }
}

impl Display for AspectSentiment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.polish_label())
    }
}

/// Builds the classifier input for an aspect of a sentence.
pub fn aspect_input(sentence: &str, aspect: &str) -> String {
    format!("{sentence} {ASPECT_SEPARATOR} {aspect}")
}

/// # Classifier predicting the sentiment class of an aspect within a sentence
pub trait SentimentClassifier {
    /// Returns the predicted class id for `aspect` in `sentence`.
    fn classify(&self, sentence: &str, aspect: &str) -> Result<i64, AbsaError>;

    /// Classifies and maps the class id to an `AspectSentiment`.
    fn sentiment(&self, sentence: &str, aspect: &str) -> Result<AspectSentiment, AbsaError> {
        AspectSentiment::from_class_id(self.classify(sentence, aspect)?)
    }
}

/// # RoBERTa sequence classification model for aspect sentiment
pub struct RobertaSentimentClassifier {
    model: SequenceClassificationModel,
}

impl RobertaSentimentClassifier {
    pub fn new(resources: &ClassifierResources, device: Device) -> Result<Self, AbsaError> {
        let mut config = SequenceClassificationConfig::new(
            ModelType::Roberta,
            resources.model.clone(),
            resources.config.clone(),
            resources.vocab.clone(),
            resources.merges.clone(),
            resources.lower_case,
            None,
            None,
        );
        config.device = device;
        let model = SequenceClassificationModel::new(config)?;
        Ok(RobertaSentimentClassifier { model })
    }
}

impl SentimentClassifier for RobertaSentimentClassifier {
    fn classify(&self, sentence: &str, aspect: &str) -> Result<i64, AbsaError> {
        let input = aspect_input(sentence, aspect);
        self.model
            .predict(&[input.as_str()])
            .first()
            .map(|label| label.id)
            .ok_or_else(|| {
                AbsaError::ClassificationError(format!("no prediction for aspect \"{aspect}\""))
            })
    }
}
