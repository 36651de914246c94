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

//! # Configuration of the ABSA service
//!
//! The configuration lists the resources (weights, model configuration, vocabularies) for the four
//! models of the pipeline, an optional alias table file and the server settings. It is stored as
//! JSON, for example:
//!
//! ```json
//! {
//!   "aspect_model": {
//!     "model": { "path": "/models/aspect/rust_model.ot" },
//!     "config": { "path": "/models/aspect/config.json" },
//!     "vocab": { "path": "/models/aspect/vocab.txt" }
//!   },
//!   "aliases": "/etc/rust-absa/aliases.csv",
//!   "server": { "bind": "0.0.0.0:7860" }
//! }
//! ```
//!
//! Omitted sections fall back to the defaults, pointing to the Hugging Face repositories of the
//! pretrained models.

use crate::common::error::AbsaError;
use rust_bert::resources::{LocalResource, RemoteResource, ResourceProvider};
use rust_bert::RustBertError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

const CONFIG_DIRECTORY: &str = "rust-absa";
const CONFIG_FILE: &str = "config.json";

/// # Location of a model resource
/// Either a local file or a remote file, downloaded and cached on first use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceLocation {
    /// Local file
    Local { path: PathBuf },
    /// Remote file, cached under `cache_subdir`
    Remote { url: String, cache_subdir: String },
}

impl ResourceLocation {
    /// Declares a resource hosted in a Hugging Face repository.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rust_absa::common::config::ResourceLocation;
    /// let vocab = ResourceLocation::hugging_face("Helsinki-NLP/opus-mt-pl-en", "vocab.json");
    /// ```
    pub fn hugging_face(repository: &str, file_name: &str) -> ResourceLocation {
        ResourceLocation::Remote {
            url: format!("https://huggingface.co/{repository}/resolve/main/{file_name}"),
            cache_subdir: repository.replace('/', "-"),
        }
    }
}

impl ResourceProvider for ResourceLocation {
    fn get_local_path(&self) -> Result<PathBuf, RustBertError> {
        match self {
            ResourceLocation::Local { path } => LocalResource {
                local_path: path.clone(),
            }
            .get_local_path(),
            ResourceLocation::Remote { url, cache_subdir } => {
                RemoteResource::new(url, cache_subdir).get_local_path()
            }
        }
    }
}

/// # Resources for a BERT-like classification model (token or sequence classification)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierResources {
    /// Model weights (e.g. rust_model.ot)
    pub model: ResourceLocation,
    /// Model configuration (config.json, including the label mapping)
    pub config: ResourceLocation,
    /// Tokenizer vocabulary (vocab.txt / vocab.json)
    pub vocab: ResourceLocation,
    /// BPE merges, only needed for RoBERTa tokenizers
    #[serde(default)]
    pub merges: Option<ResourceLocation>,
    /// Lower case input before tokenization (uncased models)
    #[serde(default)]
    pub lower_case: bool,
}

impl ClassifierResources {
    fn from_hugging_face(repository: &str, vocab_file: &str, with_merges: bool) -> Self {
        ClassifierResources {
            model: ResourceLocation::hugging_face(repository, "rust_model.ot"),
            config: ResourceLocation::hugging_face(repository, "config.json"),
            vocab: ResourceLocation::hugging_face(repository, vocab_file),
            merges: with_merges.then(|| ResourceLocation::hugging_face(repository, "merges.txt")),
            lower_case: false,
        }
    }
}

/// # Resources for a Marian translation model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslatorResources {
    /// Model weights
    pub model: ResourceLocation,
    /// Model configuration
    pub config: ResourceLocation,
    /// Vocabulary (vocab.json)
    pub vocab: ResourceLocation,
    /// SentencePiece model (source.spm)
    pub spm: ResourceLocation,
}

impl TranslatorResources {
    fn from_hugging_face(repository: &str) -> Self {
        TranslatorResources {
            model: ResourceLocation::hugging_face(repository, "rust_model.ot"),
            config: ResourceLocation::hugging_face(repository, "config.json"),
            vocab: ResourceLocation::hugging_face(repository, "vocab.json"),
            spm: ResourceLocation::hugging_face(repository, "source.spm"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the web form listens on
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "127.0.0.1:7860".to_string(),
        }
    }
}

/// # Configuration for the ABSA service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbsaConfig {
    /// BIO aspect tagger (BERT token classification)
    pub aspect_model: ClassifierResources,
    /// Aspect-conditioned sentiment classifier (RoBERTa sequence classification)
    pub sentiment_model: ClassifierResources,
    /// Marian PL→EN translator
    pub polish_to_english: TranslatorResources,
    /// Marian EN→PL translator, used for aspects missing from the alias table
    pub english_to_polish: TranslatorResources,
    /// CSV alias table (`english,polish`), replaces the embedded table when set
    pub aliases: Option<PathBuf>,
    pub server: ServerConfig,
}

impl Default for AbsaConfig {
    fn default() -> Self {
        AbsaConfig {
            aspect_model: ClassifierResources::from_hugging_face(
                "EfektMotyla/bert-aspect-ner",
                "vocab.txt",
                false,
            ),
            sentiment_model: ClassifierResources::from_hugging_face(
                "EfektMotyla/absa-roberta",
                "vocab.json",
                true,
            ),
            polish_to_english: TranslatorResources::from_hugging_face("Helsinki-NLP/opus-mt-pl-en"),
            english_to_polish: TranslatorResources::from_hugging_face("gsarti/opus-mt-tc-en-pl"),
            aliases: None,
            server: ServerConfig::default(),
        }
    }
}

impl AbsaConfig {
    /// Reads a JSON configuration file. Missing sections take their default value.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<AbsaConfig, AbsaError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            AbsaError::IOError(format!("could not open {}: {e}", path.display()))
        })?;
        let br = BufReader::new(f);
        let config: AbsaConfig = serde_json::from_reader(br)?;
        Ok(config)
    }

    /// Loads the configuration from `path` if provided, otherwise from the user configuration
    /// directory (`$XDG_CONFIG_HOME/rust-absa/config.json` or platform equivalent) if such a
    /// file exists, falling back to the defaults.
    pub fn load(path: Option<&Path>) -> Result<AbsaConfig, AbsaError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(path),
                _ => Ok(AbsaConfig::default()),
            },
        }
    }
}

/// Location of the user-level configuration file, if the platform defines a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut dir| {
        dir.push(CONFIG_DIRECTORY);
        dir.push(CONFIG_FILE);
        dir
    })
}
