//! # Aspect-based sentiment analysis of Polish restaurant reviews
//!
//! Detects the aspects a review talks about (food, service, prices...) and the sentiment
//! expressed towards each of them. The analysis runs on English: the review is machine-translated,
//! aspects are tagged by a BERT token classifier, their sentiment predicted by a RoBERTa
//! classifier, and the aspects mapped back to Polish categories. Models run on
//! [rust-bert](https://github.com/guillaume-be/rust-bert) pipelines (libtorch backend).
//!
//! ```no_run
//! use rust_absa::pipelines::absa::AbsaPipeline;
//! use rust_absa::AbsaConfig;
//! # fn main() -> anyhow::Result<()> {
//! let pipeline = AbsaPipeline::from_config(&AbsaConfig::default())?;
//! let output = pipeline.predict("Pizza była pyszna, ale kelner był nieuprzejmy.")?;
//! for result in output.aspects() {
//!     println!("{}: {}", result.aspect, result.sentiment);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Output: \
//! ```no_run
//! # let output =
//! "jedzenie: pozytywny
//! obsługa: negatywny"
//! # ;
//! ```
//!
//! The pipeline is also served as a web form by the `absa-server` binary (see the `server`
//! module).
//!
//! ## Loading pretrained models
//! Resources (weights, configuration and vocabulary files) are listed in an `AbsaConfig`. Remote
//! resources are downloaded on first use and cached by rust-bert (`~/.cache/.rustbert` or
//! `RUSTBERT_CACHE`). Weights must be in the libtorch `.ot` format; PyTorch checkpoints can be
//! converted with rust-bert's `utils/convert_model.py`.

pub mod common;
pub mod pipelines;
pub mod server;

pub use common::config::AbsaConfig;
pub use common::error::AbsaError;
