//! # Dedicated thread running the ABSA pipeline
//! The torch-backed models are not `Sync`: the pipeline is built and owned by a single OS thread,
//! and requests are passed to it through a bounded channel. Each request carries a oneshot sender
//! for its result, so that async callers (the web server) can await it.
//!
//! ```no_run
//! use rust_absa::pipelines::absa::AbsaPipeline;
//! use rust_absa::pipelines::runner::AbsaRunner;
//! # async fn run() -> anyhow::Result<()> {
//! let (_handle, runner) = AbsaRunner::spawn(|| AbsaPipeline::from_config(&Default::default()))?;
//! let markdown = runner
//!     .analyze("Obsługa była bardzo miła.".to_string())
//!     .await;
//! # Ok(())
//! # }
//! ```

use crate::common::error::AbsaError;
use crate::pipelines::absa::{render_outcome, AbsaOutput, AbsaPipeline};
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use tokio::sync::oneshot;
use tokio::task;
use tracing::{info, trace, warn};

const CHANNEL_CAPACITY: usize = 100;

/// Message type for the runner channel: the review and the sender for its result
type Message = (String, oneshot::Sender<Result<AbsaOutput, AbsaError>>);

/// # Handle to the pipeline thread
#[derive(Debug, Clone)]
pub struct AbsaRunner {
    sender: mpsc::SyncSender<Message>,
}

impl AbsaRunner {
    /// Spawns the pipeline thread. `factory` builds the pipeline on that thread; this call
    /// returns once it completed, with its error if the pipeline could not be built.
    pub fn spawn<F>(factory: F) -> Result<(JoinHandle<()>, AbsaRunner), AbsaError>
    where
        F: FnOnce() -> Result<AbsaPipeline, AbsaError> + Send + 'static,
    {
        let (sender, receiver) = mpsc::sync_channel(CHANNEL_CAPACITY);
        let (ready_sender, ready_receiver) = mpsc::channel();
        let handle = thread::Builder::new()
            .name("absa-runner".to_string())
            .spawn(move || Self::runner(factory, receiver, ready_sender))?;

        ready_receiver.recv().map_err(|_| {
            AbsaError::RunnerError("pipeline thread exited during start-up".to_string())
        })??;
        Ok((handle, AbsaRunner { sender }))
    }

    fn runner<F>(
        factory: F,
        receiver: mpsc::Receiver<Message>,
        ready: mpsc::Sender<Result<(), AbsaError>>,
    ) where
        F: FnOnce() -> Result<AbsaPipeline, AbsaError>,
    {
        let pipeline = match factory() {
            Ok(pipeline) => {
                let _ = ready.send(Ok(()));
                pipeline
            }
            Err(error) => {
                let _ = ready.send(Err(error));
                return;
            }
        };
        info!("ABSA pipeline ready");

        while let Ok((review, sender)) = receiver.recv() {
            let outcome = pipeline.predict_with_progress(&review, &mut |progress: f32| {
                trace!(progress, "Analysis progress")
            });
            if sender.send(outcome).is_err() {
                warn!("Requester went away before the analysis completed");
            }
        }
        info!("ABSA pipeline stopped");
    }

    /// Analyzes a review on the pipeline thread. When the request queue is full, the request is
    /// handed over from the blocking thread pool, so any tokio runtime flavor can call this.
    pub async fn predict(&self, review: String) -> Result<AbsaOutput, AbsaError> {
        let (sender, receiver) = oneshot::channel();
        let not_running = || AbsaError::RunnerError("pipeline thread is not running".to_string());
        match self.sender.try_send((review, sender)) {
            Ok(()) => {}
            Err(mpsc::TrySendError::Full(message)) => {
                let queue = self.sender.clone();
                task::spawn_blocking(move || queue.send(message))
                    .await
                    .map_err(|error| AbsaError::RunnerError(error.to_string()))?
                    .map_err(|_| not_running())?;
            }
            Err(mpsc::TrySendError::Disconnected(_)) => return Err(not_running()),
        }
        receiver.await.map_err(|_| {
            AbsaError::RunnerError("pipeline thread dropped the request".to_string())
        })?
    }

    /// Analyzes a review on the pipeline thread and renders the outcome as markdown.
    pub async fn analyze(&self, review: String) -> String {
        render_outcome(&self.predict(review).await)
    }
}
