//! The request lifecycle: `Idle → Loading → Success | Failure`, with any new
//! submit moving back to `Loading`. Every submit mints a fresh token and only
//! the holder of the latest token may commit a result ("last submit wins").
//! Superseded exchanges still run to completion; their results are dropped.

use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::{GenerationError, USER_FACING_ERROR};
use crate::models::{GenerationOutcome, GenerationRequest, ProductDescription, PublishedState, RequestToken};
use crate::pipeline::GenerationPipeline;
use crate::slug::{image_seed, ImageUrlProvider, INITIAL_IMAGE_SEED};

/// Handle for one submit. Dropping `task` leaves the exchange running.
#[derive(Debug)]
pub struct Submission {
    pub token: RequestToken,
    /// `None` when the input was rejected before any exchange started.
    pub task: Option<JoinHandle<()>>,
}

pub struct RequestController {
    pipeline: GenerationPipeline,
    images: Arc<dyn ImageUrlProvider>,
    state: Mutex<PublishedState>,
    updates: watch::Sender<PublishedState>,
}

impl RequestController {
    pub fn new(pipeline: GenerationPipeline, images: Arc<dyn ImageUrlProvider>) -> Arc<Self> {
        let initial = PublishedState {
            token: None,
            outcome: GenerationOutcome::Idle,
            image_url: images.url_for(INITIAL_IMAGE_SEED),
            updated_at: Utc::now(),
        };
        let (updates, _) = watch::channel(initial.clone());
        Arc::new(Self { pipeline, images, state: Mutex::new(initial), updates })
    }

    pub fn current(&self) -> PublishedState {
        self.state.lock().clone()
    }

    pub fn outcome(&self) -> GenerationOutcome {
        self.state.lock().outcome.clone()
    }

    /// Receives every published state; readers never write back.
    pub fn subscribe(&self) -> watch::Receiver<PublishedState> {
        self.updates.subscribe()
    }

    /// Must be called from within a tokio runtime.
    pub fn submit(self: &Arc<Self>, product_name: &str, keywords: &str) -> Submission {
        let request = GenerationRequest::new(product_name, keywords);
        let prepared = self.pipeline.prepare(&request);
        // Rejected input keeps the current image.
        let image_url = prepared
            .is_ok()
            .then(|| self.images.url_for(&image_seed(request.product_name())));

        let token = {
            let mut state = self.state.lock();
            let token = RequestToken::after(state.token);
            state.token = Some(token);
            if let Some(url) = image_url {
                state.image_url = url;
            }
            state.outcome = match &prepared {
                Ok(_) => GenerationOutcome::Loading,
                Err(e) => failure_outcome(token, e),
            };
            state.updated_at = Utc::now();
            self.updates.send_replace(state.clone());
            token
        };

        let payload = match prepared {
            Ok(payload) => payload,
            Err(_) => return Submission { token, task: None },
        };

        info!("🚀 Submission {} for product: {}", token.value(), payload.product_name);
        let controller = Arc::clone(self);
        let task = tokio::spawn(async move {
            let result = controller.pipeline.execute(&payload).await;
            controller.resolve(token, result);
        });
        Submission { token, task: Some(task) }
    }

    /// Commits a pipeline result if `token` is still the latest one.
    /// Returns whether the result was committed.
    fn resolve(&self, token: RequestToken, result: Result<ProductDescription, GenerationError>) -> bool {
        let mut state = self.state.lock();
        if state.token != Some(token) {
            debug!(
                "Discarding stale result for submission {} (latest is {:?})",
                token.value(),
                state.token.map(RequestToken::value)
            );
            return false;
        }
        state.outcome = match result {
            Ok(description) => {
                info!("✅ Submission {} succeeded: {}", token.value(), description.title);
                GenerationOutcome::Success(description)
            }
            Err(e) => failure_outcome(token, &e),
        };
        state.updated_at = Utc::now();
        self.updates.send_replace(state.clone());
        true
    }
}

fn failure_outcome(token: RequestToken, err: &GenerationError) -> GenerationOutcome {
    error!("❌ Submission {} failed ({:?}): {}", token.value(), err.kind(), err);
    GenerationOutcome::Failure { kind: err.kind(), message: USER_FACING_ERROR.to_string() }
}
