#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::json;
use tokio::sync::oneshot;

use tiendanube_copywriter::error::Result;
use tiendanube_copywriter::prompt::GenerationPayload;
use tiendanube_copywriter::slug::PicsumImages;
use tiendanube_copywriter::{GenerationClient, GenerationError, GenerationPipeline, RequestController};

pub type Reply = Result<String>;

/// Fake model whose replies are released by the test, one gate per product name.
#[derive(Default)]
pub struct GatedClient {
    gates: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
    calls: AtomicUsize,
}

impl GatedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gate(&self, product_name: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().insert(product_name.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationClient for GatedClient {
    async fn generate(&self, payload: &GenerationPayload) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.gates.lock().remove(&payload.product_name);
        match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| {
                Err(GenerationError::Transport { status: None, message: "gate dropped".into() })
            }),
            None => Err(GenerationError::Transport {
                status: None,
                message: format!("no gate for {}", payload.product_name),
            }),
        }
    }
}

pub fn controller_with(client: Arc<dyn GenerationClient>) -> Arc<RequestController> {
    RequestController::new(
        GenerationPipeline::new(client),
        Arc::new(PicsumImages::new("https://picsum.photos")),
    )
}

pub fn description_body(title: &str) -> String {
    json!({
        "title": title,
        "longDescription": format!("{title}: descripción completa."),
        "shortDescription": format!("{title} en pocas palabras."),
        "tags": ["tienda", "oferta"]
    })
    .to_string()
}
