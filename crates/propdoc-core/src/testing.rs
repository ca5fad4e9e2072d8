//! Gateway doubles for exercising the pipeline without a live service.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::gateway::DocumentIntelligence;
use crate::models::{MimeType, RawDocument};

/// Returns the same document for every call.
#[derive(Default)]
pub struct StaticGateway {
    document: RawDocument,
    calls: AtomicUsize,
}

impl StaticGateway {
    pub fn new(document: RawDocument) -> Self {
        Self {
            document,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `process` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentIntelligence for StaticGateway {
    async fn process(&self, _content: &[u8], _mime_type: MimeType) -> Result<RawDocument, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.document.clone())
    }
}

/// Fails every call with a freshly built error.
pub struct FailingGateway {
    error: Box<dyn Fn() -> GatewayError + Send + Sync>,
}

impl FailingGateway {
    pub fn new(error: impl Fn() -> GatewayError + Send + Sync + 'static) -> Self {
        Self {
            error: Box::new(error),
        }
    }

    /// Fails with a non-success HTTP status.
    pub fn service(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move || GatewayError::Service {
            status,
            body: body.clone(),
        })
    }

    /// Fails with a transport error.
    pub fn network(message: &str) -> Self {
        let message = message.to_string();
        Self::new(move || GatewayError::Network(message.clone()))
    }
}

#[async_trait]
impl DocumentIntelligence for FailingGateway {
    async fn process(&self, _content: &[u8], _mime_type: MimeType) -> Result<RawDocument, GatewayError> {
        Err((self.error)())
    }
}

/// Waits before answering; used to trip the pipeline's timeout.
pub struct SlowGateway {
    delay: Duration,
    document: RawDocument,
}

impl SlowGateway {
    pub fn new(delay: Duration, document: RawDocument) -> Self {
        Self { delay, document }
    }
}

#[async_trait]
impl DocumentIntelligence for SlowGateway {
    async fn process(&self, _content: &[u8], _mime_type: MimeType) -> Result<RawDocument, GatewayError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.document.clone())
    }
}
