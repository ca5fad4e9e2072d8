//! Extraction orchestrator.
//!
//! Drives one request through `pending → processing → completed | failed`, writing a status row
//! at each transition. Gateway and parse failures are absorbed: the caller gets a completed
//! result built from simulated data, flagged with `is_fallback_data`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::error::{GatewayError, PropdocError, Result};
use crate::extract::confidence;
use crate::extract::parsers::ParseContext;
use crate::gateway::DocumentIntelligence;
use crate::models::{
    ConfidenceScores, ErrorResponse, ExtractedFields, ExtractionRecord, ExtractionRequest,
    ExtractionResponse, ExtractionResult, ExtractionStatus, PropdocConfig, StatusRecord,
};
use crate::simulation::SimulationGenerator;
use crate::storage::{DocumentSource, ExtractionStore, StoredDocument};

/// Orchestrates gateway, parser, scorer and simulation for extraction requests.
pub struct ExtractionPipeline {
    config: PropdocConfig,
    gateway: Arc<dyn DocumentIntelligence>,
    documents: Arc<dyn DocumentSource>,
    store: Arc<dyn ExtractionStore>,
    today: Option<NaiveDate>,
    timeout: Duration,
}

impl ExtractionPipeline {
    pub fn new(
        config: PropdocConfig,
        gateway: Arc<dyn DocumentIntelligence>,
        documents: Arc<dyn DocumentSource>,
        store: Arc<dyn ExtractionStore>,
    ) -> Self {
        let timeout = config.service.timeout();
        Self {
            config,
            gateway,
            documents,
            store,
            today: None,
            timeout,
        }
    }

    /// Fix the reference date used for date defaults and simulation.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Override the gateway timeout taken from the service configuration.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn config(&self) -> &PropdocConfig {
        &self.config
    }

    /// Run one extraction request.
    ///
    /// Returns an error only for invalid requests, missing configuration, unknown documents and
    /// storage failures.
    pub async fn extract(&self, request: &ExtractionRequest) -> Result<ExtractionResult> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(PropdocError::InvalidRequest(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let start = Instant::now();
        let document_id = request.document_id.trim();
        info!(
            "Starting extraction for document {} (property {}, user {})",
            document_id, request.property_id, request.user_id
        );

        self.set_status(StatusRecord::new(document_id, ExtractionStatus::Pending))
            .await?;

        let missing = self.config.service.missing_settings();
        if !missing.is_empty() {
            warn!(
                "Document intelligence service not configured, missing {}",
                missing.join(", ")
            );
            return Err(PropdocError::Config(format!(
                "document intelligence service is not configured (missing {})",
                missing.join(", ")
            )));
        }

        self.set_status(StatusRecord::new(document_id, ExtractionStatus::Processing))
            .await?;

        let document = match self.documents.fetch_document(document_id).await {
            Ok(Some(document)) if !document.content.is_empty() => document,
            Ok(_) => {
                self.mark_failed(document_id, "document not found").await;
                return Err(PropdocError::NotFound(document_id.to_string()));
            }
            Err(e) => {
                self.mark_failed(document_id, &e.to_string()).await;
                return Err(e.into());
            }
        };

        let result = match self.run_extraction(&document).await {
            Ok((data, confidence_scores)) => ExtractionResult {
                document_id: document_id.to_string(),
                data,
                confidence_scores,
                is_fallback_data: false,
            },
            Err(e) if e.triggers_fallback() => {
                warn!(
                    "Extraction failed for document {}: {}. Using simulated data",
                    document_id, e
                );
                self.simulate(&document)
            }
            Err(e) => {
                self.mark_failed(document_id, &e.to_string()).await;
                return Err(e);
            }
        };

        if let Err(e) = self.persist(&result).await {
            self.mark_failed(document_id, &e.to_string()).await;
            return Err(e);
        }

        let status = StatusRecord::new(document_id, ExtractionStatus::Completed);
        let status = if result.is_fallback_data {
            status.with_message("simulated data")
        } else {
            status
        };
        self.set_status(status).await?;

        info!(
            "Completed extraction for document {} in {} ms (fallback: {})",
            document_id,
            start.elapsed().as_millis(),
            result.is_fallback_data
        );

        Ok(result)
    }

    /// Run a request and shape the outcome for the caller.
    pub async fn handle(
        &self,
        request: &ExtractionRequest,
    ) -> std::result::Result<ExtractionResponse, ErrorResponse> {
        self.extract(request)
            .await
            .map(ExtractionResponse::from)
            .map_err(|e| ErrorResponse::from(&e))
    }

    async fn run_extraction(
        &self,
        document: &StoredDocument,
    ) -> Result<(ExtractedFields, ConfidenceScores)> {
        let raw = tokio::time::timeout(
            self.timeout,
            self.gateway.process(&document.content, document.mime_type()),
        )
        .await
        .map_err(|_| GatewayError::Timeout(self.timeout))??;

        debug!(
            "Gateway returned {} entities for {}",
            raw.entities.len(),
            document.file_name
        );

        let profile = document.document_type.profile();
        let ctx = ParseContext::new(self.today())
            .with_regex_fallback(self.config.extraction.regex_fallback);

        let data = (profile.parse)(&raw, &ctx)?;
        let confidence_scores = confidence::score(&raw, profile.fields);

        Ok((data, confidence_scores))
    }

    async fn persist(&self, result: &ExtractionResult) -> Result<()> {
        let record = ExtractionRecord::completed(result)?;
        self.store.save_result(&record).await?;
        Ok(())
    }

    fn simulate(&self, document: &StoredDocument) -> ExtractionResult {
        let simulated = SimulationGenerator::from_seed(self.config.simulation.seed, self.today())
            .generate(document.document_type, Some(&document.file_name));

        ExtractionResult {
            document_id: document.id.clone(),
            data: simulated.data,
            confidence_scores: simulated.confidence_scores,
            is_fallback_data: true,
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    async fn set_status(&self, status: StatusRecord) -> Result<()> {
        debug!("Document {} is now {:?}", status.document_id, status.status);
        self.store.record_status(&status).await?;
        Ok(())
    }

    /// Best effort: the original error is what the caller needs to see.
    async fn mark_failed(&self, document_id: &str, message: &str) {
        let status = StatusRecord::new(document_id, ExtractionStatus::Failed).with_message(message);
        if let Err(e) = self.set_status(status).await {
            warn!("Failed to record failure for document {}: {}", document_id, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    use crate::error::StorageError;
    use crate::extract::schema::{UTILITY_FIELDS, tags};
    use crate::models::{DocumentType, Entity, RawDocument};
    use crate::storage::MemoryStore;
    use crate::testing::{FailingGateway, SlowGateway, StaticGateway};

    fn configured() -> PropdocConfig {
        let mut config = PropdocConfig::default();
        config.service.api_key = Some("test-key".to_string());
        config.service.processor_id = Some("processor-1".to_string());
        config.simulation.seed = Some(42);
        config
    }

    fn store_with(document_type: DocumentType) -> Arc<MemoryStore> {
        let store = MemoryStore::new()
            .with_document(StoredDocument::new(
                "doc-1",
                "prop-1",
                "bill.pdf",
                document_type,
                b"%PDF-1.7 test".to_vec(),
            ))
            .unwrap();
        Arc::new(store)
    }

    fn pipeline(
        config: PropdocConfig,
        gateway: Arc<dyn DocumentIntelligence>,
        store: Arc<MemoryStore>,
    ) -> ExtractionPipeline {
        ExtractionPipeline::new(config, gateway, store.clone(), store)
            .with_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    fn request() -> ExtractionRequest {
        ExtractionRequest::new("doc-1", "prop-1", "user-1")
    }

    #[tokio::test]
    async fn test_gateway_failure_completes_with_simulated_data() {
        let store = store_with(DocumentType::Utility);
        let gateway = Arc::new(FailingGateway::service(503, "unavailable"));
        let pipeline = pipeline(configured(), gateway, store.clone());

        let response = pipeline.handle(&request()).await.unwrap();
        assert!(response.success);
        assert_eq!(response.fallback, Some(true));
        assert!(response.extracted_data.missing_fields().is_empty());
        assert_eq!(response.confidence_scores.len(), UTILITY_FIELDS.len());

        let ExtractedFields::Utility(fields) = &response.extracted_data else {
            panic!("expected utility fields");
        };
        assert!(fields.period_start < fields.period_end);
        assert!(fields.period_end < fields.bill_date);

        assert_eq!(
            store.status_history("doc-1").unwrap(),
            vec![
                ExtractionStatus::Pending,
                ExtractionStatus::Processing,
                ExtractionStatus::Completed,
            ]
        );
        let results = store.results_for("doc-1").unwrap();
        assert_eq!(results.len(), 1);
        assert!(results[0].is_fallback_data);
        assert_eq!(results[0].extracted_data["documentType"], "utility");
    }

    #[tokio::test]
    async fn test_successful_extraction_is_not_flagged() {
        let store = store_with(DocumentType::Utility);
        let gateway = Arc::new(StaticGateway::new(RawDocument::new(
            "Electric bill\nMeter #: EM12345\nCharges $45.00 and $230.50",
            vec![Entity::new(tags::TOTAL_AMOUNT, "$230.50", 0.8)],
        )));
        let pipeline = pipeline(configured(), gateway.clone(), store.clone());

        let result = pipeline.extract(&request()).await.unwrap();
        assert!(!result.is_fallback_data);
        assert_eq!(gateway.calls(), 1);

        let ExtractedFields::Utility(fields) = &result.data else {
            panic!("expected utility fields");
        };
        assert_eq!(fields.total_amount, Decimal::new(23050, 2));
        assert_eq!(fields.meter_reference, "EM12345");
        assert!((result.confidence_scores["totalAmount"] - 0.8).abs() < 1e-6);
        assert_eq!(result.confidence_scores["meterReference"], 0.6);

        let response = ExtractionResponse::from(result);
        assert_eq!(response.fallback, None);
        assert!(!store.results_for("doc-1").unwrap()[0].is_fallback_data);
    }

    #[tokio::test]
    async fn test_parse_failure_falls_back() {
        let store = store_with(DocumentType::Lease);
        let gateway = Arc::new(StaticGateway::new(RawDocument::new(
            "",
            vec![Entity::new(tags::LEASE_START_DATE, "31 Feb", 0.9).with_date(2024, 2, 31)],
        )));
        let pipeline = pipeline(configured(), gateway, store.clone());

        let result = pipeline.extract(&request()).await.unwrap();
        assert!(result.is_fallback_data);
        assert_eq!(result.data.document_type(), DocumentType::Lease);
    }

    #[tokio::test]
    async fn test_amount_overflow_falls_back() {
        let store = store_with(DocumentType::Lease);
        let gateway = Arc::new(StaticGateway::new(RawDocument::new(
            "",
            vec![Entity::new(
                tags::RENT_AMOUNT,
                "£79,228,162,514,264,337,593,543,950,335",
                0.9,
            )],
        )));
        let pipeline = pipeline(configured(), gateway, store.clone());

        let result = pipeline.extract(&request()).await.unwrap();
        assert!(result.is_fallback_data);
        assert!(result.data.missing_fields().is_empty());
        assert_eq!(
            store.status_history("doc-1").unwrap().last(),
            Some(&ExtractionStatus::Completed)
        );
    }

    #[tokio::test]
    async fn test_gateway_timeout_falls_back() {
        let store = store_with(DocumentType::Compliance);
        let gateway = Arc::new(SlowGateway::new(
            Duration::from_secs(5),
            RawDocument::from_text("never returned"),
        ));
        let pipeline =
            pipeline(configured(), gateway, store.clone()).with_timeout(Duration::from_millis(20));

        let result = pipeline.extract(&request()).await.unwrap();
        assert!(result.is_fallback_data);
        assert_eq!(result.data.document_type(), DocumentType::Compliance);
    }

    #[tokio::test]
    async fn test_missing_configuration_stays_pending() {
        let store = store_with(DocumentType::Utility);
        let gateway = Arc::new(StaticGateway::default());
        let pipeline = pipeline(PropdocConfig::default(), gateway.clone(), store.clone());

        let err = pipeline.handle(&request()).await.unwrap_err();
        assert_eq!(err.status, 500);
        assert_eq!(err.retryable, Some(false));
        assert_eq!(gateway.calls(), 0);
        assert_eq!(
            store.status_history("doc-1").unwrap(),
            vec![ExtractionStatus::Pending]
        );
    }

    #[tokio::test]
    async fn test_unknown_document_is_marked_failed() {
        let store = Arc::new(MemoryStore::new());
        let gateway = Arc::new(StaticGateway::default());
        let pipeline = pipeline(configured(), gateway, store.clone());

        let err = pipeline.handle(&request()).await.unwrap_err();
        assert_eq!(err.status, 404);
        assert_eq!(
            store.status_history("doc-1").unwrap(),
            vec![
                ExtractionStatus::Pending,
                ExtractionStatus::Processing,
                ExtractionStatus::Failed,
            ]
        );
        assert!(store.results_for("doc-1").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_content_is_not_found() {
        let store = Arc::new(
            MemoryStore::new()
                .with_document(StoredDocument::new(
                    "doc-1",
                    "prop-1",
                    "scan.jpg",
                    DocumentType::Utility,
                    Vec::new(),
                ))
                .unwrap(),
        );
        let pipeline = pipeline(configured(), Arc::new(StaticGateway::default()), store);

        let err = pipeline.extract(&request()).await.unwrap_err();
        assert!(matches!(err, PropdocError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_request_writes_nothing() {
        let store = store_with(DocumentType::Utility);
        let pipeline = pipeline(configured(), Arc::new(StaticGateway::default()), store.clone());

        let err = pipeline
            .handle(&ExtractionRequest::new("doc-1", "", "user-1"))
            .await
            .unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.error.contains("propertyId"));
        assert!(store.statuses_for("doc-1").unwrap().is_empty());
    }

    /// Records statuses in memory but rejects every extraction record.
    struct RejectingStore(MemoryStore);

    #[async_trait::async_trait]
    impl ExtractionStore for RejectingStore {
        async fn record_status(&self, status: &StatusRecord) -> std::result::Result<(), StorageError> {
            self.0.record_status(status).await
        }

        async fn save_result(&self, _record: &ExtractionRecord) -> std::result::Result<(), StorageError> {
            Err(StorageError::Backend("disk full".to_string()))
        }
    }

    #[tokio::test]
    async fn test_persist_failure_is_marked_failed() {
        let documents = store_with(DocumentType::Utility);
        let store = Arc::new(RejectingStore(MemoryStore::new()));
        let pipeline = ExtractionPipeline::new(
            configured(),
            Arc::new(FailingGateway::network("connection reset")),
            documents,
            store.clone(),
        );

        let err = pipeline.handle(&request()).await.unwrap_err();
        assert_eq!(err.status, 500);
        assert!(err.error.contains("disk full"));

        let statuses = store.0.statuses_for("doc-1").unwrap();
        assert_eq!(
            statuses.iter().map(|s| s.status).collect::<Vec<_>>(),
            vec![
                ExtractionStatus::Pending,
                ExtractionStatus::Processing,
                ExtractionStatus::Failed,
            ]
        );
        assert_eq!(statuses[2].message.as_deref(), Some("storage error: backend error: disk full"));
    }

    #[tokio::test]
    async fn test_repeated_runs_append_results() {
        let store = store_with(DocumentType::ServiceCharge);
        let gateway = Arc::new(FailingGateway::network("connection reset"));
        let pipeline = pipeline(configured(), gateway, store.clone());

        pipeline.extract(&request()).await.unwrap();
        pipeline.extract(&request()).await.unwrap();

        assert_eq!(store.results_for("doc-1").unwrap().len(), 2);
        assert_eq!(store.statuses_for("doc-1").unwrap().len(), 6);
    }
}
