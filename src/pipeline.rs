//! Image-to-product analysis.
//!
//! encode image -> build request -> completion call -> reply text ->
//! extract JSON fragment -> decode product.
//!
//! Any stage failure aborts the run and is returned to the caller as an
//! [`AnalysisError`]. There is no partial result and no placeholder product.

use crate::{
    decoder::decode_product,
    error::AnalysisError,
    extract::extract_json_fragment,
    image_utils::{encode_image, encode_image_bytes},
    metrics,
    models::{completion::CompletionResponse, product::Product},
    prompt::{build_request, ANALYSIS_PROMPT},
    providers::completion::CompletionClient,
};
use std::io::Read;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;

/// Turns product photos into [`Product`] records
#[derive(Debug, Clone)]
pub struct ProductAnalyzer {
    client: Arc<CompletionClient>,
    model: String,
}

impl ProductAnalyzer {
    pub fn new(client: Arc<CompletionClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Analyze an image held in memory
    pub async fn analyze(&self, image: &[u8]) -> Result<Product, AnalysisError> {
        let encoded = encode_image_bytes(image);
        self.analyze_encoded(&encoded, image.len()).await
    }

    /// Analyze an image read from a stream; a read failure is `ImageRead`
    pub async fn analyze_reader<R: Read>(&self, reader: R) -> Result<Product, AnalysisError> {
        let encoded = match encode_image(reader) {
            Ok(encoded) => encoded,
            Err(e) => {
                metrics::record_error(&self.model, e.kind());
                return Err(e);
            }
        };
        // base64 expands 3 bytes into 4 characters
        let approx_len = encoded.len() / 4 * 3;
        self.analyze_encoded(&encoded, approx_len).await
    }

    async fn analyze_encoded(
        &self,
        encoded: &str,
        image_bytes: usize,
    ) -> Result<Product, AnalysisError> {
        let request_id = uuid::Uuid::new_v4();
        let span = tracing::info_span!("analyze", %request_id, model = %self.model);

        async move {
            metrics::record_analysis(&self.model);
            tracing::info!(image_bytes, "Analyzing product image");

            let result = self.run(encoded).await;
            if let Err(e) = &result {
                metrics::record_error(&self.model, e.kind());
                tracing::warn!(error_type = e.kind(), error = %e, "Product analysis failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, encoded: &str) -> Result<Product, AnalysisError> {
        let request = build_request(&self.model, ANALYSIS_PROMPT, encoded);

        let start = Instant::now();
        let response = self.client.complete(&request).await?;
        let latency = start.elapsed();

        metrics::record_duration(&self.model, latency);
        record_usage(&self.model, &response);
        tracing::info!(
            completion_id = %response.id,
            latency_ms = latency.as_millis() as u64,
            total_tokens = response.usage.total_tokens,
            "Completion received"
        );

        let reply = response
            .reply_text()
            .ok_or_else(|| AnalysisError::Decode("completion response: no choices".to_string()))?;
        tracing::debug!(reply_len = reply.len(), "Extracting product JSON from reply");

        let fragment = extract_json_fragment(&reply)?;
        let product = decode_product(fragment)?;

        tracing::info!(reference = %product.reference, name = %product.name, "Product extracted");
        Ok(product)
    }
}

fn record_usage(model: &str, response: &CompletionResponse) {
    let usage = &response.usage;
    metrics::record_tokens(model, "input", usage.prompt_tokens);
    metrics::record_tokens(model, "output", usage.completion_tokens);
    metrics::record_tokens(model, "cache_read", usage.cache_read_input_tokens);
    metrics::record_tokens(model, "cache_write", usage.cache_write_input_tokens);
}
