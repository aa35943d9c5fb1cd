pub mod analyze;
pub mod health;
pub mod metrics_handler;
pub mod products;

use crate::{pipeline::ProductAnalyzer, store::ProductStore};
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<ProductAnalyzer>,
    pub store: ProductStore,
}
