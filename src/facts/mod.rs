pub mod numbers_api;


use crate::config::FactsConfig;
use crate::ClassifyResult;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

/// Returned in place of a fact whenever the lookup fails
pub const FALLBACK_FUN_FACT: &str = "No fun fact available";

/// Source of short descriptive facts about numbers
#[async_trait]
pub trait FactFetcher: Send + Sync {
    /// Fetch a math fact about `number`
    async fn fetch(&self, number: u32) -> ClassifyResult<String>;
}

/// Look up a fact for |number|, absorbing every failure into [`FALLBACK_FUN_FACT`].
pub async fn fun_fact_or_fallback(fetcher: &dyn FactFetcher, number: i32) -> String {
    let key = number.unsigned_abs();
    match fetcher.fetch(key).await {
        Ok(fact) if !fact.trim().is_empty() => {
            debug!("Fetched fun fact for {}", key);
            fact
        }
        Ok(_) => {
            warn!("Fact service returned an empty fact for {}", key);
            FALLBACK_FUN_FACT.to_string()
        }
        Err(e) => {
            warn!("Fun fact lookup for {} failed: {}", key, e);
            FALLBACK_FUN_FACT.to_string()
        }
    }
}

/// Fact fetcher factory; `None` when lookups are disabled
pub fn create_fact_fetcher(config: &FactsConfig) -> ClassifyResult<Option<Arc<dyn FactFetcher>>> {
    if !config.enabled {
        return Ok(None);
    }
    let fetcher = numbers_api::NumbersApiFetcher::new(&config.base_url, config.timeout())?;
    Ok(Some(Arc::new(fetcher)))
}
