//! Wiring from configuration to the cache's collaborators.

use std::sync::Arc;

use anyhow::{Context, Result};
use semfw_client::{
    EmbeddingOracle, GroqClient, GroqConfig, HashingEmbedder, LlmOracle, MockTableFetcher, SearchDepth, TavilyClient,
    TavilyConfig, TavilyFetcher,
};
use semfw_core::{AppConfig, Fetcher, Oracle, OracleKind, SemanticCache};

/// Build the session cache from configuration.
pub fn build_cache(config: &AppConfig) -> Result<SemanticCache> {
    Ok(SemanticCache::new(build_oracle(config)?, build_fetcher(config)?))
}

/// Select the similarity oracle. The LLM oracle requires a Groq key.
pub fn build_oracle(config: &AppConfig) -> Result<Arc<dyn Oracle>> {
    match config.oracle {
        OracleKind::Llm => {
            let client = GroqClient::new(GroqConfig {
                api_key: config.require_groq_api_key()?.to_string(),
                timeout: config.timeout(),
                user_agent: config.user_agent.clone(),
                ..Default::default()
            })?;
            Ok(Arc::new(LlmOracle::new(client, config.similarity_model.clone())))
        }
        OracleKind::Embedding => Ok(Arc::new(EmbeddingOracle::new(
            HashingEmbedder::default(),
            config.similarity_threshold,
        ))),
    }
}

/// Select the fetcher. Live search requires a Tavily key; otherwise the mock
/// table is used, loaded from `mock_table_path` when set.
pub fn build_fetcher(config: &AppConfig) -> Result<Arc<dyn Fetcher>> {
    if config.live_search {
        let client = TavilyClient::new(TavilyConfig {
            api_key: config.require_tavily_api_key()?.to_string(),
            timeout: config.timeout(),
            user_agent: config.user_agent.clone(),
            ..Default::default()
        })?;
        let depth: SearchDepth = config.search_depth.parse().map_err(anyhow::Error::msg)?;
        return Ok(Arc::new(TavilyFetcher::new(client, depth, config.max_results)));
    }

    let fetcher = match &config.mock_table_path {
        Some(path) => MockTableFetcher::from_path(path)
            .with_context(|| format!("loading mock table from {}", path.display()))?,
        None => MockTableFetcher::builtin(),
    };
    tracing::info!(queries = fetcher.len(), "using mock search table");
    Ok(Arc::new(fetcher))
}
