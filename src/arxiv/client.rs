// src/arxiv/client.rs
use crate::arxiv::models::html_url_with;
use crate::utils::config::FetchConfig;
use crate::utils::error::ArxivError;
use reqwest::header;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Creates a reqwest client configured for arXiv interaction.
pub fn build_client(config: &FetchConfig) -> Result<reqwest::Client, ArxivError> {
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .build()?;
    Ok(client)
}

/// Downloads the HTML rendering of one paper.
/// Waits `config.request_delay` first so batches stay polite.
pub async fn fetch_paper_html(
    client: &reqwest::Client,
    paper_id: &str,
    config: &FetchConfig,
) -> Result<String, ArxivError> {
    let url = html_url_with(&config.html_base, paper_id);
    tracing::info!("Downloading paper HTML from: {}", url);

    // --- Basic Rate Limiting ---
    if !config.request_delay.is_zero() {
        tokio::time::sleep(config.request_delay).await;
    }

    let response = client
        .get(&url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as ArxivError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            tracing::warn!("No HTML version for {} (arXiv only renders HTML for some papers)", paper_id);
            return Err(ArxivError::HtmlNotAvailable(paper_id.to_string()));
        }
        if status == reqwest::StatusCode::FORBIDDEN || status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            tracing::warn!("Received {} - check User-Agent and request rate.", status);
            return Err(ArxivError::RateLimited);
        }
        return Err(ArxivError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body)
}

/// Fetches several papers concurrently, at most `config.max_concurrency` at a time.
///
/// Results come back in input order, each with its own outcome, so one failing
/// paper does not affect the others.
pub async fn fetch_papers_batch(
    paper_ids: &[String],
    config: &FetchConfig,
) -> Vec<(String, Result<String, ArxivError>)> {
    if paper_ids.is_empty() {
        return Vec::new();
    }

    let client = match build_client(config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Could not build HTTP client: {}", e);
            let reason = e.to_string();
            return paper_ids
                .iter()
                .map(|id| (id.clone(), Err(ArxivError::Task(reason.clone()))))
                .collect();
        }
    };

    let permits = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
    let mut handles = Vec::with_capacity(paper_ids.len());

    for paper_id in paper_ids {
        let client = client.clone();
        let config = config.clone();
        let permits = Arc::clone(&permits);
        let paper_id = paper_id.clone();

        handles.push(tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|e| ArxivError::Task(e.to_string()))?;
            fetch_paper_html(&client, &paper_id, &config).await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (paper_id, handle) in paper_ids.iter().zip(handles) {
        let outcome = match handle.await {
            Ok(result) => result,
            Err(join_error) => Err(ArxivError::Task(join_error.to_string())),
        };
        if let Err(e) = &outcome {
            tracing::warn!("Fetching {} failed: {}", paper_id, e);
        }
        results.push((paper_id.clone(), outcome));
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn unreachable_config() -> FetchConfig {
        FetchConfig {
            html_base: "http://127.0.0.1:9/html".to_string(),
            timeout: Duration::from_secs(2),
            request_delay: Duration::ZERO,
            max_concurrency: 2,
            ..FetchConfig::default()
        }
    }

    #[test]
    fn test_empty_batch() {
        let results = tokio_test::block_on(fetch_papers_batch(&[], &FetchConfig::default()));
        assert!(results.is_empty());
    }

    #[test]
    fn test_batch_keeps_order_and_scopes_failures() {
        let ids = vec!["2402.08954".to_string(), "0000.00000".to_string(), "1234.56789".to_string()];
        let results = tokio_test::block_on(fetch_papers_batch(&ids, &unreachable_config()));

        let returned: Vec<&str> = results.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(returned, vec!["2402.08954", "0000.00000", "1234.56789"]);
        assert!(results.iter().all(|(_, outcome)| outcome.is_err()));
    }

    #[test]
    fn test_build_client_with_defaults() {
        assert!(build_client(&FetchConfig::default()).is_ok());
    }
}
