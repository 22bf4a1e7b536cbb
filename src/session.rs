// src/session.rs

use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::Result;

// Clones share the client and the rate limiter.
#[derive(Clone)]
pub struct AlphaVantageSession {
    client: Client,
    base_url: String,
    api_key: String,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl AlphaVantageSession {
    pub fn new(config: &ProviderConfig) -> Self {
        AlphaVantageSession {
            client: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(
                config.requests_per_minute,
                config.max_burst_requests,
            ))),
        }
    }

    // Error payloads arrive with 200 OK; only the status is checked here.
    pub async fn send_request(&self, symbol: &str) -> Result<String> {
        self.rate_limiter.lock().await.acquire().await;

        debug!(symbol, url = %self.base_url, "requesting daily series");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", "full"),
                ("datatype", "json"),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

pub struct RateLimiter {
    tokens: u32,
    max_burst: u32,
    last_refill_time: Instant,
    refill_interval: Duration,
}

impl RateLimiter {
    pub fn new(requests_per_minute: u32, max_burst: u32) -> Self {
        let max_burst = max_burst.max(1);
        RateLimiter {
            tokens: max_burst,
            max_burst,
            last_refill_time: Instant::now(),
            refill_interval: Duration::from_secs(60) / requests_per_minute.max(1),
        }
    }

    pub fn available_tokens(&self) -> u32 {
        self.tokens
    }

    pub fn refill_interval(&self) -> Duration {
        self.refill_interval
    }

    pub async fn acquire(&mut self) {
        while self.tokens == 0 {
            let now = Instant::now();
            let elapsed = now - self.last_refill_time;

            if elapsed >= self.refill_interval {
                let refill_count = (elapsed.as_secs_f32() / self.refill_interval.as_secs_f32()) as u32;
                self.tokens = std::cmp::min(self.tokens + refill_count, self.max_burst);
                self.last_refill_time = now;
            } else {
                sleep(self.refill_interval - elapsed).await;
            }
        }

        self.tokens -= 1;
    }
}
