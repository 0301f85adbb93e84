use reqwest::blocking::{Client, ClientBuilder};
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{BingoError, Result};

/// Some sermon hosts refuse requests without a browser user-agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/130.0.0.0 Safari/537.36";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

fn client_builder(timeout: Duration) -> ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));

    Client::builder().default_headers(headers).timeout(timeout)
}

pub fn build_client(timeout: Duration) -> Result<Client> {
    client_builder(timeout).build().map_err(|source| BingoError::Fetch {
        url: "<client setup>".to_string(),
        source,
    })
}

/// Single GET; the body is returned as text. Non-success statuses are errors
/// so an error page never ends up on a card.
pub fn download_sermon(client: &Client, url: &str) -> Result<String> {
    let start = std::time::Instant::now();
    debug!("Fetching sermon - url={}", url);

    let resp = client.get(url).send().map_err(|source| BingoError::Fetch {
        url: url.to_string(),
        source,
    })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(BingoError::FetchStatus {
            url: url.to_string(),
            status,
        });
    }

    let body = resp.text().map_err(|source| BingoError::Fetch {
        url: url.to_string(),
        source,
    })?;

    info!(
        "Sermon fetch completed - url={}, status={}, duration={:.2}s, bytes={}",
        url,
        status.as_u16(),
        start.elapsed().as_secs_f32(),
        body.len()
    );
    Ok(body)
}
