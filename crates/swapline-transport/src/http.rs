//! reqwest-backed transport

use futures_util::future::{BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::redirect::Policy;
use std::time::Duration;

use crate::config::HttpConfig;
use crate::error::FetchError;
use crate::request::FragmentRequest;
use crate::{Result, Transport};

const FRAGMENT_ACCEPT: &str = "text/html, */*; q=0.01";

/// Fetches fragments over HTTP(S)
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(FRAGMENT_ACCEPT));
        if config.mark_partial_requests {
            headers.insert("x-requested-with", HeaderValue::from_static("XMLHttpRequest"));
        }

        let client = reqwest::Client::builder()
            .redirect(Policy::limited(config.max_redirects))
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, request: FragmentRequest) -> BoxFuture<'static, Result<String>> {
        let client = self.client.clone();

        async move {
            let target = request.target();
            if target.scheme() != "http" && target.scheme() != "https" {
                return Err(FetchError::InvalidUrl(target.to_string()));
            }

            tracing::debug!(url = %target, "Fetching fragment");
            let resp = client.get(target.clone()).send().await?;

            if !resp.status().is_success() {
                return Err(FetchError::Status {
                    status: resp.status().as_u16(),
                    url: target.to_string(),
                });
            }

            Ok(resp.text().await?)
        }
        .boxed()
    }
}
