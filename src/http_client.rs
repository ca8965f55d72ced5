use anyhow::{Context, Result};
use authenticator_mobile_core::{HttpError, HttpHeader, HttpRequest, HttpResponse};
use log::debug;
use reqwest::{Client, Method};
use trait_variant::make;

/// Executes the core's HTTP effects
#[make(Send)]
pub trait HttpExecutor {
    /// Non-2xx statuses are responses; only a missing response is an error.
    async fn execute(&self, request: &HttpRequest) -> crux_http::Result<HttpResponse>;
}

/// [`HttpExecutor`] backed by a shared `reqwest` client
#[derive(Clone)]
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    /// Client with transport-default timeouts
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self { client })
    }
}

impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &HttpRequest) -> crux_http::Result<HttpResponse> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|e| HttpError::Url(format!("invalid method {}: {e}", request.method)))?;

        let mut builder = self.client.request(method, &request.url);
        for header in &request.headers {
            builder = builder.header(&header.name, &header.value);
        }

        debug!("{} {}", request.method, request.url);

        let response = builder
            .body(request.body.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                Some(HttpHeader {
                    name: name.to_string(),
                    value: value.to_str().ok()?.to_string(),
                })
            })
            .collect();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        debug!("{} {} -> {status}", request.method, request.url);

        Ok(HttpResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

fn map_reqwest_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::Url(e.to_string())
    } else {
        HttpError::Io(e.to_string())
    }
}
