use anyhow::{Context, Result};
use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde_json::Value;
use tower::{Service, ServiceBuilder};
use tracing::debug;

use crate::config::CanvasConfig;
use crate::util::canvas_url;

/// Transport for Canvas API requests. Responsible for attaching the domain and bearer token,
/// executing the request, and decoding the JSON body, but nothing at a higher level such as
/// knowing which resources live at which paths.
pub fn service(config: CanvasConfig) -> Result<impl CanvasService> {
    let http_client = HttpClient::builder()
        .build()
        .context("could not build HTTP client")?;
    Ok(service_with_client(http_client, config))
}

/// Like [`service`], but with a caller-supplied HTTP client.
pub fn service_with_client(http_client: HttpClient, config: CanvasConfig) -> impl CanvasService {
    ServiceBuilder::new()
        .map_request(move |request: CanvasRequest| request.request_builder(&http_client, &config))
        .service_fn(send_for_json)
}

pub trait CanvasService: Service<CanvasRequest, Response = Value, Error = anyhow::Error> {}
impl<T: Service<CanvasRequest, Response = Value, Error = anyhow::Error>> CanvasService for T {}

async fn send_for_json(request: Result<RequestBuilder>) -> Result<Value> {
    let response = request?
        .send()
        .await
        .context("Canvas request failed")?
        .error_for_status()
        .context("Canvas responded with an error")?;
    debug!(status = %response.status(), url = %response.url(), "Canvas responded");

    response
        .json()
        .await
        .context("could not parse Canvas response as JSON")
}

/// A request against the Canvas API. `path` is relative to the configured domain and may carry a
/// query string, which is sent as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasRequest {
    method: Method,
    path: String,
}

impl CanvasRequest {
    pub fn get(path: String) -> Self {
        Self {
            method: Method::GET,
            path,
        }
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn request_builder(
        &self,
        http_client: &HttpClient,
        config: &CanvasConfig,
    ) -> Result<RequestBuilder> {
        let url = canvas_url(config.domain()?, &self.path)?;
        Ok(http_client
            .request(self.method.clone(), url)
            .bearer_auth(config.api_token()?))
    }
}
