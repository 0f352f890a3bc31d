use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tasklist_core::{
  ApiRequest,
  ApiResponse,
  Method,
  Transport,
  TransportError
};
use tracing::trace;

/// `reqwest` client holding the session
/// cookie between calls, standing in for
/// the browser's cookie jar.
#[derive(Debug, Clone)]
pub struct HttpTransport {
  client: reqwest::Client
}

impl HttpTransport {
  pub fn new() -> anyhow::Result<Self> {
    let client =
      reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .map_err(|e| {
          anyhow::anyhow!(
            "failed building HTTP \
             client: {e}"
          )
        })?;
    Ok(Self { client })
  }
}

#[async_trait(?Send)]
impl Transport for HttpTransport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, TransportError>
  {
    let method = match request.method {
      | Method::Get => {
        reqwest::Method::GET
      }
      | Method::Post => {
        reqwest::Method::POST
      }
      | Method::Patch => {
        reqwest::Method::PATCH
      }
      | Method::Delete => {
        reqwest::Method::DELETE
      }
    };

    let mut builder = self
      .client
      .request(method, request.url.as_str());
    if let Some(body) = request.body {
      builder = builder
        .header(
          CONTENT_TYPE,
          "application/json"
        )
        .body(body);
    }

    let response =
      builder.send().await.map_err(
        |e| {
          TransportError(format!(
            "request to {} failed: {e}",
            request.url
          ))
        }
      )?;

    let status =
      response.status().as_u16();
    let body =
      response.text().await.map_err(
        |e| {
          TransportError(format!(
            "failed reading response \
             body: {e}"
          ))
        }
      )?;
    trace!(status, bytes = body.len(), "received response");

    Ok(ApiResponse::new(status, body))
  }
}
