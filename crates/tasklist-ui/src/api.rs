use async_trait::async_trait;
use gloo::net::http::{
  Request,
  RequestBuilder
};
use tasklist_core::{
  ApiRequest,
  ApiResponse,
  Method,
  Transport,
  TransportError
};

/// `fetch`-backed transport. Requests
/// go to the page's origin unless the
/// config says otherwise, so the
/// session cookie rides along.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
  async fn send(
    &self,
    request: ApiRequest
  ) -> Result<ApiResponse, TransportError>
  {
    let builder = builder_for(
      request.method,
      &request.url
    );

    let response = match request.body {
      | Some(body) => {
        builder
          .header(
            "Content-Type",
            "application/json"
          )
          .body(body)
          .map_err(|e| {
            TransportError(format!(
              "failed to build request: {e}"
            ))
          })?
          .send()
          .await
      }
      | None => builder.send().await
    }
    .map_err(|e| {
      TransportError(format!(
        "fetch error: {e}"
      ))
    })?;

    let status = response.status();
    let body =
      response.text().await.map_err(|e| {
        TransportError(format!(
          "failed to read response: {e}"
        ))
      })?;

    Ok(ApiResponse { status, body })
  }
}

fn builder_for(
  method: Method,
  url: &str
) -> RequestBuilder {
  match method {
    | Method::Get => Request::get(url),
    | Method::Post => Request::post(url),
    | Method::Patch => {
      Request::patch(url)
    }
    | Method::Delete => {
      Request::delete(url)
    }
  }
}
