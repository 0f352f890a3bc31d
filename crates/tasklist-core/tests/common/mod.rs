#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use tasklist_core::{
    ApiClient, ApiRequest, ApiResponse, ClientConfig, Method, Transport, TransportError,
};

/// Replays canned replies in order and records every request it was handed.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: RefCell<VecDeque<Result<ApiResponse, TransportError>>>,
    seen: RefCell<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    pub fn fail(self, reason: &str) -> Self {
        self.replies
            .borrow_mut()
            .push_back(Err(TransportError(reason.to_string())));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.seen.borrow().clone()
    }

    pub fn last(&self) -> ApiRequest {
        self.seen
            .borrow()
            .last()
            .cloned()
            .expect("at least one request")
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.seen.borrow_mut().push(request.clone());
        self.replies.borrow_mut().pop_front().unwrap_or_else(|| {
            Err(TransportError(format!(
                "no scripted reply for {} {}",
                request.method, request.url
            )))
        })
    }
}

pub fn client(transport: ScriptedTransport) -> ApiClient<ScriptedTransport> {
    ApiClient::new(transport, ClientConfig::default())
}

pub fn assert_request(request: &ApiRequest, method: Method, url: &str, body: Option<&str>) {
    assert_eq!(request.method, method, "method for {url}");
    assert_eq!(request.url, url);
    assert_eq!(request.body.as_deref(), body, "body for {url}");
}
