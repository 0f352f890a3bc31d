use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use tasklist_cli::render::Renderer;
use tasklist_cli::repl::{Flow, Shell};
use tasklist_core::{ApiClient, ApiRequest, ApiResponse, ClientConfig, Transport, TransportError};

#[derive(Default)]
struct Canned {
    replies: RefCell<VecDeque<ApiResponse>>,
    urls: RefCell<Vec<String>>,
}

impl Canned {
    fn reply(self, status: u16, body: &str) -> Self {
        self.replies.borrow_mut().push_back(ApiResponse::new(status, body));
        self
    }
}

#[async_trait(?Send)]
impl Transport for Canned {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.urls.borrow_mut().push(request.url);
        self.replies
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| TransportError("no scripted reply".to_string()))
    }
}

const ADA: &str = r#"{"id":1,"email":"a@b.com","first_name":"Ada","last_name":null,"auth_provider":"local"}"#;

fn api(transport: Canned) -> ApiClient<Canned> {
    ApiClient::new(transport, ClientConfig::with_base("http://api.test"))
}

#[tokio::test]
async fn login_then_add_prints_table() {
    let api = api(
        Canned::default()
            .reply(401, r#"{"error":"Not logged in"}"#)
            .reply(200, ADA)
            .reply(200, "[]")
            .reply(201, r#"{"id":7,"title":"Buy milk","completed":false}"#),
    );
    let renderer = Renderer::plain();
    let mut shell = Shell::new(&api, &renderer, Vec::new());

    shell.start().await.expect("start");
    assert!(!shell.session().is_authenticated());

    let script = "login a@b.com secret\n\nadd Buy milk\nquit\nlist\n";
    shell.run(script.as_bytes()).await.expect("run");

    assert!(shell.session().is_authenticated());
    assert_eq!(shell.tasks().len(), 1);
    assert_eq!(
        *api.transport().urls.borrow(),
        vec![
            "http://api.test/api/auth/user",
            "http://api.test/api/auth/login",
            "http://api.test/api/tasks",
            "http://api.test/api/tasks",
        ]
    );

    let output = String::from_utf8(shell.into_output()).expect("utf8");
    assert!(output.contains("signed in as a@b.com"));
    assert!(output.contains("7  [ ]  Buy milk"));
}

#[tokio::test]
async fn task_commands_need_a_session() {
    let api = api(Canned::default().reply(401, "{}"));
    let renderer = Renderer::plain();
    let mut shell = Shell::new(&api, &renderer, Vec::new());
    shell.start().await.expect("start");

    let flow = shell.run_line("rm 3").await.expect("run");

    assert_eq!(flow, Flow::Continue);
    assert_eq!(api.transport().urls.borrow().len(), 1);
    let output = String::from_utf8(shell.into_output()).expect("utf8");
    assert!(output.starts_with("not signed in"));
}

#[tokio::test]
async fn failed_login_shows_server_message() {
    let api = api(
        Canned::default()
            .reply(401, "{}")
            .reply(401, r#"{"error":"bad credentials"}"#),
    );
    let renderer = Renderer::plain();
    let mut shell = Shell::new(&api, &renderer, Vec::new());
    shell.start().await.expect("start");

    shell.run_line("login a@b.com x").await.expect("run");
    shell.run_line("register a@b.com one two").await.expect("run");

    let output = String::from_utf8(shell.into_output()).expect("utf8");
    assert_eq!(
        output,
        "error: bad credentials\nerror: Passwords do not match\n"
    );
}

#[tokio::test]
async fn logout_keeps_session_until_server_answers() {
    let api = api(
        Canned::default()
            .reply(200, ADA)
            .reply(200, r#"[{"id":7,"title":"Buy milk","completed":false}]"#),
    );
    let renderer = Renderer::plain();
    let mut shell = Shell::new(&api, &renderer, Vec::new());
    shell.start().await.expect("start");
    assert_eq!(shell.tasks().len(), 1);

    // Out of replies, so the request fails at the transport.
    shell.run_line("logout").await.expect("run");
    assert!(shell.session().is_authenticated());
    assert_eq!(shell.tasks().len(), 1);
    assert_eq!(
        api.transport().urls.borrow().last().map(String::as_str),
        Some("http://api.test/api/auth/logout")
    );

    api.transport()
        .replies
        .borrow_mut()
        .push_back(ApiResponse::new(500, r#"{"error":"Logout failed"}"#));
    shell.run_line("logout").await.expect("run");

    assert!(!shell.session().is_authenticated());
    assert!(shell.tasks().is_empty());
    let output = String::from_utf8(shell.into_output()).expect("utf8");
    assert!(!output.contains("error:"));
    assert_eq!(output.matches("signed out").count(), 1);
    assert!(output.ends_with("signed out\n"));
}
