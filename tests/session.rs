// tests/session.rs
//
// Session state machine against a scripted transport.
//
use std::collections::VecDeque;

use clippercard::config::{Endpoints, ExtractOptions};
use clippercard::core::net::{Method, Request, Response};
use clippercard::core::Transport;
use clippercard::{ErrorKind, Result, Session};

#[derive(Default)]
struct Scripted {
    replies: VecDeque<Response>,
    seen: Vec<(Method, String, Vec<(String, String)>)>,
}

impl Scripted {
    fn reply(mut self, status: u16, body: String) -> Self {
        let ok = (200..300).contains(&status);
        self.replies.push_back(Response { ok, status, body });
        self
    }
}

impl Transport for Scripted {
    fn fetch(&mut self, req: &Request<'_>) -> Result<Response> {
        let form = req.form.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        self.seen.push((req.method, req.url.to_string(), form));
        Ok(self.replies.pop_front().expect("unscripted request"))
    }
}

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {path}: {e}"))
}

fn endpoints() -> Endpoints {
    Endpoints { login_url: "https://test/login".into(), account_url: "https://test/account".into() }
}

fn session(t: Scripted) -> Session<Scripted> {
    Session::with_transport(t, endpoints(), ExtractOptions::default())
}

#[test]
fn accessors_before_login_are_usage_errors() {
    let s = session(Scripted::default());
    assert!(!s.is_authenticated());
    assert_eq!(s.profile().unwrap_err().kind(), ErrorKind::Usage);
    assert_eq!(s.cards().unwrap_err().kind(), ErrorKind::Usage);
}

#[test]
fn successful_login_exposes_profile_and_cards() {
    let t = Scripted::default()
        .reply(200, fixture("login.html"))
        .reply(200, body("<html>welcome</html>"))
        .reply(200, fixture("dashboard_user_1.html"));
    let mut s = session(t);
    s.login("jsmith@example.org", "pw").unwrap();

    assert!(s.is_authenticated());
    assert_eq!(s.profile().unwrap().name, "John Smith");
    assert_eq!(s.cards().unwrap().cards.len(), 2);
}

#[test]
fn login_posts_credentials_and_token() {
    let t = Scripted::default()
        .reply(200, fixture("login.html"))
        .reply(200, body("ok"))
        .reply(200, fixture("dashboard_user_1.html"));
    let mut s = session(t);
    s.login("jsmith@example.org", "pw").unwrap();

    let seen = transport_log(s);
    assert_eq!(seen.len(), 3);
    assert_eq!((seen[0].0, seen[0].1.as_str()), (Method::Get, "https://test/login"));
    assert_eq!(seen[1].0, Method::Post);
    let form = &seen[1].2;
    let field = |k: &str| form.iter().find(|(n, _)| n == k).map(|(_, v)| v.as_str());
    assert_eq!(field("j_idt13:username"), Some("jsmith@example.org"));
    assert_eq!(field("j_idt13:password"), Some("pw"));
    assert_eq!(field("javax.faces.ViewState"), Some("-4415960785231519370:7338512916355128043"));
    assert_eq!((seen[2].0, seen[2].1.as_str()), (Method::Get, "https://test/account"));
}

#[test]
fn rejected_login_is_auth_error_and_stays_locked() {
    let t = Scripted::default()
        .reply(200, fixture("login.html"))
        .reply(200, fixture("login_failed.html"));
    let mut s = session(t);

    let err = s.login("jsmith@example.org", "wrong").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert!(!s.is_authenticated());
    assert_eq!(s.cards().unwrap_err().kind(), ErrorKind::Usage);
    assert_eq!(s.profile().unwrap_err().kind(), ErrorKind::Usage);
    assert_eq!(s.login("jsmith@example.org", "again").unwrap_err().kind(), ErrorKind::Usage);
}

#[test]
fn http_failure_is_infrastructure_error() {
    let t = Scripted::default().reply(503, body("down for maintenance"));
    let mut s = session(t);
    let err = s.login("a", "b").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Infrastructure);
    assert!(err.to_string().contains("503"));
    assert_eq!(s.profile().unwrap_err().kind(), ErrorKind::Usage);
}

#[test]
fn missing_token_is_content_error() {
    let t = Scripted::default().reply(200, body("<html><form id=\"other\"></form></html>"));
    let mut s = session(t);
    assert_eq!(s.login("a", "b").unwrap_err().kind(), ErrorKind::Content);
}

fn body(text: &str) -> String {
    text.to_string()
}

fn transport_log(s: Session<Scripted>) -> Vec<(Method, String, Vec<(String, String)>)> {
    s.into_transport().seen
}
