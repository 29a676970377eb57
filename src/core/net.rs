// src/core/net.rs
//
// Blocking HTTP with a cookie jar. The session only needs "did it succeed"
// and the body; status handling is left to the caller.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config::consts::USER_AGENT;
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Clone, Debug)]
pub struct Request<'a> {
    pub url: &'a str,
    pub method: Method,
    pub form: Vec<(&'a str, &'a str)>,
}

impl<'a> Request<'a> {
    pub fn get(url: &'a str) -> Self {
        Self { url, method: Method::Get, form: Vec::new() }
    }

    pub fn post(url: &'a str, form: Vec<(&'a str, &'a str)>) -> Self {
        Self { url, method: Method::Post, form }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    pub ok: bool,
    pub status: u16,
    pub body: String,
}

/// Anything that can perform one request. `Err` is reserved for failures
/// where no response arrived at all.
pub trait Transport {
    fn fetch(&mut self, req: &Request<'_>) -> Result<Response>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn fetch(&mut self, req: &Request<'_>) -> Result<Response> {
        let builder = match req.method {
            Method::Get => self.client.get(req.url),
            Method::Post => self.client.post(req.url).form(&req.form),
        };
        let resp = builder.send()?;
        let status = resp.status();
        logd!("{:?} {} -> {}", req.method, req.url, status);
        Ok(Response { ok: status.is_success(), status: status.as_u16(), body: resp.text()? })
    }
}
