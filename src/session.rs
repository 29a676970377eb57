// src/session.rs
//
// Login state plus the one account page it produced. Profile and cards are
// parsed from that page on demand; re-login to refresh.

use std::time::Duration;

use crate::config::consts::{
    LOGIN_FORM_ID, LOGIN_PASSWORD_FIELD, LOGIN_SUBMIT_FIELD, LOGIN_SUBMIT_VALUE,
    LOGIN_USERNAME_FIELD, TOKEN_FIELD,
};
use crate::config::{AppOptions, Endpoints, ExtractOptions};
use crate::core::net::{Request, Response};
use crate::core::{HttpTransport, Transport};
use crate::data::{CardsReport, Profile};
use crate::error::{Error, Result};
use crate::specs::{self, login};

#[derive(Clone, Debug, PartialEq, Eq)]
enum State {
    Unauthenticated,
    Authenticated { page: String },
    /// Credentials were rejected. Terminal.
    Rejected,
}

pub struct Session<T: Transport = HttpTransport> {
    transport: T,
    endpoints: Endpoints,
    extract: ExtractOptions,
    state: State,
}

impl Session<HttpTransport> {
    /// A live session configured from the app options.
    pub fn from_options(opts: &AppOptions) -> Result<Self> {
        let transport = HttpTransport::new(Duration::from_secs(opts.timeout_secs))?;
        Ok(Self::with_transport(transport, opts.endpoints.clone(), opts.extract.clone()))
    }
}

impl<T: Transport> Session<T> {
    pub fn with_transport(transport: T, endpoints: Endpoints, extract: ExtractOptions) -> Self {
        Self { transport, endpoints, extract, state: State::Unauthenticated }
    }

    /// Give back the transport, dropping any session state.
    pub fn into_transport(self) -> T {
        self.transport
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, State::Authenticated { .. })
    }

    /// GET the login page for its token, POST the credentials, then GET the
    /// account page and keep it. No retries.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        if self.state == State::Rejected {
            return Err(Error::Usage("credentials were rejected; start a new session"));
        }
        self.state = State::Unauthenticated;

        let login_url = self.endpoints.login_url.clone();
        logf!("fetching login page");
        let landing = self.fetch(&Request::get(&login_url))?;
        let token = login::parse_login_form_token(&landing.body)?;
        logd!("got login token ({} chars)", token.len());

        let form = vec![
            (LOGIN_FORM_ID, LOGIN_FORM_ID),
            (LOGIN_USERNAME_FIELD, username),
            (LOGIN_PASSWORD_FIELD, password),
            (LOGIN_SUBMIT_FIELD, LOGIN_SUBMIT_VALUE),
            (TOKEN_FIELD, token.as_str()),
        ];
        logf!("submitting credentials for {username}");
        let resp = self.fetch(&Request::post(&login_url, form))?;
        if login::is_login_rejected(&resp.body) {
            loge!("login rejected for {username}");
            self.state = State::Rejected;
            return Err(Error::Auth { username: s!(username) });
        }

        let account_url = self.endpoints.account_url.clone();
        let account = self.fetch(&Request::get(&account_url))?;
        logf!("account page fetched ({} bytes)", account.body.len());
        self.state = State::Authenticated { page: account.body };
        Ok(())
    }

    /// The raw account page from the last successful login.
    pub fn account_page(&self) -> Result<&str> {
        match &self.state {
            State::Authenticated { page } => Ok(page),
            _ => Err(Error::Usage("not logged in; call login() first")),
        }
    }

    pub fn profile(&self) -> Result<Profile> {
        specs::parse_profile(self.account_page()?)
    }

    pub fn cards(&self) -> Result<CardsReport> {
        specs::parse_cards_with(self.account_page()?, &self.extract)
    }

    fn fetch(&mut self, req: &Request<'_>) -> Result<Response> {
        let resp = self.transport.fetch(req)?;
        if !resp.ok {
            loge!("{:?} {} failed with HTTP {}", req.method, req.url, resp.status);
            return Err(Error::Http { status: resp.status, url: s!(req.url) });
        }
        Ok(resp)
    }
}
