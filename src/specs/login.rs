// src/specs/login.rs
//
// Login page: the form carries a per-visit anti-forgery token that has to be
// echoed back with the credentials.

use scraper::Html;

use crate::config::consts::{INVALID_LOGIN_MARKER, LOGIN_FORM_ID, TOKEN_FIELD};
use crate::core::html::{find_all, Anchor};
use crate::core::Node;
use crate::error::Result;

/// The token value from the login form's hidden `javax.faces.ViewState` input.
pub fn parse_login_form_token(page: &str) -> Result<String> {
    let doc = Html::parse_document(page);
    let form = find_all(doc.root_element(), &Anchor::tag("form"))
        .into_iter()
        .find(|f| f.attribute("id") == Some(LOGIN_FORM_ID))
        .ok_or_else(|| content_err!("login form #{LOGIN_FORM_ID}"))?;

    let input = find_all(form, &Anchor::tag("input"))
        .into_iter()
        .find(|i| i.attribute("name") == Some(TOKEN_FIELD))
        .ok_or_else(|| content_err!("{TOKEN_FIELD} field in login form"))?;

    input
        .attribute("value")
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| content_err!("value on {TOKEN_FIELD} field"))
}

/// True when the response is the login page telling us the credentials were wrong.
pub fn is_login_rejected(page: &str) -> bool {
    page.contains(INVALID_LOGIN_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const PAGE: &str = r#"
        <html><body>
          <form id="searchForm"><input type="hidden" name="javax.faces.ViewState" value="wrong"/></form>
          <form id="j_idt13" method="post" action="/ClipperCard/loginFrame.jsf">
            <input type="text" name="j_idt13:username"/>
            <input type="password" name="j_idt13:password"/>
            <input type="hidden" name="javax.faces.ViewState" value="-123:456" autocomplete="off"/>
          </form>
        </body></html>
    "#;

    #[test]
    fn token_comes_from_login_form_only() {
        assert_eq!(parse_login_form_token(PAGE).unwrap(), "-123:456");
    }

    #[test]
    fn missing_form_is_content_error() {
        let err = parse_login_form_token("<form id=\"other\"></form>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Content);
        assert!(err.to_string().contains("login form"));
    }

    #[test]
    fn missing_token_field_is_content_error() {
        let err = parse_login_form_token(r#"<form id="j_idt13"><input name="x"/></form>"#).unwrap_err();
        assert!(err.to_string().contains("javax.faces.ViewState"));
    }

    #[test]
    fn rejection_marker() {
        assert!(is_login_rejected("<p>Your email or password is incorrect.</p>"));
        assert!(!is_login_rejected(PAGE));
    }
}
