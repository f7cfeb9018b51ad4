use anyhow::{Context, Result};
use regex::Regex;

use crate::{config::Config, logger};

/// An authenticated console session: the cookie-bearing HTTP client plus the
/// current anti-forgery token. The token rotates twice during login and once
/// more after a dump import; every form post must carry the latest value.
#[derive(Debug)]
pub struct Session {
    pub(crate) client: reqwest::blocking::Client,
    pub(crate) base_url: String,
    pub(crate) server: String,
    pub(crate) token: String,
}

impl Session {
    /// Perform the login handshake against the console. Any token-extraction
    /// failure is fatal: without a valid token no further request can be
    /// authorized, so the caller aborts the whole run.
    pub fn login(config: &Config) -> Result<Session> {
        if config.accept_invalid_certs {
            logger::warn("TLS certificate verification disabled by config");
        }
        let client = reqwest::blocking::Client::builder()
            .cookie_store(true)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .context("failed to build HTTP client")?;

        let login_url = format!("{}/index.php", config.base_url);
        let page = client
            .get(&login_url)
            .send()
            .with_context(|| format!("failed to fetch {login_url}"))?
            .text()?;
        let token = extract_login_token(&page)?
            .ok_or_else(|| anyhow::anyhow!("no login token found in {login_url}"))?;
        logger::debug(&format!("login page token: {token}"));
        println!("Login token: {token}");

        let server = config.server.to_string();
        let body = client
            .post(&login_url)
            .form(&[
                ("pma_username", config.username.as_str()),
                ("pma_password", config.password.as_str()),
                ("server", server.as_str()),
                ("target", "index.php"),
                ("lang", "en"),
                ("collation_connection", "utf8_general_ci"),
                ("token", token.as_str()),
            ])
            .send()
            .context("login request failed")?
            .text()?;

        // The console gives no explicit rejection signal; a missing
        // post-login token is the only way to tell the login did not take.
        let token = extract_session_token(&body)?.ok_or_else(|| {
            anyhow::anyhow!("no post-login token found; login may have failed")
        })?;
        logger::info(&format!("logged in, session token: {token}"));
        println!("Logged in! New token: {token}");

        Ok(Session {
            client,
            base_url: config.base_url.clone(),
            server,
            token,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Token embedded in the login form: name="token" value="...".
pub fn extract_login_token(html: &str) -> Result<Option<String>> {
    let re = Regex::new(r#"name="token"\s+value="([^"]+)""#)?;
    Ok(re.captures(html).map(|c| c[1].to_string()))
}

/// Post-login token. The console emits it either JSON-embedded in an inline
/// script or as a hex query parameter in navigation links; the JSON form is
/// tried first and the first match of whichever pattern hits wins.
pub fn extract_session_token(html: &str) -> Result<Option<String>> {
    let json = Regex::new(r#""token":"([^"]+)""#)?;
    if let Some(c) = json.captures(html) {
        return Ok(Some(c[1].to_string()));
    }
    let url = Regex::new(r"token=([a-f0-9]+)")?;
    Ok(url.captures(html).map(|c| c[1].to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_token_from_form_markup() {
        let html = r#"<form><input type="hidden" name="token" value="abc123" /></form>"#;
        assert_eq!(extract_login_token(html).unwrap().as_deref(), Some("abc123"));
    }

    #[test]
    fn login_token_missing() {
        assert_eq!(extract_login_token("<html>no form here</html>").unwrap(), None);
    }

    #[test]
    fn session_token_json_form() {
        let html = r#"<script>var opts = {"token":"def456"};</script>"#;
        assert_eq!(extract_session_token(html).unwrap().as_deref(), Some("def456"));
    }

    #[test]
    fn session_token_url_fallback() {
        let html = r#"<a href="sql.php?db=test&token=0a1b2c3d">SQL</a>"#;
        assert_eq!(extract_session_token(html).unwrap().as_deref(), Some("0a1b2c3d"));
    }

    #[test]
    fn session_token_prefers_json_when_both_present() {
        let html = r#"<a href="index.php?token=feedbeef">x</a><script>{"token":"def456"}</script>"#;
        assert_eq!(extract_session_token(html).unwrap().as_deref(), Some("def456"));
    }

    #[test]
    fn session_token_first_match_wins() {
        let html = r#"{"token":"first"} {"token":"second"}"#;
        assert_eq!(extract_session_token(html).unwrap().as_deref(), Some("first"));
    }

    #[test]
    fn session_token_missing() {
        assert_eq!(extract_session_token("<html>login form again</html>").unwrap(), None);
    }
}
