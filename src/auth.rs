// ABOUTME: Zoho OAuth refresh-token exchange with a cached access token
// ABOUTME: Token staleness is detected by the API, not tracked locally

use crate::{config::Credentials, Error, Result};
use reqwest::blocking::Client;
use std::time::Duration;

/// Exchanges a long-lived refresh token for short-lived access tokens.
///
/// Holds a single cached token slot, overwritten on each refresh. No expiry
/// is tracked; callers force a refresh when the API rejects the token.
pub struct TokenProvider {
    credentials: Credentials,
    client: Client,
    cached_token: Option<String>,
}

impl TokenProvider {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;

        Ok(TokenProvider {
            credentials,
            client,
            cached_token: None,
        })
    }

    /// Returns the cached access token, or performs a token-endpoint
    /// exchange when `force_refresh` is set or no token is cached yet.
    pub fn access_token(&mut self, force_refresh: bool) -> Result<String> {
        if !force_refresh {
            if let Some(token) = &self.cached_token {
                return Ok(token.clone());
            }
        }

        let token = self.exchange_refresh_token()?;
        self.cached_token = Some(token.clone());
        Ok(token)
    }

    fn exchange_refresh_token(&self) -> Result<String> {
        let token_url = format!(
            "{}/oauth/v2/token",
            self.credentials.account_server_url.trim_end_matches('/')
        );

        let params = [
            ("refresh_token", self.credentials.refresh_token.as_str()),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("grant_type", "refresh_token"),
        ];

        let response = self
            .client
            .post(&token_url)
            .form(&params)
            .send()
            .map_err(|e| Error::Auth(format!("token endpoint unreachable: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Auth(format!(
                "token endpoint returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let json: serde_json::Value = response
            .json()
            .map_err(|e| Error::Auth(format!("malformed token response: {}", e)))?;

        json.get("access_token")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| Error::Auth("token response missing access_token".into()))
    }

    #[cfg(test)]
    pub(crate) fn cached(&self) -> Option<&str> {
        self.cached_token.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_credentials() -> Credentials {
        Credentials {
            client_id: "id".into(),
            client_secret: "secret".into(),
            refresh_token: "refresh".into(),
            account_server_url: "http://127.0.0.1:1".into(),
        }
    }

    #[test]
    fn test_new_provider_has_no_cached_token() {
        let provider = TokenProvider::new(test_credentials()).unwrap();
        assert!(provider.cached().is_none());
    }

    #[test]
    fn test_unreachable_token_endpoint_is_auth_error() {
        // Port 1 refuses connections, so the exchange fails at transport level
        let mut provider = TokenProvider::new(test_credentials()).unwrap();
        let err = provider.access_token(false).unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }
}
