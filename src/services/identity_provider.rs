use async_trait::async_trait;
use serde::Deserialize;

use crate::config::GoogleConfig;

/// Profile handed back by a third-party identity provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalProfile {
    pub email: String,
    pub display_name: String,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
}

/// Exchanges a provider authorization code for an [`ExternalProfile`].
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Consent page the user is redirected to.
    fn authorization_url(&self, state: &str) -> String;

    async fn exchange(&self, code: &str) -> Result<ExternalProfile, String>;
}

pub struct GoogleIdentityProvider {
    config: GoogleConfig,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct GoogleUserInfo {
    email: Option<String>,
    name: Option<String>,
    given_name: Option<String>,
    family_name: Option<String>,
}

impl GoogleIdentityProvider {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        let params = [
            ("client_id", self.config.client_id.as_str()),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", "email profile"),
            ("state", state),
            ("prompt", "select_account"),
        ];

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        format!("https://accounts.google.com/o/oauth2/v2/auth?{}", query_string)
    }

    async fn exchange(&self, code: &str) -> Result<ExternalProfile, String> {
        let token_response = self
            .http
            .post("https://oauth2.googleapis.com/token")
            .form(&[
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await
            .map_err(|e| format!("Failed to exchange code: {}", e))?;

        if !token_response.status().is_success() {
            return Err(format!(
                "Failed to exchange authorization code: HTTP {}",
                token_response.status()
            ));
        }

        let tokens: GoogleTokenResponse = token_response
            .json()
            .await
            .map_err(|e| format!("Failed to parse token response: {}", e))?;

        let user_info: GoogleUserInfo = self
            .http
            .get("https://www.googleapis.com/oauth2/v2/userinfo")
            .bearer_auth(&tokens.access_token)
            .send()
            .await
            .map_err(|e| format!("Failed to get user info: {}", e))?
            .json()
            .await
            .map_err(|e| format!("Failed to parse user info: {}", e))?;

        let email = user_info.email.ok_or_else(|| "No email in user info".to_string())?;

        Ok(ExternalProfile {
            display_name: user_info.name.unwrap_or_else(|| email.clone()),
            email,
            given_name: user_info.given_name,
            family_name: user_info.family_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consent_url_asks_for_account_selection() {
        let provider = GoogleIdentityProvider::new(GoogleConfig {
            client_id: "client-123".into(),
            client_secret: "secret".into(),
            redirect_uri: "http://localhost:4000/users/google/callback".into(),
        });

        let url = provider.authorization_url("state-1");
        assert!(url.starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert!(url.contains("client_id=client-123"));
        assert!(url.contains("scope=email%20profile"));
        assert!(url.contains("prompt=select_account"));
        let redirect = "redirect_uri=http%3A%2F%2Flocalhost%3A4000%2Fusers%2Fgoogle%2Fcallback";
        assert!(url.contains(redirect));
    }
}
