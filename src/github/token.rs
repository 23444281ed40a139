//! Credential validation against `GET /user`.

use reqwest::StatusCode;

use crate::github::client::GitHubClient;
use crate::models::TokenCheck;

const INVALID_TOKEN_MESSAGE: &str = "GitHub token is invalid, expired or lacks required scopes.";

/// Verify the configured token by asking who it authenticates as.
pub async fn test_token(client: &GitHubClient) -> TokenCheck {
    let url = client.api_url("/user");
    tracing::debug!(%url, "testing GitHub token");

    let response = match client.get(&url).await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!(error = %e, "transport failure while validating token");
            return TokenCheck::invalid("TRANSPORT_ERROR", format!("Unexpected error: {e}"));
        }
    };

    let status = response.status();
    if status.is_success() {
        return match response.json::<serde_json::Value>().await {
            Ok(body) => {
                let login = body
                    .get("login")
                    .and_then(|v| v.as_str())
                    .unwrap_or("unknown")
                    .to_string();
                TokenCheck::valid(login)
            }
            Err(e) => TokenCheck::invalid("DECODE_ERROR", format!("Error validating token: {e}")),
        };
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return TokenCheck::invalid(status.to_string(), INVALID_TOKEN_MESSAGE);
    }

    TokenCheck::invalid(
        status.to_string(),
        format!("Unexpected status when validating token: {status}"),
    )
}
