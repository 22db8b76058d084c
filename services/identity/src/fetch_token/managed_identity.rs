// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use crate::constants::{
    AZURE_CLIENT_ID, IDENTITY_ENDPOINT, IDENTITY_HEADER, MANAGED_IDENTITY_API_VERSION,
    X_IDENTITY_HEADER,
};
use crate::{CredentialError, CredentialToken, FetchToken, Result};
use async_trait::async_trait;
use azblob_core::Context;
use bytes::Bytes;
use log::debug;
use serde::Deserialize;

/// Fetch tokens from the managed identity endpoint exposed to Azure compute
/// resources (App Service, Functions, Container Apps).
///
/// The endpoint and its secret are read from `IDENTITY_ENDPOINT` and
/// `IDENTITY_HEADER` on every fetch.
///
/// Reference: <https://learn.microsoft.com/en-us/azure/app-service/overview-managed-identity?tabs=portal,http#rest-endpoint-reference>
#[derive(Debug, Clone, Default)]
pub struct ManagedIdentityFetcher {
    client_id: Option<String>,
}

impl ManagedIdentityFetcher {
    /// Create a new managed identity fetcher using the system-assigned identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the user-assigned identity with this client id.
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Pick up optional settings such as `AZURE_CLIENT_ID` from the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if let Some(client_id) = ctx.env_var(AZURE_CLIENT_ID).filter(|v| !v.is_empty()) {
            self.client_id = Some(client_id);
        }
        self
    }

    fn build_url(&self, endpoint: &str, resource: &str) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("resource", resource);
        query.append_pair("api-version", MANAGED_IDENTITY_API_VERSION);
        if let Some(client_id) = &self.client_id {
            query.append_pair("client_id", client_id);
        }

        let sep = if endpoint.contains('?') { '&' } else { '?' };
        format!("{endpoint}{sep}{}", query.finish())
    }
}

#[derive(Deserialize)]
struct ManagedIdentityTokenResponse {
    access_token: String,
    expires_on: ExpiresOn,
    resource: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    client_id: Option<String>,
}

/// `expires_on` is documented as a string of unix seconds, but some hosts
/// send a bare number. Anything else is kept so the fetch still succeeds
/// with an already expired token.
#[derive(Deserialize)]
#[serde(untagged)]
enum ExpiresOn {
    Text(String),
    Seconds(i64),
    Unknown(serde_json::Value),
}

impl ExpiresOn {
    fn unix_seconds(&self) -> i64 {
        let parsed = match self {
            ExpiresOn::Seconds(v) => Some(*v),
            ExpiresOn::Text(v) => v.trim().parse().ok(),
            ExpiresOn::Unknown(_) => None,
        };
        parsed.unwrap_or_else(|| {
            debug!("managed identity returned unparsable expires_on, treating as expired");
            0
        })
    }
}

fn required_env(ctx: &Context, key: &str) -> Result<String> {
    ctx.env_var(key)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CredentialError::BadEnvironmentVariable(format!("{key} is not set")))
}

#[async_trait]
impl FetchToken for ManagedIdentityFetcher {
    async fn fetch_token(&self, ctx: &Context, resource: &str) -> Result<CredentialToken> {
        let endpoint = required_env(ctx, IDENTITY_ENDPOINT)?;
        let secret = required_env(ctx, IDENTITY_HEADER)?;

        let url = self.build_url(&endpoint, resource);
        debug!("fetching managed identity token from {url}");

        let req = http::Request::builder()
            .method(http::Method::GET)
            .uri(&url)
            .header(X_IDENTITY_HEADER, secret)
            .body(Bytes::new())
            .map_err(|e| {
                CredentialError::BadEnvironmentVariable(format!(
                    "{IDENTITY_ENDPOINT} or {IDENTITY_HEADER} is invalid: {e}"
                ))
            })?;

        let resp = ctx
            .http_send(req)
            .await
            .map_err(|e| CredentialError::ConnectionError(e.to_string()))?;

        let status = resp.status();
        if status.as_u16() >= 400 {
            let body = String::from_utf8_lossy(resp.body());
            return Err(CredentialError::ConnectionError(format!(
                "managed identity endpoint responded with status {status}: {body}"
            )));
        }

        let token: ManagedIdentityTokenResponse =
            serde_json::from_slice(resp.body()).map_err(|e| {
                CredentialError::DecodeError(format!(
                    "failed to decode managed identity response: {e}"
                ))
            })?;
        debug!(
            "managed identity issued {} token for client {:?}",
            token.token_type.as_deref().unwrap_or("unknown"),
            token.client_id
        );

        let resource = if token.resource.is_empty() {
            resource.to_string()
        } else {
            token.resource
        };

        Ok(CredentialToken::new(
            token.access_token,
            token.expires_on.unix_seconds(),
            resource,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let fetcher = ManagedIdentityFetcher::new();
        assert_eq!(
            fetcher.build_url("http://localhost:42356/msi/token", "https://storage.azure.com/"),
            "http://localhost:42356/msi/token?resource=https%3A%2F%2Fstorage.azure.com%2F&api-version=2019-08-01"
        );
    }

    #[test]
    fn test_build_url_with_client_id_and_existing_query() {
        let fetcher = ManagedIdentityFetcher::new().with_client_id("0000-1111");
        assert_eq!(
            fetcher.build_url("http://localhost/token?x=1", "https://vault.azure.net"),
            "http://localhost/token?x=1&resource=https%3A%2F%2Fvault.azure.net&api-version=2019-08-01&client_id=0000-1111"
        );
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "access_token": "eyJ0eXAi...",
            "expires_on": "1586984735",
            "resource": "https://storage.azure.com/",
            "token_type": "Bearer",
            "client_id": "5E29463D-71DA-4FE0-8E69-999B57DB23B0"
        }"#;

        let token: ManagedIdentityTokenResponse = serde_json::from_str(body).unwrap();
        assert_eq!(token.access_token, "eyJ0eXAi...");
        assert_eq!(token.expires_on.unix_seconds(), 1586984735);
        assert_eq!(token.token_type.as_deref(), Some("Bearer"));
    }

    #[test]
    fn test_parse_response_with_numeric_or_bad_expiry() {
        let numeric = r#"{"access_token":"t","expires_on":1586984735,"resource":"r"}"#;
        let token: ManagedIdentityTokenResponse = serde_json::from_str(numeric).unwrap();
        assert_eq!(token.expires_on.unix_seconds(), 1586984735);

        for bad in [r#""tomorrow""#, "null", "1.7e9", "[]"] {
            let body = format!(r#"{{"access_token":"t","expires_on":{bad},"resource":"r"}}"#);
            let token: ManagedIdentityTokenResponse = serde_json::from_str(&body).unwrap();
            assert_eq!(token.expires_on.unix_seconds(), 0, "expires_on {bad}");
        }
    }

    #[test]
    fn test_from_env_reads_client_id() {
        use azblob_core::StaticEnv;
        use std::collections::HashMap;

        let ctx = Context::new().with_env(StaticEnv {
            envs: HashMap::from([(AZURE_CLIENT_ID.to_string(), "abc".to_string())]),
        });

        let fetcher = ManagedIdentityFetcher::new().from_env(&ctx);
        assert_eq!(fetcher.client_id.as_deref(), Some("abc"));
    }
}
