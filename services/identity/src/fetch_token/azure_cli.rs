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

use crate::constants::{AZURE_CLI_PROGRAM, AZURE_CLI_SHELL};
use crate::{CredentialError, CredentialToken, FetchToken, Result};
use async_trait::async_trait;
use azblob_core::Context;
use log::debug;
use serde::Deserialize;

/// AzureCliFetcher fetches tokens by running `az account get-access-token`.
///
/// The command runs through `/bin/sh -c` so that whatever `az` resolves to on
/// the user's `PATH` (including shell wrappers) is used.
#[derive(Clone, Debug)]
pub struct AzureCliFetcher {
    program: String,
}

impl Default for AzureCliFetcher {
    fn default() -> Self {
        Self {
            program: AZURE_CLI_PROGRAM.to_string(),
        }
    }
}

impl AzureCliFetcher {
    /// Create a new fetcher invoking `az`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Invoke a different program instead of `az`.
    ///
    /// The value is placed into the shell command line as is.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn command_line(&self, resource: &str) -> String {
        format!(
            "{} account get-access-token --resource {}",
            self.program,
            shell_quote(resource)
        )
    }
}

/// Quote `s` as a single shell word.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r"'\''"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AzureCliToken {
    access_token: String,
    expires_on: String,
    #[serde(rename = "expires_on", default)]
    expires_on_timestamp: Option<i64>,
}

impl AzureCliToken {
    // Older `az` prints `expiresOn` as local time ("2023-10-31 21:59:10.000000");
    // only newer releases add the numeric `expires_on`.
    fn unix_seconds(&self) -> i64 {
        self.expires_on
            .trim()
            .parse::<i64>()
            .ok()
            .or(self.expires_on_timestamp)
            .unwrap_or_else(|| {
                debug!(
                    "azure cli returned unparsable expiresOn {:?}, treating as expired",
                    self.expires_on
                );
                0
            })
    }
}

#[async_trait]
impl FetchToken for AzureCliFetcher {
    async fn fetch_token(&self, ctx: &Context, resource: &str) -> Result<CredentialToken> {
        let command = self.command_line(resource);
        debug!("fetching token via azure cli: {command}");

        let output = ctx
            .command_execute(AZURE_CLI_SHELL, &["-c", &command])
            .await
            .map_err(|e| CredentialError::Other(e.to_string()))?;

        if !output.success() {
            return Err(CredentialError::Other(
                String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            ));
        }

        let token: AzureCliToken = serde_json::from_slice(&output.stdout).map_err(|e| {
            CredentialError::DecodeError(format!("failed to decode azure cli output: {e}"))
        })?;

        let expires_at = token.unix_seconds();
        Ok(CredentialToken::new(token.access_token, expires_at, resource))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line() {
        let fetcher = AzureCliFetcher::new();
        assert_eq!(
            fetcher.command_line("https://storage.azure.com/"),
            "az account get-access-token --resource 'https://storage.azure.com/'"
        );
    }

    #[test]
    fn test_shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_parse_azure_cli_token() {
        let json = r#"{
            "accessToken": "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiIsIng1dCI6IjJaUXBKM...",
            "expiresOn": "2023-10-31 21:59:10.000000",
            "expires_on": 1698760750,
            "subscription": "0b1f6471-1bf0-4dda-aec3-cb9272f09590",
            "tenant": "54826b22-38d6-4fb2-bad9-b7b93a3e9c5a",
            "tokenType": "Bearer"
        }"#;

        let token: AzureCliToken = serde_json::from_str(json).unwrap();
        assert_eq!(
            token.access_token,
            "eyJ0eXAiOiJKV1QiLCJhbGciOiJSUzI1NiIsIng1dCI6IjJaUXBKM..."
        );
        assert_eq!(token.expires_on_timestamp, Some(1698760750));
        assert_eq!(token.unix_seconds(), 1698760750);
    }

    #[test]
    fn test_decimal_expires_on() {
        let json = r#"{"accessToken": "t", "expiresOn": "1698760750"}"#;
        let token: AzureCliToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.unix_seconds(), 1698760750);
    }

    #[test]
    fn test_unparsable_expires_on_defaults_to_zero() {
        let json = r#"{"accessToken": "t", "expiresOn": "2023-10-31 21:59:10.000000"}"#;
        let token: AzureCliToken = serde_json::from_str(json).unwrap();
        assert_eq!(token.unix_seconds(), 0);
    }
}
