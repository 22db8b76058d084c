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

use crate::mock::MockCommandExecute;
use azblob_core::Context;
use azblob_identity::{
    AzureCliFetcher, CredentialError, CredentialProvider, FetchToken, STORAGE_RESOURCE,
};
use pretty_assertions::assert_eq;

const CLI_OUTPUT: &str = r#"{
  "accessToken": "eyJ0eXAiOiJKV1QiLCJhbGciOi",
  "expiresOn": "4102444800",
  "subscription": "0b1f6471-1bf0-4dda-aec3-cb9272f09590",
  "tenant": "54826b22-38d6-4fb2-bad9-b7b93a3e9c5a",
  "tokenType": "Bearer"
}"#;

#[tokio::test]
async fn test_fetch_token() {
    let cmd = MockCommandExecute::new(0, CLI_OUTPUT, "");
    let ctx = Context::new().with_command_execute(cmd.clone());

    let token = AzureCliFetcher::new()
        .fetch_token(&ctx, STORAGE_RESOURCE)
        .await
        .unwrap();

    assert_eq!(token.access_token(), "eyJ0eXAiOiJKV1QiLCJhbGciOi");
    assert_eq!(token.expires_at(), 4102444800);
    assert_eq!(token.resource(), STORAGE_RESOURCE);

    let calls = cmd.calls.lock().unwrap();
    assert_eq!(
        *calls,
        vec![(
            "/bin/sh".to_string(),
            vec![
                "-c".to_string(),
                "az account get-access-token --resource 'https://storage.azure.com/'".to_string()
            ]
        )]
    );
}

#[tokio::test]
async fn test_command_failure_carries_stderr() {
    let cmd = MockCommandExecute::new(1, "", "az: command not found\n");
    let ctx = Context::new().with_command_execute(cmd);

    let err = AzureCliFetcher::new()
        .fetch_token(&ctx, STORAGE_RESOURCE)
        .await
        .unwrap_err();

    assert_eq!(err, CredentialError::Other("az: command not found".to_string()));
}

#[tokio::test]
async fn test_spawn_failure_is_other() {
    // No command executor configured.
    let ctx = Context::new();

    let err = AzureCliFetcher::new()
        .fetch_token(&ctx, STORAGE_RESOURCE)
        .await
        .unwrap_err();

    assert!(matches!(err, CredentialError::Other(_)), "{err:?}");
}

#[tokio::test]
async fn test_unexpected_output_is_decode_error() {
    for stdout in ["", "Please run 'az login' to setup account.", r#"{"expiresOn":"1"}"#] {
        let ctx = Context::new().with_command_execute(MockCommandExecute::new(0, stdout, ""));

        let err = AzureCliFetcher::new()
            .fetch_token(&ctx, STORAGE_RESOURCE)
            .await
            .unwrap_err();

        assert!(matches!(err, CredentialError::DecodeError(_)), "{stdout}: {err:?}");
    }
}

#[tokio::test]
async fn test_failed_fetch_is_not_cached() {
    let ctx = Context::new().with_command_execute(MockCommandExecute::new(
        2,
        "",
        "ERROR: Please run 'az login' to setup account.",
    ));
    let provider = CredentialProvider::new(ctx, AzureCliFetcher::new());

    let err = provider.get_access_token(STORAGE_RESOURCE).await.unwrap_err();

    assert_eq!(
        err,
        CredentialError::Other("ERROR: Please run 'az login' to setup account.".to_string())
    );
    assert!(provider.cached_token(STORAGE_RESOURCE).await.is_none());
}

#[cfg(unix)]
mod real_process {
    use super::*;
    use pretty_assertions::assert_eq;
    use azblob_command_execute_tokio::TokioCommandExecute;
    use std::fs;
    use std::path::Path;

    /// Write a stand-in for `az` and return the program string running it.
    fn write_script(dir: &Path, body: &str) -> String {
        let path = dir.join("fake-az");
        fs::write(&path, format!("{body}\n")).unwrap();
        format!("/bin/sh {}", path.display())
    }

    #[tokio::test]
    async fn test_fake_az_success() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(
            dir.path(),
            r#"echo "{\"accessToken\": \"from-$4\", \"expiresOn\": \"4102444800\"}""#,
        );
        let ctx = Context::new().with_command_execute(TokioCommandExecute);

        let token = AzureCliFetcher::new()
            .with_program(script)
            .fetch_token(&ctx, "https://vault.azure.net")
            .await
            .unwrap();

        assert_eq!(token.access_token(), "from-https://vault.azure.net");
        assert_eq!(token.expires_at(), 4102444800);
    }

    #[tokio::test]
    async fn test_fake_az_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let script = write_script(dir.path(), "echo 'az: command not found' >&2; exit 1");
        let ctx = Context::new().with_command_execute(TokioCommandExecute);

        let err = AzureCliFetcher::new()
            .with_program(script)
            .fetch_token(&ctx, STORAGE_RESOURCE)
            .await
            .unwrap_err();

        assert_eq!(err, CredentialError::Other("az: command not found".to_string()));
    }
}
