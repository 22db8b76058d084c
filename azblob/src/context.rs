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

use azblob_command_execute_tokio::TokioCommandExecute;
use azblob_core::{Context, OsEnv};
use azblob_http_send_reqwest::ReqwestHttpSend;

/// Build a [`Context`] for production use.
///
/// HTTP goes through a default [`reqwest::Client`], commands run as tokio
/// child processes and environment variables come from the process.
pub fn default_context() -> Context {
    Context::new()
        .with_http_send(ReqwestHttpSend::new(reqwest::Client::new()))
        .with_command_execute(TokioCommandExecute)
        .with_env(OsEnv)
}

/// Build a storage client for `config` on top of [`default_context`].
///
/// Unset config fields are filled from the environment. Credentials come from
/// [`azblob_identity::default_credential_provider`].
#[cfg(feature = "storage")]
pub fn default_storage_client(
    config: &azblob_storage::Config,
) -> azblob_storage::Result<azblob_storage::StorageClient> {
    use std::sync::Arc;

    let ctx = default_context();
    let config = config.clone().from_env(&ctx);
    let provider = Arc::new(azblob_identity::default_credential_provider(ctx));
    azblob_storage::StorageClient::from_config(provider, &config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_reads_os_env() {
        let ctx = default_context();
        assert_eq!(ctx.env_var("PATH"), std::env::var("PATH").ok());
    }

    #[cfg(feature = "storage")]
    #[test]
    fn test_default_storage_client_uses_config() {
        let config = azblob_storage::Config::default()
            .with_account_name("ignored")
            .with_endpoint("http://127.0.0.1:10000/devstoreaccount1");
        let client = default_storage_client(&config).unwrap();
        assert_eq!(client.base_uri(), "http://127.0.0.1:10000/devstoreaccount1/");
    }
}
