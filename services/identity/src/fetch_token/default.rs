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

use crate::constants::IDENTITY_ENDPOINT;
use crate::fetch_token::{AzureCliFetcher, ManagedIdentityFetcher};
use crate::{CredentialToken, FetchToken, Result};
use async_trait::async_trait;
use azblob_core::Context;
use log::debug;

/// The token fetching strategies a provider can be built with.
///
/// A provider uses exactly one of them, chosen at construction time. There is
/// no fallback from one strategy to the other.
#[derive(Debug, Clone)]
pub enum TokenFetcher {
    /// Managed identity endpoint of the hosting Azure resource.
    ManagedIdentity(ManagedIdentityFetcher),
    /// The locally installed Azure CLI.
    AzureCli(AzureCliFetcher),
}

#[async_trait]
impl FetchToken for TokenFetcher {
    async fn fetch_token(&self, ctx: &Context, resource: &str) -> Result<CredentialToken> {
        match self {
            TokenFetcher::ManagedIdentity(f) => f.fetch_token(ctx, resource).await,
            TokenFetcher::AzureCli(f) => f.fetch_token(ctx, resource).await,
        }
    }
}

/// Choose the fetcher for the current environment.
///
/// - `IDENTITY_ENDPOINT` set (and non-empty): managed identity
/// - otherwise: Azure CLI
pub fn select_token_fetcher(ctx: &Context) -> TokenFetcher {
    if ctx
        .env_var(IDENTITY_ENDPOINT)
        .is_some_and(|v| !v.is_empty())
    {
        debug!("{IDENTITY_ENDPOINT} is set, using managed identity");
        TokenFetcher::ManagedIdentity(ManagedIdentityFetcher::new().from_env(ctx))
    } else {
        debug!("{IDENTITY_ENDPOINT} is not set, using azure cli");
        TokenFetcher::AzureCli(AzureCliFetcher::new())
    }
}
