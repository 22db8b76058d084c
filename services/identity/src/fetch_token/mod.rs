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

use crate::{CredentialToken, Result};
use async_trait::async_trait;
use azblob_core::Context;
use std::fmt::Debug;

mod managed_identity;
pub use managed_identity::ManagedIdentityFetcher;

mod azure_cli;
pub use azure_cli::AzureCliFetcher;

mod default;
pub use default::{select_token_fetcher, TokenFetcher};

/// FetchToken acquires a fresh access token for a resource.
///
/// Implementations never cache: [`CredentialProvider`](crate::CredentialProvider)
/// owns caching and refresh.
#[async_trait]
pub trait FetchToken: Debug + Send + Sync + 'static {
    /// Fetch a new token valid for `resource`.
    async fn fetch_token(&self, ctx: &Context, resource: &str) -> Result<CredentialToken>;
}
