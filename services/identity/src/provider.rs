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

use crate::fetch_token::select_token_fetcher;
use crate::{CredentialToken, FetchToken, Result};
use azblob_core::time::now_unix;
use azblob_core::utils::Redact;
use azblob_core::Context;
use log::debug;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::sync::{Arc, Mutex};

/// One cache slot per resource.
///
/// The async mutex is held across the fetch so concurrent callers for the
/// same resource wait for a single refresh instead of racing.
type Slot = Arc<tokio::sync::Mutex<Option<CredentialToken>>>;

/// CredentialProvider hands out access tokens, caching one token per resource.
///
/// A cached token is served until it gets within five minutes of its expiry;
/// after that the next call fetches a replacement. Failed fetches leave the
/// cache untouched.
pub struct CredentialProvider {
    ctx: Context,
    fetcher: Arc<dyn FetchToken>,
    cache: Mutex<HashMap<String, Slot>>,
}

impl Debug for CredentialProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let resources = self
            .cache
            .lock()
            .map(|cache| cache.len())
            .unwrap_or_default();
        f.debug_struct("CredentialProvider")
            .field("ctx", &self.ctx)
            .field("fetcher", &self.fetcher)
            .field("resources", &resources)
            .finish()
    }
}

impl CredentialProvider {
    /// Create a new provider with an empty cache.
    pub fn new(ctx: Context, fetcher: impl FetchToken) -> Self {
        Self {
            ctx,
            fetcher: Arc::new(fetcher),
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// The context used for fetching tokens.
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Get an access token for `resource`.
    ///
    /// Returns the cached token when it is still valid, otherwise fetches a
    /// new one and replaces the cache entry with it.
    pub async fn get_access_token(&self, resource: &str) -> Result<String> {
        let slot = self.slot(resource);
        let mut entry = slot.lock().await;

        if let Some(token) = entry.as_ref().filter(|t| t.is_valid_at(now_unix())) {
            debug!(
                "serving cached token {:?} for {resource}",
                Redact::from(token.access_token())
            );
            return Ok(token.access_token().to_string());
        }

        debug!("no valid cached token for {resource}, fetching");
        let token = self.fetcher.fetch_token(&self.ctx, resource).await?;
        debug!(
            "fetched token {:?} for {resource} expiring at {}",
            Redact::from(token.access_token()),
            token.expires_at()
        );

        let access_token = token.access_token().to_string();
        *entry = Some(token);
        Ok(access_token)
    }

    /// The token currently cached for `resource`, valid or not.
    pub async fn cached_token(&self, resource: &str) -> Option<CredentialToken> {
        let slot = self
            .cache
            .lock()
            .expect("lock poisoned")
            .get(resource)
            .cloned()?;
        let entry = slot.lock().await;
        entry.clone()
    }

    fn slot(&self, resource: &str) -> Slot {
        self.cache
            .lock()
            .expect("lock poisoned")
            .entry(resource.to_string())
            .or_default()
            .clone()
    }
}

/// Build a provider for the current environment.
///
/// Uses the managed identity endpoint when `IDENTITY_ENDPOINT` is set and the
/// Azure CLI otherwise.
pub fn default_credential_provider(ctx: Context) -> CredentialProvider {
    let fetcher = select_token_fetcher(&ctx);
    CredentialProvider::new(ctx, fetcher)
}
