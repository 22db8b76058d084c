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

use crate::constants::{AZURE_STORAGE_ACCOUNT_NAME, AZURE_STORAGE_ENDPOINT};
use crate::{Result, StorageError};
use azblob_core::Context;

/// Config carries the settings needed to reach a Blob Storage account.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// `account_name` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_ACCOUNT_NAME`]
    pub account_name: Option<String>,
    /// `endpoint` will be loaded from
    ///
    /// - this field if it's `is_some`
    /// - env value: [`AZURE_STORAGE_ENDPOINT`]
    ///
    /// Takes precedence over `account_name`. Useful for sovereign clouds and
    /// local emulators.
    pub endpoint: Option<String>,
}

impl Config {
    /// Fill unset fields from the environment.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.account_name.is_none() {
            self.account_name = ctx
                .env_var(AZURE_STORAGE_ACCOUNT_NAME)
                .filter(|v| !v.is_empty());
        }

        if self.endpoint.is_none() {
            self.endpoint = ctx.env_var(AZURE_STORAGE_ENDPOINT).filter(|v| !v.is_empty());
        }

        self
    }

    /// Set the storage account name.
    pub fn with_account_name(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = Some(account_name.into());
        self
    }

    /// Set the blob service endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Resolve the blob service endpoint, always ending with `/`.
    pub fn endpoint(&self) -> Result<String> {
        let endpoint = match (&self.endpoint, &self.account_name) {
            (Some(endpoint), _) => endpoint.clone(),
            (None, Some(account)) => format!("https://{account}.blob.core.windows.net/"),
            (None, None) => {
                return Err(StorageError::new(format!(
                    "storage endpoint is not configured: set {AZURE_STORAGE_ENDPOINT} or {AZURE_STORAGE_ACCOUNT_NAME}"
                )))
            }
        };

        Ok(normalize_endpoint(endpoint))
    }
}

pub(crate) fn normalize_endpoint(mut endpoint: String) -> String {
    if !endpoint.ends_with('/') {
        endpoint.push('/');
    }
    endpoint
}
