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

use crate::constants::EXPIRY_MARGIN_SECS;
use azblob_core::time::now_unix;
use azblob_core::utils::Redact;
use std::fmt::{Debug, Formatter};

/// An access token for one resource together with its expiry.
///
/// Tokens are immutable once created: a refresh produces a new token that
/// replaces the cached one wholesale.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialToken {
    access_token: String,
    expires_at: i64,
    resource: String,
}

impl Debug for CredentialToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialToken")
            .field("access_token", &Redact::from(&self.access_token))
            .field("expires_at", &self.expires_at)
            .field("resource", &self.resource)
            .finish()
    }
}

impl CredentialToken {
    /// Create a new token.
    ///
    /// `expires_at` is expressed in unix seconds. Use `0` when the expiry is
    /// unknown so the token is never served from cache.
    pub fn new(
        access_token: impl Into<String>,
        expires_at: i64,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            expires_at,
            resource: resource.into(),
        }
    }

    /// The bearer token text.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Expiry in unix seconds.
    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    /// The resource scope this token was issued for.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Whether the token can still be served at `now` (unix seconds).
    ///
    /// A token is only usable while it has more than [`EXPIRY_MARGIN_SECS`]
    /// of validity left, so it never expires in flight.
    pub fn is_valid_at(&self, now: i64) -> bool {
        !self.access_token.is_empty() && self.expires_at > now.saturating_add(EXPIRY_MARGIN_SECS)
    }

    /// Whether the token can still be served right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(now_unix())
    }
}
