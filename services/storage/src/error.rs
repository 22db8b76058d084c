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

use azblob_identity::CredentialError;
use thiserror::Error;

/// The error type for storage operations.
///
/// Storage failures are reported as text: the response body for failed
/// requests, or a description of what could not be parsed.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct StorageError {
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

impl StorageError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The error text.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CredentialError> for StorageError {
    fn from(err: CredentialError) -> Self {
        Self::new(format!("failed to get access token: {err}")).with_source(err)
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, StorageError>;
