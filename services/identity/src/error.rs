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

use thiserror::Error;

/// Errors raised while acquiring an access token.
///
/// Every variant carries diagnostic text. A failed fetch never populates the
/// token cache.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CredentialError {
    /// A required environment variable is missing or unusable.
    #[error("bad environment variable: {0}")]
    BadEnvironmentVariable(String),
    /// The identity endpoint could not be reached or answered with an error status.
    #[error("connection error: {0}")]
    ConnectionError(String),
    /// The token response could not be decoded.
    #[error("decode error: {0}")]
    DecodeError(String),
    /// Any other failure, such as the Azure CLI exiting non-zero.
    ///
    /// Carries the captured error output verbatim.
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, CredentialError>;
