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

//! Azure identity token acquisition.
//!
//! This crate fetches access tokens from one of two sources and caches them
//! per resource:
//!
//! - Managed identity (`IDENTITY_ENDPOINT` + `IDENTITY_HEADER`)
//! - Azure CLI (`az account get-access-token`)
//!
//! # Example
//!
//! ```rust,no_run
//! use azblob_command_execute_tokio::TokioCommandExecute;
//! use azblob_core::{Context, OsEnv};
//! use azblob_http_send_reqwest::ReqwestHttpSend;
//! use azblob_identity::{default_credential_provider, STORAGE_RESOURCE};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_command_execute(TokioCommandExecute)
//!         .with_env(OsEnv);
//!
//!     let provider = default_credential_provider(ctx);
//!     let token = provider.get_access_token(STORAGE_RESOURCE).await?;
//!     println!("got a token of {} bytes", token.len());
//!     Ok(())
//! }
//! ```

mod constants;
pub use constants::{EXPIRY_MARGIN_SECS, STORAGE_RESOURCE};

mod error;
pub use error::{CredentialError, Result};

mod token;
pub use token::CredentialToken;

mod fetch_token;
pub use fetch_token::*;

mod provider;
pub use provider::{default_credential_provider, CredentialProvider};
