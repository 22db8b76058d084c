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

//! Azure Blob Storage client
//!
//! This crate provides a small client for the Blob Storage REST API:
//! - List, create and delete containers
//! - List, download, upload and delete blobs
//!
//! Requests are authenticated with bearer tokens from
//! [`azblob_identity::CredentialProvider`].
//!
//! # Example
//!
//! ```rust,no_run
//! use azblob_command_execute_tokio::TokioCommandExecute;
//! use azblob_core::{Context, OsEnv};
//! use azblob_http_send_reqwest::ReqwestHttpSend;
//! use azblob_identity::default_credential_provider;
//! use azblob_storage::{Config, StorageClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let ctx = Context::new()
//!         .with_http_send(ReqwestHttpSend::default())
//!         .with_command_execute(TokioCommandExecute)
//!         .with_env(OsEnv);
//!
//!     let config = Config::default().from_env(&ctx);
//!     let provider = Arc::new(default_credential_provider(ctx));
//!     let client = StorageClient::from_config(provider, &config)?;
//!
//!     for container in client.list_containers().await? {
//!         println!("{}", container.name);
//!     }
//!     Ok(())
//! }
//! ```

mod constants;
pub use constants::STORAGE_API_VERSION;

mod config;
pub use config::Config;

mod error;
pub use error::{Result, StorageError};

mod model;
pub use model::{BlobContent, BlobInfo, BlobType, ContainerInfo, DeleteOutcome};

mod xml;
pub use xml::{parse_list_blobs, parse_list_containers};

mod client;
pub use client::StorageClient;
