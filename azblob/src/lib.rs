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

//! Azure identity tokens and Blob Storage REST operations.
//!
//! This crate bundles the azblob family behind feature flags:
//!
//! - `identity`: access tokens from managed identity or the Azure CLI, see [`identity`]
//! - `storage`: the Blob Storage client, see [`storage`]
//! - `default-context`: a ready-made [`Context`] backed by reqwest, tokio and the OS
//!   environment, see [`default_context`]
//!
//! # Example
//!
//! ```no_run
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = azblob::default_storage_client(&azblob::storage::Config::default())?;
//!
//! for container in client.list_containers().await? {
//!     println!("{}", container.name);
//! }
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use azblob_core::*;

#[cfg(feature = "default-context")]
mod context;
#[cfg(feature = "default-context")]
pub use context::default_context;
#[cfg(all(feature = "default-context", feature = "storage"))]
pub use context::default_storage_client;

#[cfg(feature = "identity")]
pub mod identity {
    pub use azblob_identity::*;
}

#[cfg(feature = "storage")]
pub mod storage {
    pub use azblob_storage::*;
}
