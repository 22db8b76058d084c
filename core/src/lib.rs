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

//! Core components shared by the azblob crates.
//!
//! This crate provides the foundational types and traits used by the identity
//! and storage crates. It owns nothing network- or process-specific itself:
//! every side effect goes through a [`Context`] so that tests can substitute
//! deterministic fakes.
//!
//! ## Overview
//!
//! - **Context**: a container holding implementations for HTTP sending,
//!   command execution and environment access
//! - **Error**: the transport-level error returned by those implementations
//! - **Utilities**: time helpers and secret redaction for logs
//!
//! ## Example
//!
//! ```no_run
//! use azblob_core::{Context, StaticEnv};
//! use std::collections::HashMap;
//!
//! let ctx = Context::new().with_env(StaticEnv {
//!     envs: HashMap::from([("IDENTITY_ENDPOINT".to_string(), "http://localhost".to_string())]),
//! });
//!
//! assert_eq!(ctx.env_var("IDENTITY_ENDPOINT").as_deref(), Some("http://localhost"));
//! ```
//!
//! ## Traits
//!
//! - [`HttpSend`]: for sending HTTP requests
//! - [`CommandExecute`]: for running external commands
//! - [`Env`]: for environment variable access

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod time;
pub mod utils;

mod context;
pub use context::CommandExecute;
pub use context::CommandOutput;
pub use context::Context;
pub use context::Env;
pub use context::HttpSend;
pub use context::NoopCommandExecute;
pub use context::NoopEnv;
pub use context::NoopHttpSend;
pub use context::OsEnv;
pub use context::StaticEnv;

mod error;
pub use error::{Error, ErrorKind, Result};
