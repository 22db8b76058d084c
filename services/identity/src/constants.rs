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

// Env values used by the token fetchers.
pub const IDENTITY_ENDPOINT: &str = "IDENTITY_ENDPOINT";
pub const IDENTITY_HEADER: &str = "IDENTITY_HEADER";
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";

// Headers used by the managed identity endpoint.
pub const X_IDENTITY_HEADER: &str = "X-IDENTITY-HEADER";

pub const MANAGED_IDENTITY_API_VERSION: &str = "2019-08-01";

/// Resource scope for Azure Storage tokens.
pub const STORAGE_RESOURCE: &str = "https://storage.azure.com/";

/// Cached tokens are served only while they have at least this many seconds left.
pub const EXPIRY_MARGIN_SECS: i64 = 300;

pub const AZURE_CLI_PROGRAM: &str = "az";
pub const AZURE_CLI_SHELL: &str = "/bin/sh";
