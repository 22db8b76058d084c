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

use azblob_core::time::DateTime;
use bytes::Bytes;

/// A container returned by `list_containers`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerInfo {
    /// Container name.
    pub name: String,
}

/// A blob returned by `list_blobs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobInfo {
    /// Blob name, including any virtual directory prefix.
    pub name: String,
    /// Last modification time.
    pub last_modified: DateTime,
    /// Creation time.
    pub creation_time: DateTime,
    /// Size in bytes, if reported.
    pub content_length: Option<u64>,
    /// Entity tag, if reported.
    pub etag: Option<String>,
}

/// The kind of blob, from the `x-ms-blob-type` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobType {
    /// Block blob, also assumed when the header is missing or unknown.
    Block,
    /// Page blob.
    Page,
    /// Append blob.
    Append,
}

impl BlobType {
    /// Interpret an `x-ms-blob-type` header value.
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some("PageBlob") => BlobType::Page,
            Some("AppendBlob") => BlobType::Append,
            _ => BlobType::Block,
        }
    }

    /// The wire name of this blob type.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlobType::Block => "BlockBlob",
            BlobType::Page => "PageBlob",
            BlobType::Append => "AppendBlob",
        }
    }
}

/// A downloaded blob.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobContent {
    /// Blob bytes.
    pub data: Bytes,
    /// Blob type reported by the service.
    pub blob_type: BlobType,
    /// `Last-Modified` header, if present and well formed.
    pub last_modified: Option<DateTime>,
}

/// How the service carried out a blob deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Soft deleted; recoverable during the retention period.
    Soft,
    /// Permanently deleted.
    Permanent,
}

impl DeleteOutcome {
    /// Interpret an `x-ms-delete-type-permanent` header value.
    ///
    /// Only the exact value `false` means soft deletion.
    pub fn from_header(value: Option<&str>) -> Self {
        match value {
            Some("false") => DeleteOutcome::Soft,
            _ => DeleteOutcome::Permanent,
        }
    }
}
