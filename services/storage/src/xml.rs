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

//! Parsing of the XML listings returned by Azure Storage.

use crate::{BlobInfo, ContainerInfo, Result, StorageError};
use azblob_core::time::{parse_http_date, DateTime};
use quick_xml::de;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListContainersResponse {
    containers: Containers,
}

#[derive(Deserialize)]
struct Containers {
    #[serde(rename = "Container", default)]
    containers: Vec<Container>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Container {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListBlobsResponse {
    blobs: Blobs,
}

#[derive(Deserialize)]
struct Blobs {
    #[serde(rename = "Blob", default)]
    blobs: Vec<Blob>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Blob {
    name: String,
    properties: BlobProperties,
}

#[derive(Deserialize)]
struct BlobProperties {
    #[serde(rename = "Creation-Time", deserialize_with = "deserialize_http_date")]
    creation_time: DateTime,
    #[serde(rename = "Last-Modified", deserialize_with = "deserialize_http_date")]
    last_modified: DateTime,
    #[serde(rename = "Content-Length", default)]
    content_length: Option<u64>,
    #[serde(rename = "Etag", default)]
    etag: Option<String>,
}

fn deserialize_http_date<'de, D>(deserializer: D) -> std::result::Result<DateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_http_date(&s).map_err(serde::de::Error::custom)
}

/// Azure prefixes its XML bodies with a UTF-8 BOM.
fn strip_bom(body: &str) -> &str {
    body.strip_prefix('\u{feff}').unwrap_or(body)
}

/// Parse the body of `GET <base>?comp=list`.
pub fn parse_list_containers(body: &str) -> Result<Vec<ContainerInfo>> {
    let resp: ListContainersResponse = de::from_str(strip_bom(body)).map_err(|e| {
        StorageError::new(format!("failed to parse list containers response: {e}"))
            .with_source(e)
    })?;

    Ok(resp
        .containers
        .containers
        .into_iter()
        .map(|c| ContainerInfo { name: c.name })
        .collect())
}

/// Parse the body of `GET <base><container>?restype=container&comp=list`.
pub fn parse_list_blobs(body: &str) -> Result<Vec<BlobInfo>> {
    let resp: ListBlobsResponse = de::from_str(strip_bom(body)).map_err(|e| {
        StorageError::new(format!("failed to parse list blobs response: {e}")).with_source(e)
    })?;

    Ok(resp
        .blobs
        .blobs
        .into_iter()
        .map(|b| BlobInfo {
            name: b.name,
            last_modified: b.properties.last_modified,
            creation_time: b.properties.creation_time,
            content_length: b.properties.content_length,
            etag: b.properties.etag,
        })
        .collect())
}
