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

use crate::config::normalize_endpoint;
use crate::constants::{
    BLOB_NAME_ENCODE_SET, PATH_SEGMENT_ENCODE_SET, STORAGE_API_VERSION, X_MS_BLOB_TYPE,
    X_MS_DELETE_TYPE_PERMANENT, X_MS_VERSION,
};
use crate::xml::{parse_list_blobs, parse_list_containers};
use crate::{
    BlobContent, BlobInfo, BlobType, Config, ContainerInfo, DeleteOutcome, Result, StorageError,
};
use azblob_core::time::{format_http_date, now, parse_http_date};
use azblob_identity::{CredentialProvider, STORAGE_RESOURCE};
use bytes::Bytes;
use http::header::{AUTHORIZATION, CONTENT_LENGTH, DATE, ETAG, LAST_MODIFIED};
use http::{HeaderMap, Method, Response};
use log::debug;
use percent_encoding::utf8_percent_encode;
use std::sync::Arc;

/// StorageClient issues authenticated Blob Storage REST calls.
///
/// Every call asks the shared [`CredentialProvider`] for a storage token, so
/// tokens are fetched once and reused until they near expiry. The client has
/// no other state and is cheap to clone.
#[derive(Debug, Clone)]
pub struct StorageClient {
    provider: Arc<CredentialProvider>,
    base_uri: String,
}

impl StorageClient {
    /// Create a client for the blob service at `base_uri`,
    /// e.g. `https://myaccount.blob.core.windows.net/`.
    pub fn new(provider: Arc<CredentialProvider>, base_uri: impl Into<String>) -> Self {
        Self {
            provider,
            base_uri: normalize_endpoint(base_uri.into()),
        }
    }

    /// Create a client for the endpoint resolved from `config`.
    pub fn from_config(provider: Arc<CredentialProvider>, config: &Config) -> Result<Self> {
        Ok(Self::new(provider, config.endpoint()?))
    }

    /// The blob service endpoint, ending with `/`.
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// List the containers of the account.
    ///
    /// Only the first page of results is returned.
    pub async fn list_containers(&self) -> Result<Vec<ContainerInfo>> {
        let resp = self
            .send(Method::GET, "", &[("comp", "list")], &[], Bytes::new())
            .await?;
        parse_list_containers(&String::from_utf8_lossy(resp.body()))
    }

    /// Create a container.
    pub async fn create_container(&self, container: &str) -> Result<()> {
        self.send(
            Method::PUT,
            &container_path(container),
            &[("restype", "container")],
            &[],
            Bytes::new(),
        )
        .await?;
        Ok(())
    }

    /// Delete a container and every blob in it.
    pub async fn delete_container(&self, container: &str) -> Result<()> {
        self.send(
            Method::DELETE,
            &container_path(container),
            &[("restype", "container")],
            &[],
            Bytes::new(),
        )
        .await?;
        Ok(())
    }

    /// List the blobs in a container.
    ///
    /// Only the first page of results is returned.
    pub async fn list_blobs(&self, container: &str) -> Result<Vec<BlobInfo>> {
        let resp = self
            .send(
                Method::GET,
                &container_path(container),
                &[("restype", "container"), ("comp", "list")],
                &[],
                Bytes::new(),
            )
            .await?;
        parse_list_blobs(&String::from_utf8_lossy(resp.body()))
    }

    /// Download a blob.
    pub async fn get_blob(&self, container: &str, blob: &str) -> Result<BlobContent> {
        let resp = self
            .send(
                Method::GET,
                &blob_path(container, blob),
                &[],
                &[],
                Bytes::new(),
            )
            .await?;

        let headers = resp.headers();
        let blob_type = BlobType::from_header(header_str(headers, X_MS_BLOB_TYPE));
        let last_modified =
            header_str(headers, LAST_MODIFIED.as_str()).and_then(|v| parse_http_date(v).ok());

        Ok(BlobContent {
            data: resp.into_body(),
            blob_type,
            last_modified,
        })
    }

    /// Upload `data` as a block blob, replacing any existing blob.
    ///
    /// Returns the new blob's ETag when the service reports one.
    pub async fn put_blob(
        &self,
        container: &str,
        blob: &str,
        data: impl Into<Bytes>,
    ) -> Result<Option<String>> {
        let data = data.into();
        let resp = self
            .send(
                Method::PUT,
                &blob_path(container, blob),
                &[],
                &[
                    (X_MS_BLOB_TYPE, BlobType::Block.as_str().to_string()),
                    (CONTENT_LENGTH.as_str(), data.len().to_string()),
                ],
                data,
            )
            .await?;

        Ok(header_str(resp.headers(), ETAG.as_str()).map(str::to_string))
    }

    /// Delete a blob.
    ///
    /// Accounts with soft delete enabled keep the blob recoverable, which is
    /// reported as [`DeleteOutcome::Soft`].
    pub async fn delete_blob(&self, container: &str, blob: &str) -> Result<DeleteOutcome> {
        let resp = self
            .send(
                Method::DELETE,
                &blob_path(container, blob),
                &[],
                &[],
                Bytes::new(),
            )
            .await?;

        Ok(DeleteOutcome::from_header(header_str(
            resp.headers(),
            X_MS_DELETE_TYPE_PERMANENT,
        )))
    }

    fn url(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}{path}", self.base_uri);
        if !query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&query);
        }
        url
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        headers: &[(&str, String)],
        body: Bytes,
    ) -> Result<Response<Bytes>> {
        let token = self.provider.get_access_token(STORAGE_RESOURCE).await?;
        let url = self.url(path, query);

        let mut req = http::Request::builder()
            .method(method.clone())
            .uri(&url)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(X_MS_VERSION, STORAGE_API_VERSION)
            .header(DATE, format_http_date(now()));
        for (name, value) in headers {
            req = req.header(*name, value.as_str());
        }
        let req = req.body(body).map_err(|e| {
            StorageError::new(format!("failed to build {method} {url}: {e}")).with_source(e)
        })?;

        debug!("sending {method} {url}");
        let resp = self
            .provider
            .context()
            .http_send(req)
            .await
            .map_err(|e| StorageError::new(e.to_string()).with_source(e))?;

        let status = resp.status();
        debug!("{method} {url} responded with {status}");
        if status.as_u16() >= 400 {
            let body = String::from_utf8_lossy(resp.body());
            let message = if body.is_empty() {
                format!("{method} {url} failed with status {status}")
            } else {
                body.into_owned()
            };
            return Err(StorageError::new(message));
        }

        Ok(resp)
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn container_path(container: &str) -> String {
    utf8_percent_encode(container, &PATH_SEGMENT_ENCODE_SET).to_string()
}

fn blob_path(container: &str, blob: &str) -> String {
    format!(
        "{}/{}",
        container_path(container),
        utf8_percent_encode(blob, &BLOB_NAME_ENCODE_SET)
    )
}
