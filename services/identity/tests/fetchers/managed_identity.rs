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

use crate::mock::{env, MockHttpSend};
use azblob_core::Context;
use azblob_identity::{
    CredentialError, CredentialProvider, FetchToken, ManagedIdentityFetcher, STORAGE_RESOURCE,
};
use pretty_assertions::assert_eq;

const ENDPOINT: &str = "http://localhost:42356/msi/token";
const TOKEN_BODY: &str = r#"{
    "access_token": "eyJ0eXAiOiJKV1QiLCJhbGciOi",
    "expires_on": "4102444800",
    "resource": "https://storage.azure.com/",
    "token_type": "Bearer",
    "client_id": "5E29463D-71DA-4FE0-8E69-999B57DB23B0"
}"#;

fn ctx(http: &MockHttpSend, envs: &[(&str, &str)]) -> Context {
    Context::new()
        .with_http_send(http.clone())
        .with_env(env(envs))
}

#[tokio::test]
async fn test_fetch_token() {
    let http = MockHttpSend::new(200, TOKEN_BODY);
    let ctx = ctx(
        &http,
        &[("IDENTITY_ENDPOINT", ENDPOINT), ("IDENTITY_HEADER", "s3cret")],
    );

    let token = ManagedIdentityFetcher::new()
        .fetch_token(&ctx, STORAGE_RESOURCE)
        .await
        .unwrap();

    assert_eq!(token.access_token(), "eyJ0eXAiOiJKV1QiLCJhbGciOi");
    assert_eq!(token.expires_at(), 4102444800);
    assert_eq!(token.resource(), STORAGE_RESOURCE);

    let requests = http.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.method(), http::Method::GET);
    assert_eq!(req.headers()["X-IDENTITY-HEADER"], "s3cret");
    assert_eq!(
        req.uri().to_string(),
        "http://localhost:42356/msi/token?resource=https%3A%2F%2Fstorage.azure.com%2F&api-version=2019-08-01"
    );
}

#[tokio::test]
async fn test_user_assigned_identity_sends_client_id() {
    let http = MockHttpSend::new(200, TOKEN_BODY);
    let ctx = ctx(
        &http,
        &[
            ("IDENTITY_ENDPOINT", ENDPOINT),
            ("IDENTITY_HEADER", "s3cret"),
            ("AZURE_CLIENT_ID", "my-client"),
        ],
    );

    ManagedIdentityFetcher::new()
        .from_env(&ctx)
        .fetch_token(&ctx, STORAGE_RESOURCE)
        .await
        .unwrap();

    let requests = http.requests.lock().unwrap();
    let query = requests[0].uri().query().unwrap_or_default();
    assert!(query.ends_with("&client_id=my-client"), "{query}");
}

#[tokio::test]
async fn test_missing_header_env_fails_without_request() {
    let http = MockHttpSend::new(200, TOKEN_BODY);
    let ctx = ctx(&http, &[("IDENTITY_ENDPOINT", ENDPOINT)]);

    let err = ManagedIdentityFetcher::new()
        .fetch_token(&ctx, STORAGE_RESOURCE)
        .await
        .unwrap_err();

    assert!(matches!(err, CredentialError::BadEnvironmentVariable(_)));
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn test_missing_endpoint_env_fails_without_request() {
    let http = MockHttpSend::new(200, TOKEN_BODY);
    let ctx = ctx(&http, &[("IDENTITY_HEADER", "s3cret")]);

    let err = ManagedIdentityFetcher::new()
        .fetch_token(&ctx, STORAGE_RESOURCE)
        .await
        .unwrap_err();

    assert!(matches!(err, CredentialError::BadEnvironmentVariable(_)));
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn test_forbidden_is_connection_error() {
    let http = MockHttpSend::new(403, r#"{"error":"forbidden"}"#);
    let ctx = ctx(
        &http,
        &[("IDENTITY_ENDPOINT", ENDPOINT), ("IDENTITY_HEADER", "wrong")],
    );

    let err = ManagedIdentityFetcher::new()
        .fetch_token(&ctx, STORAGE_RESOURCE)
        .await
        .unwrap_err();

    match err {
        CredentialError::ConnectionError(msg) => assert!(msg.contains("403"), "{msg}"),
        other => panic!("expected ConnectionError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreachable_endpoint_is_connection_error() {
    let http = MockHttpSend::unreachable();
    let ctx = ctx(
        &http,
        &[("IDENTITY_ENDPOINT", ENDPOINT), ("IDENTITY_HEADER", "s3cret")],
    );

    let err = ManagedIdentityFetcher::new()
        .fetch_token(&ctx, STORAGE_RESOURCE)
        .await
        .unwrap_err();

    assert_eq!(err, CredentialError::ConnectionError("connection refused".to_string()));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    for body in ["not json", r#"{"expires_on":"1","resource":"r"}"#] {
        let http = MockHttpSend::new(200, body);
        let ctx = ctx(
            &http,
            &[("IDENTITY_ENDPOINT", ENDPOINT), ("IDENTITY_HEADER", "s3cret")],
        );

        let err = ManagedIdentityFetcher::new()
            .fetch_token(&ctx, STORAGE_RESOURCE)
            .await
            .unwrap_err();

        assert!(matches!(err, CredentialError::DecodeError(_)), "{body}: {err:?}");
    }
}

#[tokio::test]
async fn test_unparsable_expiry_is_treated_as_expired() {
    for expires_on in [r#""soon""#, "null", "1.7e9", "{}"] {
        let http = MockHttpSend::new(
            200,
            &format!(
                r#"{{"access_token":"t","expires_on":{expires_on},"resource":"https://storage.azure.com/"}}"#
            ),
        );
        let ctx = ctx(
            &http,
            &[("IDENTITY_ENDPOINT", ENDPOINT), ("IDENTITY_HEADER", "s3cret")],
        );

        let token = ManagedIdentityFetcher::new()
            .fetch_token(&ctx, STORAGE_RESOURCE)
            .await
            .unwrap_or_else(|e| panic!("expires_on {expires_on} failed: {e}"));
        assert_eq!(token.expires_at(), 0, "expires_on {expires_on}");
        assert_eq!(token.access_token(), "t");
    }
}

#[tokio::test]
async fn test_provider_caches_managed_identity_token() {
    let http = MockHttpSend::new(200, TOKEN_BODY);
    let ctx = ctx(
        &http,
        &[("IDENTITY_ENDPOINT", ENDPOINT), ("IDENTITY_HEADER", "s3cret")],
    );
    let provider = CredentialProvider::new(ctx, ManagedIdentityFetcher::new());

    for _ in 0..3 {
        assert_eq!(
            provider.get_access_token(STORAGE_RESOURCE).await.unwrap(),
            "eyJ0eXAiOiJKV1QiLCJhbGciOi"
        );
    }
    assert_eq!(http.request_count(), 1);
}
