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

//! azblob: manage containers and blobs from the command line.

use anyhow::{Context as _, Result};
use azblob::storage::{Config, DeleteOutcome, StorageClient};
use clap::{Parser, Subcommand};
use log::info;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// Azure Blob Storage command line client
#[derive(Parser, Debug)]
#[command(name = "azblob", author, version, about, long_about = None)]
struct Args {
    /// Storage account name
    #[arg(long, env = "AZURE_STORAGE_ACCOUNT_NAME")]
    account: Option<String>,

    /// Blob service endpoint, takes precedence over --account
    #[arg(long, env = "AZURE_STORAGE_ENDPOINT")]
    endpoint: Option<String>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List containers in the account
    ListContainers,
    /// Create a container
    CreateContainer { container: String },
    /// Delete a container and all of its blobs
    DeleteContainer { container: String },
    /// List blobs in a container
    ListBlobs { container: String },
    /// Download a blob to stdout or a file
    GetBlob {
        container: String,
        blob: String,
        /// Write the blob here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Upload a local file as a block blob
    PutBlob {
        container: String,
        blob: String,
        file: PathBuf,
    },
    /// Delete a blob
    DeleteBlob { container: String, blob: String },
}

impl Args {
    fn config(&self) -> Config {
        Config {
            account_name: self.account.clone(),
            endpoint: self.endpoint.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&args.log_level))
        .init();

    let client = azblob::default_storage_client(&args.config())?;
    info!("using blob endpoint {}", client.base_uri());

    run(&client, args.command).await
}

async fn run(client: &StorageClient, command: Command) -> Result<()> {
    match command {
        Command::ListContainers => {
            for container in client.list_containers().await? {
                println!("{}", container.name);
            }
        }
        Command::CreateContainer { container } => {
            client.create_container(&container).await?;
            info!("created container {container}");
        }
        Command::DeleteContainer { container } => {
            client.delete_container(&container).await?;
            info!("deleted container {container}");
        }
        Command::ListBlobs { container } => {
            for blob in client.list_blobs(&container).await? {
                let size = blob
                    .content_length
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{}\t{size}\t{}",
                    blob.last_modified.to_rfc3339(),
                    blob.name
                );
            }
        }
        Command::GetBlob {
            container,
            blob,
            output,
        } => {
            let content = client.get_blob(&container, &blob).await?;
            info!(
                "downloaded {} bytes of {}",
                content.data.len(),
                content.blob_type.as_str()
            );
            match output {
                Some(path) => tokio::fs::write(&path, &content.data)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => {
                    let mut stdout = tokio::io::stdout();
                    stdout.write_all(&content.data).await?;
                    stdout.flush().await?;
                }
            }
        }
        Command::PutBlob {
            container,
            blob,
            file,
        } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("failed to read {}", file.display()))?;
            let etag = client.put_blob(&container, &blob, data).await?;
            println!("{}", etag.unwrap_or_default());
        }
        Command::DeleteBlob { container, blob } => {
            match client.delete_blob(&container, &blob).await? {
                DeleteOutcome::Soft => println!("soft deleted {blob}"),
                DeleteOutcome::Permanent => println!("deleted {blob}"),
            }
        }
    }

    Ok(())
}
