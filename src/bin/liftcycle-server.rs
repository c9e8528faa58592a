// ABOUTME: Server binary for the Liftcycle scheduling engine
// ABOUTME: Loads configuration, initializes storage and logging, serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! # Liftcycle Server Binary
//!
//! Starts the workout scheduling HTTP API with SQLite storage and the
//! exercise catalog client.

use anyhow::Result;
use clap::Parser;
use liftcycle::{
    config::ServerConfig,
    context::ServerResources,
    database::Database,
    external::CatalogClient,
    logging, server,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "liftcycle-server")]
#[command(about = "Liftcycle - workout cycle scheduling and session log API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override database URL
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(database_url) = args.database_url {
        config.database_url = database_url;
    }

    logging::init_from_env()?;

    info!("Starting Liftcycle server");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    info!("Database initialized and migrated");

    let catalog = Arc::new(CatalogClient::new(config.catalog.clone())?);

    let resources = Arc::new(ServerResources::new(database, catalog, config));

    server::serve(resources).await
}
