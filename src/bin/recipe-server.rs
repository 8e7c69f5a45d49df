// ABOUTME: Recipe server binary: loads configuration, connects the store, serves HTTP
// ABOUTME: Command-line flags override the environment for port and Redis URL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Recipe Server Binary
//!
//! Starts the recipe HTTP API over the configured document store.

use anyhow::Result;
use clap::Parser;
use recipe_server::{config::ServerConfig, logging, resources::ServerResources, routes};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "recipe-server")]
#[command(about = "Recipe API - CRUD, ratings, and search over a leased document store")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override Redis URL (selects the Redis store)
    #[arg(long)]
    redis_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(redis_url) = args.redis_url {
        config.store.redis_url = Some(redis_url);
    }

    logging::init_from_env()?;

    info!("Starting Recipe Server");
    info!("{}", config.summary());

    let resources = match ServerResources::connect(config).await {
        Ok(resources) => Arc::new(resources),
        Err(e) => {
            error!("Failed to initialize document store: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = routes::serve(resources).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
