// ABOUTME: Environment-driven server configuration for the Liftcycle engine
// ABOUTME: Covers HTTP port, database URL, and exercise catalog client settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! Server configuration loaded from environment variables.
//!
//! Environment-only configuration: every knob has a sensible default so the
//! server boots with no configuration at all, and each can be overridden
//! through the environment.

use crate::errors::{AppError, AppResult};
use std::env;
use std::time::Duration;

/// Default HTTP port
const DEFAULT_HTTP_PORT: u16 = 8081;
/// Default SQLite database URL
const DEFAULT_DATABASE_URL: &str = "sqlite:data/liftcycle.db";
/// Default exercise catalog base URL
const DEFAULT_CATALOG_BASE_URL: &str = "https://exercisedb.p.rapidapi.com";
/// Default catalog request timeout in seconds
const DEFAULT_CATALOG_TIMEOUT_SECS: u64 = 5;
/// Default catalog cache capacity (entries)
const DEFAULT_CATALOG_CACHE_MAX_ENTRIES: usize = 1000;
/// Default catalog cache TTL in seconds (24 hours)
const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 86_400;

/// Top-level server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the REST API
    pub http_port: u16,
    /// Database connection URL (SQLite)
    pub database_url: String,
    /// Exercise catalog client configuration
    pub catalog: CatalogConfig,
}

/// Exercise catalog service client configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the exercise catalog service
    pub base_url: String,
    /// API key sent with catalog requests (empty disables the header)
    pub api_key: String,
    /// Bounded timeout for a single catalog request
    pub timeout: Duration,
    /// Maximum number of cached catalog entries
    pub cache_max_entries: usize,
    /// Time-to-live for cached catalog entries
    pub cache_ttl: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_BASE_URL.into(),
            api_key: String::new(),
            timeout: Duration::from_secs(DEFAULT_CATALOG_TIMEOUT_SECS),
            cache_max_entries: DEFAULT_CATALOG_CACHE_MAX_ENTRIES,
            cache_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_TTL_SECS),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            database_url: DEFAULT_DATABASE_URL.into(),
            catalog: CatalogConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a present variable fails to parse (e.g. a
    /// non-numeric `HTTP_PORT`)
    pub fn from_env() -> AppResult<Self> {
        Ok(Self {
            http_port: parse_env("HTTP_PORT", DEFAULT_HTTP_PORT)?,
            database_url: env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            catalog: CatalogConfig {
                base_url: env::var("CATALOG_BASE_URL")
                    .unwrap_or_else(|_| DEFAULT_CATALOG_BASE_URL.into()),
                api_key: env::var("CATALOG_API_KEY").unwrap_or_default(),
                timeout: Duration::from_secs(parse_env(
                    "CATALOG_TIMEOUT_SECS",
                    DEFAULT_CATALOG_TIMEOUT_SECS,
                )?),
                cache_max_entries: parse_env(
                    "CATALOG_CACHE_MAX_ENTRIES",
                    DEFAULT_CATALOG_CACHE_MAX_ENTRIES,
                )?,
                cache_ttl: Duration::from_secs(parse_env(
                    "CATALOG_CACHE_TTL_SECS",
                    DEFAULT_CATALOG_CACHE_TTL_SECS,
                )?),
            },
        })
    }

    /// One-line configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} database_url={} catalog_base_url={} catalog_timeout={}s",
            self.http_port,
            self.database_url,
            self.catalog.base_url,
            self.catalog.timeout.as_secs()
        )
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("invalid value for {name}: {raw}"))),
        Err(_) => Ok(default),
    }
}
