// ABOUTME: Exercise catalog service client with bounded caching
// ABOUTME: Fetches exercise name/image metadata; failures degrade, never abort a request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Liftcycle Project

//! Exercise Catalog Client
//!
//! The catalog is a slow, occasionally-unavailable upstream keyed by
//! opaque exercise id. Every lookup goes through a bounded LRU cache with
//! per-entry TTL; a stale-but-available entry is acceptable. Requests
//! carry a hard timeout so a hung upstream degrades a single exercise's
//! display fields rather than the whole response.

use crate::config::CatalogConfig;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;

/// Display metadata for one catalog exercise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseInfo {
    pub name: String,
    pub image: String,
    #[serde(default)]
    pub instructions: Vec<String>,
}

/// Read-only exercise metadata lookup
#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// Fetch display metadata for one exercise id
    async fn exercise_info(&self, exercise_id: &str) -> AppResult<ExerciseInfo>;
}

/// Catalog service wire format
#[derive(Debug, Deserialize)]
struct CatalogExerciseResponse {
    name: String,
    #[serde(rename = "gifUrl", default)]
    gif_url: String,
    #[serde(default)]
    instructions: Vec<String>,
}

/// Cache entry with expiration
#[derive(Debug, Clone)]
struct CacheEntry {
    info: ExerciseInfo,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// HTTP client for the exercise catalog service
pub struct CatalogClient {
    config: CatalogConfig,
    http_client: reqwest::Client,
    cache: Arc<RwLock<LruCache<String, CacheEntry>>>,
}

impl CatalogClient {
    /// Fallback cache capacity when config specifies zero entries
    const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(1000) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Create a new catalog client
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built
    pub fn new(config: CatalogConfig) -> AppResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("catalog http client: {e}")))?;

        let capacity =
            NonZeroUsize::new(config.cache_max_entries).unwrap_or(Self::DEFAULT_CACHE_CAPACITY);

        Ok(Self {
            config,
            http_client,
            cache: Arc::new(RwLock::new(LruCache::new(capacity))),
        })
    }

    async fn cached(&self, exercise_id: &str) -> Option<ExerciseInfo> {
        // LruCache::get is mutable (updates access order), so take the
        // write lock even for reads.
        let mut cache = self.cache.write().await;
        match cache.get(exercise_id) {
            Some(entry) if !entry.is_expired() => Some(entry.info.clone()),
            Some(_) => {
                cache.pop(exercise_id);
                None
            }
            None => None,
        }
    }

    async fn store(&self, exercise_id: &str, info: ExerciseInfo) {
        let entry = CacheEntry {
            info,
            expires_at: Instant::now() + self.config.cache_ttl,
        };
        // LruCache evicts the least-recently-used entry on push
        self.cache.write().await.push(exercise_id.to_owned(), entry);
    }

    /// Number of currently cached entries
    pub async fn cache_len(&self) -> usize {
        self.cache.read().await.len()
    }
}

#[async_trait]
impl ExerciseCatalog for CatalogClient {
    async fn exercise_info(&self, exercise_id: &str) -> AppResult<ExerciseInfo> {
        if exercise_id.is_empty() {
            return Err(AppError::invalid_input("exercise id cannot be empty"));
        }

        if let Some(info) = self.cached(exercise_id).await {
            return Ok(info);
        }

        let url = format!(
            "{}/exercises/exercise/{exercise_id}",
            self.config.base_url.trim_end_matches('/')
        );

        let mut request = self.http_client.get(&url);
        if !self.config.api_key.is_empty() {
            request = request.header("X-RapidAPI-Key", &self.config.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::external_service("exercise catalog", e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "exercise catalog",
                format!("HTTP {} for exercise {exercise_id}", response.status()),
            ));
        }

        let payload: CatalogExerciseResponse = response.json().await.map_err(|e| {
            AppError::external_service("exercise catalog", format!("JSON parse error: {e}"))
        })?;

        let info = ExerciseInfo {
            name: payload.name,
            image: payload.gif_url,
            instructions: payload.instructions,
        };

        self.store(exercise_id, info.clone()).await;

        Ok(info)
    }
}

/// In-memory catalog for tests (no HTTP calls)
#[derive(Default)]
pub struct StaticCatalog {
    exercises: HashMap<String, ExerciseInfo>,
    unavailable: bool,
}

impl StaticCatalog {
    /// Create an empty static catalog
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an exercise
    #[must_use]
    pub fn with_exercise(mut self, exercise_id: &str, name: &str, image: &str) -> Self {
        self.exercises.insert(
            exercise_id.to_owned(),
            ExerciseInfo {
                name: name.to_owned(),
                image: image.to_owned(),
                instructions: Vec::new(),
            },
        );
        self
    }

    /// A catalog whose every lookup fails, for degradation tests
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            exercises: HashMap::new(),
            unavailable: true,
        }
    }
}

#[async_trait]
impl ExerciseCatalog for StaticCatalog {
    async fn exercise_info(&self, exercise_id: &str) -> AppResult<ExerciseInfo> {
        if self.unavailable {
            return Err(AppError::external_service(
                "exercise catalog",
                "service unavailable",
            ));
        }
        self.exercises
            .get(exercise_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("exercise {exercise_id}")))
    }
}
