//! PostgREST-backed remote favorites store.
//!
//! Talks to a Supabase-style `user_favorites` table over its REST interface.
//! The missing-table error code (`PGRST205`) is mapped to
//! `FavoritesError::SchemaMissing` so callers can render "setup required"
//! instead of "try again later".

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use uuid::Uuid;

use super::remote::RemoteFavorites;
use crate::error::FavoritesError;
use crate::types::Recipe;

const TABLE: &str = "user_favorites";

/// PostgREST error code for a table missing from the schema cache.
const MISSING_TABLE_CODE: &str = "PGRST205";

#[derive(Error, Debug)]
pub enum RestConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Connection settings for the favorites backend.
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project base URL, e.g. "https://xyz.supabase.co".
    pub base_url: String,
    /// Anonymous API key, sent as both `apikey` and bearer token.
    pub api_key: String,
}

impl RestConfig {
    /// Load from `COOKALONG_SUPABASE_URL` and `COOKALONG_SUPABASE_ANON_KEY`.
    /// Both are required; a missing key is fatal at startup, before any
    /// session exists.
    pub fn from_env() -> Result<Self, RestConfigError> {
        let base_url = env::var("COOKALONG_SUPABASE_URL")
            .map_err(|_| RestConfigError::MissingEnvVar("COOKALONG_SUPABASE_URL".to_string()))?;
        let api_key = env::var("COOKALONG_SUPABASE_ANON_KEY").map_err(|_| {
            RestConfigError::MissingEnvVar("COOKALONG_SUPABASE_ANON_KEY".to_string())
        })?;
        Ok(Self { base_url, api_key })
    }
}

/// A favorite row as stored remotely.
#[derive(Debug, Serialize)]
struct FavoriteRow<'a> {
    user_id: Uuid,
    recipe_id: &'a str,
    recipe_data: &'a Recipe,
    favorited_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct FavoriteRowData {
    recipe_data: Recipe,
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Remote favorites over PostgREST.
pub struct RestFavorites {
    client: reqwest::Client,
    config: RestConfig,
}

impl RestFavorites {
    pub fn from_env() -> Result<Self, RestConfigError> {
        Ok(Self::new(RestConfig::from_env()?))
    }

    pub fn new(config: RestConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.base_url.trim_end_matches('/'), TABLE)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }

    /// Map a non-success response to the right error variant.
    async fn classify_failure(response: reqwest::Response) -> FavoritesError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if let Ok(err) = serde_json::from_str::<PostgrestError>(&body) {
            let missing_table = err.code.as_deref() == Some(MISSING_TABLE_CODE)
                || err
                    .message
                    .as_deref()
                    .is_some_and(|m| m.contains(&format!("relation \"{}\" does not exist", TABLE)));
            if missing_table {
                return FavoritesError::SchemaMissing(
                    err.message.unwrap_or_else(|| status.to_string()),
                );
            }
            if let Some(message) = err.message {
                return FavoritesError::Connectivity(format!("{}: {}", status, message));
            }
        }

        FavoritesError::Connectivity(format!("{}: {}", status, body))
    }

    async fn send_write(&self, request: reqwest::RequestBuilder) -> Result<(), FavoritesError> {
        let response = request
            .send()
            .await
            .map_err(|e| FavoritesError::Connectivity(e.to_string()))?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::classify_failure(response).await)
        }
    }
}

#[async_trait]
impl RemoteFavorites for RestFavorites {
    async fn fetch_all(&self, user_id: Uuid) -> Result<Vec<Recipe>, FavoritesError> {
        let request = self
            .authed(self.client.get(self.table_url()))
            .query(&[
                ("select", "recipe_data".to_string()),
                ("user_id", format!("eq.{}", user_id)),
            ]);

        let response = request
            .send()
            .await
            .map_err(|e| FavoritesError::Connectivity(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let rows: Vec<FavoriteRowData> = response
            .json()
            .await
            .map_err(|e| FavoritesError::Connectivity(e.to_string()))?;

        Ok(rows.into_iter().map(|row| row.recipe_data).collect())
    }

    async fn upsert(&self, user_id: Uuid, recipe: &Recipe) -> Result<(), FavoritesError> {
        let row = FavoriteRow {
            user_id,
            recipe_id: &recipe.id,
            recipe_data: recipe,
            favorited_at: Utc::now(),
        };
        let request = self
            .authed(self.client.post(self.table_url()))
            .query(&[("on_conflict", "user_id,recipe_id")])
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row);
        self.send_write(request).await
    }

    async fn insert(&self, user_id: Uuid, recipe: &Recipe) -> Result<(), FavoritesError> {
        let row = FavoriteRow {
            user_id,
            recipe_id: &recipe.id,
            recipe_data: recipe,
            favorited_at: Utc::now(),
        };
        let request = self.authed(self.client.post(self.table_url())).json(&row);
        self.send_write(request).await
    }

    async fn delete(&self, user_id: Uuid, recipe_id: &str) -> Result<(), FavoritesError> {
        let request = self.authed(self.client.delete(self.table_url())).query(&[
            ("user_id", format!("eq.{}", user_id)),
            ("recipe_id", format!("eq.{}", recipe_id)),
        ]);
        self.send_write(request).await
    }
}
