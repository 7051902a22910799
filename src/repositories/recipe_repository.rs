use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{info, instrument};

use super::http::{build_http_client, endpoint_url, get_json, parse_base_url};
use crate::models::{RecipeInformation, RepositoryResult};

const PEER_SERVICE: &str = "recipe-api";

/// Lookup of external recipe pages
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Resolve the public page address of a recipe
    async fn find_source_url(&self, recipe_id: &str) -> RepositoryResult<String>;
}

/// Spoonacular-compatible recipe information client
pub struct HttpRecipeRepository {
    client: Client,
    api_url: Url,
    api_key: String,
}

impl HttpRecipeRepository {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> RepositoryResult<Self> {
        Self::with_client(build_http_client(timeout)?, api_url, api_key)
    }

    pub fn with_client(client: Client, api_url: &str, api_key: &str) -> RepositoryResult<Self> {
        Ok(Self {
            client,
            api_url: parse_base_url(api_url)?,
            api_key: api_key.to_string(),
        })
    }

    fn information_url(&self, recipe_id: &str) -> RepositoryResult<Url> {
        let mut url = endpoint_url(&self.api_url, &["recipes", recipe_id, "information"])?;
        url.query_pairs_mut().append_pair("apiKey", &self.api_key);
        Ok(url)
    }
}

#[async_trait]
impl RecipeRepository for HttpRecipeRepository {
    #[instrument(skip(self), fields(recipe_id = %recipe_id))]
    async fn find_source_url(&self, recipe_id: &str) -> RepositoryResult<String> {
        let url = self.information_url(recipe_id)?;

        let information: RecipeInformation = get_json(&self.client, url, PEER_SERVICE).await?;

        info!("Resolved recipe page");
        Ok(information.source_url)
    }
}
