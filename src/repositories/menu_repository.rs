use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;
use tracing::{info, instrument};

use super::http::{build_http_client, endpoint_url, get_json, parse_base_url, post_json};
use crate::models::{Dish, FeedbackRequest, MealListResponse, MealType, RepositoryResult};

const PEER_SERVICE: &str = "menu-backend";

/// Trait defining the interface to the canteen menu backend
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Fetch the dishes served for one meal at a canteen
    async fn find_meal(&self, canteen_id: &str, meal_type: MealType) -> RepositoryResult<Vec<Dish>>;

    /// Persist a feedback entry for a canteen
    async fn submit_feedback(&self, request: &FeedbackRequest) -> RepositoryResult<()>;
}

/// HTTP implementation of the MenuRepository trait
pub struct HttpMenuRepository {
    client: Client,
    base_url: Url,
}

impl HttpMenuRepository {
    /// Create a repository talking to `base_url` with the given request timeout
    pub fn new(base_url: &str, timeout: Duration) -> RepositoryResult<Self> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }
}

#[async_trait]
impl MenuRepository for HttpMenuRepository {
    #[instrument(skip(self), fields(canteen_id = %canteen_id, meal_type = %meal_type))]
    async fn find_meal(&self, canteen_id: &str, meal_type: MealType) -> RepositoryResult<Vec<Dish>> {
        let url = endpoint_url(&self.base_url, &[canteen_id, meal_type.as_str()])?;

        let response: MealListResponse = get_json(&self.client, url, PEER_SERVICE).await?;

        info!(count = response.data.len(), "Fetched meal list");
        Ok(response.data)
    }

    #[instrument(skip(self, request), fields(canteen_id = %request.canteen_id, rating = request.rating))]
    async fn submit_feedback(&self, request: &FeedbackRequest) -> RepositoryResult<()> {
        let url = endpoint_url(&self.base_url, &["feedback"])?;

        post_json(&self.client, url, request, PEER_SERVICE).await?;

        info!("Feedback stored");
        Ok(())
    }
}
