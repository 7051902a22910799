use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Extension, Router,
};
use canteen_menu::{
    repositories::{HttpMenuRepository, HttpRecipeRepository},
    services::{FeedbackService, RecipeOpener},
    MenuPage, PageServices,
};
use serde_json::json;
use tokio::net::TcpListener;

pub const API_KEY: &str = "test-key";

type FeedbackLog = Arc<Mutex<Vec<serde_json::Value>>>;

pub struct TestEnvironment {
    pub base_url: String,
    pub feedback_log: FeedbackLog,
}

/// Opener that remembers the URLs it was asked to show
#[derive(Default, Clone)]
pub struct RecordingOpener {
    pub opened: Arc<Mutex<Vec<String>>>,
}

impl RecipeOpener for RecordingOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

impl RecordingOpener {
    pub fn urls(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

fn menu_for(canteen_id: &str, meal_type: &str) -> Option<serde_json::Value> {
    match (canteen_id, meal_type) {
        ("42", "breakfast") => Some(json!([
            { "_id": "b1", "dish": "Idli", "dishId": 715538 }
        ])),
        ("42", "lunch") => Some(json!([
            { "_id": "l1", "dish": "Rice", "dishId": "716429" }
        ])),
        ("42", "dinner") => Some(json!([
            { "_id": "d1", "dish": "Soup", "dishId": "644387" }
        ])),
        ("7", "breakfast") => Some(json!([
            { "_id": "b7", "dish": "Poha", "dishId": 1001 },
            { "_id": "b8", "dish": "Upma", "dishId": 1002 },
            { "_id": "b9", "dish": "Sheera", "dishId": null }
        ])),
        ("7", "dinner") => Some(json!([
            { "_id": "d7", "dish": "Paneer Tikka", "dishId": 1003 }
        ])),
        _ => None,
    }
}

// Mock handlers for the canteen backend
async fn mock_meal(Path((canteen_id, meal_type)): Path<(String, String)>) -> Response {
    if canteen_id == "7" && meal_type == "lunch" {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "kitchen closed" })),
        )
            .into_response();
    }

    match menu_for(&canteen_id, &meal_type) {
        Some(data) => Json(json!({ "data": data })).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Canteen not found" })),
        )
            .into_response(),
    }
}

async fn mock_feedback(
    Extension(log): Extension<FeedbackLog>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    if body["canteenId"] == "broken" {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    log.lock().unwrap().push(body);
    (StatusCode::CREATED, Json(json!({ "status": "ok" }))).into_response()
}

async fn mock_recipe_information(
    Path(recipe_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("apiKey").map(String::as_str) != Some(API_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "invalid api key" })),
        )
            .into_response();
    }

    Json(json!({
        "id": recipe_id,
        "spoonacularSourceUrl": format!("https://spoonacular.com/recipes/{}", recipe_id)
    }))
    .into_response()
}

fn create_mock_app(feedback_log: FeedbackLog) -> Router {
    Router::new()
        .route("/feedback", post(mock_feedback))
        .route("/recipes/:recipe_id/information", get(mock_recipe_information))
        .route("/:canteen_id/:meal_type", get(mock_meal))
        .layer(Extension(feedback_log))
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let feedback_log: FeedbackLog = Arc::new(Mutex::new(Vec::new()));
        let app = create_mock_app(feedback_log.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to get local address");
        let base_url = format!("http://{}", addr);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Failed to serve app");
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(100)).await;

        Self {
            base_url,
            feedback_log,
        }
    }

    /// Services wired to the mock backend through the real HTTP repositories
    pub fn services(&self, api_key: &str, persist: Option<Option<String>>, opener: RecordingOpener) -> PageServices {
        let timeout = Duration::from_secs(5);
        let menu_repository = Arc::new(
            HttpMenuRepository::new(&self.base_url, timeout).expect("Invalid base URL"),
        );
        let recipe_repository = Arc::new(
            HttpRecipeRepository::new(&self.base_url, api_key, timeout).expect("Invalid recipe URL"),
        );

        let feedback = match persist {
            Some(student_id) => FeedbackService::with_persistence(menu_repository.clone(), student_id),
            None => FeedbackService::new(menu_repository.clone()),
        };

        PageServices::new(menu_repository, recipe_repository, Arc::new(opener), feedback)
    }

    pub fn page(&self, canteen_id: &str) -> MenuPage {
        MenuPage::new(canteen_id, self.services(API_KEY, None, RecordingOpener::default()))
    }

    pub fn recorded_feedback(&self) -> Vec<serde_json::Value> {
        self.feedback_log.lock().unwrap().clone()
    }
}
