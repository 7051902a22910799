#[cfg(test)]
mod repository_tests {
    use crate::models::{FeedbackRequest, MealType, RepositoryError};
    use crate::repositories::menu_repository::*;
    use crate::repositories::recipe_repository::*;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn menu_repository(server: &MockServer) -> HttpMenuRepository {
        HttpMenuRepository::new(&server.uri(), Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_find_meal_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/42/breakfast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "_id": "b1", "dish": "Idli", "dishId": 1001 },
                    { "_id": "b2", "dish": "Vada", "dishId": 1002 }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dishes = menu_repository(&server)
            .find_meal("42", MealType::Breakfast)
            .await
            .unwrap();

        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].name, "Idli");
        assert_eq!(dishes[1].recipe_id, "1002");
    }

    #[tokio::test]
    async fn test_find_meal_keeps_dishes_without_recipe() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/42/breakfast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    { "_id": "b1", "dish": "Idli", "dishId": 715538 },
                    { "_id": "b2", "dish": "Vada", "dishId": null }
                ]
            })))
            .mount(&server)
            .await;

        let dishes = menu_repository(&server)
            .find_meal("42", MealType::Breakfast)
            .await
            .unwrap();

        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].recipe_id, "715538");
        assert_eq!(dishes[1].name, "Vada");
        assert_eq!(dishes[1].recipe_id, "");
    }

    #[tokio::test]
    async fn test_find_meal_uses_meal_path() {
        let server = MockServer::start().await;
        for meal in ["lunch", "dinner"] {
            Mock::given(method("GET"))
                .and(path(format!("/7/{}", meal)))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "data": [{ "_id": meal, "dish": meal, "dishId": 1 }]
                })))
                .expect(1)
                .mount(&server)
                .await;
        }

        let repository = menu_repository(&server);
        let lunch = repository.find_meal("7", MealType::Lunch).await.unwrap();
        let dinner = repository.find_meal("7", MealType::Dinner).await.unwrap();

        assert_eq!(lunch[0].name, "lunch");
        assert_eq!(dinner[0].name, "dinner");
    }

    #[tokio::test]
    async fn test_find_meal_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/42/lunch"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = menu_repository(&server)
            .find_meal("42", MealType::Lunch)
            .await;

        match result {
            Err(RepositoryError::UnexpectedStatus { status, url }) => {
                assert_eq!(status, 500);
                assert!(url.ends_with("/42/lunch"));
            }
            other => panic!("Expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_find_meal_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/42/dinner"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let result = menu_repository(&server)
            .find_meal("42", MealType::Dinner)
            .await;

        assert!(matches!(result, Err(RepositoryError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_find_meal_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/42/dinner"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": [] }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let repository =
            HttpMenuRepository::new(&server.uri(), Duration::from_millis(50)).unwrap();
        let result = repository.find_meal("42", MealType::Dinner).await;

        assert!(matches!(result, Err(RepositoryError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_submit_feedback_posts_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedback"))
            .and(body_json(json!({
                "canteenId": "42",
                "feedback": "Too salty",
                "rating": 2,
                "studentId": "student-9"
            })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let request = FeedbackRequest {
            canteen_id: "42".to_string(),
            feedback: "Too salty".to_string(),
            rating: 2,
            student_id: Some("student-9".to_string()),
        };

        assert!(menu_repository(&server)
            .submit_feedback(&request)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_submit_feedback_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/feedback"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let request = FeedbackRequest {
            canteen_id: "42".to_string(),
            feedback: "ok".to_string(),
            rating: 3,
            student_id: None,
        };

        let result = menu_repository(&server).submit_feedback(&request).await;
        assert!(matches!(
            result,
            Err(RepositoryError::UnexpectedStatus { status: 400, .. })
        ));
    }

    #[tokio::test]
    async fn test_find_source_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/715538/information"))
            .and(query_param("apiKey", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 715538,
                "spoonacularSourceUrl": "https://spoonacular.com/bruschetta-715538"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let repository =
            HttpRecipeRepository::new(&server.uri(), "test-key", Duration::from_secs(2)).unwrap();
        let url = repository.find_source_url("715538").await.unwrap();

        assert_eq!(url, "https://spoonacular.com/bruschetta-715538");
    }

    #[tokio::test]
    async fn test_find_source_url_missing_field() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/1/information"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
            .mount(&server)
            .await;

        let repository =
            HttpRecipeRepository::new(&server.uri(), "k", Duration::from_secs(2)).unwrap();
        let result = repository.find_source_url("1").await;

        assert!(matches!(result, Err(RepositoryError::Serialization { .. })));
    }

    #[tokio::test]
    async fn test_find_source_url_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/recipes/404/information"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let repository =
            HttpRecipeRepository::new(&server.uri(), "k", Duration::from_secs(2)).unwrap();
        let result = repository.find_source_url("404").await;

        match result {
            Err(RepositoryError::UnexpectedStatus { status, url }) => {
                assert_eq!(status, 404);
                assert!(!url.contains("apiKey"));
            }
            other => panic!("Expected UnexpectedStatus, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = HttpMenuRepository::new("localhost", Duration::from_secs(1));
        assert!(matches!(result, Err(RepositoryError::InvalidUrl { .. })));
    }
}
