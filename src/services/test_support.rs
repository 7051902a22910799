//! Shared doubles for service and page tests

use async_trait::async_trait;
use mockall::mock;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::models::{Dish, FeedbackRequest, MealType, RepositoryResult};
use crate::repositories::{MenuRepository, RecipeRepository};
use crate::services::RecipeOpener;

mock! {
    pub MenuRepo {}

    #[async_trait]
    impl MenuRepository for MenuRepo {
        async fn find_meal(&self, canteen_id: &str, meal_type: MealType) -> RepositoryResult<Vec<Dish>>;
        async fn submit_feedback(&self, request: &FeedbackRequest) -> RepositoryResult<()>;
    }
}

mock! {
    pub RecipeRepo {}

    #[async_trait]
    impl RecipeRepository for RecipeRepo {
        async fn find_source_url(&self, recipe_id: &str) -> RepositoryResult<String>;
    }
}

mock! {
    pub Opener {}

    impl RecipeOpener for Opener {
        fn open(&self, url: &str) -> std::io::Result<()>;
    }
}

/// Dish whose id and recipe id are derived from its name
pub fn dish(name: &str) -> Dish {
    let slug = name.to_lowercase().replace(' ', "-");
    Dish::new(format!("id-{}", slug), name, slug)
}

pub fn names(dishes: &[Dish]) -> Vec<&str> {
    dishes.iter().map(|dish| dish.name.as_str()).collect()
}

/// Menu backend serving fixed lists, with optionally delayed early calls
pub struct ScriptedMenuRepository {
    breakfast: Vec<Dish>,
    lunch: Vec<Dish>,
    dinner: Vec<Dish>,
    calls: AtomicUsize,
    slow_calls: usize,
    delay: Duration,
}

impl ScriptedMenuRepository {
    pub fn new((breakfast, lunch, dinner): (Vec<Dish>, Vec<Dish>, Vec<Dish>)) -> Self {
        Self {
            breakfast,
            lunch,
            dinner,
            calls: AtomicUsize::new(0),
            slow_calls: 0,
            delay: Duration::ZERO,
        }
    }

    /// Delay the first `count` calls by `delay`
    pub fn slow_first_calls(mut self, count: usize, delay: Duration) -> Self {
        self.slow_calls = count;
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MenuRepository for ScriptedMenuRepository {
    async fn find_meal(&self, _canteen_id: &str, meal_type: MealType) -> RepositoryResult<Vec<Dish>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.slow_calls {
            tokio::time::sleep(self.delay).await;
        }

        Ok(match meal_type {
            MealType::Breakfast => self.breakfast.clone(),
            MealType::Lunch => self.lunch.clone(),
            MealType::Dinner => self.dinner.clone(),
        })
    }

    async fn submit_feedback(&self, _request: &FeedbackRequest) -> RepositoryResult<()> {
        Ok(())
    }
}
