// Page layer - state of one canteen's menu page and its terminal rendering

mod render;

pub use render::render_page;

use std::sync::Arc;
use tracing::{debug, error, instrument};

use crate::models::{Dish, FeedbackDraft, MealType, Notification, ServiceResult, ValidationResult};
use crate::repositories::{MenuRepository, RecipeRepository};
use crate::services::{
    FeedbackService, MealLoader, MenuSnapshot, RecipeOpener, RecipeService, SearchAggregator,
    SearchOutcome,
};

/// Services a page talks to. Cloning shares the services, never a page's search generation.
#[derive(Clone)]
pub struct PageServices {
    pub loader: Arc<MealLoader>,
    pub menu_repository: Arc<dyn MenuRepository>,
    pub feedback: Arc<FeedbackService>,
    pub recipes: Arc<RecipeService>,
}

impl PageServices {
    pub fn new(
        menu_repository: Arc<dyn MenuRepository>,
        recipe_repository: Arc<dyn RecipeRepository>,
        opener: Arc<dyn RecipeOpener>,
        feedback: FeedbackService,
    ) -> Self {
        Self {
            loader: Arc::new(MealLoader::new(menu_repository.clone())),
            menu_repository,
            feedback: Arc::new(feedback),
            recipes: Arc::new(RecipeService::new(recipe_repository, opener)),
        }
    }
}

/// Independent busy flags for the menu load and the search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadingState {
    pub menu: bool,
    pub search: bool,
}

pub struct MenuPage {
    canteen_id: String,
    menu: MenuSnapshot,
    selected_category: MealType,
    search_term: String,
    search_results: Vec<Dish>,
    draft: FeedbackDraft,
    loading: LoadingState,
    notifications: Vec<Notification>,
    search: SearchAggregator,
    services: PageServices,
}

impl MenuPage {
    pub fn new(canteen_id: impl Into<String>, services: PageServices) -> Self {
        Self {
            canteen_id: canteen_id.into(),
            menu: MenuSnapshot::default(),
            selected_category: MealType::Breakfast,
            search_term: String::new(),
            search_results: Vec::new(),
            draft: FeedbackDraft::default(),
            loading: LoadingState::default(),
            notifications: Vec::new(),
            search: SearchAggregator::new(services.menu_repository.clone()),
            services,
        }
    }

    pub fn canteen_id(&self) -> &str {
        &self.canteen_id
    }

    pub fn menu(&self) -> &MenuSnapshot {
        &self.menu
    }

    pub fn selected_category(&self) -> MealType {
        self.selected_category
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn search_results(&self) -> &[Dish] {
        &self.search_results
    }

    pub fn draft(&self) -> &FeedbackDraft {
        &self.draft
    }

    pub fn loading(&self) -> LoadingState {
        self.loading
    }

    /// Whether the search view replaces the category view
    pub fn is_searching(&self) -> bool {
        !self.search_term.is_empty()
    }

    /// Dishes of the selected category, empty when that list is not loaded
    pub fn category_dishes(&self) -> &[Dish] {
        self.menu
            .get(self.selected_category)
            .map(|list| list.dishes.as_slice())
            .unwrap_or(&[])
    }

    /// Fetch the three meal lists; lists that fail to load keep their previous value
    #[instrument(skip(self), fields(canteen_id = %self.canteen_id))]
    pub async fn load(&mut self) -> ServiceResult<()> {
        self.loading.menu = true;
        let result = self.services.loader.load(&self.canteen_id).await;
        self.loading.menu = false;

        let snapshot = result?;
        self.menu.merge(snapshot);
        Ok(())
    }

    /// Switch to another canteen, reloading the menu and repeating the current search
    pub async fn change_canteen(&mut self, canteen_id: impl Into<String>) -> ServiceResult<()> {
        self.canteen_id = canteen_id.into();
        self.menu = MenuSnapshot::default();
        self.search_results.clear();

        self.load().await?;
        self.run_search().await;
        Ok(())
    }

    /// Store the term and refresh the search results from the backend
    pub async fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.run_search().await;
    }

    #[instrument(skip(self), fields(canteen_id = %self.canteen_id, query = %self.search_term))]
    async fn run_search(&mut self) {
        self.loading.search = true;
        let result = self.search.search(&self.canteen_id, &self.search_term).await;
        self.loading.search = false;

        match result {
            Ok(SearchOutcome::Current { results, .. }) => self.search_results = results,
            Ok(SearchOutcome::Stale { generation, latest }) => {
                debug!(generation, latest, "Discarding superseded search results");
            }
            Err(e) => {
                error!(error = %e, "Error fetching search results");
            }
        }
    }

    pub fn select_category(&mut self, meal_type: MealType) {
        self.selected_category = meal_type;
    }

    pub fn set_feedback_text(&mut self, text: impl Into<String>) {
        self.draft.text = text.into();
    }

    pub fn set_rating(&mut self, rating: u8) -> ValidationResult<()> {
        self.draft.set_rating(rating)
    }

    /// Submit the draft; the resulting toast is queued and returned
    pub async fn submit_feedback(&mut self) -> Notification {
        let notification = self
            .services
            .feedback
            .submit(&self.canteen_id, &mut self.draft)
            .await;
        self.notifications.push(notification.clone());
        notification
    }

    /// Open a recipe page, returning its URL when that worked
    pub async fn open_recipe(&self, recipe_id: &str) -> Option<String> {
        self.services.recipes.open_recipe(recipe_id).await
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}
