// Services module - business logic layer

pub mod feedback_service;
pub mod meal_loader;
pub mod recipe_service;
pub mod search_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use feedback_service::FeedbackService;
pub use meal_loader::{MealLoader, MenuSnapshot};
pub use recipe_service::{BrowserOpener, PrintOpener, RecipeOpener, RecipeService};
pub use search_service::{filter_dishes, search_meals, SearchAggregator, SearchOutcome};
