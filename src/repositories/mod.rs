// Repositories module - data access layer over HTTP

pub mod http;
pub mod menu_repository;
pub mod recipe_repository;

#[cfg(test)]
mod tests;

pub use http::{build_http_client, parse_base_url};
pub use menu_repository::{HttpMenuRepository, MenuRepository};
pub use recipe_repository::{HttpRecipeRepository, RecipeRepository};
