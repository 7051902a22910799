use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::models::{validate_canteen_id, Dish, MealType, ServiceResult};
use crate::repositories::MenuRepository;

/// Keep the dishes whose name contains `query`, ignoring case.
///
/// A blank query matches nothing. Input order is preserved.
pub fn filter_dishes<'a, I>(query: &str, dishes: I) -> Vec<Dish>
where
    I: IntoIterator<Item = &'a Dish>,
{
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    dishes
        .into_iter()
        .filter(|dish| dish.name_contains(&needle))
        .cloned()
        .collect()
}

/// Search breakfast, then lunch, then dinner
pub fn search_meals(query: &str, breakfast: &[Dish], lunch: &[Dish], dinner: &[Dish]) -> Vec<Dish> {
    filter_dishes(query, breakfast.iter().chain(lunch).chain(dinner))
}

/// Result of one search run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// No newer search started while this one was in flight
    Current { generation: u64, results: Vec<Dish> },
    /// A newer search superseded this one; its results must be discarded
    Stale { generation: u64, latest: u64 },
}

/// Fetches every meal of a canteen and filters them by dish name.
///
/// Each call takes a ticket from a generation counter so callers sharing one
/// aggregator can tell when a response arrived after a newer query started.
pub struct SearchAggregator {
    repository: Arc<dyn MenuRepository>,
    generation: AtomicU64,
}

impl SearchAggregator {
    pub fn new(repository: Arc<dyn MenuRepository>) -> Self {
        Self {
            repository,
            generation: AtomicU64::new(0),
        }
    }

    pub fn current_generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    #[instrument(skip(self), fields(canteen_id = %canteen_id, query = %query))]
    pub async fn search(&self, canteen_id: &str, query: &str) -> ServiceResult<SearchOutcome> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().is_empty() {
            debug!(generation, "Blank query, skipping fetch");
            return Ok(SearchOutcome::Current {
                generation,
                results: Vec::new(),
            });
        }

        validate_canteen_id(canteen_id)?;

        let (breakfast, lunch, dinner) = tokio::try_join!(
            self.repository.find_meal(canteen_id, MealType::Breakfast),
            self.repository.find_meal(canteen_id, MealType::Lunch),
            self.repository.find_meal(canteen_id, MealType::Dinner),
        )
        .map_err(|e| {
            error!(generation, error = %e, "Search fetch failed");
            e
        })?;

        let results = search_meals(query, &breakfast, &lunch, &dinner);

        let latest = self.current_generation();
        if latest != generation {
            warn!(generation, latest, "Discarding stale search response");
            return Ok(SearchOutcome::Stale { generation, latest });
        }

        crate::info_with_trace!(generation, matches = results.len(), "Search completed");
        Ok(SearchOutcome::Current {
            generation,
            results,
        })
    }
}
