use std::sync::Arc;
use tracing::{error, instrument};

use crate::models::{validate_canteen_id, MealList, MealType, ServiceResult};
use crate::repositories::MenuRepository;

/// The three meal lists of a canteen; a slot stays `None` until a fetch succeeds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuSnapshot {
    pub breakfast: Option<MealList>,
    pub lunch: Option<MealList>,
    pub dinner: Option<MealList>,
}

impl MenuSnapshot {
    pub fn get(&self, meal_type: MealType) -> Option<&MealList> {
        match meal_type {
            MealType::Breakfast => self.breakfast.as_ref(),
            MealType::Lunch => self.lunch.as_ref(),
            MealType::Dinner => self.dinner.as_ref(),
        }
    }

    fn slot_mut(&mut self, meal_type: MealType) -> &mut Option<MealList> {
        match meal_type {
            MealType::Breakfast => &mut self.breakfast,
            MealType::Lunch => &mut self.lunch,
            MealType::Dinner => &mut self.dinner,
        }
    }

    /// Replace every list that `other` carries; missing lists keep their current value
    pub fn merge(&mut self, other: MenuSnapshot) {
        for (meal_type, list) in [
            (MealType::Breakfast, other.breakfast),
            (MealType::Lunch, other.lunch),
            (MealType::Dinner, other.dinner),
        ] {
            if let Some(list) = list {
                *self.slot_mut(meal_type) = Some(list);
            }
        }
    }

    /// Loaded lists in breakfast, lunch, dinner order
    pub fn iter(&self) -> impl Iterator<Item = &MealList> {
        MealType::ALL
            .into_iter()
            .filter_map(move |meal_type| self.get(meal_type))
    }

    pub fn loaded_count(&self) -> usize {
        self.iter().count()
    }
}

/// Loads the breakfast, lunch and dinner menus of a canteen
pub struct MealLoader {
    repository: Arc<dyn MenuRepository>,
}

impl MealLoader {
    pub fn new(repository: Arc<dyn MenuRepository>) -> Self {
        Self { repository }
    }

    /// Fetch one meal; a failure is logged and reported as `None`
    #[instrument(skip(self), fields(canteen_id = %canteen_id, meal_type = %meal_type))]
    pub async fn load_meal(&self, canteen_id: &str, meal_type: MealType) -> Option<MealList> {
        match self.repository.find_meal(canteen_id, meal_type).await {
            Ok(dishes) => Some(MealList::new(canteen_id, meal_type, dishes)),
            Err(e) => {
                error!(error = %e, "Failed to load meal list");
                None
            }
        }
    }

    /// Fetch all three meals concurrently. Each fetch is independent: one
    /// failing does not affect the others and nothing is retried.
    #[instrument(skip(self), fields(canteen_id = %canteen_id))]
    pub async fn load(&self, canteen_id: &str) -> ServiceResult<MenuSnapshot> {
        validate_canteen_id(canteen_id)?;

        let (breakfast, lunch, dinner) = tokio::join!(
            self.load_meal(canteen_id, MealType::Breakfast),
            self.load_meal(canteen_id, MealType::Lunch),
            self.load_meal(canteen_id, MealType::Dinner),
        );

        let snapshot = MenuSnapshot {
            breakfast,
            lunch,
            dinner,
        };

        crate::info_with_trace!(loaded = snapshot.loaded_count(), "Menu loaded");
        Ok(snapshot)
    }
}
