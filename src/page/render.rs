use std::fmt;

use super::MenuPage;
use crate::models::{Dish, MealType, Theme, MAX_RATING};

const RESET: &str = "\x1b[0m";
const LOADING: &str = "Loading...";

fn dish_colour(theme: Theme, meal_type: MealType) -> &'static str {
    match (theme, meal_type) {
        (Theme::Dark, _) => "\x1b[37m",
        (Theme::Light, MealType::Breakfast) => "\x1b[31m",
        (Theme::Light, MealType::Lunch) => "\x1b[32m",
        (Theme::Light, MealType::Dinner) => "\x1b[33m",
    }
}

fn stars(rating: u8) -> String {
    (1..=MAX_RATING)
        .map(|star| if star <= rating { '★' } else { '☆' })
        .collect()
}

fn write_dishes(f: &mut fmt::Formatter<'_>, dishes: &[Dish]) -> fmt::Result {
    for dish in dishes {
        if dish.recipe_id.is_empty() {
            writeln!(f, "  {}", dish.name)?;
        } else {
            writeln!(f, "  {} (recipe {})", dish.name, dish.recipe_id)?;
        }
    }
    Ok(())
}

/// Terminal view of a page
struct PageView<'a> {
    page: &'a MenuPage,
    theme: Theme,
}

impl PageView<'_> {
    fn fmt_search(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.page;
        writeln!(f, "Search: {}", page.search_term())?;
        if page.loading().search {
            writeln!(f, "{}", LOADING)
        } else if page.search_results().is_empty() {
            writeln!(f, "No Results Found")
        } else {
            write_dishes(f, page.search_results())
        }
    }

    fn fmt_category(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = self.page;
        let category = page.selected_category();
        writeln!(f, "{}", category.title())?;
        if page.loading().menu {
            writeln!(f, "{}", LOADING)
        } else if page.category_dishes().is_empty() {
            writeln!(f, "No {} Available Now", category.title())
        } else {
            write_dishes(f, page.category_dishes())
        }
    }

    fn fmt_todays_menu(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nToday's Menu")?;
        if self.page.loading().menu {
            return writeln!(f, "{}", LOADING);
        }

        for list in self.page.menu().iter() {
            let colour = dish_colour(self.theme, list.meal_type);
            writeln!(f, "{}", list.meal_type.title())?;
            for dish in &list.dishes {
                writeln!(f, "{}  • {}{}", colour, dish.name, RESET)?;
            }
        }
        Ok(())
    }

    fn fmt_feedback(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draft = self.page.draft();
        writeln!(f, "\nMeal Feedback")?;
        if !draft.text.is_empty() {
            writeln!(f, "  {}", draft.text)?;
        }
        writeln!(f, "  {}", stars(draft.rating()))
    }
}

impl fmt::Display for PageView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.page.is_searching() {
            self.fmt_search(f)?;
        } else {
            self.fmt_category(f)?;
        }
        self.fmt_todays_menu(f)?;
        self.fmt_feedback(f)
    }
}

/// Render the page as terminal text using `theme` for the daily menu colours
pub fn render_page(page: &MenuPage, theme: Theme) -> String {
    PageView { page, theme }.to_string()
}
