use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use canteen_menu::{
    init_observability,
    models::{MealType, Theme},
    repositories::{HttpMenuRepository, HttpRecipeRepository},
    services::{BrowserOpener, FeedbackService, PrintOpener, RecipeOpener},
    render_page, shutdown_observability, Config, MenuPage, ObservabilityOptions, PageServices,
};

/// canteen-menu - browse a canteen's daily menu from the terminal
#[derive(Parser)]
#[command(name = "canteen-menu")]
#[command(about = "Browse canteen menus, search dishes and leave feedback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the menu of a canteen
    Menu {
        canteen_id: String,

        /// Meal shown in the category view
        #[arg(long, default_value = "breakfast")]
        category: MealType,

        /// Colour theme (overrides CANTEEN_THEME)
        #[arg(long)]
        theme: Option<Theme>,
    },
    /// Search every meal of a canteen by dish name
    Search {
        canteen_id: String,
        query: String,

        #[arg(long)]
        theme: Option<Theme>,
    },
    /// Open the recipe page of a dish
    Recipe { recipe_id: String },
    /// Submit feedback for a canteen
    Feedback {
        canteen_id: String,

        #[arg(long, default_value = "")]
        text: String,

        /// Star rating from 0 to 5
        #[arg(long, default_value_t = 0)]
        rating: u8,
    },
    /// Interactive session reading commands from stdin
    Browse { canteen_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_environment().context("Failed to load configuration")?;

    init_observability(ObservabilityOptions {
        service_name: &config.observability.service_name,
        service_version: &config.observability.service_version,
        log_level: &config.observability.log_level,
        otlp_endpoint: config.observability.otlp_endpoint.as_deref(),
        enable_json_logging: config.observability.enable_json_logging,
    })?;

    info!(
        base_url = %config.api.base_url,
        persist_feedback = config.feedback.persist_feedback,
        "Starting canteen-menu"
    );

    let result = run(cli.command, &config).await;

    shutdown_observability().await;

    result
}

async fn run(command: Commands, config: &Config) -> Result<()> {
    let services = build_services(config)?;
    let default_theme = config.presentation.theme()?;

    match command {
        Commands::Menu {
            canteen_id,
            category,
            theme,
        } => {
            let mut page = MenuPage::new(canteen_id, services);
            page.load().await?;
            page.select_category(category);
            print!("{}", render_page(&page, theme.unwrap_or(default_theme)));
        }
        Commands::Search {
            canteen_id,
            query,
            theme,
        } => {
            let mut page = MenuPage::new(canteen_id, services);
            page.set_search_term(query).await;
            print!("{}", render_page(&page, theme.unwrap_or(default_theme)));
        }
        Commands::Recipe { recipe_id } => {
            services.recipes.open_recipe(&recipe_id).await;
        }
        Commands::Feedback {
            canteen_id,
            text,
            rating,
        } => {
            let mut page = MenuPage::new(canteen_id, services);
            page.set_feedback_text(text);
            page.set_rating(rating)?;
            println!("{}", page.submit_feedback().await);
        }
        Commands::Browse { canteen_id } => {
            let mut page = MenuPage::new(canteen_id, services);
            page.load().await?;
            browse(&mut page, default_theme).await?;
        }
    }

    Ok(())
}

fn build_services(config: &Config) -> Result<PageServices> {
    let timeout = config.api.request_timeout();

    let menu_repository = Arc::new(HttpMenuRepository::new(&config.api.base_url, timeout)?);
    let recipe_repository = Arc::new(HttpRecipeRepository::new(
        &config.api.recipe_api_url,
        &config.api.api_key,
        timeout,
    )?);

    let opener: Arc<dyn RecipeOpener> = match &config.presentation.browser_command {
        Some(command) => Arc::new(BrowserOpener::new(command.trim())),
        None => Arc::new(PrintOpener),
    };

    let feedback = if config.feedback.persist_feedback {
        FeedbackService::with_persistence(menu_repository.clone(), config.feedback.student_id.clone())
    } else {
        FeedbackService::new(menu_repository.clone())
    };

    Ok(PageServices::new(
        menu_repository,
        recipe_repository,
        opener,
        feedback,
    ))
}

const BROWSE_HELP: &str = "Commands: search <query>, clear, category <meal>, open <recipe-id>, \
text <feedback>, rate <0-5>, submit, show, quit";

async fn browse(page: &mut MenuPage, theme: Theme) -> Result<()> {
    print!("{}", render_page(page, theme));
    println!("{}", BROWSE_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = match line.split_once(' ') {
            Some((command, argument)) => (command, argument.trim()),
            None => (line, ""),
        };

        match command {
            "" => continue,
            "quit" | "exit" => break,
            "search" => page.set_search_term(argument).await,
            "clear" => page.set_search_term("").await,
            "category" => match argument.parse::<MealType>() {
                Ok(meal_type) => page.select_category(meal_type),
                Err(e) => {
                    println!("{}", e);
                    continue;
                }
            },
            "open" => {
                page.open_recipe(argument).await;
                continue;
            }
            "text" => page.set_feedback_text(argument),
            "rate" => {
                let rating = argument.parse::<u8>().map_err(|e| e.to_string());
                if let Err(e) = rating.and_then(|r| page.set_rating(r).map_err(|e| e.to_string())) {
                    println!("{}", e);
                    continue;
                }
            }
            "submit" => {
                page.submit_feedback().await;
            }
            "show" => {}
            _ => {
                println!("{}", BROWSE_HELP);
                continue;
            }
        }

        for notification in page.take_notifications() {
            println!("{}", notification);
        }
        print!("{}", render_page(page, theme));
    }

    Ok(())
}
