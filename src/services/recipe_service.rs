use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{validate_recipe_id, ServiceError, ServiceResult};
use crate::repositories::RecipeRepository;

/// Capability to show a recipe page to the user
pub trait RecipeOpener: Send + Sync {
    fn open(&self, url: &str) -> std::io::Result<()>;
}

/// Launches an external program (a browser, `xdg-open`, `open`) with the URL
pub struct BrowserOpener {
    command: String,
}

impl BrowserOpener {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl RecipeOpener for BrowserOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        Command::new(&self.command)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        Ok(())
    }
}

/// Prints the URL for the user to follow
pub struct PrintOpener;

impl RecipeOpener for PrintOpener {
    fn open(&self, url: &str) -> std::io::Result<()> {
        println!("Recipe: {}", url);
        Ok(())
    }
}

/// Resolves a dish's recipe page and opens it
pub struct RecipeService {
    repository: Arc<dyn RecipeRepository>,
    opener: Arc<dyn RecipeOpener>,
}

impl RecipeService {
    pub fn new(repository: Arc<dyn RecipeRepository>, opener: Arc<dyn RecipeOpener>) -> Self {
        Self { repository, opener }
    }

    /// Look up the page address of a recipe
    #[instrument(skip(self), fields(recipe_id = %recipe_id))]
    pub async fn resolve(&self, recipe_id: &str) -> ServiceResult<String> {
        validate_recipe_id(recipe_id)?;

        let url = self.repository.find_source_url(recipe_id.trim()).await?;
        if url.trim().is_empty() {
            return Err(ServiceError::RecipeUnavailable {
                recipe_id: recipe_id.to_string(),
            });
        }

        Ok(url)
    }

    /// Resolve and open a recipe page. Failures are logged and yield `None`.
    #[instrument(skip(self), fields(recipe_id = %recipe_id))]
    pub async fn open_recipe(&self, recipe_id: &str) -> Option<String> {
        let url = match self.resolve(recipe_id).await {
            Ok(url) => url,
            Err(e) => {
                error!(error = %e, "Error fetching recipe information");
                return None;
            }
        };

        if let Err(e) = self.opener.open(&url) {
            let err = ServiceError::OpenFailed {
                url,
                message: e.to_string(),
            };
            error!(error = %err, "Error opening recipe page");
            return None;
        }

        info!(url = %url, "Opened recipe page");
        Some(url)
    }
}
