use crate::cli::browse::BrowseHandler;
use crate::cli::command_handlers::{
    CalcHandler, ConfigHandler, FavoriteHandler, ListingHandler, QueryHandler,
};
use crate::cli::main_types::Commands;
use estate_core::core::services::config_service::ConfigService;
use estate_core::error::AppError;
use estate_core::storage::config::Config;
use estate_core::utils::logging::print_verbose;
use std::path::PathBuf;

pub struct Dispatcher {
    config: Config,
    config_path: Option<PathBuf>,
    verbose: bool,
    api_url: Option<String>,
}

impl Dispatcher {
    fn log_verbose(&self, msg: &str) {
        print_verbose(self.verbose, msg);
    }

    pub fn new(
        config: Config,
        config_path: Option<PathBuf>,
        verbose: bool,
        api_url: Option<String>,
    ) -> Self {
        Self {
            config,
            config_path,
            verbose,
            api_url,
        }
    }

    fn create_config_service(&self) -> ConfigService {
        ConfigService::new(self.config.clone()).with_url_override(self.api_url.clone())
    }

    pub async fn dispatch(&self, command: Commands) -> Result<(), AppError> {
        let service = self.create_config_service();

        match command {
            Commands::List(args) => {
                self.log_verbose(&format!("Using listings API at {}", service.api_url()));
                let client = service.listing_client()?;
                ListingHandler::new()
                    .handle_list(args, &client, self.verbose)
                    .await
            }
            Commands::Show { id, format } => {
                let client = service.listing_client()?;
                ListingHandler::new()
                    .handle_show(id, &format, &client, self.verbose)
                    .await
            }
            Commands::Favorite { email, command } => {
                let client = service.listing_client()?;
                let email = email.unwrap_or_else(|| service.user_email());
                estate_core::utils::validation::validate_email(&email)?;
                self.log_verbose(&format!("Favorites for {}", email));
                FavoriteHandler::new()
                    .handle(command, client, email, self.verbose)
                    .await
            }
            Commands::Calc(args) => {
                // Only needed when the price comes from a listing
                let client = match args.property {
                    Some(_) => Some(service.listing_client()?),
                    None => None,
                };
                CalcHandler::new()
                    .handle(args, client.as_ref(), self.verbose)
                    .await
            }
            Commands::Query(args) => QueryHandler::new().handle(args, self.verbose),
            Commands::Browse { query } => {
                let store = service.favorite_store()?;
                let client = service.listing_client()?;
                BrowseHandler::new()
                    .handle(&query, &client, &store, self.verbose)
                    .await
            }
            Commands::Config { command } => {
                let mut service = service;
                ConfigHandler::new().handle(
                    command,
                    &mut service,
                    self.config_path.clone(),
                    self.verbose,
                )
            }
        }
    }
}
