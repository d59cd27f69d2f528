use crate::cli::main_types::{CalcArgs, ConfigCommands, FavoriteCommands, ListArgs, OutputFormat, QueryArgs};
use crate::cli::output;
use estate_core::api::client::ListingClient;
use estate_core::core::favorite::{ADDED_MESSAGE, FavoriteToggles, REMOVED_MESSAGE};
use estate_core::core::mortgage::MortgageInput;
use estate_core::core::query::{FilterKey, ListingQuery};
use estate_core::core::services::config_service::ConfigService;
use estate_core::core::services::favorite_store::HttpFavoriteStore;
use estate_core::core::services::traits::FavoriteStore;
use estate_core::display::render::{render_detail_result, render_load_error, render_mortgage};
use estate_core::error::{ApiError, AppError, CliError, PropertyError};
use estate_core::storage::config::{API_URL_ENV, Config, USER_EMAIL_ENV};
use estate_core::utils::logging::print_verbose;
use std::path::PathBuf;

/// Build the listing query from `--query` plus filter flags.
pub fn build_list_query(args: &ListArgs) -> ListingQuery {
    let mut query = ListingQuery::parse(&args.query);
    let flags = [
        (FilterKey::Search, &args.search),
        (FilterKey::MinPrice, &args.min_price),
        (FilterKey::MaxPrice, &args.max_price),
        (FilterKey::Bedrooms, &args.bedrooms),
        (FilterKey::Bathrooms, &args.bathrooms),
        (FilterKey::PropertyType, &args.property_type),
        (FilterKey::City, &args.city),
        (FilterKey::State, &args.state),
        (FilterKey::Zipcode, &args.zipcode),
        (FilterKey::Sort, &args.sort),
        (FilterKey::PerPage, &args.per_page),
    ];
    for (key, value) in flags {
        if let Some(value) = value {
            query.set_filter(key, value);
        }
    }
    if let Some(page) = args.page {
        query.set_page(page);
    }
    query
}

/// Apply one `key=value` assignment. `page` jumps, filters reset the page,
/// other keys become passthrough parameters.
pub fn apply_assignment(query: &mut ListingQuery, assignment: &str) -> Result<(), AppError> {
    let (key, value) = assignment.split_once('=').ok_or_else(|| {
        AppError::Cli(CliError::InvalidArguments(format!(
            "Expected key=value, got '{}'",
            assignment
        )))
    })?;
    let key = key.trim();

    if key == "page" {
        let page = value.trim().parse::<i64>().map_err(|_| {
            AppError::Cli(CliError::InvalidArguments(format!(
                "Invalid page '{}'",
                value
            )))
        })?;
        query.set_page(page);
    } else {
        query.set_passthrough(key, value);
    }
    Ok(())
}

#[derive(Default)]
pub struct ListingHandler;

impl ListingHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle_list(
        &self,
        args: ListArgs,
        client: &ListingClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        let format: OutputFormat = args.format.parse()?;
        let mut query = build_list_query(&args);
        print_verbose(verbose, &format!("Request query: {}", query.api_query()));

        let result = match client.get_properties(&query.api_query()).await {
            Ok(page) if page.pages >= 1 && query.page() > page.pages => {
                query.clamp_to_pages(page.pages);
                print_verbose(
                    verbose,
                    &format!("Past the last page, showing page {}", query.page()),
                );
                client.get_properties(&query.api_query()).await
            }
            other => other,
        };

        match result {
            Ok(page) => {
                let favorites = FavoriteToggles::new();
                println!("{}", output::listing_page(&page, &favorites, format)?);
                print_verbose(verbose, &format!("Location: {}", query.location()));
                Ok(())
            }
            Err(e) => {
                if matches!(format, OutputFormat::Cards | OutputFormat::Html) {
                    let node = render_load_error(&e.display_friendly());
                    println!("{}", output::view(&node, format, "Listings")?);
                }
                Err(e)
            }
        }
    }

    pub async fn handle_show(
        &self,
        id: u32,
        format: &str,
        client: &ListingClient,
        verbose: bool,
    ) -> Result<(), AppError> {
        let format: OutputFormat = format.parse()?;
        print_verbose(verbose, &format!("Fetching property {}", id));

        let result = client.get_property(id).await;
        if format == OutputFormat::Json {
            return println_ok(output::to_json(&result?)?);
        }

        let node = render_detail_result(&result, &FavoriteToggles::new());
        println!("{}", output::view(&node, format, "Property")?);
        result.map(|_| ())
    }
}

fn println_ok(text: String) -> Result<(), AppError> {
    println!("{}", text);
    Ok(())
}

#[derive(Default)]
pub struct FavoriteHandler;

impl FavoriteHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        command: FavoriteCommands,
        client: ListingClient,
        email: String,
        verbose: bool,
    ) -> Result<(), AppError> {
        let store = HttpFavoriteStore::new(client, email);

        match command {
            FavoriteCommands::Add { id } => {
                print_verbose(verbose, &format!("Saving property {} for {}", id, store.user_email()));
                store.add(id).await.map_err(|e| {
                    let reason = match e {
                        AppError::Api(ApiError::Http { message, .. }) => message,
                        other => other.display_friendly(),
                    };
                    AppError::Property(PropertyError::FavoriteFailed {
                        property_id: id,
                        reason,
                    })
                })?;
                println_ok(format!("✅ {}", ADDED_MESSAGE))
            }
            FavoriteCommands::Remove { id } => {
                store.remove(id).await?;
                println_ok(format!("✅ {}", REMOVED_MESSAGE))
            }
            FavoriteCommands::List { format } => {
                let format: OutputFormat = format.parse()?;
                let favorites = store.list().await?;
                print_verbose(verbose, &format!("{} favorites", favorites.len()));
                let toggles = FavoriteToggles::from_properties(&favorites);
                println_ok(output::property_list(&favorites, &toggles, format, "Favorites")?)
            }
        }
    }
}

#[derive(Default)]
pub struct CalcHandler;

impl CalcHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn handle(
        &self,
        args: CalcArgs,
        client: Option<&ListingClient>,
        verbose: bool,
    ) -> Result<(), AppError> {
        let format: OutputFormat = args.format.parse()?;

        let price = match (args.property, client) {
            (Some(id), Some(client)) if args.price.trim().is_empty() => {
                let property = client.get_property(id).await?;
                print_verbose(
                    verbose,
                    &format!("Using price of '{}': {}", property.title, property.price),
                );
                property.price.to_string()
            }
            _ => args.price.clone(),
        };

        let result =
            MortgageInput::parse(&price, &args.down, &args.rate, &args.years).map(|i| i.quote());

        if format == OutputFormat::Json {
            return println_ok(output::to_json(&result?)?);
        }

        println!("{}", output::view(&render_mortgage(&result), format, "Mortgage estimate")?);
        result.map(|_| ()).map_err(AppError::from)
    }
}

#[derive(Default)]
pub struct QueryHandler;

impl QueryHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, args: QueryArgs, verbose: bool) -> Result<(), AppError> {
        let mut query = ListingQuery::parse(&args.query);
        print_verbose(verbose, &format!("Parsed: {:?}", query));

        if args.clear {
            query.clear_filters();
        }
        for assignment in &args.set {
            apply_assignment(&mut query, assignment)?;
        }
        for key in &args.unset {
            match FilterKey::from_name(key) {
                Some(filter) => query.clear_filter(filter),
                None => query.set_passthrough(key, ""),
            }
        }
        if let Some(page) = args.page {
            query.set_page(page);
        }
        if args.next {
            query.next_page(args.pages);
        }
        if args.prev {
            query.prev_page();
        }
        if let Some(pages) = args.pages {
            query.clamp_to_pages(pages);
        }

        if args.api {
            println_ok(query.api_query())
        } else {
            println_ok(query.location())
        }
    }
}

#[derive(Default)]
pub struct ConfigHandler;

impl ConfigHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(
        &self,
        command: ConfigCommands,
        config_service: &mut ConfigService,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                print_verbose(verbose, "Attempting config show command using ConfigService");

                let path = match config_path {
                    Some(path) => path,
                    None => Config::config_file_path()?,
                };
                let config = config_service.config();

                println!("Current Configuration:");
                println!("=====================");
                println!("Config file: {}", path.display());
                println!(
                    "API URL: {}{}",
                    config_service.api_url(),
                    source_note(API_URL_ENV, config.api_url.is_some())
                );
                println!(
                    "User email: {}{}",
                    config_service.user_email(),
                    source_note(USER_EMAIL_ENV, config.user_email.is_some())
                );
                println!("Timeout: {}s", config.timeout_seconds());
                println!("Max attempts: {}", config.max_retries());
                Ok(())
            }
            ConfigCommands::Set {
                url,
                email,
                timeout,
                max_retries,
            } => {
                let mut updated_fields = Vec::new();

                if let Some(url_value) = url {
                    config_service.set_api_url(url_value.clone())?;
                    updated_fields.push(format!("API URL to: {}", url_value));
                }
                if let Some(email_value) = email {
                    config_service.set_user_email(email_value.clone())?;
                    updated_fields.push(format!("email to: {}", email_value));
                }
                if let Some(seconds) = timeout {
                    config_service.set_timeout(seconds)?;
                    updated_fields.push(format!("timeout to: {}s", seconds));
                }
                if let Some(attempts) = max_retries {
                    config_service.set_max_retries(attempts)?;
                    updated_fields.push(format!("max attempts to: {}", attempts));
                }

                if updated_fields.is_empty() {
                    return Err(AppError::Cli(CliError::InvalidArguments(
                        "No configuration values provided. Use --url, --email, --timeout or --max-retries".to_string(),
                    )));
                }

                println!("✅ Set {}", updated_fields.join(", "));
                config_service.save_config(config_path)?;
                println!("Configuration saved successfully.");
                Ok(())
            }
        }
    }
}

fn source_note(env_name: &str, in_file: bool) -> String {
    if std::env::var(env_name).is_ok_and(|v| !v.trim().is_empty()) {
        format!(" (from {})", env_name)
    } else if in_file {
        " (from config file)".to_string()
    } else {
        " (default)".to_string()
    }
}
