//! Line-oriented listing browser.
//!
//! Each stdin line is one user event; the listing view is printed after
//! every change, the way a page re-renders after a filter or page click.

use estate_core::core::controller::{ListingController, ListingEvent};
use estate_core::core::favorite::FavoriteToggles;
use estate_core::core::mortgage::MortgageInput;
use estate_core::core::query::FilterKey;
use estate_core::core::services::traits::{FavoriteStore, PropertySource};
use estate_core::display::render::{
    render_detail_result, render_listing_view, render_mortgage, render_notification,
};
use estate_core::display::text::to_text;
use estate_core::error::{AppError, CliError, StorageError};
use estate_core::utils::logging::{log_warning, print_verbose};
use std::io::Write;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "Commands:
  next | prev | page <n>        move between pages
  search <text>                 free-text search
  set <filter> <value>          set one filter (e.g. set city Austin)
  unset <filter>                remove one filter
  filter k=v [k=v ...]          replace all filters
  clear                         remove every filter
  go <query string>             load a query string
  refresh                       reload the current page
  fav <id>                      toggle a favorite
  show <id>                     property details
  calc <price> <down%> <rate%> <years>
  where                         print the current location
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum BrowseCommand {
    Event(ListingEvent),
    Favorite(u32),
    Show(u32),
    Calc([String; 4]),
    Where,
    Help,
    Quit,
    Nothing,
}

fn invalid(message: String) -> AppError {
    AppError::Cli(CliError::InvalidArguments(message))
}

fn parse_id(raw: &str) -> Result<u32, AppError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| invalid(format!("Expected a property ID, got '{}'", raw)))
}

fn parse_filter_key(raw: &str) -> Result<FilterKey, AppError> {
    FilterKey::from_name(raw.trim()).ok_or_else(|| invalid(format!("Unknown filter '{}'", raw)))
}

/// Parse one input line.
pub fn parse_command(line: &str) -> Result<BrowseCommand, AppError> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let command = match word {
        "" => BrowseCommand::Nothing,
        "q" | "quit" | "exit" => BrowseCommand::Quit,
        "h" | "help" | "?" => BrowseCommand::Help,
        "where" => BrowseCommand::Where,
        "n" | "next" => BrowseCommand::Event(ListingEvent::NextPage),
        "p" | "prev" => BrowseCommand::Event(ListingEvent::PrevPage),
        "r" | "refresh" => BrowseCommand::Event(ListingEvent::Refresh),
        "clear" => BrowseCommand::Event(ListingEvent::ClearAll),
        "page" => {
            let page = rest
                .parse::<i64>()
                .map_err(|_| invalid(format!("Expected a page number, got '{}'", rest)))?;
            BrowseCommand::Event(ListingEvent::GoToPage(page))
        }
        "search" | "s" => BrowseCommand::Event(ListingEvent::Search(rest.to_string())),
        "set" => {
            let (key, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| invalid("Usage: set <filter> <value>".to_string()))?;
            BrowseCommand::Event(ListingEvent::SetFilter(
                parse_filter_key(key)?,
                value.trim().to_string(),
            ))
        }
        "unset" => BrowseCommand::Event(ListingEvent::ClearFilter(parse_filter_key(rest)?)),
        "filter" => {
            let fields = rest
                .split_whitespace()
                .map(|pair| {
                    pair.split_once('=')
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .ok_or_else(|| invalid(format!("Expected key=value, got '{}'", pair)))
                })
                .collect::<Result<Vec<_>, _>>()?;
            BrowseCommand::Event(ListingEvent::SubmitForm(fields))
        }
        "go" => BrowseCommand::Event(ListingEvent::Navigate(rest.to_string())),
        "fav" | "favorite" => BrowseCommand::Favorite(parse_id(rest)?),
        "show" => BrowseCommand::Show(parse_id(rest)?),
        "calc" => {
            let mut fields: [String; 4] = Default::default();
            for (slot, value) in fields.iter_mut().zip(rest.split_whitespace()) {
                *slot = value.to_string();
            }
            BrowseCommand::Calc(fields)
        }
        other => {
            return Err(AppError::Cli(CliError::UnknownCommand {
                command: other.to_string(),
            }));
        }
    };
    Ok(command)
}

#[derive(Default)]
pub struct BrowseHandler;

impl BrowseHandler {
    pub fn new() -> Self {
        Self
    }

    fn print_listing(&self, controller: &ListingController) {
        println!("{}", to_text(&render_listing_view(controller, Instant::now())));
        println!("Location: {}", display_location(&controller.location()));
    }

    pub async fn handle<S, F>(
        &self,
        start: &str,
        source: &S,
        store: &F,
        verbose: bool,
    ) -> Result<(), AppError>
    where
        S: PropertySource,
        F: FavoriteStore,
    {
        let mut controller = ListingController::from_location(start);

        match store.list().await {
            Ok(saved) => controller.favorites = FavoriteToggles::from_properties(&saved),
            Err(e) => log::warn!("Could not load favorites: {}", e),
        }
        print_verbose(
            verbose,
            &format!("{} favorites loaded", controller.favorites.len()),
        );

        controller.dispatch(ListingEvent::Refresh, source).await;
        self.print_listing(&controller);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            let _ = std::io::stdout().flush();

            let line = lines.next_line().await.map_err(|source| StorageError::FileIo {
                path: "<stdin>".to_string(),
                source,
            })?;
            let Some(line) = line else {
                break;
            };

            let command = match parse_command(&line) {
                Ok(command) => command,
                Err(e) => {
                    log_warning(&e.display_friendly());
                    continue;
                }
            };

            match command {
                BrowseCommand::Quit => break,
                BrowseCommand::Nothing => {}
                BrowseCommand::Help => println!("{}", HELP),
                BrowseCommand::Where => {
                    println!("{}", display_location(&controller.location()))
                }
                BrowseCommand::Event(ListingEvent::ClearAll)
                    if !controller.query().has_filters() =>
                {
                    println!("No filters to clear.");
                }
                BrowseCommand::Event(event) => {
                    print_verbose(verbose, &format!("Event: {:?}", event));
                    if controller.dispatch(event, source).await {
                        self.print_listing(&controller);
                    } else {
                        println!("No more pages in that direction.");
                    }
                }
                BrowseCommand::Favorite(id) => {
                    let now = Instant::now();
                    controller.toggle_favorite(id, store, now).await;
                    println!(
                        "{}",
                        to_text(&render_notification(controller.notifications.current(now)))
                    );
                }
                BrowseCommand::Show(id) => {
                    let result = source.fetch_property(id).await;
                    if let Err(e) = &result {
                        log::debug!("Property {} lookup failed: {}", id, e);
                    }
                    println!(
                        "{}",
                        to_text(&render_detail_result(&result, &controller.favorites))
                    );
                }
                BrowseCommand::Calc([price, down, rate, years]) => {
                    let result =
                        MortgageInput::parse(&price, &down, &rate, &years).map(|i| i.quote());
                    println!("{}", to_text(&render_mortgage(&result)));
                }
            }
        }

        Ok(())
    }
}

fn display_location(location: &str) -> &str {
    if location.is_empty() { "/" } else { location }
}
