//! # estate-core
//!
//! Core library for browsing property listings from a listings API.
//!
//! This crate provides everything `estate` needs apart from argument
//! parsing: the HTTP client, the URL-backed filter/page state, the listing
//! controller, the mortgage calculator and the view renderers.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use estate_core::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> estate_core::Result<()> {
//!     let service = ConfigService::new(Config::load(None)?);
//!     let client = service.listing_client()?;
//!
//!     let mut controller = ListingController::from_location("?city=Austin");
//!     controller.dispatch(ListingEvent::Refresh, &client).await;
//!     println!("{}", to_text(&render_listing_state(controller.listing(), &controller.favorites)));
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │           API Layer                 │  HTTP client, listing models
//! ├─────────────────────────────────────┤
//! │          Core Layer                 │  Query state, controller, calculator
//! ├─────────────────────────────────────┤
//! │         Display Layer               │  View tree, text/HTML/table output
//! ├─────────────────────────────────────┤
//! │        Storage Layer                │  Configuration file
//! ├─────────────────────────────────────┤
//! │         Utils Layer                 │  Retry, validation, formatting
//! └─────────────────────────────────────┘
//! ```

pub use error::AppError;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::Result;
    pub use crate::error::AppError;

    pub use crate::api::client::ListingClient;
    pub use crate::api::models::{Property, PropertyPage};

    pub use crate::core::controller::{ListingController, ListingEvent};
    pub use crate::core::mortgage::{MortgageInput, MortgageQuote};
    pub use crate::core::query::{FilterKey, ListingQuery};
    pub use crate::core::services::config_service::ConfigService;
    pub use crate::core::services::traits::{FavoriteStore, PropertySource};

    pub use crate::display::render::render_listing_state;
    pub use crate::display::text::to_text;
    pub use crate::storage::config::Config;
}

/// API layer - listings HTTP client and data models.
pub mod api;

/// Business logic - query state, controller, favorites, calculator, services.
pub mod core;

/// Display layer - view tree and its text, HTML and table serializations.
pub mod display;

/// Error handling - hierarchical error system with severity and hints.
pub mod error;

/// Storage layer - TOML configuration.
pub mod storage;

/// Utilities layer - retry, validation and text formatting.
pub mod utils;

/// Convenient Result type alias using [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
