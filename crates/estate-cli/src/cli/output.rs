//! Formatting of command results for stdout.

use crate::cli::main_types::OutputFormat;
use estate_core::api::models::{Property, PropertyPage};
use estate_core::core::favorite::FavoriteToggles;
use estate_core::display::render::{render_card, render_listing};
use estate_core::display::view::ViewNode;
use estate_core::display::{TableDisplay, html, text};
use estate_core::error::{AppError, CliError, UtilsError};
use serde::Serialize;

pub fn to_json<T: Serialize>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| {
        AppError::Utils(UtilsError::Render {
            message: format!("JSON serialization failed: {}", e),
        })
    })
}

/// Honors `NO_COLOR` and, when the shell exports it, `COLUMNS`.
fn table() -> TableDisplay {
    let table = TableDisplay::new().with_colors(std::env::var_os("NO_COLOR").is_none());
    match std::env::var("COLUMNS").ok().and_then(|c| c.parse::<usize>().ok()) {
        Some(width) => table.with_max_width(width),
        None => table,
    }
}

/// A view tree as text or as a standalone HTML page.
pub fn view(node: &ViewNode, format: OutputFormat, title: &str) -> Result<String, AppError> {
    match format {
        OutputFormat::Cards => Ok(text::to_text(node)),
        OutputFormat::Html => Ok(html::page(title, node).into_string()),
        OutputFormat::Table | OutputFormat::Json => Err(AppError::Cli(
            CliError::InvalidArguments(format!(
                "{:?} output is not available here: use cards or html",
                format
            )),
        )),
    }
}

pub fn listing_page(
    page: &PropertyPage,
    favorites: &FavoriteToggles,
    format: OutputFormat,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => to_json(page),
        OutputFormat::Table => Ok(table().render_page(page)),
        _ => view(&render_listing(page, favorites), format, "Listings"),
    }
}

pub fn property_list(
    properties: &[Property],
    favorites: &FavoriteToggles,
    format: OutputFormat,
    title: &str,
) -> Result<String, AppError> {
    match format {
        OutputFormat::Json => to_json(&properties),
        OutputFormat::Table => Ok(table().render_properties(properties)),
        _ => {
            let page = PropertyPage::single(properties.to_vec());
            if page.is_empty() {
                return view(&render_listing(&page, favorites), format, title);
            }
            let node = ViewNode::el("section").class("favorites").children(
                properties
                    .iter()
                    .map(|p| render_card(p, favorites.is_favorite(p.id))),
            );
            view(&node, format, title)
        }
    }
}
