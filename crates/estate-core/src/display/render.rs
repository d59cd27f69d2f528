//! Pure view builders: data in, [`ViewNode`] out.

use std::time::Instant;

use crate::api::models::{Property, PropertyPage};
use crate::core::controller::ListingController;
use crate::core::favorite::FavoriteToggles;
use crate::core::load_state::LoadState;
use crate::core::mortgage::MortgageQuote;
use crate::core::notify::Notification;
use crate::display::view::ViewNode;
use crate::error::CalculatorError;
use crate::utils::text::{format_decimal, format_money, format_number, format_price};

pub const CARD_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300?text=No+Image";
pub const DETAIL_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/800x500?text=No+Image";

pub const NO_RESULTS: &str = "No properties found";
pub const LOADING: &str = "Loading properties...";
pub const LOAD_ERROR: &str = "Error loading properties. Please try again.";
pub const NOT_FOUND: &str = "Property not found or error loading details.";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NOT_AVAILABLE: &str = "N/A";
pub const MISSING_SQFT: &str = "—";

fn square_feet_text(square_feet: Option<u32>) -> String {
    match square_feet {
        Some(sqft) if sqft > 0 => format_number(sqft as i64),
        _ => MISSING_SQFT.to_string(),
    }
}

/// `3 bd • 2 ba • 1,500 sqft`
fn features_line(property: &Property) -> String {
    format!(
        "{} bd • {} ba • {} sqft",
        property.bedrooms,
        format_decimal(property.bathrooms),
        square_feet_text(property.square_feet)
    )
}

fn image_or(property: &Property, placeholder: &str) -> String {
    property
        .image_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(placeholder)
        .to_string()
}

fn favorite_button(property_id: u32, favorite: bool, class: &str) -> ViewNode {
    let (class, label) = if favorite {
        (format!("{} active", class), "♥ Saved")
    } else {
        (class.to_string(), "♡ Save")
    };
    ViewNode::el("button")
        .class(class)
        .attr("data-property-id", property_id.to_string())
        .attr("aria-pressed", favorite.to_string())
        .with_text(label)
}

pub fn render_card(property: &Property, favorite: bool) -> ViewNode {
    let mut header = ViewNode::el("div")
        .class("property-image inline")
        .child(
            ViewNode::el("img")
                .attr("src", image_or(property, CARD_PLACEHOLDER_IMAGE))
                .attr("alt", property.title.clone()),
        )
        .child(favorite_button(property.id, favorite, "favorite-btn"));
    if !property.status.trim().is_empty() {
        header = header.child(
            ViewNode::el("div")
                .class("property-status")
                .with_text(property.status.clone()),
        );
    }

    ViewNode::el("div")
        .class("property-card card")
        .attr("data-id", property.id.to_string())
        .child(header)
        .child(
            ViewNode::el("div")
                .class("property-content")
                .child(
                    ViewNode::el("div")
                        .class("property-price")
                        .with_text(format_price(property.price)),
                )
                .child(
                    ViewNode::el("h3")
                        .class("property-title")
                        .with_text(property.title.clone()),
                )
                .child(
                    ViewNode::el("p")
                        .class("property-address")
                        .with_text(property.full_address()),
                )
                .child(
                    ViewNode::el("div")
                        .class("property-details")
                        .with_text(features_line(property)),
                )
                .child(
                    ViewNode::el("a")
                        .attr("href", property.detail_path())
                        .with_text("View details"),
                ),
        )
}

/// `N properties found`
pub fn render_results_count(total: u64) -> ViewNode {
    ViewNode::el("div")
        .class("results-count")
        .with_text(format!(
            "{} properties found",
            format_number(total.min(i64::MAX as u64) as i64)
        ))
}

pub fn render_pagination(page: u32, pages: u32) -> ViewNode {
    let pages = pages.max(1);
    ViewNode::el("nav")
        .class("pagination inline")
        .child(
            ViewNode::el("button")
                .class("prev-page")
                .flag("disabled", page <= 1)
                .with_text("Previous"),
        )
        .child(
            ViewNode::el("span")
                .class("page-info")
                .with_text(format!("Page {} of {}", page, pages)),
        )
        .child(
            ViewNode::el("button")
                .class("next-page")
                .flag("disabled", page >= pages)
                .with_text("Next"),
        )
}

pub fn render_no_results() -> ViewNode {
    ViewNode::el("div").class("no-results").with_text(NO_RESULTS)
}

pub fn render_loading() -> ViewNode {
    ViewNode::el("div").class("loading").with_text(LOADING)
}

pub fn render_load_error(detail: &str) -> ViewNode {
    let mut node = ViewNode::el("div")
        .class("load-error")
        .child(ViewNode::el("p").with_text(LOAD_ERROR));
    if !detail.trim().is_empty() {
        node = node.child(ViewNode::el("p").class("error-detail").with_text(detail));
    }
    node
}

/// Results count, card grid and pagination, or the empty state.
pub fn render_listing(page: &PropertyPage, favorites: &FavoriteToggles) -> ViewNode {
    if page.is_empty() {
        return ViewNode::el("section")
            .class("listing")
            .child(render_no_results());
    }

    ViewNode::el("section")
        .class("listing")
        .child(render_results_count(page.result_count()))
        .child(
            ViewNode::el("div").class("properties-grid").children(
                page.items
                    .iter()
                    .map(|p| render_card(p, favorites.is_favorite(p.id))),
            ),
        )
        .child(render_pagination(page.page, page.pages))
}

pub fn render_listing_state(
    state: &LoadState<PropertyPage>,
    favorites: &FavoriteToggles,
) -> ViewNode {
    match state {
        LoadState::Idle | LoadState::Loading => render_loading(),
        LoadState::Loaded(page) => render_listing(page, favorites),
        LoadState::Error(message) => render_load_error(message),
    }
}

fn detail_row(label: &str, value: String) -> ViewNode {
    ViewNode::el("div")
        .class("detail-row inline")
        .child(
            ViewNode::el("span")
                .class("detail-label")
                .with_text(format!("{}:", label)),
        )
        .child(ViewNode::el("span").class("detail-value").with_text(value))
}

fn or_not_available(value: Option<u32>, format: impl Fn(u32) -> String) -> String {
    value
        .filter(|v| *v > 0)
        .map(format)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn text_or(value: &str, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

pub fn render_detail(property: &Property, favorite: bool) -> ViewNode {
    let description = property
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or(NO_DESCRIPTION);

    ViewNode::el("article")
        .class("property-detail")
        .attr("data-id", property.id.to_string())
        .child(
            ViewNode::el("img")
                .class("main-image")
                .attr("src", image_or(property, DETAIL_PLACEHOLDER_IMAGE))
                .attr("alt", property.title.clone()),
        )
        .child(
            ViewNode::el("h1")
                .class("property-title")
                .with_text(property.title.clone()),
        )
        .child(
            ViewNode::el("p")
                .class("property-address")
                .with_text(property.full_address()),
        )
        .child(
            ViewNode::el("div")
                .class("property-price")
                .with_text(format_price(property.price)),
        )
        .child(favorite_button(property.id, favorite, "favorite-btn-large"))
        .child(
            ViewNode::el("div")
                .class("property-stats")
                .child(detail_row("Bedrooms", property.bedrooms.to_string()))
                .child(detail_row("Bathrooms", format_decimal(property.bathrooms)))
                .child(detail_row("Square Feet", square_feet_text(property.square_feet))),
        )
        .child(
            ViewNode::el("section")
                .class("property-description")
                .child(ViewNode::el("h2").with_text("Description"))
                .child(ViewNode::el("p").with_text(description)),
        )
        .child(
            ViewNode::el("section")
                .class("property-facts")
                .child(ViewNode::el("h2").with_text("Property Details"))
                .child(detail_row(
                    "Year Built",
                    or_not_available(property.year_built, |y| y.to_string()),
                ))
                .child(detail_row(
                    "Lot Size",
                    or_not_available(property.lot_size, |l| {
                        format!("{} sq ft", format_number(l as i64))
                    }),
                ))
                .child(detail_row(
                    "Property Type",
                    text_or(&property.property_type, NOT_AVAILABLE),
                ))
                .child(detail_row("Status", text_or(&property.status, NOT_AVAILABLE))),
        )
}

pub fn render_not_found() -> ViewNode {
    ViewNode::el("div")
        .class("not-found")
        .child(ViewNode::el("p").with_text(NOT_FOUND))
        .child(
            ViewNode::el("a")
                .class("btn btn-primary")
                .attr("href", "/")
                .with_text("Back to Search"),
        )
}

pub fn render_detail_result(
    result: &crate::Result<Property>,
    favorites: &FavoriteToggles,
) -> ViewNode {
    match result {
        Ok(property) => render_detail(property, favorites.is_favorite(property.id)),
        Err(_) => render_not_found(),
    }
}

pub fn render_mortgage(result: &Result<MortgageQuote, CalculatorError>) -> ViewNode {
    match result {
        Ok(quote) => ViewNode::el("div")
            .class("mortgage-result")
            .child(
                ViewNode::el("div")
                    .class("monthly-payment")
                    .with_text(quote.monthly_display()),
            )
            .child(detail_row("Down Payment", format_money(quote.down_payment)))
            .child(detail_row("Loan Amount", format_money(quote.loan_amount)))
            .child(detail_row(
                "Total Paid",
                format!("{} over {} payments", format_money(quote.total_paid), quote.months),
            ))
            .child(detail_row("Total Interest", format_money(quote.total_interest))),
        Err(e) => ViewNode::el("div")
            .class("mortgage-error")
            .with_text(e.to_string()),
    }
}

/// The single notification region; present even when empty.
pub fn render_notification(current: Option<&Notification>) -> ViewNode {
    let region = ViewNode::el("div")
        .class("notification-region")
        .attr("role", "status");
    match current {
        Some(n) => region.child(
            ViewNode::el("div")
                .class(format!("notification {}", n.kind.as_str()))
                .with_text(n.message.clone()),
        ),
        None => region,
    }
}

/// Whole listing view of a controller at `now`.
pub fn render_listing_view(controller: &ListingController, now: Instant) -> ViewNode {
    ViewNode::el("main")
        .class("listing-view")
        .child(render_notification(controller.notifications.current(now)))
        .child(render_listing_state(controller.listing(), &controller.favorites))
}
