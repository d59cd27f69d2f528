//! Listing view controller.
//!
//! Owns the whole state of one listing view and turns user events into
//! fetch tickets. Responses are applied through [`ListingController::apply`],
//! which drops any response whose ticket is no longer the newest one, so
//! overlapping fetches can finish in any order.

use std::time::Instant;

use crate::Result;
use crate::api::models::PropertyPage;
use crate::core::favorite::{FavoriteChange, FavoriteToggles};
use crate::core::load_state::LoadState;
use crate::core::notify::NotificationQueue;
use crate::core::query::{FilterKey, ListingQuery};
use crate::core::services::traits::{FavoriteStore, PropertySource};

const MAX_CLAMP_REFETCHES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum ListingEvent {
    /// Load the current query again
    Refresh,
    /// Location changed externally (history navigation)
    Navigate(String),
    SubmitForm(Vec<(String, String)>),
    SetFilter(FilterKey, String),
    ClearFilter(FilterKey),
    ClearAll,
    Search(String),
    NextPage,
    PrevPage,
    GoToPage(i64),
}

/// A fetch the caller has to perform, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub generation: u64,
    pub api_query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// A newer fetch was issued meanwhile; the response was dropped
    Stale,
    /// The page was past the last page and got clamped; fetch again
    Refetch(FetchTicket),
}

#[derive(Debug, Clone, Default)]
pub struct ListingController {
    query: ListingQuery,
    listing: LoadState<PropertyPage>,
    generation: u64,
    pub notifications: NotificationQueue,
    pub favorites: FavoriteToggles,
}

impl ListingController {
    pub fn new(query: ListingQuery) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }

    pub fn from_location(location: &str) -> Self {
        Self::new(ListingQuery::parse(location))
    }

    pub fn query(&self) -> &ListingQuery {
        &self.query
    }

    pub fn listing(&self) -> &LoadState<PropertyPage> {
        &self.listing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Location to replace in history after a state change.
    pub fn location(&self) -> String {
        self.query.location()
    }

    /// Update the query for `event`. Returns the fetch to perform, or `None`
    /// when the event changes nothing (paging past either end).
    pub fn handle(&mut self, event: ListingEvent) -> Option<FetchTicket> {
        match event {
            ListingEvent::Refresh => {}
            ListingEvent::Navigate(location) => self.query = ListingQuery::parse(&location),
            ListingEvent::SubmitForm(fields) => self.query.apply_form(fields),
            ListingEvent::SetFilter(key, value) => self.query.set_filter(key, value),
            ListingEvent::ClearFilter(key) => self.query.clear_filter(key),
            ListingEvent::ClearAll => self.query.clear_filters(),
            ListingEvent::Search(text) => self.query.set_filter(FilterKey::Search, text),
            ListingEvent::NextPage => {
                let pages = self.listing.data().map(|page| page.pages);
                if !self.query.next_page(pages) {
                    return None;
                }
            }
            ListingEvent::PrevPage => {
                if !self.query.prev_page() {
                    return None;
                }
            }
            ListingEvent::GoToPage(page) => self.query.set_page(page),
        }

        Some(self.issue_ticket())
    }

    fn issue_ticket(&mut self) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.listing = LoadState::Loading;
        FetchTicket {
            generation: self.generation,
            api_query: self.query.api_query(),
        }
    }

    /// Apply a fetch result if `ticket` is still the newest one.
    pub fn apply(&mut self, ticket: &FetchTicket, result: Result<PropertyPage>) -> ApplyOutcome {
        self.apply_with(ticket, result, true)
    }

    /// Like [`ListingController::apply`]; with `may_refetch` unset a page
    /// past the end is shown as received instead of asking for another fetch.
    fn apply_with(
        &mut self,
        ticket: &FetchTicket,
        result: Result<PropertyPage>,
        may_refetch: bool,
    ) -> ApplyOutcome {
        if ticket.generation != self.generation {
            log::debug!(
                "Dropping stale listing response (generation {}, current {})",
                ticket.generation,
                self.generation
            );
            return ApplyOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let requested = self.query.page();
                self.query.clamp_to_pages(page.pages);
                if self.query.page() != requested {
                    if may_refetch {
                        log::debug!(
                            "Page {} is past the last page {}, clamping",
                            requested,
                            page.pages
                        );
                        return ApplyOutcome::Refetch(self.issue_ticket());
                    }
                    log::warn!(
                        "Page count keeps shrinking (now {}), showing the last response",
                        page.pages
                    );
                }
                self.listing = LoadState::Loaded(page);
            }
            Err(e) => {
                log::warn!("Listing fetch failed: {}", e);
                self.listing = LoadState::Error(e.display_friendly());
            }
        }
        ApplyOutcome::Applied
    }

    /// Handle an event and run its fetch to completion against `source`.
    /// Returns whether the listing changed.
    pub async fn dispatch<S>(&mut self, event: ListingEvent, source: &S) -> bool
    where
        S: PropertySource + ?Sized,
    {
        let Some(mut ticket) = self.handle(event) else {
            return false;
        };

        let mut refetches = 0;
        loop {
            let result = source.fetch_page(&ticket.api_query).await;
            match self.apply_with(&ticket, result, refetches < MAX_CLAMP_REFETCHES) {
                ApplyOutcome::Refetch(next) => {
                    ticket = next;
                    refetches += 1;
                }
                outcome => return outcome == ApplyOutcome::Applied,
            }
        }
    }

    pub async fn toggle_favorite<F>(
        &mut self,
        property_id: u32,
        store: &F,
        now: Instant,
    ) -> FavoriteChange
    where
        F: FavoriteStore + ?Sized,
    {
        self.favorites
            .toggle_and_sync(property_id, store, &mut self.notifications, now)
            .await
    }
}
