// ABOUTME: Paged workout listing streamed newest-first down to a cutoff id
// ABOUTME: Pages are fetched lazily and stop at the cutoff, an empty page, or the last page
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Workout Listing
//!
//! The service lists workouts newest-first. An incremental sync passes the id
//! of the newest workout it already has; everything before that id is new.
//! Only the page containing the cutoff is trimmed, so the result is the same
//! whatever the page size.

use crate::client::PelotonClient;
use async_stream::try_stream;
use futures_util::{Stream, TryStreamExt};
use pelosync_core::constants::api;
use pelosync_core::models::Workout;
use pelosync_core::{ProviderError, ProviderResult};
use serde_json::Value;
use std::pin::Pin;
use tracing::debug;

/// Stream of workouts returned by [`PelotonClient::workouts_since`]
pub type WorkoutStream<'a> = Pin<Box<dyn Stream<Item = ProviderResult<Workout>> + Send + 'a>>;

/// Keep the entries that precede `cutoff_id` in one page
///
/// Returns the kept entries and whether the cutoff was found. Without a
/// cutoff, or when the cutoff is not on this page, the whole page is kept.
#[must_use]
pub fn truncate_at_cutoff(mut page: Vec<Value>, cutoff_id: Option<&str>) -> (Vec<Value>, bool) {
    let position = cutoff_id.and_then(|cutoff| {
        page.iter()
            .position(|entry| entry.get("id").and_then(Value::as_str) == Some(cutoff))
    });
    match position {
        Some(index) => {
            page.truncate(index);
            (page, true)
        }
        None => (page, false),
    }
}

#[derive(Debug)]
struct ListingPage {
    entries: Vec<Value>,
    page_count: u64,
}

fn parse_page(endpoint: &str, mut response: Value) -> ProviderResult<ListingPage> {
    let entries = match response.get_mut("data").map(Value::take) {
        Some(Value::Array(entries)) => entries,
        _ => return Err(ProviderError::invalid_response(endpoint, "listing has no `data` array")),
    };
    let page_count = response
        .get("page_count")
        .and_then(Value::as_u64)
        .unwrap_or(1);
    Ok(ListingPage {
        entries,
        page_count,
    })
}

impl PelotonClient {
    async fn fetch_listing_page(&self, page: u64, limit: usize) -> ProviderResult<ListingPage> {
        let endpoint = api::user_workouts(self.user_id().await?);
        let params = [
            ("page", page.to_string()),
            ("limit", limit.to_string()),
            ("joins", api::WORKOUT_LIST_JOINS.to_owned()),
        ];
        let response = self.request(&endpoint, &params).await?;
        parse_page(&endpoint, response)
    }

    /// Stream every workout newer than `cutoff_id`, newest first
    ///
    /// Each yielded workout has already been cached. Without a cutoff the
    /// whole history is streamed.
    pub fn workouts_since<'a>(&'a self, cutoff_id: Option<&'a str>) -> WorkoutStream<'a> {
        Box::pin(try_stream! {
            let mut page = 0_u64;
            loop {
                let listing = self.fetch_listing_page(page, self.page_size()).await?;
                let fetched = listing.entries.len();
                let (entries, found) = truncate_at_cutoff(listing.entries, cutoff_id);
                debug!(page, fetched, kept = entries.len(), found, "workout listing page");

                for entry in &entries {
                    yield self.build_workout(entry)?;
                }

                if found || fetched == 0 || page + 1 >= listing.page_count {
                    break;
                }
                page += 1;
            }
        })
    }

    /// Collect [`Self::workouts_since`] into a list
    ///
    /// # Errors
    ///
    /// Returns the first remote or cache error; nothing after it is fetched
    pub async fn list_workouts(&self, cutoff_id: Option<&str>) -> ProviderResult<Vec<Workout>> {
        self.workouts_since(cutoff_id).try_collect().await
    }

    /// Most recent workout, fetched with a single one-entry page
    ///
    /// # Errors
    ///
    /// Returns the listing request's error
    pub async fn latest_workout(&self) -> ProviderResult<Option<Workout>> {
        let listing = self.fetch_listing_page(0, 1).await?;
        listing
            .entries
            .first()
            .map(|entry| self.build_workout(entry))
            .transpose()
    }
}
