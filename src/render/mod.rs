//! HTML fragments for the listing pages.
//!
//! Records are first mapped to view models (see [`crate::view`]) and then
//! turned into [maud](https://maud.lambda.xyz/) markup, so every interpolated
//! value is escaped. The page markup is expected to provide the anchors these
//! fragments replace (`events-container`, `no-results`, `load-more`).

pub mod components;
pub mod course;
pub mod event;
pub mod member;

use maud::{html, Markup};

use crate::catalog::model::{Course, Event, Member};
use crate::listing::{ListingState, ViewMode};
use crate::view::{CourseCard, EventCard, MemberCard, DEFAULT_LOW_AVAILABILITY_THRESHOLD};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumString, strum::Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CardStyle {
    Compact,
    Grid,
    List,
}

impl From<ViewMode> for CardStyle {
    fn from(view_mode: ViewMode) -> Self {
        match view_mode {
            ViewMode::Grid => CardStyle::Grid,
            ViewMode::List => CardStyle::List,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub low_availability_threshold: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            low_availability_threshold: DEFAULT_LOW_AVAILABILITY_THRESHOLD,
        }
    }
}

/// A record kind that knows how to draw itself as a card.
pub trait RenderCard {
    /// Id of the element the listing replaces
    const CONTAINER_ID: &'static str;
    /// Prefix of the layout wrapper class, e.g. `events` gives `events-grid`
    const COLLECTION: &'static str;

    fn render_card(&self, style: CardStyle, options: &RenderOptions) -> Markup;
}

impl RenderCard for Event {
    const CONTAINER_ID: &'static str = "events-container";
    const COLLECTION: &'static str = "events";

    fn render_card(&self, style: CardStyle, options: &RenderOptions) -> Markup {
        let card = EventCard::new(self, options.low_availability_threshold);

        match style {
            CardStyle::Compact => event::compact(&card),
            CardStyle::Grid => event::grid(&card),
            CardStyle::List => event::list(&card),
        }
    }
}

impl RenderCard for Member {
    const CONTAINER_ID: &'static str = "members-container";
    const COLLECTION: &'static str = "members";

    fn render_card(&self, style: CardStyle, _options: &RenderOptions) -> Markup {
        let card = MemberCard::new(self);

        match style {
            CardStyle::Compact | CardStyle::Grid => member::grid(&card),
            CardStyle::List => member::list(&card),
        }
    }
}

impl RenderCard for Course {
    const CONTAINER_ID: &'static str = "courses-container";
    const COLLECTION: &'static str = "courses";

    fn render_card(&self, style: CardStyle, _options: &RenderOptions) -> Markup {
        course::card(&CourseCard::new(self), style != CardStyle::Compact)
    }
}

/// Renders a record found by a lookup; a missing record renders nothing
pub fn card<R: RenderCard>(record: Option<&R>, style: CardStyle, options: &RenderOptions) -> Markup {
    match record {
        Some(record) => record.render_card(style, options),
        None => html! {},
    }
}

/// Cards in source order, without any container
pub fn cards<'a, R: RenderCard + 'a>(
    records: impl IntoIterator<Item = &'a R>,
    style: CardStyle,
    options: &RenderOptions,
) -> Markup {
    html! {
        @for record in records {
            (record.render_card(style, options))
        }
    }
}

/// The whole listing container for the current state, including the
/// load-more control when more records are available
pub fn listing<R: RenderCard>(
    state: &ListingState<'_, R>,
    view_mode: ViewMode,
    options: &RenderOptions,
) -> Markup {
    html! {
        div id=(R::CONTAINER_ID) {
            @match state {
                ListingState::NotLoaded => {
                    (components::loading_state())
                },
                ListingState::Failed(_) => {
                    (components::error_state())
                },
                ListingState::NoResults => {
                    (components::no_results())
                },
                ListingState::Showing { records, .. } => {
                    div class=(format!("{}-{}", R::COLLECTION, view_mode)) {
                        (cards(records.iter().copied(), view_mode.into(), options))
                    }
                },
            }
        }
        @if let (ListingState::Showing { has_more: true, .. }) = state {
            (components::load_more_button())
        }
    }
}
