//! Fragments shared by every listing page.

use maud::{html, Markup};

use crate::filter::QuickFilter;
use crate::stats::Summary;
use strum::IntoEnumIterator;

/// Link targets allowed into `href`/`src`: http(s) URLs and relative paths.
///
/// Anything carrying another scheme (`javascript:`, `data:`) is refused.
pub fn is_safe_link(link: &str) -> bool {
    let link = link.trim();

    if link.is_empty() {
        return false;
    }

    match link.find(':') {
        Some(colon) if !link[..colon].contains('/') => {
            link.starts_with("https://") || link.starts_with("http://")
        }
        _ => true,
    }
}

/// Joins the classes that apply, skipping the ones switched off
pub fn class_list(classes: &[(&str, bool)]) -> String {
    classes
        .iter()
        .filter(|(_, on)| *on)
        .map(|(class, _)| *class)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn loading_state() -> Markup {
    html! {
        div class="loading-state" {
            p { "Loading..." }
        }
    }
}

pub fn error_state() -> Markup {
    html! {
        div class="error-state" {
            p { "Unable to load data at this time. Please try again later." }
        }
    }
}

pub fn no_results() -> Markup {
    html! {
        div id="no-results" class="no-results" {
            p { "No results found matching your criteria." }
        }
    }
}

pub fn load_more_button() -> Markup {
    html! {
        button id="load-more" class="btn-load-more" type="button" { "Load More" }
    }
}

/// The quick filter buttons, `active` one highlighted
pub fn quick_filters(active: QuickFilter) -> Markup {
    html! {
        div class="event-filters" {
            @for quick_filter in QuickFilter::iter() {
                button class=(class_list(&[("filter-btn", true), ("active", quick_filter == active)]))
                    type="button" data-filter=(quick_filter.to_string()) {
                    (quick_filter_label(quick_filter))
                }
            }
        }
    }
}

fn quick_filter_label(quick_filter: QuickFilter) -> &'static str {
    match quick_filter {
        QuickFilter::All => "All Events",
        QuickFilter::Featured => "Featured",
        QuickFilter::Free => "Free Events",
        QuickFilter::Workshop => "Workshops",
    }
}

pub fn stats_panel(summary: &Summary) -> Markup {
    html! {
        div class="events-stats" {
            div class="stat" {
                span id="total-events" class="stat-number" { (summary.total) }
                span class="stat-label" { "Total" }
            }
            div class="stat" {
                span id="free-events" class="stat-number" { (summary.free) }
                span class="stat-label" { "Free" }
            }
            div class="stat" {
                span id="featured-events" class="stat-number" { (summary.featured) }
                span class="stat-label" { "Featured" }
            }
            div class="stat" {
                span id="upcoming-events" class="stat-number" { (summary.upcoming) }
                span class="stat-label" { "Upcoming" }
            }
        }
    }
}

pub fn total_credits(credits: u32) -> Markup {
    html! {
        p class="credits-total" {
            "Total credits: " span id="total-credits" { (credits) }
        }
    }
}
