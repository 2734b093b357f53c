//! Event cards: the compact homepage card plus the grid and list layouts of
//! the events page.

use maud::{html, Markup};

use super::components::{class_list, is_safe_link};
use crate::view::{EventCard, Spots};

pub fn compact(card: &EventCard) -> Markup {
    html! {
        div class=(class_list(&[("event-card", true), ("featured-event", card.featured), ("free-event", card.free)]))
            data-category=(card.category.to_lowercase()) {
            @if card.featured {
                div class="featured-badge" { "Featured" }
            }
            @if let Some(date) = &card.date {
                div class="event-date" {
                    span class="event-day" { (date.day) }
                    span class="event-month" { (date.month.to_uppercase()) }
                }
            }
            div class="event-content" {
                div class="event-category" { (card.category) }
                h3 class="event-title" { (card.title) }
                p class="event-description" { (card.description) }
                div class="event-details" {
                    @if let Some(time_range) = &card.time_range {
                        div class="event-time" { span class="icon" { "🕒" } " " (time_range) }
                    }
                    div class="event-location" { span class="icon" { "📍" } " " (card.location) }
                    div class="event-price" { span class="icon" { "💰" } " " (card.price) }
                    @if let Some(Spots { remaining, low: true }) = card.spots {
                        div class="event-spots" {
                            span class="icon" { "👥" } " Only " (remaining) " spots left!"
                        }
                    }
                }
                div class="event-actions" {
                    (register_link(card, "event-cta"))
                    (share_button(card))
                }
            }
        }
    }
}

pub fn grid(card: &EventCard) -> Markup {
    html! {
        div class=(class_list(&[("event-card-grid", true), ("featured", card.featured)])) {
            @if card.featured {
                div class="event-badge" { "Featured" }
            }
            div class="event-content-grid" {
                @if let Some(date) = &card.date {
                    div class="event-date-grid" {
                        div class="event-date-main" {
                            span class="event-day" { (date.day) }
                            span class="event-month" { (date.month) }
                        }
                        div class="event-date-info" {
                            div class="event-weekday" { (date.weekday) }
                            @if let Some(time_range) = &card.time_range {
                                div class="event-time" { (time_range) }
                            }
                        }
                    }
                }
                div class="event-category" { (card.category) }
                h3 class="event-title-grid" { (card.title) }
                p class="event-description-grid" { (card.description) }
                div class="event-meta-grid" {
                    div class="event-price" { (card.price) }
                    @if let Some(spots) = card.spots {
                        div class=(class_list(&[("event-spots", true), ("low", spots.low)])) {
                            (spots.remaining) " spots available"
                        }
                    }
                }
                div class="event-actions-grid" {
                    (register_link(card, "btn-event btn-register"))
                    (details_button(card, "Details"))
                }
            }
        }
    }
}

pub fn list(card: &EventCard) -> Markup {
    html! {
        div class="event-card-list" {
            @if let Some(date) = &card.date {
                div class="event-date-list" {
                    span class="event-day" { (date.day) }
                    span class="event-month" { (date.month) }
                }
            }
            div class="event-content-list" {
                div class="event-header-list" {
                    h3 class="event-title-list" { (card.title) }
                    @if card.featured {
                        span class="event-category-list" { "Featured" }
                    }
                }
                p class="event-description-list" { (card.description) }
                div class="event-details-list" {
                    @if let Some(time_range) = &card.time_range {
                        div class="event-detail-item" { span { "🕒" } span { (time_range) } }
                    }
                    div class="event-detail-item" { span { "📍" } span { (card.location) } }
                    div class="event-detail-item" { span { "💰" } span { (card.price) } }
                    @if let Some(spots) = card.spots {
                        div class="event-detail-item" {
                            span { "👥" }
                            span class=(class_list(&[("low", spots.low)])) { (spots.remaining) " spots left" }
                        }
                    }
                }
                div class="event-actions-list" {
                    (register_link(card, "btn-event btn-register"))
                    (details_button(card, "More Info"))
                }
            }
        }
    }
}

fn register_link(card: &EventCard, class: &str) -> Markup {
    html! {
        @if is_safe_link(card.registration_link) {
            a href=(card.registration_link) class=(class) { (card.cta_label) }
        } @else {
            span class=(class) { (card.cta_label) }
        }
    }
}

fn share_button(card: &EventCard) -> Markup {
    html! {
        button class="event-share" type="button" data-share=(card.id.to_string())
            data-share-title=(card.title) data-share-text=(card.description) { "Share" }
    }
}

fn details_button(card: &EventCard, label: &str) -> Markup {
    html! {
        button class="btn-event btn-details" type="button" data-event-id=(card.id.to_string()) { (label) }
    }
}
