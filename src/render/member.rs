use maud::{html, Markup};

use super::components::{class_list, is_safe_link};
use crate::view::MemberCard;

pub fn grid(card: &MemberCard) -> Markup {
    html! {
        div class=(class_list(&[("member-card", true), ("featured", card.featured)])) {
            @if let Some(image) = card.image.filter(|image| is_safe_link(image)) {
                img src=(image) alt=(card.name) class="member-image" loading="lazy";
            }
            div class="member-name" { (card.name) }
            div class="member-address" { (card.address) }
            div class="member-phone" { (card.phone) }
            @if let Some(website) = card.website.filter(|website| is_safe_link(website)) {
                div class="member-website" {
                    a href=(website) target="_blank" rel="noopener" { "Visit Website" }
                }
            }
            div class="member-level" { (card.level) }
        }
    }
}

pub fn list(card: &MemberCard) -> Markup {
    html! {
        div class=(class_list(&[("member-card", true), ("featured", card.featured)])) {
            div class="member-info" {
                div class="member-name" { (card.name) }
                div class="member-details" {
                    div class="member-address" { (card.address) }
                    div class="member-phone" { (card.phone) }
                    @if let Some(website) = card.website.filter(|website| is_safe_link(website)) {
                        div class="member-website" {
                            a href=(website) target="_blank" rel="noopener" { "Website" }
                        }
                    }
                }
            }
            div class="member-level" { (card.level) }
        }
    }
}
