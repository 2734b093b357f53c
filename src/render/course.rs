use maud::{html, Markup};

use super::components::class_list;
use crate::view::CourseCard;

/// `with_description` is off for the compact style
pub fn card(card: &CourseCard, with_description: bool) -> Markup {
    html! {
        div class=(class_list(&[("course-card", true), ("completed", card.completed)])) {
            div class="course-header" {
                div class="course-code" { (card.code) }
                div class="course-credits" { (card.credits) " credits" }
            }
            div class="course-title" { (card.title) }
            @if with_description && !card.description.is_empty() {
                div class="course-description" { (card.description) }
            }
            @if !card.technology.is_empty() {
                div class="course-tech" {
                    @for technology in card.technology {
                        span class="tech-tag" { (technology) }
                    }
                }
            }
        }
    }
}
