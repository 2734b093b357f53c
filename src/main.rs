use chamberboard::catalog::api::DirectoryAPI;
use chamberboard::catalog::model::{Course, Event, Member};
use chamberboard::config::env_loader::load_config;
use chamberboard::filter;
use chamberboard::listing::Listing;
use chamberboard::render::{self, components, CardStyle};
use chamberboard::stats;
use chamberboard::tracing::setup_tracing;
use chamberboard::view::EventDetails;
use std::process::ExitCode;
use tracing::{error, info};

const HOMEPAGE_EVENT_COUNT: usize = 3;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_config() {
        Ok(config) => config,
        Err(err) => {
            tracing_subscriber::fmt::init();
            error!("Couldn't load config: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let loki = setup_tracing(config.loki_url.as_deref()).await;

    let api = DirectoryAPI::new(config.load_max_retries);
    let options = config.listing.render_options();
    let today = filter::today();

    let mut events = Listing::<Event>::new(config.listing.page_size);
    let mut members = Listing::<Member>::new(config.listing.page_size);
    let mut courses = Listing::<Course>::new(config.listing.page_size);

    let (events_ticket, members_ticket, courses_ticket) =
        (events.begin_load(), members.begin_load(), courses.begin_load());

    let (loaded_events, loaded_members, loaded_courses) = futures::join!(
        api.load_events(&config.sources.events),
        api.load_members(&config.sources.members),
        api.load_courses(&config.sources.courses),
    );

    events.finish_load(events_ticket, loaded_events);
    members.finish_load(members_ticket, loaded_members);
    courses.finish_load(courses_ticket, loaded_courses);

    let upcoming = filter::upcoming(events.records(), HOMEPAGE_EVENT_COUNT, today);

    info!(
        "Homepage events:\n{}",
        render::cards(upcoming, CardStyle::Compact, &options).into_string()
    );

    info!(
        "Events page:\n{}\n{}",
        components::stats_panel(&events.summary(today)).into_string(),
        render::listing(&events.state(today), events.view_mode(), &options).into_string()
    );

    if let Some(spotlight) = filter::featured(events.records(), 1).first() {
        info!("{}", EventDetails::new(spotlight));
    }

    info!(
        "Member directory:\n{}",
        render::listing(&members.state(today), members.view_mode(), &options).into_string()
    );

    info!(
        "Course catalog:\n{}\n{}",
        render::listing(&courses.state(today), courses.view_mode(), &options).into_string(),
        components::total_credits(stats::total_credits(courses.records())).into_string()
    );

    if let Some(loki) = loki {
        loki.shutdown().await;
    }

    ExitCode::SUCCESS
}
