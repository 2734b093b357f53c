use crate::render::RenderOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sources: SourcesConfig,
    pub listing: ListingConfig,
    pub load_max_retries: u32,
    pub loki_url: Option<String>,
}

/// Where each feed is read from, a URL or a local path
#[derive(Debug, Clone, PartialEq)]
pub struct SourcesConfig {
    pub events: String,
    pub members: String,
    pub courses: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ListingConfig {
    pub page_size: usize,
    pub low_availability_threshold: u32,
}

impl ListingConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            low_availability_threshold: self.low_availability_threshold,
        }
    }
}
