use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_FEED_URL: &str = "https://www.firstbaptistchurchwapato.com/blog-feed.xml";
pub const DEFAULT_OUT_FILE: &str = "blog.json";
pub const DEFAULT_MAX_ITEMS: usize = 6;
pub const DEFAULT_FALLBACK_LINK: &str = "https://www.firstbaptistchurchwapato.com/blog";

/// Everything a run needs to know about where to read from and write to.
///
/// `Default` carries the fixed constants the tool ships with; tests build
/// their own to point at a mock feed and a temporary output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedConfig {
    pub feed_url: String,
    pub out_file: PathBuf,
    pub max_items: usize,
    pub fallback_link: String,
    pub request_timeout: Option<Duration>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            out_file: PathBuf::from(DEFAULT_OUT_FILE),
            max_items: DEFAULT_MAX_ITEMS,
            fallback_link: DEFAULT_FALLBACK_LINK.to_string(),
            request_timeout: None,
        }
    }
}
