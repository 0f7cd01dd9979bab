pub mod date;
pub mod excerpt;

use crate::core::feed::types::FeedItem;
use crate::core::output::PostRecord;

pub const FALLBACK_TITLE: &str = "Blog Post";

pub fn build_post(item: &FeedItem, fallback_link: &str) -> PostRecord {
    let title = if item.title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        item.title.clone()
    };
    let link = if item.link.is_empty() {
        fallback_link.to_string()
    } else {
        item.link.clone()
    };

    PostRecord {
        title,
        link,
        pub_date: date::normalize_pub_date(&item.pub_date),
        excerpt: excerpt::build_excerpt(&item.description),
    }
}

pub fn build_posts(items: &[FeedItem], fallback_link: &str) -> Vec<PostRecord> {
    items
        .iter()
        .map(|item| build_post(item, fallback_link))
        .collect()
}
