/// One `<item>` as found in the channel. Every field is trimmed text and is
/// empty when the element is missing or has no text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: String,
    pub description: String,
    pub pub_date: String,
}
