use chrono::{DateTime, Utc};

/// Published path of the archive, relative to the base URL.
pub const EPISODES_URL_PATH: &str = "episodes/";
/// Published path of the cover images, relative to the base URL.
pub const IMAGES_URL_PATH: &str = "images/";
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

const BANNER_RULE: &str = "--------------------------------";

/// Everything the RSS `<item>` needs to know about an episode.
#[derive(Debug, Clone)]
pub struct FeedItem<'a> {
    /// Numbered title, as written to the ID3 tag.
    pub title: &'a str,
    pub description: &'a str,
    pub author: &'a str,
    pub duration: &'a str,
    pub size_bytes: u64,
    pub image_name: &'a str,
    pub archived_name: &'a str,
}

/// RFC 822 date as used by RSS, e.g. `Mon, 19 Oct 2026 08:15:00 GMT`.
pub fn rfc822(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

fn cdata(text: &str) -> String {
    format!("<![CDATA[{text}]]>")
}

pub fn render_build_date(now: DateTime<Utc>) -> String {
    format!("<lastBuildDate>{}</lastBuildDate>", rfc822(now))
}

pub fn render_item(item: &FeedItem, base_url: &str, now: DateTime<Utc>) -> String {
    let audio_url = format!("{base_url}{EPISODES_URL_PATH}{}", item.archived_name);
    let image_url = format!("{base_url}{IMAGES_URL_PATH}{}", item.image_name);
    let title = cdata(item.title);
    let description = cdata(item.description);
    let date = rfc822(now);

    [
        "    <item>".to_string(),
        format!("      <title>{title}</title>"),
        format!("      <description>{description}</description>"),
        format!("      <guid isPermaLink=\"false\">{audio_url}</guid>"),
        format!("      <pubDate>{date}</pubDate>"),
        format!("      <itunes:summary>{description}</itunes:summary>"),
        format!("      <itunes:author>{}</itunes:author>", item.author),
        format!("      <itunes:image>{image_url}</itunes:image>"),
        format!("      <itunes:duration>{}</itunes:duration>", item.duration),
        format!("      <itunes:subtitle>{description}</itunes:subtitle>"),
        format!(
            "      <enclosure url=\"{audio_url}\" length=\"{}\" type=\"{AUDIO_MIME_TYPE}\" />",
            item.size_bytes
        ),
        "    </item>".to_string(),
    ]
    .join("\n")
}

/// The full block of manual feed.xml edits: the new build date and the new item.
pub fn render_fragment(item: &FeedItem, base_url: &str, now: DateTime<Utc>) -> String {
    [
        BANNER_RULE.to_string(),
        "MANUAL ACTIONS TO DO IN feed.xml".to_string(),
        BANNER_RULE.to_string(),
        "Update:".to_string(),
        render_build_date(now),
        String::new(),
        "Add:".to_string(),
        render_item(item, base_url, now),
    ]
    .join("\n")
}
