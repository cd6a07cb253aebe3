//! Video link detection and player embedding

use regex::Regex;
use std::sync::OnceLock;

/// Length of a valid video identifier
pub const VIDEO_ID_LEN: usize = 11;

const EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";
const FRAME_ALLOW: &str =
    "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture";
const FRAME_SANDBOX: &str = "allow-scripts allow-same-origin allow-presentation allow-popups";

fn link_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"https?://(?:www\.)?(?:youtube\.com|youtu\.be)/\S+")
            .expect("link_regex: pattern is valid and should always compile")
    })
}

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Greedy prefix so the last path marker in the URL wins
        Regex::new(r"^.*(?:youtu\.be/|v/|u/\w/|embed/|watch\?v=|&v=)([^#&?]*)")
            .expect("id_regex: pattern is valid and should always compile")
    })
}

/// Player dimensions for generated embeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbedOptions {
    pub width: u32,
    pub height: u32,
}

impl Default for EmbedOptions {
    fn default() -> Self {
        Self {
            width: 480,
            height: 200,
        }
    }
}

/// A video link found in a line of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoLink<'a> {
    /// Validated video identifier
    pub id: &'a str,
}

impl VideoLink<'_> {
    /// Player block referencing this video
    pub fn embed_html(&self, options: EmbedOptions) -> String {
        format!(
            r#"<div class="video-container"><iframe width="{width}" height="{height}" src="{EMBED_BASE_URL}{id}" title="Embedded video" frameborder="0" allow="{FRAME_ALLOW}" sandbox="{FRAME_SANDBOX}" referrerpolicy="strict-origin-when-cross-origin" allowfullscreen></iframe></div>"#,
            width = options.width,
            height = options.height,
            id = self.id,
        )
    }
}

/// Find the first video link in `line`.
///
/// Only the first link-shaped URL is considered; if its identifier fails
/// validation the line has no video, even when a later URL would pass.
pub fn find_video(line: &str) -> Option<VideoLink<'_>> {
    let url = link_regex().find(line)?.as_str();
    extract_video_id(url).map(|id| VideoLink { id })
}

/// Extract the video identifier from a video URL
pub fn extract_video_id(url: &str) -> Option<&str> {
    let id = id_regex().captures(url)?.get(1)?.as_str();
    is_valid_id(id).then_some(id)
}

fn is_valid_id(id: &str) -> bool {
    id.len() == VIDEO_ID_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
