//! Message text to display markup
//!
//! Lines carrying a video link get a player block appended, then the whole
//! text goes through the markdown converter. A document that is a single
//! paragraph is emitted without the `<p>` wrapper so the page can supply
//! its own container.

mod video;

#[cfg(test)]
mod proptests;

pub use video::EmbedOptions;
use video::find_video;
#[cfg(test)]
use video::extract_video_id;

use pulldown_cmark::{html, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream};
use regex::Regex;
use std::sync::OnceLock;

fn bare_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"https?://[^\s<>"]+"#)
            .expect("bare_url_regex: pattern is valid and should always compile")
    })
}

/// Renders message text to markup with configurable embeds
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentRenderer {
    embed: EmbedOptions,
}

impl ContentRenderer {
    pub fn new(embed: EmbedOptions) -> Self {
        Self { embed }
    }

    /// Render `text` to markup. Empty text renders to an empty string.
    pub fn render(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        markdown_to_html(&self.embed_videos(text))
    }

    /// Append a player block after every line that carries a video link
    fn embed_videos(&self, text: &str) -> String {
        text.split('\n')
            .map(|line| match find_video(line) {
                Some(link) => format!("{line}\n{}", link.embed_html(self.embed)),
                None => line.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render with default embed options
#[cfg(test)]
pub fn render(text: &str) -> String {
    ContentRenderer::default().render(text)
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

fn markdown_to_html(source: &str) -> String {
    let parser = TextMergeStream::new(Parser::new_ext(source, markdown_options()));
    let events = autolink(parser);
    let body = strip_sole_paragraph(&events);

    let mut output = String::with_capacity(source.len() + source.len() / 2);
    html::push_html(&mut output, body.iter().cloned());
    output
}

/// Drop the wrapper of a document that is exactly one paragraph
fn strip_sole_paragraph<'e, 'a>(events: &'e [Event<'a>]) -> &'e [Event<'a>] {
    if top_level_blocks(events) != 1 {
        return events;
    }
    match events {
        [Event::Start(Tag::Paragraph), inner @ .., Event::End(TagEnd::Paragraph)] => inner,
        _ => events,
    }
}

fn top_level_blocks(events: &[Event<'_>]) -> usize {
    let mut depth = 0usize;
    let mut blocks = 0;
    for event in events {
        match event {
            Event::Start(_) => {
                if depth == 0 {
                    blocks += 1;
                }
                depth += 1;
            }
            Event::End(_) => depth = depth.saturating_sub(1),
            _ if depth == 0 => blocks += 1,
            _ => {}
        }
    }
    blocks
}

/// Turn bare URLs in text into links, outside of code, links and images
fn autolink<'a>(events: impl Iterator<Item = Event<'a>>) -> Vec<Event<'a>> {
    let mut output = Vec::new();
    let mut link_depth = 0usize;
    let mut in_code_block = false;

    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. }) => link_depth += 1,
            Event::End(TagEnd::Link | TagEnd::Image) => link_depth = link_depth.saturating_sub(1),
            Event::InlineHtml(html) => match anchor_tag(html) {
                Some(AnchorTag::Open) => link_depth += 1,
                Some(AnchorTag::Close) => link_depth = link_depth.saturating_sub(1),
                None => {}
            },
            Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
            Event::End(TagEnd::CodeBlock) => in_code_block = false,
            Event::Text(text)
                if link_depth == 0 && !in_code_block && bare_url_regex().is_match(text) =>
            {
                output.extend(linkify(text));
                continue;
            }
            _ => {}
        }
        output.push(event);
    }

    output
}

enum AnchorTag {
    Open,
    Close,
}

/// Classify a raw inline HTML fragment as an `<a>` open or close tag
fn anchor_tag(html: &str) -> Option<AnchorTag> {
    let tag = html.trim().to_ascii_lowercase();
    let (rest, kind) = match tag.strip_prefix("</a") {
        Some(rest) => (rest, AnchorTag::Close),
        None => (tag.strip_prefix("<a")?, AnchorTag::Open),
    };
    match rest.chars().next() {
        Some(c) if c == '>' || c.is_ascii_whitespace() => Some(kind),
        _ => None,
    }
}

fn linkify<'a>(text: &str) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut rest = text;

    while let Some(found) = bare_url_regex().find(rest) {
        let url = trim_url_punctuation(found.as_str());
        let (before, tail) = rest.split_at(found.start());
        let (_, after) = tail.split_at(url.len());

        if !before.is_empty() {
            events.push(Event::Text(CowStr::from(before.to_string())));
        }
        events.push(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: CowStr::from(url.to_string()),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push(Event::Text(CowStr::from(url.to_string())));
        events.push(Event::End(TagEnd::Link));

        rest = after;
    }

    if !rest.is_empty() {
        events.push(Event::Text(CowStr::from(rest.to_string())));
    }
    events
}

/// Trailing sentence punctuation and unbalanced `)` are not part of a URL
fn trim_url_punctuation(url: &str) -> &str {
    let mut trimmed = url;
    while let Some(last) = trimmed.chars().last() {
        let strip = match last {
            '.' | ',' | ':' | ';' | '!' | '?' | '\'' | '*' | '_' | '~' => true,
            ')' => trimmed.matches(')').count() > trimmed.matches('(').count(),
            _ => false,
        };
        if !strip {
            break;
        }
        match trimmed.strip_suffix(last) {
            Some(shorter) => trimmed = shorter,
            None => break,
        }
    }
    trimmed
}
