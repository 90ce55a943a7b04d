//! Plain-text views of entries for the terminal.

pub mod html;

use std::fmt;

use crate::domain::Entry;

pub use html::html_to_text;

pub const NO_CONTENT_PLACEHOLDER: &str = "No content available.";

const SEPARATOR_WIDTH: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Date,
    Author,
    Feed,
    Link,
}

/// An entry reduced to header fields and a plain-text body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryView {
    pub title: String,
    pub fields: Vec<(FieldKind, String)>,
    pub body: String,
}

impl EntryView {
    pub fn new(entry: &Entry) -> Self {
        let mut fields = Vec::new();

        if let Some(date) = format_published(entry) {
            fields.push((FieldKind::Date, date));
        }
        if let Some(author) = entry.author.as_deref().map(clean_line).filter(|a| !a.is_empty()) {
            fields.push((FieldKind::Author, format!("By: {}", author)));
        }
        if !entry.feed_title.is_empty() {
            fields.push((FieldKind::Feed, format!("Feed: {}", clean_line(&entry.feed_title))));
        }
        if let Some(url) = entry.url.as_deref().map(clean_line).filter(|u| !u.is_empty()) {
            fields.push((FieldKind::Link, format!("Link: {}", url)));
        }

        let body = match entry.content.as_deref() {
            Some(content) => html_to_text(content),
            None => NO_CONTENT_PLACEHOLDER.to_string(),
        };

        Self {
            title: clean_line(entry.display_title()),
            fields,
            body,
        }
    }

    pub fn separator() -> String {
        "─".repeat(SEPARATOR_WIDTH)
    }
}

impl fmt::Display for EntryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        for (_, line) in &self.fields {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "{}", Self::separator())?;
        writeln!(f)?;
        write!(f, "{}", self.body)
    }
}

/// Render `entry` as a block of plain text.
pub fn render_entry(entry: &Entry) -> String {
    EntryView::new(entry).to_string()
}

fn format_published(entry: &Entry) -> Option<String> {
    match entry.published_at() {
        Some(at) => Some(at.format("%Y-%m-%d %H:%M UTC").to_string()),
        None => entry
            .published
            .as_deref()
            .map(clean_line)
            .filter(|raw| !raw.is_empty()),
    }
}

/// Header fields are single lines: entities decoded, markup and control
/// characters removed.
pub(crate) fn clean_line(raw: &str) -> String {
    html_to_text(raw).split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Entry {
        let mut entry = Entry::new(7, 3);
        entry.title = Some("Release &amp; Notes".into());
        entry.author = Some("Jane".into());
        entry.published = Some("2024-05-06T07:08:09.000000Z".into());
        entry.url = Some("https://example.com/post".into());
        entry.content = Some("<script>bad()</script><p>Hello<br/>World</p>".into());
        entry.feed_title = "Example Blog".into();
        entry
    }

    #[test]
    fn test_render_header_and_body() {
        let text = render_entry(&sample());
        let expected = format!(
            "Release & Notes\n2024-05-06 07:08 UTC\nBy: Jane\nFeed: Example Blog\nLink: https://example.com/post\n{}\n\nHello\nWorld",
            EntryView::separator()
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_strips_markup() {
        let view = EntryView::new(&sample());
        assert!(view.body.contains("Hello"));
        assert!(view.body.contains("World"));
        assert!(!view.body.contains("bad()"));
        assert!(!view.body.contains("<p>"));
        assert!(!view.body.contains("<script>"));
    }

    #[test]
    fn test_absent_content_uses_placeholder() {
        let mut entry = sample();
        entry.content = None;
        let view = EntryView::new(&entry);
        assert_eq!(view.body, NO_CONTENT_PLACEHOLDER);
        assert!(render_entry(&entry).ends_with(NO_CONTENT_PLACEHOLDER));
    }

    #[test]
    fn test_optional_fields_omitted() {
        let mut entry = Entry::new(1, 1);
        entry.content = Some("<p>Body</p>".into());
        let view = EntryView::new(&entry);
        assert_eq!(view.title, "(Untitled)");
        assert!(view.fields.is_empty());
    }

    #[test]
    fn test_unparseable_date_shown_raw() {
        let mut entry = sample();
        entry.published = Some("sometime in May".into());
        let view = EntryView::new(&entry);
        assert_eq!(
            view.fields[0],
            (FieldKind::Date, "sometime in May".to_string())
        );
    }

    #[test]
    fn test_empty_feed_title_omitted() {
        let mut entry = sample();
        entry.feed_title.clear();
        let view = EntryView::new(&entry);
        assert!(view.fields.iter().all(|(kind, _)| *kind != FieldKind::Feed));
    }
}
