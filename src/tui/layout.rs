use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::ColorConfig;
use crate::domain::Entry;
use crate::render::{clean_line, EntryView, FieldKind};
use crate::tui::app::MenuState;

const EXIT_LABEL: &str = "[ Exit ]";

/// Split the screen into a main area and a one-line status bar.
fn main_and_status(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    (chunks[0], chunks[1])
}

pub fn render_menu(
    frame: &mut Frame,
    entries: &[Entry],
    menu: &mut MenuState,
    colors: &ColorConfig,
    status: Option<&str>,
) {
    let (main, status_area) = main_and_status(frame.area());

    let mut items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let date = entry
                .published_at()
                .map(|d| d.format("%m/%d").to_string())
                .unwrap_or_else(|| "     ".to_string());

            let mut spans = vec![Span::raw(format!(
                "{} {}",
                date,
                clean_line(entry.display_title())
            ))];
            let feed_title = clean_line(&entry.feed_title);
            if !feed_title.is_empty() {
                spans.push(Span::styled(
                    format!("  ({})", feed_title),
                    Style::default().fg(colors.feed_title),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    items.push(ListItem::new(EXIT_LABEL).style(Style::default().add_modifier(Modifier::DIM)));

    let title = format!(
        " Unread ({}) [{}/{}] ",
        entries.len(),
        menu.index + 1,
        menu.len.max(1)
    );

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, main, &mut menu.list_state);

    let help = "j/k:Move  n/p:Page  Enter:Read  q:Quit";
    render_status_bar(frame, status_area, status.unwrap_or(help), colors);
}

pub fn render_entry(frame: &mut Frame, view: &EntryView, scroll: u16, colors: &ColorConfig) {
    let (main, status_area) = main_and_status(frame.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));

    let paragraph = Paragraph::new(entry_text(view, colors))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));

    frame.render_widget(paragraph, main);

    let content_height = wrapped_height(&view.to_string(), main.width.saturating_sub(2));
    let status = if content_height > main.height.saturating_sub(2) {
        "Up/Down/PgUp/PgDn:Scroll  any other key:Continue"
    } else {
        "Press any key to continue"
    };
    render_status_bar(frame, status_area, status, colors);
}

/// Draw `question` in a small box over whatever is on screen.
pub fn render_confirm(frame: &mut Frame, question: &str, colors: &ColorConfig) {
    let text = format!("{} (y/n)", question);
    let width = (text.chars().count() as u16 + 4).min(frame.area().width);
    let area = centered(frame.area(), width, 3);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.border));
    let paragraph = Paragraph::new(text)
        .block(block)
        .style(Style::default().add_modifier(Modifier::BOLD));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, text: &str, colors: &ColorConfig) {
    let paragraph = Paragraph::new(text.to_string())
        .style(Style::default().fg(colors.status_fg).bg(colors.status_bg));
    frame.render_widget(paragraph, area);
}

fn entry_text<'a>(view: &'a EntryView, colors: &ColorConfig) -> Text<'a> {
    let mut lines = vec![Line::from(Span::styled(
        view.title.as_str(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    for (kind, value) in &view.fields {
        let color = match kind {
            FieldKind::Date => colors.metadata_date,
            FieldKind::Author => colors.metadata_author,
            FieldKind::Feed => colors.feed_title,
            FieldKind::Link => colors.metadata_link,
        };
        lines.push(Line::from(Span::styled(
            value.as_str(),
            Style::default().fg(color),
        )));
    }

    lines.push(Line::from(EntryView::separator()));
    lines.push(Line::from(""));
    lines.extend(view.body.lines().map(Line::from));

    Text::from(lines)
}

/// Rough number of rows `text` takes when wrapped at `width` columns.
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = text
        .lines()
        .map(|line| line.chars().count().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::tests::entry;
    use ratatui::{backend::TestBackend, Terminal};

    fn menu_rows(entries: &[Entry]) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(60, 6)).unwrap();
        let mut menu = MenuState::new();
        menu.reset(entries.len());
        let colors = ColorConfig::default();
        terminal
            .draw(|frame| render_menu(frame, entries, &mut menu, &colors, None))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let width = usize::from(buffer.area.width);
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    #[test]
    fn test_menu_rows_show_cleaned_titles() {
        let mut item = entry(1, 10, "2024-03-05T10:00:00Z");
        item.title = Some("Q&amp;A <b>bold</b>".to_string());
        item.feed_title = "Tom &amp; Jerry\u{1b}[2J".to_string();

        let rows = menu_rows(&[item]);
        let row = &rows[1];
        assert!(row.contains("03/05 Q&A bold"), "row was {:?}", row);
        assert!(row.contains("(Tom & Jerry[2J)"), "row was {:?}", row);
        assert!(!rows.iter().any(|r| r.contains("&amp;") || r.contains("<b>")));
        assert!(rows[2].contains(EXIT_LABEL));
    }

    #[test]
    fn test_wrapped_height_counts_wrapped_rows() {
        assert_eq!(wrapped_height("short\n\nline", 10), 3);
        assert_eq!(wrapped_height(&"x".repeat(25), 10), 3);
        assert_eq!(wrapped_height("abc", 0), 3);
    }

    #[test]
    fn test_centered_fits_inside_area() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = centered(area, 20, 3);
        assert_eq!(rect, Rect::new(30, 10, 20, 3));

        let tiny = centered(Rect::new(0, 0, 10, 2), 20, 3);
        assert_eq!(tiny, Rect::new(0, 0, 10, 2));
    }
}
