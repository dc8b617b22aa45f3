use colored::Colorize;
use recommender_core::{
    AppViewModel, MovieCardView, HEADING, INPUT_PLACEHOLDER, RESULTS_HEADING,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::constants::*;

/// Renders the form as terminal lines: heading, input row, error line,
/// then the result grid when there are titles.
pub fn render(view: &AppViewModel, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("{} {}", TITLE_GLYPH, HEADING.bold()));

    let input = if view.query.is_empty() {
        INPUT_PLACEHOLDER.dimmed().to_string()
    } else {
        sanitize(&view.query)
    };
    let button = if view.submit_enabled {
        format!("[{}]", view.submit_label).yellow().bold().to_string()
    } else {
        format!("[{}]", view.submit_label).dimmed().to_string()
    };
    lines.push(format!("{input}  {button}"));

    if let Some(error) = &view.error {
        lines.push(sanitize(error).red().to_string());
    }

    if view.shows_results() {
        lines.push(String::new());
        lines.push(RESULTS_HEADING.bold().to_string());
        for row in view.cards.chunks(columns.max(1)) {
            lines.extend(render_card_row(row));
        }
    }

    lines
}

/// Replaces control characters so text from the endpoint can neither break
/// a line nor send escape sequences to the terminal.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_control() { REPLACEMENT_CHAR } else { ch })
        .collect()
}

fn render_card_row(cards: &[MovieCardView]) -> Vec<String> {
    let boxes = cards.iter().map(card_lines).collect::<Vec<_>>();
    (0..3)
        .map(|line| {
            boxes
                .iter()
                .map(|card| card[line].as_str())
                .collect::<Vec<_>>()
                .join(CARD_GAP)
        })
        .collect()
}

fn card_lines(card: &MovieCardView) -> [String; 3] {
    let room = CARD_WIDTH - CARD_GLYPH.width() - 1;
    let title = truncate(&sanitize(&card.title), room);
    let pad = room.saturating_sub(title.width());
    let border = "─".repeat(CARD_WIDTH + 2);
    [
        format!("┌{border}┐"),
        format!("│ {} {}{} │", CARD_GLYPH, title.bold(), " ".repeat(pad)),
        format!("└{border}┘"),
    ]
}

/// Cuts `title` to at most `max_width` terminal columns, marking the cut with `…`.
fn truncate(title: &str, max_width: usize) -> String {
    if title.width() <= max_width {
        return title.to_string();
    }
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in title.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width > budget {
            break;
        }
        used += ch_width;
        out.push(ch);
    }
    out.push('…');
    out
}
