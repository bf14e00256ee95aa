//! Single row of the task list

use ratatui::prelude::*;
use ratatui::widgets::ListItem;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::task::Task;
use crate::tui::styles::Theme;

// "[x] " prefix
const CHECKBOX_WIDTH: usize = 4;

/// Cut `s` to at most `max` display columns, ending with "…" when shortened.
pub fn fit_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub fn task_row<'a>(task: &Task, width: u16, theme: &Theme) -> ListItem<'a> {
    let name_width = (width as usize).saturating_sub(CHECKBOX_WIDTH);
    let name = fit_width(&task.name, name_width);

    let name_style = if task.completed {
        Style::default().fg(theme.dimmed).crossed_out()
    } else {
        Style::default().fg(theme.text)
    };

    ListItem::new(Line::from(vec![
        Span::styled(
            format!("{} ", task.state().checkbox()),
            Style::default().fg(theme.checkbox).bold(),
        ),
        Span::styled(name, name_style),
    ]))
}
