//! Draft input rendering

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tui_input::Input;
use unicode_width::UnicodeWidthChar;

use crate::tui::styles::Theme;

/// Renders the draft field with a cursor.
///
/// When focused, displays an inverse-video cursor over the current character
/// position. When empty and not focused, shows the placeholder.
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    input: &Input,
    is_focused: bool,
    placeholder: &str,
    theme: &Theme,
) {
    let value_style = Style::default().fg(theme.text);
    let value = input.value();

    // Keep the cursor visible when the draft is wider than the field.
    let width = area.width.max(1) as usize;
    let scroll = input.visual_scroll(width.saturating_sub(1));

    let mut spans = Vec::new();

    if value.is_empty() {
        if is_focused {
            spans.push(Span::styled(
                " ",
                Style::default().fg(theme.background).bg(theme.accent),
            ));
        }
        spans.push(Span::styled(placeholder, Style::default().fg(theme.dimmed)));
    } else if is_focused {
        // `scroll` is in display columns, the cursor is a char index.
        let mut skipped_cols = 0;
        let mut skipped_chars = 0;
        for c in value.chars() {
            if skipped_cols >= scroll {
                break;
            }
            skipped_cols += c.width().unwrap_or(0);
            skipped_chars += 1;
        }
        let cursor_pos = input.cursor().saturating_sub(skipped_chars);
        let cursor_style = Style::default().fg(theme.background).bg(theme.accent);
        let visible: Vec<char> = value.chars().skip(skipped_chars).collect();

        let before: String = visible.iter().take(cursor_pos).collect();
        let cursor_char: String = visible
            .get(cursor_pos)
            .map(|c| c.to_string())
            .unwrap_or_else(|| " ".to_string());
        let after: String = visible.iter().skip(cursor_pos + 1).collect();

        if !before.is_empty() {
            spans.push(Span::styled(before, value_style));
        }
        spans.push(Span::styled(cursor_char, cursor_style));
        if !after.is_empty() {
            spans.push(Span::styled(after, value_style));
        }
    } else {
        spans.push(Span::styled(value, value_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn render(input: &Input, width: u16) -> ratatui::buffer::Buffer {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::default();
        terminal
            .draw(|f| {
                let area = f.area();
                render_text_field(f, area, input, true, "Add a new task", &theme);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    fn cursor_cells(buffer: &ratatui::buffer::Buffer) -> Vec<(u16, String)> {
        let accent = Theme::default().accent;
        (0..buffer.area.width)
            .filter(|&x| buffer[(x, 0)].bg == accent)
            .map(|x| (x, buffer[(x, 0)].symbol().to_string()))
            .collect()
    }

    #[test]
    fn test_cursor_on_ascii_char() {
        let input = Input::new("abc".to_string()).with_cursor(1);
        let buffer = render(&input, 20);
        assert_eq!(cursor_cells(&buffer), vec![(1, "b".to_string())]);
    }

    #[test]
    fn test_cursor_on_wide_char() {
        let input = Input::new("日本語".to_string()).with_cursor(2);
        let buffer = render(&input, 20);
        assert_eq!(buffer[(0, 0)].symbol(), "日");
        assert_eq!(buffer[(2, 0)].symbol(), "本");
        assert_eq!(cursor_cells(&buffer)[0], (4, "語".to_string()));
    }

    #[test]
    fn test_wide_draft_longer_than_field_stays_visible() {
        let input = Input::new("あいうえおかきくけこさしすせそ".to_string());
        let buffer = render(&input, 10);

        let symbols: Vec<&str> = (0..10).map(|x| buffer[(x, 0)].symbol()).collect();
        assert!(symbols.contains(&"せ"), "row was {symbols:?}");
        assert!(symbols.contains(&"そ"), "row was {symbols:?}");
        assert!(!symbols.contains(&"あ"));

        let cursor = cursor_cells(&buffer);
        assert_eq!(cursor.len(), 1);
        assert_eq!(cursor[0].1, " ");
    }
}
