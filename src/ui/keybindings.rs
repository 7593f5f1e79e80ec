use crate::domain::UiMode;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect, mode: UiMode) {
    let hints = match mode {
        UiMode::Normal => Line::from(vec![
            Span::raw(" ←/→ day   "),
            Span::raw("[ / ] month   "),
            Span::raw("t today   "),
            Span::raw("↑/↓ select   "),
            Span::raw("Tab pane   "),
            Span::raw("a add   "),
            Span::raw("e edit   "),
            Span::raw("Space done/restore   "),
            Span::raw("d delete   "),
            Span::raw("u undo   "),
            Span::raw("q quit"),
        ]),
        UiMode::AddingTask | UiMode::EditingTask => Line::from(vec![
            Span::raw(" Enter save   "),
            Span::raw("Esc cancel   "),
            Span::raw("Backspace delete"),
        ]),
    };

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
