use crate::ui::theme::{color, GLOBAL_BORDER, HEADER_SEPARATOR, HEADER_TEXT, STATUS_ERROR, STATUS_OK};
use crate::ui::render::ViewModel;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    pub fn widget(&self, view: &ViewModel) -> Paragraph<'static> {
        let text_style = Style::default().fg(HEADER_TEXT);
        let separator_style = Style::default().fg(HEADER_SEPARATOR);
        let (dot_style, link) = if view.counter.value.is_some() {
            (Style::default().fg(STATUS_OK), "●")
        } else {
            (Style::default().fg(STATUS_ERROR), "○")
        };
        let line = Line::from(vec![
            Span::styled("  ", text_style),
            Span::styled(link, dot_style),
            Span::styled("  ", text_style),
            Span::styled(
                "Counter",
                Style::default()
                    .fg(color(view.palette.accent))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  │  ", separator_style),
            Span::styled(view.source.clone(), text_style),
            Span::styled("  │  ", separator_style),
            Span::styled(format!("theme: {}", view.palette.name), text_style),
        ]);

        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::TOP | Borders::BOTTOM)
                .border_style(Style::default().fg(GLOBAL_BORDER)),
        )
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}
