use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::controller::Controller;
use crate::effects::Particle;
use crate::gateway::CounterGateway;
use crate::theme::Palette;
use crate::ui::counter::{CounterState, StatusKind};
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::{card_regions, centered_rect_by_size, layout_regions};
use crate::ui::theme::{color, BUTTON_TEXT, STATUS_ERROR, STATUS_OK};

const CARD_WIDTH: u16 = 56;
const CARD_HEIGHT: u16 = 30;
const FIELD_SIZE: f64 = 100.0;

/// Everything one frame needs, captured without holding controller locks
/// while drawing.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub counter: CounterState,
    pub palette: Palette,
    pub particles: Vec<Particle>,
    /// Where the counter lives, shown in the header.
    pub source: String,
}

impl ViewModel {
    pub fn capture<G: CounterGateway>(controller: &Controller<G>, source: &str) -> Self {
        Self {
            counter: controller.snapshot(),
            palette: controller.palette(),
            particles: controller.particles(),
            source: source.to_string(),
        }
    }
}

pub fn draw(frame: &mut Frame<'_>, view: &ViewModel) {
    let area = frame.area();
    let (header_area, body, footer_area) = layout_regions(area);

    frame.render_widget(Header::new().widget(view), header_area);

    let backdrop = Block::default().style(Style::default().bg(color(view.palette.background[0])));
    frame.render_widget(backdrop, body);

    let card_area = centered_rect_by_size(CARD_WIDTH, CARD_HEIGHT, body);
    let card = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color(view.palette.accent)))
        .style(Style::default().bg(color(view.palette.background[1])))
        .title(" Counter ");
    let inner = card.inner(card_area);
    frame.render_widget(card, card_area);

    let regions = card_regions(inner);
    frame.render_widget(value_widget(view), regions.value);
    frame.render_widget(message_widget(&view.counter), regions.message);
    frame.render_widget(buttons_widget(view), regions.buttons);
    frame.render_widget(history_widget(view, regions.history), regions.history);
    render_particles(frame, view, regions.particles);

    frame.render_widget(Footer::new().widget(footer_area), footer_area);
}

fn value_widget(view: &ViewModel) -> Paragraph<'static> {
    let style = Style::default()
        .fg(color(view.palette.accent))
        .add_modifier(Modifier::BOLD);
    Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(view.counter.display_value(), style)),
    ])
    .alignment(Alignment::Center)
}

fn message_widget(state: &CounterState) -> Paragraph<'static> {
    let line = match &state.message {
        Some(message) => {
            let fg = match message.kind {
                StatusKind::Success => STATUS_OK,
                StatusKind::Failure => STATUS_ERROR,
            };
            Line::from(Span::styled(message.text.clone(), Style::default().fg(fg)))
        }
        None => Line::from(""),
    };
    Paragraph::new(line).alignment(Alignment::Center)
}

fn buttons_widget(view: &ViewModel) -> Paragraph<'static> {
    let state = &view.counter;
    let button = |label: &str, bg| {
        let mut style = Style::default()
            .fg(BUTTON_TEXT)
            .bg(color(bg))
            .add_modifier(Modifier::BOLD);
        if state.is_busy() {
            style = style.add_modifier(Modifier::DIM);
        }
        Span::styled(format!(" {label} "), style)
    };
    let line = Line::from(vec![
        button(state.increment_label(), view.palette.increment_button.0),
        Span::raw("   "),
        button(state.reset_label(), view.palette.reset_button.0),
    ]);
    Paragraph::new(vec![Line::from(""), line]).alignment(Alignment::Center)
}

fn history_widget(view: &ViewModel, area: Rect) -> Paragraph<'static> {
    let history = &view.counter.history;
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(color(view.palette.background[2])))
        .title(" History ");

    if history.is_empty() {
        return Paragraph::new(Line::from(Span::styled(
            "No values yet",
            Style::default().add_modifier(Modifier::DIM),
        )))
        .alignment(Alignment::Center)
        .block(block);
    }

    let label_width = history
        .values()
        .map(|value| value.to_string().len())
        .max()
        .unwrap_or(1);
    let bar_room = (area.width as usize).saturating_sub(label_width + 2);
    let bar_style = Style::default().fg(color(view.palette.increment_button.1));

    let lines: Vec<Line> = history
        .values()
        .zip(history.relative_heights())
        .map(|(value, height)| {
            let cells = (height * bar_room as f64).round() as usize;
            Line::from(vec![
                Span::raw(format!("{value:>label_width$} ")),
                Span::styled("█".repeat(cells), bar_style),
            ])
        })
        .collect();
    Paragraph::new(lines).block(block)
}

fn render_particles(frame: &mut Frame<'_>, view: &ViewModel, area: Rect) {
    if area.height == 0 || area.width == 0 {
        return;
    }
    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(color(view.palette.background[2]))
        .x_bounds([0.0, FIELD_SIZE])
        .y_bounds([0.0, FIELD_SIZE])
        .paint(|ctx| {
            for particle in &view.particles {
                let coords = [particle_position(particle)];
                ctx.draw(&Points {
                    coords: &coords,
                    color: color(particle.faded_color()),
                });
            }
        });
    frame.render_widget(canvas, area);
}

/// Canvas coordinates grow upward; particle `y` grows downward.
fn particle_position(particle: &Particle) -> (f64, f64) {
    let x = particle.x as f64;
    let y = FIELD_SIZE - particle.y as f64 + particle.vertical_offset() as f64;
    (x, y)
}
