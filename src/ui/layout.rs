use ratatui::layout::{Constraint, Layout, Rect};

pub fn layout_regions(area: Rect) -> (Rect, Rect, Rect) {
    let header_height = area.height.min(3);
    let footer_height = 3.min(area.height.saturating_sub(header_height));
    let header = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: header_height,
    };
    let footer = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(footer_height),
        width: area.width,
        height: footer_height,
    };
    let body = Rect {
        x: area.x,
        y: area.y + header_height,
        width: area.width,
        height: area.height.saturating_sub(header_height + footer_height),
    };
    (header, body, footer)
}

/// Sub-areas of the counter card, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRegions {
    pub value: Rect,
    pub message: Rect,
    pub buttons: Rect,
    pub history: Rect,
    pub particles: Rect,
}

/// Split the inside of the card. Particles take whatever height is left.
pub fn card_regions(inner: Rect) -> CardRegions {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(7),
        Constraint::Min(0),
    ])
    .split(inner);
    CardRegions {
        value: rows[0],
        message: rows[1],
        buttons: rows[2],
        history: rows[3],
        particles: rows[4],
    }
}

/// A `width` x `height` rect centred in `area`, shrunk to fit.
pub fn centered_rect_by_size(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
