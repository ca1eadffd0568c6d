//! Toast overlay in the bottom-right corner

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::notifications::{ToastLevel, ToastQueue};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

pub fn render_toasts(frame: &mut Frame, toasts: &ToastQueue) {
    let area = frame.area();
    let width = TOAST_WIDTH.min(area.width);
    let mut bottom = area.bottom().saturating_sub(1);

    // Newest toast sits lowest
    for toast in toasts.visible().collect::<Vec<_>>().into_iter().rev() {
        if bottom < area.y + TOAST_HEIGHT {
            break;
        }
        let rect = Rect::new(
            area.right().saturating_sub(width),
            bottom - TOAST_HEIGHT,
            width,
            TOAST_HEIGHT,
        );
        bottom -= TOAST_HEIGHT;

        let color = match toast.level {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Success => Color::Green,
            ToastLevel::Warning => Color::Yellow,
            ToastLevel::Error => Color::Red,
        };
        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(Line::from(toast.message.clone()))
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" {} ", toast.level.label()))
                        .border_style(Style::default().fg(color)),
                ),
            rect,
        );
    }
}
