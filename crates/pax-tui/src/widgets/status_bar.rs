use pax_core::metric::page_progress;
use pax_core::{Layout, Scene};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::theme::GruvboxMaterial;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, scene: &Scene, frames: u64) {
        let progress = page_progress(scene.page()) * 100.0;

        let status_text = format!(
            " PREVIEW | scroll {:.0}/{:.0}px | page {:.1}% | frame {}",
            scene.scroll_offset(),
            scene.max_scroll(),
            progress,
            frames
        );

        let help_hint = " q:quit j/k:scroll d/u:half page g/G:top/bottom ";
        let padding_len = area
            .width
            .saturating_sub(status_text.len() as u16 + help_hint.len() as u16)
            as usize;

        let line = Line::from(vec![
            Span::styled(
                status_text,
                Style::default()
                    .fg(GruvboxMaterial::FG0)
                    .bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                help_hint,
                Style::default()
                    .fg(GruvboxMaterial::GREY2)
                    .bg(GruvboxMaterial::BG2),
            ),
        ]);

        frame.render_widget(Paragraph::new(line), area);
    }
}
