use pax_core::profile::ACTIVATION_MARKER;
use pax_core::scene::Rect as SceneRect;
use pax_core::{Offset2D, Scene};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear},
    Frame,
};

use crate::theme::GruvboxMaterial;

/// Maps scene pixels onto terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    area: Rect,
    px_per_row: f64,
    px_per_column: f64,
}

impl Projection {
    /// Scale rows so the scene viewport fills `area` vertically
    pub fn fit(viewport_height: f64, area: Rect, px_per_column: f64) -> Self {
        let rows = area.height.max(1) as f64;
        let px_per_row = if viewport_height > 0.0 {
            viewport_height / rows
        } else {
            1.0
        };
        let px_per_column = if px_per_column > 0.0 { px_per_column } else { 10.0 };

        Self {
            area,
            px_per_row,
            px_per_column,
        }
    }

    /// Terminal cells covered by a node box, after scrolling and translation.
    /// Returns `None` when the box is entirely outside the area.
    pub fn project(&self, rect: SceneRect, scroll_offset: f64, translation: Offset2D) -> Option<Rect> {
        let left = rect.left + translation.x;
        let top = rect.top - scroll_offset + translation.y;

        let x0 = (left / self.px_per_column).round() as i64;
        let x1 = ((left + rect.width) / self.px_per_column).round() as i64;
        let y0 = (top / self.px_per_row).round() as i64;
        let y1 = ((top + rect.height) / self.px_per_row).round() as i64;

        let left = x0.max(0);
        let top = y0.max(0);
        let right = x1.min(self.area.width as i64);
        let bottom = y1.min(self.area.height as i64);

        if right <= left || bottom <= top {
            return None;
        }

        Some(Rect::new(
            self.area.x + left as u16,
            self.area.y + top as u16,
            (right - left) as u16,
            (bottom - top) as u16,
        ))
    }
}

pub struct SceneWidget;

impl SceneWidget {
    /// Draw every node; moving elements on top, with their current styles
    pub fn render(frame: &mut Frame, area: Rect, scene: &Scene, px_per_column: f64) {
        let viewport = Block::default()
            .title(" viewport ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(GruvboxMaterial::GREY0))
            .style(Style::default().bg(GruvboxMaterial::BG0));
        let inner = viewport.inner(area);
        frame.render_widget(viewport, area);

        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let projection = Projection::fit(scene.viewport_height(), inner, px_per_column);

        for moving in [false, true] {
            for (handle, node) in scene.nodes() {
                if node.has_class(ACTIVATION_MARKER) != moving {
                    continue;
                }

                let style = scene.style(handle);
                let translation = style.transform.unwrap_or_default();
                let Some(cells) = projection.project(node.rect, scene.scroll_offset(), translation)
                else {
                    continue;
                };

                let block = if moving {
                    let mut block = Block::default()
                        .title(format!(
                            " {} ({}, {}) ",
                            node.label(handle),
                            translation.x,
                            translation.y
                        ))
                        .borders(Borders::ALL)
                        .border_style(
                            Style::default()
                                .fg(GruvboxMaterial::YELLOW)
                                .add_modifier(Modifier::BOLD),
                        )
                        .style(Style::default().bg(GruvboxMaterial::BG1));
                    if let Some(background) = style.background {
                        block = block.title_bottom(format!(
                            " bg {} / {} ",
                            background.position_css(),
                            background.size_css()
                        ));
                    }
                    frame.render_widget(Clear, cells);
                    block
                } else {
                    Block::default()
                        .title(format!(" {} ", node.label(handle)))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(GruvboxMaterial::AQUA))
                };

                frame.render_widget(block, cells);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pax_core::{Engine, EngineConfig};
    use ratatui::{backend::TestBackend, Terminal};

    fn rect(top: f64, left: f64, width: f64, height: f64) -> SceneRect {
        SceneRect {
            top,
            left,
            width,
            height,
        }
    }

    #[test]
    fn test_projection_scales_viewport() {
        let area = Rect::new(0, 0, 80, 20);
        let projection = Projection::fit(800.0, area, 10.0);

        let cells = projection
            .project(rect(100.0, 50.0, 200.0, 200.0), 0.0, Offset2D::ZERO)
            .unwrap();
        assert_eq!(cells, Rect::new(5, 3, 20, 5));

        // Scrolling and translation move the box
        let cells = projection
            .project(rect(100.0, 50.0, 200.0, 200.0), 40.0, Offset2D::new(100.0, 0.0))
            .unwrap();
        assert_eq!(cells, Rect::new(15, 2, 20, 5));
    }

    #[test]
    fn test_projection_clips() {
        let area = Rect::new(2, 1, 80, 20);
        let projection = Projection::fit(800.0, area, 10.0);

        assert_eq!(
            projection.project(rect(2000.0, 0.0, 100.0, 100.0), 0.0, Offset2D::ZERO),
            None
        );

        let cells = projection
            .project(rect(-80.0, -100.0, 300.0, 200.0), 0.0, Offset2D::ZERO)
            .unwrap();
        assert_eq!(cells, Rect::new(2, 1, 20, 3));
    }

    #[test]
    fn test_render_labels_moving_elements() {
        let mut scene = Scene::from_toml_str(
            r##"
            [page]
            viewport_height = 400

            [[nodes]]
            id = "stage"
            width = 600
            height = 400

            [[nodes]]
            id = "hero"
            parent = "stage"
            classes = ["pax", "bg--0.5"]
            top = 40
            left = 20
            width = 400
            height = 200
            "##,
        )
        .unwrap();
        let mut engine = Engine::init(&EngineConfig::default(), &scene).unwrap();
        engine.tick(&mut scene);

        let mut terminal = Terminal::new(TestBackend::new(70, 22)).unwrap();
        terminal
            .draw(|frame| SceneWidget::render(frame, frame.area(), &scene, 10.0))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(text.contains("#hero (0, 0)"), "{}", text);
        assert!(text.contains("#stage"));
        assert!(text.contains("bg center"));
    }
}
