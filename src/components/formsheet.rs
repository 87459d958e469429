use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::ui::{UiFrame, safe_set_string};

use super::{Component, ComponentContext};

/// A bordered, titled panel for formsheet content.
///
/// This is the stock content component used by the demo application and
/// tests; real applications supply their own `Component` implementations.
#[derive(Debug, Clone)]
pub struct FormsheetPanel {
    title: String,
    body: String,
    area: Rect,
}

impl FormsheetPanel {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            area: Rect::default(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Component for FormsheetPanel {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.area = area;
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.area = area;
        let border_style = if ctx.focused() {
            Style::default().fg(crate::theme::sheet_border_focused())
        } else {
            Style::default().fg(crate::theme::sheet_border())
        };
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(border_style);
        let paragraph = Paragraph::new(self.body.as_str())
            .style(
                Style::default()
                    .bg(crate::theme::sheet_bg())
                    .fg(crate::theme::sheet_fg()),
            )
            .block(block)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);

        if area.height >= 4 && area.width >= 18 {
            let hint = "[ Esc to dismiss ]";
            let hint_style = Style::default()
                .fg(crate::theme::sheet_fg())
                .add_modifier(Modifier::DIM);
            let x = area
                .x
                .saturating_add(area.width.saturating_sub(hint.len() as u16 + 1));
            let y = area.y.saturating_add(area.height.saturating_sub(2));
            let bounds = area.intersection(frame.area());
            safe_set_string(frame.buffer_mut(), bounds, x, y, hint, hint_style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn render_fills_its_area() {
        let area = Rect {
            x: 0,
            y: 0,
            width: 30,
            height: 8,
        };
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let mut panel = FormsheetPanel::new("Details", "hello");
        panel.render(&mut frame, area, &ComponentContext::new(true).with_overlay(true));
        // Border corner drawn at the origin.
        assert_ne!(buffer.cell((0, 0)).unwrap().symbol(), " ");
    }

    #[test]
    fn setters_replace_text() {
        let mut panel = FormsheetPanel::new("a", "b");
        panel.set_title("Title");
        panel.set_body("Body");
        assert_eq!(panel.title(), "Title");
        assert_eq!(panel.body(), "Body");
    }
}
