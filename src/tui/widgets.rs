use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::accessibility::{check_accessibility, contrast_text_color};
use crate::color::{Color as AppColor, ColorValue};
use crate::convert::convert_color;
use crate::session::CardSize;
use crate::vision::{simulate_color, VisionDeficiency};

/// Renders the palette as rows of colored swatches labelled with their hex.
/// Highlights the selected swatch and can show the palette through a
/// simulated color-vision deficiency.
pub struct PaletteWidget<'a> {
    palette: &'a [ColorValue],
    selected: Option<usize>,
    simulation: Option<VisionDeficiency>,
    card_size: CardSize,
}

impl<'a> PaletteWidget<'a> {
    pub fn new(palette: &'a [ColorValue], selected: Option<usize>) -> Self {
        Self {
            palette,
            selected,
            simulation: None,
            card_size: CardSize::Medium,
        }
    }

    pub fn simulation(mut self, simulation: Option<VisionDeficiency>) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn card_size(mut self, card_size: CardSize) -> Self {
        self.card_size = card_size;
        self
    }

    fn shown(&self, value: &ColorValue) -> AppColor {
        let color = value.color();
        match self.simulation {
            Some(kind) => simulate_color(color, kind),
            None => color,
        }
    }
}

pub fn swatch_width(size: CardSize) -> u16 {
    match size {
        CardSize::Small => 9,
        CardSize::Medium => 11,
        CardSize::Large => 15,
    }
}

fn to_color(c: AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Black or white label text for the swatch background.
fn label_fg(c: AppColor) -> Color {
    if contrast_text_color(&c.to_hex()) == "#000000" {
        Color::Black
    } else {
        Color::White
    }
}

impl Widget for PaletteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = match self.simulation {
            Some(kind) => format!("Palette ({kind})"),
            None => "Palette".to_string(),
        };
        let block = Block::bordered().title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.palette.is_empty() {
            Paragraph::new("  (empty palette, press a or r to add a color)").render(inner, buf);
            return;
        }

        let cell = swatch_width(self.card_size) + 1;
        let per_row = usize::from(((inner.width.saturating_sub(2)) / cell).max(1));

        let mut lines = Vec::new();
        for (row_no, row) in self.palette.chunks(per_row).enumerate() {
            let mut swatches = vec![Span::raw("  ")];
            let mut names = vec![Span::raw("  ")];
            for (offset, value) in row.iter().enumerate() {
                let i = row_no * per_row + offset;
                let shown = self.shown(value);
                let mut style = Style::default().bg(to_color(shown)).fg(label_fg(shown));
                if self.selected == Some(i) {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                let width = usize::from(swatch_width(self.card_size));
                swatches.push(Span::styled(format!("{:^width$}", shown.to_hex()), style));
                swatches.push(Span::raw(" "));

                let name: String = value.display_name(i).chars().take(width).collect();
                let name_style = if self.selected == Some(i) {
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                names.push(Span::styled(format!("{name:^width$}"), name_style));
                names.push(Span::raw(" "));
            }
            lines.push(Line::from(swatches));
            lines.push(Line::from(names));
            lines.push(Line::from(""));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Detail panel for one color: every format plus contrast against black and white.
pub struct DetailsWidget<'a> {
    value: Option<&'a ColorValue>,
}

impl<'a> DetailsWidget<'a> {
    pub fn new(value: Option<&'a ColorValue>) -> Self {
        Self { value }
    }
}

impl Widget for DetailsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Details");
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(value) = self.value else {
            return;
        };
        let formats = convert_color(value.hex());
        let on_white = check_accessibility(value.hex(), "#FFFFFF");
        let on_black = check_accessibility(value.hex(), "#000000");
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("  {}  ", formats.hex),
                    Style::default()
                        .bg(to_color(value.color()))
                        .fg(label_fg(value.color())),
                ),
                Span::raw(format!("  {}", value.name().unwrap_or("(unnamed)"))),
            ]),
            Line::from(format!("  {}   {}", formats.rgb, formats.hsl)),
            Line::from(format!("  {}   {}", formats.cmyk, formats.lab)),
            Line::from(format!(
                "  on white {:.2}:1 {}   on black {:.2}:1 {}",
                on_white.ratio, on_white.level, on_black.ratio, on_black.level
            )),
        ];
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(inner, buf);
    }
}
