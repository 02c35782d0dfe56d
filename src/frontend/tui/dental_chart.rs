//! Renders the dental defect selection chart.
//!
//! Two rows of 16 tooth cells (upper and lower jaw), tooth numbers 8..1 1..8
//! around them, a reset button and the bilingual missing-count summary. The
//! render pass returns a [`ChartLayout`] so the frontend can map mouse clicks
//! back to teeth.
//!
//! Layout (grid part):
//!  Upper Right                                           Upper Left
//!   8   7   6   5   4   3   2   1  │  1   2   3   4   5   6   7   8
//!  ( ) ( ) (●) ( ) ( ) ( ) ( ) ( ) │ ( ) ( ) ( ) ( ) ( ) ( ) ( ) ( )
//!  ────────────────────────────────┼────────────────────────────────
//!  ( ) ( ) ( ) ( ) ( ) ( ) ( ) ( ) │ ( ) ( ) ( ) ( ) ( ) ( ) ( ) ( )

use crate::combinatorics::DENTITION_SIZE;
use crate::config::{BorderSides, Config, ContentAlign};
use crate::core::{ChartSummary, ChartTarget};
use crate::data::{Jaw, ToothPosition, ToothState, TEETH_PER_QUADRANT};
use crate::locale;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Paragraph, Widget as RatatuiWidget},
};

const CELL_WIDTH: u16 = 4;
const MIDLINE_GAP: u16 = 2;
const TEETH_PER_ROW: usize = TEETH_PER_QUADRANT * 2;
const GRID_WIDTH: u16 = TEETH_PER_ROW as u16 * CELL_WIDTH - 1 + MIDLINE_GAP;
const MIDLINE_X: u16 = TEETH_PER_QUADRANT as u16 * CELL_WIDTH;

// Fits inside the border of an 80x24 terminal
const CONTENT_WIDTH: u16 = 78;
const CONTENT_HEIGHT: u16 = 21;

// Row offsets inside the content box
const ROW_INSTRUCTIONS_JA: u16 = 0;
const ROW_INSTRUCTIONS_EN: u16 = 1;
const ROW_UPPER_LABELS: u16 = 3;
const ROW_UPPER_NUMBERS: u16 = 4;
const ROW_UPPER_TEETH: u16 = 5;
const ROW_OCCLUSAL: u16 = 6;
const ROW_LOWER_TEETH: u16 = 7;
const ROW_LOWER_NUMBERS: u16 = 8;
const ROW_LOWER_LABELS: u16 = 9;
const ROW_RESET: u16 = 11;
const ROW_MISSING_COUNT: u16 = 13;
const ROW_COMBINATIONS: u16 = 14;
const ROW_SENTENCE_JA: u16 = 16;
// The English sentence takes two rows
const ROW_SENTENCE_EN: u16 = 17;
const ROW_WARNING: u16 = 19;
const ROW_STATUS: u16 = 20;

/// Screen regions of the last render, for mouse hit-testing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartLayout {
    teeth: Vec<(Rect, ToothPosition)>,
    reset_button: Option<Rect>,
}

impl ChartLayout {
    pub fn target_at(&self, x: u16, y: u16) -> Option<ChartTarget> {
        let hit = |rect: &Rect| {
            x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
        };

        if let Some(position) = self
            .teeth
            .iter()
            .find(|(rect, _)| hit(rect))
            .map(|(_, position)| *position)
        {
            return Some(ChartTarget::Tooth(position));
        }

        self.reset_button
            .filter(|rect| hit(rect))
            .map(|_| ChartTarget::ResetButton)
    }
}

#[cfg(test)]
impl ChartLayout {
    pub fn tooth_rect(&self, position: ToothPosition) -> Option<Rect> {
        self.teeth
            .iter()
            .find(|(_, p)| *p == position)
            .map(|(rect, _)| *rect)
    }

    pub fn reset_button(&self) -> Option<Rect> {
        self.reset_button
    }
}

/// Colors resolved from the config's hex strings
#[derive(Debug, Clone)]
struct ChartPalette {
    missing: Color,
    present: Color,
    cursor: Color,
    border: Option<Color>,
    label: Color,
    number: Color,
    count: Color,
    combinations: Color,
}

impl Default for ChartPalette {
    fn default() -> Self {
        Self {
            missing: Color::Red,
            present: Color::Gray,
            cursor: Color::Yellow,
            border: None,
            label: Color::White,
            number: Color::Gray,
            count: Color::Red,
            combinations: Color::LightBlue,
        }
    }
}

/// Dental chart widget
pub struct DentalChart {
    label: String,
    state: ToothState,
    summary: ChartSummary,
    cursor: Option<ToothPosition>,
    status: String,
    show_border: bool,
    border_style: Option<String>,
    border_sides: BorderSides,
    content_align: ContentAlign,
    missing_glyph: char,
    present_glyph: char,
    palette: ChartPalette,
    background_color: Option<Color>,
}

impl DentalChart {
    pub fn new(label: &str) -> Self {
        let state = ToothState::new();
        Self {
            label: label.to_string(),
            state,
            summary: ChartSummary::from_state(&state),
            cursor: None,
            status: String::new(),
            show_border: true,
            border_style: None,
            border_sides: BorderSides::default(),
            content_align: ContentAlign::Top,
            missing_glyph: '●',
            present_glyph: ' ',
            palette: ChartPalette::default(),
            background_color: None, // Transparent
        }
    }

    /// Pull border, glyph, alignment and color settings from the config
    pub fn apply_config(&mut self, config: &Config) {
        let ui = &config.ui;
        self.show_border = ui.show_border;
        self.border_style = Some(ui.border_style.clone());
        self.border_sides = ui.border_sides.clone();
        self.content_align = ContentAlign::parse(&ui.content_align);
        self.missing_glyph = ui.missing_glyph.chars().next().unwrap_or('●');
        self.present_glyph = ui.present_glyph.chars().next().unwrap_or(' ');

        let colors = &config.colors;
        let defaults = ChartPalette::default();
        let pick = |hex: &str, fallback: Color| {
            Self::parse_color(hex).unwrap_or_else(|| {
                tracing::warn!("DentalChart: invalid color '{}', using default", hex);
                fallback
            })
        };
        self.palette = ChartPalette {
            missing: pick(&colors.missing, defaults.missing),
            present: pick(&colors.present, defaults.present),
            cursor: pick(&colors.cursor, defaults.cursor),
            border: Self::parse_color(&colors.border),
            label: pick(&colors.label, defaults.label),
            number: pick(&colors.number, defaults.number),
            count: pick(&colors.count, defaults.count),
            combinations: pick(&colors.combinations, defaults.combinations),
        };
        self.background_color = match colors.background.as_deref() {
            None | Some("-") => None, // "-" means explicitly transparent
            Some(hex) => Self::parse_color(hex),
        };
    }

    /// Update what is drawn; `summary` must be the one derived from `state`
    pub fn set_snapshot(
        &mut self,
        state: ToothState,
        summary: ChartSummary,
        cursor: Option<ToothPosition>,
    ) {
        self.state = state;
        self.summary = summary;
        self.cursor = cursor;
    }

    pub fn set_status(&mut self, status: &str) {
        self.status.clear();
        self.status.push_str(status);
    }

    fn parse_color(hex: &str) -> Option<Color> {
        if !hex.is_ascii() || !hex.starts_with('#') || hex.len() != 7 {
            return None;
        }

        let r = u8::from_str_radix(&hex[1..3], 16).ok()?;
        let g = u8::from_str_radix(&hex[3..5], 16).ok()?;
        let b = u8::from_str_radix(&hex[5..7], 16).ok()?;

        Some(Color::Rgb(r, g, b))
    }

    fn fill_background(area: Rect, buf: &mut Buffer, color: Color) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = area.x + col;
                let y = area.y + row;
                buf[(x, y)].set_char(' ');
                buf[(x, y)].set_bg(color);
            }
        }
    }

    /// Draw `text` at (x, y), clipped to `clip`
    fn put_str(buf: &mut Buffer, clip: Rect, x: u16, y: u16, text: &str, style: Style) {
        if y < clip.y || y >= clip.bottom() || x < clip.x || x >= clip.right() {
            return;
        }
        buf.set_stringn(x, y, text, (clip.right() - x) as usize, style);
    }

    /// Draw one centered line across `row` of the content box
    fn put_centered(buf: &mut Buffer, content: Rect, row: u16, line: Line<'_>) {
        if row >= content.height {
            return;
        }
        let rect = Rect::new(content.x, content.y + row, content.width, 1);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(rect, buf);
    }

    fn border_type(&self) -> BorderType {
        match self.border_style.as_deref() {
            Some("double") => BorderType::Double,
            Some("rounded") => BorderType::Rounded,
            Some("thick") => BorderType::Thick,
            _ => BorderType::Plain,
        }
    }

    /// Render the chart into `area` and return the clickable regions
    pub fn render(&self, area: Rect, buf: &mut Buffer) -> ChartLayout {
        let area = area.intersection(buf.area);
        let mut layout = ChartLayout::default();

        let inner_area = if self.show_border {
            let mut block = Block::default()
                .borders(crate::config::parse_border_sides(&self.border_sides))
                .border_type(self.border_type())
                .title(self.label.as_str());
            if let Some(color) = self.palette.border {
                block = block.border_style(Style::default().fg(color));
            }
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner_area.width == 0 || inner_area.height == 0 {
            return layout;
        }

        if let Some(bg) = self.background_color {
            Self::fill_background(inner_area, buf, bg);
        }

        let (row_offset, col_offset) = self.content_align.calculate_offset(
            CONTENT_WIDTH,
            CONTENT_HEIGHT,
            inner_area.width,
            inner_area.height,
        );
        let content = Rect::new(
            inner_area.x + col_offset,
            inner_area.y + row_offset,
            CONTENT_WIDTH.min(inner_area.width - col_offset),
            CONTENT_HEIGHT.min(inner_area.height - row_offset),
        );

        let label_style = Style::default().fg(self.palette.label);
        Self::put_centered(
            buf,
            content,
            ROW_INSTRUCTIONS_JA,
            Line::styled(locale::INSTRUCTIONS_JA, label_style),
        );
        Self::put_centered(
            buf,
            content,
            ROW_INSTRUCTIONS_EN,
            Line::styled(locale::INSTRUCTIONS_EN, label_style),
        );

        self.render_grid(content, buf, &mut layout);
        self.render_reset_button(content, buf, &mut layout);
        self.render_summary(content, buf);

        layout
    }

    fn render_grid(&self, content: Rect, buf: &mut Buffer, layout: &mut ChartLayout) {
        let grid_x = content.x + content.width.saturating_sub(GRID_WIDTH) / 2;
        let label_style = Style::default()
            .fg(self.palette.label)
            .add_modifier(Modifier::BOLD);
        let number_style = Style::default().fg(self.palette.number);

        for (jaw, label_row, number_row, teeth_row) in [
            (Jaw::Upper, ROW_UPPER_LABELS, ROW_UPPER_NUMBERS, ROW_UPPER_TEETH),
            (Jaw::Lower, ROW_LOWER_LABELS, ROW_LOWER_NUMBERS, ROW_LOWER_TEETH),
        ] {
            let (right_label, left_label) = match jaw {
                Jaw::Upper => ("Upper Right", "Upper Left"),
                Jaw::Lower => ("Lower Right", "Lower Left"),
            };
            let y = content.y + label_row;
            Self::put_str(buf, content, grid_x, y, right_label, label_style);
            let left_x = grid_x + GRID_WIDTH - left_label.len() as u16;
            Self::put_str(buf, content, left_x, y, left_label, label_style);

            for column in 0..TEETH_PER_ROW {
                let Some(position) = ToothPosition::from_display(jaw, column) else {
                    continue;
                };
                let x = grid_x + Self::cell_offset(column);

                let number = position.tooth_number().to_string();
                Self::put_str(buf, content, x + 1, content.y + number_row, &number, number_style);

                let cell = Rect::new(x, content.y + teeth_row, 3, 1);
                if self.render_tooth(cell, content, buf, position) {
                    layout.teeth.push((cell, position));
                }
            }

            let midline_style = Style::default().fg(self.palette.number);
            Self::put_str(buf, content, grid_x + MIDLINE_X, content.y + number_row, "│", midline_style);
            Self::put_str(buf, content, grid_x + MIDLINE_X, content.y + teeth_row, "│", midline_style);
        }

        let occlusal: String = (0..GRID_WIDTH)
            .map(|x| if x == MIDLINE_X { '┼' } else { '─' })
            .collect();
        Self::put_str(
            buf,
            content,
            grid_x,
            content.y + ROW_OCCLUSAL,
            &occlusal,
            Style::default().fg(self.palette.number),
        );
    }

    /// Left edge of a tooth cell relative to the grid
    fn cell_offset(column: usize) -> u16 {
        let base = column as u16 * CELL_WIDTH;
        if column >= TEETH_PER_QUADRANT {
            base + MIDLINE_GAP
        } else {
            base
        }
    }

    /// Draw a 3-wide tooth cell; returns false if it was clipped away
    fn render_tooth(&self, cell: Rect, clip: Rect, buf: &mut Buffer, position: ToothPosition) -> bool {
        if cell.y >= clip.bottom() || cell.right() > clip.right() {
            return false;
        }

        let missing = self.state.is_missing(position);
        let is_cursor = self.cursor == Some(position);

        let (open, close) = if is_cursor { ('[', ']') } else { ('(', ')') };
        let frame_style = if is_cursor {
            Style::default()
                .fg(self.palette.cursor)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.palette.present)
        };
        let (glyph, glyph_style) = if missing {
            (
                self.missing_glyph,
                Style::default().fg(self.palette.missing),
            )
        } else {
            (self.present_glyph, Style::default().fg(self.palette.present))
        };

        for (dx, ch, style) in [(0, open, frame_style), (1, glyph, glyph_style), (2, close, frame_style)] {
            let cell_buf = &mut buf[(cell.x + dx, cell.y)];
            cell_buf.set_char(ch);
            cell_buf.set_style(style);
            if let Some(bg) = self.background_color {
                cell_buf.set_bg(bg);
            }
        }

        true
    }

    fn render_reset_button(&self, content: Rect, buf: &mut Buffer, layout: &mut ChartLayout) {
        if ROW_RESET >= content.height {
            return;
        }

        let text = format!("[ {} ]", locale::RESET_LABEL);
        let width = Line::from(text.as_str()).width() as u16;
        if width > content.width {
            return;
        }

        let x = content.x + (content.width - width) / 2;
        let rect = Rect::new(x, content.y + ROW_RESET, width, 1);
        let style = Style::default()
            .fg(Color::White)
            .bg(self.palette.border.unwrap_or(Color::Blue))
            .add_modifier(Modifier::BOLD);
        Self::put_str(buf, content, rect.x, rect.y, &text, style);
        layout.reset_button = Some(rect);
    }

    fn render_summary(&self, content: Rect, buf: &mut Buffer) {
        let missing = self.summary.missing_count;
        let combinations = self.summary.combinations;

        Self::put_centered(
            buf,
            content,
            ROW_MISSING_COUNT,
            Line::styled(
                locale::missing_count_line(missing),
                Style::default()
                    .fg(self.palette.count)
                    .add_modifier(Modifier::BOLD),
            ),
        );
        Self::put_centered(
            buf,
            content,
            ROW_COMBINATIONS,
            Line::styled(
                locale::combinations_line(missing, combinations),
                Style::default()
                    .fg(self.palette.combinations)
                    .add_modifier(Modifier::BOLD),
            ),
        );

        let text_style = Style::default().fg(self.palette.label);
        Self::put_centered(
            buf,
            content,
            ROW_SENTENCE_JA,
            Line::styled(locale::pattern_sentence_ja(missing, DENTITION_SIZE), text_style),
        );
        let sentence_en = locale::pattern_sentence_en_lines(missing, DENTITION_SIZE, combinations);
        for (row, line) in (ROW_SENTENCE_EN..).zip(sentence_en) {
            Self::put_centered(buf, content, row, Line::styled(line, text_style));
        }

        if self.summary.exceeds_dentition() {
            Self::put_centered(
                buf,
                content,
                ROW_WARNING,
                Line::styled(
                    locale::over_dentition_warning(missing, DENTITION_SIZE),
                    Style::default().fg(self.palette.missing),
                ),
            );
        }

        if !self.status.is_empty() {
            Self::put_centered(
                buf,
                content,
                ROW_STATUS,
                Line::styled(
                    self.status.as_str(),
                    Style::default().fg(self.palette.number),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::teeth::Quadrant;
    use ratatui::{backend::TestBackend, Terminal};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn buffer_text(buf: &Buffer) -> String {
        (buf.area.y..buf.area.bottom())
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn chart_with(state: ToothState) -> DentalChart {
        let mut chart = DentalChart::new(locale::TITLE);
        chart.apply_config(&Config::default());
        chart.set_snapshot(state, ChartSummary::from_state(&state), None);
        chart
    }

    fn pos(quadrant: Quadrant, index: usize) -> ToothPosition {
        ToothPosition::new(quadrant, index).unwrap()
    }

    #[test]
    fn test_tooth_numbers_run_from_midline() {
        let chart = chart_with(ToothState::new());
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("8   7   6   5   4   3   2   1  │  1   2   3   4   5   6   7   8"));
        assert!(text.contains("Upper Right"));
        assert!(text.contains("Lower Left"));
    }

    #[test]
    fn test_missing_teeth_are_drawn_and_counted() {
        let state = ToothState::new()
            .toggled(pos(Quadrant::UpperRight, 0))
            .toggled(pos(Quadrant::UpperLeft, 2))
            .toggled(pos(Quadrant::LowerRight, 5));
        let chart = chart_with(state);
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        let layout = chart.render(area, &mut buf);

        let cell = layout.tooth_rect(pos(Quadrant::UpperRight, 0)).unwrap();
        assert_eq!(buf[(cell.x + 1, cell.y)].symbol(), "●");
        let cell = layout.tooth_rect(pos(Quadrant::UpperLeft, 0)).unwrap();
        assert_eq!(buf[(cell.x + 1, cell.y)].symbol(), " ");

        let text = buffer_text(&buf);
        assert!(text.contains("The selected pattern is one of 3,276 possible combinations"));
        assert!(text.contains("for 3 missing teeth out of 28."));
    }

    #[test]
    fn test_hit_testing_maps_cells_and_button() {
        let chart = chart_with(ToothState::new());
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        let layout = chart.render(area, &mut buf);

        for position in ToothPosition::all() {
            let cell = layout.tooth_rect(position).unwrap();
            assert_eq!(
                layout.target_at(cell.x + 2, cell.y),
                Some(ChartTarget::Tooth(position))
            );
        }

        let button = layout.reset_button().unwrap();
        assert_eq!(
            layout.target_at(button.x, button.y),
            Some(ChartTarget::ResetButton)
        );
        assert_eq!(layout.target_at(0, 0), None);
    }

    #[test]
    fn test_cursor_cell_uses_brackets() {
        let state = ToothState::new();
        let mut chart = chart_with(state);
        let cursor = pos(Quadrant::LowerLeft, 3);
        chart.set_snapshot(state, ChartSummary::from_state(&state), Some(cursor));

        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        let layout = chart.render(area, &mut buf);

        let cell = layout.tooth_rect(cursor).unwrap();
        assert_eq!(buf[(cell.x, cell.y)].symbol(), "[");
        assert_eq!(buf[(cell.x + 2, cell.y)].symbol(), "]");
    }

    #[test]
    fn test_over_dentition_warning() {
        let state = ToothPosition::all().fold(ToothState::new(), |s, p| s.toggled(p));
        let chart = chart_with(state);
        let area = Rect::new(0, 0, 100, 24);
        let mut buf = Buffer::empty(area);
        chart.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("32 marked exceeds the 28-tooth dentition"));
        assert!(text.contains("one of 0 possible combinations"));
        assert!(text.contains("for 32 missing teeth out of 28."));
    }

    #[test]
    fn test_small_area_clips_without_panicking() {
        let chart = chart_with(ToothState::new().toggled(pos(Quadrant::LowerLeft, 7)));
        for (w, h) in [(0, 0), (1, 1), (10, 3), (40, 8), (70, 12)] {
            let area = Rect::new(0, 0, w, h);
            let mut buf = Buffer::empty(area);
            let layout = chart.render(area, &mut buf);
            if w < 40 {
                assert!(layout.tooth_rect(pos(Quadrant::LowerLeft, 7)).is_none());
            }
        }
    }

    #[test]
    fn test_renders_through_terminal_backend() {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        let chart = chart_with(ToothState::new().toggled(pos(Quadrant::UpperLeft, 7)));

        let mut layout = ChartLayout::default();
        terminal
            .draw(|f| {
                layout = chart.render(f.area(), f.buffer_mut());
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("for 1 missing teeth out of 28."));
        assert_eq!(
            layout.target_at(
                layout.tooth_rect(pos(Quadrant::UpperLeft, 7)).unwrap().x,
                layout.tooth_rect(pos(Quadrant::UpperLeft, 7)).unwrap().y
            ),
            Some(ChartTarget::Tooth(pos(Quadrant::UpperLeft, 7)))
        );
    }

    #[test]
    fn test_full_summary_fits_80_by_24_terminal() {
        // C(28, 14) is the widest combination count
        let state = ToothPosition::all()
            .take(14)
            .fold(ToothState::new(), |s, p| s.toggled(p));
        let mut chart = chart_with(state);
        chart.set_status("UR8 (18) marked missing");

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut layout = ChartLayout::default();
        terminal
            .draw(|f| {
                layout = chart.render(f.area(), f.buffer_mut());
            })
            .unwrap();

        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("The selected pattern is one of 40,116,600 possible combinations"));
        assert!(text.contains("for 14 missing teeth out of 28."));
        assert!(text.contains("UR8 (18) marked missing"));
        assert!(layout.reset_button().is_some());
        assert!(layout.tooth_rect(pos(Quadrant::LowerLeft, 7)).is_some());
    }

    #[test]
    fn test_parse_color() {
        assert_eq!(DentalChart::parse_color("#ff0080"), Some(Color::Rgb(255, 0, 128)));
        assert_eq!(DentalChart::parse_color("ff0080"), None);
        assert_eq!(DentalChart::parse_color("#zz0000"), None);
        assert_eq!(DentalChart::parse_color("#aé000"), None);
    }
}
