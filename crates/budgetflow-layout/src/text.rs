use budgetflow_core::wrap::display_width;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_size: f64,
    /// Average advance of one display column, in px.
    pub char_width_px: f64,
    pub line_height_px: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 11.0,
            char_width_px: 6.5,
            line_height_px: 13.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

/// Measures label text. Hosts with real font metrics plug their own implementation in through
/// [`crate::LayoutOptions`].
pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;

    fn measure_lines(&self, lines: &[String], style: &TextStyle) -> TextMetrics {
        let joined = lines.join("\n");
        self.measure(&joined, style)
    }
}

/// Column-count measurer: every display column advances `style.char_width_px`.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer;

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let lines: Vec<&str> = text.split('\n').collect();
        let max_cols = lines.iter().map(|l| display_width(l)).max().unwrap_or(0);
        TextMetrics {
            width: max_cols as f64 * style.char_width_px.max(0.0),
            height: lines.len() as f64 * style.line_height_px.max(0.0),
            line_count: lines.len(),
        }
    }
}
