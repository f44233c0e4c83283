use crate::model::{LabelAnchor, LabelLayout};
use crate::text::{TextMeasurer, TextStyle};
use budgetflow_core::LayoutConfig;
use budgetflow_core::wrap::wrap_label;

/// `symbol` followed by `value` with at most two decimals, trailing zeros trimmed.
pub fn format_amount(symbol: &str, value: f64) -> String {
    if !value.is_finite() {
        return format!("{symbol}0");
    }
    let rounded = (value * 100.0).round() / 100.0;
    let mut s = format!("{rounded:.2}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    format!("{symbol}{s}")
}

/// `value` as a percentage of `total`, rounded to one decimal.
pub fn percent_of(value: f64, total: f64) -> f64 {
    if !(total > 0.0) {
        return 0.0;
    }
    (value / total * 1000.0).round() / 10.0
}

pub(crate) struct Captions<'a> {
    pub cfg: &'a LayoutConfig,
    pub measurer: &'a dyn TextMeasurer,
    pub style: TextStyle,
}

impl<'a> Captions<'a> {
    pub fn new(cfg: &'a LayoutConfig, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            cfg,
            measurer,
            style: TextStyle {
                font_size: cfg.label_line_height / 1.2,
                char_width_px: cfg.avg_char_pixel_width,
                line_height_px: cfg.label_line_height,
            },
        }
    }

    pub fn wrap(&self, name: &str) -> Vec<String> {
        wrap_label(name, self.cfg.label_max_chars)
    }

    /// Horizontal room reserved beside a column: wide enough for its longest wrapped label.
    pub fn side_margin(&self, labels: &[Vec<String>]) -> f64 {
        let widest = labels
            .iter()
            .map(|lines| self.measurer.measure_lines(lines, &self.style).width)
            .fold(0.0_f64, f64::max);
        self.cfg
            .min_side_margin
            .max(widest + self.cfg.amount_label_padding)
    }

    pub fn caption(
        &self,
        lines: Vec<String>,
        value: f64,
        percent_of_income: Option<f64>,
        anchor: LabelAnchor,
        x: f64,
        y: f64,
    ) -> LabelLayout {
        let amount = format_amount(&self.cfg.currency_symbol, value);
        let mut block = lines.clone();
        block.push(amount.clone());
        let metrics = self.measurer.measure_lines(&block, &self.style);
        LabelLayout {
            lines,
            amount,
            percent_of_income,
            anchor,
            x,
            y,
            width: metrics.width,
            height: metrics.height,
        }
    }

    pub fn block_height(&self, lines: &[String]) -> f64 {
        (lines.len() + 1) as f64 * self.cfg.label_line_height
    }
}
