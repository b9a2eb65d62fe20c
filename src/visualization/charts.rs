//! SVG bar charts for keyword frequencies and part-of-speech counts

use crate::error::{NlpLensError, Result};
use crate::processing::entities::html_escape;
use log::warn;
use serde::{Deserialize, Serialize};

pub const INSUFFICIENT_DATA: &str = "Insufficient data";

/// Matplotlib's default bar colour
const DEFAULT_BAR_COLOR: &str = "#1f77b4";

/// Categorical palette used when every bar gets its own colour
const PALETTE: &[&str] = &[
    "#4c72b0", "#dd8452", "#55a868", "#c44e52", "#8172b3", "#937860", "#da8bc3", "#8c8c8c",
    "#ccb974", "#64b5cd",
];

/// A chart that rendered, or the reason it did not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChartPanel {
    Rendered(String),
    Unavailable(String),
}

impl ChartPanel {
    /// Any rendering failure becomes the same "Insufficient data" notice
    pub fn from_result(name: &str, result: Result<String>) -> Self {
        match result {
            Ok(svg) => ChartPanel::Rendered(svg),
            Err(e) => {
                warn!("{} unavailable: {}", name, e);
                ChartPanel::Unavailable(INSUFFICIENT_DATA.to_string())
            }
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self, ChartPanel::Rendered(_))
    }

    pub fn svg(&self) -> Option<&str> {
        match self {
            ChartPanel::Rendered(svg) => Some(svg),
            ChartPanel::Unavailable(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BarChart {
    title: String,
    y_label: String,
    bars: Vec<(String, usize)>,
    rotate_labels: bool,
    multicolor: bool,
    width: u32,
    height: u32,
}

impl BarChart {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            y_label: "count".to_string(),
            bars: Vec::new(),
            rotate_labels: false,
            multicolor: false,
            width: 640,
            height: 420,
        }
    }

    pub fn bars<I, S>(mut self, bars: I) -> Self
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        self.bars = bars.into_iter().map(|(label, value)| (label.into(), value)).collect();
        self
    }

    /// Tilt x-axis labels by 45 degrees
    pub fn rotate_labels(mut self, rotate: bool) -> Self {
        self.rotate_labels = rotate;
        self
    }

    pub fn multicolor(mut self, multicolor: bool) -> Self {
        self.multicolor = multicolor;
        self
    }

    pub fn render_svg(&self) -> Result<String> {
        let max_value = self.bars.iter().map(|(_, v)| *v).max().unwrap_or(0);
        if self.bars.is_empty() || max_value == 0 {
            return Err(NlpLensError::Rendering(format!(
                "'{}' has no data to plot",
                self.title
            )));
        }

        let (width, height) = (self.width as f64, self.height as f64);
        let margin_left = 56.0;
        let margin_right = 16.0;
        let margin_top = 36.0;
        let margin_bottom = if self.rotate_labels { 96.0 } else { 48.0 };
        let plot_width = width - margin_left - margin_right;
        let plot_height = height - margin_top - margin_bottom;
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(NlpLensError::Rendering(format!(
                "Canvas {}x{} is too small",
                self.width, self.height
            )));
        }

        let step = tick_step(max_value);
        let y_max = (max_value.div_ceil(step) * step) as f64;
        let slot = plot_width / self.bars.len() as f64;
        let bar_width = slot * 0.8;
        let baseline = margin_top + plot_height;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = self.width,
            h = self.height
        );
        svg.push_str(r#"<rect width="100%" height="100%" fill="white"/>"#);
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="22" text-anchor="middle" font-size="14">{}</text>"#,
            width / 2.0,
            html_escape(&self.title)
        ));

        let mut tick = 0;
        while tick as f64 <= y_max {
            let y = baseline - tick as f64 / y_max * plot_height;
            svg.push_str(&format!(
                r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#e0e0e0"/><text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"##,
                margin_left,
                margin_left + plot_width,
                margin_left - 6.0,
                y + 4.0,
                tick,
                y = y
            ));
            tick += step;
        }

        for (i, (label, value)) in self.bars.iter().enumerate() {
            let bar_height = *value as f64 / y_max * plot_height;
            let x = margin_left + i as f64 * slot + (slot - bar_width) / 2.0;
            let color = if self.multicolor {
                PALETTE[i % PALETTE.len()]
            } else {
                DEFAULT_BAR_COLOR
            };
            svg.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
                x,
                baseline - bar_height,
                bar_width,
                bar_height,
                color,
                html_escape(label),
                value
            ));

            let label_x = x + bar_width / 2.0;
            let label_y = baseline + 16.0;
            if self.rotate_labels {
                svg.push_str(&format!(
                    r#"<text x="{lx:.1}" y="{ly:.1}" text-anchor="end" transform="rotate(-45 {lx:.1} {ly:.1})">{}</text>"#,
                    html_escape(label),
                    lx = label_x,
                    ly = label_y
                ));
            } else {
                svg.push_str(&format!(
                    r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
                    label_x,
                    label_y,
                    html_escape(label)
                ));
            }
        }

        svg.push_str(&format!(
            r#"<line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="black"/><line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="black"/>"#,
            l = margin_left,
            r = margin_left + plot_width,
            t = margin_top,
            b = baseline
        ));
        svg.push_str(&format!(
            r#"<text x="14" y="{:.1}" text-anchor="middle" transform="rotate(-90 14 {:.1})">{}</text>"#,
            margin_top + plot_height / 2.0,
            margin_top + plot_height / 2.0,
            html_escape(&self.y_label)
        ));
        svg.push_str("</svg>");
        Ok(svg)
    }
}

/// Integer tick spacing giving at most about six gridlines
fn tick_step(max_value: usize) -> usize {
    let rough = max_value.div_ceil(6).max(1);
    let magnitude = 10usize.pow((rough as f64).log10().floor() as u32);
    [1, 2, 5, 10]
        .iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= rough)
        .unwrap_or(rough)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_bars() {
        let svg = BarChart::new("Top words")
            .bars(vec![("data", 4), ("model", 2), ("<tag>", 1)])
            .render_svg()
            .unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect x=").count(), 3);
        assert!(svg.contains("&lt;tag&gt;"));
    }

    #[test]
    fn test_rotated_labels() {
        let svg = BarChart::new("PoS")
            .bars(vec![("NOUN", 3), ("VERB", 1)])
            .rotate_labels(true)
            .multicolor(true)
            .render_svg()
            .unwrap();
        assert!(svg.contains("rotate(-45"));
        assert!(svg.contains(PALETTE[1]));
    }

    #[test]
    fn test_empty_chart_is_unavailable() {
        let result = BarChart::new("empty").bars(Vec::<(String, usize)>::new()).render_svg();
        assert!(result.is_err());
        let panel = ChartPanel::from_result("empty", result);
        assert_eq!(panel, ChartPanel::Unavailable(INSUFFICIENT_DATA.to_string()));
        assert!(panel.svg().is_none());
    }

    #[test]
    fn test_tick_step() {
        assert_eq!(tick_step(1), 1);
        assert_eq!(tick_step(6), 1);
        assert_eq!(tick_step(7), 2);
        assert_eq!(tick_step(40), 10);
        assert_eq!(tick_step(250), 50);
    }
}
