use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use engine::{Period, Summary};
use svg::{
    Document,
    node::{
        self,
        element::{Line, Rectangle, Text},
    },
};

use crate::error::Result;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 500.0;
const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 120.0;
const BAR_FILL: f64 = 0.8;
const HEADROOM: f64 = 0.1;
const TICKS: usize = 4;
const STROKE_WIDTH: f64 = 1.0;
const BAR_COLOR: &str = "skyblue";

/// Name of the chart file for `period`.
pub fn file_name(period: Period) -> String {
    format!("expenses_{period}.svg")
}

/// Draw the per-category totals of `summary` into `dir`.
///
/// Returns the path of the written file, or `None` when there is nothing
/// to draw, in which case no file is touched.
pub fn plot(summary: &Summary, dir: &Path) -> Result<Option<PathBuf>> {
    if summary.is_empty() {
        tracing::warn!("no {} expenses to plot", summary.period);
        return Ok(None);
    }

    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(summary.period));
    BarChart::from(summary).save(&path)?;
    tracing::info!("chart written to {}", path.display());
    Ok(Some(path))
}

/// One bar per category, heights in the same unit as the amounts.
pub struct BarChart<'d> {
    title: String,
    bars: &'d BTreeMap<String, f64>,
}

impl<'d> BarChart<'d> {
    pub fn from(summary: &'d Summary) -> Self {
        Self {
            title: format!("Expenses by Category ({})", summary.period),
            bars: &summary.by_category,
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        svg::save(path, &self.render())
    }

    fn scale(&self) -> Scale {
        let (low, high) = self
            .bars
            .values()
            .fold((0.0_f64, 0.0_f64), |(low, high), v| (low.min(*v), high.max(*v)));
        let span = if high > low { high - low } else { 1.0 };
        Scale {
            low: if low < 0.0 { low - span * HEADROOM } else { 0.0 },
            high: high + span * HEADROOM,
        }
    }

    fn render(&self) -> Document {
        let scale = self.scale();
        let plot_width = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_bottom = HEIGHT - MARGIN_BOTTOM;
        let slot = plot_width / self.bars.len() as f64;
        let bar_width = slot * BAR_FILL;
        let zero = scale.y(0.0);

        let mut document = Document::new()
            .set("width", WIDTH)
            .set("height", HEIGHT)
            .set("viewBox", (0.0, 0.0, WIDTH, HEIGHT))
            .set("font-family", "sans-serif")
            .add(label(WIDTH / 2.0, 30.0, &self.title).set("font-size", 18.0))
            .add(label(MARGIN_LEFT + plot_width / 2.0, HEIGHT - 10.0, "Category"))
            .add(
                label(20.0, MARGIN_TOP + (plot_bottom - MARGIN_TOP) / 2.0, "Amount").set(
                    "transform",
                    format!(
                        "rotate(-90 20 {})",
                        MARGIN_TOP + (plot_bottom - MARGIN_TOP) / 2.0
                    ),
                ),
            );

        for k in 0..=TICKS {
            let value = scale.low + (scale.high - scale.low) * k as f64 / TICKS as f64;
            let y = scale.y(value);
            document = document
                .add(axis(MARGIN_LEFT - 5.0, y, MARGIN_LEFT, y))
                .add(
                    label(MARGIN_LEFT - 8.0, y + 4.0, &format!("{value:.2}"))
                        .set("text-anchor", "end")
                        .set("font-size", 11.0),
                );
        }

        for (i, (category, value)) in self.bars.iter().enumerate() {
            let x = MARGIN_LEFT + slot * i as f64 + (slot - bar_width) / 2.0;
            let center = x + bar_width / 2.0;
            let top = scale.y(*value);
            let bar = Rectangle::new()
                .set("x", x)
                .set("y", top.min(zero))
                .set("width", bar_width)
                .set("height", (top - zero).abs())
                .set("fill", BAR_COLOR);
            // annotation sits outside the bar, above it for positive amounts
            let annotation_y = if *value < 0.0 { top + 15.0 } else { top - 5.0 };
            let tick_y = plot_bottom + 15.0;
            document = document
                .add(bar)
                .add(label(center, annotation_y, &format!("{value:.2}")).set("font-size", 12.0))
                .add(
                    label(center, tick_y, category)
                        .set("text-anchor", "end")
                        .set("font-size", 12.0)
                        .set("transform", format!("rotate(-45 {center} {tick_y})")),
                );
        }

        document
            .add(axis(MARGIN_LEFT, MARGIN_TOP, MARGIN_LEFT, plot_bottom))
            .add(axis(MARGIN_LEFT, zero, WIDTH - MARGIN_RIGHT, zero))
    }
}

/// Vertical mapping from amounts to image coordinates.
struct Scale {
    low: f64,
    high: f64,
}

impl Scale {
    fn y(&self, value: f64) -> f64 {
        let plot_height = HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
        MARGIN_TOP + (self.high - value) / (self.high - self.low) * plot_height
    }
}

fn label(x: f64, y: f64, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("text-anchor", "middle")
        .add(node::Text::new(escape(content)))
}

fn axis(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH)
}

/// Text nodes are written verbatim, categories are free-form.
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use engine::Expense;

    use super::*;

    fn summary(period: Period, bars: &[(&str, f64)]) -> Summary {
        let on = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let mut summary = Summary::empty(period);
        for (category, amount) in bars {
            summary += &Expense::new(*amount, *category, on);
        }
        summary
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("expenses_charts_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn file_name_follows_period() {
        assert_eq!(file_name(Period::Monthly), "expenses_monthly.svg");
        assert_eq!(file_name(Period::All), "expenses_all.svg");
    }

    #[test]
    fn empty_summary_writes_nothing() {
        let dir = temp_dir();
        let written = plot(&Summary::empty(Period::Weekly), &dir).unwrap();
        assert_eq!(written, None);
        assert!(!dir.exists());
    }

    #[test]
    fn plot_writes_named_svg() {
        let dir = temp_dir();
        let written = plot(&summary(Period::Daily, &[("food", 12.0), ("bus", 3.5)]), &dir)
            .unwrap()
            .unwrap();
        assert_eq!(written, dir.join("expenses_daily.svg"));

        let contents = std::fs::read_to_string(&written).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("Expenses by Category (daily)"));
        std::fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn one_annotated_bar_per_category() {
        let data = summary(
            Period::All,
            &[("groceries", 12.0), ("transport", 3.0), ("coffee", 0.126)],
        );
        let rendered = BarChart::from(&data).render().to_string();

        assert_eq!(rendered.matches("<rect").count(), 3);
        for text in ["12.00", "3.00", "0.13", "groceries", "transport", "coffee", "Amount"] {
            assert!(rendered.contains(text), "missing {text}");
        }
    }

    #[test]
    fn tallest_bar_reaches_below_the_top_margin() {
        let data = summary(Period::All, &[("a", 10.0), ("b", 5.0)]);
        let chart = BarChart::from(&data);
        let scale = chart.scale();
        assert_eq!(scale.low, 0.0);
        assert!(scale.y(10.0) > MARGIN_TOP);
        assert_eq!(scale.y(0.0), HEIGHT - MARGIN_BOTTOM);
        assert!(scale.y(5.0) > scale.y(10.0));
    }

    #[test]
    fn negative_amounts_extend_below_zero() {
        let data = summary(Period::All, &[("refund", -4.0), ("food", 8.0)]);
        let scale = BarChart::from(&data).scale();
        assert!(scale.low < -4.0);
        assert!(scale.y(-4.0) > scale.y(0.0));
        assert!(scale.y(-4.0) <= HEIGHT - MARGIN_BOTTOM);
    }

    #[test]
    fn all_zero_amounts_still_render() {
        let data = summary(Period::All, &[("free", 0.0)]);
        let rendered = BarChart::from(&data).render().to_string();
        assert!(rendered.contains("0.00"));
        assert!(!rendered.contains("NaN"));
    }

    #[test]
    fn category_text_is_escaped() {
        assert_eq!(escape("R&D <lab>"), "R&amp;D &lt;lab&gt;");
        let data = summary(Period::All, &[("R&D", 1.0)]);
        let rendered = BarChart::from(&data).render().to_string();
        assert!(rendered.contains("R&amp;D"));
        assert!(!rendered.contains("R&D"));
    }
}
