//! Inline SVG rendering of the rating box plot.
//!
//! Categories run down the vertical axis, ratings along the horizontal one.

use dashboard_core::{BoxPlot, CategoryBox};

use super::escape;

const WIDTH: f64 = 720.0;
const MARGIN_LEFT: f64 = 140.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 48.0;
const ROW_HEIGHT: f64 = 36.0;
const BOX_HEIGHT: f64 = 20.0;
const TICKS: usize = 5;

pub const EMPTY_CHART_TEXT: &str = "No categorized ratings to plot";

pub fn render_box_plot(plot: &BoxPlot) -> String {
    let Some((low, high)) = plot.value_range() else {
        return format!(
            "<svg class=\"box-plot\" width=\"{WIDTH}\" height=\"40\" role=\"img\">\
             <text x=\"{MARGIN_LEFT}\" y=\"24\">{EMPTY_CHART_TEXT}</text></svg>\n"
        );
    };
    let scale = Scale::new(low, high);
    let plot_bottom = MARGIN_TOP + ROW_HEIGHT * plot.groups.len() as f64;
    let height = plot_bottom + MARGIN_BOTTOM;

    let mut svg = format!(
        "<svg class=\"box-plot\" width=\"{WIDTH}\" height=\"{height:.0}\" role=\"img\">\n"
    );
    svg.push_str(&axes(&scale, plot_bottom, plot));
    for (slot, group) in plot.groups.iter().enumerate() {
        let centre = MARGIN_TOP + ROW_HEIGHT * (slot as f64 + 0.5);
        svg.push_str(&category_row(&scale, centre, group));
    }
    svg.push_str("</svg>\n");
    svg
}

/// Linear map from rating values onto the horizontal pixel range.
struct Scale {
    low: f64,
    high: f64,
}

impl Scale {
    fn new(low: f64, high: f64) -> Self {
        if high > low {
            Self { low, high }
        } else {
            Self {
                low: low - 1.0,
                high: high + 1.0,
            }
        }
    }

    fn x(&self, value: f64) -> f64 {
        let span = WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
        MARGIN_LEFT + (value - self.low) / (self.high - self.low) * span
    }

    fn ticks(&self) -> impl Iterator<Item = f64> + '_ {
        let step = (self.high - self.low) / (TICKS - 1) as f64;
        (0..TICKS).map(move |i| self.low + step * i as f64)
    }
}

fn axes(scale: &Scale, plot_bottom: f64, plot: &BoxPlot) -> String {
    let mut out = format!(
        "<line x1=\"{MARGIN_LEFT}\" y1=\"{plot_bottom:.1}\" x2=\"{:.1}\" y2=\"{plot_bottom:.1}\" stroke=\"#333\"/>\n",
        WIDTH - MARGIN_RIGHT
    );
    for tick in scale.ticks() {
        let x = scale.x(tick);
        out.push_str(&format!(
            "<line x1=\"{x:.1}\" y1=\"{plot_bottom:.1}\" x2=\"{x:.1}\" y2=\"{:.1}\" stroke=\"#333\"/>\
             <text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
            plot_bottom + 4.0,
            plot_bottom + 18.0,
            format_value(tick)
        ));
    }
    out.push_str(&format!(
        "<text class=\"axis-label\" x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
        MARGIN_LEFT + (WIDTH - MARGIN_LEFT - MARGIN_RIGHT) / 2.0,
        plot_bottom + 40.0,
        plot.value_column
    ));
    out.push_str(&format!(
        "<text class=\"axis-label\" x=\"12\" y=\"{:.1}\" transform=\"rotate(-90 12 {:.1})\" text-anchor=\"middle\">{}</text>\n",
        plot_bottom / 2.0,
        plot_bottom / 2.0,
        plot.group_column
    ));
    out
}

fn category_row(scale: &Scale, centre: f64, group: &CategoryBox) -> String {
    let top = centre - BOX_HEIGHT / 2.0;
    let bottom = centre + BOX_HEIGHT / 2.0;
    let (q1, median, q3) = (scale.x(group.q1), scale.x(group.median), scale.x(group.q3));
    let (lo, hi) = (scale.x(group.lower_whisker), scale.x(group.upper_whisker));

    let mut out = format!(
        "<g class=\"category\"><title>{} (n={}): median {}</title>\n",
        escape(&group.category),
        group.count,
        format_value(group.median)
    );
    out.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>\n",
        MARGIN_LEFT - 8.0,
        centre + 4.0,
        escape(&group.category)
    ));
    out.push_str(&format!(
        "<line class=\"whisker\" x1=\"{lo:.1}\" y1=\"{centre:.1}\" x2=\"{q1:.1}\" y2=\"{centre:.1}\" stroke=\"#333\"/>\
         <line class=\"whisker\" x1=\"{q3:.1}\" y1=\"{centre:.1}\" x2=\"{hi:.1}\" y2=\"{centre:.1}\" stroke=\"#333\"/>\n"
    ));
    for cap in [lo, hi] {
        out.push_str(&format!(
            "<line x1=\"{cap:.1}\" y1=\"{:.1}\" x2=\"{cap:.1}\" y2=\"{:.1}\" stroke=\"#333\"/>\n",
            top + 4.0,
            bottom - 4.0
        ));
    }
    out.push_str(&format!(
        "<rect class=\"box\" x=\"{q1:.1}\" y=\"{top:.1}\" width=\"{:.1}\" height=\"{BOX_HEIGHT}\" fill=\"#9ecae1\" stroke=\"#333\"/>\n",
        (q3 - q1).max(1.0)
    ));
    out.push_str(&format!(
        "<line class=\"median\" x1=\"{median:.1}\" y1=\"{top:.1}\" x2=\"{median:.1}\" y2=\"{bottom:.1}\" stroke=\"#08306b\" stroke-width=\"2\"/>\n"
    ));
    for outlier in &group.outliers {
        out.push_str(&format!(
            "<circle class=\"outlier\" cx=\"{:.1}\" cy=\"{centre:.1}\" r=\"3\" fill=\"none\" stroke=\"#a30000\"/>\n",
            scale.x(*outlier)
        ));
    }
    out.push_str("</g>\n");
    out
}

/// Whole numbers without a trailing `.0`, everything else to two places.
fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        let text = format!("{value:.2}");
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
