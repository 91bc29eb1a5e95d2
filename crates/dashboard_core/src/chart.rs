//! Summary chart: distribution of `rating` per `category`.
//!
//! The chart is rebuilt from the snapshot on every render. Records whose
//! category is [`UNCATEGORIZED`](crate::UNCATEGORIZED) never reach the plot,
//! and records without a numeric rating are skipped.

use crate::record::{Column, Record};

/// Five-number summary of one category, with Tukey whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBox {
    pub category: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Smallest value within 1.5 IQR below `q1`.
    pub lower_whisker: f64,
    /// Largest value within 1.5 IQR above `q3`.
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlot {
    pub value_column: Column,
    pub group_column: Column,
    /// Groups in order of first appearance in the snapshot.
    pub groups: Vec<CategoryBox>,
}

impl BoxPlot {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Overall (min, max) across groups, `None` when there is nothing to plot.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let min = self.groups.iter().map(|g| g.min).reduce(f64::min)?;
        let max = self.groups.iter().map(|g| g.max).reduce(f64::max)?;
        Some((min, max))
    }
}

/// Records eligible for the chart: everything except "uncategorized".
pub fn chart_input(rows: &[Record]) -> Vec<&Record> {
    rows.iter().filter(|r| !r.is_uncategorized()).collect()
}

pub fn build_box_plot(rows: &[Record]) -> BoxPlot {
    let mut grouped: Vec<(String, Vec<f64>)> = Vec::new();
    for record in chart_input(rows) {
        let Some(rating) = record.rating() else {
            continue;
        };
        let category = record.display(Column::Category);
        match grouped.iter_mut().find(|(name, _)| *name == category) {
            Some((_, values)) => values.push(rating),
            None => grouped.push((category, vec![rating])),
        }
    }

    BoxPlot {
        value_column: Column::Rating,
        group_column: Column::Category,
        groups: grouped
            .into_iter()
            .map(|(category, values)| summarize(category, values))
            .collect(),
    }
}

fn summarize(category: String, mut values: Vec<f64>) -> CategoryBox {
    values.sort_by(f64::total_cmp);
    let q1 = quantile(&values, 0.25);
    let median = quantile(&values, 0.5);
    let q3 = quantile(&values, 0.75);
    let fence = 1.5 * (q3 - q1);
    let (low_fence, high_fence) = (q1 - fence, q3 + fence);

    let (inside, outliers): (Vec<f64>, Vec<f64>) = values
        .iter()
        .copied()
        .partition(|v| *v >= low_fence && *v <= high_fence);
    // `values` is sorted, so the partitions are too.
    let lower_whisker = inside.first().copied().unwrap_or(q1);
    let upper_whisker = inside.last().copied().unwrap_or(q3);

    CategoryBox {
        category,
        count: values.len(),
        min: values[0],
        q1,
        median,
        q3,
        max: values[values.len() - 1],
        lower_whisker,
        upper_whisker,
        outliers,
    }
}

/// Linear interpolation between closest ranks. `sorted` must be non-empty.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let position = p * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}
