use anyhow::{Context, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::TextStyle;
use std::f64::consts::PI;

use crate::aggregate::{BandCount, CityCount};
use crate::palette::{self, accent_mask};

/// One quadrant of the dashboard bitmap.
pub type Region<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// How many entries the bar charts show.
const TOP_N: usize = 10;

/// Width of a bar relative to its category slot.
const BAR_WIDTH: f64 = 0.8;

fn top_slice<T>(items: &[T]) -> &[T] {
    &items[..items.len().min(TOP_N)]
}

/// Upper bound of a bar chart's value axis, padded so the tallest bar does
/// not touch the frame. Degenerate (all-zero or empty) input gets a unit
/// range so the chart still builds.
fn value_range(max: f64) -> std::ops::Range<f64> {
    if max > 0.0 {
        0.0..max * 1.05
    } else {
        0.0..1.0
    }
}

/// Vertical bars of the top seller cities, shaded dark to light by rank.
pub fn draw_city_bars(region: &Region<'_>, cities: &[CityCount]) -> Result<()> {
    let top = top_slice(cities);
    let labels: Vec<String> = top.iter().map(|c| c.city.clone()).collect();
    let max = top.iter().map(|c| c.count).max().unwrap_or(0) as f64;

    let mut chart = ChartBuilder::on(region)
        .margin(10)
        .caption("Top 10 Cities by Total Sellers", ("sans-serif", 20))
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..top.len().max(1) as f64, value_range(max))
        .context("Failed to build city chart")?;

    chart
        .configure_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| {
            let idx = *x as usize;
            if idx < labels.len() {
                labels[idx].clone()
            } else {
                String::new()
            }
        })
        .x_desc("City")
        .y_desc("Total Sellers")
        .draw()
        .context("Failed to draw city mesh")?;

    let colors = palette::BLUES.steps(top.len());
    for (idx, city) in top.iter().enumerate() {
        let x_center = idx as f64 + 0.5;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (x_center - BAR_WIDTH / 2.0, 0.0),
                    (x_center + BAR_WIDTH / 2.0, city.count as f64),
                ],
                colors[idx].filled(),
            )))
            .context("Failed to draw city bar")?;
    }

    Ok(())
}

/// Vertical bars of the top product categories; every bar tied for the
/// maximum count is drawn in the accent color.
pub fn draw_category_bars(region: &Region<'_>, categories: &[(String, u64)]) -> Result<()> {
    let top = top_slice(categories);
    let labels: Vec<String> = top.iter().map(|(name, _)| name.clone()).collect();
    let values: Vec<f64> = top.iter().map(|(_, count)| *count as f64).collect();
    let accents = accent_mask(&values);
    let max = values.iter().cloned().fold(0.0, f64::max);

    let mut chart = ChartBuilder::on(region)
        .margin(10)
        .caption("Top 10 Product Category Distribution", ("sans-serif", 20))
        .x_label_area_size(60)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..top.len().max(1) as f64, value_range(max))
        .context("Failed to build category chart")?;

    chart
        .configure_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|x| {
            let idx = *x as usize;
            if idx < labels.len() {
                labels[idx].clone()
            } else {
                String::new()
            }
        })
        .x_desc("Product Category")
        .y_desc("Number of Products")
        .draw()
        .context("Failed to draw category mesh")?;

    for (idx, &value) in values.iter().enumerate() {
        let color = if accents[idx] {
            palette::CATEGORY_ACCENT
        } else {
            palette::CATEGORY_BASE
        };
        let x_center = idx as f64 + 0.5;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (x_center - BAR_WIDTH / 2.0, 0.0),
                    (x_center + BAR_WIDTH / 2.0, value),
                ],
                color.filled(),
            )))
            .context("Failed to draw category bar")?;
    }

    Ok(())
}

/// Horizontal bars of payment totals per type. Input is sorted descending and
/// the axis is inverted, so the largest total sits at the top; tied maxima
/// share the accent color.
pub fn draw_payment_bars(region: &Region<'_>, totals: &[(String, f64)]) -> Result<()> {
    let labels: Vec<String> = totals.iter().map(|(name, _)| name.clone()).collect();
    let values: Vec<f64> = totals.iter().map(|(_, total)| *total).collect();
    let accents = accent_mask(&values);
    let max = values.iter().cloned().fold(0.0, f64::max);
    let n = totals.len();

    let mut chart = ChartBuilder::on(region)
        .margin(10)
        .caption("Total Payment Value by Payment Type", ("sans-serif", 20))
        .x_label_area_size(40)
        .y_label_area_size(110)
        .build_cartesian_2d(value_range(max), 0.0..n.max(1) as f64)
        .context("Failed to build payment chart")?;

    chart
        .configure_mesh()
        .y_labels(n.max(1))
        .y_label_formatter(&|y| {
            // Slot n-1 is the top of the axis and holds entry 0, the largest.
            let slot = *y as usize;
            if slot < labels.len() {
                labels[labels.len() - 1 - slot].clone()
            } else {
                String::new()
            }
        })
        .x_desc("Total Payment Value")
        .y_desc("Payment Type")
        .draw()
        .context("Failed to draw payment mesh")?;

    for (idx, &value) in values.iter().enumerate() {
        let color = if accents[idx] {
            palette::PAYMENT_ACCENT
        } else {
            palette::PAYMENT_BASE
        };
        let y_center = (n - 1 - idx) as f64 + 0.5;
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [
                    (0.0, y_center - BAR_WIDTH / 2.0),
                    (value, y_center + BAR_WIDTH / 2.0),
                ],
                color.filled(),
            )))
            .context("Failed to draw payment bar")?;
    }

    Ok(())
}

const DONUT_RADIUS: f64 = 1.0;
const DONUT_HOLE_RADIUS: f64 = 0.6;
const DONUT_LABEL_RADIUS: f64 = 0.85;
const DONUT_NAME_RADIUS: f64 = 1.22;
const ARC_SEGMENTS: usize = 96;

fn arc_points(a0: f64, sweep: f64, radius: f64) -> Vec<(f64, f64)> {
    let segments = ((sweep / (2.0 * PI)) * ARC_SEGMENTS as f64).ceil().max(2.0) as usize;
    (0..=segments)
        .map(|s| {
            let a = a0 + sweep * s as f64 / segments as f64;
            (radius * a.cos(), radius * a.sin())
        })
        .collect()
}

fn centered_label(size: i32) -> TextStyle<'static> {
    ("sans-serif", size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center))
}

/// Donut of transaction counts per value band. Wedges start at twelve o'clock
/// and run counter-clockwise in band order, each labeled with its share of
/// the total count. The hole is cosmetic.
pub fn draw_value_donut(region: &Region<'_>, bands: &[BandCount]) -> Result<()> {
    // The title is drawn up front, not as a builder caption, so the area left
    // for plotting can be measured exactly.
    let plot = region
        .titled(
            "Transaction Distribution Based on Value Category",
            ("sans-serif", 20).into_font(),
        )
        .context("Failed to draw distribution title")?;

    // Widen the x-range by the plotting area's aspect ratio so the ring
    // stays round; the 10px chart margins come off each side first.
    let (pw, ph) = plot.dim_in_pixel();
    let inner_w = pw.saturating_sub(20) as f64;
    let inner_h = ph.saturating_sub(20) as f64;
    let aspect = if inner_h > 0.0 { inner_w / inner_h } else { 1.0 };
    let extent = DONUT_NAME_RADIUS + 0.25;

    let mut chart = ChartBuilder::on(&plot)
        .margin(10)
        .build_cartesian_2d(-extent * aspect..extent * aspect, -extent..extent)
        .context("Failed to build distribution chart")?;

    let total: u64 = bands.iter().map(|b| b.count).sum();
    if total == 0 {
        // Degenerate: title only, no wedges.
        return Ok(());
    }

    let colors = palette::GREENS.steps(bands.len());

    let mut start = PI / 2.0;
    for (idx, band) in bands.iter().enumerate() {
        let sweep = band.count as f64 / total as f64 * 2.0 * PI;

        let mut wedge = vec![(0.0, 0.0)];
        wedge.extend(arc_points(start, sweep, DONUT_RADIUS));
        wedge.push((0.0, 0.0));
        chart
            .draw_series(std::iter::once(Polygon::new(wedge.clone(), colors[idx].filled())))
            .context("Failed to draw donut wedge")?;
        chart
            .draw_series(std::iter::once(PathElement::new(wedge, WHITE.stroke_width(2))))
            .context("Failed to draw wedge edge")?;

        start += sweep;
    }

    // Punch the hole before placing labels so none get painted over.
    let hole = arc_points(0.0, 2.0 * PI, DONUT_HOLE_RADIUS);
    chart
        .draw_series(std::iter::once(Polygon::new(hole, WHITE.filled())))
        .context("Failed to draw donut hole")?;

    let mut start = PI / 2.0;
    for band in bands {
        let share = band.count as f64 / total as f64;
        let mid = start + share * PI;

        chart
            .draw_series(std::iter::once(Text::new(
                format!("{:.1}%", share * 100.0),
                (DONUT_LABEL_RADIUS * mid.cos(), DONUT_LABEL_RADIUS * mid.sin()),
                centered_label(14),
            )))
            .context("Failed to draw percentage label")?;
        chart
            .draw_series(std::iter::once(Text::new(
                band.band.label().to_string(),
                (DONUT_NAME_RADIUS * mid.cos(), DONUT_NAME_RADIUS * mid.sin()),
                centered_label(13),
            )))
            .context("Failed to draw band label")?;

        start += share * 2.0 * PI;
    }

    Ok(())
}
