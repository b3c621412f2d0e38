// Orchestrates the single-shot render: load all three tables, aggregate,
// draw the four charts into a 2x2 grid, encode the page as PNG.

use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::prelude::*;

use crate::aggregate;
use crate::chart;
use crate::config::DashboardConfig;
use crate::data;
use crate::loader::{DataSource, Dataset};

const TITLE_FONT_SIZE: i32 = 36;

/// Render the full dashboard page and return it as PNG bytes.
///
/// Every chart receives pre-aggregated input; the distribution chart's
/// binning happens here alongside the other aggregations rather than inside
/// its producer.
pub fn render_dashboard(source: &dyn DataSource, config: &DashboardConfig) -> Result<Vec<u8>> {
    let sellers_table = source.load(Dataset::Sellers)?;
    let products_table = source.load(Dataset::Products)?;
    let payments_table = source.load(Dataset::Payments)?;

    let (sellers, skipped) = data::seller_records(&sellers_table)?;
    warn_skipped(Dataset::Sellers, skipped);
    let (products, skipped) = data::product_records(&products_table)?;
    warn_skipped(Dataset::Products, skipped);
    let (payments, skipped) = data::payment_records(&payments_table)?;
    warn_skipped(Dataset::Payments, skipped);

    let city_counts = aggregate::count_sellers_by_city(&sellers);
    let category_counts = aggregate::count_categories(&products);
    let payment_totals = aggregate::sum_payments_by_type(&payments);
    let value_bands = aggregate::bin_transaction_values(&payments);

    let (width, height) = (config.render.width, config.render.height);
    let mut buffer = vec![0u8; (width * height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
        root.fill(&WHITE).context("Failed to fill background")?;

        let grid = root
            .titled(&config.title, ("sans-serif", TITLE_FONT_SIZE).into_font())
            .context("Failed to draw page title")?;

        // Fixed placement: city top-left, category top-right, payment
        // bottom-left, distribution bottom-right.
        let regions = grid.split_evenly((2, 2));
        chart::draw_city_bars(&regions[0], &city_counts)?;
        chart::draw_category_bars(&regions[1], &category_counts)?;
        chart::draw_payment_bars(&regions[2], &payment_totals)?;
        chart::draw_value_donut(&regions[3], &value_bands)?;

        root.present().context("Failed to present drawing")?;
    }

    encode_png(&buffer, width, height)
}

fn warn_skipped(dataset: Dataset, skipped: usize) {
    if skipped > 0 {
        eprintln!(
            "Warning: skipped {} malformed row(s) in the {} dataset",
            skipped,
            dataset.name()
        );
    }
}

/// Encode an RGB buffer as PNG.
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }

    Ok(png_bytes)
}
