use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ecomm_insights::config::DashboardConfig;
use ecomm_insights::dashboard::render_dashboard;
use ecomm_insights::loader::CsvFileSource;

#[derive(Parser, Debug)]
#[command(name = "ecomm-insights")]
#[command(about = "Render the e-commerce insights dashboard from CSV datasets", long_about = None)]
struct Args {
    /// Directory holding the three conventionally named dataset files
    #[arg(long, conflicts_with = "config")]
    data_dir: Option<PathBuf>,

    /// JSON config with dataset paths, page title and render options
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sellers dataset CSV (use with --products and --payments)
    #[arg(long, requires_all = ["products", "payments"], conflicts_with_all = ["data_dir", "config"])]
    sellers: Option<PathBuf>,

    /// Products dataset CSV (use with --sellers and --payments)
    #[arg(long, requires_all = ["sellers", "payments"])]
    products: Option<PathBuf>,

    /// Payments dataset CSV (use with --sellers and --products)
    #[arg(long, requires_all = ["sellers", "products"])]
    payments: Option<PathBuf>,

    /// Write the PNG to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = if let Some(path) = &args.config {
        DashboardConfig::from_json_file(path)?
    } else if let (Some(sellers), Some(products), Some(payments)) =
        (&args.sellers, &args.products, &args.payments)
    {
        DashboardConfig::from_paths(sellers.clone(), products.clone(), payments.clone())
    } else if let Some(dir) = &args.data_dir {
        DashboardConfig::from_dir(dir)
    } else {
        DashboardConfig::from_dir(Path::new("."))
    };

    let source = CsvFileSource::new(&config);
    let png_bytes =
        render_dashboard(&source, &config).context("Failed to render dashboard")?;

    match &args.output {
        Some(path) => {
            fs::write(path, &png_bytes)
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&png_bytes)
                .context("Failed to write PNG to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
