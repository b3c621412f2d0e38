use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::RenderOptions;

/// Conventional dataset file names, as published alongside the datasets.
pub const SELLERS_FILE: &str = "sellers_dataset.csv";
pub const PRODUCTS_FILE: &str = "products_dataset.csv";
pub const PAYMENTS_FILE: &str = "order_payments_dataset.csv";

fn default_title() -> String {
    "E-Commerce Insights: Seller, Payment, and Transaction Overview".to_string()
}

/// Where the three datasets live and how the page is rendered.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub sellers: PathBuf,
    pub products: PathBuf,
    pub payments: PathBuf,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub render: RenderOptions,
}

impl DashboardConfig {
    /// Point at the conventionally named dataset files inside `dir`.
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            sellers: dir.join(SELLERS_FILE),
            products: dir.join(PRODUCTS_FILE),
            payments: dir.join(PAYMENTS_FILE),
            title: default_title(),
            render: RenderOptions::default(),
        }
    }

    /// Use an explicit path for each dataset.
    pub fn from_paths(sellers: PathBuf, products: PathBuf, payments: PathBuf) -> Self {
        Self {
            sellers,
            products,
            payments,
            title: default_title(),
            render: RenderOptions::default(),
        }
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config '{}'", path.display()))
    }
}
