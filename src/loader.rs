use anyhow::{bail, Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::DashboardConfig;
use crate::data::Table;

/// One of the three datasets the dashboard is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dataset {
    Sellers,
    Products,
    Payments,
}

impl Dataset {
    pub fn name(self) -> &'static str {
        match self {
            Dataset::Sellers => "sellers",
            Dataset::Products => "products",
            Dataset::Payments => "payments",
        }
    }
}

/// Source of the dashboard's tables. The file-backed implementation is used
/// by the binary; tests substitute [`MemorySource`].
pub trait DataSource {
    fn load(&self, dataset: Dataset) -> Result<Table>;
}

/// Reads each dataset from a local CSV file.
pub struct CsvFileSource {
    sellers: PathBuf,
    products: PathBuf,
    payments: PathBuf,
}

impl CsvFileSource {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            sellers: config.sellers.clone(),
            products: config.products.clone(),
            payments: config.payments.clone(),
        }
    }

    fn path(&self, dataset: Dataset) -> &Path {
        match dataset {
            Dataset::Sellers => &self.sellers,
            Dataset::Products => &self.products,
            Dataset::Payments => &self.payments,
        }
    }
}

impl DataSource for CsvFileSource {
    fn load(&self, dataset: Dataset) -> Result<Table> {
        let path = self.path(dataset);
        read_local_table(path).with_context(|| {
            format!(
                "Data source for the {} dataset unavailable ('{}')",
                dataset.name(),
                path.display()
            )
        })
    }
}

fn read_local_table(path: &Path) -> Result<Table> {
    let location = path.to_string_lossy();
    if location.starts_with("http://") || location.starts_with("https://") {
        // Remote fetch is the job of an outer collaborator; this source only
        // reads what is already on disk.
        bail!("remote locations are not supported; fetch the file locally first");
    }
    read_csv_table(path)
}

fn read_csv_table(path: &Path) -> Result<Table> {
    let file = File::open(path).context("Failed to open file")?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("Failed to parse CSV record")?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table::new(headers, rows))
}

/// Serves pre-built tables; lets tests run the full pipeline without files.
pub struct MemorySource {
    pub sellers: Table,
    pub products: Table,
    pub payments: Table,
}

impl DataSource for MemorySource {
    fn load(&self, dataset: Dataset) -> Result<Table> {
        let table = match dataset {
            Dataset::Sellers => &self.sellers,
            Dataset::Products => &self.products,
            Dataset::Payments => &self.payments,
        };
        Ok(table.clone())
    }
}
