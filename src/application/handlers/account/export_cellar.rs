//! ExportCellarHandler - Query handler producing a CSV of the user's wines.

use std::sync::Arc;

use crate::domain::account::AccountError;
use crate::domain::foundation::UserId;
use crate::ports::{ExportRow, WineReader};

/// Download file name for the export.
pub const EXPORT_FILE_NAME: &str = "wines.csv";

const HEADER: [&str; 11] = [
    "Name", "Producer", "Vintage", "Grape", "Country", "Region", "Quantity", "Price", "Location",
    "Rating", "Notes",
];

#[derive(Debug, Clone)]
pub struct ExportCellarQuery {
    pub user_id: UserId,
}

#[derive(Debug, Clone)]
pub struct ExportCellarResult {
    pub csv: Vec<u8>,
    pub rows: usize,
}

pub struct ExportCellarHandler {
    wines: Arc<dyn WineReader>,
}

impl ExportCellarHandler {
    pub fn new(wines: Arc<dyn WineReader>) -> Self {
        Self { wines }
    }

    pub async fn handle(&self, query: ExportCellarQuery) -> Result<ExportCellarResult, AccountError> {
        let rows = self.wines.export_rows(&query.user_id).await?;
        let csv = write_csv(&rows).map_err(|e| AccountError::infrastructure(format!("csv export: {}", e)))?;

        tracing::debug!(user_id = %query.user_id, rows = rows.len(), "Cellar exported");
        Ok(ExportCellarResult {
            csv,
            rows: rows.len(),
        })
    }
}

fn write_csv(rows: &[ExportRow]) -> Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADER)?;

    for row in rows {
        let vintage = if row.is_non_vintage || row.vintage == 0 {
            "NV".to_string()
        } else {
            row.vintage.to_string()
        };
        writer.write_record([
            row.name.as_str(),
            row.producer.as_str(),
            vintage.as_str(),
            row.grape.as_str(),
            row.country.as_str(),
            row.region.as_str(),
            row.quantity.to_string().as_str(),
            format!("{:.2}", row.price).as_str(),
            row.location.as_str(),
            row.rating.as_str(),
            row.notes.as_str(),
        ])?;
    }

    Ok(writer.into_inner().map_err(|e| e.into_error())?)
}
