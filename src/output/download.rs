//! In-memory CSV download link for the token table

use crate::error::Result;
use crate::processing::pipeline::TokenTable;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

pub const DOWNLOAD_HEADER: &str = "📩 ⬇️ Download CSV file";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadLink {
    pub filename: String,
    /// `data:` URI carrying the base64 encoded CSV
    pub href: String,
    pub html: String,
}

impl DownloadLink {
    /// Decode the CSV carried by the link
    pub fn csv(&self) -> Option<String> {
        let encoded = self.href.strip_prefix("data:file/csv;base64,")?;
        let bytes = STANDARD.decode(encoded).ok()?;
        String::from_utf8(bytes).ok()
    }
}

pub fn download_filename(timestamp: DateTime<Local>) -> String {
    format!("nlp_result_{}_.csv", timestamp.format("%Y%m%d-%H%M%S"))
}

/// Serialize the table to CSV and wrap it in a `data:` anchor
pub fn make_downloadable(table: &TokenTable, timestamp: DateTime<Local>) -> Result<DownloadLink> {
    let csv = table.to_csv()?;
    let filename = download_filename(timestamp);
    let href = format!("data:file/csv;base64,{}", STANDARD.encode(csv.as_bytes()));
    let html = format!(r#"<a href="{}" download="{}">Click here!</a>"#, href, filename);
    log::debug!("Prepared {} ({} bytes of CSV)", filename, csv.len());

    Ok(DownloadLink { filename, href, html })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_filename_format() {
        let ts = Local.with_ymd_and_hms(2021, 3, 9, 14, 5, 7).unwrap();
        assert_eq!(download_filename(ts), "nlp_result_20210309-140507_.csv");
    }

    #[test]
    fn test_link_carries_table() {
        let table = TokenTable::default();
        let link = make_downloadable(&table, Local::now()).unwrap();
        assert!(link.href.starts_with("data:file/csv;base64,"));
        assert!(link.html.contains("Click here!"));
        assert!(link.html.contains(&format!("download=\"{}\"", link.filename)));
        assert_eq!(link.csv().unwrap(), table.to_csv().unwrap());
    }
}
