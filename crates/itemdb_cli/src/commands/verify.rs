//! Verify command implementation.

use itemdb_service::{ItemsService, LoadRequest};
use std::path::Path;
use tracing::info;

/// Runs the verify command.
///
/// Loads the database (applying items.xml when given), rewrites it, and
/// compares the rewritten bytes against the input. A clean database
/// round-trips byte-for-byte.
pub fn run(
    otb_path: &Path,
    xml_path: Option<&Path>,
    server: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let otb = std::fs::read(otb_path)?;
    let xml = xml_path.map(std::fs::read_to_string).transpose()?;

    let mut service = ItemsService::new();
    let report = service.load_server_items(LoadRequest {
        otb: otb.clone(),
        xml,
        attribute_server: server.map(String::from),
    })?;
    info!(
        items = report.item_count,
        client_version = report.client_version,
        "database loaded"
    );

    for key in &report.missing_attributes {
        println!("unknown attribute key: {key}");
    }
    for key in &report.missing_tag_attributes {
        println!("unknown tag attribute: {key}");
    }

    let saved = service.save_server_items()?;
    if saved.otb == otb {
        println!("OK: {} items, round-trip is byte-identical", report.item_count);
        Ok(())
    } else {
        Err(format!(
            "round-trip mismatch: wrote {} bytes, input was {} bytes",
            saved.otb.len(),
            otb.len()
        )
        .into())
    }
}
