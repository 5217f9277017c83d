//! Servers command implementation.

use itemdb_core::schema;
use serde::Serialize;

/// One dialect row.
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    /// Dialect name used for selection.
    pub name: &'static str,
    /// Human-readable name.
    pub display_name: &'static str,
    /// XML encoding declared on write.
    pub encoding: &'static str,
    /// Whether the dialect's items.xml supports fromid/toid ranges.
    pub supports_ranges: bool,
    /// Number of known attribute keys.
    pub attribute_count: usize,
}

/// Runs the servers command.
pub fn run(format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let servers: Vec<ServerInfo> = schema::all()
        .iter()
        .map(|s| ServerInfo {
            name: s.server,
            display_name: s.display_name,
            encoding: s.encoding.header_name(),
            supports_ranges: s.supports_from_to_id,
            attribute_count: s.flattened_keys().len(),
        })
        .collect();

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&servers)?);
        }
        _ => {
            println!("Known attribute servers:");
            println!();
            for server in &servers {
                println!(
                    "  {:<16} {:<12} ranges: {:<5} attributes: {}",
                    server.name,
                    server.encoding,
                    if server.supports_ranges { "yes" } else { "no" },
                    server.attribute_count
                );
            }
        }
    }

    Ok(())
}
