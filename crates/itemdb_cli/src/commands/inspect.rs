//! Inspect command implementation.

use itemdb_core::{ServerItemList, ServerItemType};
use itemdb_otb::read_server_items;
use serde::Serialize;
use std::path::Path;

/// Database inspection result.
#[derive(Debug, Serialize)]
pub struct InspectResult {
    /// Database path.
    pub path: String,
    /// File size in bytes.
    pub file_size: u64,
    /// OTB major (format) version.
    pub major_version: u32,
    /// OTB minor version.
    pub minor_version: u32,
    /// OTB build number.
    pub build_number: u32,
    /// Client version the database targets.
    pub client_version: u32,
    /// Total item count.
    pub item_count: usize,
    /// Smallest server id.
    pub min_id: u16,
    /// Largest server id.
    pub max_id: u16,
    /// Item counts by type.
    pub types: TypeCounts,
}

/// Item counts by server type.
#[derive(Debug, Default, Serialize)]
pub struct TypeCounts {
    /// Items without a special group.
    pub none: usize,
    /// Ground tiles.
    pub ground: usize,
    /// Containers.
    pub container: usize,
    /// Fluid containers.
    pub fluid: usize,
    /// Splashes.
    pub splash: usize,
    /// Deprecated entries.
    pub deprecated: usize,
}

/// Runs the inspect command.
pub fn run(path: &Path, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(path)?;
    let list = read_server_items(&data)?;

    let mut types = TypeCounts::default();
    for item in list.items() {
        match item.item_type {
            ServerItemType::None => types.none += 1,
            ServerItemType::Ground => types.ground += 1,
            ServerItemType::Container => types.container += 1,
            ServerItemType::Fluid => types.fluid += 1,
            ServerItemType::Splash => types.splash += 1,
            ServerItemType::Deprecated => types.deprecated += 1,
        }
    }

    let result = InspectResult {
        path: path.display().to_string(),
        file_size: data.len() as u64,
        major_version: list.major_version,
        minor_version: list.minor_version,
        build_number: list.build_number,
        client_version: list.client_version,
        item_count: list.len(),
        min_id: list.min_id(),
        max_id: list.max_id(),
        types,
    };

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            print_text_output(&result, &list);
        }
    }

    Ok(())
}

fn print_text_output(result: &InspectResult, list: &ServerItemList) {
    println!("Server Item Database Inspection");
    println!("===============================");
    println!();
    println!("Path: {}", result.path);
    println!("Size: {} bytes", result.file_size);
    println!();
    println!("Version:");
    println!(
        "  OTB:    {}.{}.{}",
        result.major_version, result.minor_version, result.build_number
    );
    println!("  Client: {}", result.client_version);
    println!();
    println!("Items:");
    println!("  Total:      {}", result.item_count);
    if !list.is_empty() {
        println!("  Id range:   {}..{}", result.min_id, result.max_id);
    }
    println!("  Ground:     {}", result.types.ground);
    println!("  Container:  {}", result.types.container);
    println!("  Fluid:      {}", result.types.fluid);
    println!("  Splash:     {}", result.types.splash);
    println!("  Deprecated: {}", result.types.deprecated);
    println!("  Other:      {}", result.types.none);
}
