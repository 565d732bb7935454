//! `folio views` - list the configured views in navigation order.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use folio_core::{FolioConfig, ViewRegistry};

use crate::config::ConfigLoader;

pub fn run(explicit: Option<&Path>) -> Result<()> {
    let config = ConfigLoader::load(explicit)?;
    let registry = config.registry()?;
    println!("{}", build_table(&config, &registry));
    Ok(())
}

fn build_table(config: &FolioConfig, registry: &ViewRegistry) -> Table {
    let ctas = config.calls_to_action(registry);

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("#").fg(Color::Cyan),
        Cell::new("View").fg(Color::Cyan),
        Cell::new("Label").fg(Color::Cyan),
        Cell::new("Fragment").fg(Color::Cyan),
        Cell::new("Calls to action").fg(Color::Cyan),
    ]);

    for (index, entry) in registry.entries().iter().enumerate() {
        let mut id = entry.id.to_string();
        if &entry.id == registry.default_view() {
            id.push_str(" (default)");
        }
        let buttons: Vec<_> = ctas
            .iter()
            .filter(|cta| cta.on == entry.id)
            .map(|cta| format!("{} → {}", cta.label, cta.target))
            .collect();

        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(id),
            Cell::new(&entry.label),
            Cell::new(entry.id.fragment()),
            Cell::new(buttons.join(", ")),
        ]);
    }
    table
}
