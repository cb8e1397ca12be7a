use std::path::Path;

use nextmap_graph::{NativeRuntime, Runtime};
use nextmap_layout::{ForceLayoutEngine, SchemaLayout};
use nextmap_schema::{SchemaGraphBuilder, SchemaStats, compute_stats, parse_schema};
use serde::Serialize;

use crate::cli::SchemaArgs;
use crate::config::{ConfigOverrides, NextmapConfig};
use crate::commands::utils::write_json;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SchemaReport<'a> {
    layout: &'a SchemaLayout,
    stats: &'a SchemaStats,
}

/// Configuration is looked up next to the schema file.
pub fn execute(args: SchemaArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime;
    let source = runtime.read_to_string(&args.schema).with_path(&args.schema)?;

    let config_root = args
        .schema
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let overrides = ConfigOverrides {
        viewport_width: args.viewport.map(|v| v.width),
        viewport_height: args.viewport.map(|v| v.height),
        ticks: args.ticks,
        ..ConfigOverrides::default()
    };
    let config = NextmapConfig::load(config_root, config_path, &overrides)?;

    let document = parse_schema(&source).map_err(|source| CliError::Schema {
        path: args.schema.clone(),
        source,
    })?;
    let graph = SchemaGraphBuilder::new(&document).build();
    let stats = compute_stats(&document, &graph);

    let spinner = ui::Spinner::new(&format!("Laying out {} nodes", graph.nodes.len()));
    let layout = ForceLayoutEngine::new(config.force_layout_config()).layout(&graph);
    spinner.finish(&format!(
        "Laid out {} nodes and {} edges",
        layout.nodes.len(),
        layout.edges.len()
    ));

    ui::print_schema_summary(&stats, &layout);

    if let Some(path) = &args.json {
        write_json(path, &SchemaReport { layout: &layout, stats: &stats })?;
    }
    Ok(())
}
