//! Sizes, durations and the per-command summaries.

use std::path::Path;
use std::time::Duration;

use nextmap_graph::{FileDependencies, ImporterRef, ProjectAnalysis, RouteKind};
use nextmap_layout::SchemaLayout;
use nextmap_schema::SchemaStats;
use owo_colors::OwoColorize;

/// Format a byte count with the largest fitting unit.
///
/// ```
/// use nextmap_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1536), "1.50 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    let mut size = bytes as f64;
    let mut unit_idx = 0;
    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{bytes} B")
    } else {
        format!("{size:.2} {}", UNITS[unit_idx])
    }
}

/// ```
/// use std::time::Duration;
/// use nextmap_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

pub fn print_project_summary(analysis: &ProjectAnalysis) {
    let insights = &analysis.insights;
    let meta = &analysis.metadata;

    eprintln!();
    eprintln!("{}", "Project".bold().underline());
    eprintln!("  Root:        {}", meta.project_root.display());
    if insights.app_router_detected {
        eprintln!("  App Router:  {}/", meta.app_root.cyan());
    } else {
        eprintln!("  App Router:  {}", "not detected".dimmed());
    }
    eprintln!("  Pages:       {}", insights.route_count);
    eprintln!("  API routes:  {}", insights.api_endpoint_count);

    if !insights.routes.is_empty() {
        let width = insights
            .routes
            .iter()
            .map(|r| r.route_path.len())
            .max()
            .unwrap_or(0);
        eprintln!();
        eprintln!("{}", "Routes".bold().underline());
        for route in &insights.routes {
            let kind = match route.kind {
                RouteKind::Page => "page".green().to_string(),
                RouteKind::Api => "api ".magenta().to_string(),
            };
            let methods = if route.api_methods.is_empty() {
                String::new()
            } else {
                format!(" [{}]", route.api_methods.join(", "))
            };
            eprintln!(
                "  {kind}  {:<width$}  {}{}",
                route.route_path,
                route.relative_path.dimmed(),
                methods.yellow()
            );
        }
    }

    let p = &insights.route_patterns;
    let patterns = [
        ("dynamic", p.dynamic),
        ("catch-all", p.catch_all),
        ("optional catch-all", p.optional_catch_all),
        ("groups", p.route_groups),
        ("private", p.private_folders),
        ("parallel", p.parallel_routes),
        ("intercepting", p.intercepting_routes),
    ];
    let listed: Vec<String> = patterns
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(name, n)| format!("{n} {name}"))
        .collect();
    if !listed.is_empty() {
        eprintln!();
        eprintln!("  Segments:    {}", listed.join(", "));
    }

    if analysis.prisma_info.detected {
        for schema in &analysis.prisma_info.schemas {
            eprintln!(
                "  Prisma:      {} ({})",
                schema.relative_path,
                format_size(schema.size)
            );
        }
    }

    if let Some(map) = &analysis.dependency_map {
        eprintln!(
            "  Dependencies: {} files, {} imports, {} back-references",
            map.len(),
            map.edge_count(),
            map.back_reference_count()
        );
    }
}

pub fn print_dependencies(file: &Path, deps: &FileDependencies) {
    eprintln!("{}", file.display().bold());
    for record in deps.records() {
        let marker = if record.is_missing() {
            "✗".red().to_string()
        } else if record.is_local {
            "→".green().to_string()
        } else {
            "⇢".blue().to_string()
        };
        let target = record
            .relative_path
            .as_deref()
            .or(record.package_name.as_deref())
            .unwrap_or(&record.resolved_path);
        eprintln!(
            "  {marker} {:<32} {} {}",
            record.source,
            target.dimmed(),
            format!("({})", record.kind).dimmed()
        );
    }
    for error in &deps.metadata.parse_errors {
        eprintln!("  {} {}", "⚠".yellow(), error.yellow());
    }
}

pub fn print_importers(file: &Path, importers: &[ImporterRef]) {
    eprintln!("{}", file.display().bold());
    if importers.is_empty() {
        eprintln!("  {}", "no importers".dimmed());
    }
    for importer in importers {
        let names: Vec<&str> = importer.specifiers.iter().map(|s| s.local.as_str()).collect();
        let detail = if names.is_empty() {
            format!("({})", importer.name)
        } else {
            format!("{{ {} }}", names.join(", "))
        };
        eprintln!("  ← {}  {}", importer.relative_path, detail.dimmed());
    }
}

pub fn print_schema_summary(stats: &SchemaStats, layout: &SchemaLayout) {
    let o = &stats.overview;
    eprintln!();
    eprintln!("{}", "Schema".bold().underline());
    eprintln!("  Models:     {}", o.model_count);
    eprintln!("  Enums:      {}", o.enum_count);
    eprintln!(
        "  Relations:  {} (1:1 {}, 1:n {}, n:m {}), {} enum references",
        stats.relations.total,
        stats.relations.one_to_one,
        stats.relations.one_to_many,
        stats.relations.many_to_many,
        stats.relations.enum_references
    );
    eprintln!(
        "  Indexes:    {} ({} unique)",
        stats.indexes.total, stats.indexes.unique
    );
    if let Some(model) = &stats.insights.most_connected_model {
        eprintln!("  Hub model:  {}", model.cyan());
    }
    eprintln!(
        "  Layout:     {} nodes within radius {:.0}",
        layout.nodes.len(),
        layout.containment_radius
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1023), "1023 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(5 * 1024 * 1024 * 1024), "5.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_secs(2)), "2.00s");
    }
}
