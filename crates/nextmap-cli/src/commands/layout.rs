use std::path::Path;

use nextmap_graph::{DependencyAnalyzer, NativeRuntime, ProjectWalker};
use nextmap_layout::{ExpandedSet, LayoutNodeKind, NodeData, NodeIdTree, TreeLayoutEngine};
use rustc_hash::FxHashMap;

use crate::cli::LayoutArgs;
use crate::commands::utils::{resolve_root, write_json};
use crate::config::{ConfigOverrides, NextmapConfig};
use crate::error::Result;
use crate::ui;

pub fn execute(args: LayoutArgs, config_path: Option<&Path>) -> Result<()> {
    let runtime = NativeRuntime;
    let root = resolve_root(&args.root, &runtime)?;

    let overrides = ConfigOverrides {
        expanded: (!args.expand.is_empty()).then(|| args.expand.clone()),
        ..ConfigOverrides::default()
    };
    let config = NextmapConfig::load(&root, config_path, &overrides)?;
    let analyzer_config = config.analyzer_config();

    let walker = ProjectWalker::new(&root, analyzer_config.walker, &runtime)?;
    let tree = walker.walk();
    let ids = NodeIdTree::assign(&tree);
    let expanded = if args.expand_all {
        ExpandedSet::all(&ids)
    } else {
        config.expanded_set()
    };

    let engine = TreeLayoutEngine::default();
    let mut layout = engine.layout_with_ids(&tree, &ids, &expanded);

    if args.with_deps {
        let analyzer = DependencyAnalyzer::new(walker.root(), &runtime)
            .with_alias_prefix(analyzer_config.alias_prefix);
        let dependencies: FxHashMap<String, _> = layout
            .nodes
            .iter()
            .filter_map(|node| match &node.data {
                NodeData::File { full_path, .. }
                    if DependencyAnalyzer::is_analyzable(Path::new(full_path)) =>
                {
                    Some((node.id.clone(), analyzer.analyze(Path::new(full_path))))
                }
                _ => None,
            })
            .collect();
        layout = engine.with_dependencies(layout, &dependencies);
    }

    let count = |kind| layout.nodes.iter().filter(|n| n.kind() == kind).count();
    ui::success(&format!(
        "Laid out {} folders, {} files, {} dependencies ({} edges)",
        count(LayoutNodeKind::Folder),
        count(LayoutNodeKind::File),
        count(LayoutNodeKind::Dependency),
        layout.edges.len()
    ));

    if let Some(path) = &args.json {
        write_json(path, &layout)?;
    }
    Ok(())
}
