//! Whole-project analysis: walk, insights, Prisma detection and the
//! optional dependency map.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::dependency::{DependencyAnalyzer, DependencyMap, ForwardDependencyMap, compute_reverse};
use crate::insights::{ProjectInsights, analyze_insights};
use crate::prisma::{PrismaInfo, detect_prisma};
use crate::resolver::DEFAULT_ALIAS_PREFIX;
use crate::runtime::Runtime;
use crate::walker::{ProjectWalker, StructureNode, WalkerConfig};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzerConfig {
    #[serde(flatten)]
    pub walker: WalkerConfig,
    /// Import prefix mapped to the project root.
    pub alias_prefix: String,
    /// Build the two-phase dependency map during the walk.
    pub analyze_dependencies: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            walker: WalkerConfig::default(),
            alias_prefix: DEFAULT_ALIAS_PREFIX.to_string(),
            analyze_dependencies: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub has_app_router: bool,
    pub app_root: String,
    pub total_routes: usize,
    pub total_api_endpoints: usize,
    pub has_prisma: bool,
    pub total_prisma_schemas: usize,
    pub project_root: PathBuf,
    /// RFC 3339 timestamp.
    pub analyzed_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub structure: StructureNode,
    pub insights: ProjectInsights,
    pub prisma_info: PrismaInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_map: Option<DependencyMap>,
    pub metadata: ProjectMetadata,
}

/// Analyze every source file in `tree`, then invert the edges.
pub fn build_dependency_map(tree: &StructureNode, analyzer: &DependencyAnalyzer<'_>) -> DependencyMap {
    let files = tree.source_files();
    tracing::debug!("Dependency phase 1: {} files", files.len());
    let forward = ForwardDependencyMap::build(analyzer, files);
    compute_reverse(forward)
}

/// Walk `root` and derive everything the rendering layer needs.
///
/// Fails only when `root` is not a directory.
pub fn analyze_project(
    root: &Path,
    config: &AnalyzerConfig,
    runtime: &dyn Runtime,
) -> Result<ProjectAnalysis> {
    let walker = ProjectWalker::new(root, config.walker.clone(), runtime)?;
    let structure = walker.walk();
    let insights = analyze_insights(&structure);
    let prisma_info = detect_prisma(walker.root(), runtime);

    let dependency_map = config.analyze_dependencies.then(|| {
        let analyzer = DependencyAnalyzer::new(walker.root(), runtime)
            .with_alias_prefix(config.alias_prefix.clone());
        build_dependency_map(&structure, &analyzer)
    });

    let metadata = ProjectMetadata {
        has_app_router: insights.app_router_detected,
        app_root: walker.app_root().to_string(),
        total_routes: insights.route_count,
        total_api_endpoints: insights.api_endpoint_count,
        has_prisma: prisma_info.detected,
        total_prisma_schemas: prisma_info.schemas.len(),
        project_root: walker.root().to_path_buf(),
        analyzed_at: chrono::Utc::now().to_rfc3339(),
    };

    tracing::info!(
        "Analyzed {}: {} routes, {} API endpoints",
        metadata.project_root.display(),
        metadata.total_routes,
        metadata.total_api_endpoints
    );

    Ok(ProjectAnalysis {
        structure,
        insights,
        prisma_info,
        dependency_map,
        metadata,
    })
}
