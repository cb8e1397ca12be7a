//! Project-level counts derived from a walked structure tree.

use serde::{Deserialize, Serialize};

use crate::routing::{FileKind, RoutingKind};
use crate::walker::StructureNode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePatterns {
    #[serde(rename = "static")]
    pub static_routes: usize,
    pub dynamic: usize,
    pub catch_all: usize,
    pub optional_catch_all: usize,
    pub route_groups: usize,
    pub private_folders: usize,
    pub parallel_routes: usize,
    pub intercepting_routes: usize,
}

impl RoutePatterns {
    fn record(&mut self, kind: RoutingKind) {
        let slot = match kind {
            RoutingKind::StaticRoute => &mut self.static_routes,
            RoutingKind::DynamicRoute => &mut self.dynamic,
            RoutingKind::CatchAllRoute => &mut self.catch_all,
            RoutingKind::OptionalCatchAllRoute => &mut self.optional_catch_all,
            RoutingKind::RouteGroup => &mut self.route_groups,
            RoutingKind::PrivateFolder => &mut self.private_folders,
            RoutingKind::ParallelRoute => &mut self.parallel_routes,
            RoutingKind::InterceptingRoute => &mut self.intercepting_routes,
        };
        *slot += 1;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialFileCounts {
    pub layouts: usize,
    pub pages: usize,
    pub loading: usize,
    pub errors: usize,
    pub not_found: usize,
    pub templates: usize,
    pub defaults: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Page,
    Api,
}

/// A URL served by the App Router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredRoute {
    pub route_path: String,
    pub kind: RouteKind,
    /// Folder declaring the route, relative to the project root.
    pub relative_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub api_methods: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectInsights {
    pub app_router_detected: bool,
    /// In-scope folders with a page file.
    pub route_count: usize,
    /// In-scope folders with a route handler.
    pub api_endpoint_count: usize,
    pub route_patterns: RoutePatterns,
    pub special_files: SpecialFileCounts,
    /// Sorted by path, pages before API routes on the same path.
    pub routes: Vec<DiscoveredRoute>,
}

pub fn analyze_insights(tree: &StructureNode) -> ProjectInsights {
    let mut insights = ProjectInsights::default();

    for node in tree.descendants() {
        if !node.is_app_router_scope {
            continue;
        }
        insights.app_router_detected = true;

        if let Some(routing) = &node.routing_analysis {
            insights.route_patterns.record(routing.kind);
        }

        if let Some(flags) = node.special_files {
            let route_path = node.route_path.clone().unwrap_or_else(|| "/".to_string());
            if flags.has_page {
                insights.route_count += 1;
                insights.routes.push(DiscoveredRoute {
                    route_path: route_path.clone(),
                    kind: RouteKind::Page,
                    relative_path: node.relative_path.clone(),
                    api_methods: Vec::new(),
                });
            }
            if flags.has_api_route {
                insights.api_endpoint_count += 1;
                let api_methods = node
                    .files()
                    .filter_map(|f| f.file_analysis.as_ref())
                    .find(|a| a.kind == FileKind::ApiRouteFile)
                    .and_then(|a| a.api_methods.clone())
                    .unwrap_or_default();
                insights.routes.push(DiscoveredRoute {
                    route_path,
                    kind: RouteKind::Api,
                    relative_path: node.relative_path.clone(),
                    api_methods,
                });
            }
        }

        if let Some(analysis) = &node.file_analysis {
            let counts = &mut insights.special_files;
            match analysis.kind {
                FileKind::LayoutFile => counts.layouts += 1,
                FileKind::PageFile => counts.pages += 1,
                FileKind::LoadingFile => counts.loading += 1,
                FileKind::ErrorFile => counts.errors += 1,
                FileKind::NotFoundFile => counts.not_found += 1,
                FileKind::TemplateFile => counts.templates += 1,
                FileKind::DefaultFile => counts.defaults += 1,
                _ => {}
            }
        }
    }

    insights
        .routes
        .sort_by(|a, b| a.route_path.cmp(&b.route_path).then(a.kind.cmp(&b.kind)));
    insights
}
