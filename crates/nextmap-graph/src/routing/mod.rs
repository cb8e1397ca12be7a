//! Next.js App Router naming conventions.
//!
//! [`classify`] maps a folder name to its routing semantics and
//! [`build_route_path`] folds that classification into a URL path.
//! [`files`] does the same for file names (`page`, `layout`, `route`, ...).

pub mod files;

use serde::{Deserialize, Serialize};

pub use files::{FileAnalysis, FileKind, SpecialFiles, classify_file, extract_api_methods};

/// Routing category of a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingKind {
    StaticRoute,
    RouteGroup,
    PrivateFolder,
    DynamicRoute,
    CatchAllRoute,
    OptionalCatchAllRoute,
    ParallelRoute,
    InterceptingRoute,
}

impl RoutingKind {
    pub const ALL: [RoutingKind; 8] = [
        RoutingKind::StaticRoute,
        RoutingKind::RouteGroup,
        RoutingKind::PrivateFolder,
        RoutingKind::DynamicRoute,
        RoutingKind::CatchAllRoute,
        RoutingKind::OptionalCatchAllRoute,
        RoutingKind::ParallelRoute,
        RoutingKind::InterceptingRoute,
    ];

    /// Human label, e.g. "Route Group".
    pub fn label(&self) -> &'static str {
        match self {
            RoutingKind::StaticRoute => "Static Route",
            RoutingKind::RouteGroup => "Route Group",
            RoutingKind::PrivateFolder => "Private Folder",
            RoutingKind::DynamicRoute => "Dynamic Route",
            RoutingKind::CatchAllRoute => "Catch-all Route",
            RoutingKind::OptionalCatchAllRoute => "Optional Catch-all Route",
            RoutingKind::ParallelRoute => "Parallel Route",
            RoutingKind::InterceptingRoute => "Intercepting Route",
        }
    }

    /// Whether folders of this kind add a segment to the URL.
    pub fn contributes_segment(&self) -> bool {
        matches!(
            self,
            RoutingKind::StaticRoute
                | RoutingKind::DynamicRoute
                | RoutingKind::CatchAllRoute
                | RoutingKind::OptionalCatchAllRoute
        )
    }
}

impl std::fmt::Display for RoutingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// How far up an intercepting route reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterceptLevel {
    /// `(.)`
    SameLevel,
    /// `(..)`
    OneLevelUp,
    /// `(..)(..)`
    TwoLevelsUp,
    /// `(...)`
    FromRoot,
}

impl InterceptLevel {
    fn description(&self) -> &'static str {
        match self {
            InterceptLevel::SameLevel => "Intercepts routes at the same level",
            InterceptLevel::OneLevelUp => "Intercepts routes one level above",
            InterceptLevel::TwoLevelsUp => "Intercepts routes two levels above",
            InterceptLevel::FromRoot => "Intercepts routes from the root",
        }
    }
}

/// Routing semantics of one folder name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingClassification {
    #[serde(rename = "type")]
    pub kind: RoutingKind,
    pub display_name: String,
    pub routing_type: String,
    pub url_effect: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub param_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intercept_level: Option<InterceptLevel>,
}

impl RoutingClassification {
    fn new(kind: RoutingKind, display_name: &str, url_effect: String, description: &str) -> Self {
        Self {
            kind,
            display_name: display_name.to_string(),
            routing_type: kind.label().to_string(),
            url_effect,
            description: description.to_string(),
            param_name: None,
            slot_name: None,
            intercept_level: None,
        }
    }
}

/// Level of an intercepting prefix: `(.)`, `(..)`, `(..)(..)` or `(...)`.
fn intercept_prefix(name: &str) -> Option<InterceptLevel> {
    if name.starts_with("(..)(..)") {
        return Some(InterceptLevel::TwoLevelsUp);
    }
    let rest = name.strip_prefix('(')?;
    let dots = rest.chars().take_while(|c| *c == '.').count();
    if dots == 0 || !rest[dots..].starts_with(')') {
        return None;
    }
    let level = match dots {
        1 => InterceptLevel::SameLevel,
        2 => InterceptLevel::OneLevelUp,
        _ => InterceptLevel::FromRoot,
    };
    Some(level)
}

/// Classify a folder name. Total and pure: every string maps to exactly one kind.
pub fn classify(name: &str) -> RoutingClassification {
    // `(..)photo` also starts with `(`, so the intercepting prefix is tested first.
    if let Some(level) = intercept_prefix(name) {
        return RoutingClassification {
            intercept_level: Some(level),
            ..RoutingClassification::new(
                RoutingKind::InterceptingRoute,
                name,
                "Modal/overlay behavior".to_string(),
                level.description(),
            )
        };
    }

    if name.len() >= 2 && name.starts_with('(') && name.ends_with(')') {
        return RoutingClassification::new(
            RoutingKind::RouteGroup,
            &name[1..name.len() - 1],
            "No URL impact".to_string(),
            "Groups routes for organization without affecting URL structure",
        );
    }

    if name.starts_with('_') {
        return RoutingClassification::new(
            RoutingKind::PrivateFolder,
            name,
            "Not routable".to_string(),
            "Private implementation detail, excluded from routing",
        );
    }

    if name.len() >= 2 && name.starts_with('[') && name.ends_with(']') {
        let inner = &name[1..name.len() - 1];

        if let Some(param) = inner
            .strip_prefix("[...")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return RoutingClassification {
                param_name: Some(param.to_string()),
                ..RoutingClassification::new(
                    RoutingKind::OptionalCatchAllRoute,
                    name,
                    "Matches /route and /route/a/b/c".to_string(),
                    "Matches zero or more path segments",
                )
            };
        }

        if let Some(param) = inner.strip_prefix("...") {
            return RoutingClassification {
                param_name: Some(param.to_string()),
                ..RoutingClassification::new(
                    RoutingKind::CatchAllRoute,
                    name,
                    "Matches /route/a/b/c".to_string(),
                    "Matches one or more path segments",
                )
            };
        }

        return RoutingClassification {
            param_name: Some(inner.to_string()),
            ..RoutingClassification::new(
                RoutingKind::DynamicRoute,
                name,
                "Matches /route/123, /route/abc".to_string(),
                "Matches a single dynamic path segment",
            )
        };
    }

    if let Some(slot) = name.strip_prefix('@') {
        return RoutingClassification {
            slot_name: Some(slot.to_string()),
            ..RoutingClassification::new(
                RoutingKind::ParallelRoute,
                name,
                "Named slot".to_string(),
                "Renders content in parallel with the main page",
            )
        };
    }

    RoutingClassification::new(
        RoutingKind::StaticRoute,
        name,
        format!("Matches /route/{name}"),
        "Static path segment",
    )
}

/// Fold one folder into its parent's URL path.
///
/// `parent` is `None` for the App Router root folder itself, which maps to
/// `/` regardless of its name. A parent of `/` is treated as the empty prefix
/// so children of the root become `/about`, not `//about`.
pub fn build_route_path(
    parent: Option<&str>,
    name: &str,
    classification: &RoutingClassification,
) -> String {
    let Some(parent) = parent else {
        return "/".to_string();
    };
    let base = if parent == "/" { "" } else { parent };
    let param = classification.param_name.as_deref().unwrap_or_default();

    let path = match classification.kind {
        RoutingKind::RouteGroup
        | RoutingKind::PrivateFolder
        | RoutingKind::ParallelRoute
        | RoutingKind::InterceptingRoute => base.to_string(),
        RoutingKind::DynamicRoute => format!("{base}/[{param}]"),
        RoutingKind::CatchAllRoute => format!("{base}/[...{param}]"),
        RoutingKind::OptionalCatchAllRoute => format!("{base}/[[...{param}]]"),
        RoutingKind::StaticRoute => format!("{base}/{name}"),
    };

    if path.is_empty() { "/".to_string() } else { path }
}

/// URL path of a folder from its path segments below the App Router root.
///
/// Equivalent to folding [`build_route_path`] over the segments; used to
/// re-derive a route path from a relative path alone.
pub fn route_path_for_segments<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    segments
        .into_iter()
        .fold("/".to_string(), |parent, segment| {
            build_route_path(Some(&parent), segment, &classify(segment))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(classify("(marketing)").kind, RoutingKind::RouteGroup);
        assert_eq!(classify("(marketing)").display_name, "marketing");

        let dynamic = classify("[id]");
        assert_eq!(dynamic.kind, RoutingKind::DynamicRoute);
        assert_eq!(dynamic.param_name.as_deref(), Some("id"));

        let catch_all = classify("[...slug]");
        assert_eq!(catch_all.kind, RoutingKind::CatchAllRoute);
        assert_eq!(catch_all.param_name.as_deref(), Some("slug"));

        let optional = classify("[[...slug]]");
        assert_eq!(optional.kind, RoutingKind::OptionalCatchAllRoute);
        assert_eq!(optional.param_name.as_deref(), Some("slug"));

        let parallel = classify("@modal");
        assert_eq!(parallel.kind, RoutingKind::ParallelRoute);
        assert_eq!(parallel.slot_name.as_deref(), Some("modal"));

        assert_eq!(classify("_components").kind, RoutingKind::PrivateFolder);
        assert_eq!(classify("about").kind, RoutingKind::StaticRoute);
    }

    #[test]
    fn test_intercepting_levels() {
        let cases = [
            ("(.)photo", InterceptLevel::SameLevel),
            ("(..)photo", InterceptLevel::OneLevelUp),
            ("(..)(..)photo", InterceptLevel::TwoLevelsUp),
            ("(...)photo", InterceptLevel::FromRoot),
        ];
        for (name, level) in cases {
            let c = classify(name);
            assert_eq!(c.kind, RoutingKind::InterceptingRoute, "{name}");
            assert_eq!(c.intercept_level, Some(level), "{name}");
        }
    }

    #[test]
    fn test_group_with_dot_is_not_intercepting() {
        assert_eq!(classify("(v1.2)").kind, RoutingKind::RouteGroup);
    }

    #[test]
    fn test_degenerate_names() {
        assert_eq!(classify("").kind, RoutingKind::StaticRoute);
        assert_eq!(classify("(").kind, RoutingKind::StaticRoute);
        assert_eq!(classify("[").kind, RoutingKind::StaticRoute);
        assert_eq!(classify("@").kind, RoutingKind::ParallelRoute);
        assert_eq!(classify("()").kind, RoutingKind::RouteGroup);
    }

    #[test]
    fn test_build_route_path() {
        let root = build_route_path(None, "app", &classify("app"));
        assert_eq!(root, "/");

        let about = build_route_path(Some("/"), "about", &classify("about"));
        assert_eq!(about, "/about");

        let group = build_route_path(Some("/"), "(marketing)", &classify("(marketing)"));
        assert_eq!(group, "/");

        let id = build_route_path(Some("/blog"), "[id]", &classify("[id]"));
        assert_eq!(id, "/blog/[id]");

        let all = build_route_path(Some("/docs"), "[...slug]", &classify("[...slug]"));
        assert_eq!(all, "/docs/[...slug]");

        let opt = build_route_path(Some("/shop"), "[[...slug]]", &classify("[[...slug]]"));
        assert_eq!(opt, "/shop/[[...slug]]");

        let slot = build_route_path(Some("/dash"), "@team", &classify("@team"));
        assert_eq!(slot, "/dash");
    }

    #[test]
    fn test_route_path_for_segments() {
        assert_eq!(route_path_for_segments(std::iter::empty()), "/");
        assert_eq!(
            route_path_for_segments(["(marketing)", "about"]),
            "/about"
        );
        assert_eq!(
            route_path_for_segments(["api", "users", "[id]"]),
            "/api/users/[id]"
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Property: classification is total and deterministic.
        #[test]
        fn prop_classify_total_and_deterministic(name in "\\PC{0,24}") {
            let first = classify(&name);
            let second = classify(&name);
            prop_assert!(RoutingKind::ALL.contains(&first.kind));
            prop_assert_eq!(first, second);
        }

        /// Property: routing-shaped names classify deterministically too.
        #[test]
        fn prop_classify_routing_shapes(
            name in prop_oneof![
                "\\([a-z]{1,8}\\)",
                "\\(\\.{1,3}\\)[a-z]{1,8}",
                "\\[{1,2}(\\.\\.\\.)?[a-z]{1,8}\\]{1,2}",
                "@[a-z]{1,8}",
                "_[a-z]{1,8}",
            ]
        ) {
            prop_assert_eq!(classify(&name), classify(&name));
        }

        /// Property: route paths always start with `/` and never contain `//`.
        #[test]
        fn prop_route_paths_well_formed(
            segments in prop::collection::vec(
                prop_oneof![
                    "[a-z]{1,8}",
                    "\\([a-z]{1,6}\\)",
                    "\\[[a-z]{1,6}\\]",
                    "@[a-z]{1,6}",
                    "_[a-z]{1,6}",
                ],
                0..6,
            )
        ) {
            let path = route_path_for_segments(segments.iter().map(String::as_str));
            prop_assert!(path.starts_with('/'));
            prop_assert!(!path.contains("//"));
        }
    }
}
