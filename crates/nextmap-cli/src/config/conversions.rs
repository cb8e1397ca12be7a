use nextmap_graph::{AnalyzerConfig, WalkerConfig};
use nextmap_layout::{ExpandedSet, ForceLayoutConfig, Size};

use crate::config::NextmapConfig;

impl NextmapConfig {
    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            walker: WalkerConfig {
                app_dir: self.app_dir.clone(),
                ignore_patterns: self.ignore_patterns.clone(),
                use_ignore_file: self.use_ignore_file,
                ..WalkerConfig::default()
            },
            alias_prefix: self.alias_prefix.clone(),
            analyze_dependencies: self.analyze_dependencies,
        }
    }

    pub fn force_layout_config(&self) -> ForceLayoutConfig {
        ForceLayoutConfig {
            viewport: Size::new(self.viewport_width, self.viewport_height),
            ticks: self.ticks,
            ..ForceLayoutConfig::default()
        }
    }

    /// Configured expansion, or just the root when none is set.
    pub fn expanded_set(&self) -> ExpandedSet {
        if self.expanded.is_empty() {
            ExpandedSet::root()
        } else {
            self.expanded.iter().cloned().collect()
        }
    }
}
