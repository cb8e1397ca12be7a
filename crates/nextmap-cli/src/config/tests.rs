#[cfg(test)]
mod tests {
    use crate::config::{ConfigOverrides, NextmapConfig};
    use crate::error::{CliError, ConfigError};
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn clear_env() {
        for key in [
            "NEXTMAP_APP_DIR",
            "NEXTMAP_TICKS",
            "NEXTMAP_VIEWPORT_WIDTH",
        ] {
            // SAFETY: tests touching the environment are serialized.
            unsafe { std::env::remove_var(key) };
        }
    }

    #[test]
    #[serial]
    fn test_defaults_without_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let config = NextmapConfig::load(dir.path(), None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, NextmapConfig::default());
        assert_eq!(config.app_dir, "app");
        assert_eq!(config.alias_prefix, "@/");
        assert_eq!(config.max_file_size, 1024 * 1024);
    }

    #[test]
    #[serial]
    fn test_toml_file_in_root() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("nextmap.config.toml"),
            "appDir = \"src/app\"\nignorePatterns = [\"generated\"]\nticks = 120\n",
        )
        .unwrap();

        let config = NextmapConfig::load(dir.path(), None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config.app_dir, "src/app");
        assert_eq!(config.ignore_patterns, vec!["generated"]);
        assert_eq!(config.ticks, 120);
        assert_eq!(config.viewport_width, 1920.0);
    }

    #[test]
    #[serial]
    fn test_json_file_via_explicit_path() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{ "aliasPrefix": "~/", "viewportWidth": 800 }"#).unwrap();

        let config =
            NextmapConfig::load(dir.path(), Some(&path), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.alias_prefix, "~/");
        assert_eq!(config.viewport_width, 800.0);
    }

    #[test]
    #[serial]
    fn test_missing_explicit_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        let err = NextmapConfig::load(dir.path(), Some(&path), &ConfigOverrides::default())
            .unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    #[serial]
    fn test_unknown_field_rejected() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nextmap.config.toml"), "appdir = \"x\"\n").unwrap();
        let err =
            NextmapConfig::load(dir.path(), None, &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Load(_))));
    }

    #[test]
    #[serial]
    fn test_priority_cli_over_env_over_file() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("nextmap.config.toml"),
            "appDir = \"from-file\"\nticks = 10\nviewportWidth = 500\n",
        )
        .unwrap();
        // SAFETY: serialized with the other environment tests.
        unsafe {
            std::env::set_var("NEXTMAP_APP_DIR", "from-env");
            std::env::set_var("NEXTMAP_TICKS", "20");
        }

        let cli = ConfigOverrides {
            app_dir: Some("from-cli".to_string()),
            ..ConfigOverrides::default()
        };
        let config = NextmapConfig::load(dir.path(), None, &cli).unwrap();
        clear_env();

        assert_eq!(config.app_dir, "from-cli");
        assert_eq!(config.ticks, 20);
        assert_eq!(config.viewport_width, 500.0);
    }

    #[test]
    #[serial]
    fn test_validation_errors() {
        clear_env();
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("nextmap.config.toml"), "ticks = 0\n").unwrap();
        let err =
            NextmapConfig::load(dir.path(), None, &ConfigOverrides::default()).unwrap_err();
        match err {
            CliError::Config(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, "ticks"),
            other => panic!("unexpected error: {other}"),
        }

        let config = NextmapConfig {
            app_dir: " ".to_string(),
            ..NextmapConfig::default()
        };
        assert!(config.validate().is_err());

        let config = NextmapConfig {
            viewport_height: -1.0,
            ..NextmapConfig::default()
        };
        assert!(config.validate().is_err());

        let config = NextmapConfig {
            app_dir: "../outside".to_string(),
            ..NextmapConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_conversions() {
        let config = NextmapConfig {
            app_dir: "src/app".to_string(),
            analyze_dependencies: true,
            viewport_width: 1000.0,
            ticks: 50,
            ..NextmapConfig::default()
        };
        let analyzer = config.analyzer_config();
        assert_eq!(analyzer.walker.app_dir, "src/app");
        assert!(analyzer.analyze_dependencies);

        let force = config.force_layout_config();
        assert_eq!(force.viewport.width, 1000.0);
        assert_eq!(force.viewport.height, 1080.0);
        assert_eq!(force.ticks, 50);

        assert!(config.expanded_set().contains("root"));
        assert_eq!(config.expanded_set().len(), 1);

        let config = NextmapConfig {
            expanded: vec!["root".to_string(), "root-app".to_string()],
            ..NextmapConfig::default()
        };
        assert!(config.expanded_set().contains("root-app"));
    }
}
