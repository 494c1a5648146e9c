use clap::Parser;
use obj_viewer::cli::Cli;
use obj_viewer::config::{ModelSource, ViewerConfig};
use obj_viewer::geometry::Primitive;
use obj_viewer::scene::RenderMode;
use obj_viewer::theme::ThemePreference;
use std::path::PathBuf;

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = ViewerConfig::from_json("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
    }

    #[test]
    fn test_partial_nested_override() {
        let config = ViewerConfig::from_json(
            r#"{ "grid": { "divisions": 10 }, "material": { "roughness": 0.8 } }"#,
        )
        .unwrap();
        assert_eq!(config.grid.divisions, 10);
        assert_eq!(config.grid.size, 100.0);
        assert_eq!(config.material.roughness, 0.8);
        assert_eq!(config.material.metalness, 0.9);
    }

    #[test]
    fn test_enums_parse_lowercase() {
        let config = ViewerConfig::from_json(
            r#"{ "render_mode": "points", "theme": "dark", "primitive": "torus" }"#,
        )
        .unwrap();
        assert_eq!(config.render_mode, RenderMode::Points);
        assert_eq!(config.theme, ThemePreference::Dark);
        assert_eq!(config.source(), ModelSource::Primitive(Primitive::Torus));
    }

    #[test]
    fn test_cli_flags_parse() {
        let cli = Cli::try_parse_from([
            "obj-viewer",
            "--render-mode",
            "points",
            "--theme",
            "light",
            "--frame-model",
            "--no-ui",
            "part.obj",
        ])
        .unwrap();
        assert_eq!(cli.model, Some(PathBuf::from("part.obj")));
        assert_eq!(cli.render_mode, Some(RenderMode::Points));
        assert_eq!(cli.theme, Some(ThemePreference::Light));
        assert!(cli.frame_model);
        assert!(cli.no_ui);
    }

    #[test]
    fn test_model_and_primitive_conflict() {
        let result = Cli::try_parse_from(["obj-viewer", "--primitive", "cube", "part.obj"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config =
            ViewerConfig::from_json(r#"{ "primitive": "sphere", "show_ui": true }"#).unwrap();
        let cli = Cli::try_parse_from(["obj-viewer", "--no-ui", "part.obj"]).unwrap();
        config.apply_cli(&cli);

        assert!(!config.show_ui);
        assert_eq!(config.source(), ModelSource::File(PathBuf::from("part.obj")));
    }

    #[test]
    fn test_resolve_reports_missing_config_file() {
        let cli = Cli {
            config: Some(PathBuf::from("does/not/exist.json")),
            ..Default::default()
        };
        let err = ViewerConfig::resolve(&cli).unwrap_err();
        assert!(format!("{:#}", err).contains("exist.json"));
    }
}
