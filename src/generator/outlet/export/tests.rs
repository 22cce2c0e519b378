#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};
    use tempfile::TempDir;

    use crate::generator::fallback::canned_variants;
    use crate::generator::outlet::export::{
        BUNDLE_FILENAME, ExportBuilder, archive_filename, build_archive, bundle_folders,
        project_files,
    };
    use crate::generator::stages::{CodeEntry, QaEntry};
    use crate::generator::workflow::join_variants;
    use crate::types::export::ExportOptions;
    use crate::types::variant::{Framework, StyleVariant, UIVariant};

    fn variant() -> UIVariant {
        canned_variants().remove(0)
    }

    /// Two styles named "Alpha" joined against a single code and QA entry
    fn same_named_variants() -> Vec<UIVariant> {
        let styles: Vec<StyleVariant> = serde_json::from_str(r#"[{"name": "Alpha"}, {"name": "Alpha"}]"#).unwrap();
        let code: Vec<CodeEntry> =
            serde_json::from_str(r#"[{"themeName": "Alpha", "html": "<p>a</p>"}]"#).unwrap();
        let qa: Vec<QaEntry> =
            serde_json::from_str(r#"[{"themeName": "Alpha", "qaScore": 0.9}]"#).unwrap();
        join_variants(&styles, &code, &qa)
    }

    fn archive_entries(bytes: &[u8]) -> Vec<String> {
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        archive.file_names().map(str::to_string).collect()
    }

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut contents = String::new();
        archive.by_name(name).unwrap().read_to_string(&mut contents).unwrap();
        contents
    }

    fn paths(options: &ExportOptions) -> Vec<String> {
        project_files(&variant(), options)
            .into_iter()
            .map(|f| f.path)
            .collect()
    }

    #[test]
    fn test_default_vanilla_files() {
        assert_eq!(
            paths(&ExportOptions::default()),
            vec![
                "index.html",
                "styles.css",
                "script.js",
                "package.json",
                "README.md",
                "vercel.json",
                ".gitignore",
                ".eslintrc.json",
                "prettier.config.js"
            ]
        );
    }

    #[test]
    fn test_minimal_files() {
        let options = ExportOptions {
            include_package_json: false,
            include_deployment: false,
            include_dev: false,
            ..ExportOptions::default()
        };
        assert_eq!(
            paths(&options),
            vec!["index.html", "styles.css", "script.js", "README.md"]
        );
    }

    #[test]
    fn test_framework_scaffolding() {
        let react = paths(&ExportOptions {
            framework: Framework::React,
            ..ExportOptions::default()
        });
        assert!(react.contains(&"src/App.jsx".to_string()));
        assert!(react.contains(&"src/index.js".to_string()));
        assert!(react.contains(&"src/App.css".to_string()));
        assert_eq!(react.iter().filter(|p| *p == "package.json").count(), 1);

        let vue = paths(&ExportOptions {
            framework: Framework::Vue,
            ..ExportOptions::default()
        });
        assert!(vue.contains(&"src/App.vue".to_string()));
        assert!(vue.contains(&"vite.config.js".to_string()));

        let next = paths(&ExportOptions {
            framework: Framework::Next,
            ..ExportOptions::default()
        });
        for expected in ["pages/index.js", "pages/_app.js", "styles/globals.css", "next.config.js"] {
            assert!(next.contains(&expected.to_string()), "missing {}", expected);
        }
    }

    #[test]
    fn test_framework_package_json_replaces_generic_one() {
        let files = project_files(
            &variant(),
            &ExportOptions {
                framework: Framework::React,
                ..ExportOptions::default()
            },
        );
        let package = files.iter().find(|f| f.path == "package.json").unwrap();
        assert!(package.contents.contains("react-scripts"));
        // Position of the generic file is kept
        assert_eq!(files[3].path, "package.json");
    }

    #[test]
    fn test_index_html_wraps_body_and_honors_title() {
        let files = project_files(
            &variant(),
            &ExportOptions {
                title: Some("My \"Site\"".to_string()),
                ..ExportOptions::default()
            },
        );
        let index = &files[0].contents;
        assert!(index.contains("<title>My &quot;Site&quot;</title>"));
        assert!(index.contains("<h1>Welcome to the Future</h1>"));
        assert!(index.contains("<link rel=\"stylesheet\" href=\"styles.css\">"));
        assert_eq!(index.matches("<body>").count(), 1);
    }

    #[test]
    fn test_build_archive_keeps_order() {
        let bytes = build_archive(vec![
            ("b.txt".to_string(), "second"),
            ("a/c.txt".to_string(), "first"),
        ])
        .unwrap();
        assert_eq!(archive_entries(&bytes), vec!["b.txt", "a/c.txt"]);
        assert_eq!(read_entry(&bytes, "a/c.txt"), "first");
    }

    #[tokio::test]
    async fn test_export_variant_writes_archive() {
        let temp_dir = TempDir::new().unwrap();
        let builder = ExportBuilder::new(temp_dir.path().join("exports"));

        let result = builder
            .export_variant(&variant(), &ExportOptions::default())
            .await;

        assert!(result.success);
        assert_eq!(result.filename, "retro-futurism-variant-1-export.zip");
        assert_eq!(
            result.download_url,
            "/downloads/retro-futurism-variant-1-export.zip"
        );
        for required in ["index.html", "styles.css", "script.js"] {
            assert!(result.files.contains(&required.to_string()));
        }

        let path = builder.archive_path(&result.filename).unwrap();
        let bytes = std::fs::read(path).unwrap();
        assert_eq!(bytes.len() as u64, result.size);
        assert_eq!(archive_entries(&bytes), result.files);
        assert_eq!(read_entry(&bytes, "styles.css"), variant().code.css);
    }

    #[tokio::test]
    async fn test_export_all_creates_one_folder_per_variant() {
        let temp_dir = TempDir::new().unwrap();
        let builder = ExportBuilder::new(temp_dir.path());
        let variants = canned_variants();

        let result = builder.export_all(&variants).await;
        assert!(result.success);
        assert_eq!(result.filename, BUNDLE_FILENAME);
        assert_eq!(result.files.len(), 4);

        let bytes = std::fs::read(temp_dir.path().join(BUNDLE_FILENAME)).unwrap();
        let entries = archive_entries(&bytes);
        assert_eq!(entries.len(), 16);
        assert!(entries.contains(&"glass-aurora/index.html".to_string()));
    }

    #[tokio::test]
    async fn test_export_all_without_variants_fails() {
        let temp_dir = TempDir::new().unwrap();
        let result = ExportBuilder::new(temp_dir.path()).export_all(&[]).await;
        assert!(!result.success);
        assert!(result.error.unwrap().contains("nothing to export"));
    }

    #[tokio::test]
    async fn test_export_into_unwritable_location_reports_failure() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();

        let result = ExportBuilder::new(blocker.join("exports"))
            .export_variant(&variant(), &ExportOptions::default())
            .await;
        assert!(!result.success);
        assert!(result.error.unwrap().starts_with("Export failed"));
    }

    #[test]
    fn test_archive_path_rejects_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let builder = ExportBuilder::new(temp_dir.path());
        assert!(builder.archive_path("../secret.zip").is_none());
        assert!(builder.archive_path("missing.zip").is_none());
        assert!(builder.archive_path("notes.txt").is_none());
    }

    #[test]
    fn test_same_named_variants_get_distinct_names() {
        let variants = same_named_variants();
        assert_eq!(variants.len(), 2);
        assert_eq!(variants[0].name, variants[1].name);

        assert_eq!(archive_filename(&variants[0]), "alpha-variant-1-export.zip");
        assert_eq!(archive_filename(&variants[1]), "alpha-variant-2-export.zip");
        assert_eq!(bundle_folders(&variants), vec!["alpha", "alpha-variant-2"]);
    }

    #[test]
    fn test_bundle_folders_fall_back_to_counter() {
        let mut variants = same_named_variants();
        variants.push(variants[1].clone());
        assert_eq!(
            bundle_folders(&variants),
            vec!["alpha", "alpha-variant-2", "alpha-2"]
        );
    }

    #[tokio::test]
    async fn test_export_all_with_same_named_variants() {
        let temp_dir = TempDir::new().unwrap();
        let builder = ExportBuilder::new(temp_dir.path());

        let result = builder.export_all(&same_named_variants()).await;
        assert!(result.success, "{:?}", result.error);

        let bytes = std::fs::read(temp_dir.path().join(BUNDLE_FILENAME)).unwrap();
        let entries = archive_entries(&bytes);
        assert_eq!(entries.len(), 8);
        assert!(entries.contains(&"alpha/index.html".to_string()));
        assert!(entries.contains(&"alpha-variant-2/index.html".to_string()));
    }

    #[tokio::test]
    async fn test_export_variant_with_same_named_variants() {
        let temp_dir = TempDir::new().unwrap();
        let builder = ExportBuilder::new(temp_dir.path());
        let variants = same_named_variants();

        let first = builder
            .export_variant(&variants[0], &ExportOptions::default())
            .await;
        let second = builder
            .export_variant(&variants[1], &ExportOptions::default())
            .await;

        assert!(first.success && second.success);
        assert_ne!(first.filename, second.filename);
        assert!(builder.archive_path(&first.filename).is_some());
        assert!(builder.archive_path(&second.filename).is_some());
    }
}
