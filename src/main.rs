// src/main.rs
mod utils;
mod extractors;
mod source;
mod storage;

use std::path::PathBuf;
use clap::Parser;
use utils::AppError;
use extractors::section::{ExtractedSection, SectionExtractor};
use source::{reader, VersionSource, DEFAULT_PROPERTY_KEY};
use storage::StorageManager;

/// Command Line Interface for extracting one version's notes from a changelog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Changelog file to scan
    #[arg(short, long, default_value = "CHANGELOG.md")]
    file: PathBuf,

    /// Version marker to look for in "##" headings (overrides --properties)
    #[arg(short = 'm', long)]
    version_marker: Option<String>,

    /// Properties file to read the version from (e.g. gradle.properties)
    #[arg(short, long)]
    properties: Option<PathBuf>,

    /// Key holding the version in the properties file
    #[arg(long, default_value = DEFAULT_PROPERTY_KEY)]
    property_key: String,

    /// Directory to write the release notes and metadata to (optional)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Exit with an error when no notes are found for the version
    #[arg(long)]
    fail_on_empty: bool,
}

impl Args {
    /// Picks the version source: an explicit marker wins over a properties file.
    fn version_source(&self) -> Result<VersionSource, AppError> {
        match (&self.version_marker, &self.properties) {
            (Some(marker), _) => Ok(VersionSource::Literal(marker.clone())),
            (None, Some(path)) => Ok(VersionSource::Property {
                path: path.clone(),
                key: self.property_key.clone(),
            }),
            (None, None) => Err(AppError::Config(
                "Either --version-marker or --properties must be given".to_string(),
            )),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Extract (and optionally persist) the notes
    let section = run(&args).await?;

    // 4. Hand the notes to the pipeline
    println!("{}", section.content);

    tracing::info!("Processing finished.");
    Ok(())
}

/// Resolves the version, extracts its section and saves it when an output
/// directory is set. An empty section is only an error with `--fail-on-empty`.
async fn run(args: &Args) -> Result<ExtractedSection, AppError> {
    // 1. Resolve the version marker
    let version = args.version_source()?.resolve().await?;
    if version.is_empty() {
        tracing::warn!("Version marker is empty; every heading will match");
    }
    tracing::info!("Looking for changelog entry of version {}", version);

    // 2. Read the changelog
    let lines = reader::read_lines(&args.file).await?;

    // 3. Extract the section
    let section = SectionExtractor::new()
        .extract(&lines, &version)
        .with_source(&args.file);

    match &section.heading {
        Some(heading) => tracing::debug!("Matched heading: {}", heading),
        None => tracing::warn!("No heading containing '{}' found in {}", version, args.file.display()),
    }
    tracing::info!("Changelog:\n{}", section.content);

    if section.is_empty() && args.fail_on_empty {
        return Err(AppError::EmptySection(version));
    }

    // 4. Optionally persist notes and metadata
    if let Some(output_dir) = &args.output_dir {
        let storage = StorageManager::new(output_dir)?;

        let notes_path = storage.save_notes(&section)?;
        tracing::info!("Saved release notes to: {}", notes_path.display());

        let meta_path = storage.save_metadata(&section)?;
        tracing::info!("Saved notes metadata to: {}", meta_path.display());
    }

    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_overrides_properties() {
        let args = Args::parse_from([
            "changelog_extractor", "-m", "1.2.0", "--properties", "gradle.properties",
        ]);
        assert_eq!(
            args.version_source().unwrap(),
            VersionSource::Literal("1.2.0".to_string())
        );
    }

    #[test]
    fn test_properties_source_uses_default_key() {
        let args = Args::parse_from(["changelog_extractor", "--properties", "gradle.properties"]);
        assert_eq!(args.file, PathBuf::from("CHANGELOG.md"));
        assert_eq!(
            args.version_source().unwrap(),
            VersionSource::Property {
                path: PathBuf::from("gradle.properties"),
                key: "plugin_version".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_version_source_is_config_error() {
        let args = Args::parse_from(["changelog_extractor", "-f", "NOTES.md"]);
        assert!(matches!(args.version_source(), Err(AppError::Config(_))));
    }

    const CHANGELOG: &str = "# Changelog\n\n## 1.2.0\n\nFixed a bug.\nAdded a feature.\n\n## 1.1.0\nOlder notes.\n";

    fn write_changelog(dir: &std::path::Path) -> String {
        let path = dir.join("CHANGELOG.md");
        std::fs::write(&path, CHANGELOG).unwrap();
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_run_extracts_section() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_changelog(dir.path());

        let args = Args::parse_from(["changelog_extractor", "-f", file.as_str(), "-m", "1.2.0"]);
        let section = tokio_test::block_on(run(&args)).unwrap();

        assert_eq!(section.content, "Fixed a bug.\nAdded a feature.");
        assert_eq!(section.heading.as_deref(), Some("## 1.2.0"));
        assert_eq!(section.source_path, Some(PathBuf::from(&file)));
    }

    #[test]
    fn test_run_empty_section_is_ok_without_flag() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_changelog(dir.path());

        let args = Args::parse_from(["changelog_extractor", "-f", file.as_str(), "-m", "9.9.9"]);
        let section = tokio_test::block_on(run(&args)).unwrap();

        assert!(section.is_empty());
        assert!(section.heading.is_none());
    }

    #[test]
    fn test_run_fail_on_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_changelog(dir.path());

        let args = Args::parse_from([
            "changelog_extractor", "-f", file.as_str(), "-m", "9.9.9", "--fail-on-empty",
        ]);
        let err = tokio_test::block_on(run(&args)).unwrap_err();
        assert!(matches!(err, AppError::EmptySection(ref v) if v == "9.9.9"));

        // A section that has content is unaffected by the flag
        let args = Args::parse_from([
            "changelog_extractor", "-f", file.as_str(), "-m", "1.1.0", "--fail-on-empty",
        ]);
        assert_eq!(tokio_test::block_on(run(&args)).unwrap().content, "Older notes.");
    }

    #[test]
    fn test_run_reads_version_from_properties() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_changelog(dir.path());
        let props = dir.path().join("gradle.properties");
        std::fs::write(&props, "plugin_version=1.1.0\n").unwrap();

        let args = Args::parse_from([
            "changelog_extractor", "-f", file.as_str(), "--properties", props.to_str().unwrap(),
        ]);
        assert_eq!(tokio_test::block_on(run(&args)).unwrap().content, "Older notes.");
    }

    #[test]
    fn test_run_saves_to_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_changelog(dir.path());
        let out = dir.path().join("build").join("notes");

        let args = Args::parse_from([
            "changelog_extractor", "-f", file.as_str(), "-m", "1.2.0", "-o", out.to_str().unwrap(),
        ]);
        tokio_test::block_on(run(&args)).unwrap();

        let notes = std::fs::read_to_string(out.join("RELEASE_NOTES_1.2.0.md")).unwrap();
        assert_eq!(notes, "Fixed a bug.\nAdded a feature.");

        let meta = std::fs::read_to_string(out.join("RELEASE_NOTES_1.2.0_meta.json")).unwrap();
        let json: serde_json::Value = serde_json::from_str(&meta).unwrap();
        assert_eq!(json["heading"], "## 1.2.0");
    }

    #[test]
    fn test_run_storage_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_changelog(dir.path());

        // The output "directory" is a regular file, so writing into it fails
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();

        let args = Args::parse_from([
            "changelog_extractor", "-f", file.as_str(), "-m", "1.2.0", "-o", blocker.to_str().unwrap(),
        ]);
        let err = tokio_test::block_on(run(&args)).unwrap_err();
        assert!(matches!(err, AppError::Storage(_)));
    }

    #[test]
    fn test_run_missing_changelog_is_source_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("CHANGELOG.md");

        let args = Args::parse_from([
            "changelog_extractor", "-f", missing.to_str().unwrap(), "-m", "1.2.0",
        ]);
        let err = tokio_test::block_on(run(&args)).unwrap_err();
        assert!(matches!(err, AppError::Source(_)));
    }
}
