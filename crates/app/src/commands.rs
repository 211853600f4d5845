use std::path::Path;
use std::sync::Arc;

use waypost_application::{
    ExportCollectionToFile, FormatDescriptor, ImportCollectionFromFile, ImportConfig, ImportError,
    ImportOutput, supported_export_formats, supported_import_formats,
};
use waypost_domain::FormatTag;
use waypost_infrastructure::{
    InMemoryCollectionStore, InterchangeImporter, PostmanV21Exporter, TokioFileSystem,
};

/// Anything a subcommand can fail with.
pub type CommandError = Box<dyn std::error::Error + Send + Sync>;

/// Reads `input` (subject to the size limit) and classifies it.
pub async fn detect(input: &Path, config: ImportConfig) -> Result<FormatTag, ImportError> {
    let importer = Arc::new(InterchangeImporter::new(&config));
    ImportCollectionFromFile::new(importer, TokioFileSystem::new(), config)
        .detect(input)
        .await
}

/// Imports `input` into an in-memory store.
pub async fn import(input: &Path, config: ImportConfig) -> Result<ImportOutput, ImportError> {
    let importer = Arc::new(InterchangeImporter::new(&config));
    ImportCollectionFromFile::new(importer, TokioFileSystem::new(), config)
        .with_store(Arc::new(InMemoryCollectionStore::new()))
        .execute(input)
        .await
}

/// Imports `input` and writes it to `output` as Postman v2.1.
pub async fn convert(
    input: &Path,
    output: &Path,
    config: ImportConfig,
) -> Result<ImportOutput, CommandError> {
    let imported = import(input, config).await?;
    ExportCollectionToFile::new(PostmanV21Exporter::new(), TokioFileSystem::new())
        .execute(&imported.collection, output)
        .await?;
    Ok(imported)
}

/// One-screen summary of an import.
pub fn summary(output: &ImportOutput) -> String {
    let collection = &output.collection;
    [
        format!("Name:      {}", collection.name),
        format!("Format:    {}", output.format),
        format!("Folders:   {}", collection.folder_count()),
        format!("Requests:  {}", collection.request_count()),
        format!("Variables: {}", collection.variables.len()),
    ]
    .join("\n")
}

fn format_line(format: &FormatDescriptor) -> String {
    format!(
        "  {:<26} .{:<14} {}\n",
        format.name,
        format.extensions.join(", ."),
        format.description
    )
}

/// Lists the supported formats.
pub fn formats() -> String {
    let mut text = String::from("Import:\n");
    text.extend(supported_import_formats().iter().map(format_line));
    text.push_str("Export:\n");
    text.extend(supported_export_formats().iter().map(format_line));
    text
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    const OPENAPI: &str = "openapi: 3.0.3
info:
  title: Pets
servers:
  - url: https://pets.example.com
paths:
  /pets/{petId}:
    get:
      tags: [pets]
      summary: Get pet
      parameters:
        - name: petId
          in: path
          required: true
          schema:
            type: integer
";

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[tokio::test]
    async fn test_detect() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "pets.yaml", OPENAPI);
        let format = detect(&path, ImportConfig::default()).await.unwrap();
        assert_eq!(format, FormatTag::OpenApi);
    }

    #[tokio::test]
    async fn test_detect_respects_size_limit() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "pets.yaml", OPENAPI);
        let config = ImportConfig::default().with_max_file_size(8);
        assert!(matches!(
            detect(&path, config).await,
            Err(ImportError::FileTooLarge { max: 8, .. })
        ));
    }

    #[tokio::test]
    async fn test_import_summary() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "pets.yaml", OPENAPI);
        let output = import(&path, ImportConfig::default()).await.unwrap();

        let text = summary(&output);
        assert!(text.contains("Name:      Pets"));
        assert!(text.contains("Folders:   1"));
        assert!(text.contains("Requests:  1"));
        assert!(text.contains("Variables: 1"));
    }

    #[tokio::test]
    async fn test_convert_writes_postman() {
        let dir = TempDir::new().unwrap();
        let input = write(&dir, "pets.yaml", OPENAPI);
        let output = dir.path().join("out/pets.postman_collection.json");

        convert(&input, &output, ImportConfig::default()).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(
            written["info"]["schema"],
            "https://schema.getpostman.com/json/collection/v2.1.0/collection.json"
        );
        assert_eq!(written["item"][0]["name"], "pets");
        assert_eq!(
            written["item"][0]["item"][0]["request"]["url"]["raw"],
            "{{baseUrl}}/pets/{{petId}}"
        );
    }

    #[test]
    fn test_formats_lists_both_directions() {
        let text = formats();
        assert!(text.contains("OpenAPI"));
        assert!(text.contains("Postman Collection v2.1"));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.first(), Some(&"Import:"));
        assert_eq!(
            lines.len(),
            2 + supported_import_formats().len() + supported_export_formats().len()
        );
        assert!(lines.contains(&"Export:"));
    }

    #[tokio::test]
    async fn test_summary_lines() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "pets.yaml", OPENAPI);
        let output = import(&path, ImportConfig::default()).await.unwrap();

        assert_eq!(
            summary(&output),
            "Name:      Pets\nFormat:    OpenAPI 3.x\nFolders:   1\nRequests:  1\nVariables: 1"
        );
    }

    #[tokio::test]
    async fn test_detect_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = detect(&dir.path().join("absent.json"), ImportConfig::default()).await;
        assert!(matches!(
            result,
            Err(ImportError::Io(waypost_application::FileSystemError::NotFound(_)))
        ));
    }
}
