//! Export collection use case.

use std::path::Path;

use waypost_domain::RequestCollection;

use crate::ports::{CollectionExporter, ExportError, FileSystem};

/// Writes a collection to disk as Postman Collection v2.1 JSON.
pub struct ExportCollectionToFile<E, F> {
    exporter: E,
    fs: F,
}

impl<E: CollectionExporter, F: FileSystem> ExportCollectionToFile<E, F> {
    /// Creates a new `ExportCollectionToFile` use case.
    #[must_use]
    pub const fn new(exporter: E, fs: F) -> Self {
        Self { exporter, fs }
    }

    /// Renders the collection and writes it to `path`.
    ///
    /// # Errors
    /// Returns `ExportError::Io` if the file cannot be written.
    pub async fn execute(
        &self,
        collection: &RequestCollection,
        path: &Path,
    ) -> Result<(), ExportError> {
        let json = self.exporter.export_postman_v2_1(collection)?;
        self.fs.write_file(path, json.as_bytes()).await?;

        tracing::info!(
            path = %path.display(),
            name = %collection.name,
            requests = collection.request_count(),
            "exported collection"
        );
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ports::FileSystemError;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;

    struct NameExporter;

    impl CollectionExporter for NameExporter {
        fn export_postman_v2_1(
            &self,
            collection: &RequestCollection,
        ) -> Result<String, ExportError> {
            Ok(format!("{{\"name\":\"{}\"}}", collection.name))
        }
    }

    #[derive(Default)]
    struct RecordingFileSystem {
        written: Mutex<HashMap<PathBuf, Vec<u8>>>,
        read_only: bool,
    }

    impl FileSystem for RecordingFileSystem {
        async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
            Err(FileSystemError::NotFound(path.to_path_buf()))
        }

        async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
            if self.read_only {
                return Err(FileSystemError::PermissionDenied(path.to_path_buf()));
            }
            self.written
                .lock()
                .expect("Lock poisoned")
                .insert(path.to_path_buf(), contents.to_vec());
            Ok(())
        }

        async fn exists(&self, path: &Path) -> bool {
            self.written.lock().expect("Lock poisoned").contains_key(path)
        }

        async fn file_size(&self, path: &Path) -> Result<u64, FileSystemError> {
            Err(FileSystemError::NotFound(path.to_path_buf()))
        }
    }

    #[tokio::test]
    async fn test_export_writes_rendered_json() {
        let use_case = ExportCollectionToFile::new(NameExporter, RecordingFileSystem::default());
        let collection = RequestCollection::new("Demo");
        let path = Path::new("/out/demo.postman_collection.json");

        use_case.execute(&collection, path).await.expect("Should export");

        let written = use_case.fs.written.lock().expect("Lock poisoned");
        assert_eq!(written.get(path).unwrap(), br#"{"name":"Demo"}"#);
    }

    #[tokio::test]
    async fn test_export_reports_io_failure() {
        let fs = RecordingFileSystem {
            read_only: true,
            ..RecordingFileSystem::default()
        };
        let use_case = ExportCollectionToFile::new(NameExporter, fs);
        let result = use_case
            .execute(&RequestCollection::new("Demo"), Path::new("/ro/x.json"))
            .await;
        assert!(matches!(
            result,
            Err(ExportError::Io(FileSystemError::PermissionDenied(_)))
        ));
    }
}
