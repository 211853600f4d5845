//! Import collection use cases.

use std::path::Path;
use std::sync::Arc;

use waypost_domain::{FormatTag, RequestCollection};

use crate::config::ImportConfig;
use crate::ports::{CollectionImporter, CollectionStore, FileSystem, FileSystemError, ImportError};

/// Result of a successful import.
#[derive(Debug, Clone)]
pub struct ImportOutput {
    /// The imported (and, when a store is configured, persisted) collection.
    pub collection: RequestCollection,
    /// The format the text was detected as.
    pub format: FormatTag,
}

/// Runs detection and conversion on the blocking pool.
async fn convert<I>(importer: Arc<I>, content: String) -> Result<ImportOutput, ImportError>
where
    I: CollectionImporter + 'static,
{
    tokio::task::spawn_blocking(move || {
        let format = importer.detect_format(&content);
        tracing::debug!(%format, "detected collection format");
        importer
            .import_format(&content, format)
            .map(|collection| ImportOutput { collection, format })
    })
    .await
    .map_err(|e| ImportError::Task(e.to_string()))?
}

async fn persist(
    store: Option<&Arc<dyn CollectionStore>>,
    output: ImportOutput,
) -> Result<ImportOutput, ImportError> {
    match store {
        Some(store) => {
            let collection = store.save(output.collection).await?;
            Ok(ImportOutput {
                collection,
                format: output.format,
            })
        }
        None => Ok(output),
    }
}

/// Imports a collection from in-memory text.
pub struct ImportCollectionFromText<I> {
    importer: Arc<I>,
    store: Option<Arc<dyn CollectionStore>>,
}

impl<I: CollectionImporter + 'static> ImportCollectionFromText<I> {
    /// Creates a new `ImportCollectionFromText` use case.
    #[must_use]
    pub fn new(importer: Arc<I>) -> Self {
        Self {
            importer,
            store: None,
        }
    }

    /// Persists every imported collection through the given store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn CollectionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Detects the format of the text and converts it.
    ///
    /// # Errors
    /// Returns an [`ImportError`] when conversion or persistence fails.
    pub async fn execute(&self, content: impl Into<String>) -> Result<ImportOutput, ImportError> {
        let output = convert(Arc::clone(&self.importer), content.into()).await?;
        persist(self.store.as_ref(), output).await
    }
}

/// Imports a collection from a file on disk.
pub struct ImportCollectionFromFile<I, F> {
    importer: Arc<I>,
    fs: F,
    config: ImportConfig,
    store: Option<Arc<dyn CollectionStore>>,
}

impl<I: CollectionImporter + 'static, F: FileSystem> ImportCollectionFromFile<I, F> {
    /// Creates a new `ImportCollectionFromFile` use case.
    #[must_use]
    pub fn new(importer: Arc<I>, fs: F, config: ImportConfig) -> Self {
        Self {
            importer,
            fs,
            config,
            store: None,
        }
    }

    /// Persists every imported collection through the given store.
    #[must_use]
    pub fn with_store(mut self, store: Arc<dyn CollectionStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Reads the file, enforcing the size limit before it is loaded.
    async fn read_checked(&self, path: &Path) -> Result<String, ImportError> {
        if !self.fs.exists(path).await {
            return Err(FileSystemError::NotFound(path.to_path_buf()).into());
        }

        let size = self.fs.file_size(path).await?;
        if size > self.config.max_file_size {
            return Err(ImportError::FileTooLarge {
                size,
                max: self.config.max_file_size,
            });
        }

        Ok(self.fs.read_file_string(path).await?)
    }

    /// Reads the file and classifies it without converting.
    ///
    /// # Errors
    /// - `ImportError::Io` if the file is missing or unreadable
    /// - `ImportError::FileTooLarge` if it exceeds the configured limit
    pub async fn detect(&self, path: &Path) -> Result<FormatTag, ImportError> {
        let content = self.read_checked(path).await?;
        Ok(self.importer.detect_format(&content))
    }

    /// Reads, detects and converts the file.
    ///
    /// The size limit is checked before the file is read into memory.
    ///
    /// # Errors
    /// - `ImportError::Io` if the file is missing or unreadable
    /// - `ImportError::FileTooLarge` if it exceeds the configured limit
    /// - any conversion or persistence error
    pub async fn execute(&self, path: &Path) -> Result<ImportOutput, ImportError> {
        let content = self.read_checked(path).await?;
        let output = convert(Arc::clone(&self.importer), content).await?;
        let output = persist(self.store.as_ref(), output).await?;

        tracing::info!(
            path = %path.display(),
            format = %output.format,
            name = %output.collection.name,
            requests = output.collection.request_count(),
            "imported collection"
        );
        Ok(output)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::significant_drop_tightening
)]
mod tests {
    use super::*;
    use crate::ports::StoreError;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Names the collection after the trimmed text; "bad" fails.
    #[derive(Default)]
    struct MockImporter {
        detections: AtomicUsize,
    }

    impl CollectionImporter for MockImporter {
        fn detect_format(&self, content: &str) -> FormatTag {
            self.detections.fetch_add(1, Ordering::SeqCst);
            if content.contains("openapi") {
                FormatTag::OpenApi
            } else {
                FormatTag::PostmanV2_1
            }
        }

        fn import_format(
            &self,
            content: &str,
            format: FormatTag,
        ) -> Result<RequestCollection, ImportError> {
            if content.trim() == "bad" {
                return Err(ImportError::UnknownFormat);
            }
            let mut collection = RequestCollection::new(content.trim());
            collection.description = format.to_string();
            Ok(collection)
        }
    }

    #[derive(Default)]
    struct MockFileSystem {
        files: Mutex<HashMap<PathBuf, String>>,
    }

    impl MockFileSystem {
        fn with_file(path: &str, content: &str) -> Self {
            let fs = Self::default();
            fs.files
                .lock()
                .expect("Lock poisoned")
                .insert(PathBuf::from(path), content.to_string());
            fs
        }
    }

    impl FileSystem for MockFileSystem {
        async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
            let files = self.files.lock().expect("Lock poisoned");
            files
                .get(path)
                .cloned()
                .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
        }

        async fn write_file(&self, path: &Path, contents: &[u8]) -> Result<(), FileSystemError> {
            let mut files = self.files.lock().expect("Lock poisoned");
            files.insert(
                path.to_path_buf(),
                String::from_utf8_lossy(contents).into_owned(),
            );
            Ok(())
        }

        async fn exists(&self, path: &Path) -> bool {
            self.files.lock().expect("Lock poisoned").contains_key(path)
        }

        async fn file_size(&self, path: &Path) -> Result<u64, FileSystemError> {
            let files = self.files.lock().expect("Lock poisoned");
            files
                .get(path)
                .map(|content| content.len() as u64)
                .ok_or_else(|| FileSystemError::NotFound(path.to_path_buf()))
        }
    }

    #[derive(Default)]
    struct MockStore {
        saved: Mutex<Vec<RequestCollection>>,
    }

    #[async_trait]
    impl CollectionStore for MockStore {
        async fn save(
            &self,
            collection: RequestCollection,
        ) -> Result<RequestCollection, StoreError> {
            self.saved
                .lock()
                .expect("Lock poisoned")
                .push(collection.clone());
            Ok(collection)
        }

        async fn load(&self, id: &str) -> Result<RequestCollection, StoreError> {
            let saved = self.saved.lock().expect("Lock poisoned");
            saved
                .iter()
                .find(|c| c.id == id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(id.to_string()))
        }

        async fn list(&self) -> Result<Vec<(String, String)>, StoreError> {
            let saved = self.saved.lock().expect("Lock poisoned");
            Ok(saved.iter().map(|c| (c.id.clone(), c.name.clone())).collect())
        }
    }

    #[tokio::test]
    async fn test_import_from_text() {
        let use_case = ImportCollectionFromText::new(Arc::new(MockImporter::default()));
        let output = use_case.execute("My API").await.expect("Should import");
        assert_eq!(output.collection.name, "My API");
        assert_eq!(output.format, FormatTag::PostmanV2_1);
    }

    #[tokio::test]
    async fn test_import_from_text_propagates_failure() {
        let use_case = ImportCollectionFromText::new(Arc::new(MockImporter::default()));
        let result = use_case.execute("bad").await;
        assert!(matches!(result, Err(ImportError::UnknownFormat)));
    }

    #[tokio::test]
    async fn test_import_from_file() {
        let fs = MockFileSystem::with_file("/in/api.yaml", "openapi spec");
        let use_case =
            ImportCollectionFromFile::new(Arc::new(MockImporter::default()), fs, ImportConfig::default());

        let output = use_case
            .execute(Path::new("/in/api.yaml"))
            .await
            .expect("Should import");
        assert_eq!(output.format, FormatTag::OpenApi);
        assert_eq!(output.collection.name, "openapi spec");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let use_case = ImportCollectionFromFile::new(
            Arc::new(MockImporter::default()),
            MockFileSystem::default(),
            ImportConfig::default(),
        );
        let result = use_case.execute(Path::new("/nope.json")).await;
        assert!(matches!(
            result,
            Err(ImportError::Io(FileSystemError::NotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_file_too_large_is_rejected_before_reading() {
        let fs = MockFileSystem::with_file("/big.json", "0123456789");
        let config = ImportConfig::default().with_max_file_size(5);
        let use_case = ImportCollectionFromFile::new(Arc::new(MockImporter::default()), fs, config);

        match use_case.execute(Path::new("/big.json")).await {
            Err(ImportError::FileTooLarge { size, max }) => {
                assert_eq!(size, 10);
                assert_eq!(max, 5);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_import_persists_through_store() {
        let store = Arc::new(MockStore::default());
        let fs = MockFileSystem::with_file("/c.json", "Stored");
        let use_case =
            ImportCollectionFromFile::new(Arc::new(MockImporter::default()), fs, ImportConfig::default())
                .with_store(store.clone());

        let output = use_case
            .execute(Path::new("/c.json"))
            .await
            .expect("Should import");

        let listed = store.list().await.expect("Should list");
        assert_eq!(listed, vec![(output.collection.id.clone(), "Stored".to_string())]);
    }

    #[tokio::test]
    async fn test_format_is_detected_once_per_import() {
        let importer = Arc::new(MockImporter::default());
        let use_case = ImportCollectionFromText::new(Arc::clone(&importer));

        let output = use_case.execute("openapi doc").await.expect("Should import");

        assert_eq!(importer.detections.load(Ordering::SeqCst), 1);
        assert_eq!(output.format, FormatTag::OpenApi);
        assert_eq!(output.collection.description, "OpenAPI 3.x");
    }

    #[tokio::test]
    async fn test_detect_file_shares_the_size_limit() {
        let fs = MockFileSystem::with_file("/api.yaml", "openapi spec");
        let importer = Arc::new(MockImporter::default());
        let use_case =
            ImportCollectionFromFile::new(Arc::clone(&importer), fs, ImportConfig::default());
        let format = use_case
            .detect(Path::new("/api.yaml"))
            .await
            .expect("Should detect");
        assert_eq!(format, FormatTag::OpenApi);
        assert_eq!(importer.detections.load(Ordering::SeqCst), 1);

        let fs = MockFileSystem::with_file("/big.json", "0123456789");
        let config = ImportConfig::default().with_max_file_size(5);
        let use_case = ImportCollectionFromFile::new(Arc::new(MockImporter::default()), fs, config);
        assert!(matches!(
            use_case.detect(Path::new("/big.json")).await,
            Err(ImportError::FileTooLarge { size: 10, max: 5 })
        ));
        assert!(matches!(
            use_case.detect(Path::new("/missing.json")).await,
            Err(ImportError::Io(FileSystemError::NotFound(_)))
        ));
    }
}
