//! OpenAPI 3.x import: document types, `$ref` resolution, example synthesis
//! and the importer itself.

pub mod importer;
pub mod resolver;
pub mod synthesizer;
pub mod types;

pub use importer::OpenApiImporter;
pub use synthesizer::ExampleSynthesizer;
