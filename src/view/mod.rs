//! What the user sees: the view router, the result document and its PDF
//! export.

pub mod export;
pub mod orchestrator;
pub mod render;

pub use export::{
    CommandExporter, EXPORT_UNAVAILABLE_MESSAGE, ExportOptions, Exporter, export_filename,
    export_plan,
};
pub use orchestrator::{GENERATION_FAILED_MESSAGE, GenerationTicket, Orchestrator, View};
pub use render::ResultDocument;
