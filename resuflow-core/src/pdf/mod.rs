//! Minimal PDF 1.7 backend: object model, content streams, file writer.

mod content;
mod object;
mod writer;

pub use object::{Dictionary, Object, ObjectId};
pub use writer::PdfWriter;
