//! PDF 1.7 serialization of laid-out pages.
//!
//! Fixed object layout: catalog is object 1, the page tree object 2, each
//! page takes a page/content object pair from object 3 upward, and the
//! document info dictionary follows the last content stream.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::font::Font;
use crate::layout::geometry::MM_TO_PT;
use crate::layout::{PageContent, PageGeometry};
use crate::pdf::content::build_content_stream;
use crate::pdf::object::{Dictionary, Object, ObjectId};

pub struct PdfWriter {
    geometry: PageGeometry,
    buffer: Vec<u8>,
    xref_positions: HashMap<ObjectId, u64>,
}

impl PdfWriter {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            buffer: Vec::new(),
            xref_positions: HashMap::new(),
        }
    }

    /// Serialize the pages into a complete PDF file and return its bytes.
    pub fn write_document(&mut self, pages: &[PageContent]) -> Result<Vec<u8>> {
        self.write_header();

        let catalog_id = self.write_catalog();
        self.write_pages(pages)?;
        let info_id = self.write_info(pages.len());

        let xref_position = self.buffer.len() as u64;
        self.write_xref();
        self.write_trailer(catalog_id, info_id, xref_position);

        Ok(std::mem::take(&mut self.buffer))
    }

    fn write_header(&mut self) {
        self.write_bytes(b"%PDF-1.7\n");
        // Binary comment so transports treat the file as binary
        self.write_bytes(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n']);
    }

    fn write_catalog(&mut self) -> ObjectId {
        let catalog_id = ObjectId::new(1, 0);
        let pages_id = ObjectId::new(2, 0);

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name("Catalog".to_string()));
        catalog.set("Pages", pages_id);

        self.write_object(catalog_id, Object::Dictionary(catalog));
        catalog_id
    }

    fn write_pages(&mut self, pages: &[PageContent]) -> Result<()> {
        let pages_id = ObjectId::new(2, 0);
        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name("Pages".to_string()));
        pages_dict.set("Count", pages.len() as i64);

        let next_id = 3;
        let kids: Vec<Object> = (0..pages.len())
            .map(|i| Object::Reference(ObjectId::new(next_id + i as u32 * 2, 0)))
            .collect();
        pages_dict.set("Kids", kids);

        self.write_object(pages_id, Object::Dictionary(pages_dict));

        for (i, page) in pages.iter().enumerate() {
            let page_id = ObjectId::new(next_id + i as u32 * 2, 0);
            let content_id = ObjectId::new(next_id + i as u32 * 2 + 1, 0);

            self.write_page(page_id, pages_id, content_id);
            self.write_page_content(content_id, page)?;
        }

        Ok(())
    }

    fn write_page(&mut self, page_id: ObjectId, parent_id: ObjectId, content_id: ObjectId) {
        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name("Page".to_string()));
        page_dict.set("Parent", parent_id);
        page_dict.set(
            "MediaBox",
            vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.geometry.page_width * MM_TO_PT),
                Object::Real(self.geometry.page_height * MM_TO_PT),
            ],
        );
        page_dict.set("Contents", content_id);

        let mut font_dict = Dictionary::new();
        for font in Font::all() {
            let mut font_entry = Dictionary::new();
            font_entry.set("Type", Object::Name("Font".to_string()));
            font_entry.set("Subtype", Object::Name("Type1".to_string()));
            font_entry.set("BaseFont", Object::Name(font.pdf_name().to_string()));
            font_entry.set("Encoding", Object::Name("WinAnsiEncoding".to_string()));
            font_dict.set(font.resource_name(), font_entry);
        }

        let mut resources = Dictionary::new();
        resources.set("Font", font_dict);
        page_dict.set("Resources", resources);

        self.write_object(page_id, Object::Dictionary(page_dict));
    }

    fn write_page_content(&mut self, content_id: ObjectId, page: &PageContent) -> Result<()> {
        let content = build_content_stream(page, &self.geometry);

        #[cfg(feature = "compression")]
        let (content, filter) = (compress_flate(&content)?, Some("FlateDecode"));
        #[cfg(not(feature = "compression"))]
        let filter: Option<&str> = None;

        let mut stream_dict = Dictionary::new();
        stream_dict.set("Length", content.len() as i64);
        if let Some(filter) = filter {
            stream_dict.set("Filter", Object::Name(filter.to_string()));
        }

        self.write_object(content_id, Object::Stream(stream_dict, content));
        Ok(())
    }

    fn write_info(&mut self, page_count: usize) -> ObjectId {
        // Pages occupy objects 3..3 + 2 * page_count; info takes the next slot
        let info_id = ObjectId::new(3 + 2 * page_count as u32, 0);
        let mut info_dict = Dictionary::new();
        info_dict.set(
            "Producer",
            Object::String(format!("resuflow {}", env!("CARGO_PKG_VERSION"))),
        );
        info_dict.set(
            "CreationDate",
            Object::String(format_pdf_date(Utc::now())),
        );

        self.write_object(info_id, Object::Dictionary(info_dict));
        info_id
    }

    fn write_object(&mut self, id: ObjectId, object: Object) {
        self.xref_positions.insert(id, self.buffer.len() as u64);

        let header = format!("{} {} obj\n", id.number(), id.generation());
        self.write_bytes(header.as_bytes());
        self.write_object_value(&object);
        self.write_bytes(b"\nendobj\n");
    }

    fn write_object_value(&mut self, object: &Object) {
        match object {
            Object::Integer(i) => self.write_bytes(i.to_string().as_bytes()),
            Object::Real(f) => self.write_bytes(
                format!("{f:.6}")
                    .trim_end_matches('0')
                    .trim_end_matches('.')
                    .as_bytes(),
            ),
            Object::String(s) => {
                self.write_bytes(b"(");
                self.write_bytes(s.as_bytes());
                self.write_bytes(b")");
            }
            Object::Name(n) => {
                self.write_bytes(b"/");
                self.write_bytes(n.as_bytes());
            }
            Object::Array(arr) => {
                self.write_bytes(b"[");
                for (i, obj) in arr.iter().enumerate() {
                    if i > 0 {
                        self.write_bytes(b" ");
                    }
                    self.write_object_value(obj);
                }
                self.write_bytes(b"]");
            }
            Object::Dictionary(dict) => self.write_dictionary(dict),
            Object::Stream(dict, data) => {
                self.write_dictionary(dict);
                self.write_bytes(b"\nstream\n");
                self.write_bytes(data);
                self.write_bytes(b"\nendstream");
            }
            Object::Reference(id) => {
                let ref_str = format!("{} {} R", id.number(), id.generation());
                self.write_bytes(ref_str.as_bytes());
            }
        }
    }

    fn write_dictionary(&mut self, dict: &Dictionary) {
        self.write_bytes(b"<<");
        for (key, value) in dict.entries() {
            self.write_bytes(b"\n/");
            self.write_bytes(key.as_bytes());
            self.write_bytes(b" ");
            self.write_object_value(value);
        }
        self.write_bytes(b"\n>>");
    }

    fn write_xref(&mut self) {
        self.write_bytes(b"xref\n");

        let mut entries: Vec<_> = self
            .xref_positions
            .iter()
            .map(|(id, pos)| (*id, *pos))
            .collect();
        entries.sort_by_key(|(id, _)| id.number());

        let max_obj_num = entries.iter().map(|(id, _)| id.number()).max().unwrap_or(0);

        // One subsection covering 0..=max, gaps written as free entries
        self.write_bytes(b"0 ");
        self.write_bytes((max_obj_num + 1).to_string().as_bytes());
        self.write_bytes(b"\n");
        self.write_bytes(b"0000000000 65535 f \n");

        for obj_num in 1..=max_obj_num {
            if let Some((_, position)) = entries.iter().find(|(id, _)| id.number() == obj_num) {
                let entry = format!("{position:010} {:05} n \n", 0);
                self.write_bytes(entry.as_bytes());
            } else {
                self.write_bytes(b"0000000000 00000 f \n");
            }
        }
    }

    fn write_trailer(&mut self, catalog_id: ObjectId, info_id: ObjectId, xref_position: u64) {
        let max_obj_num = self
            .xref_positions
            .keys()
            .map(|id| id.number())
            .max()
            .unwrap_or(0);

        let mut trailer = Dictionary::new();
        trailer.set("Size", (max_obj_num + 1) as i64);
        trailer.set("Root", catalog_id);
        trailer.set("Info", info_id);

        self.write_bytes(b"trailer\n");
        self.write_dictionary(&trailer);
        self.write_bytes(b"\nstartxref\n");
        self.write_bytes(xref_position.to_string().as_bytes());
        self.write_bytes(b"\n%%EOF\n");
    }

    fn write_bytes(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }
}

#[cfg(feature = "compression")]
fn compress_flate(data: &[u8]) -> Result<Vec<u8>> {
    use crate::error::ExportError;
    use flate2::write::ZlibEncoder;
    use flate2::Compression;
    use std::io::Write;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| ExportError::CompressionError(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| ExportError::CompressionError(e.to_string()))
}

/// Format a date as a PDF date string (D:YYYYMMDDHHmmSS+00'00).
fn format_pdf_date(date: DateTime<Utc>) -> String {
    format!("D:{}+00'00", date.format("%Y%m%d%H%M%S"))
}
