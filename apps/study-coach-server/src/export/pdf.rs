//! PDF serialization of laid-out pages
//!
//! Builds the object graph with `lopdf`: one shared resources dictionary
//! holding the two Helvetica faces, and one Flate-compressed content stream
//! per page. Nothing time- or randomness-dependent is written, so the same
//! pages always serialize to the same bytes.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use super::encoding::encode_win_ansi;
use super::layout::{FontSpec, Page, PageGeometry, Typeface};
use super::ExportError;

const PDF_VERSION: &str = "1.7";

/// Serialize `pages` into a complete PDF file
pub fn write_pdf(pages: &[Page], geometry: &PageGeometry) -> Result<Vec<u8>, ExportError> {
    let mut document = Document::with_version(PDF_VERSION);
    let pages_id = document.new_object_id();

    let mut fonts = Dictionary::new();
    for typeface in Typeface::ALL {
        let font_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => typeface.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(typeface.resource_name(), font_id);
    }
    let resources_id = document.add_object(dictionary! { "Font" => fonts });

    let width: Object = (geometry.width as f32).into();
    let height: Object = (geometry.height as f32).into();

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page).encode()?;
        let content_id = document.add_object(Stream::new(
            dictionary! { "Filter" => "FlateDecode" },
            deflate(&content)?,
        ));

        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                width.clone(),
                height.clone(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Text operators for one page. Blank lines occupy space but draw nothing.
fn page_content(page: &Page) -> Content {
    let mut operations = vec![Operation::new("BT", vec![])];
    let mut active: Option<FontSpec> = None;

    for line in page.lines.iter().filter(|line| !line.text.is_empty()) {
        if active != Some(line.font) {
            operations.push(Operation::new(
                "Tf",
                vec![
                    line.font.typeface.resource_name().into(),
                    (line.font.size as f32).into(),
                ],
            ));
            active = Some(line.font);
        }
        operations.push(Operation::new(
            "Tm",
            vec![
                Object::Integer(1),
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(1),
                (line.x as f32).into(),
                (line.y as f32).into(),
            ],
        ));
        operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(encode_win_ansi(&line.text))],
        ));
    }

    operations.push(Operation::new("ET", vec![]));
    Content { operations }
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}
