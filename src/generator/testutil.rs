//! Shared fixtures for generator tests.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{ImageBuffer, Rgba};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object};
use std::io::Cursor;

/// Build a blank single-page template document in memory.
pub fn blank_template(width: i64, height: i64) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// Encode an opaque PNG of the given dimensions.
pub fn signature_png(width: u32, height: u32) -> Vec<u8> {
    let img = ImageBuffer::from_pixel(width, height, Rgba([20u8, 20, 60, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .unwrap();
    bytes
}

/// The same PNG as a `data:` URI, the way a drawing pad exports it.
pub fn signature_data_uri(width: u32, height: u32) -> String {
    format!(
        "data:image/png;base64,{}",
        BASE64.encode(signature_png(width, height))
    )
}

/// Decode the first page's content stream operations of a generated PDF.
pub fn page_operations(pdf: &[u8]) -> Vec<Operation> {
    let doc = Document::load_mem(pdf).unwrap();
    let page_id = *doc.get_pages().get(&1).unwrap();
    let content = doc.get_page_content(page_id).unwrap();
    Content::decode(&content).unwrap().operations
}

/// A drawn text together with the position and size it was drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnText {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

/// Reconstruct every text draw from the page's content operations.
pub fn drawn_texts(pdf: &[u8]) -> Vec<DrawnText> {
    let mut texts = Vec::new();
    let mut size = 0.0;
    let mut x = 0.0;
    let mut y = 0.0;

    for op in page_operations(pdf) {
        match op.operator.as_str() {
            "Tf" => {
                size = operand_to_f64(&op.operands[1]);
            }
            "Td" => {
                x = operand_to_f64(&op.operands[0]);
                y = operand_to_f64(&op.operands[1]);
            }
            "Tj" => {
                if let Ok(bytes) = op.operands[0].as_str() {
                    texts.push(DrawnText {
                        text: String::from_utf8_lossy(bytes).into_owned(),
                        x,
                        y,
                        size,
                    });
                }
            }
            _ => {}
        }
    }

    texts
}

/// Find the signature placement: the `cm` matrix applied before the
/// signature XObject is invoked. Returns (x, y, width, height).
pub fn signature_placement(pdf: &[u8]) -> Option<(f64, f64, f64, f64)> {
    let mut last_cm: Option<(f64, f64, f64, f64)> = None;
    for op in page_operations(pdf) {
        match op.operator.as_str() {
            "cm" => {
                last_cm = Some((
                    operand_to_f64(&op.operands[4]),
                    operand_to_f64(&op.operands[5]),
                    operand_to_f64(&op.operands[0]),
                    operand_to_f64(&op.operands[3]),
                ));
            }
            "Do" => {
                if op.operands[0].as_name_str().map(|n| n == "ImSig").unwrap_or(false) {
                    return last_cm;
                }
            }
            _ => {}
        }
    }
    None
}

fn operand_to_f64(obj: &Object) -> f64 {
    match obj {
        Object::Integer(i) => *i as f64,
        Object::Real(f) => (*f).into(),
        _ => 0.0,
    }
}
