//! Certificate template engine.
//!
//! Wraps the low-level PDF plumbing behind the small surface the
//! composing code needs: load the template bytes, draw text at a
//! position, place the signature raster, serialize the result. The
//! template is read-only input; every generation loads a fresh document
//! and appends its own overlay content stream.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};

use super::signature::SignatureImage;
use super::GeneratorError;

/// Resource name of the embedded text font.
const FONT_RESOURCE: &str = "Fh";

/// Resource name of the signature image XObject.
const SIGNATURE_RESOURCE: &str = "ImSig";

/// A template document with its single page opened for filling.
pub struct TemplateDocument {
    doc: Document,
    page_id: ObjectId,
    page_width: f64,
    page_height: f64,
    overlay: Vec<Operation>,
}

impl TemplateDocument {
    /// Parse template bytes and locate the page to fill.
    pub fn load(bytes: &[u8]) -> Result<Self, GeneratorError> {
        let doc = Document::load_mem(bytes).map_err(GeneratorError::TemplateParse)?;
        let pages = doc.get_pages();
        let page_id = *pages.get(&1).ok_or(GeneratorError::TemplatePage)?;
        let (page_width, page_height) = page_dimensions(&doc, page_id)?;

        log::debug!(
            "Loaded certificate template: {} page(s), {}x{} pt",
            pages.len(),
            page_width,
            page_height
        );

        Ok(Self {
            doc,
            page_id,
            page_width,
            page_height,
            overlay: Vec::new(),
        })
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Queue a text draw at (x, y) with the given font size.
    pub fn draw_text(&mut self, text: &str, x: f64, y: f64, size: f64) {
        self.overlay.push(Operation::new("BT", vec![]));
        self.overlay.push(Operation::new(
            "Tf",
            vec![FONT_RESOURCE.into(), Object::Real(size as f32)],
        ));
        self.overlay.push(Operation::new(
            "Td",
            vec![Object::Real(x as f32), Object::Real(y as f32)],
        ));
        self.overlay
            .push(Operation::new("Tj", vec![Object::string_literal(text)]));
        self.overlay.push(Operation::new("ET", vec![]));
    }

    /// Queue the signature raster at (x, y) with the given rendered size.
    ///
    /// The image is registered as an RGB XObject with its alpha plane as a
    /// DeviceGray soft mask, so the page background stays visible around
    /// the pen strokes.
    pub fn draw_signature(
        &mut self,
        image: &SignatureImage,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) -> Result<(), GeneratorError> {
        let smask_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width() as i64,
                "Height" => image.height() as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            image.alpha_plane().to_vec(),
        ));

        let image_id = self.doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => image.width() as i64,
                "Height" => image.height() as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "SMask" => smask_id,
            },
            image.rgb_plane().to_vec(),
        ));

        self.register_xobject(SIGNATURE_RESOURCE, image_id)?;

        self.overlay.push(Operation::new("q", vec![]));
        self.overlay.push(Operation::new(
            "cm",
            vec![
                Object::Real(width as f32),
                Object::Real(0.0),
                Object::Real(0.0),
                Object::Real(height as f32),
                Object::Real(x as f32),
                Object::Real(y as f32),
            ],
        ));
        self.overlay
            .push(Operation::new("Do", vec![SIGNATURE_RESOURCE.into()]));
        self.overlay.push(Operation::new("Q", vec![]));

        Ok(())
    }

    /// Append the queued overlay to the page and serialize the document.
    pub fn save(mut self) -> Result<Vec<u8>, GeneratorError> {
        if !self.overlay.is_empty() {
            self.register_font()?;

            // Isolate the overlay's graphics state and force a black fill,
            // whatever state the template's own content left behind.
            let mut operations = Vec::with_capacity(self.overlay.len() + 3);
            operations.push(Operation::new("q", vec![]));
            operations.push(Operation::new("g", vec![0.into()]));
            operations.append(&mut self.overlay);
            operations.push(Operation::new("Q", vec![]));

            let content = Content { operations };
            let encoded = content.encode().map_err(GeneratorError::Compose)?;
            self.doc
                .add_page_contents(self.page_id, encoded)
                .map_err(GeneratorError::Compose)?;
        }

        let mut output = Vec::new();
        self.doc
            .save_to(&mut output)
            .map_err(|e| GeneratorError::Serialize(e.into()))?;
        Ok(output)
    }

    /// Register the Helvetica text font under the page resources.
    fn register_font(&mut self) -> Result<(), GeneratorError> {
        let font_id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        self.with_resources(|resources| {
            let fonts = ensure_subdictionary(resources, b"Font")?;
            fonts.set(FONT_RESOURCE, font_id);
            Ok(())
        })
    }

    /// Register an image XObject under the page resources.
    fn register_xobject(&mut self, name: &str, object_id: ObjectId) -> Result<(), GeneratorError> {
        let name = name.to_string();
        self.with_resources(move |resources| {
            let xobjects = ensure_subdictionary(resources, b"XObject")?;
            xobjects.set(name, object_id);
            Ok(())
        })
    }

    /// Run `apply` against the page's Resources dictionary, whether it is
    /// stored inline or behind an indirect reference.
    fn with_resources<F>(&mut self, apply: F) -> Result<(), GeneratorError>
    where
        F: FnOnce(&mut lopdf::Dictionary) -> Result<(), GeneratorError>,
    {
        let mut resources_obj = {
            let page_dict = self
                .doc
                .get_object_mut(self.page_id)
                .and_then(Object::as_dict_mut)
                .map_err(GeneratorError::Compose)?;
            page_dict
                .remove(b"Resources")
                .unwrap_or_else(|| Object::Dictionary(dictionary! {}))
        };

        match &mut resources_obj {
            Object::Reference(id) => {
                let resources = self
                    .doc
                    .get_object_mut(*id)
                    .and_then(Object::as_dict_mut)
                    .map_err(GeneratorError::Compose)?;
                apply(resources)?;
            }
            Object::Dictionary(dict) => apply(dict)?,
            _ => return Err(GeneratorError::TemplatePage),
        }

        let page_dict = self
            .doc
            .get_object_mut(self.page_id)
            .and_then(Object::as_dict_mut)
            .map_err(GeneratorError::Compose)?;
        page_dict.set("Resources", resources_obj);

        Ok(())
    }
}

/// Resolve a direct subdictionary entry, creating it when absent. An
/// indirect entry is replaced by an empty inline dictionary.
fn ensure_subdictionary<'a>(
    dict: &'a mut lopdf::Dictionary,
    key: &[u8],
) -> Result<&'a mut lopdf::Dictionary, GeneratorError> {
    let owned = dict
        .remove(key)
        .unwrap_or_else(|| Object::Dictionary(dictionary! {}));

    let sanitized = match owned {
        Object::Dictionary(inner) => Object::Dictionary(inner),
        Object::Reference(_) => Object::Dictionary(dictionary! {}),
        _ => return Err(GeneratorError::TemplatePage),
    };

    dict.set(key, sanitized);
    match dict.get_mut(key) {
        Ok(Object::Dictionary(inner)) => Ok(inner),
        _ => Err(GeneratorError::TemplatePage),
    }
}

/// Page dimensions from the MediaBox, walking up the page tree when the
/// entry lives on an ancestor node.
fn page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f64, f64), GeneratorError> {
    let mut current = Some(page_id);
    while let Some(id) = current {
        let dict = doc
            .get_object(id)
            .and_then(Object::as_dict)
            .map_err(GeneratorError::TemplateParse)?;
        if let Some((width, height)) = extract_media_box(doc, dict) {
            return Ok((width, height));
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    // A4 portrait when the template omits its MediaBox entirely.
    Ok((595.0, 842.0))
}

fn extract_media_box(doc: &Document, dict: &lopdf::Dictionary) -> Option<(f64, f64)> {
    let raw = dict.get(b"MediaBox").ok()?;
    let resolved = match raw {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let arr = resolved.as_array().ok()?;
    if arr.len() != 4 {
        return None;
    }
    let llx = obj_to_f64(&arr[0])?;
    let lly = obj_to_f64(&arr[1])?;
    let urx = obj_to_f64(&arr[2])?;
    let ury = obj_to_f64(&arr[3])?;
    Some((urx - llx, ury - lly))
}

fn obj_to_f64(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(f) => Some((*f).into()),
        _ => None,
    }
}
