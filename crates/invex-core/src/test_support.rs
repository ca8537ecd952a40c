//! Fixtures shared by the crate's unit tests.

use std::cell::{Cell, RefCell};
use std::path::{Path, PathBuf};

use image::{DynamicImage, Rgb, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream, StringFormat};

use crate::error::{OcrError, RenderError};
use crate::ocr::OcrEngine;
use crate::pdf::PageRasterizer;

/// Build a PDF whose pages carry the given lines of embedded text.
pub fn pdf_with_pages(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new(
                "Td",
                vec![50.into(), (780 - 20 * i as i64).into()],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).expect("save pdf");
    data
}

/// A one-page PDF drawing glyphs through a Type0/Identity-H font with no
/// ToUnicode map, so its text layer cannot be decoded.
pub fn cid_font_pdf() -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let descendant_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => "SimSun",
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("GB1"),
            "Supplement" => 2,
        },
    });
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => "SimSun",
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![descendant_id.into()],
    });

    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
            Operation::new("Td", vec![50.into(), 780.into()]),
            Operation::new(
                "Tj",
                vec![Object::String(
                    vec![0x4e, 0x2d, 0x65, 0x87],
                    StringFormat::Hexadecimal,
                )],
            ),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content"),
    ));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        },
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    });
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut data = Vec::new();
    doc.save_to(&mut data).expect("save pdf");
    data
}

/// Write a PDF built by [`pdf_with_pages`] to `dir/name`.
pub fn write_pdf(dir: &Path, name: &str, pages: &[&[&str]]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, pdf_with_pages(pages)).expect("write pdf");
    path
}

/// Rasterizer returning synthetic gray-gradient pages.
pub struct FakeRasterizer {
    pages: usize,
    calls: Cell<usize>,
    last_dpi: Cell<Option<u32>>,
}

impl FakeRasterizer {
    pub fn pages(pages: usize) -> Self {
        Self {
            pages,
            calls: Cell::new(0),
            last_dpi: Cell::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    pub fn last_dpi(&self) -> Option<u32> {
        self.last_dpi.get()
    }
}

impl PageRasterizer for FakeRasterizer {
    fn rasterize(&self, _pdf_path: &Path, dpi: u32) -> Result<Vec<DynamicImage>, RenderError> {
        self.calls.set(self.calls.get() + 1);
        self.last_dpi.set(Some(dpi));

        Ok((0..self.pages)
            .map(|_| {
                let page = RgbImage::from_fn(32, 8, |x, _| {
                    let v = (x * 8) as u8;
                    Rgb([v, v, v])
                });
                DynamicImage::ImageRgb8(page)
            })
            .collect())
    }
}

/// What the fake engine observed for one page.
#[derive(Debug, Clone)]
pub struct SeenPage {
    pub path: PathBuf,
    pub existed: bool,
    /// Every pixel was pure black or pure white.
    pub binary: bool,
}

/// OCR engine returning canned page texts and recording what it was given.
pub struct FakeOcr {
    texts: Vec<String>,
    fail_at: Option<usize>,
    seen: RefCell<Vec<SeenPage>>,
}

impl FakeOcr {
    pub fn returning(texts: &[&str]) -> Self {
        Self {
            texts: texts.iter().map(|t| t.to_string()).collect(),
            fail_at: None,
            seen: RefCell::new(Vec::new()),
        }
    }

    /// Fail on the call with this 0-based index.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn seen(&self) -> Vec<SeenPage> {
        self.seen.borrow().clone()
    }
}

impl OcrEngine for FakeOcr {
    fn recognize(&self, image_path: &Path) -> Result<String, OcrError> {
        let existed = image_path.exists();
        let binary = image::open(image_path)
            .map(|img| img.to_luma8().pixels().all(|p| p[0] == 0 || p[0] == 255))
            .unwrap_or(false);

        let index = {
            let mut seen = self.seen.borrow_mut();
            seen.push(SeenPage {
                path: image_path.to_path_buf(),
                existed,
                binary,
            });
            seen.len() - 1
        };

        if self.fail_at == Some(index) {
            return Err(OcrError::Recognition("fake engine failure".to_string()));
        }

        Ok(self.texts.get(index).cloned().unwrap_or_default())
    }
}
