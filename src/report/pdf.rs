use image::{DynamicImage, GenericImageView};
use printpdf::{
    BuiltinFont, Color, Greyscale, Image, ImageTransform, IndirectFontRef, Mm,
    PdfDocument as PrintPdfDocument, PdfDocumentReference, PdfLayerIndex, PdfLayerReference,
    PdfPageIndex,
};

use super::document::{Align, Document};
use super::{ReportError, Result};

const A4_WIDTH: f32 = 210.0;
const A4_HEIGHT: f32 = 297.0;
const LAYER_NAME: &str = "Layer 1";
const IMAGE_DPI: f32 = 300.0;
const MM_PER_INCH: f32 = 25.4;
const MM_PER_POINT: f32 = MM_PER_INCH / 72.0;
/// Mean Helvetica glyph advance relative to the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

/// A4 document rendered with printpdf's built-in Helvetica.
pub struct PdfDocument {
    doc: PdfDocumentReference,
    font: IndirectFontRef,
    page: PdfPageIndex,
    layer: PdfLayerIndex,
    font_size: f32,
    gray: u8,
}

impl PdfDocument {
    pub fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PrintPdfDocument::new(title, Mm(A4_WIDTH), Mm(A4_HEIGHT), LAYER_NAME);
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| ReportError::Render(err.to_string()))?;
        Ok(Self {
            doc,
            font,
            page,
            layer,
            font_size: 16.0,
            gray: 0,
        })
    }

    fn current_layer(&self) -> PdfLayerReference {
        self.doc.get_page(self.page).get_layer(self.layer)
    }

    fn estimate_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.font_size * AVG_GLYPH_WIDTH * MM_PER_POINT
    }
}

impl Document for PdfDocument {
    fn set_font_size(&mut self, size: f32) {
        self.font_size = size;
    }

    fn set_text_gray(&mut self, level: u8) {
        self.gray = level;
    }

    fn text(&mut self, text: &str, x: f32, y: f32, align: Align) {
        let x = match align {
            Align::Left => x,
            Align::Center => x - self.estimate_width(text) / 2.0,
        };
        let layer = self.current_layer();
        layer.set_fill_color(Color::Greyscale(Greyscale::new(
            f32::from(self.gray) / 255.0,
            None,
        )));
        layer.use_text(text, self.font_size, Mm(x), Mm(A4_HEIGHT - y), &self.font);
    }

    fn add_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(A4_WIDTH), Mm(A4_HEIGHT), LAYER_NAME);
        self.page = page;
        self.layer = layer;
    }

    fn image(&mut self, image: &DynamicImage, x: f32, y: f32, width: f32, height: f32) -> Result<()> {
        let (px_width, px_height) = image.dimensions();
        if px_width == 0 || px_height == 0 {
            return Err(ReportError::Render("receipt image has no pixels".into()));
        }
        let natural_width = px_width as f32 * MM_PER_INCH / IMAGE_DPI;
        let natural_height = px_height as f32 * MM_PER_INCH / IMAGE_DPI;
        // Alpha channels are not embedded reliably; flatten to RGB first.
        let flattened = DynamicImage::ImageRgb8(image.to_rgb8());
        Image::from_dynamic_image(&flattened).add_to_layer(
            self.current_layer(),
            ImageTransform {
                translate_x: Some(Mm(x)),
                translate_y: Some(Mm(A4_HEIGHT - y - height)),
                scale_x: Some(width / natural_width),
                scale_y: Some(height / natural_height),
                dpi: Some(IMAGE_DPI),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn page_width(&self) -> f32 {
        A4_WIDTH
    }

    fn page_height(&self) -> f32 {
        A4_HEIGHT
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|err| ReportError::Render(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn produces_a_pdf_with_text_and_image() {
        let mut doc = PdfDocument::new("test").unwrap();
        doc.set_font_size(22.0);
        doc.text("Detailed Report", 105.0, 15.0, Align::Center);
        doc.add_page();
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 4, Rgb([10, 20, 30])));
        doc.image(&image, 15.0, 45.0, 180.0, 90.0).unwrap();
        let bytes = doc.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn text_width_estimate_scales_with_font_size() {
        let mut doc = PdfDocument::new("test").unwrap();
        doc.set_font_size(12.0);
        let width = doc.estimate_width("abcd");
        assert!((width - 4.0 * 12.0 * 0.5 * MM_PER_POINT).abs() < 1e-4);
    }
}
