use image::DynamicImage;

use super::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// Drawing surface for reports. Coordinates are millimetres from the top-left corner.
pub trait Document {
    fn set_font_size(&mut self, size: f32);

    /// Text grey level, 0 (black) to 255 (white).
    fn set_text_gray(&mut self, level: u8);

    fn text(&mut self, text: &str, x: f32, y: f32, align: Align);

    fn add_page(&mut self);

    fn image(&mut self, image: &DynamicImage, x: f32, y: f32, width: f32, height: f32) -> Result<()>;

    fn page_width(&self) -> f32;

    fn page_height(&self) -> f32;

    fn finish(self) -> Result<Vec<u8>>
    where
        Self: Sized;
}
