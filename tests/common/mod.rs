#![allow(dead_code)]

use std::{
    io::Cursor,
    path::{Path, PathBuf},
    sync::Mutex,
};

use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use monthly_budget::{
    config::ConfigManager, core::BudgetTracker, receipt::ReceiptImage, storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique data home for one test.
pub fn test_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Opens a tracker and configuration manager over `base`, as the CLI does.
pub fn open_at(base: &Path) -> (BudgetTracker<JsonFileStore>, ConfigManager) {
    let store = JsonFileStore::new(Some(base.to_path_buf())).expect("create json store");
    let config_manager = ConfigManager::with_base_dir(base.to_path_buf())
        .expect("create config manager for temp dir");
    (BudgetTracker::open(store), config_manager)
}

pub fn setup_test_env() -> (BudgetTracker<JsonFileStore>, ConfigManager, PathBuf) {
    let base = test_home();
    let (tracker, config) = open_at(&base);
    (tracker, config, base)
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([20, 120, 200]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut out, ImageOutputFormat::Png)
        .expect("encode png");
    out.into_inner()
}

pub fn png_data_url(width: u32, height: u32) -> String {
    ReceiptImage::from_bytes(png_bytes(width, height))
        .expect("png receipt")
        .to_data_url()
}
