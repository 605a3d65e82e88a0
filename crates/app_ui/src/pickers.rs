//! Native file picker wrappers
//!
//! Cancellation is a `None`, never an error: declining a picker must not
//! surface a failure notification.

use std::path::PathBuf;

const IMAGE_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "webp", "bmp", "heic", "mp4", "mov",
];

/// Pick a directory to hold a library
pub fn pick_library_folder(title: &str) -> Option<PathBuf> {
    let picked = rfd::FileDialog::new().set_title(title).pick_folder();
    if picked.is_none() {
        tracing::debug!("Folder picker dismissed");
    }
    picked
}

/// Pick photo/video files to import
pub fn pick_import_files() -> Option<Vec<PathBuf>> {
    let picked = rfd::FileDialog::new()
        .set_title("Import into library")
        .add_filter("Photos & videos", IMAGE_EXTENSIONS)
        .pick_files();
    if picked.is_none() {
        tracing::debug!("Import picker dismissed");
    }
    picked
}
