//! Application entry point for the zone grid viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod engine;
mod viewer;

use viewer::Viewer;

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the default grid is invalid or eframe fails to create the
///   native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions::default();

    eframe::run_native(
        "Zone Grid",
        options,
        Box::new(|_cc| {
            let viewer = Viewer::new()?;
            Ok(Box::new(viewer))
        }),
    )
}
