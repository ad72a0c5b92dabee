mod audio;
mod core;
mod gui;

use eframe::egui;
use gui::PomodoroApp;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([420.0, 560.0])
            .with_title("Zen Pomodoro"),
        ..Default::default()
    };

    eframe::run_native(
        "Zen Pomodoro",
        options,
        Box::new(|cc| {
            match PomodoroApp::new(cc) {
                Ok(app) => Ok(Box::new(app)),
                Err(e) => {
                    log::error!("Failed to initialize app: {}", e);
                    std::process::exit(1);
                }
            }
        }),
    ).map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
