mod bootstrap;

use anyhow::{Context, Result};
use dashboard_core::settings::Settings;
use dashboard_runtime::context::DataContext;
use dashboard_runtime::controller::DashboardController;
use dashboard_ui::app::App;
use dashboard_ui::export;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::ensure_directories()?;
    let log_file = settings
        .log_file
        .clone()
        .unwrap_or_else(bootstrap::default_log_file);
    bootstrap::setup_logging(&settings.log_level, &log_file)?;

    tracing::info!("Bike Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Mode: {}, Theme: {}, Day file: {}, Hour file: {}",
        settings.mode,
        settings.theme,
        settings.day_file.display(),
        settings.hour_file.display()
    );

    let mode = settings.analysis_mode()?;

    // Both tables must load before any view is shown.
    let context = match DataContext::initialize(&settings.day_file, &settings.hour_file) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error: {e}");
            return Err(e).context("failed to load the bike-sharing datasets");
        }
    };

    let controller =
        DashboardController::new(context, mode, settings.start_date, settings.end_date);

    if let Some(path) = &settings.export {
        let snapshot = controller.snapshot();
        if let Some(notice) = &snapshot.notice {
            eprintln!("Warning: {notice}");
        }
        export::export(&snapshot.analysis, path)
            .with_context(|| format!("failed to export to {}", path.display()))?;
        println!("Exported {} view to {}", snapshot.mode(), path.display());
        return Ok(());
    }

    let app = App::new(&settings.theme, controller);

    // The TUI exits on 'q' / Ctrl+C itself; the signal branch covers signals
    // delivered outside raw mode.
    tokio::select! {
        result = app.run() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
        }
    }

    tracing::info!("Bike Dashboard stopped");
    Ok(())
}
