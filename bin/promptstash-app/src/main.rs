//! promptstash-app – desktop entry point.
//!
//! Startup order:
//! 1. Initialise tracing from `RUST_LOG` / `PROMPTSTASH_LOG`.
//! 2. Open the egui window and hand control to [`app::PromptstashApp`],
//!    which owns the tokio runtime and the backend worker.

mod app;

fn main() -> eframe::Result {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(
            std::env::var("PROMPTSTASH_LOG").unwrap_or_else(|_| "info".to_owned()),
        )
    });
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([480.0, 640.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Prompt Save",
        options,
        Box::new(|cc| Ok(Box::new(app::PromptstashApp::new(cc)?))),
    )
}
