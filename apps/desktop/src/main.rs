use desktop::App;
use tracing_subscriber::EnvFilter;

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };
    if let Err(err) = eframe::run_native(
        "Universal Scanner",
        options,
        Box::new(|_cc| Ok(Box::new(App::new()))),
    ) {
        tracing::error!(%err, "event loop terminated with an error");
    }
}
