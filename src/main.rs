use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use nutriplan::app::App;
use nutriplan::config::AppConfig;
use nutriplan::generation::{GeminiTransport, PlanGenerator};
use nutriplan::terminal;
use nutriplan::view::{CommandExporter, Exporter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize tracing; keep the guard alive so the file writer flushes.
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _log_guard = match config.prepare_log_dir()? {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "nutriplan.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    };

    eprintln!("🥗 NutriPlan Pro v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Model: {}", config.generation.model);
    if config.generation.api_key.is_none() {
        eprintln!("   Warning: GEMINI_API_KEY not set, plan generation will fail");
    }
    eprintln!("   PDF: {} → {}", config.export.command, config.export.output_dir.display());
    eprintln!("   Type ? for help, q to quit.\n");

    let transport = Arc::new(GeminiTransport::new(&config.gemini_base_url));
    let generator = Arc::new(PlanGenerator::new(config.generation.clone(), transport));
    let exporter: Arc<dyn Exporter> = Arc::new(CommandExporter::new(&config.export));

    let (app, events) = App::new(generator, Some(exporter));
    terminal::run(app, events).await?;

    tracing::info!("Shutting down");
    Ok(())
}
