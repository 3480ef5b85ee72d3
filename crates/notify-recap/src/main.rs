mod bootstrap;

use std::process::ExitCode;

use anyhow::Result;
use chrono::Local;
use recap_core::catalog::SourceCatalog;
use recap_core::settings::Settings;
use recap_core::time_utils::bucket_catalog;
use recap_data::analysis::{run_dashboard, DashboardResult, Selection};
use recap_data::source::SheetsFetcher;
use recap_ui::app::App;
use recap_ui::plain_view;

fn main() -> Result<ExitCode> {
    let settings = Settings::load();

    // The alternate screen must not receive log lines.
    let log_file = match (&settings.log_file, settings.is_tui()) {
        (Some(path), _) => Some(path.clone()),
        (None, true) => {
            bootstrap::ensure_directories()?;
            Some(bootstrap::default_log_file())
        }
        (None, false) => None,
    };
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("Notify Recap v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Output: {}, Theme: {}, Staff: {:?}, Dates: {:?}",
        settings.output,
        settings.theme,
        settings.staff,
        settings.dates
    );

    let catalog = SourceCatalog::default();

    if settings.list {
        print_catalog(&catalog);
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = load_dashboard(&settings, &catalog);

    match (outcome, settings.output.as_str()) {
        (Ok(result), "json") => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        (Ok(result), "plain") => {
            print!("{}", plain_view::render_report(&result));
        }
        (Ok(result), _) => {
            App::new(&settings.theme).run_dashboard(&result)?;
        }
        (Err(err), output) => {
            tracing::error!("Dashboard run failed ({:?}): {}", err.category(), err);
            let message = err.user_message();
            if output == "tui" {
                App::new(&settings.theme).run_error(&message)?;
            } else {
                eprintln!("{}", message);
            }
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn load_dashboard(
    settings: &Settings,
    catalog: &SourceCatalog,
) -> recap_core::error::Result<DashboardResult> {
    let fetcher = SheetsFetcher::new(settings.sheet_id.clone())?;
    let selection = Selection::new(settings.staff.clone(), settings.dates.clone());
    run_dashboard(&fetcher, catalog, &selection, settings.truncate_width)
}

fn print_catalog(catalog: &SourceCatalog) {
    println!("Staff:");
    for name in catalog.names() {
        println!("  {}", name);
    }
    println!("Dates:");
    for option in bucket_catalog(Local::now().date_naive()) {
        println!("  {}", option);
    }
}
