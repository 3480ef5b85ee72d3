use clap::Parser;
use std::path::PathBuf;

use crate::catalog::DEFAULT_SHEET_ID;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Betting recap dashboard for the Notify staff sheets
#[derive(Parser, Debug, Clone)]
#[command(
    name = "notify-recap",
    about = "Month-to-month betting recap dashboard for the Notify staff sheets",
    version
)]
pub struct Settings {
    /// Staff member(s) to include (comma separated or repeated)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub staff: Vec<String>,

    /// Month(s) to include as M/YYYY, or "All" (at least 2 months or All)
    #[arg(long, num_args = 1.., value_delimiter = ',')]
    pub dates: Vec<String>,

    /// Output mode
    #[arg(long, default_value = "tui", value_parser = ["tui", "plain", "json"])]
    pub output: String,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Google Sheets workbook id holding the recap sheets
    #[arg(long, env = "RECAP_SHEET_ID", default_value = DEFAULT_SHEET_ID)]
    pub sheet_id: String,

    /// Number of sheet columns kept after the staff name (at least 6; extra columns are ignored)
    #[arg(
        long,
        default_value = "6",
        value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(6..)
    )]
    pub truncate_width: usize,

    /// Print the available staff members and date options, then exit
    #[arg(long)]
    pub list: bool,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse the process arguments and apply derived values.
    pub fn load() -> Self {
        Self::resolve(Settings::parse())
    }

    /// Same as [`load`](Self::load) with an explicit argument list.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Settings::try_parse_from(args).map(Self::resolve)
    }

    /// `--debug` overrides the log level; blank selections are dropped.
    fn resolve(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings.staff = settings
            .staff
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        settings.dates = settings
            .dates
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        settings
    }

    /// Whether output goes to the interactive terminal UI.
    pub fn is_tui(&self) -> bool {
        self.output == "tui"
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::load_from_args(["notify-recap"]).unwrap();

        assert!(settings.staff.is_empty());
        assert!(settings.dates.is_empty());
        assert_eq!(settings.output, "tui");
        assert_eq!(settings.theme, "auto");
        assert_eq!(settings.truncate_width, 6);
        assert_eq!(settings.log_level, "INFO");
        assert!(settings.log_file.is_none());
        assert!(!settings.list);
        assert!(!settings.debug);
        assert!(settings.is_tui());
    }

    #[test]
    fn test_settings_truncate_width_bounds() {
        assert!(Settings::load_from_args(["notify-recap", "--truncate-width", "3"]).is_err());
        assert!(Settings::load_from_args(["notify-recap", "--truncate-width", "x"]).is_err());
        let settings =
            Settings::load_from_args(["notify-recap", "--truncate-width", "8"]).unwrap();
        assert_eq!(settings.truncate_width, 8);
    }

    #[test]
    fn test_settings_staff_comma_separated() {
        let settings =
            Settings::load_from_args(["notify-recap", "--staff", "Caleb,Cryp Esports"]).unwrap();
        assert_eq!(settings.staff, vec!["Caleb", "Cryp Esports"]);
    }

    #[test]
    fn test_settings_staff_repeated_and_trimmed() {
        let settings = Settings::load_from_args([
            "notify-recap",
            "--staff",
            "Yous",
            "--staff",
            " Serbian ",
        ])
        .unwrap();
        assert_eq!(settings.staff, vec!["Yous", "Serbian"]);
    }

    #[test]
    fn test_settings_dates() {
        let settings =
            Settings::load_from_args(["notify-recap", "--dates", "3/2023,4/2023"]).unwrap();
        assert_eq!(settings.dates, vec!["3/2023", "4/2023"]);
    }

    #[test]
    fn test_settings_debug_overrides_log_level() {
        let settings = Settings::load_from_args(["notify-recap", "--debug"]).unwrap();
        assert_eq!(settings.log_level, "DEBUG");
    }

    #[test]
    fn test_settings_rejects_unknown_output() {
        assert!(Settings::load_from_args(["notify-recap", "--output", "html"]).is_err());
    }

    #[test]
    fn test_settings_plain_output() {
        let settings = Settings::load_from_args(["notify-recap", "--output", "plain"]).unwrap();
        assert!(!settings.is_tui());
    }

    #[test]
    fn test_settings_explicit_sheet_id() {
        let settings = Settings::load_from_args(["notify-recap", "--sheet-id", "xyz"]).unwrap();
        assert_eq!(settings.sheet_id, "xyz");
    }

    #[test]
    fn test_settings_log_file() {
        let settings =
            Settings::load_from_args(["notify-recap", "--log-file", "/tmp/recap.log"]).unwrap();
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/recap.log")));
    }
}
