use crate::core::aggregate::StatsView;
use crate::export::{ExportFormat, ExportTarget};
use clap::{Parser, Subcommand};

/// Command-line interface definition for gymstats
/// Attendance analytics and churn-risk reports over a SQLite snapshot
#[derive(Parser)]
#[command(
    name = "gymstats",
    version = env!("CARGO_PKG_VERSION"),
    about = "Gym attendance analytics: hourly/weekly/monthly buckets and churn-risk verdicts from a SQLite snapshot",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Evaluate reports as of this date (YYYY-MM-DD) instead of today
    #[arg(global = true, long = "now", value_name = "DATE")]
    pub now: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Import members, check-ins and holidays from CSV files
    Import {
        #[arg(long, value_name = "FILE", help = "Members CSV")]
        members: Option<String>,

        #[arg(long, value_name = "FILE", help = "Check-ins CSV")]
        events: Option<String>,

        #[arg(long, value_name = "FILE", help = "Holidays CSV")]
        holidays: Option<String>,
    },

    /// Attendance buckets with gender breakdown
    Stats {
        #[arg(value_enum, default_value = "hourly")]
        view: StatsView,

        #[arg(long, value_name = "YYYY-MM", help = "Month for the daily and weekly views")]
        month: Option<String>,
    },

    /// Hour-by-hour share of check-ins for a week or a whole month
    Hours {
        #[arg(long, value_name = "YYYY-MM", conflicts_with = "from")]
        month: Option<String>,

        #[arg(
            long,
            value_name = "N",
            help = "Week of the month (1-based); defaults to the week containing --now"
        )]
        week: Option<usize>,

        #[arg(long = "whole-month", conflicts_with_all = ["week", "from"], help = "Cover the whole month")]
        whole_month: bool,

        #[arg(
            long,
            value_name = "YYYY-MM-DD",
            conflicts_with = "week",
            help = "Free 7-day window starting at this date"
        )]
        from: Option<String>,
    },

    /// Weekly totals with business days and averages
    Weeks {
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },

    /// Churn-risk verdicts
    Risk {
        #[arg(long, help = "Show every member, not only those at risk")]
        all: bool,

        #[arg(long, help = "List members by days since their last visit")]
        absence: bool,
    },

    /// Active and expired members by gender
    Members,

    /// Monthly attendance grid (first check-in hour per day)
    Grid {
        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,
    },

    /// Export buckets, verdicts or daily counts
    Export {
        #[arg(value_enum)]
        target: ExportTarget,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, value_enum, default_value = "hourly", help = "View for bucket exports")]
        view: StatsView,

        #[arg(long, value_name = "YYYY-MM")]
        month: Option<String>,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Daily export period: YYYY, YYYY-MM, YYYY-MM-DD, a span joined by ':' or 'all'"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
