use crate::cli::commands::{month_or_now, open_snapshot, print_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::{Core, HourPeriod};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::header;
use crate::utils::date::parse_date;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, now: NaiveDate) -> AppResult<()> {
    if let Commands::Hours {
        month,
        week,
        whole_month,
        from,
    } = cmd
    {
        // 1) which days: free window, explicit week, whole month or the current week
        let period = match (from, week) {
            (Some(start), _) => HourPeriod::From(
                parse_date(start.trim()).ok_or_else(|| AppError::InvalidDate(start.clone()))?,
            ),
            (None, Some(w)) => HourPeriod::Week(*w),
            (None, None) if *whole_month => HourPeriod::Month,
            (None, None) => HourPeriod::Current(now),
        };
        let month = month_or_now(month, now)?;

        // 2) load and compute
        let (_pool, snapshot) = open_snapshot(cfg)?;
        let span = Core::hour_span(&snapshot, month, period)?;
        let rows = Core::hour_table(&snapshot, &span, cfg.hour_window)?;

        // 3) render
        header(format!("Hourly share, {span}"));
        print_context(&snapshot, now);

        let mut table = Table::new(vec![
            Column::left("hour"),
            Column::right("count"),
            Column::right("%"),
            Column::right("avg/day"),
        ]);
        for r in &rows {
            table.add_row(vec![
                r.label.clone(),
                r.count.to_string(),
                r.percentage.clone(),
                r.average.clone(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
