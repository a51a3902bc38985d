use crate::cli::commands::{month_or_now, open_snapshot, print_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, now: NaiveDate) -> AppResult<()> {
    if let Commands::Weeks { month } = cmd {
        let month = month_or_now(month, now)?;
        let (_pool, snapshot) = open_snapshot(cfg)?;

        let rows = Core::week_table(&snapshot, month)?;

        header(format!("Weekly attendance, {month}"));
        print_context(&snapshot, now);

        let mut table = Table::new(vec![
            Column::left("week"),
            Column::left("period"),
            Column::right("total"),
            Column::right("business days"),
            Column::right("avg/day"),
            Column::right("%"),
        ]);
        for r in &rows {
            table.add_row(vec![
                r.label.clone(),
                format!("{} – {}", r.start.format("%m-%d"), r.end.format("%m-%d")),
                r.total.to_string(),
                r.business_days.to_string(),
                r.average.clone(),
                r.percentage.clone(),
            ]);
        }
        print!("{}", table.render());
    }
    Ok(())
}
