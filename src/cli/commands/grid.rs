use crate::cli::commands::{month_or_now, open_snapshot, print_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::monthly_grid;
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::formatting::hour_cell;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, now: NaiveDate) -> AppResult<()> {
    if let Commands::Grid { month } = cmd {
        let month = month_or_now(month, now)?;
        let (_pool, snapshot) = open_snapshot(cfg)?;

        let rows = monthly_grid(&snapshot.members, &snapshot.events, month.year, month.month)?;

        header(format!("Attendance grid, {month}"));
        print_context(&snapshot, now);

        let days = rows.first().map(|r| r.days_in_month).unwrap_or(0);
        let mut columns = vec![Column::left("member")];
        columns.extend((1..=days).map(|d| Column::right(&d.to_string())));
        columns.push(Column::right("days"));
        columns.push(Column::right("%"));

        let mut table = Table::new(columns);
        for r in &rows {
            let mut cells = vec![r.member_id.clone()];
            cells.extend(r.first_hours.iter().map(|h| hour_cell(*h)));
            cells.push(format!("{}/{}", r.attended_days, r.days_in_month));
            cells.push(r.attendance_rate());
            table.add_row(cells);
        }
        print!("{}", table.render());
    }
    Ok(())
}
