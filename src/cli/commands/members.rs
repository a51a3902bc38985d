use crate::cli::commands::{open_snapshot, print_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::{GenderCount, member_summary};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, now: NaiveDate) -> AppResult<()> {
    if matches!(cmd, Commands::Members) {
        let (_pool, snapshot) = open_snapshot(cfg)?;
        let summary = member_summary(&snapshot.members, now);

        header("Members");
        print_context(&snapshot, now);

        let mut table = Table::new(vec![
            Column::left("status"),
            Column::right("total"),
            Column::right("male"),
            Column::right("female"),
        ]);
        let row = |label: &str, c: &GenderCount| {
            vec![
                label.to_string(),
                c.total.to_string(),
                c.male.to_string(),
                c.female.to_string(),
            ]
        };
        table.add_row(row("active", &summary.active));
        table.add_row(row("expired", &summary.expired));
        print!("{}", table.render());
    }
    Ok(())
}
