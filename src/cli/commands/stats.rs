use crate::cli::commands::{month_or_now, open_snapshot, print_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::aggregate::StatsView;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::models::bucket::Bucket;
use crate::ui::messages::header;
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

pub(crate) fn bucket_table(buckets: &[Bucket]) -> Table {
    let mut table = Table::new(vec![
        Column::left("bucket"),
        Column::right("total"),
        Column::right("male"),
        Column::right("female"),
    ]);
    for b in buckets {
        table.add_row(vec![
            b.label.clone(),
            b.total.to_string(),
            b.male.to_string(),
            b.female.to_string(),
        ]);
    }
    table
}

pub fn handle(cmd: &Commands, cfg: &Config, now: NaiveDate) -> AppResult<()> {
    if let Commands::Stats { view, month } = cmd {
        let month = month_or_now(month, now)?;
        let (_pool, snapshot) = open_snapshot(cfg)?;

        let buckets = Core::buckets(&snapshot, *view, now, month, cfg.hour_window)?;

        let title = match view {
            StatsView::Daily | StatsView::Weekly => format!("{} attendance, {month}", view.as_str()),
            _ => format!("{} attendance", view.as_str()),
        };
        header(title);
        print_context(&snapshot, now);

        print!("{}", bucket_table(&buckets).render());
    }
    Ok(())
}
