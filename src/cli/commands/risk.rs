use crate::cli::commands::{open_snapshot, print_context};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logic::Core;
use crate::core::risk::{absence_ranking, at_risk, categorize};
use crate::errors::AppResult;
use crate::models::risk::RiskVerdict;
use crate::ui::messages::{header, info, success};
use crate::utils::colors::{GREY, color_for_level, paint};
use crate::utils::table::{Column, Table};
use chrono::NaiveDate;

fn verdict_table(verdicts: &[RiskVerdict]) -> Table {
    let mut table = Table::new(vec![
        Column::left("member"),
        Column::left("level"),
        Column::right("days"),
        Column::left("last visit"),
        Column::left("reason"),
        Column::left("action"),
    ]);
    for v in verdicts {
        table.add_row(vec![
            v.member_id.clone(),
            v.level.to_string(),
            v.days_since_visit.to_string(),
            v.last_visit.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
            v.reason.to_string(),
            v.action.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
        ]);
    }
    table
}

/// Render the table, painting each data row with its level colour.
fn print_verdicts(verdicts: &[RiskVerdict]) {
    let rendered = verdict_table(verdicts).render();
    let mut lines = rendered.lines();

    for line in lines.by_ref().take(2) {
        println!("{line}");
    }
    for (line, v) in lines.zip(verdicts) {
        println!("{}", paint(color_for_level(v.level), line));
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, now: NaiveDate) -> AppResult<()> {
    if let Commands::Risk { all, absence } = cmd {
        let (_pool, snapshot) = open_snapshot(cfg)?;

        if *absence {
            header("Long absence");
            print_context(&snapshot, now);

            let rows = absence_ranking(&snapshot.members, &snapshot.events, now);
            let mut table = Table::new(vec![
                Column::left("member"),
                Column::right("days"),
                Column::left("last visit"),
                Column::left("status"),
            ]);
            for r in &rows {
                table.add_row(vec![
                    r.member_id.clone(),
                    r.days_since_visit.to_string(),
                    r.last_visit.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                    if r.expired { "expired" } else { "active" }.to_string(),
                ]);
            }
            let rendered = table.render();
            let mut lines = rendered.lines();
            for line in lines.by_ref().take(2) {
                println!("{line}");
            }
            for (line, r) in lines.zip(&rows) {
                if r.expired {
                    println!("{}", paint(GREY, line));
                } else {
                    println!("{line}");
                }
            }
            return Ok(());
        }

        let verdicts = Core::verdicts(&snapshot, &cfg.risk, now)?;

        if *all {
            header("Churn risk, all members");
            print_context(&snapshot, now);
            print_verdicts(&verdicts);
            return Ok(());
        }

        header("Churn risk");
        print_context(&snapshot, now);

        let flagged = at_risk(&verdicts);
        if flagged.is_empty() {
            success("No member at risk.");
            return Ok(());
        }

        let cats = categorize(&verdicts);
        info(format!(
            "{} danger · {} warning · {} caution",
            cats.danger.len(),
            cats.warning.len(),
            cats.caution.len()
        ));
        println!();
        print_verdicts(&flagged);
    }
    Ok(())
}
