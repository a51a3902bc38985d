use crate::db::log::{LogEntry, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

const MAX_OP_WIDTH: usize = 60;

static ANSI_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

fn strip_ansi(s: &str) -> String {
    match ANSI_RE.as_ref() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// ANSI colour for each logged operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "import" => Colour::Green,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

/// `operation (target)` with only the operation coloured, cut to `width`
/// visible characters.
fn render_op_target(entry: &LogEntry, width: usize) -> String {
    let color = color_for_operation(&entry.operation);

    let visible = if entry.target.is_empty() {
        entry.operation.clone()
    } else {
        format!("{} ({})", entry.operation, entry.target)
    };

    let truncated = if visible.chars().count() > width {
        let mut s: String = visible.chars().take(width.saturating_sub(3)).collect();
        s.push_str("...");
        s
    } else {
        visible
    };

    let colored = match truncated.split_once(' ') {
        Some((op, rest)) => format!("{} {}", color.paint(op), rest),
        None => color.paint(truncated.as_str()).to_string(),
    };

    let padding = " ".repeat(width.saturating_sub(strip_ansi(&colored).chars().count()));
    format!("{colored}{padding}")
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        let op_w = entries
            .iter()
            .map(|e| {
                if e.target.is_empty() {
                    e.operation.chars().count()
                } else {
                    e.operation.chars().count() + e.target.chars().count() + 3
                }
            })
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for e in &entries {
            let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| e.date.clone());

            println!(
                "{:>id_w$}: {:<date_w$} | {} => {}",
                e.id,
                date,
                render_op_target(e, op_w),
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
