//! Terminal implementation of the store's UI callbacks.

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

use movebox_db::{DataTable, Display, FieldPrompt, UiCallback};

pub(crate) struct TerminalUi;

impl UiCallback for TerminalUi {
    fn prompt(&self, table: &str, prompts: &[FieldPrompt]) -> io::Result<BTreeMap<String, String>> {
        let stdin = io::stdin();
        let mut answers = BTreeMap::new();
        log::info!(
            "{}",
            format!("New {table} record").if_supports_color(Stdout, |t| t.bold())
        );
        for p in prompts {
            print!(
                "  {} {}: ",
                p.prompt.if_supports_color(Stdout, |t| t.cyan()),
                format!("({})", p.field).if_supports_color(Stdout, |t| t.dimmed()),
            );
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                // EOF: leave the rest unanswered
                break;
            }
            let answer = line.trim();
            if !answer.is_empty() {
                answers.insert(p.field.to_string(), answer.to_string());
            }
        }
        Ok(answers)
    }

    fn display(&self, output: Display<'_>) {
        match output {
            Display::Text(text) => log::info!("{}", text),
            Display::Table(table) => print_table(table),
        }
    }

    fn error(&self, text: &str, context: Option<&str>) {
        let label = match context {
            Some(ctx) => format!("error ({ctx}):"),
            None => "error:".to_string(),
        };
        eprintln!("{} {}", label.if_supports_color(Stderr, |t| t.red()), text);
    }
}

fn print_table(table: &DataTable) {
    if table.is_empty() {
        log::info!("{}", "(no records)".if_supports_color(Stdout, |t| t.dimmed()));
        return;
    }

    let cells: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();
    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, c)| {
            cells
                .iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(c.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{c:<w$}"))
        .collect();
    log::info!(
        "{}",
        header.join("  ").if_supports_color(Stdout, |t| t.bold())
    );
    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(v, w)| format!("{v:<w$}"))
            .collect();
        log::info!("{}", line.join("  ").trim_end());
    }
}
