use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use tasklist_core::view::{ProfileView, TaskRowView};
use unicode_width::UnicodeWidthStr;

use crate::config::{COLOR_KEY, Config, parse_bool};

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get(COLOR_KEY).unwrap_or_else(|| "on".to_string());
        let color = parse_bool(&color_cfg)
            .ok_or_else(|| anyhow!("invalid color setting: {color_cfg}"))?;

        Ok(Self {
            color: color && io::stdout().is_terminal(),
        })
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip_all, fields(rows = rows.len()))]
    pub fn print_task_table<W: Write>(&self, out: W, rows: &[TaskRowView]) -> anyhow::Result<()> {
        let headers = vec!["ID".to_string(), "Done".to_string(), "Title".to_string()];

        let rows = rows
            .iter()
            .map(|row| {
                let id = self.paint(&row.id.to_string(), "33");
                let done = if row.checked { "[x]" } else { "[ ]" }.to_string();
                let title = if row.checked {
                    self.paint(&row.title, "2;9")
                } else {
                    row.title.clone()
                };
                vec![id, done, title]
            })
            .collect();

        write_table(out, headers, rows)
    }

    pub fn print_profile<W: Write>(&self, mut out: W, profile: &ProfileView) -> anyhow::Result<()> {
        writeln!(out, "{}", self.paint(&profile.title, "1"))?;
        writeln!(out, "name   {}", profile.display_name)?;
        writeln!(out, "email  {}", profile.email)?;
        Ok(())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    let mut line = String::new();
    for (header, width) in headers.iter().zip(&widths) {
        line.push_str(&format!("{header:width$} ", width = *width));
    }
    writeln!(writer, "{}", line.trim_end())?;

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    writeln!(writer, "{}", rule.join(" "))?;

    for row in rows {
        let mut line = String::new();
        for (cell, width) in row.iter().zip(&widths) {
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = width.saturating_sub(visible_width);
            line.push_str(cell);
            line.push_str(&" ".repeat(padding));
            line.push(' ');
        }
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_is_ignored_for_width() {
        assert_eq!(strip_ansi("\x1b[33m12\x1b[0m"), "12");
    }
}
