use crate::utils::table::visible_width;
use ansi_term::Colour;
use chrono::{DateTime, Local};
use unicode_width::UnicodeWidthChar;

/// One line of the internal operation log.
#[derive(Debug, Clone)]
pub struct OpLogEntry {
    pub id: usize,
    pub date: DateTime<Local>,
    pub operation: String,
    pub target: String,
    pub message: String,
}

/// Restituisce il colore ANSI in base all'operazione
fn color_for_operation(op: &str) -> Colour {
    match op {
        "count" => Colour::Green,
        "rejected" => Colour::Yellow,
        "undo" => Colour::Red,
        "reset" => Colour::Purple,
        "export" => Colour::Blue,
        "attach" => Colour::RGB(255, 153, 51), // arancione
        "play" | "pause" | "metadata" => Colour::Cyan,
        _ => Colour::White,
    }
}

/// Internal audit trail of a counting session (memory only).
#[derive(Debug, Default)]
pub struct OpLog {
    entries: Vec<OpLogEntry>,
}

impl OpLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation, timestamped now.
    pub fn record(&mut self, operation: &str, target: &str, message: &str) {
        self.entries.push(OpLogEntry {
            id: self.entries.len() + 1,
            date: Local::now(),
            operation: operation.to_string(),
            target: target.to_string(),
            message: message.to_string(),
        });
    }

    pub fn entries(&self) -> &[OpLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Operations recorded so far, in order. Handy for assertions.
    pub fn operations(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.operation.as_str()).collect()
    }

    /// Render the log, one coloured line per operation.
    pub fn render(&self) -> String {
        if self.entries.is_empty() {
            return "📜 Internal log is empty.\n".to_string();
        }

        let lines: Vec<(usize, String, String, String, &str)> = self
            .entries
            .iter()
            .map(|e| {
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };
                (
                    e.id,
                    e.date.format("%FT%T%:z").to_string(),
                    e.operation.clone(),
                    op_target,
                    e.message.as_str(),
                )
            })
            .collect();

        let op_w = lines
            .iter()
            .map(|(_, _, _, op_target, _)| visible_width(op_target))
            .max()
            .unwrap_or(10)
            .min(60);
        let id_w = lines.len().to_string().len();
        let date_w = lines.iter().map(|(_, d, _, _, _)| d.len()).max().unwrap_or(0);

        let mut out = String::from("📜 Internal log:\n\n");

        for (id, date, operation, op_target, message) in lines {
            let color = color_for_operation(&operation);

            // --- TRUNCATE a 60 colonne SENZA ANSI ---
            let visible = if visible_width(&op_target) > 60 {
                let mut width = 0;
                let mut s = op_target
                    .chars()
                    .take_while(|c| {
                        width += c.width().unwrap_or(0);
                        width <= 57
                    })
                    .collect::<String>();
                s.push_str("...");
                s
            } else {
                op_target
            };

            // solo la prima parola (operation) viene colorata
            let recolored = match visible.split_once(' ') {
                Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                None => color.paint(visible.as_str()).to_string(),
            };

            let padding = " ".repeat(op_w.saturating_sub(visible_width(&recolored)));

            out.push_str(&format!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}\n",
                id,
                date,
                recolored,
                padding,
                message,
                id_w = id_w,
                date_w = date_w
            ));
        }

        out
    }
}
