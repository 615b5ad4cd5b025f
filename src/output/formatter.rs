use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::model::{Class, Fault, FaultKind, Snapshot};
use crate::scoring::{RankingRow, TrendPoint};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a point value compactly: whole numbers without decimals,
/// fractions with up to two places ("104", "98.5", "0.25")
pub fn format_points(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let formatted = if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    };
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Format a point change with an explicit sign for positive values ("+5", "-2", "0")
pub fn format_signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{}", format_points(value))
    } else {
        format_points(value)
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Right-pad by char count rather than byte count
fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - len))
    }
}

/// Format ranking rows as a table with columns: Rank, Class, Base, Plus, Minus, Total
/// No headers. Rank column: 3 chars (fits "99."), right-aligned
pub fn format_ranking_table(rows: &[RankingRow], base_score: f64, use_colors: bool) -> String {
    if rows.is_empty() {
        return "No classes found.".to_string();
    }

    let name_width = rows
        .iter()
        .map(|r| r.class.name.chars().count())
        .max()
        .unwrap_or(0);
    let separator = "  ";
    let base = format!("{:>6}", format_points(base_score));

    rows.iter()
        .map(|row| {
            let rank_str = format!("{:>2}.", row.rank);
            let name = pad_right(&row.class.name, name_width);
            let plus = format!("{:>6}", format_signed(row.plus));
            let minus = format!("{:>6}", format_signed(row.minus));
            let total = format!("{:>7}", format_points(row.total));

            if use_colors {
                let rank_str = match row.rank {
                    1 => rank_str.yellow().bold().to_string(),
                    2 | 3 => rank_str.bold().to_string(),
                    _ => rank_str.dimmed().to_string(),
                };
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    rank_str,
                    name,
                    separator,
                    base.dimmed(),
                    separator,
                    plus.green(),
                    separator,
                    minus.red(),
                    separator,
                    total.bold()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}{}{}{}{}",
                    rank_str, name, separator, base, separator, plus, separator, minus, separator,
                    total
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format ranking rows as tab-separated values for scripting
/// Columns: rank, class id, class name, base, plus, minus, total (no headers, no colors)
pub fn format_ranking_tsv(rows: &[RankingRow], base_score: f64) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                row.rank,
                row.class.id,
                row.class.name,
                format_points(base_score),
                format_points(row.plus),
                format_points(row.minus),
                format_points(row.total)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a trend series as a grid: one row per week, one column per class
pub fn format_trend_table(series: &[TrendPoint], use_colors: bool) -> String {
    if series.is_empty() {
        return "No weeks found.".to_string();
    }

    let week_width = series
        .iter()
        .map(|p| p.name.chars().count())
        .max()
        .unwrap_or(0);
    let column_width = series[0]
        .values
        .iter()
        .map(|v| v.class_name.chars().count())
        .max()
        .unwrap_or(0)
        .max(7);

    let header = series[0]
        .values
        .iter()
        .map(|v| format!("{:>width$}", v.class_name, width = column_width))
        .collect::<Vec<_>>()
        .join(" ");
    let header = format!("{} {}", " ".repeat(week_width), header);
    let header = if use_colors {
        header.bold().to_string()
    } else {
        header
    };

    let mut lines = vec![header];
    for point in series {
        let cells = point
            .values
            .iter()
            .map(|v| format!("{:>width$}", format_points(v.total), width = column_width))
            .collect::<Vec<_>>()
            .join(" ");
        let name = pad_right(&point.name, week_width);
        if use_colors {
            lines.push(format!("{} {}", name.cyan(), cells));
        } else {
            lines.push(format!("{} {}", name, cells));
        }
    }

    lines.join("\n")
}

/// Dashboard view: counts, the podium, and the latest entries (newest first)
pub fn format_summary(
    snapshot: &Snapshot,
    rows: &[RankingRow],
    base_score: f64,
    use_colors: bool,
) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "Classes: {}  Entries: {}",
        rows.len(),
        snapshot.entries.len()
    ));
    lines.push(String::new());
    lines.push("Top classes:".to_string());
    if rows.is_empty() {
        lines.push("  No classes found.".to_string());
    } else {
        lines.push(format_ranking_table(&rows[..rows.len().min(3)], base_score, use_colors));
    }

    lines.push(String::new());
    lines.push("Recent entries:".to_string());
    let recent = snapshot.recent_entries(3);
    if recent.is_empty() {
        lines.push("  No entries yet.".to_string());
    }

    let term_width = get_terminal_width();
    for entry in recent {
        let class_name = snapshot
            .find_class(&entry.class_id)
            .map(|c| c.name.as_str())
            .unwrap_or(entry.class_id.as_str());
        let points = format_signed(entry.point_change);
        let prefix_width = 2 + class_name.chars().count() + 2 + points.chars().count() + 2;
        let note = match term_width {
            Some(width) if width > prefix_width + 10 => {
                truncate_text(&entry.note, width - prefix_width)
            }
            Some(_) => truncate_text(&entry.note, 20),
            None => entry.note.clone(),
        };

        if use_colors {
            let points = if entry.point_change < 0.0 {
                points.red().bold().to_string()
            } else {
                points.green().bold().to_string()
            };
            lines.push(format!("  {}  {}  {}", class_name.bold(), points, note.dimmed()));
        } else {
            lines.push(format!("  {}  {}  {}", class_name, points, note));
        }
    }

    lines.join("\n")
}

/// Format the class roster with columns: Id, Name, Grade (no headers)
pub fn format_roster(classes: &[Class], use_colors: bool) -> String {
    if classes.is_empty() {
        return "No classes found.".to_string();
    }

    let id_width = classes.iter().map(|c| c.id.chars().count()).max().unwrap_or(0);
    let name_width = classes.iter().map(|c| c.name.chars().count()).max().unwrap_or(0);

    classes
        .iter()
        .map(|class| {
            let id = pad_right(&class.id, id_width);
            let name = pad_right(&class.name, name_width);
            let grade = format!("grade {:>2}", class.grade);
            if use_colors {
                format!("{}  {}  {}", id.dimmed(), name.bold(), grade.cyan())
            } else {
                format!("{}  {}  {}", id, name, grade)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the class roster as tab-separated values: id, name, grade
pub fn format_roster_tsv(classes: &[Class]) -> String {
    classes
        .iter()
        .map(|class| format!("{}\t{}\t{}", class.id, class.name, class.grade))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the fault catalog with columns: Id, Name, Point (no headers)
/// Names are truncated to the terminal width; points are signed and
/// colored by direction.
pub fn format_faults(faults: &[Fault], use_colors: bool) -> String {
    if faults.is_empty() {
        return "No faults found.".to_string();
    }

    let id_width = faults.iter().map(|f| f.id.chars().count()).max().unwrap_or(0);
    let point_width = 6;
    let separator = "  ";
    let fixed_width = id_width + separator.len() * 2 + point_width;
    let longest_name = faults.iter().map(|f| f.name.chars().count()).max().unwrap_or(0);
    let name_width = match get_terminal_width() {
        Some(width) if width > fixed_width + 10 => longest_name.min(width - fixed_width),
        Some(_) => longest_name.min(20),
        None => longest_name,
    };

    faults
        .iter()
        .map(|fault| {
            let id = pad_right(&fault.id, id_width);
            let name = pad_right(&truncate_text(&fault.name, name_width), name_width);
            let point = format!("{:>width$}", format_signed(fault.point), width = point_width);
            if use_colors {
                let point = if fault.point < 0.0 {
                    point.red().bold().to_string()
                } else {
                    point.green().bold().to_string()
                };
                format!("{}{}{}{}{}", id.dimmed(), separator, name, separator, point)
            } else {
                format!("{}{}{}{}{}", id, separator, name, separator, point)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the fault catalog as tab-separated values: id, name, point, type
pub fn format_faults_tsv(faults: &[Fault]) -> String {
    faults
        .iter()
        .map(|fault| {
            let kind = match fault.kind {
                FaultKind::Plus => "PLUS",
                FaultKind::Minus => "MINUS",
            };
            format!(
                "{}\t{}\t{}\t{}",
                fault.id,
                fault.name,
                format_points(fault.point),
                kind
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
