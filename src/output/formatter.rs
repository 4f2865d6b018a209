use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use super::record::FacilityOutput;
use crate::scoring::ScoreResult;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format a score with two decimals and an explicit sign ("+2.65", "-0.40")
pub fn format_score(score: f64) -> String {
    let rounded = (score * 100.0).round() / 100.0;
    // avoid printing "-0.00"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{:+.2}", rounded)
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Format facilities as a ranked table: Index, Score, Name, Address
///
/// The name column is sized to the longest name, capped so that each line
/// fits the terminal. Pipes get full names.
pub fn format_ranked_table(facilities: &[FacilityOutput], use_colors: bool) -> String {
    if facilities.is_empty() {
        return "No facilities matched.".to_string();
    }

    let term_width = get_terminal_width();

    // "99." + space, score 6 chars ("+10.25"), two separators
    let index_width = 3;
    let score_width = 6;
    let separator = "  ";
    let fixed_width = index_width + 1 + score_width + separator.len() * 2;

    let longest_name = facilities
        .iter()
        .map(|f| f.name.chars().count())
        .max()
        .unwrap_or(0);
    let name_width = match term_width {
        Some(width) if width > fixed_width + 40 => longest_name.min(width - fixed_width - 30),
        Some(_) => longest_name.min(20),
        None => longest_name,
    };

    facilities
        .iter()
        .enumerate()
        .map(|(idx, facility)| {
            let index_str = format!("{:>2}.", idx + 1);
            let score_str = format!(
                "{:>width$}",
                format_score(facility.recommendation_score),
                width = score_width
            );
            let name = format!(
                "{:<width$}",
                truncate(&facility.name, name_width),
                width = name_width
            );

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    score_str.bold(),
                    separator,
                    name.cyan(),
                    separator,
                    facility.address.dimmed()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, score_str, separator, name, separator, facility.address
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a facility with its per-factor breakdown (for verbose mode)
pub fn format_facility_detail(
    facility: &FacilityOutput,
    result: &ScoreResult,
    use_colors: bool,
) -> String {
    let mut lines = Vec::with_capacity(result.factors.len() + 4);

    if use_colors {
        lines.push(format!("{}", facility.name.bold()));
    } else {
        lines.push(facility.name.clone());
    }
    lines.push(format!("  Address: {}", facility.address));
    lines.push(format!(
        "  Beds: {} ({} residents/day)  Rating: {}  Deficiencies: {}  Penalties: {}",
        facility.num_beds,
        facility.residents_per_day,
        facility.overall_rating,
        facility.num_deficiencies,
        facility.num_penalties
    ));
    for factor in &result.factors {
        lines.push(format!("    {:<26}{:>6}", factor.name, format_score(factor.value)));
    }

    let total = format!(
        "  Score: {} (sum {})",
        format_score(result.score),
        format_score(result.factor_sum())
    );
    if use_colors {
        lines.push(format!("{}", total.green()));
    } else {
        lines.push(total);
    }

    lines.join("\n")
}
