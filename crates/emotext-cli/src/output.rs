//! Terminal output formatting.

use colored::{Color, Colorize};
use emotext_core::view::{Chart, ViewState, ABOUT_TEXT};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Terminal colours matching the page palette, applied in bar order.
const BAR_COLORS: [Color; 5] = [
    Color::Red,
    Color::Blue,
    Color::Yellow,
    Color::Cyan,
    Color::Magenta,
];

/// Widest label column before truncation.
const MAX_LABEL_WIDTH: usize = 16;

/// Print the whole view: error first, then the chart if there is one.
pub fn print_view(state: &ViewState) {
    if let Some(error) = &state.error {
        println!("{} {}", "Error:".red().bold(), error.red());
        println!();
    }

    match state.chart() {
        Some(chart) => print_chart(&chart),
        None if state.error.is_none() => println!("{}", "No emotions detected.".dimmed()),
        None => {}
    }
}

/// Print the "About This App" panel.
pub fn print_info() {
    println!("{}", "About This App".cyan().bold());
    println!();
    for line in wrap(ABOUT_TEXT, terminal_columns().min(80)) {
        println!("{}", line);
    }
    println!();
}

/// Print a horizontal bar chart.
pub fn print_chart(chart: &Chart) {
    for line in render_chart(chart, terminal_columns()) {
        println!("{}", line);
    }
}

/// Render a chart as lines for a terminal of the given width.
fn render_chart(chart: &Chart, width: usize) -> Vec<String> {
    let mut lines = vec![format!("{}:", chart.title).cyan().bold().to_string(), String::new()];

    if chart.bars.is_empty() {
        lines.push("No emotions detected.".dimmed().to_string());
        return lines;
    }

    let label_width = chart
        .bars
        .iter()
        .map(|b| UnicodeWidthStr::width(b.label.as_str()))
        .max()
        .unwrap_or(0)
        .min(MAX_LABEL_WIDTH);

    // label, space, bar, space, score ("0.00")
    let bar_room = width.saturating_sub(label_width + 8).max(10);

    for (i, bar) in chart.bars.iter().enumerate() {
        let cells = (chart.height_percent(bar) / 100.0 * bar_room as f64).round() as usize;
        let color = BAR_COLORS[i % BAR_COLORS.len()];
        let label = pad_label(&fit_label(&bar.label, label_width), label_width);

        lines.push(format!(
            "{} {}{} {:.2}",
            label.bold(),
            "█".repeat(cells).color(color),
            " ".repeat(bar_room - cells.min(bar_room)),
            bar.score
        ));
    }

    lines.push(String::new());
    lines.push(format!("{}", chart.dataset_label.dimmed()));
    lines
}

/// Columns available for output; 80 when stdout is not a terminal.
fn terminal_columns() -> usize {
    match terminal_size::terminal_size() {
        Some((terminal_size::Width(w), _)) => usize::from(w),
        None => 80,
    }
}

/// Right-pad a label with spaces up to `width` display columns.
fn pad_label(label: &str, width: usize) -> String {
    let missing = width.saturating_sub(UnicodeWidthStr::width(label));
    format!("{}{}", label, " ".repeat(missing))
}

/// Shorten a label to `width` display columns, marking the cut with "..".
fn fit_label(label: &str, width: usize) -> String {
    if UnicodeWidthStr::width(label) <= width {
        return label.to_string();
    }
    if width <= 3 {
        return ".".repeat(width);
    }

    let budget = width - 2;
    let mut used = 0;
    let kept: String = label
        .chars()
        .take_while(|&ch| {
            used += UnicodeWidthChar::width(ch).unwrap_or(0);
            used <= budget
        })
        .collect();
    format!("{}..", kept)
}

/// Greedy word wrap.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && UnicodeWidthStr::width(line.as_str()) + 1 + UnicodeWidthStr::width(word) > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use emotext_core::EmotionScores;

    fn chart(pairs: &[(&str, f64)]) -> Chart {
        let scores: EmotionScores = pairs.iter().map(|(l, s)| (*l, *s)).collect();
        Chart::from_scores(&scores)
    }

    #[test]
    fn test_render_chart_bar_lengths() {
        colored::control::set_override(false);
        let lines = render_chart(&chart(&[("Happy", 0.9), ("Angry", 0.0)]), 53);

        // 53 - (5 + 8) = 40 cells of bar room
        assert_eq!(lines[0], "Emotion Analysis Result:");
        assert_eq!(lines[2], format!("Happy {} 0.90", format!("{:<40}", "█".repeat(36))));
        assert_eq!(lines[3], format!("Angry {} 0.00", " ".repeat(40)));
        assert_eq!(lines.last().unwrap(), "Emotion Score");
    }

    #[test]
    fn test_render_empty_chart() {
        colored::control::set_override(false);
        let lines = render_chart(&chart(&[]), 80);
        assert_eq!(lines[2], "No emotions detected.");
    }

    #[test]
    fn test_labels_aligned_and_truncated() {
        colored::control::set_override(false);
        let lines = render_chart(
            &chart(&[("Sad", 0.5), ("Extraordinarily surprised", 0.5)]),
            80,
        );
        assert!(lines[2].starts_with(&format!("{:<17}", "Sad")));
        assert!(lines[3].starts_with("Extraordinaril.. "));
    }

    #[test]
    fn test_pad_label() {
        assert_eq!(pad_label("abc", 6), "abc   ");
        assert_eq!(pad_label("abcdef", 3), "abcdef");
    }

    #[test]
    fn test_fit_label() {
        assert_eq!(fit_label("short", 10), "short");
        assert_eq!(fit_label("a longer label", 8), "a long..");
        assert_eq!(fit_label("喜怒哀楽", 5), "喜..");
    }

    #[test]
    fn test_wrap() {
        let lines = wrap("one two three four", 9);
        assert_eq!(lines, vec!["one two", "three", "four"]);
    }
}
