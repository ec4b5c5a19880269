use crate::evaluation::{Histogram, SummaryStatistics};
use crate::ui::session::Outcome;
use std::fmt::Write;

pub fn format_currency(v: f64) -> String {
    if v.is_nan() {
        "n/a".to_string()
    } else if v < 0.0 {
        format!("-${:.2}", -v)
    } else {
        format!("${v:.2}")
    }
}

fn format_plain(v: f64) -> String {
    if v.is_nan() {
        "n/a".to_string()
    } else {
        format!("{v:.2}")
    }
}

/// Multi-line summary, one labelled statistic per line.
pub fn render_summary(s: &SummaryStatistics) -> String {
    let level = (s.confidence_level * 100.0 * 1e6).round() / 1e6;
    let mut out = String::new();
    let _ = writeln!(out, "Trials: {}", s.count);
    let _ = writeln!(out, "Average Revenue: {}", format_currency(s.mean));
    let _ = writeln!(out, "5% Percentile: {}", format_currency(s.percentile_5));
    let _ = writeln!(out, "95% Percentile: {}", format_currency(s.percentile_95));
    let _ = writeln!(out, "Median: {}", format_currency(s.median));
    let _ = writeln!(out, "Standard Deviation: {}", format_currency(s.std_dev));
    let _ = writeln!(out, "Variance: {}", format_currency(s.variance));
    let _ = writeln!(out, "Skewness: {}", format_plain(s.skewness));
    let _ = writeln!(out, "Kurtosis: {}", format_plain(s.kurtosis));
    let _ = write!(
        out,
        "{level}% Confidence Interval: {} to {}",
        format_currency(s.confidence_interval.lower),
        format_currency(s.confidence_interval.upper)
    );
    out
}

/// Bin table with the 5th / 95th percentile bins marked.
pub fn render_histogram(h: &Histogram, s: &SummaryStatistics) -> String {
    let mut out = String::from("Revenue Distribution\n");
    let last = h.bins().saturating_sub(1);
    for (i, (lo, hi, count)) in h.iter().enumerate() {
        let closing = if i == last { ']' } else { ')' };
        let mut marks = Vec::new();
        if in_bin(s.percentile_5, lo, hi, i == last) {
            marks.push("5th percentile");
        }
        if in_bin(s.percentile_95, lo, hi, i == last) {
            marks.push("95th percentile");
        }
        let _ = write!(
            out,
            "[{}, {}{closing} {count}",
            format_currency(lo),
            format_currency(hi)
        );
        if !marks.is_empty() {
            let _ = write!(out, "  <- {}", marks.join(", "));
        }
        out.push('\n');
    }
    out
}

pub fn render_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Simulated(s) | Outcome::Summary(s) => render_summary(s),
        Outcome::Saved { path, rows } => format!("Saved {rows} results to {}", path.display()),
        Outcome::Histogram(h, s) => render_histogram(h, s),
        Outcome::Reseeded(seed) => format!("Generator reseeded with {seed}"),
    }
}

fn in_bin(v: f64, lo: f64, hi: f64, closed: bool) -> bool {
    v >= lo && (v < hi || (closed && v <= hi))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::summarize;
    use crate::simulation::ResultSet;

    #[test]
    fn currency_formatting() {
        assert_eq!(format_currency(500.0), "$500.00");
        assert_eq!(format_currency(1234.567), "$1234.57");
        assert_eq!(format_currency(-5.0), "-$5.00");
        assert_eq!(format_currency(f64::NAN), "n/a");
    }

    #[test]
    fn summary_lists_every_statistic() {
        let s = summarize(&ResultSet::from(vec![500.0; 5])).unwrap();
        let text = render_summary(&s);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Trials: 5",
                "Average Revenue: $500.00",
                "5% Percentile: $500.00",
                "95% Percentile: $500.00",
                "Median: $500.00",
                "Standard Deviation: $0.00",
                "Variance: $0.00",
                "Skewness: n/a",
                "Kurtosis: n/a",
                "95% Confidence Interval: $500.00 to $500.00",
            ]
        );
    }

    #[test]
    fn outcomes_render_one_line_messages() {
        let saved = Outcome::Saved {
            path: "out.csv".into(),
            rows: 5,
        };
        assert_eq!(render_outcome(&saved), "Saved 5 results to out.csv");
        assert_eq!(
            render_outcome(&Outcome::Reseeded(7)),
            "Generator reseeded with 7"
        );
    }

    #[test]
    fn histogram_marks_percentile_bins() {
        let rs = ResultSet::from((0..=100).map(f64::from).collect::<Vec<_>>());
        let s = summarize(&rs).unwrap();
        let h = Histogram::from_results(&rs, 10).unwrap();
        let text = render_histogram(&h, &s);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[1], "[$0.00, $10.00) 10  <- 5th percentile");
        assert_eq!(lines[10], "[$90.00, $100.00] 11  <- 95th percentile");
    }
}
