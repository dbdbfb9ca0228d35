//! CSV output format for mined patterns

use crate::mining::Pattern;

/// CSV output formatter
#[derive(Debug, Default)]
pub struct CsvOutput {
    rows: Vec<Pattern>,
}

impl CsvOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_pattern(&mut self, pattern: &Pattern) {
        self.rows.push(pattern.clone());
    }

    fn header() -> &'static str {
        "pattern,length,support,support_percent"
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    fn format_pattern(pattern: &Pattern) -> String {
        format!(
            "{},{},{},{:.2}",
            Self::escape_field(&pattern.display()),
            pattern.len(),
            pattern.support,
            pattern.support_percent()
        )
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = String::new();
        output.push_str(Self::header());
        output.push('\n');

        for pattern in &self.rows {
            output.push_str(&Self::format_pattern(pattern));
            output.push('\n');
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(items: &[&str], support: usize, fraction: f64) -> Pattern {
        Pattern {
            items: items.iter().map(|s| s.to_string()).collect(),
            support,
            support_fraction: fraction,
        }
    }

    #[test]
    fn test_csv_header_only_when_empty() {
        let output = CsvOutput::new();
        assert_eq!(output.to_csv(), "pattern,length,support,support_percent\n");
    }

    #[test]
    fn test_csv_rows() {
        let mut output = CsvOutput::new();
        output.add_pattern(&pattern(&["A", "B"], 2, 0.5));
        output.add_pattern(&pattern(&["C"], 4, 1.0));

        let csv = output.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[1], "A → B,2,2,50.00");
        assert_eq!(lines[2], "C,1,4,100.00");
    }

    #[test]
    fn test_csv_escapes_labels() {
        let mut output = CsvOutput::new();
        output.add_pattern(&pattern(&["milk, 2%", "say \"hi\""], 1, 0.25));

        let csv = output.to_csv();
        assert!(csv.contains("\"milk, 2% → say \"\"hi\"\"\",2,1,25.00"));
    }
}
