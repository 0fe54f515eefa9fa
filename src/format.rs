//! Rendering of the index for one source.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::record::OccurrenceRecord;

/// What is printed for each word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// File names only
    Files,
    /// File names and line numbers
    Lines,
    /// File names, line numbers and number of occurrences
    Occurrences,
}

/// Formats the line of a record, or returns `None` when the word does not
/// appear in `source`
pub fn format_record(
    record: &OccurrenceRecord,
    source: &str,
    mode: OutputMode,
) -> Option<String> {
    let lines = record.lines(source)?;

    let mut output = format!("Key : ==={}===  found in file: {}", record.word(), source);
    if mode != OutputMode::Files {
        output.push_str(&format!(" on line(s): {:?}", lines));
    }
    if mode == OutputMode::Occurrences {
        let count = lines.len();
        output.push_str(&format!(
            " ({} occurrence{})",
            count,
            if count > 1 { "s" } else { "" }
        ));
    }
    Some(output)
}

/// One line per record appearing in `source`
pub fn render<'a>(
    records: impl IntoIterator<Item = &'a OccurrenceRecord>,
    source: &str,
    mode: OutputMode,
) -> String {
    let mut report = String::new();
    for line in records
        .into_iter()
        .filter_map(|record| format_record(record, source, mode))
    {
        report.push_str(&line);
        report.push('\n');
    }
    report
}

/// Writes the report to a file, or to the standard output
pub fn write_report(report: &str, destination: Option<&Path>) -> io::Result<()> {
    match destination {
        Some(path) => {
            let mut writer = BufWriter::new(File::create(path)?);
            writer.write_all(report.as_bytes())?;
            writer.flush()
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(report.as_bytes())?;
            handle.flush()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fox() -> OccurrenceRecord {
        let mut record = OccurrenceRecord::new("fox", "a.txt", 1);
        record.add_occurrence("a.txt", 4);
        record.add_occurrence("b.txt", 2);
        record
    }

    #[test]
    fn test_modes() {
        let record = fox();
        assert_eq!(
            format_record(&record, "a.txt", OutputMode::Files).unwrap(),
            "Key : ===fox===  found in file: a.txt"
        );
        assert_eq!(
            format_record(&record, "a.txt", OutputMode::Lines).unwrap(),
            "Key : ===fox===  found in file: a.txt on line(s): [1, 4]"
        );
        assert_eq!(
            format_record(&record, "a.txt", OutputMode::Occurrences).unwrap(),
            "Key : ===fox===  found in file: a.txt on line(s): [1, 4] (2 occurrences)"
        );
        assert_eq!(
            format_record(&record, "b.txt", OutputMode::Occurrences).unwrap(),
            "Key : ===fox===  found in file: b.txt on line(s): [2] (1 occurrence)"
        );
    }

    #[test]
    fn test_other_sources_are_skipped() {
        let records = [OccurrenceRecord::new("cat", "c.txt", 1), fox()];
        assert!(format_record(&records[0], "a.txt", OutputMode::Files).is_none());
        assert_eq!(
            render(records.iter(), "a.txt", OutputMode::Files),
            "Key : ===fox===  found in file: a.txt\n"
        );
    }
}
