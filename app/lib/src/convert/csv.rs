//! CSV loader.
//!
//! Reading adapts to the input: the delimiter is sniffed from a leading
//! sample and every cell goes through [`coerce`]. Writing is canonical: a
//! `;` delimiter and `\n` line endings, whatever the source looked like.

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use log::debug;

use crate::coerce::{coerce, to_cell};
use crate::error::{ConvertError, Result};
use crate::record::{find_nested, Dataset, Record};

use super::{FormatKind, Loader};

/// Delimiter used for every CSV write.
pub const CSV_WRITE_DELIMITER: u8 = b';';

/// Delimiters considered by [`detect_delimiter`], in tie-break order.
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

const DEFAULT_DELIMITER: u8 = b',';

/// Guess the delimiter of a CSV sample.
///
/// Each candidate is counted per line, ignoring text inside double quotes.
/// A candidate must occur in the first (header) line; among those, the one
/// whose header count repeats on the most lines wins, then the higher header
/// count, then the earlier candidate. Falls back to `,`.
pub fn detect_delimiter(sample: &str) -> u8 {
    let lines: Vec<&str> = sample
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    let Some(header) = lines.first() else {
        return DEFAULT_DELIMITER;
    };

    let mut best: Option<(usize, usize, u8)> = None;
    for &candidate in &CANDIDATE_DELIMITERS {
        let header_count = count_unquoted(header, candidate);
        if header_count == 0 {
            continue;
        }
        let consistent = lines
            .iter()
            .filter(|line| count_unquoted(line, candidate) == header_count)
            .count();
        let better = match best {
            None => true,
            Some((best_consistent, best_count, _)) => {
                (consistent, header_count) > (best_consistent, best_count)
            }
        };
        if better {
            best = Some((consistent, header_count, candidate));
        }
    }

    best.map(|(_, _, delimiter)| delimiter)
        .unwrap_or(DEFAULT_DELIMITER)
}

fn count_unquoted(line: &str, delimiter: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for byte in line.bytes() {
        if byte == b'"' {
            in_quotes = !in_quotes;
        } else if byte == delimiter && !in_quotes {
            count += 1;
        }
    }
    count
}

/// Take at most `size` leading bytes on a char boundary. When the input was
/// cut, the trailing partial line is dropped unless it is the only one.
fn leading_sample(input: &str, size: usize) -> &str {
    if input.len() <= size {
        return input;
    }
    let mut end = size;
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let sample = &input[..end];
    match sample.rfind('\n') {
        Some(newline) if newline > 0 => &sample[..newline],
        _ => sample,
    }
}

/// Loader for delimiter-separated text with a header row.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    sample_size: usize,
}

impl CsvLoader {
    /// Create a loader that sniffs the delimiter from `sample_size` bytes.
    pub fn new(sample_size: usize) -> Self {
        Self { sample_size }
    }

    /// Turn every record into a row of cells, in header order.
    ///
    /// Runs over the whole dataset before anything is written, so a nested
    /// value or stray field in the last record still rejects the save.
    fn build_rows(&self, records: &[Record]) -> Result<(Vec<String>, Vec<Vec<String>>)> {
        let header: Vec<String> = match records.first() {
            Some(first) => first.keys().cloned().collect(),
            None => return Err(ConvertError::EmptyDataset),
        };
        if let Some((idx, field)) = find_nested(records) {
            return Err(ConvertError::NestedDataUnsupported {
                record: idx,
                field: field.to_string(),
            });
        }

        let mut rows = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            for field in record.keys() {
                if !header.contains(field) {
                    return Err(ConvertError::UnknownField {
                        record: idx,
                        field: field.clone(),
                    });
                }
            }
            let row = header
                .iter()
                .map(|field| record.get(field).and_then(to_cell).unwrap_or_default())
                .collect();
            rows.push(row);
        }
        Ok((header, rows))
    }
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self::new(crate::config::ConverterConfig::DEFAULT_SNIFF_SAMPLE_SIZE)
    }
}

impl Loader for CsvLoader {
    fn format(&self) -> FormatKind {
        FormatKind::Csv
    }

    fn parse_str(&self, input: &str) -> Result<Dataset> {
        let delimiter = detect_delimiter(leading_sample(input, self.sample_size));
        debug!("Detected CSV delimiter {:?}", delimiter as char);

        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .from_reader(input.as_bytes());
        let header = reader
            .headers()
            .map_err(|e| ConvertError::parse(FormatKind::Csv, e))?
            .clone();

        let mut records = Dataset::new();
        for row in reader.records() {
            let row = row.map_err(|e| ConvertError::parse(FormatKind::Csv, e))?;
            let record: Record = header
                .iter()
                .zip(row.iter())
                .map(|(field, cell)| (field.to_string(), coerce(cell)))
                .collect();
            records.push(record);
        }
        Ok(records)
    }

    fn render(&self, records: &[Record]) -> Result<String> {
        let (header, rows) = self.build_rows(records)?;

        let mut writer = WriterBuilder::new()
            .delimiter(CSV_WRITE_DELIMITER)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer
            .write_record(&header)
            .map_err(|e| ConvertError::serialize(FormatKind::Csv, e))?;
        for row in &rows {
            writer
                .write_record(row)
                .map_err(|e| ConvertError::serialize(FormatKind::Csv, e))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| ConvertError::serialize(FormatKind::Csv, e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ConvertError::serialize(FormatKind::Csv, e))
    }
}
