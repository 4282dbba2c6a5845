//! CSV loading with encoding and delimiter auto-detection.
//!
//! Produces raw text cells only; typing happens when a
//! [`Schema`](crate::schema::Schema) binds the result.

use std::path::Path;

use crate::error::{CsvError, CsvResult};

/// Delimiters tried by [`detect_delimiter`], in order of preference.
const CANDIDATE_DELIMITERS: [char; 4] = [',', ';', '\t', '|'];

/// One data row with its position in the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number (the header is line 1).
    pub line: usize,
    pub cells: Vec<String>,
}

/// Result of parsing with metadata
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Column headers
    pub headers: Vec<String>,
    /// Data rows, one cell per header
    pub rows: Vec<RawRow>,
    /// Detected or used encoding
    pub encoding: String,
    /// Detected or used delimiter
    pub delimiter: char,
}

/// Detect the encoding of raw bytes using chardet
pub fn detect_encoding(bytes: &[u8]) -> String {
    let result = chardet::detect(bytes);
    let charset = result.0;

    // Normalize charset names
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" | "" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        _ => charset,
    }
}

/// Decode bytes to string using the specified encoding.
///
/// Unknown encodings fall back to lossy UTF-8. A leading BOM is dropped.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "iso-8859-1" | "latin-1" | "latin1" => encoding_rs::ISO_8859_15.decode(bytes).0.into_owned(),
        "windows-1252" | "cp1252" => encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned(),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

/// Detect the delimiter by counting occurrences in the first line.
///
/// Falls back to a comma when no candidate appears.
pub fn detect_delimiter(content: &str) -> char {
    let first_line = content.lines().next().unwrap_or("");

    let mut best_sep = ',';
    let mut best_count = 0;

    for &sep in &CANDIDATE_DELIMITERS {
        let count = first_line.matches(sep).count();
        if count > best_count {
            best_count = count;
            best_sep = sep;
        }
    }

    best_sep
}

/// Parse decoded CSV text with an explicit delimiter.
///
/// The first record is the header row. Every data row must have exactly
/// as many cells as the header; ragged rows are rejected.
pub fn parse_str(content: &str, delimiter: char) -> CsvResult<ParseResult> {
    parse_with_encoding(content, delimiter, "utf-8".to_string())
}

fn parse_with_encoding(content: &str, delimiter: char, encoding: String) -> CsvResult<ParseResult> {
    if content.trim().is_empty() {
        return Err(CsvError::EmptyFile);
    }
    if !delimiter.is_ascii() {
        return Err(CsvError::InvalidDelimiter(delimiter));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(true)
        .flexible(false)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(malformed)?
        .iter()
        .map(String::from)
        .collect();

    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(CsvError::NoHeaders);
    }

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(malformed)?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 2);
        rows.push(RawRow {
            line,
            cells: record.iter().map(String::from).collect(),
        });
    }

    Ok(ParseResult {
        headers,
        rows,
        encoding,
        delimiter,
    })
}

fn malformed(err: csv::Error) -> CsvError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    CsvError::Malformed {
        line,
        message: err.to_string(),
    }
}

/// Parse CSV bytes, detecting the encoding and, unless given, the delimiter.
pub fn parse_bytes(bytes: &[u8], delimiter: Option<char>) -> CsvResult<ParseResult> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    let delimiter = delimiter.unwrap_or_else(|| detect_delimiter(&content));

    parse_with_encoding(&content, delimiter, encoding)
}

/// Parse a CSV file, detecting the encoding and, unless given, the delimiter.
///
/// # Example
/// ```ignore
/// let result = parse_csv_file("pokemon_alopez247.csv", None)?;
/// println!("Encoding: {}, Delimiter: '{}'", result.encoding, result.delimiter);
/// println!("Rows: {}", result.rows.len());
/// ```
pub fn parse_csv_file<P: AsRef<Path>>(path: P, delimiter: Option<char>) -> CsvResult<ParseResult> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| CsvError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_bytes(&bytes, delimiter)
}
