//! Delimiter sniffing.

/// Characters of input examined when guessing the delimiter.
pub const SNIFF_SAMPLE_CHARS: usize = 1024;

/// Delimiters considered, in tie-break order.
pub const CANDIDATE_DELIMITERS: [u8; 5] = [b',', b'\t', b';', b'|', b':'];

/// Guesses the field delimiter from the start of `text`.
///
/// Each candidate is counted outside double quotes on every complete sample
/// line. The candidate with the most lines sharing its most common non-zero
/// count wins, earlier candidates winning ties. Comma when nothing matches.
pub fn sniff_delimiter(text: &str) -> u8 {
    let lines = sample_lines(text);
    let mut best: Option<(u8, usize)> = None;
    for delimiter in CANDIDATE_DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_unquoted(line, delimiter))
            .collect();
        let consistent = consistent_lines(&counts);
        if consistent == 0 {
            continue;
        }
        if best.is_none_or(|(_, score)| consistent > score) {
            best = Some((delimiter, consistent));
        }
    }
    best.map_or(b',', |(delimiter, _)| delimiter)
}

/// Complete lines of the sample. A trailing partial line is dropped unless it
/// is the only one.
fn sample_lines(text: &str) -> Vec<&str> {
    let sample = match text.char_indices().nth(SNIFF_SAMPLE_CHARS) {
        Some((end, _)) => &text[..end],
        None => text,
    };
    let truncated = sample.len() < text.len();
    let mut lines: Vec<&str> = sample
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if truncated && lines.len() > 1 && !sample.ends_with('\n') {
        lines.pop();
    }
    lines
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

/// Number of lines carrying the most frequent non-zero count.
fn consistent_lines(counts: &[usize]) -> usize {
    let mut frequency: Vec<(usize, usize)> = Vec::new();
    for &count in counts.iter().filter(|&&count| count > 0) {
        match frequency.iter_mut().find(|(value, _)| *value == count) {
            Some((_, seen)) => *seen += 1,
            None => frequency.push((count, 1)),
        }
    }
    frequency.into_iter().map(|(_, seen)| seen).max().unwrap_or(0)
}
