//! Statistical encoding detection.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use serde::Serialize;

/// Confidence for a guess `chardetng` stands behind that also decodes the
/// input without errors. Clears every profile threshold.
pub const ASSESSED_DECODE_CONFIDENCE: f32 = 0.95;

/// Confidence for a guess that decodes cleanly but that `chardetng` itself
/// rates as implausible. Stays below every profile threshold.
pub const CLEAN_DECODE_CONFIDENCE: f32 = 0.6;

/// Confidence for a statistical guess that fails to decode the input.
pub const MALFORMED_DECODE_CONFIDENCE: f32 = 0.25;

/// How an encoding guess was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DetectionMethod {
    /// A byte-order mark named the encoding.
    ByteOrderMark,
    /// Byte-distribution analysis.
    Statistical,
    /// First entry of the candidate list that decoded cleanly.
    Candidate,
    /// Nothing decoded; the statistical guess was kept anyway.
    Fallback,
}

/// An encoding name with a confidence in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodingGuess {
    /// Decoder to use.
    pub encoding: &'static Encoding,
    /// Name reported to users (candidate label or WHATWG name).
    pub name: &'static str,
    pub confidence: f32,
    pub method: DetectionMethod,
}

impl EncodingGuess {
    pub fn new(
        encoding: &'static Encoding,
        name: &'static str,
        confidence: f32,
        method: DetectionMethod,
    ) -> Self {
        Self {
            encoding,
            name,
            confidence: confidence.clamp(0.0, 1.0),
            method,
        }
    }
}

/// Produces an initial guess from raw bytes.
pub trait StatisticalDetector {
    fn guess(&self, bytes: &[u8]) -> EncodingGuess;
}

/// Detector backed by `chardetng`, scored against a strict `encoding_rs` decode.
///
/// | Input                            | Guess                | Confidence |
/// |----------------------------------|----------------------|------------|
/// | byte-order mark                  | BOM encoding         | 1.0        |
/// | empty                            | UTF-8                | 0.0        |
/// | ASCII only                       | UTF-8                | 1.0        |
/// | valid multi-byte UTF-8           | UTF-8                | 0.99       |
/// | plausible guess, decodes cleanly | chardetng            | 0.95       |
/// | doubtful guess, decodes cleanly  | chardetng            | 0.6        |
/// | anything else, malformed         | chardetng            | 0.25       |
#[derive(Debug, Clone, Copy, Default)]
pub struct ChardetDetector;

impl StatisticalDetector for ChardetDetector {
    fn guess(&self, bytes: &[u8]) -> EncodingGuess {
        if let Some((encoding, _)) = Encoding::for_bom(bytes) {
            let name = if encoding == UTF_8 {
                "UTF-8-SIG"
            } else {
                encoding.name()
            };
            return EncodingGuess::new(encoding, name, 1.0, DetectionMethod::ByteOrderMark);
        }
        if bytes.is_empty() {
            return EncodingGuess::new(UTF_8, UTF_8.name(), 0.0, DetectionMethod::Statistical);
        }
        if bytes.is_ascii() {
            return EncodingGuess::new(UTF_8, UTF_8.name(), 1.0, DetectionMethod::Statistical);
        }
        if std::str::from_utf8(bytes).is_ok() {
            return EncodingGuess::new(UTF_8, UTF_8.name(), 0.99, DetectionMethod::Statistical);
        }

        let mut detector = EncodingDetector::new();
        detector.feed(bytes, true);
        let (encoding, plausible) = detector.guess_assess(None, false);
        let clean = encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .is_some();
        let confidence = match (clean, plausible) {
            (true, true) => ASSESSED_DECODE_CONFIDENCE,
            (true, false) => CLEAN_DECODE_CONFIDENCE,
            (false, _) => MALFORMED_DECODE_CONFIDENCE,
        };
        EncodingGuess::new(
            encoding,
            encoding.name(),
            confidence,
            DetectionMethod::Statistical,
        )
    }
}

/// Returns true if the text contains a CJK Unified Ideograph (U+4E00..=U+9FFF).
pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Counts CJK Unified Ideographs.
pub fn count_cjk(text: &str) -> usize {
    text.chars().filter(|c| is_cjk(*c)).count()
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{BIG5, GBK, UTF_16LE};

    #[test]
    fn test_utf8_bom_is_certain() {
        let guess = ChardetDetector.guess(b"\xEF\xBB\xBFa,b\n");
        assert_eq!(guess.encoding, UTF_8);
        assert_eq!(guess.name, "UTF-8-SIG");
        assert_eq!(guess.confidence, 1.0);
        assert_eq!(guess.method, DetectionMethod::ByteOrderMark);
    }

    #[test]
    fn test_utf16_bom() {
        let guess = ChardetDetector.guess(b"\xFF\xFEa\x00");
        assert_eq!(guess.encoding, UTF_16LE);
    }

    #[test]
    fn test_empty_input_has_no_confidence() {
        let guess = ChardetDetector.guess(b"");
        assert_eq!(guess.confidence, 0.0);
    }

    #[test]
    fn test_ascii_is_certain_utf8() {
        let guess = ChardetDetector.guess(b"Item Name,Category\nX1,Laptop\n");
        assert_eq!(guess.encoding, UTF_8);
        assert_eq!(guess.confidence, 1.0);
    }

    #[test]
    fn test_multibyte_utf8() {
        let guess = ChardetDetector.guess("设备名称,类别\n".as_bytes());
        assert_eq!(guess.encoding, UTF_8);
        assert!((guess.confidence - 0.99).abs() < f32::EPSILON);
    }

    #[test]
    fn test_simplified_chinese_is_assessed_as_gbk() {
        let (bytes, _, _) = GBK.encode("设备名称,类别,状态\n笔记本,笔记本电脑,在用\n");
        let guess = ChardetDetector.guess(&bytes);
        assert_eq!(guess.method, DetectionMethod::Statistical);
        assert_eq!(guess.encoding, GBK);
        assert_eq!(guess.confidence, ASSESSED_DECODE_CONFIDENCE);
    }

    #[test]
    fn test_traditional_chinese_is_assessed_as_big5() {
        let (bytes, _, _) = BIG5.encode("設備名稱,類別,狀態,製造商\n筆記型電腦,筆記型電腦,使用中,戴爾\n");
        let guess = ChardetDetector.guess(&bytes);
        assert_eq!(guess.encoding, BIG5);
        assert!(guess.confidence >= 0.8);
    }

    #[test]
    fn test_contains_cjk() {
        assert!(contains_cjk("资产 asset"));
        assert!(!contains_cjk("asset ü"));
        assert_eq!(count_cjk("设备a类别"), 4);
    }
}
