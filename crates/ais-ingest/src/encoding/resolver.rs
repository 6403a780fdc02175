//! Cascading encoding resolution.
//!
//! The statistical guess is trusted only above the profile's threshold. Below
//! it, candidates are tried in order with a strict decode and the first one
//! that succeeds wins: a file that decodes cleanly is a stronger signal than
//! an uncertain byte-distribution score.

use std::path::Path;

use encoding_rs::{BIG5, Encoding, GB18030, GBK, UTF_8, WINDOWS_1252};

use super::detect::{ChardetDetector, DetectionMethod, EncodingGuess, StatisticalDetector, contains_cjk};
use crate::error::{IngestError, Result, read_bytes};

/// Confidence of a candidate decode whose text contains CJK ideographs.
pub const CJK_CANDIDATE_CONFIDENCE: f32 = 0.9;
/// Confidence of a candidate decode without CJK ideographs.
pub const PLAIN_CANDIDATE_CONFIDENCE: f32 = 0.7;
/// Confidence given to the statistical guess when no candidate decodes.
pub const FALLBACK_CONFIDENCE: f32 = 0.5;
/// Guesses below this confidence are not used for conversion.
pub const MIN_CONVERSION_CONFIDENCE: f32 = 0.5;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One entry of a candidate list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Label reported when this candidate wins.
    pub label: &'static str,
    pub encoding: &'static Encoding,
    /// Skip a leading UTF-8 byte-order mark before decoding.
    pub skip_utf8_bom: bool,
}

impl Candidate {
    pub const fn new(label: &'static str, encoding: &'static Encoding) -> Self {
        Self {
            label,
            encoding,
            skip_utf8_bom: false,
        }
    }

    const fn with_bom(label: &'static str, encoding: &'static Encoding) -> Self {
        Self {
            label,
            encoding,
            skip_utf8_bom: true,
        }
    }

    /// Strict decode; `None` on any malformed sequence.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let bytes = if self.skip_utf8_bom {
            bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
        } else {
            bytes
        };
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
    }
}

/// Candidates for whole-file encoding normalization.
pub const GENERAL_CANDIDATES: [Candidate; 9] = [
    Candidate::new("utf-8", UTF_8),
    Candidate::with_bom("utf-8-sig", UTF_8),
    Candidate::new("gbk", GBK),
    Candidate::new("gb2312", GBK),
    Candidate::new("gb18030", GB18030),
    Candidate::new("big5", BIG5),
    Candidate::new("cp936", GBK),
    Candidate::new("iso-8859-1", WINDOWS_1252),
    Candidate::new("latin1", WINDOWS_1252),
];

/// Candidates for reading CSV files during field conversion and validation.
pub const TABULAR_CANDIDATES: [Candidate; 5] = [
    Candidate::new("utf-8", UTF_8),
    Candidate::new("gbk", GBK),
    Candidate::new("gb2312", GBK),
    Candidate::new("gb18030", GB18030),
    Candidate::new("big5", BIG5),
];

/// Where detection is called from.
///
/// The two call sites accept the statistical guess at different confidence
/// levels and try different candidate lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionProfile {
    /// Encoding normalization of arbitrary input (threshold 0.8).
    General,
    /// CSV reading for field conversion and validation (threshold 0.7).
    Tabular,
}

impl DetectionProfile {
    pub fn threshold(&self) -> f32 {
        match self {
            DetectionProfile::General => 0.8,
            DetectionProfile::Tabular => 0.7,
        }
    }

    pub fn candidates(&self) -> &'static [Candidate] {
        match self {
            DetectionProfile::General => &GENERAL_CANDIDATES,
            DetectionProfile::Tabular => &TABULAR_CANDIDATES,
        }
    }
}

/// Text decoded from raw bytes, with the guess that decoded it.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedText {
    /// Decoded text without a leading byte-order mark.
    pub text: String,
    pub guess: EncodingGuess,
    /// A byte-order mark was present and removed.
    pub had_bom: bool,
}

/// Detects the encoding of raw bytes and decodes them.
#[derive(Debug, Clone)]
pub struct EncodingResolver<D = ChardetDetector> {
    detector: D,
    threshold: f32,
    candidates: Vec<Candidate>,
}

impl EncodingResolver {
    /// Resolver using `chardetng` for the initial guess.
    pub fn new(profile: DetectionProfile) -> Self {
        Self::with_detector(ChardetDetector, profile)
    }
}

impl<D: StatisticalDetector> EncodingResolver<D> {
    pub fn with_detector(detector: D, profile: DetectionProfile) -> Self {
        Self {
            detector,
            threshold: profile.threshold(),
            candidates: profile.candidates().to_vec(),
        }
    }

    /// Replaces the candidate list.
    #[must_use]
    pub fn with_candidates(mut self, candidates: Vec<Candidate>) -> Self {
        self.candidates = candidates;
        self
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Guesses the encoding of `bytes`.
    pub fn detect(&self, bytes: &[u8]) -> EncodingGuess {
        let initial = self.detector.guess(bytes);
        tracing::debug!(
            encoding = initial.name,
            confidence = initial.confidence,
            "statistical detection"
        );
        if initial.confidence >= self.threshold {
            return initial;
        }

        tracing::debug!(
            threshold = self.threshold,
            "low confidence detection, trying candidate encodings"
        );
        for candidate in &self.candidates {
            let Some(text) = candidate.decode(bytes) else {
                continue;
            };
            let confidence = if contains_cjk(&text) {
                CJK_CANDIDATE_CONFIDENCE
            } else {
                PLAIN_CANDIDATE_CONFIDENCE
            };
            tracing::debug!(encoding = candidate.label, confidence, "candidate decoded");
            return EncodingGuess::new(
                candidate.encoding,
                candidate.label,
                confidence,
                DetectionMethod::Candidate,
            );
        }

        EncodingGuess::new(
            initial.encoding,
            initial.name,
            FALLBACK_CONFIDENCE,
            DetectionMethod::Fallback,
        )
    }

    /// Detects and decodes, refusing guesses below [`MIN_CONVERSION_CONFIDENCE`].
    pub fn decode(&self, bytes: &[u8]) -> Result<DecodedText> {
        let guess = self.detect(bytes);
        if guess.confidence < MIN_CONVERSION_CONFIDENCE {
            return Err(IngestError::EncodingDetection {
                reason: format!(
                    "could not reliably detect encoding (best guess {} at {:.2})",
                    guess.name, guess.confidence
                ),
            });
        }
        decode_with_guess(bytes, guess)
    }

    /// Reads a file and decodes it with [`decode`](Self::decode).
    pub fn decode_file(&self, path: &Path) -> Result<DecodedText> {
        let bytes = read_bytes(path)?;
        let decoded = self.decode(&bytes)?;
        tracing::debug!(
            path = %path.display(),
            encoding = decoded.guess.name,
            confidence = decoded.guess.confidence,
            "decoded file"
        );
        Ok(decoded)
    }
}

/// Strictly decodes `bytes` with `guess`, removing a leading byte-order mark.
pub fn decode_with_guess(bytes: &[u8], guess: EncodingGuess) -> Result<DecodedText> {
    let (bytes, skipped_bom) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_length)) if encoding == guess.encoding => (&bytes[bom_length..], true),
        _ => (bytes, false),
    };
    let decoded = guess
        .encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .ok_or_else(|| IngestError::EncodingDetection {
            reason: format!("content is not valid {}", guess.name),
        })?;
    let (text, had_bom) = match decoded.strip_prefix('\u{feff}') {
        Some(rest) => (rest.to_string(), true),
        None => (decoded.into_owned(), skipped_bom),
    };
    Ok(DecodedText {
        text,
        guess,
        had_bom,
    })
}

/// Decodes with an explicitly named encoding (WHATWG labels plus the
/// candidate labels such as `cp936` and `utf-8-sig`).
pub fn decode_with_label(bytes: &[u8], label: &str) -> Result<DecodedText> {
    let normalized = label.trim().to_lowercase();
    let known = GENERAL_CANDIDATES
        .iter()
        .find(|candidate| candidate.label == normalized)
        .map(|candidate| (candidate.encoding, candidate.label));
    let (encoding, name) = match known {
        Some(found) => found,
        None => {
            let encoding = Encoding::for_label(normalized.as_bytes()).ok_or_else(|| {
                IngestError::UnknownEncoding {
                    label: label.to_string(),
                }
            })?;
            (encoding, encoding.name())
        }
    };
    decode_with_guess(
        bytes,
        EncodingGuess::new(encoding, name, 1.0, DetectionMethod::Candidate),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedDetector(EncodingGuess);

    impl StatisticalDetector for FixedDetector {
        fn guess(&self, _bytes: &[u8]) -> EncodingGuess {
            self.0
        }
    }

    fn fixed(encoding: &'static Encoding, confidence: f32) -> FixedDetector {
        FixedDetector(EncodingGuess::new(
            encoding,
            encoding.name(),
            confidence,
            DetectionMethod::Statistical,
        ))
    }

    fn gbk_bytes(text: &str) -> Vec<u8> {
        GBK.encode(text).0.into_owned()
    }

    #[test]
    fn test_thresholds_differ_by_profile() {
        assert_eq!(DetectionProfile::General.threshold(), 0.8);
        assert_eq!(DetectionProfile::Tabular.threshold(), 0.7);
    }

    #[test]
    fn test_confident_guess_is_accepted() {
        let resolver =
            EncodingResolver::with_detector(fixed(GBK, 0.85), DetectionProfile::General);
        let guess = resolver.detect(&gbk_bytes("类别"));
        assert_eq!(guess.encoding, GBK);
        assert_eq!(guess.method, DetectionMethod::Statistical);
    }

    #[test]
    fn test_guess_between_thresholds_depends_on_profile() {
        let bytes = gbk_bytes("设备名称,类别\n");

        let tabular = EncodingResolver::with_detector(fixed(GB18030, 0.75), DetectionProfile::Tabular);
        let guess = tabular.detect(&bytes);
        assert_eq!(guess.encoding, GB18030);
        assert_eq!(guess.method, DetectionMethod::Statistical);

        let general = EncodingResolver::with_detector(fixed(GB18030, 0.75), DetectionProfile::General);
        let guess = general.detect(&bytes);
        assert_eq!(guess.name, "gbk");
        assert_eq!(guess.method, DetectionMethod::Candidate);
        assert_eq!(guess.confidence, CJK_CANDIDATE_CONFIDENCE);
    }

    #[test]
    fn test_candidate_without_cjk_gets_lower_confidence() {
        let resolver = EncodingResolver::with_detector(fixed(UTF_8, 0.1), DetectionProfile::General);
        let guess = resolver.detect(b"Item Name,Category\n");
        assert_eq!(guess.name, "utf-8");
        assert_eq!(guess.confidence, PLAIN_CANDIDATE_CONFIDENCE);
    }

    #[test]
    fn test_first_decodable_candidate_wins() {
        // 0xFF is invalid in UTF-8, GBK and Big5 alike
        let resolver = EncodingResolver::with_detector(fixed(UTF_8, 0.1), DetectionProfile::General);
        let guess = resolver.detect(b"caf\xE9\xFF");
        assert_eq!(guess.name, "iso-8859-1");
    }

    #[test]
    fn test_fallback_when_nothing_decodes() {
        let resolver = EncodingResolver::with_detector(fixed(UTF_8, 0.2), DetectionProfile::Tabular)
            .with_candidates(vec![Candidate::new("utf-8", UTF_8)]);
        let guess = resolver.detect(b"\xFF\xFE\xFD");
        assert_eq!(guess.method, DetectionMethod::Fallback);
        assert_eq!(guess.confidence, FALLBACK_CONFIDENCE);
        assert_eq!(guess.encoding, UTF_8);
    }

    #[test]
    fn test_decode_fails_when_fallback_cannot_decode() {
        let resolver = EncodingResolver::with_detector(fixed(UTF_8, 0.2), DetectionProfile::Tabular)
            .with_candidates(vec![Candidate::new("utf-8", UTF_8)]);
        let result = resolver.decode(b"\xFF\xFE\xFD");
        assert!(matches!(result, Err(IngestError::EncodingDetection { .. })));
    }

    #[test]
    fn test_gbk_round_trip_with_default_detector() {
        let text = "设备名称,类别,状态\n笔记本,笔记本电脑,在用\n";
        let resolver = EncodingResolver::new(DetectionProfile::General);
        let decoded = resolver.decode(&gbk_bytes(text)).unwrap();
        assert_eq!(decoded.text, text);
        assert!(!decoded.had_bom);
    }

    #[test]
    fn test_bom_is_removed() {
        let resolver = EncodingResolver::new(DetectionProfile::General);
        let decoded = resolver.decode("\u{feff}类别,状态\n".as_bytes()).unwrap();
        assert_eq!(decoded.text, "类别,状态\n");
        assert!(decoded.had_bom);
    }

    #[test]
    fn test_utf8_candidate_strips_inline_bom() {
        let resolver = EncodingResolver::with_detector(fixed(UTF_8, 0.1), DetectionProfile::General);
        let decoded = resolver.decode("\u{feff}a,b\n".as_bytes()).unwrap();
        assert_eq!(decoded.guess.name, "utf-8");
        assert_eq!(decoded.text, "a,b\n");
        assert!(decoded.had_bom);
    }

    #[test]
    fn test_decode_with_label() {
        let decoded = decode_with_label(&gbk_bytes("状态"), "cp936").unwrap();
        assert_eq!(decoded.text, "状态");
        assert_eq!(decoded.guess.name, "cp936");

        let decoded = decode_with_label(b"caf\xE9", "windows-1252").unwrap();
        assert_eq!(decoded.text, "café");
    }

    #[test]
    fn test_decode_with_unknown_label() {
        let result = decode_with_label(b"abc", "klingon");
        assert!(matches!(result, Err(IngestError::UnknownEncoding { .. })));
    }
}
