//! Encoding detection and UTF-8 normalization.

mod detect;
mod fix;
mod resolver;

pub use detect::{
    ASSESSED_DECODE_CONFIDENCE, CLEAN_DECODE_CONFIDENCE, ChardetDetector, DetectionMethod,
    EncodingGuess, MALFORMED_DECODE_CONFIDENCE, StatisticalDetector, contains_cjk, count_cjk,
};
pub use fix::{
    EncodingFixReport, HEADER_PREVIEW_FIELDS, Utf8Conversion, Utf8Report, convert_to_utf8,
    fix_encoding, inspect_utf8, inspect_utf8_file, strip_bom_file,
};
pub use resolver::{
    CJK_CANDIDATE_CONFIDENCE, Candidate, DecodedText, DetectionProfile, EncodingResolver,
    FALLBACK_CONFIDENCE, GENERAL_CANDIDATES, MIN_CONVERSION_CONFIDENCE,
    PLAIN_CANDIDATE_CONFIDENCE, TABULAR_CANDIDATES, decode_with_guess, decode_with_label,
};
