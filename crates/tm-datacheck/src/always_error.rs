use rustc_hash::FxHashSet;

/// Codes that can never be reconciled as false positives, regardless of
/// what `datacheckfps.csv` says. A false-positive row naming one of these
/// is itself an input error, logged and ignored rather than applied.
pub const ALWAYS_ERROR: &[&str] = &[
    "ABBREV_AS_CHOP_BANNER",
    "ABBREV_AS_CON_BANNER",
    "ABBREV_NO_CITY",
    "BAD_ANGLE",
    "CON_BANNER_MISMATCH",
    "CON_ROUTE_MISMATCH",
    "DISCONNECTED_ROUTE",
    "DUPLICATE_LABEL",
    "HIDDEN_TERMINUS",
    "INTERSTATE_NO_HYPHEN",
    "INVALID_FINAL_CHAR",
    "INVALID_FIRST_CHAR",
    "LABEL_INVALID_CHAR",
    "LABEL_LOWERCASE",
    "LABEL_PARENS",
    "LABEL_SLASHES",
    "LABEL_TOO_LONG",
    "LABEL_UNDERSCORES",
    "LONG_UNDERSCORE",
    "LOWERCASE_SUFFIX",
    "MALFORMED_LAT",
    "MALFORMED_LON",
    "MALFORMED_URL",
    "MULTI_REGION_OVERLAP",
    "NONTERMINAL_UNDERSCORE",
    "SINGLE_FIELD_LINE",
    "US_LETTER",
];

pub fn always_error_set() -> FxHashSet<&'static str> {
    ALWAYS_ERROR.iter().copied().collect()
}
