/// Language codes advertised by `GET /api/v1/languages`.
///
/// This is a static, documentation-level list; the synthesis engine is the
/// real authority and rejects codes it cannot speak at request time.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("sv", "Swedish"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("ja", "Japanese"),
    ("zh-cn", "Chinese (Simplified)"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("ko", "Korean"),
];

pub fn supported_languages() -> &'static [(&'static str, &'static str)] {
    SUPPORTED_LANGUAGES
}
