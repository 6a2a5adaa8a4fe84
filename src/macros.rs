/// Compile a literal regex once and hand out a `&'static Regex`.
///
/// Only used for fixed patterns that are not part of a caller's vocabulary
/// (committer identity parsing). Vocabulary-dependent patterns live on
/// [`crate::Extractor`] instances instead.
#[macro_export]
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}
