//! @ai:module:intent Whitespace normalization for sentence comparison
//! @ai:module:layer domain
//! @ai:module:public_api normalize
//! @ai:module:stateless true

/// @ai:intent Collapse whitespace runs to one space and trim both ends
/// @ai:effects pure
pub fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// @ai:intent Compare two sentences ignoring incidental spacing
/// @ai:effects pure
pub fn same_sentence(a: &str, b: &str) -> bool {
    a.split_whitespace().eq(b.split_whitespace())
}
