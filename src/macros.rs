//! Public macros for constructing option structs without relying on struct literal syntax.
//!
//! These keep call sites stable when [`crate::Options`] gains fields.

/// Construct [`crate::Options`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// let options = tagparser::options! {
///     max_tag_length: 1024,
///     strip_outer_quotes: false,
/// };
/// assert_eq!(options.max_tag_length, 1024);
/// ```
#[macro_export]
macro_rules! options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::Options::default();
        $(
            #[allow(deprecated)]
            {
                opt.$field = $value;
            }
        )*
        opt
    }};
}
