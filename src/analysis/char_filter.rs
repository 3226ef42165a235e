//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw document string before it is handed to
//! the linguistic model.
//!
//! # Available Filters
//!
//! - [`line_break::LineBreakCharFilter`] - Deletes line-break characters
//!
//! # Examples
//!
//! ```
//! use lexiphrase::analysis::char_filter::CharFilter;
//! use lexiphrase::analysis::char_filter::line_break::LineBreakCharFilter;
//!
//! let filter = LineBreakCharFilter::new();
//! assert_eq!(filter.filter("one\ntwo"), "onetwo");
//! ```

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod line_break;
