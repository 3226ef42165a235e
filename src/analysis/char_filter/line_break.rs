//! Line-break removal.
//!
//! Raw posts are flattened by deleting `\n` outright rather than replacing it
//! with a space, so `"end\nstart"` becomes `"endstart"`. Carriage returns are
//! left in place and surface later as space tokens.

use super::CharFilter;

/// A char filter that deletes newline characters.
#[derive(Clone, Debug, Default)]
pub struct LineBreakCharFilter;

impl LineBreakCharFilter {
    /// Create a new line-break filter.
    pub fn new() -> Self {
        LineBreakCharFilter
    }
}

impl CharFilter for LineBreakCharFilter {
    fn filter(&self, input: &str) -> String {
        input.replace('\n', "")
    }

    fn name(&self) -> &'static str {
        "line_break"
    }
}
