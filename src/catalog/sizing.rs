//! Print-size to provider package code mapping.

use serde::{Deserialize, Serialize};

/// Paperback trim size of an edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrintSize {
    S,
    M,
    Xl,
}

/// Below this many pages a book is saddle stitched instead of perfect bound.
pub const MIN_PERFECT_BOUND_PAGES: u32 = 32;

/// Provider package code for a paperback of `size` with `pages` pages:
/// trim, black & white standard interior, binding, 60# uncoated paper, matte cover.
pub fn pod_package_id(size: PrintSize, pages: u32) -> String {
    let trim = match size {
        PrintSize::S => "0425X0687",
        PrintSize::M => "0550X0850",
        PrintSize::Xl => "0600X0900",
    };
    let binding = if pages < MIN_PERFECT_BOUND_PAGES {
        "SS"
    } else {
        "PB"
    };
    format!("{trim}BWSTD{binding}060UW444MXX")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_code_depends_on_trim_and_binding() {
        assert_eq!(pod_package_id(PrintSize::M, 242), "0550X0850BWSTDPB060UW444MXX");
        assert_eq!(pod_package_id(PrintSize::S, 31), "0425X0687BWSTDSS060UW444MXX");
        assert_eq!(pod_package_id(PrintSize::Xl, 32), "0600X0900BWSTDPB060UW444MXX");
    }
}
