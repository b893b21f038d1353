#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![deny(rust_2018_idioms)]
// #![deny(missing_docs)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::todo)]
#![deny(rustdoc::broken_intra_doc_links)]

mod loader;
mod provider;
mod split;
mod table;

pub use loader::{LoadError, Loader, LoaderOptions, ParseSummary};
#[cfg(feature = "fs")]
pub use provider::FsProvider;
pub use provider::{MemoryProvider, ResourceError, ResourceProvider};
pub use split::{split_lines, FieldSplitter};
pub use table::StringTable;

/// Applies substitutions to a given string, replacing `{0}` with the first
/// substitution, `{1}` with the second, and so on.
pub fn apply_substitutions(f_string: &str, subs: &[String]) -> String {
    let mut output = f_string.to_owned();

    for (i, sub) in subs.iter().enumerate() {
        output = output.replace(&format!("{{{i}}}"), sub);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutions() {
        let subs = ["one".to_owned(), "two".to_owned()];

        assert_eq!(apply_substitutions("{1} then {0}", &subs), "two then one");
        assert_eq!(apply_substitutions("{0}{0}", &subs), "oneone");
        assert_eq!(apply_substitutions("no braces", &subs), "no braces");
        assert_eq!(apply_substitutions("left {2} alone", &subs), "left {2} alone");
    }
}
