pub mod plants;
pub mod reference;

pub use plants::load_catalog;
pub use reference::load_reference;

/// Split a `;`-separated row. Trailing empty fields are dropped, so
/// `a;b;;` has two fields.
pub(crate) fn split_fields(line: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = line.split(';').collect();
    while fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}
