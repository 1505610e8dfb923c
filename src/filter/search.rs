/// Records that can be matched by the free-text search box.
pub trait Searchable {
    /// Every field value of the record, rendered as text.
    fn field_values(&self) -> Vec<String>;

    /// All field values joined by newlines and lower-cased.
    fn search_text(&self) -> String {
        self.field_values().join("\n").to_lowercase()
    }
}

/// Case-insensitive substring match against all of a record's fields.
/// An empty query matches everything.
pub fn matches<T: Searchable + ?Sized>(record: &T, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    record.search_text().contains(&query.to_lowercase())
}

/// Positions of the records matching `query`, in input order.
pub fn matching_indices<'a, T: Searchable + 'a>(
    records: impl IntoIterator<Item = &'a T>,
    query: &str,
) -> Vec<usize> {
    records
        .into_iter()
        .enumerate()
        .filter(|(_, r)| matches(*r, query))
        .map(|(i, _)| i)
        .collect()
}

/// The records matching `query`, in input order.
pub fn filter_records<'a, T: Searchable>(records: &'a [T], query: &str) -> Vec<&'a T> {
    records.iter().filter(|r| matches(*r, query)).collect()
}
