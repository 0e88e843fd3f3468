/// Fixed number of questions per page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Returns the `page`-th (one-indexed) slice of `page_size` items. Out-of-range pages are empty.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let Some(start) = page.checked_sub(1).and_then(|index| index.checked_mul(page_size)) else {
        return &[];
    };
    let Some(rest) = items.get(start..) else {
        return &[];
    };
    &rest[..rest.len().min(page_size)]
}

/// Extracts the `page` query parameter. Absent, non-numeric, and zero values fall back to the first page.
pub fn parse_page(query: Option<&str>) -> usize {
    query
        .into_iter()
        .flat_map(|query| query.split('&'))
        .filter_map(|chunk| chunk.split_once('='))
        .find_map(|(key, value)| (key == "page").then_some(value))
        .and_then(|value| value.parse().ok())
        .filter(|&page| page > 0)
        .unwrap_or(1)
}
