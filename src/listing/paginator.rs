/// Splits a slice into fixed-size, 1-based pages
pub struct Paginator<'a, T> {
    items: &'a [T],
    page_size: usize,
    page_count: usize,
}

impl<'a, T> Paginator<'a, T> {
    /// A `page_size` of 0 is treated as 1
    pub fn new(items: &'a [T], page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let page_count = items.len().div_ceil(page_size);

        Paginator {
            items,
            page_size,
            page_count,
        }
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Items on `page`; empty for page 0 and pages past the end
    pub fn get_page(&self, page: usize) -> &'a [T] {
        if page == 0 || page > self.page_count {
            return &[];
        }

        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        &self.items[start..end]
    }
}
