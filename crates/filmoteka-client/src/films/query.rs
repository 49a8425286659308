/// Sorting, paging and search options for the film list.
///
/// Only options that are actually set reach the query string: an empty string,
/// `descending == false` and index 0 are all left out, the server's defaults cover them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmsQuery {
    pub order_by: Option<String>,
    pub descending: bool,
    pub index_from: Option<u32>,
    pub index_to: Option<u32>,
    pub search: Option<String>,
}

impl FilmsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query for page `page` (0-based) of `page_size` films
    pub fn page(page: u32, page_size: u32) -> Self {
        let from = page.saturating_mul(page_size);
        Self {
            index_from: Some(from),
            index_to: Some(from.saturating_add(page_size)),
            ..Self::default()
        }
    }

    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    pub fn descending(mut self, descending: bool) -> Self {
        self.descending = descending;
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Query parameters in wire order
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(order_by) = self.order_by.as_ref().filter(|s| !s.is_empty()) {
            params.push(("orderBy", order_by.clone()));
        }
        if self.descending {
            params.push(("descending", "true".to_string()));
        }
        if let Some(from) = self.index_from.filter(|n| *n != 0) {
            params.push(("indexFrom", from.to_string()));
        }
        if let Some(to) = self.index_to.filter(|n| *n != 0) {
            params.push(("indexTo", to.to_string()));
        }
        if let Some(search) = self.search.as_ref().filter(|s| !s.is_empty()) {
            params.push(("search", search.clone()));
        }
        params
    }
}
