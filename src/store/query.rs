//! Query builder for document-store reads

use std::collections::HashMap;

/// Sort direction for [`Query::order`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Convert the direction to its wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// A collection query: equality filters, an optional order-by, and an
/// optional row limit. This is the whole query surface the document store
/// offers; anything richer happens client-side.
#[derive(Debug, Clone, Default)]
pub struct Query {
    filters: Vec<(String, String)>,
    order_by: Option<(String, Direction)>,
    limit: Option<u32>,
}

impl Query {
    /// Create a new empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter rows where a field equals a value
    pub fn eq<T: ToString>(mut self, field: &str, value: T) -> Self {
        self.filters.push((field.to_string(), value.to_string()));
        self
    }

    /// Order the results by a field
    pub fn order(mut self, field: &str, direction: Direction) -> Self {
        self.order_by = Some((field.to_string(), direction));
        self
    }

    /// Limit the number of rows returned
    pub fn limit(mut self, count: u32) -> Self {
        self.limit = Some(count);
        self
    }

    /// Get the equality filters
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }

    /// Get the order-by clause
    pub fn order_by(&self) -> Option<(&str, Direction)> {
        self.order_by.as_ref().map(|(f, d)| (f.as_str(), *d))
    }

    /// Get the row limit
    pub fn row_limit(&self) -> Option<u32> {
        self.limit
    }

    /// Encode the query as request parameters (`field=eq.value`,
    /// `order=field.direction`, `limit=count`)
    pub fn to_params(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        for (field, value) in &self.filters {
            params.insert(field.clone(), format!("eq.{}", value));
        }
        if let Some((field, direction)) = &self.order_by {
            params.insert(
                "order".to_string(),
                format!("{}.{}", field, direction.as_str()),
            );
        }
        if let Some(count) = self.limit {
            params.insert("limit".to_string(), count.to_string());
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_filters_order_and_limit() {
        let params = Query::new()
            .eq("email", "a@x.com")
            .order("created_at", Direction::Descending)
            .limit(100)
            .to_params();

        assert_eq!(params.get("email").unwrap(), "eq.a@x.com");
        assert_eq!(params.get("order").unwrap(), "created_at.desc");
        assert_eq!(params.get("limit").unwrap(), "100");
    }

    #[test]
    fn empty_query_has_no_params() {
        assert!(Query::new().to_params().is_empty());
    }
}
