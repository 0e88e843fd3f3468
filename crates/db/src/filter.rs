use alloc::{format, string::String, vec::Vec};
use model::Question;
use tokio_postgres::types::ToSql;

/// A conjunction of question predicates. The default filter matches everything.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filter {
    category: Option<i32>,
    /// Always stored in lowercase.
    search: Option<String>,
    exclude: Vec<i32>,
}

impl Filter {
    /// Matches every question.
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches questions of the given category.
    pub fn by_category(category: i32) -> Self {
        Self::all().and_category(category)
    }

    /// Matches questions whose text contains `term`, ignoring case. Blank terms are rejected.
    pub fn by_search_term(term: &str) -> Option<Self> {
        if term.trim().is_empty() {
            return None;
        }
        Some(Self { search: Some(term.to_lowercase()), ..Self::all() })
    }

    /// Matches questions whose ID is not in `ids`.
    pub fn excluding<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        Self::all().and_excluding(ids)
    }

    pub fn and_category(mut self, category: i32) -> Self {
        self.category = Some(category);
        self
    }

    pub fn and_excluding<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        self.exclude.extend(ids);
        self.exclude.sort_unstable();
        self.exclude.dedup();
        self
    }

    /// Evaluates the predicate against a single question.
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(category) = self.category {
            if question.category != Some(category) {
                return false;
            }
        }

        if let Some(term) = self.search.as_deref() {
            if !question.question.to_lowercase().contains(term) {
                return false;
            }
        }

        self.exclude.binary_search(&question.id).is_err()
    }

    /// Renders the predicate as a parameterized `WHERE` clause (without the keyword).
    pub fn to_sql(&self) -> (String, Vec<&(dyn ToSql + Sync)>) {
        let mut conditions = Vec::new();
        let mut params: Vec<&(dyn ToSql + Sync)> = Vec::new();

        if let Some(category) = self.category.as_ref() {
            params.push(category);
            conditions.push(format!("category = ${}", params.len()));
        }

        // `strpos` keeps `%` and `_` literal, unlike `ILIKE`.
        if let Some(term) = self.search.as_ref() {
            params.push(term);
            conditions.push(format!("strpos(lower(question), ${}) > 0", params.len()));
        }

        if !self.exclude.is_empty() {
            params.push(&self.exclude);
            conditions.push(format!("NOT (id = ANY(${}))", params.len()));
        }

        if conditions.is_empty() {
            return (String::from("TRUE"), params);
        }

        (conditions.join(" AND "), params)
    }
}
