//! The reorder submission body.
//!
//! The server expects a single form field whose value is the comma-joined list
//! of item ids in top-to-bottom order, e.g. `todo-ids=3,1,2`.

use std::fmt;

use serde::Serialize;
use url::form_urlencoded;

use crate::item::ItemId;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReorderRequest {
    pub ids: Vec<ItemId>,
}

impl ReorderRequest {
    pub fn new(ids: Vec<ItemId>) -> Self {
        Self { ids }
    }

    /// `application/x-www-form-urlencoded` body. Ids are escaped one by one so
    /// the separating commas stay literal.
    pub fn to_form_body(&self, field: &str) -> String {
        let mut body: String = form_urlencoded::byte_serialize(field.as_bytes()).collect();
        body.push('=');
        for (index, id) in self.ids.iter().enumerate() {
            if index > 0 {
                body.push(',');
            }
            body.extend(form_urlencoded::byte_serialize(id.as_str().as_bytes()));
        }
        body
    }

    /// Parses a body produced by [`Self::to_form_body`] (or by a browser form).
    pub fn from_form_body(field: &str, body: &str) -> Result<Self, ReorderError> {
        let (_, value) = form_urlencoded::parse(body.as_bytes())
            .find(|(name, _)| name == field)
            .ok_or_else(|| ReorderError::MissingField(field.to_owned()))?;
        if value.trim().is_empty() {
            return Err(ReorderError::MissingField(field.to_owned()));
        }
        let ids = value
            .split(',')
            .enumerate()
            .map(|(position, token)| ItemId::new(token.trim()).ok_or(ReorderError::EmptyId { position }))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { ids })
    }
}

impl fmt::Display for ReorderRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, id) in self.ids.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{id}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    MissingField(String),
    EmptyId { position: usize },
}

impl fmt::Display for ReorderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReorderError::MissingField(field) => write!(f, "form field '{field}' is missing or empty"),
            ReorderError::EmptyId { position } => write!(f, "empty item id at position {position}"),
        }
    }
}

impl std::error::Error for ReorderError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ids: &[&str]) -> ReorderRequest {
        ReorderRequest::new(ids.iter().map(|id| ItemId::new(*id).unwrap()).collect())
    }

    #[test]
    fn body_keeps_commas_literal() {
        assert_eq!(request(&["3", "1", "2"]).to_form_body("todo-ids"), "todo-ids=3,1,2");
    }

    #[test]
    fn ids_are_escaped() {
        assert_eq!(request(&["a b", "c,d", "é"]).to_form_body("ids"), "ids=a+b,c%2Cd,%C3%A9");
    }

    #[test]
    fn parses_browser_style_bodies() {
        let parsed = ReorderRequest::from_form_body("todo-ids", "other=1&todo-ids=3%2C+1,2").unwrap();
        assert_eq!(parsed, request(&["3", "1", "2"]));
    }

    #[test]
    fn rejects_missing_field_and_holes() {
        assert_eq!(
            ReorderRequest::from_form_body("todo-ids", "ids=1"),
            Err(ReorderError::MissingField("todo-ids".to_owned()))
        );
        assert_eq!(
            ReorderRequest::from_form_body("todo-ids", "todo-ids="),
            Err(ReorderError::MissingField("todo-ids".to_owned()))
        );
        assert_eq!(
            ReorderRequest::from_form_body("todo-ids", "todo-ids=1,,2"),
            Err(ReorderError::EmptyId { position: 1 })
        );
    }

    #[test]
    fn display_joins_ids() {
        assert_eq!(request(&["7", "8"]).to_string(), "7,8");
    }
}
