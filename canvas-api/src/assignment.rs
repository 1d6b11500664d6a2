use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use serde_with::{DefaultOnError, PickFirst, serde_as, serde_conv};

/// The parts of a Canvas assignment object that drive iteration. Everything else in the object is
/// left alone and dumped as returned.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct Assignment {
    #[serde_as(as = "PickFirst<(AssignmentIdAsInt, _)>")]
    id: AssignmentId,
    /// Only ever logged, so a missing or non-string name is tolerated.
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    name: Option<AssignmentName>,
}

impl Assignment {
    /// The elements of a raw assignments listing, in listing order.
    pub fn items(assignments: &Value) -> Result<&[Value]> {
        assignments
            .as_array()
            .map(Vec::as_slice)
            .context("assignments listing is not an array")
    }

    pub fn from_item(item: &Value) -> Result<Assignment> {
        Assignment::deserialize(item).context("assignment has no usable `id`")
    }

    pub fn id(&self) -> &AssignmentId {
        &self.id
    }

    pub fn name(&self) -> Option<&AssignmentName> {
        self.name.as_ref()
    }

    /// The name for log lines, `None` when the listing has none.
    pub fn display_name(&self) -> &str {
        self.name.as_ref().map_or("None", AssignmentName::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct AssignmentId {
    id: String,
}

impl AssignmentId {
    pub fn new(id: String) -> Self {
        Self { id }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for AssignmentId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.id.fmt(f)
    }
}

serde_conv! {
    pub(crate) AssignmentIdAsInt,
    AssignmentId,
    |assignment_id: &AssignmentId| assignment_id.id.clone(),
    |value: u64| -> Result<_, std::convert::Infallible> {
        Ok(AssignmentId {
            id: value.to_string(),
        })
    }
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct AssignmentName {
    name: String,
}

impl AssignmentName {
    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for AssignmentName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.name.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse_all(listing: &Value) -> Vec<Assignment> {
        Assignment::items(listing)
            .unwrap()
            .iter()
            .map(|item| Assignment::from_item(item).unwrap())
            .collect()
    }

    #[test]
    fn integer_and_string_ids_are_both_accepted() {
        let listing = json!([
            {"id": 101, "name": "HW1", "points_possible": 10.0},
            {"id": "102", "name": "HW2"},
        ]);

        let assignments = parse_all(&listing);
        let ids: Vec<_> = assignments.iter().map(|a| a.id().as_str()).collect();
        let names: Vec<_> = assignments.iter().map(Assignment::display_name).collect();
        assert_eq!(ids, ["101", "102"]);
        assert_eq!(names, ["HW1", "HW2"]);
    }

    #[test]
    fn non_ascii_names_survive() {
        let listing = json!([{"id": 7, "name": "Übung 1: 課題"}]);
        let assignments = parse_all(&listing);
        assert_eq!(assignments[0].display_name(), "Übung 1: 課題");
    }

    #[test]
    fn odd_names_do_not_stop_parsing() {
        let listing = json!([
            {"id": 1, "name": null},
            {"id": 2, "name": 17},
            {"id": 3},
        ]);

        for assignment in parse_all(&listing) {
            assert!(assignment.name().is_none());
            assert_eq!(assignment.display_name(), "None");
        }
    }

    #[test]
    fn item_without_id_is_an_error() {
        assert!(Assignment::from_item(&json!({"name": "HW1"})).is_err());
    }

    #[test]
    fn error_object_instead_of_listing_is_an_error() {
        let listing = json!({"errors": [{"message": "unauthorized"}]});
        assert!(Assignment::items(&listing).is_err());
    }
}
