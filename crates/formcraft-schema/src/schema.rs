// File: formcraft-schema/src/schema.rs
// Purpose: The ordered field list, lookups and editor operations

use serde::{Deserialize, Serialize};

use crate::document::SchemaDocument;
use crate::field::{Condition, FieldDefinition};
use crate::id::FieldId;

/// An ordered collection of field definitions
///
/// Order is display order. Fields can only be changed through the editing
/// methods below, which keep every [`Condition`] resolved against the
/// current labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SchemaDocument", into = "SchemaDocument")]
pub struct FormSchema {
    fields: Vec<FieldDefinition>,
    /// Next id handed out by `add_field`; only ever moves forward, `None` once
    /// every numeric id has been used
    next_id: Option<u64>,
}

impl FormSchema {
    /// Build a schema from fields in display order, resolving their conditions
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        let next_id = first_free_id(&fields);
        let mut schema = Self { fields, next_id };
        schema.resolve_conditions();
        schema
    }

    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First field whose label matches exactly (case-sensitive)
    pub fn find_field_by_label(&self, label: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.label == label)
    }

    pub fn find_field_by_id(&self, id: &FieldId) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| &f.id == id)
    }

    /// The field a condition refers to
    ///
    /// Returns `None` when the field has no condition, or when the condition
    /// does not resolve to exactly one field of this schema. The resolved id
    /// cached on the condition is used only while it still names the field
    /// carrying that label here; fields from another schema resolve by label.
    pub fn condition_target(&self, field: &FieldDefinition) -> Option<&FieldDefinition> {
        let condition = field.condition.as_ref()?;
        let cached = condition
            .target()
            .and_then(|id| self.find_field_by_id(id))
            .filter(|target| {
                target.label == condition.label() && self.label_count(&target.label) == 1
            });

        cached.or_else(|| {
            self.unique_id_for_label(condition.label())
                .and_then(|id| self.find_field_by_id(&id))
        })
    }

    /// Append a blank text field and return its newly assigned id
    ///
    /// Returns `None` without changing the schema when no numeric id is left.
    pub fn add_field(&mut self) -> Option<FieldId> {
        self.add_field_with(|_| {})
    }

    /// Append a field initialised by `init` and return its newly assigned id
    ///
    /// The id is assigned by the schema; changes `init` makes to it are
    /// discarded. Returns `None` without changing the schema when no numeric
    /// id is left.
    pub fn add_field_with<F>(&mut self, init: F) -> Option<FieldId>
    where
        F: FnOnce(&mut FieldDefinition),
    {
        let Some(next) = self.next_id else {
            tracing::warn!("Cannot add field: numeric ids are exhausted");
            return None;
        };
        let id = FieldId::Numeric(next);
        self.next_id = next.checked_add(1);

        let mut field = FieldDefinition::new(id.clone(), "", Default::default());
        init(&mut field);
        field.id = id.clone();

        tracing::debug!("Added field {} ({})", id, field.field_type);
        self.fields.push(field);
        self.resolve_conditions();
        Some(id)
    }

    /// Remove a field; conditions that pointed at it become unresolved
    pub fn remove_field(&mut self, id: &FieldId) -> Option<FieldDefinition> {
        let index = self.position(id)?;
        let removed = self.fields.remove(index);
        tracing::debug!("Removed field {} ({:?})", id, removed.label);
        self.resolve_conditions();
        Some(removed)
    }

    /// Edit a field in place
    ///
    /// If the edit renames the field, conditions that pointed at it are
    /// rewritten to the new label so they keep following it. Returns `false`
    /// when no field has `id`. The field's id cannot be changed.
    pub fn update_field<F>(&mut self, id: &FieldId, edit: F) -> bool
    where
        F: FnOnce(&mut FieldDefinition),
    {
        let Some(index) = self.position(id) else {
            return false;
        };

        let old_label = self.fields[index].label.clone();
        edit(&mut self.fields[index]);
        self.fields[index].id = id.clone();

        let new_label = self.fields[index].label.clone();
        if new_label != old_label {
            tracing::debug!("Field {} renamed {:?} -> {:?}", id, old_label, new_label);
            for field in &mut self.fields {
                if let Some(condition) = &mut field.condition {
                    if condition.target.as_ref() == Some(id) {
                        condition.label = new_label.clone();
                    }
                }
            }
        }

        self.resolve_conditions();
        true
    }

    /// Set or clear the visibility condition of a field
    pub fn set_condition(&mut self, id: &FieldId, label: Option<&str>) -> bool {
        self.update_field(id, |field| {
            field.condition = label.filter(|l| !l.is_empty()).map(Condition::new);
        })
    }

    /// Re-resolve every condition against the current labels
    pub fn resolve_conditions(&mut self) {
        let targets: Vec<Option<FieldId>> = self
            .fields
            .iter()
            .map(|field| {
                field
                    .condition
                    .as_ref()
                    .and_then(|c| self.unique_id_for_label(c.label()))
            })
            .collect();

        for (field, target) in self.fields.iter_mut().zip(targets) {
            if let Some(condition) = &mut field.condition {
                if target.is_none() {
                    tracing::debug!(
                        "Condition of field {} on {:?} does not resolve",
                        field.id,
                        condition.label
                    );
                }
                condition.target = target;
            }
        }
    }

    /// Number of fields carrying `label`
    pub fn label_count(&self, label: &str) -> usize {
        self.fields.iter().filter(|f| f.label == label).count()
    }

    fn unique_id_for_label(&self, label: &str) -> Option<FieldId> {
        let mut matches = self.fields.iter().filter(|f| f.label == label);
        let first = matches.next()?;
        if matches.next().is_some() {
            return None;
        }
        Some(first.id.clone())
    }

    fn position(&self, id: &FieldId) -> Option<usize> {
        self.fields.iter().position(|f| &f.id == id)
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a> IntoIterator for &'a FormSchema {
    type Item = &'a FieldDefinition;
    type IntoIter = std::slice::Iter<'a, FieldDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Linear lookup by exact, case-sensitive label; first match wins
pub fn find_field_by_label<'a>(schema: &'a FormSchema, label: &str) -> Option<&'a FieldDefinition> {
    schema.find_field_by_label(label)
}

/// Lookup by id
pub fn find_field_by_id<'a>(schema: &'a FormSchema, id: &FieldId) -> Option<&'a FieldDefinition> {
    schema.find_field_by_id(id)
}

fn first_free_id(fields: &[FieldDefinition]) -> Option<u64> {
    match fields.iter().filter_map(|f| f.id.as_number()).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldType;

    fn sample() -> FormSchema {
        FormSchema::new(vec![
            FieldDefinition::new(1, "Name", FieldType::Text),
            FieldDefinition::new(2, "Email", FieldType::Text).shown_when("Name"),
            FieldDefinition::new(3, "Name", FieldType::Textarea),
        ])
    }

    #[test]
    fn test_find_by_label_first_match_wins() {
        let schema = sample();
        assert_eq!(schema.find_field_by_label("Name").unwrap().id, FieldId::Numeric(1));
        assert!(schema.find_field_by_label("name").is_none());
        assert!(find_field_by_label(&schema, "Missing").is_none());
    }

    #[test]
    fn test_find_by_id() {
        let schema = sample();
        assert_eq!(
            find_field_by_id(&schema, &FieldId::Numeric(2)).unwrap().label,
            "Email"
        );
        assert!(schema.find_field_by_id(&FieldId::Numeric(9)).is_none());
    }

    #[test]
    fn test_duplicate_label_leaves_condition_unresolved() {
        let schema = sample();
        let email = schema.find_field_by_id(&FieldId::Numeric(2)).unwrap();
        assert!(!email.condition.as_ref().unwrap().is_resolved());
        assert!(schema.condition_target(email).is_none());
    }

    #[test]
    fn test_condition_from_another_schema_resolves_by_label() {
        let source = FormSchema::new(vec![
            FieldDefinition::new(1, "A", FieldType::Text),
            FieldDefinition::new(2, "B", FieldType::Text).shown_when("A"),
        ]);
        let b = source.find_field_by_id(&FieldId::Numeric(2)).unwrap().clone();
        assert_eq!(b.condition.as_ref().unwrap().target(), Some(&FieldId::Numeric(1)));

        let relabelled = FormSchema::new(vec![FieldDefinition::new(1, "Z", FieldType::Text)]);
        assert!(relabelled.condition_target(&b).is_none());

        let moved = FormSchema::new(vec![
            FieldDefinition::new(1, "Z", FieldType::Text),
            FieldDefinition::new(5, "A", FieldType::Text),
        ]);
        assert_eq!(
            moved.condition_target(&b).map(|f| f.id.clone()),
            Some(FieldId::Numeric(5))
        );

        let ambiguous = FormSchema::new(vec![
            FieldDefinition::new(1, "A", FieldType::Text),
            FieldDefinition::new(3, "A", FieldType::Text),
        ]);
        assert!(ambiguous.condition_target(&b).is_none());
    }

    #[test]
    fn test_add_field_ids_never_reused() {
        let mut schema = FormSchema::default();
        let a = schema.add_field().unwrap();
        let b = schema.add_field().unwrap();
        assert_eq!(a, FieldId::Numeric(1));
        assert_eq!(b, FieldId::Numeric(2));

        schema.remove_field(&b);
        let c = schema.add_field().unwrap();
        assert_eq!(c, FieldId::Numeric(3));

        let added = schema.find_field_by_id(&c).unwrap();
        assert_eq!(added.field_type, FieldType::Text);
        assert_eq!(added.label, "");
        assert!(!added.required);
    }

    #[test]
    fn test_add_field_continues_after_existing_ids() {
        let mut schema = FormSchema::new(vec![
            FieldDefinition::new(1_700_000_000_000u64, "A", FieldType::Text),
            FieldDefinition::new("named", "B", FieldType::Text),
        ]);
        let id = schema.add_field_with(|f| {
            f.label = "C".to_string();
            f.id = FieldId::Numeric(1);
        });
        assert_eq!(id, Some(FieldId::Numeric(1_700_000_000_001)));
        assert_eq!(schema.find_field_by_label("C").map(|f| f.id.clone()), id);
    }

    #[test]
    fn test_add_field_stops_when_ids_run_out() {
        let mut schema = FormSchema::new(vec![FieldDefinition::new(u64::MAX, "A", FieldType::Text)]);
        assert_eq!(schema.add_field(), None);
        assert_eq!(schema.len(), 1);

        // The last id is still handed out once
        let mut schema = FormSchema::new(vec![FieldDefinition::new(u64::MAX - 1, "A", FieldType::Text)]);
        assert_eq!(schema.add_field(), Some(FieldId::Numeric(u64::MAX)));
        assert_eq!(schema.add_field(), None);
        assert_eq!(schema.len(), 2);
    }

    #[test]
    fn test_rename_is_followed_by_conditions() {
        let mut schema = FormSchema::new(vec![
            FieldDefinition::new(1, "Name", FieldType::Text),
            FieldDefinition::new(2, "Email", FieldType::Text).shown_when("Name"),
        ]);

        assert!(schema.update_field(&FieldId::Numeric(1), |f| f.label = "Full name".to_string()));

        let email = schema.find_field_by_id(&FieldId::Numeric(2)).unwrap();
        assert_eq!(email.conditional_field(), Some("Full name"));
        assert_eq!(
            schema.condition_target(email).map(|f| f.id.clone()),
            Some(FieldId::Numeric(1))
        );
    }

    #[test]
    fn test_update_cannot_change_id() {
        let mut schema = sample();
        schema.update_field(&FieldId::Numeric(1), |f| f.id = FieldId::Numeric(99));
        assert!(schema.find_field_by_id(&FieldId::Numeric(1)).is_some());
        assert!(!schema.update_field(&FieldId::Numeric(99), |_| {}));
    }

    #[test]
    fn test_remove_target_then_relabel_resolves_again() {
        let mut schema = FormSchema::new(vec![
            FieldDefinition::new(1, "Name", FieldType::Text),
            FieldDefinition::new(2, "Email", FieldType::Text).shown_when("Name"),
        ]);

        schema.remove_field(&FieldId::Numeric(1));
        let email = schema.find_field_by_id(&FieldId::Numeric(2)).unwrap();
        assert_eq!(email.conditional_field(), Some("Name"));
        assert!(schema.condition_target(email).is_none());

        let id = schema.add_field_with(|f| f.label = "Name".to_string()).unwrap();
        let email = schema.find_field_by_id(&FieldId::Numeric(2)).unwrap();
        assert_eq!(email.condition.as_ref().unwrap().target(), Some(&id));
    }

    #[test]
    fn test_set_condition() {
        let mut schema = FormSchema::new(vec![
            FieldDefinition::new(1, "Name", FieldType::Text),
            FieldDefinition::new(2, "Email", FieldType::Text),
        ]);
        let email_id = FieldId::Numeric(2);

        schema.set_condition(&email_id, Some("Name"));
        let email = schema.find_field_by_id(&email_id).unwrap();
        assert!(email.condition.as_ref().unwrap().is_resolved());

        schema.set_condition(&email_id, Some(""));
        assert!(schema.find_field_by_id(&email_id).unwrap().condition.is_none());
    }

    #[test]
    fn test_condition_target_for_detached_field() {
        let schema = FormSchema::new(vec![FieldDefinition::new(1, "Name", FieldType::Text)]);
        let detached = FieldDefinition::new(5, "Other", FieldType::Text).shown_when("Name");
        assert_eq!(
            schema.condition_target(&detached).map(|f| f.id.clone()),
            Some(FieldId::Numeric(1))
        );
    }
}
