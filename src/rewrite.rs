use crate::record::{DatasetRecord, ResourceRecord};

/* Declared value rewrites.

   Harvested catalogs accumulate site-specific quirks: truncated format
   labels, stale hostnames, misspelled licence URIs. Fixing those inline in
   a profile hard-wires one site's mess into everyone's transcoder, so the
   fixups live here instead: small substring rules the embedder declares in
   the config and the processor runs at two points, once over every record
   freshly extracted from a graph and once over every record about to be
   serialized. The engine itself ships with both tables empty. */

/// Which record type a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteScope {
  Dataset,
  Resource,
  Both,
}

/// A single ordered fixup: in `field`, replace every occurrence of
/// `pattern` with `replacement`. Matching is literal, not regex.
#[derive(Debug, Clone)]
pub struct RewriteRule {
  pub scope: RewriteScope,
  pub field: String,
  pub pattern: String,
  pub replacement: String,
}

impl RewriteRule {
  pub fn new(
    scope: RewriteScope,
    field: impl Into<String>,
    pattern: impl Into<String>,
    replacement: impl Into<String>,
  ) -> Self
  {
    RewriteRule {
      scope,
      field: field.into(),
      pattern: pattern.into(),
      replacement: replacement.into(),
    }
  }
}

/// An ordered list of rewrite rules. Rules fire in declaration order and
/// every matching rule is applied, so later rules see earlier rules' output.
#[derive(Debug, Clone, Default)]
pub struct RewriteTable {
  rules: Vec<RewriteRule>,
}

impl RewriteTable {

  pub fn new() -> Self {
    RewriteTable { rules: Vec::new() }
  }

  pub fn push(&mut self, rule: RewriteRule) {
    self.rules.push(rule);
  }

  pub fn len(&self) -> usize {
    self.rules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rules.is_empty()
  }

  /// Runs every dataset-scoped rule over the record's fields and extras,
  /// then every resource-scoped rule over each of its resources.
  pub fn apply_dataset(&self, record: &mut DatasetRecord) {
    for rule in &self.rules {
      if matches!(rule.scope, RewriteScope::Dataset | RewriteScope::Both) {
        if let Some(value) = record.field_mut(&rule.field) {
          *value = value.replace(&rule.pattern, &rule.replacement);
        }
        for extra in &mut record.extras {
          if extra.key == rule.field {
            extra.value = extra.value.replace(&rule.pattern, &rule.replacement);
          }
        }
      }
    }
    for resource in &mut record.resources {
      self.apply_resource(resource);
    }
  }

  /// Runs every resource-scoped rule over a single resource.
  pub fn apply_resource(&self, resource: &mut ResourceRecord) {
    for rule in &self.rules {
      if matches!(rule.scope, RewriteScope::Resource | RewriteScope::Both) {
        if let Some(value) = resource.field_mut(&rule.field) {
          *value = value.replace(&rule.pattern, &rule.replacement);
        }
      }
    }
  }
}

#[cfg(test)]
mod unit_tests {
  use super::*;

  fn table() -> RewriteTable {
    let mut t = RewriteTable::new();
    t.push(RewriteRule::new(RewriteScope::Dataset, "title", "Teh", "The"));
    t.push(RewriteRule::new(RewriteScope::Resource, "format", "csv file", "CSV"));
    t.push(RewriteRule::new(RewriteScope::Both, "url", "http://old.host", "https://new.host"));
    t
  }

  #[test]
  fn rewrites_dataset_fields_and_extras() {
    let mut record = DatasetRecord::new();
    record.set_field("title", "Teh Census");
    record.set_field("url", "http://old.host/page");
    record.push_extra("url", "http://old.host/extra");

    table().apply_dataset(&mut record);

    assert_eq!(record.field("title"), Some("The Census"));
    assert_eq!(record.field("url"), Some("https://new.host/page"));
    assert_eq!(record.extra("url"), Some("https://new.host/extra"));
  }

  #[test]
  fn rewrites_resources_through_the_dataset() {
    let mut record = DatasetRecord::new();
    let mut resource = ResourceRecord::new();
    resource.set_field("format", "csv file");
    resource.set_field("url", "http://old.host/data.csv");
    record.resources.push(resource);

    table().apply_dataset(&mut record);

    assert_eq!(record.resources[0].field("format"), Some("CSV"));
    assert_eq!(record.resources[0].field("url"), Some("https://new.host/data.csv"));
  }

  #[test]
  fn dataset_rules_leave_resources_alone() {
    let mut resource = ResourceRecord::new();
    resource.set_field("title", "Teh resource");
    table().apply_resource(&mut resource);
    assert_eq!(resource.field("title"), Some("Teh resource"));
  }

  #[test]
  fn rules_fire_in_declaration_order() {
    let mut t = RewriteTable::new();
    t.push(RewriteRule::new(RewriteScope::Dataset, "notes", "a", "b"));
    t.push(RewriteRule::new(RewriteScope::Dataset, "notes", "b", "c"));
    let mut record = DatasetRecord::new();
    record.set_field("notes", "a");
    t.apply_dataset(&mut record);
    assert_eq!(record.field("notes"), Some("c"));
  }

  #[test]
  fn empty_table_is_a_noop() {
    let mut record = DatasetRecord::new();
    record.set_field("title", "unchanged");
    RewriteTable::new().apply_dataset(&mut record);
    assert_eq!(record.field("title"), Some("unchanged"));
    assert!(RewriteTable::new().is_empty());
  }
}
