use {
  super::base,
  crate::{
    datastore::graph::Graph,
    record::{DatasetRecord, ResourceRecord},
    vocab,
    RdfNode,
  },
  tracing::debug,
};

/* Field mapping descriptors.

   One mapping per flat-record field, grouped into tables by entity and
   cardinality. A handful of generic traversals below consume the tables
   in both directions; profiles never hand-write per-field triple code
   for anything these tables can express. */

/// How a value becomes an RDF term on serialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TermKind {
  Literal,
  Uri,
  UriOrLiteral,
}

/// One field/predicate correspondence. `fallbacks` are alternative record
/// keys consulted on serialize when the primary field is empty. The
/// transform runs on both directions; returning `None` drops the value.
#[derive(Debug, Clone, Copy)]
pub struct FieldMapping {
  pub field: &'static str,
  pub predicate: &'static str,
  pub fallbacks: &'static [&'static str],
  pub kind: TermKind,
  pub transform: Option<fn(&str) -> Option<String>>,
}

impl FieldMapping {
  const fn lit(field: &'static str, predicate: &'static str, fallbacks: &'static [&'static str]) -> Self {
    FieldMapping { field, predicate, fallbacks, kind: TermKind::Literal, transform: None }
  }
  const fn uri(field: &'static str, predicate: &'static str, fallbacks: &'static [&'static str]) -> Self {
    FieldMapping { field, predicate, fallbacks, kind: TermKind::Uri, transform: None }
  }
  const fn uri_or_lit(field: &'static str, predicate: &'static str, fallbacks: &'static [&'static str]) -> Self {
    FieldMapping { field, predicate, fallbacks, kind: TermKind::UriOrLiteral, transform: None }
  }
}

/* Dataset tables. FIELDS land in the record proper on parse, EXTRAS in
   the extras list, LISTS as JSON-encoded extras. */

pub const DATASET_FIELDS: &[FieldMapping] = &[
  FieldMapping::lit("title", vocab::dct::TITLE, &[]),
  FieldMapping::lit("notes", vocab::dct::DESCRIPTION, &[]),
  FieldMapping::uri("url", vocab::dcat::LANDING_PAGE, &[]),
  FieldMapping::lit("version", vocab::owl::VERSION_INFO, &["dcat_version"]),
];

pub const DATASET_EXTRAS: &[FieldMapping] = &[
  FieldMapping {
    field: "identifier",
    predicate: vocab::dct::IDENTIFIER,
    fallbacks: &["guid", "id"],
    kind: TermKind::UriOrLiteral,
    transform: Some(sanitize_identifier),
  },
  FieldMapping::lit("version_notes", vocab::adms::VERSION_NOTES, &[]),
  FieldMapping::uri_or_lit("frequency", vocab::dct::ACCRUAL_PERIODICITY, &[]),
  FieldMapping::lit("dcat_type", vocab::dct::TYPE, &[]),
  FieldMapping::lit("provenance", vocab::dct::PROVENANCE, &[]),
];

/* Serialized with the scalars; parsed through base::access_rights so a
   blank rights statement contributes its label instead of its node id. */
pub const DATASET_ACCESS_RIGHTS: FieldMapping =
  FieldMapping::uri_or_lit("access_rights", vocab::dct::ACCESS_RIGHTS, &[]);

pub const DATASET_DATES: &[FieldMapping] = &[
  FieldMapping::lit("issued", vocab::dct::ISSUED, &["metadata_created"]),
  FieldMapping::lit("modified", vocab::dct::MODIFIED, &["metadata_modified"]),
];

pub const DATASET_LISTS: &[FieldMapping] = &[
  FieldMapping::uri_or_lit("language", vocab::dct::LANGUAGE, &[]),
  FieldMapping::uri("theme", vocab::dcat::THEME, &[]),
  FieldMapping::uri_or_lit("conforms_to", vocab::dct::CONFORMS_TO, &[]),
  FieldMapping::uri_or_lit("alternate_identifier", vocab::adms::IDENTIFIER, &[]),
  FieldMapping::uri_or_lit("documentation", vocab::foaf::PAGE, &[]),
  FieldMapping::uri_or_lit("related_resource", vocab::dct::RELATION, &[]),
  FieldMapping::uri_or_lit("has_version", vocab::dct::HAS_VERSION, &[]),
  FieldMapping::uri_or_lit("is_version_of", vocab::dct::IS_VERSION_OF, &[]),
  FieldMapping::uri_or_lit("source", vocab::dct::SOURCE, &[]),
  FieldMapping::uri_or_lit("sample", vocab::adms::SAMPLE, &[]),
];

/* Resource tables. */

pub const RESOURCE_SCALARS: &[FieldMapping] = &[
  FieldMapping::lit("name", vocab::dct::TITLE, &[]),
  FieldMapping::lit("description", vocab::dct::DESCRIPTION, &[]),
  FieldMapping::uri_or_lit("status", vocab::adms::STATUS, &[]),
  FieldMapping::uri_or_lit("license", vocab::dct::LICENSE, &[]),
  FieldMapping::uri("access_url", vocab::dcat::ACCESS_URL, &[]),
  FieldMapping::uri("download_url", vocab::dcat::DOWNLOAD_URL, &[]),
];

pub const RESOURCE_RIGHTS: FieldMapping =
  FieldMapping::uri_or_lit("rights", vocab::dct::RIGHTS, &[]);

pub const RESOURCE_DATES: &[FieldMapping] = &[
  FieldMapping::lit("issued", vocab::dct::ISSUED, &["created"]),
  FieldMapping::lit("modified", vocab::dct::MODIFIED, &["last_modified", "metadata_modified"]),
];

pub const RESOURCE_LISTS: &[FieldMapping] = &[
  FieldMapping::uri_or_lit("documentation", vocab::foaf::PAGE, &[]),
  FieldMapping::uri_or_lit("language", vocab::dct::LANGUAGE, &[]),
  FieldMapping::uri_or_lit("conforms_to", vocab::dct::CONFORMS_TO, &[]),
];

/* Catalog tables. */

pub const CATALOG_SCALARS: &[FieldMapping] = &[
  FieldMapping::lit("title", vocab::dct::TITLE, &[]),
  FieldMapping::lit("description", vocab::dct::DESCRIPTION, &[]),
  FieldMapping::uri("homepage", vocab::foaf::HOMEPAGE, &[]),
  FieldMapping::uri_or_lit("language", vocab::dct::LANGUAGE, &[]),
];

pub const CATALOG_DATES: &[FieldMapping] = &[
  FieldMapping::lit("modified", vocab::dct::MODIFIED, &[]),
];

/* Record lookup */

/// Uniform read access for the serialize traversals. Implementations
/// treat empty strings as absent.
pub trait FieldLookup {
  fn lookup(&self, key: &str) -> Option<String>;
  fn lookup_list(&self, key: &str) -> Option<Vec<String>>;
}

impl FieldLookup for DatasetRecord {
  fn lookup(&self, key: &str) -> Option<String> {
    self.value_or_extra(key).map(str::to_string)
  }
  fn lookup_list(&self, key: &str) -> Option<Vec<String>> {
    if let Some(items) = self.list_field(key) {
      return Some(items.to_vec());
    }
    self.value_or_extra(key).map(base::as_list)
  }
}

impl FieldLookup for ResourceRecord {
  fn lookup(&self, key: &str) -> Option<String> {
    self.field(key).map(str::to_string)
  }
  fn lookup_list(&self, key: &str) -> Option<Vec<String>> {
    if let Some(items) = self.list_field(key) {
      return Some(items.to_vec());
    }
    self.field(key).map(base::as_list)
  }
}

fn lookup_with_fallbacks(source: &impl FieldLookup, mapping: &FieldMapping) -> Option<String> {
  if let Some(value) = source.lookup(mapping.field) {
    return Some(value);
  }
  for fallback in mapping.fallbacks {
    if let Some(value) = source.lookup(fallback) {
      return Some(value);
    }
  }
  None
}

fn lookup_list_with_fallbacks(source: &impl FieldLookup, mapping: &FieldMapping) -> Option<Vec<String>> {
  if let Some(items) = source.lookup_list(mapping.field) {
    return Some(items);
  }
  for fallback in mapping.fallbacks {
    if let Some(items) = source.lookup_list(fallback) {
      return Some(items);
    }
  }
  None
}

/* Graph -> record */

/// Scalar read for one mapping: first object value, then the transform.
pub fn read_value(g: &Graph, subject: &RdfNode, mapping: &FieldMapping) -> Option<String> {
  let value = base::value_of(g, subject, mapping.predicate)?;
  match mapping.transform {
    Some(f) => f(&value),
    None => Some(value),
  }
}

/// Every object value for one list mapping, in store order.
pub fn read_list(g: &Graph, subject: &RdfNode, mapping: &FieldMapping) -> Vec<String> {
  base::values_of(g, subject, mapping.predicate)
}

/// Date read: normalized to ISO 8601, unparsable values dropped.
pub fn read_date(g: &Graph, subject: &RdfNode, mapping: &FieldMapping) -> Option<String> {
  let value = base::value_of(g, subject, mapping.predicate)?;
  match base::normalize_datetime(&value) {
    Some(iso) => Some(iso),
    None => {
      debug!(field = mapping.field, value = value.as_str(), "dropping unparsable date");
      None
    },
  }
}

/* Record -> graph */

/// Term for a value under a mapping's kind.
pub fn term_for(kind: TermKind, value: &str) -> RdfNode {
  match kind {
    TermKind::Literal => RdfNode::lit(value),
    TermKind::Uri => RdfNode::named(base::cleaned_uri(value)),
    TermKind::UriOrLiteral => base::uri_or_literal(value),
  }
}

/// One triple per populated scalar mapping.
pub fn write_scalars(
  g: &mut Graph,
  subject: &RdfNode,
  source: &impl FieldLookup,
  table: &[FieldMapping],
) {
  for mapping in table {
    let raw = match lookup_with_fallbacks(source, mapping) {
      Some(value) => value,
      None => continue,
    };
    let value = match mapping.transform {
      Some(f) => f(&raw),
      None => Some(raw),
    };
    if let Some(value) = value {
      if !value.is_empty() {
        g.add([
          subject.clone(),
          RdfNode::named(mapping.predicate),
          term_for(mapping.kind, &value),
        ]);
      }
    }
  }
}

/// One xsd:dateTime triple per populated date mapping.
pub fn write_dates(
  g: &mut Graph,
  subject: &RdfNode,
  source: &impl FieldLookup,
  table: &[FieldMapping],
) {
  for mapping in table {
    let raw = match lookup_with_fallbacks(source, mapping) {
      Some(value) => value,
      None => continue,
    };
    if let Some(term) = base::date_literal(&raw) {
      g.add([subject.clone(), RdfNode::named(mapping.predicate), term]);
    }
  }
}

/// One triple per item of each populated list mapping.
pub fn write_lists(
  g: &mut Graph,
  subject: &RdfNode,
  source: &impl FieldLookup,
  table: &[FieldMapping],
) {
  for mapping in table {
    let items = match lookup_list_with_fallbacks(source, mapping) {
      Some(items) => items,
      None => continue,
    };
    for item in items {
      let value = match mapping.transform {
        Some(f) => match f(&item) {
          Some(value) => value,
          None => continue,
        },
        None => item,
      };
      if !value.is_empty() {
        g.add([
          subject.clone(),
          RdfNode::named(mapping.predicate),
          term_for(mapping.kind, &value),
        ]);
      }
    }
  }
}

/* Transforms */

/// Identifiers pasted in from web UIs arrive with URLs and whitespace
/// baked in; those keep only `[A-Za-z0-9:_-]`. Clean values pass through.
pub fn sanitize_identifier(value: &str) -> Option<String> {
  let messy = value.contains("http") || value.chars().any(char::is_whitespace);
  if !messy {
    return Some(value.to_string());
  }
  Some(
    value
      .chars()
      .filter(|c| c.is_ascii_alphanumeric() || matches!(c, ':' | '_' | '-'))
      .collect(),
  )
}
