/* Exports */

pub mod config;
pub mod datastore;
pub mod errors;
pub mod processor;
pub mod profiles;
pub mod rdf;
pub mod record;
pub mod rewrite;
pub mod vocab;

pub use config::ProcessorConfig;
pub use datastore::graph::Graph;
pub use processor::{CatalogRecord, DcatParser, DcatSerializer, PagingInfo};
pub use profiles::{Profile, ProfileOptions, ProfileRegistry};
pub use rdf::format::RdfSyntax;
pub use record::{DatasetRecord, Extra, FieldValue, ResourceRecord, Tag};

/* Common Definitions */

pub type Triple = [RdfNode; 3];

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize, Hash)]
pub enum RdfNode {
  Named{ iri: String },
  Blank{ id: String },
  RawLit{ val: String },
  LangTaggedLit{ val: String, lang: String },
  TypedLit{ val: String, datatype: String },
}
impl RdfNode {
  pub fn named(iri: impl Into<String>) -> Self {
    Self::Named{ iri: iri.into() }
  }
  pub fn blank(id: impl Into<String>) -> Self {
    Self::Blank{ id: id.into() }
  }
  pub fn lit(val: impl Into<String>) -> Self {
    Self::RawLit{ val: val.into() }
  }
  pub fn lang_lit(val: impl Into<String>, lang: impl Into<String>) -> Self {
    Self::LangTaggedLit{ val: val.into(), lang: lang.into() }
  }
  pub fn typed_lit(val: impl Into<String>, datatype: impl Into<String>) -> Self {
    Self::TypedLit{ val: val.into(), datatype: datatype.into() }
  }
  /* The lexical content of a term: IRI, blank label or literal value. */
  pub fn value(&self) -> &str {
    match self {
      Self::Named{ iri } => iri,
      Self::Blank{ id } => id,
      Self::RawLit{ val }
      | Self::LangTaggedLit{ val, .. }
      | Self::TypedLit{ val, .. } => val,
    }
  }
  pub fn is_named(&self) -> bool {
    matches!(self, Self::Named{ .. })
  }
  pub fn is_blank(&self) -> bool {
    matches!(self, Self::Blank{ .. })
  }
  /* Named or blank, i.e. anything allowed in subject position. */
  pub fn is_resource(&self) -> bool {
    matches!(self, Self::Named{ .. } | Self::Blank{ .. })
  }
  pub fn is_literal(&self) -> bool {
    !self.is_resource()
  }
  pub fn as_iri(&self) -> Option<&str> {
    match self {
      Self::Named{ iri } => Some(iri),
      _ => None,
    }
  }
}
impl std::convert::From<&str> for RdfNode {
  fn from(s: &str) -> Self {
    Self::Named{ iri: s.to_string() }
  }
}
