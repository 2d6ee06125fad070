pub mod base;
pub mod euro_dcat_ap;
pub mod fields;
pub mod formats;
pub mod it_dcat_ap;

pub use euro_dcat_ap::EuroDcatApProfile;
pub use it_dcat_ap::ItDcatApProfile;

use {
  crate::{
    config::ProcessorConfig,
    datastore::graph::Graph,
    errors::{TranscodeError, UnknownProfileError},
    processor::CatalogRecord,
    record::DatasetRecord,
    RdfNode,
  },
};

/* A profile is a stateless mapping strategy between the graph and the
   flat record shape. Parsers and serializers run an ordered chain of
   them; every entity flows through every profile, and later profiles
   see what earlier ones wrote. */

/// The per-call slice of the processor config a profile may consult.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileOptions {
  pub compatibility_mode: bool,
  pub expose_subcatalogs: bool,
  pub normalize_formats: bool,
  pub base_uri: String,
}

impl ProfileOptions {
  pub fn from_config(config: &ProcessorConfig) -> Self {
    ProfileOptions {
      compatibility_mode: config.compatibility_mode,
      expose_subcatalogs: config.expose_subcatalogs,
      normalize_formats: config.normalize_formats,
      base_uri: config.base_uri.clone(),
    }
  }
}

pub trait Profile: std::fmt::Debug {
  fn name(&self) -> &'static str;

  /// Reads one dataset subject into the record. The record arrives with
  /// whatever earlier profiles in the chain put there.
  fn parse_dataset(
    &self,
    graph: &Graph,
    subject: &RdfNode,
    record: &mut DatasetRecord,
    options: &ProfileOptions,
  ) -> Result<(), TranscodeError>;

  /// Writes one record below the given dataset subject.
  fn graph_from_dataset(
    &self,
    graph: &mut Graph,
    subject: &RdfNode,
    record: &DatasetRecord,
    options: &ProfileOptions,
  ) -> Result<(), TranscodeError>;

  /// Writes the catalog node itself.
  fn graph_from_catalog(
    &self,
    graph: &mut Graph,
    subject: &RdfNode,
    catalog: &CatalogRecord,
    options: &ProfileOptions,
  ) -> Result<(), TranscodeError>;
}

pub type Constructor = fn() -> Box<dyn Profile>;

/* Explicit name -> constructor map. Registration order is preserved so
   names() reads back the way embedders registered. */
pub struct ProfileRegistry {
  entries: Vec<(&'static str, Constructor)>,
}

/* Public */
impl ProfileRegistry {
  pub fn new() -> Self {
    ProfileRegistry { entries: Vec::new() }
  }

  /// The two bundled strategies, under the names the chain selects by.
  pub fn with_defaults() -> Self {
    let mut registry = Self::new();
    registry.register("euro_dcat_ap", || Box::new(EuroDcatApProfile));
    registry.register("it_dcat_ap", || Box::new(ItDcatApProfile));
    registry
  }

  /// Registers a strategy, replacing any previous one under the name.
  pub fn register(&mut self, name: &'static str, ctor: Constructor) {
    if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
      entry.1 = ctor;
    }
    else {
      self.entries.push((name, ctor));
    }
  }

  pub fn names(&self) -> Vec<&'static str> {
    self.entries.iter().map(|(name, _)| *name).collect()
  }

  /// Instantiates the chain in the order given. Duplicates are allowed
  /// and run twice; unknown names fail with the sorted offender list.
  pub fn build_chain(&self, names: &[String]) -> Result<Vec<Box<dyn Profile>>, UnknownProfileError> {
    let mut chain = Vec::with_capacity(names.len());
    let mut unknown = Vec::new();
    for name in names {
      match self.entries.iter().find(|(n, _)| *n == name.as_str()) {
        Some((_, ctor)) => chain.push(ctor()),
        None => unknown.push(name.clone()),
      }
    }
    if unknown.is_empty() {
      Ok(chain)
    }
    else {
      Err(UnknownProfileError::new(unknown))
    }
  }
}

/* The stock registry, not an empty one: a default-constructed registry
   that cannot build the default chain helps nobody. */
impl Default for ProfileRegistry {
  fn default() -> Self {
    Self::with_defaults()
  }
}
