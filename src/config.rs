use crate::rewrite::RewriteTable;

/* Every knob the processors honour, passed explicitly at construction.
   Nothing in the engine reads ambient state: two processors with
   different configs can live in the same process without seeing each
   other. */

#[derive(Debug, Clone)]
pub struct ProcessorConfig {
  /// Profile chain, run in order over every entity in both directions.
  pub profiles: Vec<String>,
  /// Rename clashing extras and flatten JSON lists for legacy consumers.
  pub compatibility_mode: bool,
  /// Keep per-record source catalog extras on parse and aggregate
  /// records under dct:hasPart sub-catalogs on serialize.
  pub expose_subcatalogs: bool,
  /// Canonicalize format labels through the alias table.
  pub normalize_formats: bool,
  /// Base for minted dataset/resource IRIs and the catalog node itself.
  pub base_uri: String,
  /// Catalog metadata fallbacks, used when no explicit catalog record
  /// is given to `serialize_catalog`.
  pub site_title: Option<String>,
  pub site_description: Option<String>,
  pub site_homepage: Option<String>,
  pub site_language: Option<String>,
  /// Value fixups run over every record right after extraction.
  pub post_parse_rewrites: RewriteTable,
  /// Value fixups run over every record right before serialization.
  pub pre_serialize_rewrites: RewriteTable,
}

impl Default for ProcessorConfig {
  fn default() -> Self {
    ProcessorConfig {
      profiles: vec![String::from("euro_dcat_ap")],
      compatibility_mode: false,
      expose_subcatalogs: false,
      normalize_formats: false,
      base_uri: String::new(),
      site_title: None,
      site_description: None,
      site_homepage: None,
      site_language: None,
      post_parse_rewrites: RewriteTable::new(),
      pre_serialize_rewrites: RewriteTable::new(),
    }
  }
}

impl ProcessorConfig {

  pub fn new() -> Self {
    Self::default()
  }

  /// Base URI with any trailing slash dropped, ready for joining.
  pub fn base(&self) -> &str {
    self.base_uri.trim_end_matches('/')
  }
}
