use {
  crate::{
    config::ProcessorConfig,
    datastore::graph::Graph,
    errors::{ParseError, TranscodeError, UnknownProfileError},
    profiles::{Profile, ProfileOptions, ProfileRegistry},
    rdf::{format, format::RdfSyntax, reader},
    record::DatasetRecord,
    vocab,
    RdfNode,
    Triple,
  },
  std::collections::BTreeMap,
};

/* RDF in, records out.

   The parser owns one graph that successive `parse` calls accumulate
   into, so a paginated harvest feeds every page through the same store
   before extraction starts. Extraction itself is read-only: `datasets`
   can run any number of times over the same store. */

#[derive(Debug)]
pub struct DcatParser {
  graph: Graph,
  chain: Vec<Box<dyn Profile>>,
  config: ProcessorConfig,
}

impl DcatParser {

  pub fn new(registry: &ProfileRegistry, config: ProcessorConfig) -> Result<Self, UnknownProfileError> {
    let chain = registry.build_chain(&config.profiles)?;
    Ok(DcatParser { graph: Graph::new(), chain, config })
  }

  /// Parses one serialized document into the store. The label defaults
  /// to RDF/XML when unset. A failed parse commits nothing.
  pub fn parse(&mut self, data: &[u8], format: Option<&str>) -> Result<(), ParseError> {
    let syntax = match format {
      None => RdfSyntax::Xml,
      Some(label) => match RdfSyntax::from_label(label) {
        Some(syntax) => syntax,
        None => return Err(ParseError::UnknownFormat(label.to_string())),
      },
    };
    let base = Some(self.config.base_uri.as_str()).filter(|b| !b.is_empty());
    let triples = reader::read(syntax, data, base)?;
    self.commit(triples);
    Ok(())
  }

  /// Restartable iterator over every dcat:Dataset in the store, each run
  /// through the profile chain. A failing entity comes out as an `Err`
  /// and iteration carries on with the next one.
  pub fn datasets(&self) -> Datasets<'_> {
    Datasets { parser: self, refs: self.dataset_refs(), at: 0 }
  }

  /// Subjects typed dcat:Dataset, in deterministic store order.
  pub fn dataset_refs(&self) -> Vec<RdfNode> {
    self
      .graph
      .subjects_with(
        &RdfNode::named(vocab::rdf::TYPE),
        &RdfNode::named(vocab::dcat::DATASET_CLASS),
      )
      .collect()
  }

  /// Next page link of the paged collection, if the document carried
  /// one. hydra:next wins over the deprecated hydra:nextPage.
  pub fn next_page(&self) -> Option<String> {
    let type_pred = RdfNode::named(vocab::rdf::TYPE);
    let collection = RdfNode::named(vocab::hydra::PAGED_COLLECTION);
    let next = RdfNode::named(vocab::hydra::NEXT);
    let next_page = RdfNode::named(vocab::hydra::NEXT_PAGE);
    for node in self.graph.subjects_with(&type_pred, &collection) {
      let hit = self
        .graph
        .object_value(&node, &next)
        .or_else(|| self.graph.object_value(&node, &next_page));
      if hit.is_some() {
        return hit;
      }
    }
    None
  }

  pub fn supported_formats() -> &'static [&'static str] {
    format::supported_formats()
  }

  pub fn profile_names(&self) -> Vec<&'static str> {
    self.chain.iter().map(|p| p.name()).collect()
  }

  pub fn graph(&self) -> &Graph {
    &self.graph
  }
}

/* Private */
impl DcatParser {

  /* Blank labels are document-scoped. Remapping every incoming label to
     a fresh store label keeps _:b0 from one page distinct from _:b0 on
     the next. */
  fn commit(&mut self, triples: Vec<Triple>) {
    let mut remap: BTreeMap<String, RdfNode> = BTreeMap::new();
    for [s, p, o] in triples {
      let s = self.relabel(&mut remap, s);
      let o = self.relabel(&mut remap, o);
      self.graph.add([s, p, o]);
    }
  }

  fn relabel(&mut self, remap: &mut BTreeMap<String, RdfNode>, node: RdfNode) -> RdfNode {
    match node {
      RdfNode::Blank { id } => remap.entry(id).or_insert_with(|| self.graph.bnode()).clone(),
      other => other,
    }
  }

  fn extract(&self, subject: &RdfNode) -> Result<DatasetRecord, TranscodeError> {
    let options = ProfileOptions::from_config(&self.config);
    let mut record = DatasetRecord::new();
    for profile in &self.chain {
      profile.parse_dataset(&self.graph, subject, &mut record, &options)?;
    }
    self.config.post_parse_rewrites.apply_dataset(&mut record);
    if self.config.compatibility_mode {
      apply_compatibility(&mut record);
    }
    Ok(record)
  }
}

pub struct Datasets<'a> {
  parser: &'a DcatParser,
  refs: Vec<RdfNode>,
  at: usize,
}

impl<'a> Iterator for Datasets<'a> {
  type Item = Result<DatasetRecord, TranscodeError>;

  fn next(&mut self) -> Option<Self::Item> {
    let subject = self.refs.get(self.at)?.clone();
    self.at += 1;
    Some(self.parser.extract(&subject))
  }
}

/* Key spellings older record consumers expect. */
const COMPAT_PREFIXED: &[&str] = &["issued", "modified", "publisher_name", "publisher_email"];

fn apply_compatibility(record: &mut DatasetRecord) {
  for extra in &mut record.extras {
    if COMPAT_PREFIXED.contains(&extra.key.as_str()) {
      extra.key = format!("dcat_{}", extra.key);
    }
    if let Some(mut items) = string_array(&extra.value) {
      items.sort();
      extra.value = items.join(",");
    }
  }
}

fn string_array(value: &str) -> Option<Vec<String>> {
  use serde_json::Value;
  let parsed: Value = serde_json::from_str(value).ok()?;
  let items = match parsed {
    Value::Array(items) if !items.is_empty() => items,
    _ => return None,
  };
  let mut out = Vec::with_capacity(items.len());
  for item in items {
    match item {
      Value::String(s) => out.push(s),
      _ => return None,
    }
  }
  Some(out)
}

#[cfg(test)]
mod interface_tests {
  use super::*;
  use crate::processor::CatalogRecord;

  const PREAMBLE: &str = concat!(
    "@prefix dcat: <http://www.w3.org/ns/dcat#> .\n",
    "@prefix dct: <http://purl.org/dc/terms/> .\n",
    "@prefix foaf: <http://xmlns.com/foaf/0.1/> .\n",
    "@prefix hydra: <http://www.w3.org/ns/hydra/core#> .\n",
    "@prefix vcard: <http://www.w3.org/2006/vcard/ns#> .\n",
  );

  fn parser(config: ProcessorConfig) -> DcatParser {
    DcatParser::new(&ProfileRegistry::with_defaults(), config).unwrap()
  }

  fn parse_turtle(p: &mut DcatParser, body: &str) {
    let doc = format!("{}{}", PREAMBLE, body);
    p.parse(doc.as_bytes(), Some("turtle")).unwrap();
  }

  #[test]
  fn unknown_profiles_fail_construction() {
    let config = ProcessorConfig {
      profiles: vec![String::from("euro_dcat_ap"), String::from("martian")],
      ..ProcessorConfig::default()
    };
    let err = DcatParser::new(&ProfileRegistry::with_defaults(), config).unwrap_err();
    assert_eq!(err.names, vec![String::from("martian")]);
  }

  #[test]
  fn unknown_format_labels_are_rejected() {
    let mut p = parser(ProcessorConfig::default());
    match p.parse(b"irrelevant", Some("docx")) {
      Err(ParseError::UnknownFormat(label)) => assert_eq!(label, "docx"),
      other => panic!("expected an unknown-format error, got {:?}", other),
    }
  }

  #[test]
  fn failed_parse_commits_nothing() {
    let mut p = parser(ProcessorConfig::default());
    parse_turtle(&mut p, "<http://x/d1> a dcat:Dataset ; dct:title \"One\" .\n");
    let len = p.graph().len();

    assert!(p.parse(b"@prefix broken", Some("turtle")).is_err());
    assert_eq!(p.graph().len(), len);

    let mut empty = parser(ProcessorConfig::default());
    assert!(empty.parse(b"not turtle at all {{{", Some("turtle")).is_err());
    assert!(empty.graph().is_empty());
  }

  #[test]
  fn blank_labels_stay_document_scoped() {
    let mut p = parser(ProcessorConfig::default());
    parse_turtle(
      &mut p,
      "<http://x/d1> dcat:contactPoint _:c .\n_:c vcard:fn \"Desk A\" .\n",
    );
    parse_turtle(
      &mut p,
      "<http://x/d2> dcat:contactPoint _:c .\n_:c vcard:fn \"Desk B\" .\n",
    );

    let contact_point = RdfNode::named(vocab::dcat::CONTACT_POINT);
    let first = p.graph().object(&RdfNode::named("http://x/d1"), &contact_point).unwrap();
    let second = p.graph().object(&RdfNode::named("http://x/d2"), &contact_point).unwrap();
    assert_ne!(first, second);
    assert_eq!(p.graph().len(), 4);
  }

  #[test]
  fn datasets_is_restartable_and_ordered() {
    let mut p = parser(ProcessorConfig::default());
    parse_turtle(
      &mut p,
      concat!(
        "<http://x/d1> a dcat:Dataset ; dct:title \"One\" .\n",
        "<http://x/d2> a dcat:Dataset ; dct:title \"Two\" .\n",
      ),
    );

    let titles = |p: &DcatParser| -> Vec<String> {
      p.datasets()
        .map(|r| r.unwrap().field("title").unwrap().to_string())
        .collect()
    };
    let first = titles(&p);
    assert_eq!(first, vec![String::from("One"), String::from("Two")]);
    assert_eq!(titles(&p), first);
  }

  #[derive(Debug)]
  struct Flaky;
  impl Profile for Flaky {
    fn name(&self) -> &'static str {
      "flaky"
    }
    fn parse_dataset(
      &self,
      _g: &Graph,
      subject: &RdfNode,
      _record: &mut DatasetRecord,
      _options: &ProfileOptions,
    ) -> Result<(), TranscodeError>
    {
      if subject.value().ends_with("/bad") {
        return Err(TranscodeError::Profile(String::from("refusing this one")));
      }
      Ok(())
    }
    fn graph_from_dataset(
      &self,
      _g: &mut Graph,
      _subject: &RdfNode,
      _record: &DatasetRecord,
      _options: &ProfileOptions,
    ) -> Result<(), TranscodeError>
    {
      Ok(())
    }
    fn graph_from_catalog(
      &self,
      _g: &mut Graph,
      _subject: &RdfNode,
      _catalog: &CatalogRecord,
      _options: &ProfileOptions,
    ) -> Result<(), TranscodeError>
    {
      Ok(())
    }
  }

  #[test]
  fn one_failing_entity_does_not_abort_the_rest() {
    let mut registry = ProfileRegistry::with_defaults();
    registry.register("flaky", || Box::new(Flaky));
    let config = ProcessorConfig {
      profiles: vec![String::from("euro_dcat_ap"), String::from("flaky")],
      ..ProcessorConfig::default()
    };
    let mut p = DcatParser::new(&registry, config).unwrap();
    parse_turtle(
      &mut p,
      concat!(
        "<http://x/bad> a dcat:Dataset ; dct:title \"Broken\" .\n",
        "<http://x/good> a dcat:Dataset ; dct:title \"Fine\" .\n",
      ),
    );

    let results: Vec<Result<DatasetRecord, TranscodeError>> = p.datasets().collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_err());
    let good = results[1].as_ref().unwrap();
    assert_eq!(good.field("title"), Some("Fine"));
  }

  #[test]
  fn next_page_prefers_the_current_predicate() {
    let mut p = parser(ProcessorConfig::default());
    parse_turtle(
      &mut p,
      concat!(
        "<http://x/catalog.xml> a hydra:PagedCollection ;\n",
        "  hydra:nextPage \"http://x/catalog.xml?page=3\" ;\n",
        "  hydra:next \"http://x/catalog.xml?page=2\" .\n",
      ),
    );
    assert_eq!(p.next_page().as_deref(), Some("http://x/catalog.xml?page=2"));

    let mut deprecated_only = parser(ProcessorConfig::default());
    parse_turtle(
      &mut deprecated_only,
      concat!(
        "<http://x/catalog.xml> a hydra:PagedCollection ;\n",
        "  hydra:nextPage \"http://x/catalog.xml?page=2\" .\n",
      ),
    );
    assert_eq!(
      deprecated_only.next_page().as_deref(),
      Some("http://x/catalog.xml?page=2"),
    );

    let unpaged = parser(ProcessorConfig::default());
    assert_eq!(unpaged.next_page(), None);
  }

  #[test]
  fn compatibility_mode_renames_and_flattens() {
    let config = ProcessorConfig { compatibility_mode: true, ..ProcessorConfig::default() };
    let mut p = parser(config);
    parse_turtle(
      &mut p,
      concat!(
        "<http://x/d1> a dcat:Dataset ;\n",
        "  dct:issued \"2024-02-01\" ;\n",
        "  dct:language \"it\", \"en\" ;\n",
        "  dct:publisher [ foaf:name \"Bureau\" ] .\n",
      ),
    );

    let record = p.datasets().next().unwrap().unwrap();
    assert_eq!(record.extra("issued"), None);
    assert_eq!(record.extra("dcat_issued"), Some("2024-02-01T00:00:00"));
    assert_eq!(record.extra("dcat_publisher_name"), Some("Bureau"));
    assert_eq!(record.extra("language"), Some("en,it"));
  }

  #[test]
  fn post_parse_rewrites_run_before_compatibility() {
    use crate::rewrite::{RewriteRule, RewriteScope, RewriteTable};

    let mut rewrites = RewriteTable::new();
    rewrites.push(RewriteRule::new(RewriteScope::Dataset, "title", "Teh", "The"));
    let config = ProcessorConfig { post_parse_rewrites: rewrites, ..ProcessorConfig::default() };
    let mut p = parser(config);
    parse_turtle(&mut p, "<http://x/d1> a dcat:Dataset ; dct:title \"Teh Census\" .\n");

    let record = p.datasets().next().unwrap().unwrap();
    assert_eq!(record.field("title"), Some("The Census"));
  }
}
