use {
  crate::{
    config::ProcessorConfig,
    datastore::graph::Graph,
    errors::{MissingRequiredFieldError, ParseError, TranscodeError, UnknownProfileError},
    processor::{CatalogRecord, PagingInfo},
    profiles::{base, base::AgentDetails, Profile, ProfileOptions, ProfileRegistry},
    rdf::{format::RdfSyntax, writer},
    record::DatasetRecord,
    vocab,
    RdfNode,
  },
};

/* Records in, RDF out.

   Like the parser, the serializer owns one accumulating graph: a catalog
   serialization is just many dataset serializations against the same
   store plus the aggregation triples, and the whole store is rendered
   once at the end. */

pub struct DcatSerializer {
  graph: Graph,
  chain: Vec<Box<dyn Profile>>,
  config: ProcessorConfig,
}

impl DcatSerializer {

  pub fn new(registry: &ProfileRegistry, config: ProcessorConfig) -> Result<Self, UnknownProfileError> {
    let chain = registry.build_chain(&config.profiles)?;
    Ok(DcatSerializer { graph: Graph::new(), chain, config })
  }

  /// Adds one record's triples to the store and returns its subject.
  /// Idempotent for identical record content: the subject is a function
  /// of the identity fields and every minted blank label is stable.
  pub fn graph_from_dataset(&mut self, record: &DatasetRecord) -> Result<RdfNode, TranscodeError> {
    let subject = self.dataset_ref(record)?;
    let options = ProfileOptions::from_config(&self.config);
    if self.config.pre_serialize_rewrites.is_empty() {
      for profile in &self.chain {
        profile.graph_from_dataset(&mut self.graph, &subject, record, &options)?;
      }
    } else {
      let mut working = record.clone();
      self.config.pre_serialize_rewrites.apply_dataset(&mut working);
      for profile in &self.chain {
        profile.graph_from_dataset(&mut self.graph, &subject, &working, &options)?;
      }
    }
    Ok(subject)
  }

  /// Adds the catalog node at the configured base URI, filling absent
  /// catalog fields from the config's site metadata.
  pub fn graph_from_catalog(
    &mut self,
    catalog: Option<&CatalogRecord>,
  ) -> Result<RdfNode, TranscodeError>
  {
    let subject = RdfNode::named(base::cleaned_uri(self.config.base()));
    let merged = self.catalog_with_fallbacks(catalog);
    let options = ProfileOptions::from_config(&self.config);
    for profile in &self.chain {
      profile.graph_from_catalog(&mut self.graph, &subject, &merged, &options)?;
    }
    Ok(subject)
  }

  pub fn serialize_dataset(
    &mut self,
    record: &DatasetRecord,
    format: &str,
  ) -> Result<Vec<u8>, TranscodeError>
  {
    let syntax = self.syntax_for(format)?;
    self.graph_from_dataset(record)?;
    writer::write(&self.graph, syntax, false)
  }

  /// All records into one store, one output document.
  pub fn serialize_datasets(
    &mut self,
    records: &[DatasetRecord],
    format: &str,
  ) -> Result<Vec<u8>, TranscodeError>
  {
    let syntax = self.syntax_for(format)?;
    for record in records {
      self.graph_from_dataset(record)?;
    }
    writer::write(&self.graph, syntax, false)
  }

  /// Catalog node plus every record, each attached to its aggregation
  /// root with dcat:dataset. When sub-catalogs are exposed, a record
  /// carrying a `source_catalog_uri` extra hangs off a dct:hasPart
  /// sub-catalog instead of the root.
  pub fn serialize_catalog(
    &mut self,
    catalog: Option<&CatalogRecord>,
    records: &[DatasetRecord],
    format: &str,
    paging: Option<&PagingInfo>,
  ) -> Result<Vec<u8>, TranscodeError>
  {
    let syntax = self.syntax_for(format)?;
    let root = self.graph_from_catalog(catalog)?;
    for record in records {
      let dataset = self.graph_from_dataset(record)?;
      let attach = match self.subcatalog_ref(&root, record)? {
        Some(subcatalog) => subcatalog,
        None => root.clone(),
      };
      self.graph.add([attach, RdfNode::named(vocab::dcat::DATASET), dataset]);
    }
    if let Some(paging) = paging {
      self.add_pagination(paging);
    }
    writer::write(&self.graph, syntax, false)
  }

  pub fn graph(&self) -> &Graph {
    &self.graph
  }
}

/* Private */
impl DcatSerializer {

  fn syntax_for(&self, format: &str) -> Result<RdfSyntax, TranscodeError> {
    match RdfSyntax::from_label(format) {
      Some(syntax) => Ok(syntax),
      None => Err(ParseError::UnknownFormat(format.to_string()).into()),
    }
  }

  /* The canonical subject: a harvested uri verbatim, else an IRI minted
     under the base. "None" is the unset marker some upstreams write. */
  fn dataset_ref(&self, record: &DatasetRecord) -> Result<RdfNode, TranscodeError> {
    if let Some(uri) = record.value_or_extra("uri").filter(|u| *u != "None") {
      return Ok(RdfNode::named(base::cleaned_uri(uri)));
    }
    if let Some(id) = record.first_of(&["id", "name"]) {
      return Ok(RdfNode::named(format!("{}/dataset/{}", self.config.base(), id)));
    }
    Err(MissingRequiredFieldError::new("id", "dataset").into())
  }

  fn catalog_with_fallbacks(&self, explicit: Option<&CatalogRecord>) -> CatalogRecord {
    let mut merged = explicit.cloned().unwrap_or_default();
    if merged.title.is_none() {
      merged.title = self.config.site_title.clone();
    }
    if merged.description.is_none() {
      merged.description = self.config.site_description.clone();
    }
    if merged.homepage.is_none() {
      merged.homepage = self.config.site_homepage.clone();
    }
    if merged.language.is_none() {
      merged.language = self.config.site_language.clone();
    }
    merged
  }

  /* First writer wins: the record that introduces a source catalog URI
     writes its block; records repeating the key only reuse the node. */
  fn subcatalog_ref(
    &mut self,
    root: &RdfNode,
    record: &DatasetRecord,
  ) -> Result<Option<RdfNode>, TranscodeError>
  {
    if !self.config.expose_subcatalogs {
      return Ok(None);
    }
    let mut source_uri = match record.extra("source_catalog_uri") {
      Some(uri) => uri.to_string(),
      None => return Ok(None),
    };
    if !source_uri.ends_with('/') {
      source_uri.push('/');
    }

    let catalog = RdfNode::named(source_uri.as_str());
    let has_part = RdfNode::named(vocab::dct::HAS_PART);
    if self.graph.contains(&[root.clone(), has_part.clone(), catalog.clone()]) {
      return Ok(Some(catalog));
    }

    self.graph.add([root.clone(), has_part, catalog.clone()]);
    self.graph.add([
      catalog.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::dcat::CATALOG_CLASS),
    ]);
    if let Some(title) = record.extra("source_catalog_title") {
      self.graph.add([catalog.clone(), RdfNode::named(vocab::dct::TITLE), RdfNode::lit(title)]);
    }
    if let Some(description) = record.extra("source_catalog_description") {
      self.graph.add([
        catalog.clone(),
        RdfNode::named(vocab::dct::DESCRIPTION),
        RdfNode::lit(description),
      ]);
    }
    if let Some(homepage) = record.extra("source_catalog_homepage") {
      self.graph.add([
        catalog.clone(),
        RdfNode::named(vocab::foaf::HOMEPAGE),
        RdfNode::named(base::cleaned_uri(homepage)),
      ]);
    }
    if let Some(language) = record.extra("source_catalog_language") {
      self.graph.add([
        catalog.clone(),
        RdfNode::named(vocab::dct::LANGUAGE),
        RdfNode::lit(language),
      ]);
    }
    if let Some(modified) = record.extra("source_catalog_modified") {
      if let Some(term) = base::date_literal(modified) {
        self.graph.add([catalog.clone(), RdfNode::named(vocab::dct::MODIFIED), term]);
      }
    }
    if let Some(json) = record.extra("source_catalog_publisher") {
      self.add_subcatalog_publisher(&catalog, &source_uri, json)?;
    }
    Ok(Some(catalog))
  }

  fn add_subcatalog_publisher(
    &mut self,
    catalog: &RdfNode,
    source_uri: &str,
    json: &str,
  ) -> Result<(), TranscodeError>
  {
    let details: AgentDetails = serde_json::from_str(json)?;
    let name = match details.name {
      Some(name) if !name.is_empty() => name,
      _ => return Err(MissingRequiredFieldError::new("name", "source catalog publisher").into()),
    };

    let agent = self.graph.stable_bnode(source_uri, "publisher");
    self.graph.add([
      catalog.clone(),
      RdfNode::named(vocab::dct::PUBLISHER),
      agent.clone(),
    ]);
    self.graph.add([
      agent.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::foaf::AGENT),
    ]);
    self.graph.add([agent.clone(), RdfNode::named(vocab::foaf::NAME), RdfNode::lit(name)]);
    if let Some(identifier) = details.identifier {
      self.graph.add([
        agent.clone(),
        RdfNode::named(vocab::dct::IDENTIFIER),
        RdfNode::lit(identifier),
      ]);
    }
    if let Some(email) = details.email {
      self.graph.add([agent.clone(), RdfNode::named(vocab::foaf::MBOX), RdfNode::lit(email)]);
    }
    if let Some(url) = details.url {
      self.graph.add([
        agent.clone(),
        RdfNode::named(vocab::foaf::HOMEPAGE),
        RdfNode::named(base::cleaned_uri(&url)),
      ]);
    }
    if let Some(agent_type) = details.agent_type {
      self.graph.add([
        agent.clone(),
        RdfNode::named(vocab::dct::TYPE),
        RdfNode::named(base::cleaned_uri(&agent_type)),
      ]);
    }
    Ok(())
  }

  fn add_pagination(&mut self, paging: &PagingInfo) {
    let node = match &paging.current {
      Some(current) => RdfNode::named(base::cleaned_uri(current)),
      None => self.graph.bnode(),
    };
    self.graph.add([
      node.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::hydra::PAGED_COLLECTION),
    ]);

    /* both predicate generations, so either vocabulary vintage of
       consumer can follow the chain */
    let links = [
      (&paging.first, vocab::hydra::FIRST, vocab::hydra::FIRST_PAGE),
      (&paging.last, vocab::hydra::LAST, vocab::hydra::LAST_PAGE),
      (&paging.next, vocab::hydra::NEXT, vocab::hydra::NEXT_PAGE),
      (&paging.previous, vocab::hydra::PREVIOUS, vocab::hydra::PREVIOUS_PAGE),
    ];
    for (value, current, deprecated) in links {
      if let Some(value) = value {
        self.graph.add([node.clone(), RdfNode::named(current), RdfNode::lit(value.as_str())]);
        self.graph.add([node.clone(), RdfNode::named(deprecated), RdfNode::lit(value.as_str())]);
      }
    }
    if let Some(count) = paging.count {
      self.graph.add([
        node.clone(),
        RdfNode::named(vocab::hydra::TOTAL_ITEMS),
        RdfNode::typed_lit(count.to_string(), vocab::xsd::INTEGER),
      ]);
    }
    if let Some(per_page) = paging.items_per_page {
      self.graph.add([
        node.clone(),
        RdfNode::named(vocab::hydra::ITEMS_PER_PAGE),
        RdfNode::typed_lit(per_page.to_string(), vocab::xsd::INTEGER),
      ]);
    }
  }
}
