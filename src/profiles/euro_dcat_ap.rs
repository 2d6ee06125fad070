use {
  super::{base, fields, formats, Profile, ProfileOptions},
  crate::{
    datastore::graph::Graph,
    errors::TranscodeError,
    processor::CatalogRecord,
    record::{DatasetRecord, ResourceRecord, Tag},
    vocab,
    RdfNode,
  },
};

/* The DCAT-AP baseline mapping. Everything the tables in fields.rs can
   express goes through them; what is left here is the sub-entity wiring
   (contact point, publisher, temporal, spatial, checksum) and the
   distribution walk. */

#[derive(Debug)]
pub struct EuroDcatApProfile;

impl Profile for EuroDcatApProfile {
  fn name(&self) -> &'static str {
    "euro_dcat_ap"
  }

  fn parse_dataset(
    &self,
    g: &Graph,
    subject: &RdfNode,
    record: &mut DatasetRecord,
    options: &ProfileOptions,
  ) -> Result<(), TranscodeError>
  {
    for mapping in fields::DATASET_FIELDS {
      if let Some(value) = fields::read_value(g, subject, mapping) {
        record.set_field(mapping.field, value);
      }
    }
    /* adms:version backstops owl:versionInfo in older catalogs */
    if record.field("version").is_none() {
      if let Some(value) = base::value_of(g, subject, vocab::adms::VERSION) {
        record.set_field("version", value);
      }
    }

    for keyword in base::keywords(g, subject) {
      record.tags.push(Tag::new(keyword));
    }

    for mapping in fields::DATASET_EXTRAS {
      if let Some(value) = fields::read_value(g, subject, mapping) {
        if !value.is_empty() {
          record.push_extra(mapping.field, value);
        }
      }
    }
    if let Some(value) = base::access_rights(g, subject, vocab::dct::ACCESS_RIGHTS) {
      record.push_extra("access_rights", value);
    }
    for mapping in fields::DATASET_DATES {
      if let Some(value) = fields::read_date(g, subject, mapping) {
        record.push_extra(mapping.field, value);
      }
    }
    for mapping in fields::DATASET_LISTS {
      let values = fields::read_list(g, subject, mapping);
      if !values.is_empty() {
        record.push_extra(mapping.field, serde_json::to_string(&values)?);
      }
    }

    let contact = base::contact_details(g, subject, vocab::dcat::CONTACT_POINT)
      .or_else(|| base::contact_details(g, subject, vocab::adms::CONTACT_POINT));
    if let Some(contact) = contact {
      if let Some(uri) = contact.uri {
        record.push_extra("contact_uri", uri);
      }
      if let Some(name) = contact.name {
        record.push_extra("contact_name", name);
      }
      if let Some(email) = contact.email {
        record.push_extra("contact_email", email);
      }
    }

    if let Some(publisher) = base::agent_details(g, subject, vocab::dct::PUBLISHER) {
      if let Some(uri) = publisher.uri {
        record.push_extra("publisher_uri", uri);
      }
      if let Some(name) = publisher.name {
        record.push_extra("publisher_name", name);
      }
      if let Some(email) = publisher.email {
        record.push_extra("publisher_email", email);
      }
      if let Some(url) = publisher.url {
        record.push_extra("publisher_url", url);
      }
      if let Some(agent_type) = publisher.agent_type {
        record.push_extra("publisher_type", agent_type);
      }
    }

    let (start, end) = base::time_interval(g, subject, vocab::dct::TEMPORAL);
    if let Some(start) = start {
      record.push_extra("temporal_start", start);
    }
    if let Some(end) = end {
      record.push_extra("temporal_end", end);
    }

    let spatial = base::spatial_coverage(g, subject, vocab::dct::SPATIAL);
    if let Some(uri) = spatial.uri {
      record.push_extra("spatial_uri", uri);
    }
    if let Some(text) = spatial.text {
      record.push_extra("spatial_text", text);
    }
    if let Some(geometry) = spatial.geometry {
      record.push_extra("spatial", geometry);
    }

    /* kept even when empty, so missing dataset IRIs show up downstream */
    record.push_extra("uri", subject.as_iri().unwrap_or(""));

    if options.expose_subcatalogs {
      self.add_source_catalog_extras(g, subject, record)?;
    }

    for distribution in base::nodes_of(g, subject, vocab::dcat::DISTRIBUTION) {
      let resource = self.parse_distribution(g, &distribution, options)?;
      record.resources.push(resource);
    }

    Ok(())
  }

  fn graph_from_dataset(
    &self,
    g: &mut Graph,
    subject: &RdfNode,
    record: &DatasetRecord,
    options: &ProfileOptions,
  ) -> Result<(), TranscodeError>
  {
    g.add([
      subject.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::dcat::DATASET_CLASS),
    ]);

    fields::write_scalars(g, subject, record, fields::DATASET_FIELDS);
    fields::write_scalars(g, subject, record, fields::DATASET_EXTRAS);
    fields::write_scalars(g, subject, record, &[fields::DATASET_ACCESS_RIGHTS]);
    fields::write_dates(g, subject, record, fields::DATASET_DATES);
    fields::write_lists(g, subject, record, fields::DATASET_LISTS);

    for tag in &record.tags {
      if !tag.name.is_empty() {
        g.add([
          subject.clone(),
          RdfNode::named(vocab::dcat::KEYWORD),
          RdfNode::lit(tag.name.as_str()),
        ]);
      }
    }

    self.add_contact_point(g, subject, record);
    self.add_publisher(g, subject, record);
    self.add_temporal(g, subject, record);
    self.add_spatial(g, subject, record);

    for (index, resource) in record.resources.iter().enumerate() {
      self.add_distribution(g, subject, resource, index, options);
    }

    Ok(())
  }

  fn graph_from_catalog(
    &self,
    g: &mut Graph,
    subject: &RdfNode,
    catalog: &CatalogRecord,
    _options: &ProfileOptions,
  ) -> Result<(), TranscodeError>
  {
    g.add([
      subject.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::dcat::CATALOG_CLASS),
    ]);
    fields::write_scalars(g, subject, catalog, fields::CATALOG_SCALARS);
    fields::write_dates(g, subject, catalog, fields::CATALOG_DATES);
    Ok(())
  }
}

/* Private, parse direction */
impl EuroDcatApProfile {
  fn parse_distribution(
    &self,
    g: &Graph,
    distribution: &RdfNode,
    options: &ProfileOptions,
  ) -> Result<ResourceRecord, TranscodeError>
  {
    let mut resource = ResourceRecord::new();

    for mapping in fields::RESOURCE_SCALARS {
      if let Some(value) = fields::read_value(g, distribution, mapping) {
        resource.set_field(mapping.field, value);
      }
    }
    if let Some(rights) = base::access_rights(g, distribution, vocab::dct::RIGHTS) {
      resource.set_field("rights", rights);
    }
    for mapping in fields::RESOURCE_DATES {
      if let Some(value) = fields::read_date(g, distribution, mapping) {
        resource.set_field(mapping.field, value);
      }
    }
    for mapping in fields::RESOURCE_LISTS {
      let values = fields::read_list(g, distribution, mapping);
      if !values.is_empty() {
        resource.set_field(mapping.field, serde_json::to_string(&values)?);
      }
    }

    /* url prefers the download location */
    if let Some(url) = resource.first_of(&["download_url", "access_url"]) {
      let url = url.to_string();
      resource.set_field("url", url);
    }

    let (media_type, label) = formats::distribution_format(g, distribution, options.normalize_formats);
    if let Some(media_type) = media_type.clone() {
      resource.set_field("mimetype", media_type);
    }
    if let Some(format) = label.or(media_type) {
      resource.set_field("format", format);
    }

    if let Some(size) = base::value_of(g, distribution, vocab::dcat::BYTE_SIZE) {
      if let Ok(parsed) = size.trim().parse::<f64>() {
        resource.set_field("size", (parsed as i64).to_string());
      }
    }

    for checksum in base::nodes_of(g, distribution, vocab::spdx::CHECKSUM) {
      if let Some(algorithm) = base::value_of(g, &checksum, vocab::spdx::ALGORITHM) {
        resource.set_field("hash_algorithm", algorithm);
      }
      if let Some(value) = base::value_of(g, &checksum, vocab::spdx::CHECKSUM_VALUE) {
        resource.set_field("hash", value);
      }
    }

    resource.set_field("uri", distribution.as_iri().unwrap_or(""));
    resource.set_field("distribution_ref", distribution.value());

    Ok(resource)
  }

  fn add_source_catalog_extras(
    &self,
    g: &Graph,
    subject: &RdfNode,
    record: &mut DatasetRecord,
  ) -> Result<(), TranscodeError>
  {
    let source = match source_catalog(g, subject) {
      Some(node) => node,
      None => return Ok(()),
    };
    /* only a named catalog can serve as a dedup key later */
    let uri = match source.as_iri() {
      Some(iri) => iri.to_string(),
      None => return Ok(()),
    };
    record.push_extra("source_catalog_uri", uri);
    for (key, predicate) in [
      ("source_catalog_title", vocab::dct::TITLE),
      ("source_catalog_description", vocab::dct::DESCRIPTION),
      ("source_catalog_homepage", vocab::foaf::HOMEPAGE),
      ("source_catalog_language", vocab::dct::LANGUAGE),
      ("source_catalog_modified", vocab::dct::MODIFIED),
    ] {
      if let Some(value) = base::value_of(g, &source, predicate) {
        record.push_extra(key, value);
      }
    }
    if let Some(publisher) = base::agent_details(g, &source, vocab::dct::PUBLISHER) {
      record.push_extra("source_catalog_publisher", serde_json::to_string(&publisher)?);
    }
    Ok(())
  }
}

/* Private, serialize direction */
impl EuroDcatApProfile {
  fn add_contact_point(&self, g: &mut Graph, subject: &RdfNode, record: &DatasetRecord) {
    let keys = [
      "contact_uri",
      "contact_name",
      "contact_email",
      "maintainer",
      "maintainer_email",
      "author",
      "author_email",
    ];
    if !keys.iter().any(|key| record.value_or_extra(key).is_some()) {
      return;
    }

    let node = match record.value_or_extra("contact_uri") {
      Some(uri) => RdfNode::named(base::cleaned_uri(uri)),
      None => g.stable_bnode(subject.value(), "contact"),
    };
    g.add([
      subject.clone(),
      RdfNode::named(vocab::dcat::CONTACT_POINT),
      node.clone(),
    ]);
    g.add([
      node.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::vcard::ORGANIZATION),
    ]);

    let name = record
      .value_or_extra("contact_name")
      .or_else(|| record.value_or_extra("maintainer"))
      .or_else(|| record.value_or_extra("author"));
    if let Some(name) = name {
      g.add([node.clone(), RdfNode::named(vocab::vcard::FN), RdfNode::lit(name)]);
    }

    let email = record
      .value_or_extra("contact_email")
      .or_else(|| record.value_or_extra("maintainer_email"))
      .or_else(|| record.value_or_extra("author_email"));
    if let Some(email) = email {
      g.add([
        node.clone(),
        RdfNode::named(vocab::vcard::HAS_EMAIL),
        RdfNode::named(base::add_mailto(email)),
      ]);
    }
  }

  fn add_publisher(&self, g: &mut Graph, subject: &RdfNode, record: &DatasetRecord) {
    let uri = record.value_or_extra("publisher_uri");
    let name = record.value_or_extra("publisher_name");
    if uri.is_none() && name.is_none() {
      return;
    }

    let node = match uri {
      Some(uri) => RdfNode::named(base::cleaned_uri(uri)),
      None => g.stable_bnode(subject.value(), "publisher"),
    };
    g.add([subject.clone(), RdfNode::named(vocab::dct::PUBLISHER), node.clone()]);
    g.add([
      node.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::foaf::ORGANIZATION),
    ]);
    if let Some(name) = name {
      g.add([node.clone(), RdfNode::named(vocab::foaf::NAME), RdfNode::lit(name)]);
    }
    if let Some(email) = record.value_or_extra("publisher_email") {
      g.add([node.clone(), RdfNode::named(vocab::foaf::MBOX), RdfNode::lit(email)]);
    }
    if let Some(url) = record.value_or_extra("publisher_url") {
      g.add([
        node.clone(),
        RdfNode::named(vocab::foaf::HOMEPAGE),
        RdfNode::named(base::cleaned_uri(url)),
      ]);
    }
    if let Some(agent_type) = record.value_or_extra("publisher_type") {
      g.add([node.clone(), RdfNode::named(vocab::dct::TYPE), base::uri_or_literal(agent_type)]);
    }
  }

  fn add_temporal(&self, g: &mut Graph, subject: &RdfNode, record: &DatasetRecord) {
    let start = record.value_or_extra("temporal_start").and_then(base::date_literal);
    let end = record.value_or_extra("temporal_end").and_then(base::date_literal);
    if start.is_none() && end.is_none() {
      return;
    }

    let span = g.stable_bnode(subject.value(), "temporal");
    g.add([subject.clone(), RdfNode::named(vocab::dct::TEMPORAL), span.clone()]);
    g.add([
      span.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::dct::PERIOD_OF_TIME),
    ]);
    if let Some(term) = start {
      g.add([span.clone(), RdfNode::named(vocab::dcat::START_DATE), term]);
    }
    if let Some(term) = end {
      g.add([span.clone(), RdfNode::named(vocab::dcat::END_DATE), term]);
    }
  }

  fn add_spatial(&self, g: &mut Graph, subject: &RdfNode, record: &DatasetRecord) {
    let uri = record.value_or_extra("spatial_uri");
    let text = record.value_or_extra("spatial_text");
    let geometry = record.value_or_extra("spatial");
    if uri.is_none() && text.is_none() && geometry.is_none() {
      return;
    }

    /* an earlier profile may have placed the location node already */
    let spatial_pred = RdfNode::named(vocab::dct::SPATIAL);
    let node = match g.object(subject, &spatial_pred) {
      Some(existing) => existing,
      None => {
        let node = match uri {
          Some(uri) => RdfNode::named(base::cleaned_uri(uri)),
          None => g.stable_bnode(subject.value(), "spatial"),
        };
        g.add([subject.clone(), spatial_pred, node.clone()]);
        g.add([
          node.clone(),
          RdfNode::named(vocab::rdf::TYPE),
          RdfNode::named(vocab::dct::LOCATION),
        ]);
        node
      },
    };

    if let Some(text) = text {
      g.add([node.clone(), RdfNode::named(vocab::skos::PREF_LABEL), RdfNode::lit(text)]);
    }
    if let Some(geometry) = geometry {
      g.add([
        node.clone(),
        RdfNode::named(vocab::locn::GEOMETRY),
        RdfNode::typed_lit(geometry, vocab::GEOJSON_IMT),
      ]);
    }
  }

  fn add_distribution(
    &self,
    g: &mut Graph,
    subject: &RdfNode,
    resource: &ResourceRecord,
    index: usize,
    options: &ProfileOptions,
  ) {
    let dist = base::distribution_ref(g, subject, resource, index);
    g.add([subject.clone(), RdfNode::named(vocab::dcat::DISTRIBUTION), dist.clone()]);
    g.add([
      dist.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::dcat::DISTRIBUTION_CLASS),
    ]);

    fields::write_scalars(g, &dist, resource, fields::RESOURCE_SCALARS);
    fields::write_scalars(g, &dist, resource, &[fields::RESOURCE_RIGHTS]);
    fields::write_lists(g, &dist, resource, fields::RESOURCE_LISTS);
    fields::write_dates(g, &dist, resource, fields::RESOURCE_DATES);

    /* url backstops accessURL, never overrides an explicit one, and a
       url equal to the download location is no access location at all */
    if let (Some(url), None) = (resource.field("url"), resource.field("access_url")) {
      let doubles_download = resource.field("download_url") == Some(url);
      if !doubles_download {
        g.add([
          dist.clone(),
          RdfNode::named(vocab::dcat::ACCESS_URL),
          RdfNode::named(base::cleaned_uri(url)),
        ]);
      }
    }

    if let Some(size) = resource.field("size") {
      g.add([
        dist.clone(),
        RdfNode::named(vocab::dcat::BYTE_SIZE),
        base::number_literal(size),
      ]);
    }

    if let Some(hash) = resource.field("hash") {
      let checksum = g.stable_bnode(dist.value(), "checksum");
      g.add([dist.clone(), RdfNode::named(vocab::spdx::CHECKSUM), checksum.clone()]);
      g.add([
        checksum.clone(),
        RdfNode::named(vocab::rdf::TYPE),
        RdfNode::named(vocab::spdx::CHECKSUM_CLASS),
      ]);
      g.add([
        checksum.clone(),
        RdfNode::named(vocab::spdx::CHECKSUM_VALUE),
        RdfNode::typed_lit(hash, vocab::xsd::HEX_BINARY),
      ]);
      if let Some(algorithm) = resource.field("hash_algorithm") {
        g.add([
          checksum.clone(),
          RdfNode::named(vocab::spdx::ALGORITHM),
          base::uri_or_literal(algorithm),
        ]);
      }
    }

    formats::add_format_triples(
      g,
      &dist,
      resource.field("format"),
      resource.field("mimetype"),
      options.normalize_formats,
    );
  }
}

/* The catalog a dataset came from: any catalog referencing it other
   than the root, else the root itself. */
fn source_catalog(g: &Graph, dataset: &RdfNode) -> Option<RdfNode> {
  let root = root_catalog(g)?;
  let other = g
    .subjects_with(&RdfNode::named(vocab::dcat::DATASET), dataset)
    .find(|catalog| *catalog != root);
  Some(other.unwrap_or(root))
}

/* The aggregation root: the subject holding dct:hasPart links, else the
   first catalog-typed subject in store order. */
fn root_catalog(g: &Graph) -> Option<RdfNode> {
  let has_part = RdfNode::named(vocab::dct::HAS_PART);
  if let Some([subject, _, _]) = g.query(None, Some(&has_part), None).next() {
    return Some(subject);
  }
  g.subjects_with(
    &RdfNode::named(vocab::rdf::TYPE),
    &RdfNode::named(vocab::dcat::CATALOG_CLASS),
  )
  .next()
}
