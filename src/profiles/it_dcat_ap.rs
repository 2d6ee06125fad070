use {
  super::{base, fields, fields::FieldLookup, formats, Profile, ProfileOptions},
  crate::{
    datastore::graph::Graph,
    errors::{MissingRequiredFieldError, TranscodeError},
    processor::CatalogRecord,
    record::DatasetRecord,
    vocab,
    RdfNode,
    Triple,
  },
};

/* The Italian application profile, layered over euro_dcat_ap. It assumes
   the baseline triples are already in the graph and rewrites the ones the
   national guidelines pin down: a mandatory plain identifier, authority
   IRIs for languages, themes and formats, and the rights holder agent. */

const LANG_ALIASES: &[(&str, &str)] = &[
  ("it", "ITA"),
  ("de", "DEU"),
  ("en", "ENG"),
  ("en_GB", "ENG"),
  ("fr", "FRA"),
];

fn authority_language(code: &str) -> String {
  let mapped = LANG_ALIASES
    .iter()
    .find(|(alias, _)| *alias == code)
    .map(|(_, authority)| *authority)
    .unwrap_or(code);
  format!("{}{}", vocab::authority::LANGUAGE, mapped)
}

#[derive(Debug)]
pub struct ItDcatApProfile;

impl Profile for ItDcatApProfile {
  fn name(&self) -> &'static str {
    "it_dcat_ap"
  }

  fn parse_dataset(
    &self,
    g: &Graph,
    subject: &RdfNode,
    record: &mut DatasetRecord,
    _options: &ProfileOptions,
  ) -> Result<(), TranscodeError>
  {
    if let Some(holder) = g.object(subject, &RdfNode::named(vocab::dct::RIGHTS_HOLDER)) {
      if let Some(identifier) = base::value_of(g, &holder, vocab::dct::IDENTIFIER) {
        record.push_extra("holder_identifier", identifier);
      }
      if let Some(name) = base::value_of(g, &holder, vocab::foaf::NAME) {
        record.push_extra("holder_name", name);
      }
    }

    collapse_theme_extra(record);
    Ok(())
  }

  fn graph_from_dataset(
    &self,
    g: &mut Graph,
    subject: &RdfNode,
    record: &DatasetRecord,
    _options: &ProfileOptions,
  ) -> Result<(), TranscodeError>
  {
    g.add([
      subject.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::dcatapit::DATASET),
    ]);

    self.replace_identifier(g, subject, record)?;
    self.rewrite_languages(g, subject, record);
    self.rewrite_themes(g, subject, record);

    for (index, resource) in record.resources.iter().enumerate() {
      let code = match resource.field("format").and_then(formats::canonical_format) {
        Some(code) => code,
        None => continue,
      };
      let dist = base::distribution_ref(g, subject, resource, index);
      replace_objects(
        g,
        &dist,
        vocab::dct::FORMAT,
        RdfNode::named(format!("{}{}", vocab::authority::FILE_TYPE, code)),
      );
    }

    self.add_rights_holder(g, subject, record);
    Ok(())
  }

  fn graph_from_catalog(
    &self,
    g: &mut Graph,
    subject: &RdfNode,
    _catalog: &CatalogRecord,
    _options: &ProfileOptions,
  ) -> Result<(), TranscodeError>
  {
    g.add([
      subject.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::dcatapit::CATALOG),
    ]);
    Ok(())
  }
}

/* Private */
impl ItDcatApProfile {
  /* dct:identifier is mandatory here, and single-valued: whatever the
     baseline wrote is dropped in favour of the sanitized value. */
  fn replace_identifier(
    &self,
    g: &mut Graph,
    subject: &RdfNode,
    record: &DatasetRecord,
  ) -> Result<(), TranscodeError>
  {
    let raw = record
      .value_or_extra("identifier")
      .or_else(|| record.value_or_extra("guid"))
      .or_else(|| record.field("id"));
    let identifier = raw
      .and_then(fields::sanitize_identifier)
      .filter(|v| !v.is_empty());
    let identifier = match identifier {
      Some(v) => v,
      None => return Err(MissingRequiredFieldError::new("identifier", "dataset").into()),
    };
    replace_objects(g, subject, vocab::dct::IDENTIFIER, RdfNode::lit(identifier));
    Ok(())
  }

  fn rewrite_languages(&self, g: &mut Graph, subject: &RdfNode, record: &DatasetRecord) {
    let items = record.lookup_list("language").unwrap_or_default();
    let predicate = RdfNode::named(vocab::dct::LANGUAGE);
    for item in items {
      if item.starts_with("http") {
        continue;
      }
      g.remove(&[subject.clone(), predicate.clone(), RdfNode::lit(item.as_str())]);
      g.add([subject.clone(), predicate.clone(), RdfNode::named(authority_language(&item))]);
    }
  }

  fn rewrite_themes(&self, g: &mut Graph, subject: &RdfNode, record: &DatasetRecord) {
    let items = record.lookup_list("theme").unwrap_or_default();
    let predicate = RdfNode::named(vocab::dcat::THEME);
    for item in items {
      if item.starts_with("http") {
        continue;
      }
      g.remove(&[
        subject.clone(),
        predicate.clone(),
        RdfNode::named(base::cleaned_uri(&item)),
      ]);
      g.add([
        subject.clone(),
        predicate.clone(),
        RdfNode::named(format!("{}{}", vocab::authority::THEME, item)),
      ]);
    }
  }

  fn add_rights_holder(&self, g: &mut Graph, subject: &RdfNode, record: &DatasetRecord) {
    let identifier = record.value_or_extra("holder_identifier");
    let name = record.value_or_extra("holder_name");
    if identifier.is_none() && name.is_none() {
      return;
    }

    let agent = g.stable_bnode(subject.value(), "holder");
    g.add([subject.clone(), RdfNode::named(vocab::dct::RIGHTS_HOLDER), agent.clone()]);
    g.add([
      agent.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::dcatapit::AGENT),
    ]);
    g.add([
      agent.clone(),
      RdfNode::named(vocab::rdf::TYPE),
      RdfNode::named(vocab::foaf::AGENT),
    ]);
    if let Some(identifier) = identifier {
      g.add([agent.clone(), RdfNode::named(vocab::dct::IDENTIFIER), RdfNode::lit(identifier)]);
    }
    if let Some(name) = name {
      g.add([agent.clone(), RdfNode::named(vocab::foaf::NAME), RdfNode::lit(name)]);
    }
  }
}

fn replace_objects(g: &mut Graph, subject: &RdfNode, predicate: &str, object: RdfNode) {
  let predicate = RdfNode::named(predicate);
  let existing: Vec<Triple> = g.query(Some(subject), Some(&predicate), None).collect();
  for triple in &existing {
    g.remove(triple);
  }
  g.add([subject.clone(), predicate, object]);
}

/* Theme extras written by the baseline carry whole authority IRIs once
   the graph side used them; the national convention keeps bare codes. */
fn collapse_theme_extra(record: &mut DatasetRecord) {
  let extra = match record.extras.iter_mut().find(|e| e.key == "theme") {
    Some(extra) => extra,
    None => return,
  };
  let mut changed = false;
  let codes: Vec<String> = base::as_list(&extra.value)
    .into_iter()
    .map(|item| match item.strip_prefix(vocab::authority::THEME) {
      Some(code) => {
        changed = true;
        code.to_string()
      },
      None => item,
    })
    .collect();
  if changed {
    if let Ok(json) = serde_json::to_string(&codes) {
      extra.value = json;
    }
  }
}

#[cfg(test)]
mod interface_tests {
  use super::*;
  use crate::{
    profiles::EuroDcatApProfile,
    record::ResourceRecord,
    vocab::{authority, dcat, dcatapit, dct, foaf, rdf},
  };

  fn ds() -> RdfNode {
    RdfNode::named("http://example.org/dataset/d1")
  }

  fn serialize_chain(record: &DatasetRecord) -> Graph {
    let mut g = Graph::new();
    let options = ProfileOptions::default();
    EuroDcatApProfile
      .graph_from_dataset(&mut g, &ds(), record, &options)
      .unwrap();
    ItDcatApProfile
      .graph_from_dataset(&mut g, &ds(), record, &options)
      .unwrap();
    g
  }

  fn base_record() -> DatasetRecord {
    let mut record = DatasetRecord::new();
    record.set_field("id", "d1");
    record.set_field("title", "Dati demo");
    record
  }

  #[test]
  fn serialize_requires_an_identifier() {
    let mut g = Graph::new();
    let record = DatasetRecord::new();
    let result =
      ItDcatApProfile.graph_from_dataset(&mut g, &ds(), &record, &ProfileOptions::default());
    match result {
      Err(TranscodeError::MissingField(e)) => {
        assert_eq!(e.field, "identifier");
        assert_eq!(e.entity, "dataset");
      },
      other => panic!("expected a missing-field error, got {:?}", other.map(|_| ())),
    }
  }

  #[test]
  fn identifier_is_sanitized_and_single_valued() {
    let mut g = Graph::new();
    let predicate = RdfNode::named(dct::IDENTIFIER);
    g.add([ds(), predicate.clone(), RdfNode::lit("stale-junk")]);

    let mut record = base_record();
    record.push_extra("identifier", "agency id 7");
    ItDcatApProfile
      .graph_from_dataset(&mut g, &ds(), &record, &ProfileOptions::default())
      .unwrap();

    let values: Vec<RdfNode> = g.objects(&ds(), &predicate).collect();
    assert_eq!(values, vec![RdfNode::lit("agencyid7")]);
  }

  #[test]
  fn identifier_falls_back_to_the_record_id() {
    let g = serialize_chain(&base_record());
    assert!(g.contains(&[ds(), dct::IDENTIFIER.into(), RdfNode::lit("d1")]));
  }

  #[test]
  fn languages_move_under_the_authority_base() {
    let mut record = base_record();
    record.push_extra(
      "language",
      r#"["it", "en", "http://publications.europa.eu/resource/authority/language/FRA"]"#,
    );
    let g = serialize_chain(&record);

    let predicate = RdfNode::named(dct::LANGUAGE);
    let values: Vec<RdfNode> = g.objects(&ds(), &predicate).collect();
    assert!(values.contains(&RdfNode::named(format!("{}ITA", authority::LANGUAGE))));
    assert!(values.contains(&RdfNode::named(format!("{}ENG", authority::LANGUAGE))));
    assert!(values.contains(&RdfNode::named(format!("{}FRA", authority::LANGUAGE))));
    assert!(!values.contains(&RdfNode::lit("it")));
    assert!(!values.contains(&RdfNode::lit("en")));
    assert_eq!(values.len(), 3);
  }

  #[test]
  fn unknown_language_codes_pass_through_unmapped() {
    assert_eq!(
      authority_language("sc"),
      "http://publications.europa.eu/resource/authority/language/sc",
    );
  }

  #[test]
  fn themes_move_under_the_authority_base() {
    let mut record = base_record();
    record.push_extra(
      "theme",
      r#"["ECON", "http://publications.europa.eu/resource/authority/data-theme/ENVI"]"#,
    );
    let g = serialize_chain(&record);

    let predicate = RdfNode::named(dcat::THEME);
    let values: Vec<RdfNode> = g.objects(&ds(), &predicate).collect();
    assert!(values.contains(&RdfNode::named(format!("{}ECON", authority::THEME))));
    assert!(values.contains(&RdfNode::named(format!("{}ENVI", authority::THEME))));
    assert!(!values.contains(&RdfNode::named("ECON")));
    assert_eq!(values.len(), 2);
  }

  #[test]
  fn formats_collapse_to_file_type_iris() {
    let mut record = base_record();
    let mut resource = ResourceRecord::new();
    resource.set_field("id", "r1");
    resource.set_field("format", "csv");
    record.resources.push(resource);
    let g = serialize_chain(&record);

    let dist = RdfNode::named("http://example.org/dataset/d1/resource/r1");
    let formats: Vec<RdfNode> = g.objects(&dist, &RdfNode::named(dct::FORMAT)).collect();
    assert_eq!(
      formats,
      vec![RdfNode::named(format!("{}CSV", authority::FILE_TYPE))],
    );
    /* the media type set by the baseline stays */
    assert!(g.contains(&[
      dist.clone(),
      dcat::MEDIA_TYPE.into(),
      RdfNode::named("https://www.iana.org/assignments/media-types/text/csv"),
    ]));
  }

  #[test]
  fn rights_holder_round_trips_through_extras() {
    let mut record = base_record();
    record.push_extra("holder_identifier", "r_lombar");
    record.push_extra("holder_name", "Regione Lombardia");
    let g = serialize_chain(&record);

    let agent = g.object(&ds(), &RdfNode::named(dct::RIGHTS_HOLDER)).unwrap();
    assert!(agent.is_blank());
    assert!(g.contains(&[agent.clone(), rdf::TYPE.into(), dcatapit::AGENT.into()]));
    assert!(g.contains(&[agent.clone(), rdf::TYPE.into(), foaf::AGENT.into()]));

    let mut back = DatasetRecord::new();
    ItDcatApProfile
      .parse_dataset(&g, &ds(), &mut back, &ProfileOptions::default())
      .unwrap();
    assert_eq!(back.extra("holder_identifier"), Some("r_lombar"));
    assert_eq!(back.extra("holder_name"), Some("Regione Lombardia"));
  }

  #[test]
  fn parse_collapses_theme_authority_iris() {
    let mut record = DatasetRecord::new();
    record.push_extra(
      "theme",
      r#"["http://publications.europa.eu/resource/authority/data-theme/ECON", "http://publications.europa.eu/resource/authority/data-theme/ENVI"]"#,
    );
    let g = Graph::new();
    ItDcatApProfile
      .parse_dataset(&g, &ds(), &mut record, &ProfileOptions::default())
      .unwrap();
    assert_eq!(record.extra("theme"), Some(r#"["ECON","ENVI"]"#));
  }

  #[test]
  fn parse_leaves_bare_theme_codes_alone() {
    let mut record = DatasetRecord::new();
    record.push_extra("theme", "AGRI");
    let g = Graph::new();
    ItDcatApProfile
      .parse_dataset(&g, &ds(), &mut record, &ProfileOptions::default())
      .unwrap();
    assert_eq!(record.extra("theme"), Some("AGRI"));
  }

  #[test]
  fn catalog_gains_the_national_type() {
    let mut g = Graph::new();
    let root = RdfNode::named("http://example.org/");
    ItDcatApProfile
      .graph_from_catalog(&mut g, &root, &CatalogRecord::default(), &ProfileOptions::default())
      .unwrap();
    assert!(g.contains(&[root.clone(), rdf::TYPE.into(), dcatapit::CATALOG.into()]));
  }
}
