pub mod parser;
pub mod serializer;

pub use {parser::DcatParser, serializer::DcatSerializer};

use {
  crate::profiles::{base, fields::FieldLookup},
  serde::{Deserialize, Serialize},
};

/// Catalog-level metadata serialized at the graph root. All fields are
/// optional; absent ones produce no triples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub title: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub homepage: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub language: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub modified: Option<String>,
}

impl FieldLookup for CatalogRecord {
  fn lookup(&self, key: &str) -> Option<String> {
    let value = match key {
      "title" => self.title.as_deref(),
      "description" => self.description.as_deref(),
      "homepage" => self.homepage.as_deref(),
      "language" => self.language.as_deref(),
      "modified" => self.modified.as_deref(),
      _ => None,
    };
    value.filter(|v| !v.is_empty()).map(str::to_string)
  }

  fn lookup_list(&self, key: &str) -> Option<Vec<String>> {
    self.lookup(key).map(|v| base::as_list(&v))
  }
}

/// Hydra paging state for a catalog page. Links are absolute URLs the
/// caller computed; totals ride along as integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub count: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub items_per_page: Option<u64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub current: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub first: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub last: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub next: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub previous: Option<String>,
}

#[cfg(test)]
mod unit_tests {
  use super::*;

  #[test]
  fn catalog_lookup_filters_empty_values() {
    let catalog = CatalogRecord {
      title: Some("Open Data".to_string()),
      description: Some(String::new()),
      ..CatalogRecord::default()
    };
    assert_eq!(catalog.lookup("title").as_deref(), Some("Open Data"));
    assert_eq!(catalog.lookup("description"), None);
    assert_eq!(catalog.lookup("issued"), None);
  }

  #[test]
  fn paging_info_round_trips_as_json() {
    let paging = PagingInfo {
      count: Some(240),
      items_per_page: Some(100),
      next: Some("http://example.org/catalog.xml?page=2".to_string()),
      ..PagingInfo::default()
    };
    let json = serde_json::to_string(&paging).unwrap();
    assert!(!json.contains("previous"));
    let back: PagingInfo = serde_json::from_str(&json).unwrap();
    assert_eq!(back, paging);
  }
}

/* Whole-loop coverage: records through the serializer, bytes through the
   parser, and back. */
#[cfg(test)]
mod interface_tests {
  use super::*;
  use crate::{
    config::ProcessorConfig,
    profiles::ProfileRegistry,
    record::{DatasetRecord, ResourceRecord, Tag},
  };

  fn registry() -> ProfileRegistry {
    ProfileRegistry::with_defaults()
  }

  fn config() -> ProcessorConfig {
    ProcessorConfig {
      base_uri: String::from("http://portal.example.org"),
      ..ProcessorConfig::default()
    }
  }

  fn full_record() -> DatasetRecord {
    let mut record = DatasetRecord::new();
    record.set_field("id", "d1");
    record.set_field("title", "Censimento 2024");
    record.set_field("notes", "Population counts by municipality");
    record.tags.push(Tag::new("population"));
    record.tags.push(Tag::new("census"));
    record.push_extra("identifier", "census-2024");
    record.push_extra("issued", "2024-02-01");
    record.push_extra("language", r#"["it", "en"]"#);
    record.push_extra("contact_name", "Data Office");
    record.push_extra("contact_email", "office@example.org");
    record.push_extra("publisher_name", "Statistics Bureau");
    record.push_extra("temporal_start", "2023-01-01");
    record.push_extra("temporal_end", "2023-12-31");
    record.push_extra("spatial_text", "Lombardia");

    let mut resource = ResourceRecord::new();
    resource.set_field("id", "r1");
    resource.set_field("name", "CSV dump");
    resource.set_field("url", "http://files.example.org/census.csv");
    resource.set_field("format", "CSV");
    resource.set_field("size", "204800");
    resource.set_field("hash", "abc123");
    record.resources.push(resource);
    record
  }

  #[test]
  fn record_to_rdf_and_back_preserves_mapped_fields() {
    for format in ["turtle", "xml", "ntriples", "json-ld"] {
      let mut serializer = DcatSerializer::new(&registry(), config()).unwrap();
      let bytes = serializer.serialize_dataset(&full_record(), format).unwrap();

      let mut parser = DcatParser::new(&registry(), config()).unwrap();
      parser.parse(&bytes, Some(format)).unwrap();
      let records: Vec<DatasetRecord> =
        parser.datasets().collect::<Result<_, _>>().unwrap();
      assert_eq!(records.len(), 1, "{} left {} records", format, records.len());
      let back = &records[0];

      assert_eq!(back.field("title"), Some("Censimento 2024"));
      assert_eq!(back.field("notes"), Some("Population counts by municipality"));
      let mut tags: Vec<&str> = back.tags.iter().map(|t| t.name.as_str()).collect();
      tags.sort();
      assert_eq!(tags, vec!["census", "population"]);
      assert_eq!(back.extra("identifier"), Some("census-2024"));
      assert_eq!(back.extra("issued"), Some("2024-02-01T00:00:00"));
      assert_eq!(back.extra("contact_name"), Some("Data Office"));
      assert_eq!(back.extra("contact_email"), Some("office@example.org"));
      assert_eq!(back.extra("publisher_name"), Some("Statistics Bureau"));
      assert_eq!(back.extra("temporal_start"), Some("2023-01-01T00:00:00"));
      assert_eq!(back.extra("temporal_end"), Some("2023-12-31T00:00:00"));
      assert_eq!(back.extra("spatial_text"), Some("Lombardia"));
      assert_eq!(back.extra("uri"), Some("http://portal.example.org/dataset/d1"));

      assert_eq!(back.resources.len(), 1);
      let resource = &back.resources[0];
      assert_eq!(resource.field("name"), Some("CSV dump"));
      assert_eq!(resource.field("url"), Some("http://files.example.org/census.csv"));
      assert_eq!(resource.field("format"), Some("CSV"));
      assert_eq!(resource.field("mimetype"), Some("text/csv"));
      assert_eq!(resource.field("size"), Some("204800"));
      assert_eq!(resource.field("hash"), Some("abc123"));
    }
  }

  #[test]
  fn consume_a_paged_xml_catalog() {
    let doc = concat!(
      r#"<?xml version="1.0" encoding="utf-8"?>"#,
      "\n",
      r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#""#,
      r#" xmlns:dcat="http://www.w3.org/ns/dcat#""#,
      r#" xmlns:dct="http://purl.org/dc/terms/""#,
      r#" xmlns:hydra="http://www.w3.org/ns/hydra/core#">"#,
      r#"<dcat:Catalog rdf:about="http://example.org/">"#,
      r#"<dcat:dataset><dcat:Dataset rdf:about="http://example.org/dataset/a">"#,
      r#"<dct:title>Dataset A</dct:title></dcat:Dataset></dcat:dataset>"#,
      r#"<dcat:dataset><dcat:Dataset rdf:about="http://example.org/dataset/b">"#,
      r#"<dct:title>Dataset B</dct:title></dcat:Dataset></dcat:dataset>"#,
      r#"</dcat:Catalog>"#,
      r#"<hydra:PagedCollection rdf:about="http://example.org/catalog.xml?page=1">"#,
      r#"<hydra:next>http://example.org/catalog.xml?page=2</hydra:next>"#,
      r#"</hydra:PagedCollection>"#,
      r#"</rdf:RDF>"#,
    );

    let mut parser = DcatParser::new(&registry(), config()).unwrap();
    parser.parse(doc.as_bytes(), None).unwrap();

    let titles: Vec<String> = parser
      .datasets()
      .map(|r| r.unwrap().field("title").unwrap().to_string())
      .collect();
    assert_eq!(titles, vec![String::from("Dataset A"), String::from("Dataset B")]);
    assert_eq!(
      parser.next_page().as_deref(),
      Some("http://example.org/catalog.xml?page=2"),
    );
  }

  #[test]
  fn one_document_carries_many_records() {
    let mut second = full_record();
    second.set_field("id", "d2");
    second.set_field("title", "Second dataset");

    let mut serializer = DcatSerializer::new(&registry(), config()).unwrap();
    let bytes = serializer
      .serialize_datasets(&[full_record(), second], "xml")
      .unwrap();

    let mut parser = DcatParser::new(&registry(), config()).unwrap();
    parser.parse(&bytes, Some("xml")).unwrap();
    assert_eq!(parser.dataset_refs().len(), 2);
  }

  #[test]
  fn subcatalog_structure_survives_the_loop() {
    let harvested = concat!(
      "@prefix dcat: <http://www.w3.org/ns/dcat#> .\n",
      "@prefix dct: <http://purl.org/dc/terms/> .\n",
      "@prefix foaf: <http://xmlns.com/foaf/0.1/> .\n",
      "<http://portal.example.org/> a dcat:Catalog ;\n",
      "  dct:hasPart <http://regional.example.org/> .\n",
      "<http://regional.example.org/> a dcat:Catalog ;\n",
      "  dct:title \"Regional portal\" ;\n",
      "  dct:publisher [ foaf:name \"Regione Demo\" ] ;\n",
      "  dcat:dataset <http://regional.example.org/dataset/d1> .\n",
      "<http://regional.example.org/dataset/d1> a dcat:Dataset ;\n",
      "  dct:title \"Regional dataset\" .\n",
    );
    let subcat_config = ProcessorConfig {
      base_uri: String::from("http://portal.example.org"),
      expose_subcatalogs: true,
      ..ProcessorConfig::default()
    };

    let mut parser = DcatParser::new(&registry(), subcat_config.clone()).unwrap();
    parser.parse(harvested.as_bytes(), Some("turtle")).unwrap();
    let records: Vec<DatasetRecord> = parser.datasets().collect::<Result<_, _>>().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(
      records[0].extra("source_catalog_uri"),
      Some("http://regional.example.org/"),
    );
    assert_eq!(records[0].extra("source_catalog_title"), Some("Regional portal"));

    let mut serializer = DcatSerializer::new(&registry(), subcat_config.clone()).unwrap();
    let bytes = serializer
      .serialize_catalog(None, &records, "turtle", None)
      .unwrap();

    let mut reparse = DcatParser::new(&registry(), subcat_config).unwrap();
    reparse.parse(&bytes, Some("turtle")).unwrap();
    let again: Vec<DatasetRecord> = reparse.datasets().collect::<Result<_, _>>().unwrap();
    assert_eq!(again.len(), 1);
    assert_eq!(
      again[0].extra("source_catalog_uri"),
      Some("http://regional.example.org/"),
    );
    assert_eq!(again[0].extra("source_catalog_title"), Some("Regional portal"));
    let publisher = again[0].extra("source_catalog_publisher").unwrap();
    assert!(publisher.contains("Regione Demo"));
  }

  #[test]
  fn chained_profiles_compose_across_the_loop() {
    let chained = ProcessorConfig {
      profiles: vec![String::from("euro_dcat_ap"), String::from("it_dcat_ap")],
      base_uri: String::from("http://portal.example.org"),
      ..ProcessorConfig::default()
    };

    let mut record = DatasetRecord::new();
    record.set_field("id", "d1");
    record.set_field("title", "Dati regionali");
    record.push_extra("language", r#"["it"]"#);
    record.push_extra("theme", r#"["ECON"]"#);
    record.push_extra("holder_identifier", "r_demo");
    record.push_extra("holder_name", "Regione Demo");

    let mut serializer = DcatSerializer::new(&registry(), chained.clone()).unwrap();
    let bytes = serializer.serialize_dataset(&record, "turtle").unwrap();

    let mut parser = DcatParser::new(&registry(), chained).unwrap();
    parser.parse(&bytes, Some("turtle")).unwrap();
    let back = parser.datasets().next().unwrap().unwrap();

    assert_eq!(back.extra("identifier"), Some("d1"));
    assert_eq!(
      back.extra("language"),
      Some(r#"["http://publications.europa.eu/resource/authority/language/ITA"]"#),
    );
    assert_eq!(back.extra("theme"), Some(r#"["ECON"]"#));
    assert_eq!(back.extra("holder_identifier"), Some("r_demo"));
    assert_eq!(back.extra("holder_name"), Some("Regione Demo"));
  }
}
