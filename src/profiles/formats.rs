use {
  super::base,
  crate::{
    datastore::graph::Graph,
    vocab,
    RdfNode,
  },
};

/* Format labels and media types.

   dct:format and dcat:mediaType overlap in real catalogs: the format slot
   carries anything from a clean code to a full IANA IRI, and half the
   harvests fill the media type with the format label. The tables below
   replace the per-site conditional cascades with data: one alias table to
   canonicalize label spellings, one substring table to infer a media type
   from a label. */

const IANA_MARKER: &str = "iana.org/assignments/media-types";

/// Format spellings seen in harvested catalogs, mapped to canonical codes.
/// Matching is case-insensitive and exact; aliases are distinct, so order
/// only breaks ties.
pub const FORMAT_ALIASES: &[(&str, &str)] = &[
  ("HTML", "HTML_SIMPL"),
  ("HTML_SIMPL", "HTML_SIMPL"),
  ("URL", "HTML_SIMPL"),
  ("LINK", "HTML"),
  ("WEB", "HTML"),
  ("MOKA", "HTML"),
  ("PUBLIC FOLDER", "HTML"),
  ("WMS_SRVC", "WMS_SRVC"),
  ("MAP_SRVC", "WMS_SRVC"),
  ("WFS", "MAP_SRVC"),
  ("WCS", "MAP_SRVC"),
  ("WFS_SRVC", "WFS_SRVC"),
  ("CSV", "CSV"),
  ("TSV", "TSV"),
  ("TXT", "TXT"),
  ("XLS", "XLS"),
  ("XLSX", "XLSX"),
  ("EXCEL", "XLSX"),
  ("ODS", "ODS"),
  ("ODT", "ODT"),
  ("DOC", "DOC"),
  ("DOCX", "DOCX"),
  ("DOCUMENTAZIONE", "DOC"),
  ("PDF", "PDF"),
  ("RTF", "RTF"),
  ("JSON", "JSON"),
  ("JSONL", "JSON"),
  ("JSON_LD", "JSON_LD"),
  ("JSONLD", "JSON_LD"),
  ("GEOJSON", "GEOJSON"),
  ("GEO JSON", "GEOJSON"),
  ("XML", "XML"),
  ("XSD", "XML"),
  ("OPENDATA", "XML"),
  ("ODATA", "XML"),
  ("RDF", "RDF"),
  ("RDFXML", "RDF_XML"),
  ("RDF+XML", "RDF_XML"),
  ("RDF_XML", "RDF_XML"),
  ("TTL", "RDF_TURTLE"),
  ("TURTLE", "RDF_TURTLE"),
  ("RDF_TURTLE", "RDF_TURTLE"),
  ("RDF_N_TRIPLES", "RDF_N_TRIPLES"),
  ("N3", "N3"),
  ("OWL", "OWL"),
  ("API", "API"),
  ("SHP", "SHP"),
  ("FGB", "SHP"),
  ("DBF", "DBF"),
  ("DBASE", "DBF"),
  ("GML", "GML"),
  ("GPKG", "GPKG"),
  ("GPX", "GPX"),
  ("KML", "KML"),
  ("KMZ", "KMZ"),
  ("DWG", "DWG"),
  ("PNG", "PNG"),
  ("TIF", "TIFF"),
  ("TIFF", "TIFF"),
  ("BWF", "BWF"),
  ("GRIB", "GRIB"),
  ("SDMX", "SDMX"),
  ("PARQUET", "PARQUET"),
  ("OV2", "BIN"),
  /* too generic to infer a payload type from */
  ("ZIP", "ZIP"),
];

/// Ordered substring rules inferring a media type from a format label.
/// The whole table is scanned and the last match wins: specific codes
/// (GEOJSON, RDF_TURTLE) sit after the general ones they contain (JSON,
/// RDF), so they override. Matching is case-insensitive.
pub const MEDIA_TYPE_RULES: &[(&str, &str)] = &[
  ("CSV", "text/csv"),
  ("JSON", "application/json"),
  ("ZIP", "application/zip"),
  ("XML", "text/xml"),
  ("RDF", "application/rdf+xml"),
  ("SPARQL", "application/sparql-query"),
  ("XLS", "application/vnd.ms-excel"),
  ("GEOJSON", "application/geo+json"),
  ("PARQUET", "application/vnd.apache.parquet"),
  ("SHP", "application/zip"),
  ("KML", "application/vnd.google-earth.kml+xml"),
  ("RDF_TURTLE", "text/turtle"),
  ("GPX", "application/vnd.gpxsee.map+xml"),
  ("N3", "text/n3"),
  ("BIN", "text/csv"),
  ("TSV", "text/tab-separated-values"),
  ("HTML", "text/html"),
  ("ODS", "application/vnd.oasis.opendocument.spreadsheet"),
  ("PDF", "application/pdf"),
  ("GPKG", "application/vnd.gentoo.gpkg"),
];

/// Canonical code for a format label, if the alias table knows it.
pub fn canonical_format(label: &str) -> Option<&'static str> {
  let needle = label.trim();
  FORMAT_ALIASES
    .iter()
    .find(|(alias, _)| alias.eq_ignore_ascii_case(needle))
    .map(|(_, code)| *code)
}

/// Media type inferred from a format label through MEDIA_TYPE_RULES.
pub fn infer_media_type(label: &str) -> Option<&'static str> {
  let upper = label.to_ascii_uppercase();
  let mut hit = None;
  for (needle, media_type) in MEDIA_TYPE_RULES {
    if upper.contains(needle) {
      hit = Some(*media_type);
    }
  }
  hit
}

/// Strips the IANA registry base from a media type IRI, leaving the bare
/// type. Non-registry values pass through untouched.
pub fn strip_iana_base(value: &str) -> String {
  if value.contains(IANA_MARKER) {
    if let Some(pos) = value.find("/media-types/") {
      return value[pos + "/media-types/".len()..].to_string();
    }
  }
  value.to_string()
}

/// Media type and format label for a distribution node, in that order.
///
/// The media type comes from dcat:mediaType, with dct:format as a fallback
/// when the format holds a slashed value and the media type slot is empty.
/// Named format nodes under the EU file-type authority collapse to their
/// code; other named formats keep their IRI as the label.
pub fn distribution_format(
  g: &Graph,
  distribution: &RdfNode,
  normalize: bool,
) -> (Option<String>, Option<String>)
{
  let mut media_type: Option<String> = None;
  let mut label: Option<String> = None;

  if let Some(media) = g.object(distribution, &RdfNode::named(vocab::dcat::MEDIA_TYPE)) {
    media_type = Some(strip_iana_base(media.value()));
  }

  if let Some(format) = g.object(distribution, &RdfNode::named(vocab::dct::FORMAT)) {
    if let Some(iri) = format.as_iri() {
      if iri.contains(IANA_MARKER) {
        if media_type.is_none() {
          media_type = Some(strip_iana_base(iri));
        }
      } else if let Some(code) = iri.strip_prefix(vocab::authority::FILE_TYPE) {
        label = Some(code.to_string());
      } else {
        label = Some(iri.to_string());
      }
    } else if format.is_literal() {
      let val = format.value();
      if media_type.is_none() && val.contains('/') {
        media_type = Some(val.to_string());
      } else {
        label = Some(val.to_string());
      }
    }
  }

  if normalize {
    if let Some(l) = &label {
      if let Some(code) = canonical_format(l) {
        label = Some(code.to_string());
      }
    }
  }

  (media_type, label)
}

/// Emits dct:format and dcat:mediaType triples for one distribution from
/// the record's `format` / `mimetype` values.
pub fn add_format_triples(
  g: &mut Graph,
  distribution: &RdfNode,
  format: Option<&str>,
  mimetype: Option<&str>,
  normalize: bool,
) {
  let raw_fmt = format.map(str::trim).filter(|v| !v.is_empty());
  let mut media_type = mimetype
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .map(str::to_string);

  /* A media type distinct from the format is authoritative; only an
     empty or format-copied slot gets inferred over. */
  let inferable = match (&raw_fmt, &media_type) {
    (Some(f), Some(m)) => m == f,
    (Some(_), None) => true,
    _ => false,
  };

  let mut fmt = raw_fmt.map(str::to_string);
  if normalize {
    if let Some(f) = &fmt {
      if let Some(code) = canonical_format(f) {
        fmt = Some(code.to_string());
      }
    }
  }

  if inferable {
    if let Some(f) = fmt.clone() {
      if f.contains(IANA_MARKER) || (!f.starts_with("http") && f.contains('/')) {
        media_type = Some(f);
        fmt = None;
      } else if let Some(inferred) = infer_media_type(&f) {
        media_type = Some(inferred.to_string());
      }
    }
  }

  if let Some(m) = &media_type {
    let node = if m.starts_with("http") {
      RdfNode::named(base::cleaned_uri(m))
    } else {
      RdfNode::named(format!("{}{}", vocab::IANA_MEDIA_BASE, m))
    };
    g.add([distribution.clone(), RdfNode::named(vocab::dcat::MEDIA_TYPE), node]);
  }
  if let Some(f) = &fmt {
    g.add([distribution.clone(), RdfNode::named(vocab::dct::FORMAT), base::uri_or_literal(f)]);
  }
}

#[cfg(test)]
mod unit_tests {
  use super::*;

  fn media_types_of(g: &Graph, dist: &RdfNode) -> Vec<String> {
    base::values_of(g, dist, vocab::dcat::MEDIA_TYPE)
  }

  fn formats_of(g: &Graph, dist: &RdfNode) -> Vec<String> {
    base::values_of(g, dist, vocab::dct::FORMAT)
  }

  #[test]
  fn aliases_are_case_insensitive() {
    assert_eq!(canonical_format("csv"), Some("CSV"));
    assert_eq!(canonical_format("GeoJson"), Some("GEOJSON"));
    assert_eq!(canonical_format("geo json"), Some("GEOJSON"));
    assert_eq!(canonical_format("rdf+xml"), Some("RDF_XML"));
    assert_eq!(canonical_format("excel"), Some("XLSX"));
    assert_eq!(canonical_format("link"), Some("HTML"));
    assert_eq!(canonical_format("VHS"), None);
  }

  #[test]
  fn last_matching_media_rule_wins() {
    assert_eq!(infer_media_type("CSV"), Some("text/csv"));
    assert_eq!(infer_media_type("GEOJSON"), Some("application/geo+json"));
    assert_eq!(infer_media_type("RDF_TURTLE"), Some("text/turtle"));
    assert_eq!(infer_media_type("RDF_XML"), Some("application/rdf+xml"));
    assert_eq!(infer_media_type("xlsx"), Some("application/vnd.ms-excel"));
    assert_eq!(infer_media_type("PLUSH"), None);
  }

  #[test]
  fn iana_base_strips_to_the_bare_type() {
    assert_eq!(
      strip_iana_base("https://www.iana.org/assignments/media-types/text/csv"),
      "text/csv",
    );
    assert_eq!(
      strip_iana_base("https://iana.org/assignments/media-types/application/json"),
      "application/json",
    );
    assert_eq!(strip_iana_base("text/csv"), "text/csv");
  }

  #[test]
  fn parse_prefers_media_type_and_keeps_labels() {
    let mut g = Graph::new();
    let dist = RdfNode::named("http://x/dist");
    g.add([
      dist.clone(),
      vocab::dcat::MEDIA_TYPE.into(),
      RdfNode::named("https://www.iana.org/assignments/media-types/text/csv"),
    ]);
    g.add([dist.clone(), vocab::dct::FORMAT.into(), RdfNode::lit("CSV")]);

    let (media_type, label) = distribution_format(&g, &dist, false);
    assert_eq!(media_type.as_deref(), Some("text/csv"));
    assert_eq!(label.as_deref(), Some("CSV"));
  }

  #[test]
  fn parse_reads_slashed_format_literal_as_media_type() {
    let mut g = Graph::new();
    let dist = RdfNode::named("http://x/dist");
    g.add([dist.clone(), vocab::dct::FORMAT.into(), RdfNode::lit("text/csv")]);

    let (media_type, label) = distribution_format(&g, &dist, false);
    assert_eq!(media_type.as_deref(), Some("text/csv"));
    assert_eq!(label, None);
  }

  #[test]
  fn parse_collapses_file_type_authority_iris() {
    let mut g = Graph::new();
    let dist = RdfNode::named("http://x/dist");
    g.add([
      dist.clone(),
      vocab::dct::FORMAT.into(),
      RdfNode::named("http://publications.europa.eu/resource/authority/file-type/CSV"),
    ]);

    let (media_type, label) = distribution_format(&g, &dist, false);
    assert_eq!(media_type, None);
    assert_eq!(label.as_deref(), Some("CSV"));
  }

  #[test]
  fn parse_normalizes_labels_on_request() {
    let mut g = Graph::new();
    let dist = RdfNode::named("http://x/dist");
    g.add([dist.clone(), vocab::dct::FORMAT.into(), RdfNode::lit("GeoJson")]);

    let (_, label) = distribution_format(&g, &dist, true);
    assert_eq!(label.as_deref(), Some("GEOJSON"));
  }

  #[test]
  fn serialize_infers_media_type_from_the_label() {
    let mut g = Graph::new();
    let dist = RdfNode::named("http://x/dist");
    add_format_triples(&mut g, &dist, Some("CSV"), None, false);

    assert_eq!(
      media_types_of(&g, &dist),
      vec![String::from("https://www.iana.org/assignments/media-types/text/csv")],
    );
    assert_eq!(formats_of(&g, &dist), vec![String::from("CSV")]);
  }

  #[test]
  fn serialize_moves_slashed_formats_to_media_type() {
    let mut g = Graph::new();
    let dist = RdfNode::named("http://x/dist");
    add_format_triples(&mut g, &dist, Some("text/csv"), None, false);

    assert_eq!(
      media_types_of(&g, &dist),
      vec![String::from("https://www.iana.org/assignments/media-types/text/csv")],
    );
    assert!(formats_of(&g, &dist).is_empty());
  }

  #[test]
  fn serialize_leaves_a_distinct_media_type_alone() {
    let mut g = Graph::new();
    let dist = RdfNode::named("http://x/dist");
    add_format_triples(&mut g, &dist, Some("CSV"), Some("text/plain"), false);

    assert_eq!(
      media_types_of(&g, &dist),
      vec![String::from("https://www.iana.org/assignments/media-types/text/plain")],
    );
    assert_eq!(formats_of(&g, &dist), vec![String::from("CSV")]);
  }

  #[test]
  fn serialize_emits_http_formats_as_named_nodes() {
    let mut g = Graph::new();
    let dist = RdfNode::named("http://x/dist");
    let authority = "http://publications.europa.eu/resource/authority/file-type/CSV";
    add_format_triples(&mut g, &dist, Some(authority), None, false);

    assert_eq!(formats_of(&g, &dist), vec![String::from(authority)]);
    let node = g
      .object(&dist, &RdfNode::named(vocab::dct::FORMAT))
      .unwrap();
    assert!(node.is_named());
    /* substring inference still sees CSV inside the IRI */
    assert_eq!(
      media_types_of(&g, &dist),
      vec![String::from("https://www.iana.org/assignments/media-types/text/csv")],
    );
  }

  #[test]
  fn round_trip_keeps_the_media_type_bare() {
    let mut g = Graph::new();
    let dist = RdfNode::named("http://x/dist");
    add_format_triples(&mut g, &dist, Some("GEOJSON"), None, false);

    let (media_type, label) = distribution_format(&g, &dist, false);
    assert_eq!(media_type.as_deref(), Some("application/geo+json"));
    assert_eq!(label.as_deref(), Some("GEOJSON"));
  }
}
