/*
  Normalization of free-form serialization labels: short names,
  media types (with or without parameters), file extensions and the
  legacy "pretty-xml" alias all collapse onto one syntax enum.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RdfSyntax {
  Xml,
  Turtle,
  /* N3 input and output ride the Turtle grammar; only the label and
     media type differ. */
  N3,
  NTriples,
  JsonLd,
}

impl RdfSyntax {
  pub fn from_label(label: &str) -> Option<Self> {
    /* Media types may arrive with parameters, e.g.
       "text/turtle; charset=utf-8". */
    let label = label.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    match label.as_str() {
      "xml" | "rdf" | "rdfxml" | "rdf-xml" | "rdf/xml" | "pretty-xml"
      | "application/rdf+xml" => Some(Self::Xml),
      "ttl" | "turtle" | "text/turtle" => Some(Self::Turtle),
      "n3" | "text/n3" => Some(Self::N3),
      "nt" | "ntriples" | "n-triples" | "application/n-triples" => Some(Self::NTriples),
      "jsonld" | "json-ld" | "ld+json" | "application/ld+json" => Some(Self::JsonLd),
      _ => None,
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      Self::Xml => "xml",
      Self::Turtle => "turtle",
      Self::N3 => "n3",
      Self::NTriples => "ntriples",
      Self::JsonLd => "json-ld",
    }
  }

  pub fn media_type(&self) -> &'static str {
    match self {
      Self::Xml => "application/rdf+xml",
      Self::Turtle => "text/turtle",
      Self::N3 => "text/n3",
      Self::NTriples => "application/n-triples",
      Self::JsonLd => "application/ld+json",
    }
  }

  pub fn extension(&self) -> &'static str {
    match self {
      Self::Xml => "rdf",
      Self::Turtle => "ttl",
      Self::N3 => "n3",
      Self::NTriples => "nt",
      Self::JsonLd => "jsonld",
    }
  }
}

impl std::fmt::Display for RdfSyntax {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "{}", self.label())
  }
}

/* Canonical labels, sorted, for error messages and the CLI. */
pub fn supported_formats() -> &'static [&'static str] {
  &["json-ld", "n3", "ntriples", "turtle", "xml"]
}
