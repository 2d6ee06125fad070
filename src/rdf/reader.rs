/*
  Byte streams in, owned triples out. Callers stage the returned
  triples and decide what store they land in; a failed read commits
  nothing anywhere.
*/

use {
  oxiri::Iri,
  rio_api::{
    model::{BlankNode, Literal, NamedNode, Subject, Term},
    parser::TriplesParser,
  },
  rio_turtle::{NTriplesParser, TurtleParser},
  rio_xml::RdfXmlParser,
  tracing::debug,
  crate::{
    errors::ParseError,
    rdf::format::RdfSyntax,
    RdfNode, Triple,
  },
};

pub fn read(syntax: RdfSyntax, data: &[u8], base: Option<&str>) -> Result<Vec<Triple>, ParseError> {
  match syntax {
    RdfSyntax::Xml => read_xml(data, base),
    RdfSyntax::Turtle | RdfSyntax::N3 => read_turtle(data, base),
    RdfSyntax::NTriples => read_ntriples(data),
    RdfSyntax::JsonLd => super::jsonld::read(data),
  }
}

fn read_xml(data: &[u8], base: Option<&str>) -> Result<Vec<Triple>, ParseError> {
  let mut triples = Vec::new();
  RdfXmlParser::new(data, base_iri(base)).parse_all(&mut |t| {
    if let Some(triple) = convert(&t) {
      triples.push(triple);
    }
    Ok(()) as Result<(), ParseError>
  })?;
  Ok(triples)
}

fn read_turtle(data: &[u8], base: Option<&str>) -> Result<Vec<Triple>, ParseError> {
  let mut triples = Vec::new();
  TurtleParser::new(data, base_iri(base)).parse_all(&mut |t| {
    if let Some(triple) = convert(&t) {
      triples.push(triple);
    }
    Ok(()) as Result<(), ParseError>
  })?;
  Ok(triples)
}

fn read_ntriples(data: &[u8]) -> Result<Vec<Triple>, ParseError> {
  let mut triples = Vec::new();
  NTriplesParser::new(data).parse_all(&mut |t| {
    if let Some(triple) = convert(&t) {
      triples.push(triple);
    }
    Ok(()) as Result<(), ParseError>
  })?;
  Ok(triples)
}

fn base_iri(base: Option<&str>) -> Option<Iri<String>> {
  let base = base.filter(|b| !b.is_empty())?;
  match Iri::parse(base.to_string()) {
    Ok(iri) => Some(iri),
    Err(_) => {
      debug!(base, "ignoring unusable base IRI");
      None
    },
  }
}

/* rio terms to owned nodes. Anything outside the plain triple model
   (RDF-star) is skipped. */
fn convert(t: &rio_api::model::Triple) -> Option<Triple> {
  let s = match t.subject {
    Subject::NamedNode(NamedNode{ iri }) => RdfNode::named(iri),
    Subject::BlankNode(BlankNode{ id }) => RdfNode::blank(id),
    _ => return None,
  };
  let NamedNode{ iri: p } = t.predicate;
  let p = RdfNode::named(p);
  let o = match t.object {
    Term::NamedNode(NamedNode{ iri }) => RdfNode::named(iri),
    Term::BlankNode(BlankNode{ id }) => RdfNode::blank(id),
    Term::Literal(lit) => match lit {
      Literal::Simple{ value } => RdfNode::lit(value),
      Literal::LanguageTaggedString{ value, language } => RdfNode::lang_lit(value, language),
      Literal::Typed{ value, datatype: NamedNode{ iri } } => RdfNode::typed_lit(value, iri),
    },
    _ => return None,
  };
  Some([s, p, o])
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  use crate::vocab::{dct, xsd};

  const TURTLE: &str = r#"
@prefix dct: <http://purl.org/dc/terms/> .
<http://example.org/ds/1> dct:title "Titolo"@it ;
  dct:issued "2024-01-01"^^<http://www.w3.org/2001/XMLSchema#date> ;
  dct:publisher _:pub .
_:pub dct:title "Agency" .
"#;

  const XML: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns:dct="http://purl.org/dc/terms/">
  <rdf:Description rdf:about="http://example.org/ds/1">
    <dct:title>Example</dct:title>
  </rdf:Description>
</rdf:RDF>
"#;

  #[test]
  fn turtle_terms_survive() {
    let triples = read(RdfSyntax::Turtle, TURTLE.as_bytes(), None).unwrap();
    assert_eq!(triples.len(), 4);
    assert!(triples.iter().any(|[s, p, o]| {
      s == &RdfNode::named("http://example.org/ds/1")
        && p == &RdfNode::named(dct::TITLE)
        && o == &RdfNode::lang_lit("Titolo", "it")
    }));
    assert!(triples.iter().any(|[_, p, o]| {
      p == &RdfNode::named(dct::ISSUED) && o == &RdfNode::typed_lit("2024-01-01", xsd::DATE)
    }));
    assert!(triples.iter().any(|[_, _, o]| o.is_blank()));
  }

  #[test]
  fn xml_parses() {
    let triples = read(RdfSyntax::Xml, XML.as_bytes(), None).unwrap();
    assert_eq!(triples.len(), 1);
    assert_eq!(triples[0][2], RdfNode::lit("Example"));
  }

  #[test]
  fn ntriples_parses() {
    let doc = "<http://example.org/s> <http://example.org/p> \"v\" .\n";
    let triples = read(RdfSyntax::NTriples, doc.as_bytes(), None).unwrap();
    assert_eq!(triples.len(), 1);
  }

  #[test]
  fn n3_rides_the_turtle_grammar() {
    let triples = read(RdfSyntax::N3, TURTLE.as_bytes(), None).unwrap();
    assert_eq!(triples.len(), 4);
  }

  #[test]
  fn malformed_input_errors() {
    assert!(read(RdfSyntax::Turtle, b"<unterminated", None).is_err());
    assert!(read(RdfSyntax::Xml, b"not xml at all", None).is_err());
  }

  #[test]
  fn relative_iris_resolve_against_base() {
    let doc = "<ds/1> <http://example.org/p> <ds/2> .";
    let triples =
      read(RdfSyntax::Turtle, doc.as_bytes(), Some("http://example.org/")).unwrap();
    assert_eq!(triples[0][0], RdfNode::named("http://example.org/ds/1"));
  }
}
