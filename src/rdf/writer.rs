/*
  Whole-store serialization in any supported grammar. The rio
  formatters stream borrowed triples, so each owned triple is lent
  out just long enough to be written.
*/

use {
  rio_api::{
    formatter::TriplesFormatter,
    model::{BlankNode, Literal, NamedNode, Subject, Term},
  },
  rio_turtle::{NTriplesFormatter, TurtleFormatter},
  rio_xml::RdfXmlFormatter,
  tracing::debug,
  crate::{
    datastore::graph::Graph,
    errors::TranscodeError,
    rdf::{format::RdfSyntax, jsonld},
    RdfNode,
  },
};

pub fn write(graph: &Graph, syntax: RdfSyntax, pretty: bool) -> Result<Vec<u8>, TranscodeError> {
  match syntax {
    RdfSyntax::Xml => {
      let mut formatter = RdfXmlFormatter::new(Vec::default())?;
      format_all(graph, &mut formatter)?;
      Ok(formatter.finish()?)
    },
    RdfSyntax::Turtle | RdfSyntax::N3 => {
      let mut formatter = TurtleFormatter::new(Vec::default());
      format_all(graph, &mut formatter)?;
      Ok(formatter.finish()?)
    },
    RdfSyntax::NTriples => {
      let mut formatter = NTriplesFormatter::new(Vec::default());
      format_all(graph, &mut formatter)?;
      Ok(formatter.finish()?)
    },
    RdfSyntax::JsonLd => {
      let value = jsonld::to_value(graph, true);
      let bytes = if pretty {
        serde_json::to_vec_pretty(&value)?
      }
      else {
        serde_json::to_vec(&value)?
      };
      Ok(bytes)
    },
  }
}

fn format_all<F>(graph: &Graph, formatter: &mut F) -> Result<(), F::Error>
where
  F: TriplesFormatter,
{
  for triple in graph.triples() {
    let [s, p, o] = &triple;
    let subject: Subject = match s {
      RdfNode::Named{ iri } => NamedNode { iri }.into(),
      RdfNode::Blank{ id } => BlankNode { id }.into(),
      _ => {
        debug!("skipping triple with a literal subject");
        continue;
      },
    };
    let predicate = match p {
      RdfNode::Named{ iri } => NamedNode { iri },
      _ => {
        debug!("skipping triple with a non-IRI predicate");
        continue;
      },
    };
    let object: Term = match o {
      RdfNode::Named{ iri } => NamedNode { iri }.into(),
      RdfNode::Blank{ id } => BlankNode { id }.into(),
      RdfNode::RawLit{ val } => Literal::Simple { value: val }.into(),
      RdfNode::LangTaggedLit{ val, lang } => {
        Literal::LanguageTaggedString { value: val, language: lang }.into()
      },
      RdfNode::TypedLit{ val, datatype } => {
        Literal::Typed { value: val, datatype: NamedNode { iri: datatype } }.into()
      },
    };
    formatter.format(&rio_api::model::Triple { subject, predicate, object })?;
  }
  Ok(())
}

#[cfg(test)]
mod unit_tests {
  use super::*;
  use crate::rdf::reader;
  use crate::vocab::{dcat, dct, rdf, xsd};

  fn sample() -> Graph {
    let mut g = Graph::new();
    let ds = RdfNode::named("http://example.org/ds/1");
    g.add([ds.clone(), RdfNode::named(rdf::TYPE), RdfNode::named(dcat::DATASET_CLASS)]);
    g.add([ds.clone(), RdfNode::named(dct::TITLE), RdfNode::lang_lit("Titolo", "it")]);
    g.add([ds.clone(), RdfNode::named(dct::ISSUED), RdfNode::typed_lit("2024-01-01", xsd::DATE)]);
    g.add([ds.clone(), RdfNode::named(dct::PUBLISHER), RdfNode::blank("pub0")]);
    g.add([RdfNode::blank("pub0"), RdfNode::named(dct::TITLE), RdfNode::lit("Agency")]);
    g
  }

  #[test]
  fn every_grammar_round_trips_the_same_set() {
    let g = sample();
    for syntax in [RdfSyntax::Xml, RdfSyntax::Turtle, RdfSyntax::NTriples, RdfSyntax::JsonLd] {
      let bytes = write(&g, syntax, false).unwrap();
      let reparsed: Graph = reader::read(syntax, &bytes, None).unwrap().into_iter().collect();
      assert_eq!(reparsed, g, "round trip failed for {}", syntax);
    }
  }

  #[test]
  fn literal_subjects_are_skipped_not_fatal() {
    let mut g = Graph::new();
    g.add([RdfNode::lit("not a subject"), RdfNode::named("http://e/p"), RdfNode::lit("v")]);
    g.add([RdfNode::named("http://e/s"), RdfNode::named("http://e/p"), RdfNode::lit("v")]);
    let bytes = write(&g, RdfSyntax::NTriples, false).unwrap();
    let reparsed = reader::read(RdfSyntax::NTriples, &bytes, None).unwrap();
    assert_eq!(reparsed.len(), 1);
  }

  #[test]
  fn pretty_json_ld_is_indented() {
    let g = sample();
    let bytes = write(&g, RdfSyntax::JsonLd, true).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains('\n'));
    assert!(text.contains("@context"));
  }
}
