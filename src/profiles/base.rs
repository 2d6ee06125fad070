use {
  crate::{
    datastore::graph::Graph,
    record::ResourceRecord,
    vocab,
    RdfNode,
  },
  chrono::{DateTime, NaiveDate, NaiveDateTime},
  oxiri::Iri,
  tracing::debug,
};

/* Shared graph-walking helpers for profiles.

   Everything here is stateless: readers take the graph and a focus node
   and return plain values, builders take strings and return terms. A
   profile composes these; it never touches the triple indexes directly. */

const MAILTO: &str = "mailto:";

/* Readers */

/// First object value for (subject, predicate), in store order.
pub fn value_of(g: &Graph, subject: &RdfNode, predicate: &str) -> Option<String> {
  g.object_value(subject, &RdfNode::named(predicate))
}

/// Every object value for (subject, predicate), in store order.
pub fn values_of(g: &Graph, subject: &RdfNode, predicate: &str) -> Vec<String> {
  g.objects(subject, &RdfNode::named(predicate))
    .map(|node| node.value().to_string())
    .collect()
}

/// Every object node for (subject, predicate), in store order.
pub fn nodes_of<'a>(
  g: &'a Graph,
  subject: &RdfNode,
  predicate: &str,
) -> impl Iterator<Item = RdfNode> + 'a
{
  g.objects(subject, &RdfNode::named(predicate))
}

pub fn keywords(g: &Graph, subject: &RdfNode) -> Vec<String> {
  values_of(g, subject, vocab::dcat::KEYWORD)
}

/// A vcard contact node. `None` when the predicate has no object at all;
/// individually absent properties stay `None` inside.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDetails {
  pub uri: Option<String>,
  pub name: Option<String>,
  pub email: Option<String>,
}

pub fn contact_details(g: &Graph, subject: &RdfNode, predicate: &str) -> Option<ContactDetails> {
  let mut found = None;
  for agent in nodes_of(g, subject, predicate) {
    found = Some(ContactDetails {
      uri: agent.as_iri().map(str::to_string),
      name: value_of(g, &agent, vocab::vcard::FN),
      email: value_of(g, &agent, vocab::vcard::HAS_EMAIL).map(|addr| strip_mailto(&addr)),
    });
  }
  found
}

/// A foaf agent node, used for publishers and catalog owners. The shape
/// doubles as the JSON payload of the `source_catalog_publisher` extra.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AgentDetails {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub uri: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub identifier: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
  #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
  pub agent_type: Option<String>,
}

pub fn agent_details(g: &Graph, subject: &RdfNode, predicate: &str) -> Option<AgentDetails> {
  let mut found = None;
  for agent in nodes_of(g, subject, predicate) {
    found = Some(AgentDetails {
      uri: agent.as_iri().map(str::to_string),
      identifier: value_of(g, &agent, vocab::dct::IDENTIFIER),
      name: value_of(g, &agent, vocab::foaf::NAME),
      email: value_of(g, &agent, vocab::foaf::MBOX).map(|addr| strip_mailto(&addr)),
      url: value_of(g, &agent, vocab::foaf::HOMEPAGE),
      agent_type: value_of(g, &agent, vocab::dct::TYPE),
    });
  }
  found
}

/// Start and end of a dct:PeriodOfTime. DCAT start/end dates take
/// precedence, schema.org is accepted for older catalogs.
pub fn time_interval(
  g: &Graph,
  subject: &RdfNode,
  predicate: &str,
) -> (Option<String>, Option<String>)
{
  for interval in nodes_of(g, subject, predicate) {
    let start = value_of(g, &interval, vocab::dcat::START_DATE);
    let end = value_of(g, &interval, vocab::dcat::END_DATE);
    if start.is_some() || end.is_some() {
      return (start, end);
    }
    let start = value_of(g, &interval, vocab::schema::START_DATE);
    let end = value_of(g, &interval, vocab::schema::END_DATE);
    if start.is_some() || end.is_some() {
      return (start, end);
    }
  }
  (None, None)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpatialCoverage {
  pub uri: Option<String>,
  pub text: Option<String>,
  pub geometry: Option<String>,
}

/// Reads a dct:spatial object. A named spatial node supplies the uri, a
/// bare literal the text. Nodes typed dct:Location may refine the text
/// through skos:prefLabel / rdfs:label and carry a locn:geometry literal,
/// which is kept only when it holds GeoJSON.
pub fn spatial_coverage(g: &Graph, subject: &RdfNode, predicate: &str) -> SpatialCoverage {
  let mut out = SpatialCoverage::default();
  let rdf_type = RdfNode::named(vocab::rdf::TYPE);
  let location = RdfNode::named(vocab::dct::LOCATION);
  for spatial in nodes_of(g, subject, predicate) {
    if let Some(iri) = spatial.as_iri() {
      out.uri = Some(iri.to_string());
    }
    if spatial.is_literal() {
      out.text = Some(spatial.value().to_string());
    }
    if !g.contains(&[spatial.clone(), rdf_type.clone(), location.clone()]) {
      continue;
    }
    for geometry in nodes_of(g, &spatial, vocab::locn::GEOMETRY) {
      let geojson = match &geometry {
        RdfNode::TypedLit { val, datatype } if datatype == vocab::GEOJSON_IMT => Some(val),
        RdfNode::RawLit { val } => Some(val),
        _ => None,
      };
      if let Some(val) = geojson {
        if serde_json::from_str::<serde_json::Value>(val).is_ok() {
          out.geometry = Some(val.clone());
        }
      }
    }
    for label in nodes_of(g, &spatial, vocab::skos::PREF_LABEL) {
      out.text = Some(label.value().to_string());
    }
    for label in nodes_of(g, &spatial, vocab::rdfs::LABEL) {
      out.text = Some(label.value().to_string());
    }
  }
  out
}

/// Rights statement for a dataset or distribution. Blank statement nodes
/// typed dct:RightsStatement contribute their rdfs:label; named nodes and
/// literals contribute their own value.
pub fn access_rights(g: &Graph, subject: &RdfNode, predicate: &str) -> Option<String> {
  let obj = g.object(subject, &RdfNode::named(predicate))?;
  if obj.is_blank() {
    if let Some(node_type) = g.object(&obj, &RdfNode::named(vocab::rdf::TYPE)) {
      if node_type.value() == vocab::dct::RIGHTS_STATEMENT {
        return value_of(g, &obj, vocab::rdfs::LABEL);
      }
    }
    return None;
  }
  Some(obj.value().to_string())
}

/* Builders */

/// Percent-quotes the handful of characters that break serialized IRIs
/// while leaving already-encoded input alone.
pub fn cleaned_uri(value: &str) -> String {
  let mut out = String::with_capacity(value.len());
  for c in value.trim().chars() {
    match c {
      ' ' => out.push_str("%20"),
      '!' => out.push_str("%21"),
      '"' => out.push_str("%22"),
      '(' => out.push_str("%28"),
      ')' => out.push_str("%29"),
      _ => out.push(c),
    }
  }
  out
}

/// Named node for values that look like dereferenceable identifiers,
/// plain literal for everything else. The same test runs on both parse
/// and serialize so a value keeps its term kind across a round trip.
pub fn uri_or_literal(value: &str) -> RdfNode {
  let trimmed = value.trim();
  if trimmed.starts_with("http://")
    || trimmed.starts_with("https://")
    || trimmed.starts_with("urn:")
  {
    let cleaned = cleaned_uri(trimmed);
    if Iri::parse(cleaned.as_str()).is_ok() {
      return RdfNode::named(cleaned);
    }
  }
  RdfNode::lit(value)
}

/// Typed xsd:dateTime literal from a permissively parsed date string.
/// Unparsable values are dropped.
pub fn date_literal(value: &str) -> Option<RdfNode> {
  match normalize_datetime(value) {
    Some(iso) => Some(RdfNode::typed_lit(iso, vocab::xsd::DATE_TIME)),
    None => {
      debug!(value, "dropping unparsable date");
      None
    },
  }
}

/// xsd:decimal literal when the value is numeric, plain literal otherwise.
pub fn number_literal(value: &str) -> RdfNode {
  let trimmed = value.trim();
  let numeric = !trimmed.is_empty()
    && trimmed.parse::<f64>().is_ok()
    && trimmed.bytes().all(|b| b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+');
  if numeric {
    RdfNode::typed_lit(trimmed, vocab::xsd::DECIMAL)
  } else {
    RdfNode::lit(value)
  }
}

/// Normalizes a date string to ISO 8601. Accepted inputs: RFC 3339,
/// datetimes without a zone, bare dates, day-first dates with `-` or `/`,
/// and bare years. Missing components fill with midnight / January 1st.
pub fn normalize_datetime(value: &str) -> Option<String> {
  let v = value.trim();
  if v.is_empty() {
    return None;
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(v) {
    return Some(dt.to_rfc3339());
  }
  for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
    if let Ok(dt) = NaiveDateTime::parse_from_str(v, fmt) {
      return Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string());
    }
  }
  for fmt in ["%Y-%m-%d", "%d-%m-%Y", "%d/%m/%Y"] {
    if let Ok(d) = NaiveDate::parse_from_str(v, fmt) {
      return Some(format!("{}T00:00:00", d.format("%Y-%m-%d")));
    }
  }
  if v.len() == 4 && v.bytes().all(|b| b.is_ascii_digit()) {
    return Some(format!("{}-01-01T00:00:00", v));
  }
  None
}

/// The node a resource record serializes under. An explicit `uri` field
/// wins; the harvested placeholder string "None" counts as unset. With an
/// `id` the node hangs under the dataset IRI; without either, a blank
/// label derived from the dataset and the position keeps re-serialization
/// from minting new nodes.
pub fn distribution_ref(
  g: &Graph,
  dataset: &RdfNode,
  resource: &ResourceRecord,
  index: usize,
) -> RdfNode
{
  if let Some(uri) = resource.field("uri") {
    if uri != "None" {
      return RdfNode::named(cleaned_uri(uri));
    }
  }
  match resource.field("id") {
    Some(id) => RdfNode::named(format!("{}/resource/{}", dataset.value(), id)),
    None => g.stable_bnode(dataset.value(), &format!("dist{}", index)),
  }
}

pub fn add_mailto(addr: &str) -> String {
  format!("{}{}", MAILTO, strip_mailto(addr))
}

pub fn strip_mailto(addr: &str) -> String {
  addr.replace(MAILTO, "")
}

/// Splits a stored multi-value field: JSON arrays item by item, scalars
/// as a single item, legacy comma-joined strings on the comma.
pub fn as_list(value: &str) -> Vec<String> {
  use serde_json::Value;
  if let Ok(json) = serde_json::from_str::<Value>(value) {
    match json {
      Value::Array(items) => {
        return items
          .into_iter()
          .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
          })
          .collect();
      },
      Value::String(s) => return vec![s],
      Value::Number(n) => return vec![n.to_string()],
      _ => {},
    }
  }
  if value.contains(',') {
    return value.split(',').map(|item| item.trim().to_string()).collect();
  }
  vec![value.to_string()]
}
