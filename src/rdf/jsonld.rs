/*
  A deliberately small JSON-LD 1.0 subset: inline contexts, prefixed
  and absolute IRIs, @graph / @id / @type, value objects and nested
  node objects. Remote contexts are skipped with a warning since the
  engine never touches the network. The writer emits a flat @graph
  and, when asked, compacts IRIs against the graph's prefix table.
*/

use {
  serde_json::{Map, Value},
  std::collections::BTreeMap,
  tracing::{debug, warn},
  crate::{
    datastore::graph::Graph,
    errors::ParseError,
    vocab::{rdf, xsd},
    RdfNode, Triple,
  },
};

/* Reading */

pub fn read(data: &[u8]) -> Result<Vec<Triple>, ParseError> {
  let doc: Value = serde_json::from_slice(data)?;
  let mut ctx = Context::default();
  let mut out = Vec::new();
  let mut blanks = 0u32;
  match doc {
    Value::Object(ref map) => {
      if let Some(local) = map.get("@context") {
        ctx.merge(local);
      }
      if let Some(graph) = map.get("@graph") {
        let nodes = graph
          .as_array()
          .ok_or_else(|| ParseError::JsonLd("@graph must be an array".to_string()))?;
        for node in nodes {
          walk(node, &ctx, &mut out, &mut blanks)?;
        }
      }
      else {
        walk(&doc, &ctx, &mut out, &mut blanks)?;
      }
    },
    Value::Array(ref nodes) => {
      for node in nodes {
        walk(node, &ctx, &mut out, &mut blanks)?;
      }
    },
    _ => return Err(ParseError::JsonLd("document root must be an object or array".to_string())),
  }
  Ok(out)
}

#[derive(Clone, Default)]
struct Context {
  vocab: Option<String>,
  terms: BTreeMap<String, TermDef>,
}
#[derive(Clone)]
struct TermDef {
  iri: String,
  id_coerced: bool,
}

impl Context {
  fn merge(&mut self, value: &Value) {
    match value {
      Value::Object(map) => {
        for (key, def) in map {
          if key == "@vocab" {
            if let Some(v) = def.as_str() {
              self.vocab = Some(v.to_string());
            }
            continue;
          }
          match def {
            Value::String(iri) => {
              let iri = self.expand(iri).unwrap_or_else(|| iri.clone());
              self.terms.insert(key.clone(), TermDef { iri, id_coerced: false });
            },
            Value::Object(def) => {
              let iri = match def.get("@id").and_then(Value::as_str) {
                Some(iri) => self.expand(iri).unwrap_or_else(|| iri.to_string()),
                None => continue,
              };
              let id_coerced = def.get("@type").and_then(Value::as_str) == Some("@id");
              self.terms.insert(key.clone(), TermDef { iri, id_coerced });
            },
            Value::Null => {
              self.terms.remove(key);
            },
            _ => {},
          }
        }
      },
      Value::Array(entries) => {
        for entry in entries {
          self.merge(entry);
        }
      },
      Value::String(remote) => {
        warn!(context = remote.as_str(), "skipping remote JSON-LD context");
      },
      _ => {},
    }
  }

  /* Term, compact IRI or absolute IRI to full IRI. None when the key
     has no mapping and no @vocab is in force. */
  fn expand(&self, key: &str) -> Option<String> {
    if let Some(def) = self.terms.get(key) {
      return Some(def.iri.clone());
    }
    if let Some((prefix, rest)) = key.split_once(':') {
      if !rest.starts_with("//") {
        if let Some(def) = self.terms.get(prefix) {
          return Some(format!("{}{}", def.iri, rest));
        }
      }
      /* Already absolute (http://..., urn:...). */
      return Some(key.to_string());
    }
    self.vocab.as_ref().map(|v| format!("{}{}", v, key))
  }

  fn id_coerced(&self, key: &str) -> bool {
    self.terms.get(key).map(|d| d.id_coerced).unwrap_or(false)
  }
}

fn walk(
  value: &Value,
  parent_ctx: &Context,
  out: &mut Vec<Triple>,
  blanks: &mut u32,
) -> Result<RdfNode, ParseError> {
  let map = value
    .as_object()
    .ok_or_else(|| ParseError::JsonLd("node must be an object".to_string()))?;

  let mut ctx = parent_ctx.clone();
  if let Some(local) = map.get("@context") {
    ctx.merge(local);
  }

  let node = match map.get("@id").and_then(Value::as_str) {
    Some(id) => id_node(id),
    None => {
      let label = format!("jld{}", blanks);
      *blanks += 1;
      RdfNode::blank(label)
    },
  };

  if let Some(types) = map.get("@type") {
    for t in as_slice(types) {
      if let Some(iri) = t.as_str().and_then(|t| ctx.expand(t)) {
        out.push([node.clone(), RdfNode::named(rdf::TYPE), RdfNode::named(iri)]);
      }
    }
  }

  for (key, val) in map {
    if key.starts_with('@') {
      continue;
    }
    let predicate = match ctx.expand(key) {
      Some(iri) => RdfNode::named(iri),
      None => {
        debug!(key = key.as_str(), "dropping unmapped JSON-LD key");
        continue;
      },
    };
    for item in as_slice(val) {
      if let Some(object) = object_term(item, key, &ctx, out, blanks)? {
        out.push([node.clone(), predicate.clone(), object]);
      }
    }
  }
  Ok(node)
}

fn object_term(
  item: &Value,
  key: &str,
  ctx: &Context,
  out: &mut Vec<Triple>,
  blanks: &mut u32,
) -> Result<Option<RdfNode>, ParseError> {
  let term = match item {
    Value::String(s) => {
      if ctx.id_coerced(key) {
        Some(id_node(s))
      }
      else {
        Some(RdfNode::lit(s.clone()))
      }
    },
    Value::Number(n) => {
      let datatype = if n.is_i64() || n.is_u64() { xsd::INTEGER } else { xsd::DOUBLE };
      Some(RdfNode::typed_lit(n.to_string(), datatype))
    },
    Value::Bool(b) => Some(RdfNode::typed_lit(b.to_string(), xsd::BOOLEAN)),
    Value::Null => None,
    Value::Object(map) => {
      if let Some(value) = map.get("@value") {
        Some(value_object(value, map, ctx)?)
      }
      else {
        Some(walk(item, ctx, out, blanks)?)
      }
    },
    Value::Array(_) => {
      return Err(ParseError::JsonLd("nested arrays are not supported".to_string()));
    },
  };
  Ok(term)
}

fn value_object(value: &Value, map: &Map<String, Value>, ctx: &Context) -> Result<RdfNode, ParseError> {
  let lexical = match value {
    Value::String(s) => s.clone(),
    Value::Number(n) => n.to_string(),
    Value::Bool(b) => b.to_string(),
    _ => return Err(ParseError::JsonLd("unsupported @value".to_string())),
  };
  if let Some(lang) = map.get("@language").and_then(Value::as_str) {
    return Ok(RdfNode::lang_lit(lexical, lang));
  }
  if let Some(dtype) = map.get("@type").and_then(Value::as_str) {
    let dtype = ctx.expand(dtype).unwrap_or_else(|| dtype.to_string());
    return Ok(RdfNode::typed_lit(lexical, dtype));
  }
  match value {
    Value::Number(n) if n.is_i64() || n.is_u64() => Ok(RdfNode::typed_lit(lexical, xsd::INTEGER)),
    Value::Number(_) => Ok(RdfNode::typed_lit(lexical, xsd::DOUBLE)),
    Value::Bool(_) => Ok(RdfNode::typed_lit(lexical, xsd::BOOLEAN)),
    _ => Ok(RdfNode::lit(lexical)),
  }
}

fn id_node(id: &str) -> RdfNode {
  match id.strip_prefix("_:") {
    Some(label) => RdfNode::blank(label),
    None => RdfNode::named(id),
  }
}

fn as_slice(value: &Value) -> &[Value] {
  match value {
    Value::Array(items) => items.as_slice(),
    other => std::slice::from_ref(other),
  }
}

/* Writing */

/* Flat @graph, one object per subject, in store order. With compact
   set, predicate and type IRIs shrink to prefix:local against the
   graph's prefix table and the used subset becomes @context. */
pub fn to_value(graph: &Graph, compact: bool) -> Value {
  let mut subjects: Vec<RdfNode> = Vec::new();
  let mut grouped: BTreeMap<RdfNode, Vec<(RdfNode, RdfNode)>> = BTreeMap::new();
  for [s, p, o] in graph.triples() {
    if !grouped.contains_key(&s) {
      subjects.push(s.clone());
    }
    grouped.entry(s).or_default().push((p, o));
  }

  let mut used: BTreeMap<String, String> = BTreeMap::new();
  let mut nodes = Vec::new();
  for subject in subjects {
    let mut node = Map::new();
    node.insert("@id".to_string(), Value::String(id_string(&subject)));
    let mut types = Vec::new();
    let mut props: Vec<(String, Value)> = Vec::new();
    if let Some(pairs) = grouped.get(&subject) {
      for (p, o) in pairs {
        let p_iri = p.value();
        if p_iri == rdf::TYPE {
          if let RdfNode::Named{ iri } = o {
            types.push(Value::String(shrink(iri, graph, compact, &mut used)));
          }
          continue;
        }
        let key = shrink(p_iri, graph, compact, &mut used);
        props.push((key, object_value(o, graph, compact, &mut used)));
      }
    }
    if !types.is_empty() {
      let value = if types.len() == 1 { types.remove(0) } else { Value::Array(types) };
      node.insert("@type".to_string(), value);
    }
    for (key, value) in props {
      match node.remove(&key) {
        Some(Value::Array(mut existing)) => {
          existing.push(value);
          node.insert(key, Value::Array(existing));
        },
        Some(first) => {
          node.insert(key, Value::Array(vec![first, value]));
        },
        None => {
          node.insert(key, value);
        },
      }
    }
    nodes.push(Value::Object(node));
  }

  if compact {
    let context: Map<String, Value> = used
      .into_iter()
      .map(|(p, ns)| (p, Value::String(ns)))
      .collect();
    let mut doc = Map::new();
    doc.insert("@context".to_string(), Value::Object(context));
    doc.insert("@graph".to_string(), Value::Array(nodes));
    Value::Object(doc)
  }
  else {
    Value::Array(nodes)
  }
}

fn object_value(o: &RdfNode, graph: &Graph, compact: bool, used: &mut BTreeMap<String, String>) -> Value {
  match o {
    RdfNode::Named{ .. } | RdfNode::Blank{ .. } => {
      let mut link = Map::new();
      link.insert("@id".to_string(), Value::String(id_string(o)));
      Value::Object(link)
    },
    RdfNode::RawLit{ val } => Value::String(val.clone()),
    RdfNode::LangTaggedLit{ val, lang } => {
      let mut obj = Map::new();
      obj.insert("@value".to_string(), Value::String(val.clone()));
      obj.insert("@language".to_string(), Value::String(lang.clone()));
      Value::Object(obj)
    },
    RdfNode::TypedLit{ val, datatype } => {
      let mut obj = Map::new();
      obj.insert("@value".to_string(), Value::String(val.clone()));
      obj.insert("@type".to_string(), Value::String(shrink(datatype, graph, compact, used)));
      Value::Object(obj)
    },
  }
}

fn id_string(node: &RdfNode) -> String {
  match node {
    RdfNode::Blank{ id } => format!("_:{}", id),
    other => other.value().to_string(),
  }
}

/* Longest-namespace compaction; falls back to the full IRI. */
fn shrink(iri: &str, graph: &Graph, compact: bool, used: &mut BTreeMap<String, String>) -> String {
  if !compact {
    return iri.to_string();
  }
  let mut best: Option<(&str, &str)> = None;
  for (prefix, ns) in graph.namespaces() {
    if iri.starts_with(ns.as_str()) && iri.len() > ns.len() {
      if best.map(|(_, b)| ns.len() > b.len()).unwrap_or(true) {
        best = Some((prefix, ns));
      }
    }
  }
  match best {
    Some((prefix, ns)) => {
      used.insert(prefix.to_string(), ns.to_string());
      format!("{}:{}", prefix, &iri[ns.len()..])
    },
    None => iri.to_string(),
  }
}
