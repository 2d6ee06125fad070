use {
  bimap::BiBTreeMap,
  fnv::FnvHasher,
  std::{
    collections::BTreeSet,
    hash::Hasher,
  },
  crate::{RdfNode, Triple, vocab},
};

type Id = u32;

/* Terms are interned once in a bidirectional dictionary and triples
     are held as id-triples in two ordered indexes, SPO and POS, so
     that every bound-prefix pattern is a range scan.
   Set semantics throughout: inserting a triple twice is a no-op.
   Iteration order is the id order of the dictionary, which is the
     order terms were first seen. Deterministic for a given insertion
     history, nothing more. */
#[derive(Debug, Clone)]
pub struct Graph {
  dict: BiBTreeMap<RdfNode, Id>,
  next_id: Id,
  spo: BTreeSet<[Id; 3]>,
  pos: BTreeSet<[Id; 3]>,
  prefixes: Vec<(String, String)>,
  fresh_blanks: u32,
}

/* Public */
impl Graph {
  pub fn new() -> Self {
    Graph {
      dict: BiBTreeMap::new(),
      next_id: 0,
      spo: BTreeSet::new(),
      pos: BTreeSet::new(),
      prefixes: vocab::PREFIXES
        .iter()
        .map(|(p, ns)| (p.to_string(), ns.to_string()))
        .collect(),
      fresh_blanks: 0,
    }
  }

  pub fn len(&self) -> usize {
    self.spo.len()
  }
  pub fn is_empty(&self) -> bool {
    self.spo.is_empty()
  }

  /* Insert with set semantics. Returns whether the triple was new. */
  pub fn add(&mut self, [s, p, o]: Triple) -> bool {
    let t = [self.intern(s), self.intern(p), self.intern(o)];
    let fresh = self.spo.insert(t);
    if fresh {
      self.pos.insert([t[1], t[2], t[0]]);
    }
    fresh
  }

  pub fn contains(&self, [s, p, o]: &Triple) -> bool {
    match (self.id(s), self.id(p), self.id(o)) {
      (Some(s), Some(p), Some(o)) => self.spo.contains(&[s, p, o]),
      _ => false,
    }
  }

  pub fn remove(&mut self, [s, p, o]: &Triple) -> bool {
    match (self.id(s), self.id(p), self.id(o)) {
      (Some(s), Some(p), Some(o)) => {
        let found = self.spo.remove(&[s, p, o]);
        if found {
          self.pos.remove(&[p, o, s]);
        }
        found
      },
      _ => false,
    }
  }

  /* Drops every triple and the dictionary, keeps the prefix table. */
  pub fn clear(&mut self) {
    self.dict = BiBTreeMap::new();
    self.next_id = 0;
    self.spo.clear();
    self.pos.clear();
  }

  /* Wildcard pattern query: None matches anything. A bound term the
     dictionary has never seen yields an empty result. The returned
     iterator is restartable by querying again. */
  pub fn query(&self, s: Option<&RdfNode>, p: Option<&RdfNode>, o: Option<&RdfNode>) -> Query<'_> {
    let bound = |n: Option<&RdfNode>| match n {
      Some(n) => match self.id(n) {
        Some(id) => Ok(Some(id)),
        None => Err(()),
      },
      None => Ok(None),
    };
    let ids = match (bound(s), bound(p), bound(o)) {
      (Ok(s), Ok(p), Ok(o)) => match (s, p, o) {
        (Some(s), Some(p), Some(o)) => self.spo(s, p, o),
        (Some(s), Some(p), None) => self.sp_(s, p),
        (Some(s), None, Some(o)) => self.s_o(s, o),
        (Some(s), None, None) => self.s__(s),
        (None, Some(p), Some(o)) => self._po(p, o),
        (None, Some(p), None) => self._p_(p),
        (None, None, Some(o)) => self.__o(o),
        (None, None, None) => self.___(),
      },
      _ => Vec::new(),
    };
    Query { graph: self, ids, at: 0 }
  }

  pub fn triples(&self) -> Query<'_> {
    self.query(None, None, None)
  }

  pub fn objects<'a>(&'a self, s: &RdfNode, p: &RdfNode) -> impl Iterator<Item = RdfNode> + 'a {
    self.query(Some(s), Some(p), None).map(|[_, _, o]| o)
  }
  pub fn object(&self, s: &RdfNode, p: &RdfNode) -> Option<RdfNode> {
    self.objects(s, p).next()
  }
  /* First object's lexical content, whatever kind of term it is. */
  pub fn object_value(&self, s: &RdfNode, p: &RdfNode) -> Option<String> {
    self.object(s, p).map(|o| o.value().to_string())
  }
  pub fn subjects_with<'a>(&'a self, p: &RdfNode, o: &RdfNode) -> impl Iterator<Item = RdfNode> + 'a {
    self.query(None, Some(p), Some(o)).map(|[s, _, _]| s)
  }

  /* A blank node no triple in this graph uses yet. */
  pub fn bnode(&mut self) -> RdfNode {
    loop {
      let label = format!("b{}", self.fresh_blanks);
      self.fresh_blanks += 1;
      let node = RdfNode::Blank{ id: label };
      if self.id(&node).is_none() {
        return node;
      }
    }
  }

  /* A blank node whose label is a pure function of (seed, role), so
     writing the same entity twice lands on the same node instead of
     minting a fresh one. */
  pub fn stable_bnode(&self, seed: &str, role: &str) -> RdfNode {
    let mut h = FnvHasher::default();
    h.write(seed.as_bytes());
    h.write(role.as_bytes());
    RdfNode::Blank{ id: format!("{}{:016x}", role, h.finish()) }
  }

  pub fn bind(&mut self, prefix: &str, namespace: &str) {
    if let Some(entry) = self.prefixes.iter_mut().find(|(p, _)| p == prefix) {
      entry.1 = namespace.to_string();
    }
    else {
      self.prefixes.push((prefix.to_string(), namespace.to_string()));
    }
  }
  pub fn namespaces(&self) -> &[(String, String)] {
    &self.prefixes
  }
}

impl Default for Graph {
  fn default() -> Self {
    Self::new()
  }
}

/* Graphs compare by triple set, not by dictionary layout. */
impl PartialEq for Graph {
  fn eq(&self, other: &Self) -> bool {
    self.len() == other.len() && self.triples().all(|t| other.contains(&t))
  }
}
impl Eq for Graph {}

impl Extend<Triple> for Graph {
  fn extend<I: IntoIterator<Item = Triple>>(&mut self, iter: I) {
    for triple in iter {
      self.add(triple);
    }
  }
}
impl FromIterator<Triple> for Graph {
  fn from_iter<I: IntoIterator<Item = Triple>>(iter: I) -> Self {
    let mut graph = Graph::new();
    graph.extend(iter);
    graph
  }
}
impl<'a> IntoIterator for &'a Graph {
  type Item = Triple;
  type IntoIter = Query<'a>;
  fn into_iter(self) -> Self::IntoIter {
    self.triples()
  }
}

/* Private */
impl Graph {
  fn id(&self, node: &RdfNode) -> Option<Id> {
    self.dict.get_by_left(node).copied()
  }
  fn intern(&mut self, node: RdfNode) -> Id {
    if let Some(&id) = self.dict.get_by_left(&node) {
      id
    }
    else {
      let id = self.next_id;
      self.next_id += 1;
      self.dict.insert(node, id);
      id
    }
  }
  fn resolve(&self, [s, p, o]: [Id; 3]) -> Option<Triple> {
    Some([
      self.dict.get_by_right(&s)?.clone(),
      self.dict.get_by_right(&p)?.clone(),
      self.dict.get_by_right(&o)?.clone(),
    ])
  }

  /* One lookup per pattern shape, named by its bound positions. */
  fn spo(&self, s: Id, p: Id, o: Id) -> Vec<[Id; 3]> {
    if self.spo.contains(&[s, p, o]) {
      vec![[s, p, o]]
    }
    else {
      Vec::new()
    }
  }
  fn sp_(&self, s: Id, p: Id) -> Vec<[Id; 3]> {
    self.spo.range([s, p, 0]..=[s, p, Id::MAX]).copied().collect()
  }
  fn s_o(&self, s: Id, o: Id) -> Vec<[Id; 3]> {
    self.spo
      .range([s, 0, 0]..=[s, Id::MAX, Id::MAX])
      .filter(|t| t[2] == o)
      .copied()
      .collect()
  }
  fn s__(&self, s: Id) -> Vec<[Id; 3]> {
    self.spo.range([s, 0, 0]..=[s, Id::MAX, Id::MAX]).copied().collect()
  }
  fn _po(&self, p: Id, o: Id) -> Vec<[Id; 3]> {
    self.pos
      .range([p, o, 0]..=[p, o, Id::MAX])
      .map(|&[p, o, s]| [s, p, o])
      .collect()
  }
  fn _p_(&self, p: Id) -> Vec<[Id; 3]> {
    self.pos
      .range([p, 0, 0]..=[p, Id::MAX, Id::MAX])
      .map(|&[p, o, s]| [s, p, o])
      .collect()
  }
  fn __o(&self, o: Id) -> Vec<[Id; 3]> {
    self.spo.iter().filter(|t| t[2] == o).copied().collect()
  }
  fn ___(&self) -> Vec<[Id; 3]> {
    self.spo.iter().copied().collect()
  }
}

pub struct Query<'a> {
  graph: &'a Graph,
  ids: Vec<[Id; 3]>,
  at: usize,
}
impl<'a> Iterator for Query<'a> {
  type Item = Triple;
  fn next(&mut self) -> Option<Self::Item> {
    while self.at < self.ids.len() {
      let ids = self.ids[self.at];
      self.at += 1;
      if let Some(triple) = self.graph.resolve(ids) {
        return Some(triple);
      }
    }
    None
  }
}
