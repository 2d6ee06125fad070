/*
  The flat record shape the engine trades in:
    {"title": ..., "notes": ..., "url": ...,
     "tags": [{"name": ...}],
     "extras": [{"key": ..., "value": ...}],
     "resources": [{...}]}
  Everything outside tags/extras/resources is a free-form field map.
  Harvested JSON is sloppy, so scalar fields swallow numbers, booleans
  and nulls as text; structures the engine does not understand are
  carried through untouched.
*/

use {
  serde::{Deserialize, Deserializer, Serialize},
  serde_json::Value,
  std::collections::BTreeMap,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
  Text(String),
  List(Vec<String>),
  /* Anything richer, preserved verbatim across the boundary. */
  Json(Value),
}
impl FieldValue {
  fn from_json(value: Value) -> Self {
    match value {
      Value::String(s) => Self::Text(s),
      Value::Bool(b) => Self::Text(b.to_string()),
      Value::Number(n) => Self::Text(n.to_string()),
      Value::Null => Self::Text(String::new()),
      Value::Array(items) => {
        if items.iter().all(|i| matches!(i, Value::String(_))) {
          Self::List(
            items
              .into_iter()
              .filter_map(|i| match i {
                Value::String(s) => Some(s),
                _ => None,
              })
              .collect(),
          )
        }
        else {
          Self::Json(Value::Array(items))
        }
      },
      other => Self::Json(other),
    }
  }
}
impl<'de> Deserialize<'de> for FieldValue {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Ok(Self::from_json(Value::deserialize(deserializer)?))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extra {
  pub key: String,
  pub value: String,
}
impl Extra {
  pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
    Extra { key: key.into(), value: value.into() }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
  pub name: String,
}
impl Tag {
  pub fn new(name: impl Into<String>) -> Self {
    Tag { name: name.into() }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
  #[serde(default)]
  pub tags: Vec<Tag>,
  #[serde(default)]
  pub extras: Vec<Extra>,
  #[serde(default)]
  pub resources: Vec<ResourceRecord>,
  #[serde(flatten)]
  fields: BTreeMap<String, FieldValue>,
}

impl DatasetRecord {
  pub fn new() -> Self {
    Self::default()
  }

  /* Empty strings count as absent, matching the falsy rules the
     mapping tables rely on. */
  pub fn field(&self, name: &str) -> Option<&str> {
    match self.fields.get(name) {
      Some(FieldValue::Text(s)) if !s.is_empty() => Some(s),
      _ => None,
    }
  }
  pub fn field_value(&self, name: &str) -> Option<&FieldValue> {
    self.fields.get(name)
  }
  pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.fields.insert(name.into(), FieldValue::Text(value.into()));
  }
  pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
    match self.fields.get_mut(name) {
      Some(FieldValue::Text(s)) => Some(s),
      _ => None,
    }
  }
  pub fn list_field(&self, name: &str) -> Option<&[String]> {
    match self.fields.get(name) {
      Some(FieldValue::List(items)) => Some(items),
      _ => None,
    }
  }
  pub fn set_list_field(&mut self, name: impl Into<String>, values: Vec<String>) {
    self.fields.insert(name.into(), FieldValue::List(values));
  }
  pub fn first_of(&self, names: &[&str]) -> Option<&str> {
    names.iter().find_map(|n| self.field(n))
  }

  pub fn extra(&self, key: &str) -> Option<&str> {
    self
      .extras
      .iter()
      .find(|e| e.key == key)
      .map(|e| e.value.as_str())
      .filter(|v| !v.is_empty())
  }
  pub fn push_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
    self.extras.push(Extra::new(key, value));
  }

  /* Field, then extra, then the legacy "dcat_"-prefixed extra. */
  pub fn value_or_extra(&self, key: &str) -> Option<&str> {
    if let Some(v) = self.field(key) {
      return Some(v);
    }
    if let Some(v) = self.extra(key) {
      return Some(v);
    }
    self.extra(&format!("dcat_{}", key))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRecord {
  fields: BTreeMap<String, FieldValue>,
}

impl ResourceRecord {
  pub fn new() -> Self {
    Self::default()
  }
  pub fn field(&self, name: &str) -> Option<&str> {
    match self.fields.get(name) {
      Some(FieldValue::Text(s)) if !s.is_empty() => Some(s),
      _ => None,
    }
  }
  pub fn field_value(&self, name: &str) -> Option<&FieldValue> {
    self.fields.get(name)
  }
  pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.fields.insert(name.into(), FieldValue::Text(value.into()));
  }
  pub fn field_mut(&mut self, name: &str) -> Option<&mut String> {
    match self.fields.get_mut(name) {
      Some(FieldValue::Text(s)) => Some(s),
      _ => None,
    }
  }
  pub fn remove_field(&mut self, name: &str) -> Option<FieldValue> {
    self.fields.remove(name)
  }
  pub fn list_field(&self, name: &str) -> Option<&[String]> {
    match self.fields.get(name) {
      Some(FieldValue::List(items)) => Some(items),
      _ => None,
    }
  }
  pub fn set_list_field(&mut self, name: impl Into<String>, values: Vec<String>) {
    self.fields.insert(name.into(), FieldValue::List(values));
  }
  pub fn first_of(&self, names: &[&str]) -> Option<&str> {
    names.iter().find_map(|n| self.field(n))
  }
}
