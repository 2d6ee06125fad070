
type Source<E> = Box<E>;

/* Everything that can go wrong between raw bytes and triples.
   A parse that fails with one of these commits nothing to the store. */
#[derive(Debug)]
pub enum ParseError {
  UnknownFormat(String),
  Turtle(Source<rio_turtle::TurtleError>),
  RdfXml(Source<rio_xml::RdfXmlError>),
  Json(Source<serde_json::Error>),
  JsonLd(String),
}
impl std::error::Error for ParseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use ParseError::*;
    match self {
      Turtle(e) => Some(&**e),
      RdfXml(e) => Some(&**e),
      Json(e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for ParseError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use ParseError::*;
    match self {
      UnknownFormat(label) => write!(f, "Unrecognised RDF format label: {}", label),
      Turtle(e) => write!(f, "{}", *e),
      RdfXml(e) => write!(f, "{}", *e),
      Json(e) => write!(f, "{}", *e),
      JsonLd(reason) => write!(f, "Invalid JSON-LD document: {}", reason),
    }
  }
}
impl From<rio_turtle::TurtleError> for ParseError {
  fn from(err: rio_turtle::TurtleError) -> ParseError {
    ParseError::Turtle(Box::new(err))
  }
}
impl From<rio_xml::RdfXmlError> for ParseError {
  fn from(err: rio_xml::RdfXmlError) -> ParseError {
    ParseError::RdfXml(Box::new(err))
  }
}
impl From<serde_json::Error> for ParseError {
  fn from(err: serde_json::Error) -> ParseError {
    ParseError::Json(Box::new(err))
  }
}

/* Raised at parser/serializer construction when the requested
   profile chain names strategies nobody registered. */
#[derive(Debug)]
pub struct UnknownProfileError {
  pub names: Vec<String>,
}
impl UnknownProfileError {
  pub fn new(mut names: Vec<String>) -> Self {
    names.sort();
    UnknownProfileError { names }
  }
}
impl std::error::Error for UnknownProfileError {}
impl std::fmt::Display for UnknownProfileError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "Unknown RDF profiles: {}", self.names.join(", "))
  }
}

/* A profile demanded a field the record does not carry. */
#[derive(Debug)]
pub struct MissingRequiredFieldError {
  pub field: String,
  pub entity: String,
}
impl MissingRequiredFieldError {
  pub fn new(field: impl Into<String>, entity: impl Into<String>) -> Self {
    MissingRequiredFieldError { field: field.into(), entity: entity.into() }
  }
}
impl std::error::Error for MissingRequiredFieldError {}
impl std::fmt::Display for MissingRequiredFieldError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    write!(f, "Required field {} missing on {}", self.field, self.entity)
  }
}

/* Umbrella for operations that can fail in more than one way. */
#[derive(Debug)]
pub enum TranscodeError {
  Parse(Source<ParseError>),
  UnknownProfiles(Source<UnknownProfileError>),
  MissingField(Source<MissingRequiredFieldError>),
  Profile(String),
  Io(Source<std::io::Error>),
  Serde(Source<serde_json::Error>),
}
impl std::error::Error for TranscodeError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    use TranscodeError::*;
    match self {
      Parse(e) => Some(&**e),
      UnknownProfiles(e) => Some(&**e),
      MissingField(e) => Some(&**e),
      Io(e) => Some(&**e),
      Serde(e) => Some(&**e),
      _ => None,
    }
  }
}
impl std::fmt::Display for TranscodeError {
  fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
    use TranscodeError::*;
    match self {
      Parse(e) => write!(f, "{}", *e),
      UnknownProfiles(e) => write!(f, "{}", *e),
      MissingField(e) => write!(f, "{}", *e),
      Profile(reason) => write!(f, "Profile failed: {}", reason),
      Io(e) => write!(f, "{}", *e),
      Serde(e) => write!(f, "{}", *e),
    }
  }
}
impl From<ParseError> for TranscodeError {
  fn from(err: ParseError) -> TranscodeError {
    TranscodeError::Parse(Box::new(err))
  }
}
impl From<UnknownProfileError> for TranscodeError {
  fn from(err: UnknownProfileError) -> TranscodeError {
    TranscodeError::UnknownProfiles(Box::new(err))
  }
}
impl From<MissingRequiredFieldError> for TranscodeError {
  fn from(err: MissingRequiredFieldError) -> TranscodeError {
    TranscodeError::MissingField(Box::new(err))
  }
}
impl From<std::io::Error> for TranscodeError {
  fn from(err: std::io::Error) -> TranscodeError {
    TranscodeError::Io(Box::new(err))
  }
}
impl From<serde_json::Error> for TranscodeError {
  fn from(err: serde_json::Error) -> TranscodeError {
    TranscodeError::Serde(Box::new(err))
  }
}
