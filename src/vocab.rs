/*
  IRI constants for the vocabularies the profiles speak.
  One module per namespace, NS first, terms after.
*/

pub mod rdf {
  pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
  pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
}

pub mod rdfs {
  pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";
  pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
}

pub mod xsd {
  pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";
  pub const DATE: &str = "http://www.w3.org/2001/XMLSchema#date";
  pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
  pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
  pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
  pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
  pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
  pub const HEX_BINARY: &str = "http://www.w3.org/2001/XMLSchema#hexBinary";
  pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
}

pub mod dct {
  pub const NS: &str = "http://purl.org/dc/terms/";
  pub const TITLE: &str = "http://purl.org/dc/terms/title";
  pub const DESCRIPTION: &str = "http://purl.org/dc/terms/description";
  pub const IDENTIFIER: &str = "http://purl.org/dc/terms/identifier";
  pub const ISSUED: &str = "http://purl.org/dc/terms/issued";
  pub const MODIFIED: &str = "http://purl.org/dc/terms/modified";
  pub const LANGUAGE: &str = "http://purl.org/dc/terms/language";
  pub const ACCRUAL_PERIODICITY: &str = "http://purl.org/dc/terms/accrualPeriodicity";
  pub const PROVENANCE: &str = "http://purl.org/dc/terms/provenance";
  pub const TYPE: &str = "http://purl.org/dc/terms/type";
  pub const RELATION: &str = "http://purl.org/dc/terms/relation";
  pub const HAS_VERSION: &str = "http://purl.org/dc/terms/hasVersion";
  pub const IS_VERSION_OF: &str = "http://purl.org/dc/terms/isVersionOf";
  pub const SOURCE: &str = "http://purl.org/dc/terms/source";
  pub const CONFORMS_TO: &str = "http://purl.org/dc/terms/conformsTo";
  pub const ACCESS_RIGHTS: &str = "http://purl.org/dc/terms/accessRights";
  pub const RIGHTS: &str = "http://purl.org/dc/terms/rights";
  pub const LICENSE: &str = "http://purl.org/dc/terms/license";
  pub const PUBLISHER: &str = "http://purl.org/dc/terms/publisher";
  pub const RIGHTS_HOLDER: &str = "http://purl.org/dc/terms/rightsHolder";
  pub const TEMPORAL: &str = "http://purl.org/dc/terms/temporal";
  pub const SPATIAL: &str = "http://purl.org/dc/terms/spatial";
  pub const HAS_PART: &str = "http://purl.org/dc/terms/hasPart";
  pub const FORMAT: &str = "http://purl.org/dc/terms/format";
  pub const PERIOD_OF_TIME: &str = "http://purl.org/dc/terms/PeriodOfTime";
  pub const RIGHTS_STATEMENT: &str = "http://purl.org/dc/terms/RightsStatement";
  pub const LOCATION: &str = "http://purl.org/dc/terms/Location";
}

pub mod dcat {
  pub const NS: &str = "http://www.w3.org/ns/dcat#";
  pub const DATASET_CLASS: &str = "http://www.w3.org/ns/dcat#Dataset";
  pub const DISTRIBUTION_CLASS: &str = "http://www.w3.org/ns/dcat#Distribution";
  pub const CATALOG_CLASS: &str = "http://www.w3.org/ns/dcat#Catalog";
  pub const DATASET: &str = "http://www.w3.org/ns/dcat#dataset";
  pub const DISTRIBUTION: &str = "http://www.w3.org/ns/dcat#distribution";
  pub const KEYWORD: &str = "http://www.w3.org/ns/dcat#keyword";
  pub const THEME: &str = "http://www.w3.org/ns/dcat#theme";
  pub const LANDING_PAGE: &str = "http://www.w3.org/ns/dcat#landingPage";
  pub const CONTACT_POINT: &str = "http://www.w3.org/ns/dcat#contactPoint";
  pub const ACCESS_URL: &str = "http://www.w3.org/ns/dcat#accessURL";
  pub const DOWNLOAD_URL: &str = "http://www.w3.org/ns/dcat#downloadURL";
  pub const MEDIA_TYPE: &str = "http://www.w3.org/ns/dcat#mediaType";
  pub const BYTE_SIZE: &str = "http://www.w3.org/ns/dcat#byteSize";
  pub const START_DATE: &str = "http://www.w3.org/ns/dcat#startDate";
  pub const END_DATE: &str = "http://www.w3.org/ns/dcat#endDate";
}

pub mod adms {
  pub const NS: &str = "http://www.w3.org/ns/adms#";
  pub const IDENTIFIER: &str = "http://www.w3.org/ns/adms#identifier";
  pub const VERSION_NOTES: &str = "http://www.w3.org/ns/adms#versionNotes";
  pub const VERSION: &str = "http://www.w3.org/ns/adms#version";
  pub const SAMPLE: &str = "http://www.w3.org/ns/adms#sample";
  pub const STATUS: &str = "http://www.w3.org/ns/adms#status";
  pub const CONTACT_POINT: &str = "http://www.w3.org/ns/adms#contactPoint";
}

pub mod vcard {
  pub const NS: &str = "http://www.w3.org/2006/vcard/ns#";
  pub const ORGANIZATION: &str = "http://www.w3.org/2006/vcard/ns#Organization";
  pub const FN: &str = "http://www.w3.org/2006/vcard/ns#fn";
  pub const HAS_EMAIL: &str = "http://www.w3.org/2006/vcard/ns#hasEmail";
}

pub mod foaf {
  pub const NS: &str = "http://xmlns.com/foaf/0.1/";
  pub const AGENT: &str = "http://xmlns.com/foaf/0.1/Agent";
  pub const ORGANIZATION: &str = "http://xmlns.com/foaf/0.1/Organization";
  pub const NAME: &str = "http://xmlns.com/foaf/0.1/name";
  pub const MBOX: &str = "http://xmlns.com/foaf/0.1/mbox";
  pub const HOMEPAGE: &str = "http://xmlns.com/foaf/0.1/homepage";
  pub const PAGE: &str = "http://xmlns.com/foaf/0.1/page";
}

pub mod schema {
  pub const NS: &str = "http://schema.org/";
  pub const START_DATE: &str = "http://schema.org/startDate";
  pub const END_DATE: &str = "http://schema.org/endDate";
}

pub mod skos {
  pub const NS: &str = "http://www.w3.org/2004/02/skos/core#";
  pub const PREF_LABEL: &str = "http://www.w3.org/2004/02/skos/core#prefLabel";
}

pub mod locn {
  pub const NS: &str = "http://www.w3.org/ns/locn#";
  pub const GEOMETRY: &str = "http://www.w3.org/ns/locn#geometry";
}

pub mod owl {
  pub const NS: &str = "http://www.w3.org/2002/07/owl#";
  pub const VERSION_INFO: &str = "http://www.w3.org/2002/07/owl#versionInfo";
}

pub mod spdx {
  pub const NS: &str = "http://spdx.org/rdf/terms#";
  pub const CHECKSUM_CLASS: &str = "http://spdx.org/rdf/terms#Checksum";
  pub const CHECKSUM: &str = "http://spdx.org/rdf/terms#checksum";
  pub const CHECKSUM_VALUE: &str = "http://spdx.org/rdf/terms#checksumValue";
  pub const ALGORITHM: &str = "http://spdx.org/rdf/terms#algorithm";
}

pub mod hydra {
  pub const NS: &str = "http://www.w3.org/ns/hydra/core#";
  pub const PAGED_COLLECTION: &str = "http://www.w3.org/ns/hydra/core#PagedCollection";
  pub const TOTAL_ITEMS: &str = "http://www.w3.org/ns/hydra/core#totalItems";
  pub const ITEMS_PER_PAGE: &str = "http://www.w3.org/ns/hydra/core#itemsPerPage";
  pub const NEXT: &str = "http://www.w3.org/ns/hydra/core#next";
  pub const NEXT_PAGE: &str = "http://www.w3.org/ns/hydra/core#nextPage";
  pub const PREVIOUS: &str = "http://www.w3.org/ns/hydra/core#previous";
  pub const PREVIOUS_PAGE: &str = "http://www.w3.org/ns/hydra/core#previousPage";
  pub const FIRST: &str = "http://www.w3.org/ns/hydra/core#first";
  pub const FIRST_PAGE: &str = "http://www.w3.org/ns/hydra/core#firstPage";
  pub const LAST: &str = "http://www.w3.org/ns/hydra/core#last";
  pub const LAST_PAGE: &str = "http://www.w3.org/ns/hydra/core#lastPage";
}

pub mod dcatapit {
  pub const NS: &str = "http://dati.gov.it/onto/dcatapit#";
  pub const DATASET: &str = "http://dati.gov.it/onto/dcatapit#Dataset";
  pub const CATALOG: &str = "http://dati.gov.it/onto/dcatapit#Catalog";
  pub const AGENT: &str = "http://dati.gov.it/onto/dcatapit#Agent";
}

/* EU publications-office authority tables. */
pub mod authority {
  pub const THEME: &str = "http://publications.europa.eu/resource/authority/data-theme/";
  pub const LANGUAGE: &str = "http://publications.europa.eu/resource/authority/language/";
  pub const FREQUENCY: &str = "http://publications.europa.eu/resource/authority/frequency/";
  pub const FILE_TYPE: &str = "http://publications.europa.eu/resource/authority/file-type/";
  pub const PLACE: &str = "http://publications.europa.eu/resource/authority/place/";
}

pub const IANA_MEDIA_BASE: &str = "https://www.iana.org/assignments/media-types/";
/* Datatype IRI marking a locn:geometry literal as GeoJSON. */
pub const GEOJSON_IMT: &str = "https://www.iana.org/assignments/media-types/application/vnd.geo+json";

/* Default prefix table seeded into every Graph. */
pub const PREFIXES: &[(&str, &str)] = &[
  ("rdf", rdf::NS),
  ("rdfs", rdfs::NS),
  ("xsd", xsd::NS),
  ("dct", dct::NS),
  ("dcat", dcat::NS),
  ("adms", adms::NS),
  ("vcard", vcard::NS),
  ("foaf", foaf::NS),
  ("schema", schema::NS),
  ("skos", skos::NS),
  ("locn", locn::NS),
  ("owl", owl::NS),
  ("spdx", spdx::NS),
  ("hydra", hydra::NS),
  ("dcatapit", dcatapit::NS),
];
