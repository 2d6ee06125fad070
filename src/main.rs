use {
  clap::{Parser, ValueEnum},
  dcat_bridge::{DatasetRecord, DcatParser, DcatSerializer, ProcessorConfig, ProfileRegistry},
  std::{
    fs,
    io::{self, Read, Write},
    path::PathBuf,
    process,
  },
  tracing::warn,
  tracing_subscriber::EnvFilter,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
  /// RDF catalog in, JSON dataset records out
  Consume,
  /// JSON dataset records in, RDF out
  Produce,
}

#[derive(Debug, Parser)]
#[command(
  name = "dcat_bridge",
  version,
  about = "Transcodes between DCAT RDF catalogs and flat dataset records"
)]
struct Cli {
  /// Direction of the transcode
  #[arg(value_enum)]
  mode: Mode,

  /// Input file; stdin when absent
  file: Option<PathBuf>,

  /// RDF grammar to read or write
  #[arg(short, long, default_value = "xml")]
  format: String,

  /// Indent the JSON record output
  #[arg(short = 'P', long)]
  pretty: bool,

  /// Profile chain entry, repeatable and run in order
  #[arg(short, long)]
  profile: Vec<String>,

  /// Legacy extras naming for older record consumers
  #[arg(short = 'm', long)]
  compat_mode: bool,

  /// Keep source sub-catalog structure across the transcode
  #[arg(short, long)]
  subcatalogs: bool,

  /// Base for minted IRIs and the catalog node
  #[arg(short, long, default_value = "http://localhost")]
  base_uri: String,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(io::stderr)
    .init();

  let cli = Cli::parse();
  if let Err(e) = run(&cli) {
    eprintln!("dcat_bridge: {}", e);
    process::exit(1);
  }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
  let data = match &cli.file {
    Some(path) => fs::read(path)?,
    None => {
      let mut buf = Vec::new();
      io::stdin().read_to_end(&mut buf)?;
      buf
    },
  };

  let mut config = ProcessorConfig {
    compatibility_mode: cli.compat_mode,
    expose_subcatalogs: cli.subcatalogs,
    base_uri: cli.base_uri.clone(),
    ..ProcessorConfig::default()
  };
  if !cli.profile.is_empty() {
    config.profiles = cli.profile.clone();
  }
  let registry = ProfileRegistry::with_defaults();

  match cli.mode {
    Mode::Consume => consume(&registry, config, &data, cli),
    Mode::Produce => produce(&registry, config, &data, cli),
  }
}

fn consume(
  registry: &ProfileRegistry,
  config: ProcessorConfig,
  data: &[u8],
  cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>>
{
  let mut parser = DcatParser::new(registry, config)?;
  parser.parse(data, Some(&cli.format))?;

  let mut records = Vec::new();
  for result in parser.datasets() {
    match result {
      Ok(record) => records.push(record),
      Err(e) => warn!(error = %e, "skipping dataset"),
    }
  }

  let out = if cli.pretty {
    serde_json::to_vec_pretty(&records)?
  } else {
    serde_json::to_vec(&records)?
  };
  let mut stdout = io::stdout();
  stdout.write_all(&out)?;
  stdout.write_all(b"\n")?;
  Ok(())
}

fn produce(
  registry: &ProfileRegistry,
  config: ProcessorConfig,
  data: &[u8],
  cli: &Cli,
) -> Result<(), Box<dyn std::error::Error>>
{
  let mut serializer = DcatSerializer::new(registry, config)?;
  let parsed: serde_json::Value = serde_json::from_slice(data)?;
  let out = match parsed {
    serde_json::Value::Array(_) => {
      let records: Vec<DatasetRecord> = serde_json::from_value(parsed)?;
      serializer.serialize_catalog(None, &records, &cli.format, None)?
    },
    _ => {
      let record: DatasetRecord = serde_json::from_value(parsed)?;
      serializer.serialize_dataset(&record, &cli.format)?
    },
  };
  let mut stdout = io::stdout();
  stdout.write_all(&out)?;
  stdout.write_all(b"\n")?;
  Ok(())
}
