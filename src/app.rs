use clap::Parser;
use dicomancer_json::utils::parse_tag_key;
use dicomancer_json::{
    load_dataset, FilterScope, ProjectionOptions, Projector, TagFilter, DEFAULT_MAX_DEPTH,
    UNDEFINED_TEXT,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;

const APP_NAME: &str = "dicomancer-json";

#[derive(Debug, Error, PartialEq, Eq)]
enum CliError {
    #[error("Invalid tag `{0}` in --tags")]
    InvalidTag(String),
}

#[derive(Debug, Parser)]
#[command(name = APP_NAME, version, about = "Print DICOM metadata as JSON")]
struct Cli {
    /// DICOM files to project.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Leave out OB/OW values.
    #[arg(long)]
    omit_binary: bool,

    /// Annotate entries with data dictionary keywords.
    #[arg(long)]
    names: bool,

    /// Only keep these tags, e.g. `00100010,0020000D`.
    #[arg(long, value_delimiter = ',', conflicts_with = "default_filter")]
    tags: Vec<String>,

    /// Only keep the built-in metadata summary tags.
    #[arg(long)]
    default_filter: bool,

    /// Apply the tag filter inside sequences as well.
    #[arg(long)]
    all_levels: bool,

    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[arg(long)]
    pretty: bool,
}

pub fn run() -> ExitCode {
    let _ = env_logger::Builder::from_default_env()
        .format_timestamp_secs()
        .try_init();

    let cli = Cli::parse();

    let filter = match build_filter(&cli) {
        Ok(filter) => filter,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::from(2);
        }
    };

    let scope = if cli.all_levels {
        FilterScope::AllLevels
    } else {
        FilterScope::TopLevel
    };
    let options = ProjectionOptions::new(cli.omit_binary, cli.names)
        .with_max_depth(cli.max_depth)
        .with_filter_scope(scope);
    let projector = Projector::new(options);

    let mut failed = false;
    for path in &cli.files {
        match render(&projector, path, filter.as_ref(), cli.pretty) {
            Ok(text) => println!("{text}"),
            Err(message) => {
                log::error!("{message}");
                println!("{UNDEFINED_TEXT}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn build_filter(cli: &Cli) -> Result<Option<TagFilter>, CliError> {
    if cli.default_filter {
        return Ok(Some(TagFilter::default_metadata()));
    }
    if cli.tags.is_empty() {
        return Ok(None);
    }

    let tags = cli
        .tags
        .iter()
        .map(|text| parse_tag_key(text).ok_or_else(|| CliError::InvalidTag(text.clone())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Some(TagFilter::new(&tags)))
}

fn render(
    projector: &Projector,
    path: &Path,
    filter: Option<&TagFilter>,
    pretty: bool,
) -> Result<String, String> {
    let dataset = load_dataset(path).map_err(|err| err.to_string())?;
    let rendered = if pretty {
        projector.project_to_pretty_text(&dataset, filter)
    } else {
        projector.project_to_text(&dataset, filter)
    };
    rendered.map_err(|err| format!("{}: {err}", path.display()))
}
