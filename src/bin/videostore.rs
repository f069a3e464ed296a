use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, RwLock};

use log::LevelFilter;
use unicode_width::UnicodeWidthStr;

use videostore::container::Container;
use videostore::error::{LayoutError, StoreError};
use videostore::geometry::Margins;
use videostore::layout::{Alignment, GridLayout, GridLocation};
use videostore::logging::StoreLogger;
use videostore::store::VideoStore;
use videostore::sync::read_recover;
use videostore::widget::{Label, Widget, WidgetRef};

/// Load a record file, list it, optionally write it back.
///
/// Argument parsing is hand-rolled; the interface is three flags.
fn main() -> ExitCode {
    let cfg = match parse_args(std::env::args()) {
        Ok(cfg) => cfg,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::from(2);
        }
    };

    if cfg.help {
        print!("{HELP_TEXT}");
        return ExitCode::SUCCESS;
    }

    let Some(file) = cfg.file else {
        print!("{HELP_TEXT}");
        return ExitCode::from(2);
    };

    let level = cfg.log_level.unwrap_or_else(level_from_env);
    if let Err(e) = StoreLogger::new().level(level).init() {
        eprintln!("logger already installed: {e}");
    }

    match run(&file, cfg.save.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Failure::Store(err @ StoreError::NotFound(_))) => {
            println!("{err}");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug)]
enum Failure {
    Store(StoreError),
    Layout(LayoutError),
}

impl std::fmt::Display for Failure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(e) => write!(f, "{e}"),
            Self::Layout(e) => write!(f, "{e}"),
        }
    }
}

impl From<StoreError> for Failure {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<LayoutError> for Failure {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

fn run(file: &Path, save: Option<&Path>) -> Result<(), Failure> {
    let mut store = VideoStore::new();
    store.load_file(file)?;
    print!("{}", render_listing(&store)?);

    if let Some(out) = save {
        store.save_to_file(out)?;
    }
    Ok(())
}

const HEADERS: [&str; 6] = ["ID", "Title", "Year", "Rating", "Rate", "New"];

/// Column-aligned text table of every record, laid out by a grid.
fn render_listing(store: &VideoStore) -> Result<String, LayoutError> {
    let rows = store.len() + 1;
    let mut grid = GridLayout::new(rows, HEADERS.len())?
        .with_hgap(2)
        .with_vgap(0)
        .with_margins(Margins::default());
    grid.set_column_alignment(2, Alignment::Far)?;
    grid.set_column_alignment(4, Alignment::Far)?;

    let table = Container::new(grid);
    let mut labels: Vec<Arc<RwLock<Label>>> = Vec::with_capacity(rows * HEADERS.len());

    let records = store.iter().map(|v| {
        [
            v.id().to_string(),
            v.title().to_string(),
            v.year().to_string(),
            v.rating().to_string(),
            format!("{:.2}", v.rental_rate()),
            if v.is_new_release() { "yes" } else { "no" }.to_string(),
        ]
    });
    let header = HEADERS.map(str::to_string);

    for (row, cells) in std::iter::once(header).chain(records).enumerate() {
        for (column, text) in cells.into_iter().enumerate() {
            let label = Arc::new(RwLock::new(Label::new(text)));
            let handle: WidgetRef = label.clone();
            table.add(&handle, GridLocation::at(row, column))?;
            labels.push(label);
        }
    }

    let size = table.preferred_size()?;
    table.set_size(size);
    table.lay_out()?;

    let height = usize::try_from(size.height).unwrap_or(0);
    let mut lines: Vec<Vec<(i32, String)>> = vec![Vec::new(); height];
    for label in &labels {
        let label = read_recover(label);
        let bounds = label.bounds();
        if let Ok(y) = usize::try_from(bounds.y)
            && let Some(line) = lines.get_mut(y)
        {
            line.push((bounds.x, label.text().to_string()));
        }
    }

    let mut out = String::new();
    for mut line in lines {
        line.sort_by_key(|(x, _)| *x);
        let mut column = 0;
        for (x, text) in line {
            let pad = usize::try_from(x - column).unwrap_or(0);
            out.push_str(&" ".repeat(pad));
            out.push_str(&text);
            column = x + i32::try_from(text.width()).unwrap_or(0);
        }
        out.push('\n');
    }
    Ok(out)
}

fn level_from_env() -> LevelFilter {
    std::env::var("VIDEOSTORE_LOG")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(LevelFilter::Warn)
}

#[derive(Debug, Default)]
struct Config {
    help: bool,
    file: Option<PathBuf>,
    save: Option<PathBuf>,
    log_level: Option<LevelFilter>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Config, String> {
    let mut iter = args.into_iter();
    // Drop binary name if present.
    let _ = iter.next();

    let mut cfg = Config::default();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => cfg.help = true,
            "--save" => {
                if cfg.save.is_some() {
                    return Err("`--save` provided more than once.".to_string());
                }
                cfg.save = Some(PathBuf::from(next_value(&mut iter, "--save")?));
            }
            "--log-level" => {
                let raw = next_value(&mut iter, "--log-level")?;
                cfg.log_level = Some(raw.parse().map_err(|_| {
                    format!("Invalid --log-level value `{raw}` (expected off, error, warn, info, debug or trace).")
                })?);
            }
            flag if flag.starts_with('-') => {
                return Err(format!("Unknown option `{flag}`.\n\n{HELP_TEXT}"));
            }
            _ => {
                if cfg.file.is_some() {
                    return Err(format!("Unexpected argument `{arg}`."));
                }
                cfg.file = Some(PathBuf::from(&arg));
            }
        }
    }

    Ok(cfg)
}

fn next_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    iter.next()
        .ok_or_else(|| format!("Missing value for `{flag}`."))
}

const HELP_TEXT: &str = r"videostore - list and re-save a video inventory file

USAGE:
    videostore <FILE> [OPTIONS]

OPTIONS:
    --save <out>          Write the loaded records to <out>
    --log-level <level>   off, error, warn, info, debug or trace
                          (default: $VIDEOSTORE_LOG or warn)
    -h, --help            Print this help
";
