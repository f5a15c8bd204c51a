use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use memmap2::Mmap;
use zipf_dict::{
    capacity_hint, words, Dictionary, DictionaryConfig, FrequencyReport, HashPrecision,
    ReportHeader,
};

/// Counts every word in a text file and writes a Zipf's-law concordance
/// to `<stem>.wrd` and a rank table to `<stem>.csv`.
#[derive(Parser, Debug)]
#[command(name = "zipf", version, about)]
struct Opts {
    /// Text file to read.
    input: PathBuf,
    /// Word hash precision: `single` or `double`.
    #[arg(long, value_enum, ignore_case = true, default_value_t = HashPrecision::Double)]
    precision: HashPrecision,
    /// Count words whose hashes collide as one word instead of comparing text.
    #[arg(long)]
    no_refine: bool,
    /// Directory for the report files; defaults to the input's directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

struct Stopwatch(Instant);

impl Stopwatch {
    fn lap(&self, phase: &str) {
        log::info!("{:<20}{:>10.5}", phase, self.0.elapsed().as_secs_f64());
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let opts = Opts::parse();

    let clock = Stopwatch(Instant::now());
    log::info!("Operation      Seconds Elapsed");
    clock.lap("Initializing");

    let file = File::open(&opts.input)
        .with_context(|| format!("{} could not be opened", opts.input.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("reading metadata of {}", opts.input.display()))?
        .len();
    let map = if len == 0 {
        None
    } else {
        // SAFETY: read-only mapping that lives until the words are counted;
        // the input must not be truncated by another process meanwhile.
        let map = unsafe { Mmap::map(&file) }
            .with_context(|| format!("mapping {}", opts.input.display()))?;
        Some(map)
    };
    let bytes: &[u8] = map.as_deref().unwrap_or(&[]);

    let config = DictionaryConfig::new(opts.precision, !opts.no_refine);
    let mut dict = Dictionary::with_config(capacity_hint(len), config);

    clock.lap("Getting Words");
    let total = dict.insert_all(words(bytes));

    clock.lap("Printing Files");
    let (wrd_path, csv_path) = report_paths(&opts.input, opts.out_dir.as_deref());
    let source = opts.input.display().to_string();
    let header = ReportHeader::new(&source, total, &dict);
    let report = FrequencyReport::new(&dict);

    let mut wrd = create(&wrd_path)?;
    report.write_text(&header, &mut wrd)?;
    wrd.flush()?;
    let mut csv = create(&csv_path)?;
    report.write_csv(&header, &mut csv)?;
    csv.flush()?;

    log::debug!(
        "{} words, {} distinct, {} frequency groups -> {}, {}",
        total,
        dict.len(),
        report.len(),
        wrd_path.display(),
        csv_path.display()
    );
    clock.lap("Program Complete");
    Ok(())
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// `<dir>/<stem>.wrd` and `<dir>/<stem>.csv`, where the stem is the file
/// name up to its first '.'.
fn report_paths(input: &Path, out_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = match name.split('.').next() {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => name.clone(),
    };
    let dir = out_dir
        .map(Path::to_path_buf)
        .or_else(|| input.parent().map(Path::to_path_buf))
        .unwrap_or_default();
    (dir.join(format!("{}.wrd", stem)), dir.join(format!("{}.csv", stem)))
}
