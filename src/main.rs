/// comment-stripper: Remove `#` comments from Python files and log them.
///
/// Processes a single file (--file) or a directory tree (--dir), rewrites
/// each .py file in place with its inline comments stripped, and writes the
/// removed comments to a JSON log. Shebangs, coding declarations, and
/// `# type:` / `# noqa` control comments are preserved.

mod classify;
mod error;
mod models;
mod scanner;

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgGroup, Parser};
use walkdir::WalkDir;

use error::StripError;
use models::RemovalRecord;

#[derive(Parser)]
#[command(
    name = "comment-stripper",
    version,
    about = "Remove # comments from Python files and log them as JSON"
)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "dir"])))]
struct Args {
    /// Path to a single Python file to process
    #[arg(long, value_name = "FILE_PATH")]
    file: Option<PathBuf>,

    /// Directory to process recursively; every .py file underneath is rewritten
    #[arg(long, value_name = "DIRECTORY_PATH")]
    dir: Option<PathBuf>,

    /// Where to log removed comments
    #[arg(long, value_name = "LOG_FILE_PATH", default_value = "removed_comments.json")]
    log: PathBuf,
}

// ─── Stripping ────────────────────────────────────────────────────────────────

/// Strip one file in place. Returns the number of comments removed; the
/// file is only rewritten when that number is nonzero.
fn process_file(path: &Path, records: &mut Vec<RemovalRecord>) -> Result<usize, StripError> {
    let raw = fs::read(path)?;
    let source = std::str::from_utf8(&raw)?;

    let result = scanner::strip_source(source, &path.display().to_string());
    let removed = result.removed.len();
    if removed > 0 {
        replace_file_contents(path, &result.cleaned)?;
        records.extend(result.removed);
    }
    Ok(removed)
}

/// Whole-file replace: write to a temp file in the same directory, then
/// rename over the original, so a failure mid-write cannot truncate it.
fn replace_file_contents(path: &Path, contents: &str) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.persist(path)?;
    Ok(())
}

// ─── Directory walk ───────────────────────────────────────────────────────────

fn collect_python_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() {
            if let Some(ext) = entry.path().extension().and_then(|e| e.to_str()) {
                if ext.eq_ignore_ascii_case("py") {
                    files.push(entry.into_path());
                }
            }
        }
    }

    files.sort();
    files
}

/// Process every .py file under `dir`, appending removal records to
/// `records`. Returns the number of files that failed; a failure never
/// aborts the walk.
fn process_directory(dir: &Path, records: &mut Vec<RemovalRecord>) -> usize {
    eprintln!("Scanning directory: {}", dir.display());
    let files = collect_python_files(dir);
    let mut failures = 0usize;

    for path in &files {
        match process_file(path, records) {
            Ok(0) => eprintln!("Processing {}... No comments removed.", path.display()),
            Ok(n) => eprintln!("Processing {}... Removed {} comment(s).", path.display(), n),
            Err(e) => {
                eprintln!("Processing {}... Failed: {}", path.display(), e);
                failures += 1;
            }
        }
    }

    eprintln!("Scanned {} Python file(s), {} failed.", files.len(), failures);
    failures
}

// ─── Log output ───────────────────────────────────────────────────────────────

/// Write the removal log as a pretty-printed JSON array. An empty run
/// writes no log and deletes any stale one at the same path.
fn write_log(records: &[RemovalRecord], path: &Path) -> io::Result<()> {
    if records.is_empty() {
        match fs::remove_file(path) {
            Ok(()) => eprintln!(
                "No comments removed; deleted outdated log {}",
                path.display()
            ),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        return Ok(());
    }

    let file = fs::File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.flush()?;
    eprintln!("Removed comment details logged to {}", path.display());
    Ok(())
}

// ─── Main ─────────────────────────────────────────────────────────────────────

fn main() {
    let args = Args::parse();

    if let Some(parent) = args.log.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!(
                    "Error: could not create log directory {}: {}",
                    parent.display(),
                    e
                );
                process::exit(1);
            }
        }
    }

    let mut records: Vec<RemovalRecord> = Vec::new();
    let mut failed = false;

    if let Some(file) = &args.file {
        if !file.is_file() {
            eprintln!("Error: '{}' is not a valid file.", file.display());
            process::exit(1);
        }
        let is_py = file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("py"))
            .unwrap_or(false);
        if !is_py {
            eprintln!("Error: '{}' is not a Python (.py) file.", file.display());
            process::exit(1);
        }

        match process_file(file, &mut records) {
            Ok(n) => eprintln!("Processing {}... Removed {} comment(s).", file.display(), n),
            Err(e) => {
                eprintln!("Processing {}... Failed: {}", file.display(), e);
                failed = true;
            }
        }
    } else if let Some(dir) = &args.dir {
        if !dir.is_dir() {
            eprintln!("Error: '{}' is not a valid directory.", dir.display());
            process::exit(1);
        }
        failed |= process_directory(dir, &mut records) > 0;
    }

    if let Err(e) = write_log(&records, &args.log) {
        eprintln!(
            "Error: could not write log file {}: {}",
            args.log.display(),
            e
        );
        failed = true;
    }

    if failed {
        eprintln!("Finished with errors.");
        process::exit(1);
    }
}
