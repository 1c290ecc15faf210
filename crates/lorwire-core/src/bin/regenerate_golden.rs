use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lorwire_core::{SourceConfig, encode_all, load_request_file, to_hex};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("requests.json");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected.hex");
        regenerate_one(&input, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let requests = load_request_file(input, &SourceConfig::default())
        .map_err(|err| format!("loading failed for {}: {}", input.display(), err))?;
    let hex = to_hex(&encode_all(&requests));
    fs::write(output, format!("{hex}\n"))
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
