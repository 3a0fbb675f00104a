use std::{
    fs::File,
    io::{self, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use oxiblock_advisor::placement_evaluator::HeuristicWeights;
use oxiblock_engine::{PieceSeed, SessionConfig};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// Writes `value` as pretty JSON to `output_path`, or to stdout if no path is
/// given.
pub fn save_json<T>(value: &T, output_path: Option<&Path>) -> anyhow::Result<()>
where
    T: Serialize,
{
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            write_json(BufWriter::new(file), value)
                .with_context(|| format!("cannot write {}", path.display()))
        }
        None => write_json(io::stdout().lock(), value).context("cannot write to stdout"),
    }
}

/// Serializes `value` followed by a newline and flushes `writer`.
pub fn write_json<W, T>(mut writer: W, value: &T) -> anyhow::Result<()>
where
    W: Write,
    T: Serialize,
{
    serde_json::to_writer_pretty(&mut writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Reads and deserializes a JSON file; errors name the file by `what`.
pub fn read_json_file<T, P>(what: &str, path: P) -> anyhow::Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file =
        File::open(path).with_context(|| format!("cannot open {what} {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("invalid {what} in {}", path.display()))
}

/// Reads the session config, or returns the default config if no path is given.
pub fn read_session_config(path: Option<&Path>) -> anyhow::Result<SessionConfig> {
    path.map_or_else(
        || Ok(SessionConfig::default()),
        |path| read_json_file("session config", path),
    )
}

/// Reads heuristic weights, or returns the default weights if no path is given.
pub fn read_weights(path: Option<&Path>) -> anyhow::Result<HeuristicWeights> {
    path.map_or_else(
        || Ok(HeuristicWeights::default()),
        |path| read_json_file("weights", path),
    )
}

/// Parses a `--seed` argument (32 hex digits).
pub fn parse_seed(s: &str) -> Result<PieceSeed, String> {
    PieceSeed::from_hex(s)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
struct BestScoreRecord {
    best_score: usize,
}

/// Best score kept in a small JSON file between runs.
#[derive(Debug, Clone)]
pub struct BestScoreFile {
    path: PathBuf,
}

impl BestScoreFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the stored best score, `0` if the file does not exist yet.
    pub fn load(&self) -> anyhow::Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        let record: BestScoreRecord = read_json_file("best score", &self.path)?;
        Ok(record.best_score)
    }

    pub fn store(&self, best_score: usize) -> anyhow::Result<()> {
        save_json(&BestScoreRecord { best_score }, Some(&self.path))?;
        tracing::debug!(best_score, path = %self.path.display(), "best score saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("oxiblock-{}-{name}", process::id()))
    }

    #[test]
    fn test_best_score_file() {
        let path = temp_path("best-score.json");
        let _ = fs::remove_file(&path);
        let file = BestScoreFile::new(path.clone());

        assert_eq!(file.load().unwrap(), 0);
        file.store(1234).unwrap();
        assert_eq!(file.load().unwrap(), 1234);

        let contents = fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(json, serde_json::json!({ "best_score": 1234 }));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_read_json_file_reports_path() {
        let path = temp_path("broken-config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = read_session_config(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("session config"));
        fs::remove_file(&path).unwrap();

        let missing = read_weights(Some(Path::new("/nonexistent/oxiblock-weights.json")));
        assert!(missing.is_err());
    }

    #[test]
    fn test_write_json_ends_with_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &BestScoreRecord { best_score: 7 }).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.ends_with("}\n"));
        let record: BestScoreRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(record.best_score, 7);
    }

    #[test]
    fn test_defaults_without_path() {
        assert_eq!(read_session_config(None).unwrap(), SessionConfig::default());
        assert_eq!(read_weights(None).unwrap(), HeuristicWeights::default());
    }
}
