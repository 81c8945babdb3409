// On-disk storage for scrape results.
//
// Each run's state is one JSON document at a fixed name under the data
// directory. Writes go to a temp file in the same directory and are renamed
// into place, so an interrupted save never leaves a half-written file.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tempfile::NamedTempFile;
use tracing::info;

use crate::counts::CountsData;
use crate::words::WordsData;

const COUNTS_FILE: &str = "counts/counts.json";
const WORDS_FILE: &str = "words/words.json";

pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn counts_path(&self) -> PathBuf {
        self.dir.join(COUNTS_FILE)
    }

    pub fn words_path(&self) -> PathBuf {
        self.dir.join(WORDS_FILE)
    }

    pub fn save_counts(&self, data: &CountsData) -> Result<PathBuf> {
        let path = self.counts_path();
        write_json(&path, data)?;
        info!(path = %path.display(), "Saved co-occurrence counts");
        Ok(path)
    }

    pub fn load_counts(&self) -> Result<CountsData> {
        read_json(&self.counts_path())
    }

    pub fn save_words(&self, data: &WordsData) -> Result<PathBuf> {
        let path = self.words_path();
        write_json(&path, data)?;
        info!(path = %path.display(), terms = data.sets.len(), "Saved word data");
        Ok(path)
    }

    pub fn load_words(&self) -> Result<WordsData> {
        read_json(&self.words_path())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {}", parent.display()))?;

    let temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temp file in {}", parent.display()))?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer(&mut writer, value).context("Failed to serialize state")?;
        writer.flush()?;
    }
    temp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        anyhow::bail!(
            "No saved data at {}. Run the matching scrape command first.",
            path.display()
        );
    }
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", path.display()))
}
