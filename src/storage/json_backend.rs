use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    bills::{collection::CURRENT_SCHEMA_VERSION, BillBook},
    errors::BillError,
    utils::{backups_dir_in, bills_file_in, ensure_dir},
};

use super::{Result, StorageBackend};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";
const BACKUP_STEM: &str = "bills";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// File-backed storage: one pretty-printed JSON collection under the app data
/// directory, with timestamped backups and retention pruning.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    bills_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let app_root = root.unwrap_or_else(crate::utils::app_data_dir);
        ensure_dir(&app_root)?;
        let backups_dir = backups_dir_in(&app_root);
        ensure_dir(&backups_dir)?;
        let bills_file = bills_file_in(&app_root);
        Ok(Self {
            root: app_root,
            bills_file,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn bills_path(&self) -> &Path {
        &self.bills_file
    }

    pub fn backup_path(&self, backup_name: &str) -> PathBuf {
        self.backups_dir.join(backup_name)
    }

    fn write_backup_file(&self, book: &BillBook, note: Option<&str>) -> Result<()> {
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut file_stem = format!("{}_{}", BACKUP_STEM, timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            file_stem.push('_');
            file_stem.push_str(&label);
        }
        let path = self
            .backups_dir
            .join(format!("{}.{}", file_stem, BACKUP_EXTENSION));
        let json = serde_json::to_string_pretty(book)?;
        write_atomic(&path, &json)?;
        self.prune_backups()?;
        Ok(())
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.bills_file.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!("{}_{}.{}", BACKUP_STEM, timestamp, BACKUP_EXTENSION);
        fs::copy(&self.bills_file, self.backups_dir.join(backup_name))?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_path(entry));
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, book: &BillBook) -> Result<()> {
        if let Some(parent) = self.bills_file.parent() {
            ensure_dir(parent)?;
        }
        self.backup_existing_file()?;
        let json = serde_json::to_string_pretty(book)?;
        let tmp = tmp_path(&self.bills_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.bills_file)?;
        tracing::info!(path = %self.bills_file.display(), bills = book.len(), "saved bill collection");
        Ok(())
    }

    fn load(&self) -> Result<BillBook> {
        if !self.bills_file.exists() {
            return Ok(BillBook::new());
        }
        load_book_from_path(&self.bills_file)
    }

    fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            let file_name = match path.file_name().and_then(|stem| stem.to_str()) {
                Some(name) => name.to_string(),
                None => continue,
            };
            entries.push(file_name);
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }

    fn backup(&self, book: &BillBook, note: Option<&str>) -> Result<()> {
        self.write_backup_file(book, note)
    }

    fn restore(&self, backup_name: &str) -> Result<BillBook> {
        let backup_path = self.backup_path(backup_name);
        if !backup_path.exists() {
            return Err(BillError::Storage(format!(
                "backup `{}` not found",
                backup_name
            )));
        }
        fs::copy(&backup_path, &self.bills_file)?;
        load_book_from_path(&self.bills_file)
    }
}

pub fn save_book_to_path(book: &BillBook, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let json = serde_json::to_string_pretty(book)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_book_from_path(path: &Path) -> Result<BillBook> {
    let data = fs::read_to_string(path)?;
    let book: BillBook = serde_json::from_str(&data)?;
    if book.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(BillError::Storage(format!(
            "bill collection `{}` is from a newer schema version",
            path.display()
        )));
    }
    Ok(book)
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if ch.is_whitespace() || matches!(ch, '-' | '.') {
            if !sanitized.is_empty() && !last_dash {
                sanitized.push('-');
                last_dash = true;
            }
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_suffix(&format!(".{}", BACKUP_EXTENSION))?;
    let segments: Vec<&str> = trimmed.split('_').collect();
    if segments.len() < 3 {
        return None;
    }
    let date_part = segments.get(1)?;
    let time_part = segments.get(2)?;
    if !is_digits(date_part, 8) || !is_digits(time_part, 4) {
        return None;
    }
    let raw = format!("{}{}", date_part, time_part);
    NaiveDateTime::parse_from_str(&raw, "%Y%m%d%H%M")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
