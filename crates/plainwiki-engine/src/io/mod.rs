use crate::models::{Page, Title};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// Extension of every page file
pub const PAGE_EXTENSION: &str = ".txt";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Page not found: {0}")]
    NotFound(Title),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid pages directory: {0}")]
    InvalidPagesDir(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

/// One file per page in a single flat directory.
///
/// No locking: two saves of the same title race and the last completed
/// write wins.
#[derive(Debug, Clone)]
pub struct PageStore {
    pages_root: PathBuf,
}

impl PageStore {
    pub fn new(pages_root: impl Into<PathBuf>) -> Self {
        Self {
            pages_root: pages_root.into(),
        }
    }

    pub fn pages_root(&self) -> &Path {
        &self.pages_root
    }

    /// Location of the file holding `title`
    pub fn page_path(&self, title: &Title) -> PathBuf {
        self.pages_root.join(format!("{}{}", title.as_str(), PAGE_EXTENSION))
    }

    /// Write the page body, replacing any previous content.
    ///
    /// New files are created readable and writable by the owner only.
    pub fn save(&self, page: &Page) -> Result<(), StoreError> {
        let path = self.page_path(page.title());

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&path)?;
        file.write_all(page.body())?;
        log::info!("Saved page {} ({} bytes)", page.title(), page.body().len());
        Ok(())
    }

    /// Read the page stored under `title`
    pub fn load(&self, title: &Title) -> Result<Page, StoreError> {
        match fs::read(self.page_path(title)) {
            Ok(body) => Ok(Page::new(title.clone(), body)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(title.clone())),
            Err(e) => Err(StoreError::Io(e)),
        }
    }

    /// Titles of every regular page file, in directory order
    pub fn list_titles(&self) -> Result<Vec<String>, StoreError> {
        let mut titles = Vec::new();

        for entry in fs::read_dir(&self.pages_root)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            if let Some(title) = name
                .to_str()
                .and_then(|name| name.strip_suffix(PAGE_EXTENSION))
            {
                titles.push(title.to_string());
            }
        }

        Ok(titles)
    }
}

pub fn validate_pages_dir(path: &Path) -> Result<(), StoreError> {
    if !path.exists() || !path.is_dir() {
        return Err(StoreError::InvalidPagesDir(format!(
            "Directory does not exist: {}",
            path.display()
        )));
    }

    Ok(())
}
