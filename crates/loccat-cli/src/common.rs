//! Manifest and source-tree plumbing shared by the subcommands.

use std::path::{Path, PathBuf};

use loccat::{LoadOutcome, Loader, Manifest};
use unic_langid::LanguageIdentifier;

use crate::error::CliError;

#[derive(clap::Args, Debug)]
pub struct CatalogArgs {
    /// Path to the index manifest
    #[arg(short, long, default_value = "index.json")]
    pub manifest: PathBuf,

    /// Directory containing the source files (defaults to the manifest's directory)
    #[arg(short, long)]
    pub root: Option<PathBuf>,
}

impl CatalogArgs {
    pub fn load(&self, loader: &Loader) -> Result<LoadOutcome, CliError> {
        let content = fs_err::read_to_string(&self.manifest)?;
        let manifest = Manifest::from_json(&content)?;
        Ok(loader.load_dir(&manifest, &self.source_root()))
    }

    fn source_root(&self) -> PathBuf {
        if let Some(root) = &self.root {
            return root.clone();
        }
        self.manifest
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

pub fn parse_locale(tag: &str) -> Result<LanguageIdentifier, CliError> {
    tag.parse()
        .map_err(|_| CliError::InvalidLocale(tag.to_owned()))
}
