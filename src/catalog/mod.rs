//! # Edition Catalog
//!
//! Read-only lookup from an order item to the physical book it describes.
//!
//! The catalog is built once at start-up from two JSON documents and is never
//! mutated afterwards; the pipeline shares it behind an `Arc`.
//!
//! - **Editions** resolve `lang/document_id/edition_type` to an [`Edition`]
//!   (title, hosting path, asset filename stem).
//! - **Metadata** resolves an edition path to its [`EditionMeta`] (paperback
//!   size and per-volume page counts).

pub mod sizing;

pub use sizing::{pod_package_id, PrintSize};

use crate::model::{EditionType, Lang, OrderItem};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Edition {0} has no paperback volumes")]
    NoVolumes(String),
}

/// Catalog key for one edition of one document in one language.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EditionKey {
    pub lang: Lang,
    pub document_id: String,
    pub edition_type: EditionType,
}

impl EditionKey {
    pub fn new(lang: Lang, document_id: impl Into<String>, edition_type: EditionType) -> Self {
        Self {
            lang,
            document_id: document_id.into(),
            edition_type,
        }
    }
}

impl From<&OrderItem> for EditionKey {
    fn from(item: &OrderItem) -> Self {
        Self::new(item.lang, item.document_id.clone(), item.edition_type)
    }
}

impl Display for EditionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.lang, self.document_id, self.edition_type)
    }
}

/// Print assets hosted for every edition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Asset {
    Cover,
    Interior,
}

impl Asset {
    fn suffix(self) -> &'static str {
        match self {
            Self::Cover => "cover",
            Self::Interior => "interior",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edition {
    /// Hosting path, e.g. `en/george-fox/journal/updated`.
    pub path: String,
    pub document_title: String,
    pub filename_stem: String,
}

impl Edition {
    /// Asset filename; `volume` is only given for multi-volume editions.
    pub fn filename(&self, asset: Asset, volume: Option<usize>) -> String {
        match volume {
            Some(vol) => format!("{}--{}--v{}.pdf", self.filename_stem, asset.suffix(), vol),
            None => format!("{}--{}.pdf", self.filename_stem, asset.suffix()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaperbackMeta {
    pub size: PrintSize,
    /// Page count of each physical volume.
    pub volumes: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EditionMeta {
    pub paperback: PaperbackMeta,
}

// --- on-disk shapes ---

#[derive(Debug, Deserialize)]
struct FriendEntry {
    lang: Lang,
    documents: Vec<DocumentEntry>,
}

#[derive(Debug, Deserialize)]
struct DocumentEntry {
    id: String,
    title: String,
    editions: Vec<EditionEntry>,
}

#[derive(Debug, Deserialize)]
struct EditionEntry {
    #[serde(rename = "type")]
    edition_type: EditionType,
    path: String,
    filename_stem: String,
}

/// Immutable edition lookup shared by every payload built in a run.
#[derive(Debug, Default)]
pub struct Catalog {
    editions: HashMap<EditionKey, Edition>,
    meta: HashMap<String, EditionMeta>,
}

impl Catalog {
    pub fn new(
        editions: impl IntoIterator<Item = (EditionKey, Edition)>,
        meta: impl IntoIterator<Item = (String, EditionMeta)>,
    ) -> Self {
        Self {
            editions: editions.into_iter().collect(),
            meta: meta.into_iter().collect(),
        }
    }

    /// Loads the editions and metadata documents.
    pub fn from_json_files(
        editions_path: impl AsRef<Path>,
        meta_path: impl AsRef<Path>,
    ) -> Result<Self, CatalogError> {
        let (editions_path, meta_path) = (editions_path.as_ref(), meta_path.as_ref());
        let friends = parse(&read_file(editions_path)?, editions_path)?;
        let meta = parse(&read_file(meta_path)?, meta_path)?;
        Self::assemble(friends, meta)
    }

    /// Parses both documents from memory.
    pub fn from_json_str(editions_json: &str, meta_json: &str) -> Result<Self, CatalogError> {
        let friends = parse(editions_json, Path::new("<editions>"))?;
        let meta = parse(meta_json, Path::new("<metadata>"))?;
        Self::assemble(friends, meta)
    }

    fn assemble(
        friends: Vec<FriendEntry>,
        meta: HashMap<String, EditionMeta>,
    ) -> Result<Self, CatalogError> {
        if let Some((path, _)) = meta.iter().find(|(_, m)| m.paperback.volumes.is_empty()) {
            return Err(CatalogError::NoVolumes(path.clone()));
        }

        let editions = friends.into_iter().flat_map(|friend| {
            let lang = friend.lang;
            friend.documents.into_iter().flat_map(move |doc| {
                let title = doc.title;
                let id = doc.id;
                doc.editions.into_iter().map(move |ed| {
                    (
                        EditionKey::new(lang, id.clone(), ed.edition_type),
                        Edition {
                            path: ed.path,
                            document_title: title.clone(),
                            filename_stem: ed.filename_stem,
                        },
                    )
                })
            })
        });

        Ok(Self::new(editions, meta))
    }

    pub fn edition(&self, key: &EditionKey) -> Option<&Edition> {
        self.editions.get(key)
    }

    pub fn meta(&self, edition_path: &str) -> Option<&EditionMeta> {
        self.meta.get(edition_path)
    }

    pub fn len(&self) -> usize {
        self.editions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editions.is_empty()
    }
}

fn parse<T: serde::de::DeserializeOwned>(json: &str, path: &Path) -> Result<T, CatalogError> {
    serde_json::from_str(json).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })
}
