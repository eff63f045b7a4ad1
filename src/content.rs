//! Content items stored as Markdown files with YAML frontmatter.
//!
//! The content root holds one directory per [`ContentKind`]; every `.md` or
//! `.mdx` file in it is an item whose slug is the file name without its
//! extension.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::block::Block;
use crate::parser::parse;

const FRONTMATTER_MARKER: &str = "---";
const EXTENSIONS: [&str; 2] = ["mdx", "md"];

#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("frontmatter is not closed by a `---` line")]
    Unterminated,

    #[error("invalid frontmatter: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to load {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
}

/// The three families of content the site publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Projects,
    Blog,
    Tutorials,
}

impl ContentKind {
    pub fn dir_name(self) -> &'static str {
        match self {
            ContentKind::Projects => "projects",
            ContentKind::Blog => "blog",
            ContentKind::Tutorials => "tutorials",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Frontmatter fields shared by every content kind.
pub trait Metadata: DeserializeOwned {
    fn title(&self) -> &str;
    fn slug(&self) -> &str;
    fn set_slug(&mut self, slug: String);
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectMetadata {
    pub title: String,
    pub description: String,
    pub image: String,
    pub technologies: Vec<String>,
    pub category: String,
    pub featured: bool,
    pub date: String,
    pub github: Option<String>,
    pub demo: Option<String>,
    #[serde(skip)]
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogMetadata {
    pub title: String,
    pub description: String,
    pub date: String,
    pub author: String,
    pub image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub reading_time: Option<u32>,
    #[serde(skip)]
    pub slug: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Difficulty {
    #[serde(rename = "Débutant")]
    Beginner,
    #[serde(rename = "Intermédiaire")]
    Intermediate,
    #[serde(rename = "Avancé")]
    Advanced,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TutorialMetadata {
    pub title: String,
    pub description: String,
    pub difficulty: Option<Difficulty>,
    pub duration: String,
    pub technologies: Vec<String>,
    pub category: String,
    pub date: String,
    pub image: Option<String>,
    #[serde(skip)]
    pub slug: String,
}

macro_rules! impl_metadata {
    ($($ty:ty),*) => {
        $(impl Metadata for $ty {
            fn title(&self) -> &str {
                &self.title
            }

            fn slug(&self) -> &str {
                &self.slug
            }

            fn set_slug(&mut self, slug: String) {
                self.slug = slug;
            }
        })*
    };
}

impl_metadata!(ProjectMetadata, BlogMetadata, TutorialMetadata);

/// A loaded content item: its metadata and the Markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem<T> {
    pub metadata: T,
    pub body: String,
}

impl<T> ContentItem<T> {
    pub fn blocks(&self) -> Vec<Block> {
        parse(&self.body)
    }
}

/// Split a source file into its YAML frontmatter and body.
///
/// The frontmatter must open on the first line with `---` and close with the
/// next `---` line. Files without an opening marker are all body.
pub fn split_frontmatter(source: &str) -> Result<(Option<&str>, &str), FrontmatterError> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let Some(after_marker) = source.strip_prefix(FRONTMATTER_MARKER) else {
        return Ok((None, source));
    };
    let Some(rest) = after_marker
        .strip_prefix("\r\n")
        .or_else(|| after_marker.strip_prefix('\n'))
    else {
        return Ok((None, source));
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONTMATTER_MARKER {
            return Ok((Some(&rest[..offset]), &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    Err(FrontmatterError::Unterminated)
}

/// Build an item from a source file. The slug always comes from the caller.
pub fn parse_item<T: Metadata>(slug: &str, source: &str) -> Result<ContentItem<T>, FrontmatterError> {
    let (yaml, body) = split_frontmatter(source)?;
    let yaml = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => yaml,
        _ => "{}",
    };
    let mut metadata: T = serde_yaml::from_str(yaml)?;
    metadata.set_slug(slug.to_string());
    Ok(ContentItem {
        metadata,
        body: body.to_string(),
    })
}

/// `post.mdx` -> `post`; `None` for anything that is not a content file.
pub fn slug_from_file_name(file_name: &str) -> Option<&str> {
    EXTENSIONS.iter().find_map(|ext| {
        file_name
            .strip_suffix(ext)
            .and_then(|stem| stem.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
    })
}

/// Content items under a root directory.
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn kind_dir(&self, kind: ContentKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Metadata of every item of `kind`, sorted by slug.
    ///
    /// A missing directory is an empty collection.
    pub fn list<T: Metadata>(&self, kind: ContentKind) -> Result<Vec<T>, ContentError> {
        let dir = self.kind_dir(kind);
        if !dir.is_dir() {
            log::warn!("content directory {} does not exist", dir.display());
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir).map_err(|source| ContentError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut items = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| ContentError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            let file_name = entry.file_name();
            let Some(slug) = file_name.to_str().and_then(slug_from_file_name) else {
                log::debug!("skipping {}", path.display());
                continue;
            };
            if !path.is_file() {
                continue;
            }
            let item: ContentItem<T> = load_file(&path, slug)?;
            items.push(item.metadata);
        }

        items.sort_by(|a, b| a.slug().cmp(b.slug()));
        log::debug!("loaded {} {} items", items.len(), kind);
        Ok(items)
    }

    /// Look up one item, preferring `{slug}.mdx` over `{slug}.md`.
    pub fn get<T: Metadata>(
        &self,
        kind: ContentKind,
        slug: &str,
    ) -> Result<Option<ContentItem<T>>, ContentError> {
        let dir = self.kind_dir(kind);
        let Some(path) = EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{slug}.{ext}")))
            .find(|path| path.is_file())
        else {
            log::debug!("no {kind} item named {slug}");
            return Ok(None);
        };

        load_file(&path, slug).map(Some)
    }
}

fn load_file<T: Metadata>(path: &Path, slug: &str) -> Result<ContentItem<T>, ContentError> {
    let source = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_item(slug, &source).map_err(|source| ContentError::Frontmatter {
        path: path.to_path_buf(),
        source,
    })
}
