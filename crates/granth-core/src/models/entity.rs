use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Combo, Paper, PdfDocument, SubFolder, Tab};

/// Every kind of record the catalog store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    Paper,
    Tab,
    SubFolder,
    Pdf,
    Combo,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Paper => "paper",
            Self::Tab => "tab",
            Self::SubFolder => "sub-folder",
            Self::Pdf => "pdf",
            Self::Combo => "combo",
        };
        f.write_str(s)
    }
}

/// The three kinds that hang below a parent in the paper tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildKind {
    /// Children of a paper.
    Tab,
    /// Children of a tab.
    SubFolder,
    /// Children of a sub-folder.
    Pdf,
}

impl ChildKind {
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::Tab => EntityKind::Tab,
            Self::SubFolder => EntityKind::SubFolder,
            Self::Pdf => EntityKind::Pdf,
        }
    }

    pub fn parent_kind(self) -> EntityKind {
        match self {
            Self::Tab => EntityKind::Paper,
            Self::SubFolder => EntityKind::Tab,
            Self::Pdf => EntityKind::SubFolder,
        }
    }
}

impl fmt::Display for ChildKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.entity_kind().fmt(f)
    }
}

/// A record read from the store, tagged by kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "record", rename_all = "kebab-case")]
pub enum CatalogEntity {
    Paper(Paper),
    Tab(Tab),
    SubFolder(SubFolder),
    Pdf(PdfDocument),
    Combo(Combo),
}

impl CatalogEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Paper(_) => EntityKind::Paper,
            Self::Tab(_) => EntityKind::Tab,
            Self::SubFolder(_) => EntityKind::SubFolder,
            Self::Pdf(_) => EntityKind::Pdf,
            Self::Combo(_) => EntityKind::Combo,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Paper(p) => &p.id,
            Self::Tab(t) => &t.id,
            Self::SubFolder(s) => &s.id,
            Self::Pdf(p) => &p.id,
            Self::Combo(c) => &c.id,
        }
    }

    pub fn into_paper(self) -> Option<Paper> {
        match self {
            Self::Paper(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_tab(self) -> Option<Tab> {
        match self {
            Self::Tab(t) => Some(t),
            _ => None,
        }
    }

    pub fn into_sub_folder(self) -> Option<SubFolder> {
        match self {
            Self::SubFolder(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_pdf(self) -> Option<PdfDocument> {
        match self {
            Self::Pdf(p) => Some(p),
            _ => None,
        }
    }

    pub fn into_combo(self) -> Option<Combo> {
        match self {
            Self::Combo(c) => Some(c),
            _ => None,
        }
    }
}
