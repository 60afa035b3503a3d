//! Notebook metadata and the durable canvas snapshot.

use crate::snapshot::RasterSnapshot;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

#[cfg(target_arch = "wasm32")]
use web_time::{SystemTime, UNIX_EPOCH};

/// Paper style of a notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotebookKind {
    #[default]
    Blank,
    Lined,
    Grid,
    Dotted,
}

impl NotebookKind {
    pub const ALL: [NotebookKind; 4] = [
        NotebookKind::Blank,
        NotebookKind::Lined,
        NotebookKind::Grid,
        NotebookKind::Dotted,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NotebookKind::Blank => "blank",
            NotebookKind::Lined => "lined",
            NotebookKind::Grid => "grid",
            NotebookKind::Dotted => "dotted",
        }
    }

    /// Human-readable name for pickers.
    pub fn label(self) -> &'static str {
        match self {
            NotebookKind::Blank => "Blank",
            NotebookKind::Lined => "Lined Paper",
            NotebookKind::Grid => "Grid Paper",
            NotebookKind::Dotted => "Dotted Paper",
        }
    }
}

impl FromStr for NotebookKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NotebookKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown notebook type: {s}"))
    }
}

/// A named document owning one persisted drawing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NotebookKind,
    /// Milliseconds since the Unix epoch.
    pub created_at: u64,
    /// Milliseconds since the Unix epoch.
    pub updated_at: u64,
    /// Last saved surface, absent until the first save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canvas_data: Option<RasterSnapshot>,
}

impl Notebook {
    /// Create a notebook with a fresh id and no drawing.
    pub fn new(name: impl Into<String>, kind: NotebookKind) -> Self {
        let now = now_millis();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            kind,
            created_at: now,
            updated_at: now,
            canvas_data: None,
        }
    }

    /// Notebooks a first-time user starts with.
    pub fn defaults() -> Vec<Notebook> {
        vec![
            Notebook::new("Class Notes", NotebookKind::Blank),
            Notebook::new("Meeting Notes", NotebookKind::Lined),
            Notebook::new("Ideas and Sketches", NotebookKind::Blank),
        ]
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notebook_has_no_canvas() {
        let notebook = Notebook::new("Physics", NotebookKind::Grid);
        assert_eq!(notebook.name, "Physics");
        assert_eq!(notebook.kind, NotebookKind::Grid);
        assert!(notebook.canvas_data.is_none());
        assert_eq!(notebook.created_at, notebook.updated_at);
        assert!(Uuid::parse_str(&notebook.id).is_ok());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Notebook::new("a", NotebookKind::Blank);
        let b = Notebook::new("a", NotebookKind::Blank);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_parse_and_label() {
        assert_eq!("dotted".parse::<NotebookKind>(), Ok(NotebookKind::Dotted));
        assert!("squared".parse::<NotebookKind>().is_err());
        assert_eq!(NotebookKind::Lined.label(), "Lined Paper");
    }

    #[test]
    fn test_json_shape() {
        let mut notebook = Notebook::new("Ideas", NotebookKind::Lined);
        let json = serde_json::to_value(&notebook).unwrap();
        assert_eq!(json["type"], "lined");
        assert!(json.get("canvasData").is_none());
        assert!(json.get("createdAt").is_some());

        notebook.canvas_data = Some(RasterSnapshot::from_data_url("data:image/png;base64,AA"));
        let text = serde_json::to_string(&notebook).unwrap();
        let back: Notebook = serde_json::from_str(&text).unwrap();
        assert_eq!(back, notebook);
    }

    #[test]
    fn test_defaults() {
        let names: Vec<_> = Notebook::defaults().into_iter().map(|n| n.name).collect();
        assert_eq!(names, ["Class Notes", "Meeting Notes", "Ideas and Sketches"]);
    }
}
