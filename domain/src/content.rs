//! Ticket descriptions as a tree of content nodes.
//!
//! A description is either a single leaf (text, image, video) or a composite
//! grouping other nodes in insertion order. Composites own their children, so
//! a tree can never contain itself.

use crate::error::DomainError;
use crate::export::Exporter;
use serde::{Deserialize, Serialize};

/// One node of a ticket description
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentNode {
    /// Plain text
    Text {
        /// Raw text
        text: String,
    },
    /// Screenshot or other image
    Image {
        /// Location of the image file
        path: String,
        /// Optional caption; empty when absent
        caption: String,
    },
    /// Screen recording or other video
    Video {
        /// Location of the video file
        path: String,
        /// Length in seconds; zero when unknown
        duration_seconds: u32,
    },
    /// Ordered group of nodes
    Composite {
        /// Children in insertion order
        children: Vec<ContentNode>,
    },
}

impl ContentNode {
    /// Text leaf
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Image leaf
    #[must_use]
    pub fn image(path: impl Into<String>, caption: impl Into<String>) -> Self {
        Self::Image {
            path: path.into(),
            caption: caption.into(),
        }
    }

    /// Video leaf
    #[must_use]
    pub fn video(path: impl Into<String>, duration_seconds: u32) -> Self {
        Self::Video {
            path: path.into(),
            duration_seconds,
        }
    }

    /// Composite over `children`, kept in the given order
    #[must_use]
    pub fn composite(children: impl IntoIterator<Item = ContentNode>) -> Self {
        Self::Composite {
            children: children.into_iter().collect(),
        }
    }

    /// Appends `child` to a composite
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidArgument`] when `self` is a leaf.
    pub fn push(&mut self, child: ContentNode) -> Result<(), DomainError> {
        match self {
            Self::Composite { children } => {
                children.push(child);
                Ok(())
            }
            _ => Err(DomainError::invalid_argument(
                "only composite content can hold children",
            )),
        }
    }

    /// Number of immediate children (zero for leaves)
    #[must_use]
    pub fn child_count(&self) -> usize {
        match self {
            Self::Composite { children } => children.len(),
            _ => 0,
        }
    }

    /// Number of leaves in the whole tree
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Composite { children } => children.iter().map(Self::leaf_count).sum(),
            _ => 1,
        }
    }

    /// Human-readable rendering used by consoles and logs
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Text { text } => format!("[TEXTE] {text}"),
            Self::Image { path, caption } => {
                if caption.is_empty() {
                    format!("[IMAGE] {path}")
                } else {
                    format!("[IMAGE] {path} - {caption}")
                }
            }
            Self::Video {
                path,
                duration_seconds,
            } => {
                if *duration_seconds > 0 {
                    format!(
                        "[VIDEO] {path} ({}:{:02})",
                        duration_seconds / 60,
                        duration_seconds % 60
                    )
                } else {
                    format!("[VIDEO] {path}")
                }
            }
            Self::Composite { children } => {
                let mut out = format!("[COMPOSITE - {} element(s)]\n", children.len());
                for child in children {
                    out.push_str("  ");
                    out.push_str(&child.display());
                    out.push('\n');
                }
                out
            }
        }
    }

    /// Renders this node with `exporter`
    #[must_use]
    pub fn accept(&self, exporter: &dyn Exporter) -> String {
        exporter.render(self)
    }

    /// Builds a tree from a flat item list
    ///
    /// No items yields an empty text leaf, one item a leaf, several items a
    /// composite in list order. Items of an unrecognised kind become empty
    /// text leaves.
    #[must_use]
    pub fn from_items(items: &[ContentItem]) -> Self {
        match items {
            [] => Self::text(""),
            [single] => single.to_node(),
            many => Self::composite(many.iter().map(ContentItem::to_node)),
        }
    }

    /// Flattens the tree back into items, leaves in traversal order
    #[must_use]
    pub fn to_items(&self) -> Vec<ContentItem> {
        let mut items = Vec::with_capacity(self.leaf_count());
        self.collect_items(&mut items);
        items
    }

    fn collect_items(&self, items: &mut Vec<ContentItem>) {
        match self {
            Self::Text { text } => items.push(ContentItem::new(ContentKind::Text, text.clone(), None)),
            Self::Image { path, caption } => items.push(ContentItem::new(
                ContentKind::Image,
                path.clone(),
                (!caption.is_empty()).then(|| caption.clone()),
            )),
            Self::Video {
                path,
                duration_seconds,
            } => items.push(ContentItem::new(
                ContentKind::Video,
                path.clone(),
                Some(duration_seconds.to_string()),
            )),
            Self::Composite { children } => {
                for child in children {
                    child.collect_items(items);
                }
            }
        }
    }
}

impl Default for ContentNode {
    fn default() -> Self {
        Self::text("")
    }
}

/// Kind of a flat content item
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentKind {
    /// Text leaf
    #[serde(alias = "text")]
    Text,
    /// Image leaf
    #[serde(alias = "image")]
    Image,
    /// Video leaf
    #[serde(alias = "video")]
    Video,
    /// Anything else received on the wire
    #[serde(other)]
    Unknown,
}

/// Flat, typed content item exchanged with clients
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// What the item describes
    #[serde(rename = "type")]
    pub kind: ContentKind,
    /// Text body, or file path for media
    #[serde(default)]
    pub data: String,
    /// Caption for images, duration in seconds for videos
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
}

impl ContentItem {
    /// New item
    #[must_use]
    pub fn new(kind: ContentKind, data: impl Into<String>, metadata: Option<String>) -> Self {
        Self {
            kind,
            data: data.into(),
            metadata,
        }
    }

    /// Converts this item to a leaf node
    #[must_use]
    pub fn to_node(&self) -> ContentNode {
        match self.kind {
            ContentKind::Text => ContentNode::text(self.data.clone()),
            ContentKind::Image => {
                ContentNode::image(self.data.clone(), self.metadata.clone().unwrap_or_default())
            }
            ContentKind::Video => {
                let duration = self
                    .metadata
                    .as_deref()
                    .and_then(|m| m.trim().parse::<u32>().ok())
                    .unwrap_or(0);
                ContentNode::video(self.data.clone(), duration)
            }
            ContentKind::Unknown => ContentNode::text(""),
        }
    }
}
