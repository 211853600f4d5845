//! Collection item types

use serde::{Deserialize, Serialize};

use super::Variable;
use crate::auth::AuthConfig;
use crate::id::generate_id;
use crate::request::HttpRequest;

/// A named request inside a collection tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// The owned request
    pub request: HttpRequest,
}

impl RequestItem {
    /// Wraps a request, reusing its name and generating a new item id.
    #[must_use]
    pub fn new(request: HttpRequest) -> Self {
        Self {
            id: generate_id(),
            name: request.name.clone(),
            request,
        }
    }
}

/// A folder containing requests and other folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// Unique identifier
    pub id: String,
    /// Folder name
    pub name: String,
    /// Description, empty when absent
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Items in this folder
    #[serde(default)]
    pub items: Vec<CollectionItem>,
}

impl Folder {
    /// Creates a new empty folder.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            description: String::new(),
            items: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the child items.
    #[must_use]
    pub fn with_items(mut self, items: Vec<CollectionItem>) -> Self {
        self.items = items;
        self
    }
}

/// An item in a collection (either a folder or a request).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CollectionItem {
    /// A folder containing other items
    Folder(Folder),
    /// A request
    Request(RequestItem),
}

impl CollectionItem {
    /// Returns the ID of this item.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Folder(f) => &f.id,
            Self::Request(r) => &r.id,
        }
    }

    /// Returns the name of this item.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Folder(f) => &f.name,
            Self::Request(r) => &r.name,
        }
    }

    /// Returns true if this item is a folder.
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    fn clear_ids(&mut self) {
        match self {
            Self::Folder(folder) => {
                folder.id.clear();
                folder.items.iter_mut().for_each(Self::clear_ids);
            }
            Self::Request(item) => {
                item.id.clear();
                item.request.id.clear();
            }
        }
    }
}

impl From<HttpRequest> for CollectionItem {
    fn from(request: HttpRequest) -> Self {
        Self::Request(RequestItem::new(request))
    }
}

impl From<Folder> for CollectionItem {
    fn from(folder: Folder) -> Self {
        Self::Folder(folder)
    }
}

/// A collection of requests organized in folders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestCollection {
    /// Unique identifier
    pub id: String,
    /// Collection name
    pub name: String,
    /// Description, empty when absent
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Items in this collection
    #[serde(default)]
    pub items: Vec<CollectionItem>,
    /// Collection variables
    #[serde(default)]
    pub variables: Vec<Variable>,
    /// Collection-level authentication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<AuthConfig>,
}

impl RequestCollection {
    /// Creates a new empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            description: String::new(),
            items: Vec::new(),
            variables: Vec::new(),
            auth: None,
        }
    }

    /// Adds an item to the collection root.
    pub fn add_item(&mut self, item: impl Into<CollectionItem>) {
        self.items.push(item.into());
    }

    /// Returns the total number of requests in the collection (recursive).
    #[must_use]
    pub fn request_count(&self) -> usize {
        fn count_in_items(items: &[CollectionItem]) -> usize {
            items.iter().fold(0, |acc, item| {
                acc + match item {
                    CollectionItem::Request(_) => 1,
                    CollectionItem::Folder(f) => count_in_items(&f.items),
                }
            })
        }
        count_in_items(&self.items)
    }

    /// Returns the total number of folders in the collection (recursive).
    #[must_use]
    pub fn folder_count(&self) -> usize {
        fn count_in_items(items: &[CollectionItem]) -> usize {
            items.iter().fold(0, |acc, item| {
                acc + match item {
                    CollectionItem::Request(_) => 0,
                    CollectionItem::Folder(f) => 1 + count_in_items(&f.items),
                }
            })
        }
        count_in_items(&self.items)
    }

    /// Returns every request in depth-first order.
    #[must_use]
    pub fn requests(&self) -> Vec<&HttpRequest> {
        fn collect<'a>(items: &'a [CollectionItem], out: &mut Vec<&'a HttpRequest>) {
            for item in items {
                match item {
                    CollectionItem::Request(r) => out.push(&r.request),
                    CollectionItem::Folder(f) => collect(&f.items, out),
                }
            }
        }
        let mut out = Vec::new();
        collect(&self.items, &mut out);
        out
    }

    /// Returns a copy of this tree with every item, request and collection id
    /// cleared. Variable ids are kept since they survive a round trip.
    #[must_use]
    pub fn without_ids(&self) -> Self {
        let mut copy = self.clone();
        copy.id.clear();
        copy.items.iter_mut().for_each(CollectionItem::clear_ids);
        copy
    }

    /// Compares two trees ignoring generated ids.
    #[must_use]
    pub fn structurally_eq(&self, other: &Self) -> bool {
        self.without_ids() == other.without_ids()
    }
}

impl Default for RequestCollection {
    fn default() -> Self {
        Self::new("New Collection")
    }
}
