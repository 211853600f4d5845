//! Collection tree types

mod item;
mod variable;

pub use item::{CollectionItem, Folder, RequestCollection, RequestItem};
pub use variable::{Variable, VariableType};
