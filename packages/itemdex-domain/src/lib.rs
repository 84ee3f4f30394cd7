pub mod content;
pub mod definition;
pub mod document;
pub mod filter;
pub mod reserved;

pub use content::{BodyOfKnowledge, Content, ItemContent, PagedResult, ResourceLink};
pub use document::ItemDoc;
pub use filter::FilterSpec;
