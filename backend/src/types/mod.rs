pub mod content_type;
pub mod id;

pub use content_type::{ContentType, ContentTypeSlug};
pub use id::{ChangeLogId, ContentId};
