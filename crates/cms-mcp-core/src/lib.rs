pub mod client;
pub mod content;
pub mod error;
pub mod invocation;
pub mod types;

// Re-export commonly used types
pub use client::{
    AiActionInvoker, Archivable, BulkPublishable, CmsClient, EntityReader, Publishable,
    SpaceContent,
};
pub use content::{ContentCollection, Page};
pub use error::{CoreError, CoreResult};
pub use invocation::{
    AiActionInvocationRequest, AiActionVariable, Invocation, InvocationResult, InvocationStatus,
    OutputFormat,
};
pub use types::{
    BulkAction, BulkActionStatus, BulkOperation, EntitiesCollection, EntityKind, EntityLink,
    LinkMode, SpaceScope, MAX_BULK_ENTITIES,
};
