//! CLI command implementations.

pub(crate) mod content;
pub(crate) mod snapshot;

pub(crate) use content::{MenuArgs, PostArgs, PostsArgs, RewriteUrlArgs};
pub(crate) use snapshot::SnapshotArgs;
