pub(crate) mod builder;
pub(crate) mod snapshot;
