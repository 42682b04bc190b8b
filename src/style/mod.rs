pub(crate) mod marker;
pub(crate) mod palette;
