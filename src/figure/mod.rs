pub(crate) mod assembler;
pub(crate) mod ease;
pub(crate) mod fingerprint;
pub(crate) mod model;
