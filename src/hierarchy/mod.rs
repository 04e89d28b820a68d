pub(crate) mod builder;
pub(crate) mod raw;
pub(crate) mod tree;
