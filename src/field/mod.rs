pub(crate) mod buffer;
pub(crate) mod iterator;
