pub(crate) mod edges;
