pub(crate) mod build;
pub(crate) mod driver;
pub(crate) mod model;
