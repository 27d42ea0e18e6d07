pub(crate) mod announcement;
pub(crate) mod model;
pub(crate) mod showcase;
pub(crate) mod slides;
