pub(crate) mod stagger;
pub(crate) mod typing;
