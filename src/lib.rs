pub mod api;
pub mod editor;
pub mod entities;
pub mod error;
pub mod external;
pub mod session;
pub mod store;

#[cfg(test)]
pub(crate) mod testing;
