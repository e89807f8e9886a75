//! Pure data structures: the persisted [`Product`] and the editable [`Draft`].

pub mod draft;
pub mod product;

pub use draft::*;
pub use product::*;
