mod load;
mod model;
mod parse;
mod search;

pub use load::load_catalog;
pub use model::{AlbumId, Catalog};
pub use search::{SearchHit, search};

#[cfg(test)]
pub use model::{Album, Group};
#[cfg(test)]
pub use parse::parse_catalog;
