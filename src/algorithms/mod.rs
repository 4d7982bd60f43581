pub mod d_star_lite;
pub mod lpa_star;

pub use d_star_lite::DStarLite;
pub use lpa_star::LPAStar;
