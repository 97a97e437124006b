/// Output rendering — the plain-text report plus machine-readable exports.
pub mod export;
pub mod size;
pub mod text;
