//! Data contract for products: the SeaORM entity plus creation and patch inputs.

pub mod db;
pub mod product;
