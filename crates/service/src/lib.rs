//! Service layer exposing product CRUD on top of `models`.
//! - `products::repository` is the persistence seam (trait + SeaORM implementation).
//! - `products::service::ProductsService` is the stateless façade callers use.

pub mod errors;
pub mod products;
#[cfg(test)]
pub mod test_support;
