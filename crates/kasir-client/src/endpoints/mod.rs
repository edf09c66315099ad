//! Endpoint groups, one per backend resource family.
//!
//! Mirrors a repository layer: `client.inventory().fetch(..)`,
//! `client.transactions().create(..)`, each group a thin borrow of the
//! shared [`ApiClient`](crate::ApiClient).

pub mod auth;
pub mod inventory;
pub mod items;
pub mod transactions;
pub mod transfers;
