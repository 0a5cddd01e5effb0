pub mod audit;
pub mod cache;
pub mod catalog;
pub mod rates;
