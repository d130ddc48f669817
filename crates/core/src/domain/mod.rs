pub mod advice;
pub mod contract;
pub mod forecast;
