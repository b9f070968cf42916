pub mod cadences;
pub mod check;
pub mod complete;
pub mod create;
pub mod tasks;
