pub mod download;
pub mod page;
pub mod recognize;
pub mod reset;
pub mod upload;
