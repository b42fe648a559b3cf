pub mod export;
pub mod forecast;
pub mod route;
pub mod summary;
pub mod timeline;
pub mod trip;
pub mod weather;
