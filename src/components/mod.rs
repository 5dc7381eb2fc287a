pub mod app;
pub mod dataset_nav;
pub mod header;

pub use app::App;
