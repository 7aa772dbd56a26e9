pub mod api;
pub mod catalog;
pub mod scrape;

pub mod util {
    pub mod env;
}
