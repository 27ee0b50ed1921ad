pub mod image_proxy;
pub mod search;
pub mod stats;

#[cfg(test)]
mod stats_http_tests;

#[cfg(test)]
mod search_http_tests;

#[cfg(test)]
mod image_proxy_http_tests;

pub use image_proxy::configure_image_proxy_routes;
pub use search::configure_search_routes;
pub use stats::configure_stats_routes;
