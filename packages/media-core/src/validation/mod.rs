pub mod url;

pub use url::require_url;
