pub mod crawl;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod frontier;
pub mod parse;
pub mod paths;
pub mod presets;
pub mod scope;

pub use crawl::{CrawlConfig, CrawlConfigBuilder, CrawlReport, Crawler, FailedFetch, crawl};
pub use document::ExtractedDocument;
pub use error::{MirrorError, Result};
pub use extract::{
    DEFAULT_CONTENT_SELECTOR, ExtractConfig, ExtractReport, FailedFile, HtmlTree, clear_output_dir, extract_all,
    extract_document, extract_file, html_files,
};
pub use fetch::{FetchConfig, Fetcher, fetch_file};
#[doc(hidden)]
pub use frontier::Frontier;
pub use parse::{Document, Element};
pub use paths::{flattened_name, local_path};
pub use presets::Preset;
pub use scope::{CrawlScope, normalize, resolve};
