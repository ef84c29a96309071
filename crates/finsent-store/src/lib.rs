//! CSV persistence and cleaning for collected articles.
//!
//! Raw articles are appended per company under `newsdata/`, merged and
//! cleaned into one dataset, and finally written out with their sentiment
//! scores.

pub mod clean;
pub mod error;
pub mod output;
pub mod raw;

pub use clean::{clean_articles, parse_published_at, CleanReport};
pub use error::StoreError;
pub use output::{read_articles, write_articles, write_scored, SCORED_HEADERS};
pub use raw::{append_company_articles, company_csv_path, load_all_raw};
