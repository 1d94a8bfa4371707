//! ocrtable-parse: OCR vendor responses normalized into table spans.
//!
//! Each supported service (Baidu, Tencent Cloud, Aliyun) reports recognized
//! tables in its own JSON shape with its own axis conventions. This crate
//! parses those shapes into [`ocrtable_core::Table`] values with exclusive
//! span ends and separate header/footer blocks, the form every renderer in
//! `ocrtable-core` consumes.
//!
//! ```
//! use ocrtable_parse::{NormalizeOptions, Vendor};
//!
//! let body = r#"{"tables_result": [{"body": [
//!     {"row_start": 0, "row_end": 1, "col_start": 0, "col_end": 2, "words": "Total"}
//! ]}]}"#;
//! let outcome = Vendor::Baidu.normalize_first(body, &NormalizeOptions::default()).unwrap();
//! assert_eq!(outcome.value.col_count(), 2);
//! ```

pub mod aliyun;
pub mod baidu;
pub mod error;
pub mod tencent;
pub mod vendor;

pub use error::NormalizationError;
pub use ocrtable_core;
pub use vendor::{NormalizeOptions, Vendor, normalize_auto};
