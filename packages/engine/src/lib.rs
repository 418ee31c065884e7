#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filtering, aggregation, and derived-series engine over the in-memory
//! working set.
//!
//! The [`session::ExplorerSession`] holds the immutable working set and
//! lookup tables; every other function is a pure computation over it.
//! A view change re-runs [`filter::filter_incidents`] and then whichever
//! builders the views need — nothing is cached between changes except
//! the session itself.

pub mod charts;
pub mod export;
pub mod filter;
pub mod map;
pub mod session;
pub mod title;

pub use charts::{agency_breakdown, monthly_trends};
pub use export::{export_rows, table_rows};
pub use filter::{case_summary, filter_incidents};
pub use map::map_view;
pub use session::ExplorerSession;
pub use title::display_title;
