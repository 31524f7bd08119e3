//! # mapreduce-engine
//!
//! An in-process MapReduce engine. User map logic runs over a set of inputs on
//! a shortest-job-first worker pool; emitted key/value records are sharded
//! into a partitioned store; after a barrier, user reduce logic is applied to
//! every distinct key with all of its values.
//!
//! ```
//! use mapreduce_engine::engine::{mapper_fn, reducer_fn, run};
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//!
//! let total = Arc::new(Mutex::new(0usize));
//! let sink = Arc::clone(&total);
//! run(
//!     vec!["a b", "b"],
//!     mapper_fn::<&'static str, _>(|text, emitter| {
//!         for word in text.split_whitespace() {
//!             emitter.emit(word, "1");
//!         }
//!     }),
//!     reducer_fn(move |_key, values| *sink.lock() += values.by_ref().count()),
//!     2,
//!     4,
//! )?;
//! assert_eq!(*total.lock(), 3);
//! # Ok::<(), mapreduce_engine::error::EngineError>(())
//! ```
//!
//! ## Modules
//!
//! - `pool` - Fixed worker pool with a shortest-job-first queue and a drain barrier
//! - `store` - Partitioned, key-sorted intermediate record store
//! - `engine` - Map and reduce phase orchestration
//! - `wordcount` - Word count mapper and reducer
//! - `config` - Engine configuration from defaults, TOML and environment
//! - `app` - Logging and error reporting for the command-line front end
//! - `error` - Error types
pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod pool;
pub mod store;
pub mod wordcount;

pub use config::EngineConfig;
pub use engine::{mapper_fn, reducer_fn, run, Engine, MapInput, Mapper, Reducer, RunSummary};
pub use error::{EngineError, Result};
pub use store::{Emitter, PartitionStore, Values};
