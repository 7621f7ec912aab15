//! WebDAV client library with an async core, blocking adapters and an
//! interactive shell.
//!
//! The interesting parts are the multi-status parser
//! ([`multistatus::parse_multistatus`]) and the virtual path resolver
//! ([`path::resolve`]) that backs the shell's `cd`/`ls` navigation;
//! everything else is a thin layer over `reqwest`.
//!
//! ```no_run
//! use rudav::{DavClient, DavConfig, Session};
//!
//! # async fn demo() -> Result<(), rudav::DavError> {
//! let config = DavConfig::new("demo.owncloud.com")
//!     .basic_auth("demo", "demo")
//!     .base_path("remote.php/dav/files/demo");
//! let mut session = Session::new(DavClient::new(config)?);
//! session.cd("/Photos");
//! for entry in session.ls(".").await? {
//!     println!("{}", entry.basename());
//! }
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod multistatus;
pub mod path;
pub mod session;
pub mod shell;

pub use client::{DavClient, DavResponse};
pub use config::{Auth, DavConfig, Scheme};
pub use error::DavError;
pub use models::{Depth, Method, Resource, ResourceKind};
pub use session::Session;
