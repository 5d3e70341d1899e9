pub mod command;
pub mod config;
pub mod error;
pub mod io;
pub mod paths;
pub mod session;
pub mod store;
pub mod system;

pub use error::{PanthaError, Result};
pub use session::{Effect, Mode, Response, Session};
pub use store::{Backend, JsonFile, Memory, Store};
