pub mod error;
pub mod output_macros;
pub mod process;
pub mod user_paths;

pub use error::{CwError, Result};
pub use process::{ProcessResult, RunningProcess, WaitPolicy};
