//! CLI command implementations.
//!
//! - `add`: Book a slot
//! - `delete`: Cancel a booking
//! - `find`: Print the first free slot on a date
//! - `keep`: Claim a time on the next available day
//! - `list`: List a day's appointments
//! - `shell`: Interactive loop over the commands above
//! - `completions`: Generate shell completion scripts

pub mod add;
pub mod completions;
pub mod delete;
pub mod find;
pub mod keep;
pub mod list;
pub mod shell;

pub use add::AddCommand;
pub use completions::CompletionsCommand;
pub use delete::DeleteCommand;
pub use find::FindCommand;
pub use keep::KeepCommand;
pub use list::ListCommand;
pub use shell::ShellCommand;
