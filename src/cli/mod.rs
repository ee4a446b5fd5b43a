mod command;
mod moods;
mod session;
mod terminal;

pub use command::CommandError;
pub use command::SessionCommand;
pub use moods::moods;
pub use session::session;
pub use terminal::TerminalRenderer;
