mod notification;
mod timers;

pub use notification::NotificationManager;
pub use timers::TimerSet;
