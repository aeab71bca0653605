mod locale;
mod messages;

pub use locale::Locale;
pub use messages::Message;
