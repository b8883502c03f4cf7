mod context;
mod dragdrop;
mod events;
mod link;
mod resolver;
mod session;
mod settings;
mod watch;

pub use context::*;
pub use dragdrop::*;
pub use events::*;
pub use link::*;
pub use resolver::*;
pub use session::*;
pub use settings::*;
pub use watch::*;
