mod persistence;
mod session;

pub use persistence::{load_plan, save_plan};
pub use session::Session;
