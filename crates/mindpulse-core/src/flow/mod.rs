mod controller;
mod email;
mod screen;
mod session;

pub use controller::{day_prompt, FlowController};
pub use email::is_valid_email;
pub use screen::Screen;
pub use session::{FlowEvent, Session, DEFAULT_JOURNEY_DAYS};
