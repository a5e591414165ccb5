//! Screen state and the handlers that move it forward.
//!
//! Nothing in here touches the DOM except `theme`; the rest runs and is
//! tested on the host.

pub mod banner;
pub mod browser;
pub mod dashboard;
pub mod form;
pub mod registration;
pub mod session;
pub mod table;
pub mod theme;

pub use banner::Banner;
pub use session::AuthStatus;
pub use theme::Theme;
