mod detail;
mod footer;
mod grid;
mod header;
mod help;
mod layout;
mod progress;
mod theme;

pub use detail::DetailBar;
pub use footer::Footer;
pub use grid::{GridView, rows_that_fit};
pub use header::Header;
pub use help::HelpView;
pub use layout::AppLayout;
pub use progress::ProgressView;
pub use theme::Theme;
