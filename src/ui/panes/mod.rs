//! TUI pane rendering modules
//!
//! Each pane is a stateless render function over the active
//! [`Session`](crate::playback::Session); scroll offsets are owned by the
//! [`App`](crate::ui::App) and passed in by reference.
//!
//! # Pane Modules
//!
//! - [`structure`]: every vertex/edge, tree node or list node, coloured by
//!   its status in the current step
//! - [`auxiliary`]: queue, stack, distances, order, pointer and values
//! - [`narration`]: step descriptions up to the current step
//! - [`status`]: status bar with keybindings and START/END badges
//! - `utils`: shared block styling and scroll clamping

mod utils;

pub mod auxiliary;
pub mod narration;
pub mod status;
pub mod structure;

pub use auxiliary::render_auxiliary_pane;
pub use narration::render_narration_pane;
pub use status::render_status_bar;
pub use structure::render_structure_pane;
