//! One render function per top-level section of the page.

mod conditions;
mod notes;
mod observations;
mod outcomes;
mod workups;

pub use conditions::render_conditions;
pub use notes::render_notes;
pub use observations::render_observations;
pub use outcomes::render_outcomes;
pub use workups::render_workups;
