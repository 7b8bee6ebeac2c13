// Application tracker: the Application Store seam, the add form, the
// controller that drives list/add/delete, and the pure table projection.

pub mod controller;
pub mod form;
pub mod store;
pub mod view;

pub use controller::{TableState, TrackerController};
pub use form::ApplicationForm;
pub use view::render_table;
