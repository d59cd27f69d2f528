pub mod html;
pub mod render;
pub mod table;
pub mod text;
pub mod view;

pub use table::TableDisplay;
pub use view::ViewNode;
