pub mod detail;
pub mod grid;
pub mod landing;
pub mod search_bar;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use detail::{DetailView, DetailViewProps};
pub use grid::{GridView, GridViewProps};
pub use landing::{Landing, LandingProps};
pub use search_bar::{SearchBar, SearchBarProps};
