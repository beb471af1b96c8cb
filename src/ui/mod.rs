pub mod assets;
pub mod board_view;
pub mod theme;

pub use assets::FileAssets;
pub use board_view::BoardView;
