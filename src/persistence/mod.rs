pub mod files;
pub mod settings;

pub use files::{atomic_write, ensure_board_dir, get_board_dir, init_local_board, logs_dir, settings_file};
pub use settings::{load_settings, save_settings, Settings, TOKEN_ENV};
