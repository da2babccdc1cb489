pub mod mock_modules;
pub mod mock_stores;

pub use mock_modules::*;
pub use mock_stores::*;
