pub mod editor;
pub mod home;
pub mod not_found;

pub use editor::EditorPage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
