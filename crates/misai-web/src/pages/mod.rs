//! Application pages

mod home;
mod media;
mod misbot;
mod test_ai;
mod test_image;
mod test_video;

pub use home::HomePage;
pub use misbot::MisBotPage;
pub use test_ai::TestAiPage;
pub use test_image::TestImagePage;
pub use test_video::TestVideoPage;
