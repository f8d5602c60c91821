//! Page components for each route.

mod analytics;
mod blogs;
mod dashboard;
mod gallery;
mod leads;
mod login;
mod not_found;
mod settings;

pub use analytics::Analytics;
pub use blogs::Blogs;
pub use dashboard::Dashboard;
pub use gallery::Gallery;
pub use leads::Leads;
pub use login::Login;
pub use not_found::NotFound;
pub use settings::Settings;
