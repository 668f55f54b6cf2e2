pub mod builds;
pub mod credentials;
pub mod projects;
pub mod repos;
pub mod work_items;
