pub mod app;
pub mod check;
pub mod core;
pub mod openstack;
pub mod output;
