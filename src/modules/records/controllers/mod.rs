mod record_controller;

pub use record_controller::configure_record_routes;
