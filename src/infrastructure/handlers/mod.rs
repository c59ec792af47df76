//! Domain handler adapters, one per command domain

pub mod app_control;
pub mod camera;
pub mod communication;
pub mod device;
pub mod emergency;
pub mod navigation;

pub use app_control::AppControlHandler;
pub use camera::CameraHandler;
pub use communication::CommunicationHandler;
pub use device::DeviceHandler;
pub use emergency::{emergency_number_for_locale, EmergencyHandler};
pub use navigation::NavigationHandler;
