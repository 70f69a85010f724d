mod orbit;

pub use orbit::{orbit_camera_plugin, update_orbit_cameras, OrbitControls};
