// Domain layer: the check result, the notification and the ports the checker drives.

pub mod model;
pub mod ports;
