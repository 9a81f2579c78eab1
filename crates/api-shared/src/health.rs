use crate::responses::HealthRes;

/// Simple health service used by the record service and the server binary.
#[derive(Clone, Debug, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Report the named service as healthy.
    pub fn check_health(service: &str) -> HealthRes {
        HealthRes {
            ok: true,
            message: format!("{service} is alive"),
        }
    }
}
