use async_trait::async_trait;
use hopn_shared::Position;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::{CoreError, CoreResult};

/// Device location, consumed only for map centering
#[async_trait]
pub trait LocationProvider: Send + Sync {
    fn granted(&self) -> bool;

    async fn get_current(&self) -> CoreResult<Position>;

    fn start_watching(&self) -> CoreResult<()>;

    fn stop_watching(&self);
}

/// A device that always reports the same fix
pub struct StaticLocation {
    position: Position,
    granted: bool,
    watching: AtomicBool,
}

impl StaticLocation {
    pub fn new(position: Position, granted: bool) -> Self {
        Self {
            position,
            granted,
            watching: AtomicBool::new(false),
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watching.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LocationProvider for StaticLocation {
    fn granted(&self) -> bool {
        self.granted
    }

    async fn get_current(&self) -> CoreResult<Position> {
        if !self.granted {
            return Err(CoreError::PermissionDenied("location".to_string()));
        }
        Ok(self.position)
    }

    fn start_watching(&self) -> CoreResult<()> {
        if !self.granted {
            return Err(CoreError::PermissionDenied("location".to_string()));
        }
        self.watching.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn stop_watching(&self) {
        self.watching.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_denied_location() {
        let device = StaticLocation::new(Position { lat: 1.0, lon: 2.0 }, false);
        assert!(device.get_current().await.is_err());
        assert!(device.start_watching().is_err());
        assert!(!device.is_watching());
    }

    #[test]
    fn test_watch_toggle() {
        let device = StaticLocation::new(Position { lat: 1.0, lon: 2.0 }, true);
        device.start_watching().unwrap();
        assert!(device.is_watching());
        device.stop_watching();
        assert!(!device.is_watching());
    }
}
