//! Sensor consent for [`SceneEngine`].
//!
//! Two ways in: [`SceneEngine::request_permission`] runs the whole flow
//! when the engine can be held across the prompt; hosts that share the
//! engine behind a `RefCell` use [`begin_permission`](SceneEngine::begin_permission)
//! and [`resolve_permission`](SceneEngine::resolve_permission) around their
//! own await.

use super::SceneEngine;
use crate::error::SceneError;
use crate::sensor::{
    OrientationPermission, PermissionResponse, PermissionState, RequestStart,
};

impl SceneEngine {
    /// Ask for sensor access and activate the sensor on grant.
    pub async fn request_permission<P: OrientationPermission>(
        &mut self,
        platform: &P,
    ) -> PermissionState {
        let mut granted = false;
        let state = self.permission.request(platform, || granted = true).await;
        if granted {
            log::info!("orientation permission granted");
            self.refresh_sensor();
        }
        state
    }

    /// User pressed "enable". When this returns [`RequestStart::Prompt`]
    /// the host must run the platform prompt and pass its outcome to
    /// [`resolve_permission`](Self::resolve_permission).
    pub fn begin_permission(&mut self) -> RequestStart {
        let start = self.permission.begin();
        if start == RequestStart::Granted {
            self.refresh_sensor();
        }
        start
    }

    /// Settle a prompt started by [`begin_permission`](Self::begin_permission).
    pub fn resolve_permission(
        &mut self,
        outcome: Result<PermissionResponse, SceneError>,
    ) -> PermissionState {
        let state = self.permission.resolve(outcome);
        if state == PermissionState::Granted {
            self.refresh_sensor();
        }
        state
    }

    /// User pressed "skip".
    pub fn dismiss_permission(&mut self) -> bool {
        self.permission.dismiss()
    }

    /// Whether the enable/skip prompt should be shown.
    #[must_use]
    pub fn permission_prompt_visible(&self) -> bool {
        self.permission.is_prompt_visible(self.classifier.tier())
    }

    /// Gate state.
    #[must_use]
    pub fn permission_state(&self) -> PermissionState {
        self.permission.state()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use glam::Vec2;

    use super::*;
    use crate::device::DeviceCapabilities;
    use crate::options::Options;
    use crate::sensor::SensorCapability;

    struct Prompt {
        answer: &'static str,
        asked: Cell<u32>,
    }

    impl OrientationPermission for Prompt {
        fn capability(&self) -> SensorCapability {
            SensorCapability::PermissionRequired
        }

        async fn request(&self) -> Result<PermissionResponse, SceneError> {
            self.asked.set(self.asked.get() + 1);
            Ok(PermissionResponse::from_answer(self.answer))
        }
    }

    fn phone(platform: &Prompt) -> SceneEngine {
        let mut engine = SceneEngine::new(
            Options::default(),
            Vec2::new(390.0, 844.0),
            DeviceCapabilities {
                has_orientation_sensor: true,
                touch_primary: true,
            },
            platform.capability(),
        );
        engine.mount();
        engine
    }

    #[test]
    fn grant_activates_sensor_and_hides_prompt() {
        let platform = Prompt {
            answer: "granted",
            asked: Cell::new(0),
        };
        let mut engine = phone(&platform);
        assert!(engine.permission_prompt_visible());

        let state = pollster::block_on(engine.request_permission(&platform));
        assert_eq!(state, PermissionState::Granted);
        assert!(engine.sensor_active());
        assert!(!engine.permission_prompt_visible());

        let _ = pollster::block_on(engine.request_permission(&platform));
        assert_eq!(platform.asked.get(), 1);
    }

    #[test]
    fn denial_keeps_sensor_off() {
        let platform = Prompt {
            answer: "denied",
            asked: Cell::new(0),
        };
        let mut engine = phone(&platform);
        let state = pollster::block_on(engine.request_permission(&platform));
        assert_eq!(state, PermissionState::DeniedDismissed);
        assert!(!engine.sensor_active());
    }

    #[test]
    fn split_flow_reports_errors_as_dismissal() {
        let platform = Prompt {
            answer: "granted",
            asked: Cell::new(0),
        };
        let mut engine = phone(&platform);
        assert_eq!(engine.begin_permission(), RequestStart::Prompt);
        assert_eq!(engine.permission_state(), PermissionState::Requesting);
        let state = engine.resolve_permission(Err(SceneError::Permission(
            "NotAllowedError".to_owned(),
        )));
        assert_eq!(state, PermissionState::DeniedDismissed);
        assert!(!engine.sensor_active());
        assert!(!engine.dismiss_permission());
    }
}
