//! One-shot consent flow for orientation sensors.
//!
//! Some platforms hand out orientation events freely; others want an
//! explicit, user-initiated permission request first. The gate hides that
//! difference and settles exactly once per mount: after `Granted` or
//! `DeniedDismissed` nothing moves it again.

use std::future::Future;

use crate::device::DeviceTier;
use crate::error::SceneError;

/// What the platform needs before orientation events flow. Resolved once
/// at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorCapability {
    /// Events are available without asking.
    NoPermissionNeeded,
    /// Events start only after a user-initiated permission request.
    PermissionRequired,
    /// The platform has no orientation events at all.
    Unsupported,
}

/// The platform's answer to a permission request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionResponse {
    /// Access granted.
    Granted,
    /// Anything else the platform answered.
    Denied(String),
}

impl PermissionResponse {
    /// Interpret a platform answer string; only `"granted"` grants.
    #[must_use]
    pub fn from_answer(answer: &str) -> Self {
        if answer == "granted" {
            Self::Granted
        } else {
            Self::Denied(answer.to_owned())
        }
    }
}

/// Platform hook for sensor consent.
pub trait OrientationPermission {
    /// Feature-detect what the platform needs.
    fn capability(&self) -> SensorCapability;

    /// Ask the user. Only called when [`capability`](Self::capability) is
    /// [`SensorCapability::PermissionRequired`]; may wait indefinitely on
    /// the user.
    fn request(
        &self,
    ) -> impl Future<Output = Result<PermissionResponse, SceneError>>;
}

/// Gate state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Nothing asked yet.
    Idle,
    /// Waiting on the platform prompt.
    Requesting,
    /// Sensors may be used.
    Granted,
    /// Denied, failed or skipped by the user. Sensors stay off.
    DeniedDismissed,
}

impl PermissionState {
    /// Whether the gate can no longer change.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Granted | Self::DeniedDismissed)
    }
}

/// What [`PermissionGate::begin`] decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestStart {
    /// Granted on the spot; no prompt needed.
    Granted,
    /// The caller must run the platform prompt and hand the outcome to
    /// [`PermissionGate::resolve`].
    Prompt,
    /// A request is in flight or the gate already settled.
    Ignored,
}

/// One-shot permission state machine.
#[derive(Debug, Clone)]
pub struct PermissionGate {
    state: PermissionState,
    capability: SensorCapability,
}

impl PermissionGate {
    /// Create an idle gate for a platform with `capability`.
    #[must_use]
    pub fn new(capability: SensorCapability) -> Self {
        Self {
            state: PermissionState::Idle,
            capability,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// Platform capability the gate was built for.
    #[must_use]
    pub fn capability(&self) -> SensorCapability {
        self.capability
    }

    /// Whether the enable/skip prompt should be on screen. Only phones are
    /// asked, and only until the gate settles.
    #[must_use]
    pub fn is_prompt_visible(&self, tier: DeviceTier) -> bool {
        tier == DeviceTier::Narrow
            && self.capability != SensorCapability::Unsupported
            && !self.state.is_settled()
    }

    /// User chose to skip. Terminal; only honored while idle.
    pub fn dismiss(&mut self) -> bool {
        if self.state != PermissionState::Idle {
            return false;
        }
        self.state = PermissionState::DeniedDismissed;
        log::info!("orientation prompt dismissed");
        true
    }

    /// User chose to enable. Moves out of `Idle` and says what happens
    /// next.
    pub fn begin(&mut self) -> RequestStart {
        if self.state != PermissionState::Idle {
            return RequestStart::Ignored;
        }
        match self.capability {
            SensorCapability::NoPermissionNeeded => {
                self.state = PermissionState::Granted;
                RequestStart::Granted
            }
            SensorCapability::PermissionRequired => {
                self.state = PermissionState::Requesting;
                RequestStart::Prompt
            }
            SensorCapability::Unsupported => {
                log::debug!("no orientation sensor; gate closed");
                self.state = PermissionState::DeniedDismissed;
                RequestStart::Ignored
            }
        }
    }

    /// Settle an in-flight request. Errors count as denial; nothing is
    /// retried.
    pub fn resolve(
        &mut self,
        outcome: Result<PermissionResponse, SceneError>,
    ) -> PermissionState {
        if self.state != PermissionState::Requesting {
            return self.state;
        }
        self.state = match outcome {
            Ok(PermissionResponse::Granted) => PermissionState::Granted,
            Ok(PermissionResponse::Denied(answer)) => {
                log::warn!("orientation permission denied ({answer})");
                PermissionState::DeniedDismissed
            }
            Err(e) => {
                log::error!("error requesting orientation permission: {e}");
                PermissionState::DeniedDismissed
            }
        };
        self.state
    }

    /// Run the whole flow against `platform`. `on_granted` runs exactly
    /// once if and only if this call grants access.
    pub async fn request<P, F>(
        &mut self,
        platform: &P,
        on_granted: F,
    ) -> PermissionState
    where
        P: OrientationPermission,
        F: FnOnce(),
    {
        match self.begin() {
            RequestStart::Granted => on_granted(),
            RequestStart::Prompt => {
                let outcome = platform.request().await;
                if self.resolve(outcome) == PermissionState::Granted {
                    on_granted();
                }
            }
            RequestStart::Ignored => {}
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct FakePlatform {
        capability: SensorCapability,
        answer: Result<&'static str, &'static str>,
        prompts: Cell<u32>,
    }

    impl FakePlatform {
        fn new(
            capability: SensorCapability,
            answer: Result<&'static str, &'static str>,
        ) -> Self {
            Self {
                capability,
                answer,
                prompts: Cell::new(0),
            }
        }
    }

    impl OrientationPermission for FakePlatform {
        fn capability(&self) -> SensorCapability {
            self.capability
        }

        async fn request(&self) -> Result<PermissionResponse, SceneError> {
            self.prompts.set(self.prompts.get() + 1);
            self.answer
                .map(PermissionResponse::from_answer)
                .map_err(|e| SceneError::Permission(e.to_owned()))
        }
    }

    fn run(platform: &FakePlatform) -> (PermissionGate, u32) {
        let mut gate = PermissionGate::new(platform.capability());
        let granted = Cell::new(0);
        let _ = pollster::block_on(
            gate.request(platform, || granted.set(granted.get() + 1)),
        );
        (gate, granted.get())
    }

    #[test]
    fn no_permission_api_grants_immediately_once() {
        let platform =
            FakePlatform::new(SensorCapability::NoPermissionNeeded, Ok("x"));
        let (mut gate, granted) = run(&platform);
        assert_eq!(gate.state(), PermissionState::Granted);
        assert_eq!(granted, 1);
        assert_eq!(platform.prompts.get(), 0);

        // One-shot: asking again changes nothing and fires nothing
        let again = Cell::new(0);
        let _ = pollster::block_on(
            gate.request(&platform, || again.set(again.get() + 1)),
        );
        assert_eq!(again.get(), 0);
    }

    #[test]
    fn explicit_grant_fires_callback() {
        let platform = FakePlatform::new(
            SensorCapability::PermissionRequired,
            Ok("granted"),
        );
        let (gate, granted) = run(&platform);
        assert_eq!(gate.state(), PermissionState::Granted);
        assert_eq!(granted, 1);
        assert_eq!(platform.prompts.get(), 1);
    }

    #[test]
    fn denial_and_errors_dismiss_without_callback() {
        for answer in [Ok("denied"), Err("SecurityError")] {
            let platform =
                FakePlatform::new(SensorCapability::PermissionRequired, answer);
            let (gate, granted) = run(&platform);
            assert_eq!(gate.state(), PermissionState::DeniedDismissed);
            assert_eq!(granted, 0);
        }
    }

    #[test]
    fn dismiss_only_from_idle_and_is_terminal() {
        let mut gate = PermissionGate::new(SensorCapability::PermissionRequired);
        assert!(gate.dismiss());
        assert_eq!(gate.state(), PermissionState::DeniedDismissed);
        assert_eq!(gate.begin(), RequestStart::Ignored);
        assert!(!gate.dismiss());

        let mut gate = PermissionGate::new(SensorCapability::PermissionRequired);
        assert_eq!(gate.begin(), RequestStart::Prompt);
        assert!(!gate.dismiss());
        assert_eq!(gate.state(), PermissionState::Requesting);
    }

    #[test]
    fn resolve_outside_a_request_is_ignored() {
        let mut gate = PermissionGate::new(SensorCapability::PermissionRequired);
        assert_eq!(
            gate.resolve(Ok(PermissionResponse::Granted)),
            PermissionState::Idle
        );
    }

    #[test]
    fn prompt_shows_on_phones_until_settled() {
        let mut gate = PermissionGate::new(SensorCapability::PermissionRequired);
        assert!(gate.is_prompt_visible(DeviceTier::Narrow));
        assert!(!gate.is_prompt_visible(DeviceTier::Medium));
        let _ = gate.begin();
        assert!(gate.is_prompt_visible(DeviceTier::Narrow));
        let _ = gate.resolve(Ok(PermissionResponse::Granted));
        assert!(!gate.is_prompt_visible(DeviceTier::Narrow));

        let gate = PermissionGate::new(SensorCapability::Unsupported);
        assert!(!gate.is_prompt_visible(DeviceTier::Narrow));
    }

    #[test]
    fn unsupported_platform_closes_the_gate() {
        let platform = FakePlatform::new(SensorCapability::Unsupported, Ok("granted"));
        let (gate, granted) = run(&platform);
        assert_eq!(gate.state(), PermissionState::DeniedDismissed);
        assert_eq!(granted, 0);
    }
}
