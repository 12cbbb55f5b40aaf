//! Onboarding flow orchestrator.
//!
//! This module drives the onboarding state machine and executes its side
//! effects: saving the step's selection, recording progress and the final
//! completion update.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, info_span, warn, Instrument};

use lb_core::onboarding::{
    GuardDecision, OnboardingAction, OnboardingEvent, OnboardingRoute, OnboardingStateMachine,
    OnboardingStep, OnboardingUser, RouteGuard,
};
use lb_core::ports::{GatewayError, ProfilePort};
use lb_core::{PersistOutcome, SelectionSet, SyncFailure};

use crate::usecases::sync::SyncEngine;

/// Errors produced by the onboarding flow.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("not signed in")]
    NotSignedIn,
    #[error("not an onboarding route: {0}")]
    UnknownRoute(String),
    #[error("{step} is not reachable right now")]
    NotAllowed {
        step: OnboardingStep,
        decision: GuardDecision,
    },
    #[error("selection not saved: {0}")]
    Sync(SyncFailure),
    #[error("profile update failed: {0}")]
    Profile(GatewayError),
}

// An expired session is reported the same way as a missing one.
impl From<GatewayError> for FlowError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthorized => Self::NotSignedIn,
            err => Self::Profile(err),
        }
    }
}

impl From<SyncFailure> for FlowError {
    fn from(failure: SyncFailure) -> Self {
        match failure {
            SyncFailure::Unauthorized => Self::NotSignedIn,
            failure => Self::Sync(failure),
        }
    }
}

/// Where the user stands after an advance or skip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlowOutcome {
    pub step: OnboardingStep,
    pub location: &'static str,
    /// `false` when the gate refused to move.
    pub advanced: bool,
    /// Selection could not be saved for a transient reason; navigation went ahead.
    pub sync_warning: Option<SyncFailure>,
}

impl FlowOutcome {
    fn stay(step: OnboardingStep) -> Self {
        Self {
            step,
            location: step.path(),
            advanced: false,
            sync_warning: None,
        }
    }

    fn moved(step: OnboardingStep, sync_warning: Option<SyncFailure>) -> Self {
        Self {
            step,
            location: step.path(),
            advanced: true,
            sync_warning,
        }
    }
}

/// Orchestrator that drives onboarding state and side effects.
pub struct OnboardingFlow {
    profile: Arc<dyn ProfilePort>,
    sync: Arc<SyncEngine>,
}

impl OnboardingFlow {
    pub fn new(profile: Arc<dyn ProfilePort>, sync: Arc<SyncEngine>) -> Self {
        Self { profile, sync }
    }

    /// "Continue" on the step that owns `selection`.
    ///
    /// Saves the final set, then records progress (or completes onboarding on
    /// the last step). Returns the outcome unchanged when the gate refuses.
    pub async fn advance(&self, selection: &SelectionSet) -> Result<FlowOutcome, FlowError> {
        let step = OnboardingStep::for_category(selection.category());
        let event = OnboardingEvent::Advance {
            selected: selection.len(),
        };
        let span = info_span!("usecase.onboarding.advance", step = %step, selected = selection.len());
        self.dispatch(step, event, Some(selection))
            .instrument(span)
            .await
    }

    /// "Skip" on `step`. Moves forward without checking the gate.
    pub async fn skip(&self, step: OnboardingStep) -> Result<FlowOutcome, FlowError> {
        let span = info_span!("usecase.onboarding.skip", step = %step);
        self.dispatch(step, OnboardingEvent::Skip, None)
            .instrument(span)
            .await
    }

    /// Guard decision for navigating to `path`.
    pub async fn guard(&self, path: &str) -> Result<GuardDecision, FlowError> {
        let route = OnboardingRoute::from_path(path)
            .ok_or_else(|| FlowError::UnknownRoute(path.to_string()))?;
        let viewer = self.profile.current_user().await?;
        let decision = RouteGuard::evaluate(viewer.as_ref(), route);
        debug!(path, ?decision, "route guard evaluated");
        Ok(decision)
    }

    /// Where an arriving user should land.
    pub async fn resume(&self) -> Result<GuardDecision, FlowError> {
        self.guard(OnboardingRoute::Entry.path()).await
    }

    async fn dispatch(
        &self,
        step: OnboardingStep,
        event: OnboardingEvent,
        selection: Option<&SelectionSet>,
    ) -> Result<FlowOutcome, FlowError> {
        let user = self
            .profile
            .current_user()
            .await?
            .ok_or(FlowError::NotSignedIn)?;

        let decision = RouteGuard::evaluate(Some(&user), OnboardingRoute::Step(step));
        if decision != GuardDecision::Allow {
            return Err(FlowError::NotAllowed { step, decision });
        }

        let event_name = format!("{:?}", event);
        let (next, actions) = OnboardingStateMachine::transition(step, event);
        info!(from = ?step, to = ?next, event = %event_name, "onboarding state transition");

        if actions.is_empty() {
            debug!("gate refused, staying on step");
            return Ok(FlowOutcome::stay(step));
        }

        let sync_warning = self.execute_actions(actions, selection, &user).await?;
        Ok(FlowOutcome::moved(next, sync_warning))
    }

    async fn execute_actions(
        &self,
        actions: Vec<OnboardingAction>,
        selection: Option<&SelectionSet>,
        user: &OnboardingUser,
    ) -> Result<Option<SyncFailure>, FlowError> {
        let mut sync_warning = None;

        for action in actions {
            debug!(?action, "onboarding executing action");
            match action {
                OnboardingAction::PersistSelection { category } => {
                    let Some(set) = selection.filter(|set| set.category() == category) else {
                        continue;
                    };
                    match self.sync.persist(category, set.selected()).await {
                        PersistOutcome::Persisted | PersistOutcome::Deferred(_) => {}
                        PersistOutcome::Failed(failure) if failure.is_blocking() => {
                            return Err(failure.into());
                        }
                        PersistOutcome::Failed(failure) => {
                            warn!(error = %failure, "selection not saved, continuing");
                            sync_warning = Some(failure);
                        }
                    }
                }
                OnboardingAction::RecordStep { step } => {
                    if step <= user.onboarding_step {
                        debug!(recorded = %user.onboarding_step, "progress already recorded");
                        continue;
                    }
                    self.profile.record_step(step).await?;
                }
                OnboardingAction::MarkComplete => {
                    self.profile.complete_onboarding().await.map_err(|err| {
                        warn!(error = %err, "completing onboarding failed");
                        FlowError::from(err)
                    })?;
                }
            }
        }

        Ok(sync_warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lb_core::ports::{ClockPort, NetworkStatusPort, SchedulerPort, SelectionGatewayPort};
    use lb_core::{RetryPolicy, SelectionCategory, UserId};
    use mockall::mock;
    use std::time::Duration;
    use tokio::sync::watch;

    mock! {
        pub Profile {}

        #[async_trait]
        impl ProfilePort for Profile {
            async fn current_user(&self) -> Result<Option<OnboardingUser>, GatewayError>;
            async fn record_step(&self, step: OnboardingStep) -> Result<(), GatewayError>;
            async fn complete_onboarding(&self) -> Result<(), GatewayError>;
        }
    }

    mock! {
        pub Gateway {}

        #[async_trait]
        impl SelectionGatewayPort for Gateway {
            async fn fetch(&self, category: SelectionCategory) -> Result<Vec<String>, GatewayError>;
            async fn replace(
                &self,
                category: SelectionCategory,
                ids: &[String],
            ) -> Result<Vec<String>, GatewayError>;
        }
    }

    struct AlwaysOnline(watch::Sender<bool>);

    impl NetworkStatusPort for AlwaysOnline {
        fn is_online(&self) -> bool {
            true
        }

        fn subscribe(&self) -> watch::Receiver<bool> {
            self.0.subscribe()
        }
    }

    struct FixedClock;

    impl ClockPort for FixedClock {
        fn now_ms(&self) -> i64 {
            1_700_000_000_000
        }
    }

    struct Immediate;

    #[async_trait]
    impl SchedulerPort for Immediate {
        async fn sleep(&self, _duration: Duration) {}
    }

    fn user_at(step: OnboardingStep) -> OnboardingUser {
        let mut user = OnboardingUser::new(UserId::from("user-1"));
        user.onboarding_step = step;
        user
    }

    fn flow(profile: MockProfile, gateway: MockGateway) -> OnboardingFlow {
        let (tx, _rx) = watch::channel(true);
        let sync = SyncEngine::new(
            Arc::new(gateway),
            Arc::new(AlwaysOnline(tx)),
            Arc::new(FixedClock),
            Arc::new(Immediate),
            RetryPolicy::default(),
            Duration::from_millis(400),
        );
        OnboardingFlow::new(Arc::new(profile), Arc::new(sync))
    }

    fn dealbreakers(ids: &[&str]) -> SelectionSet {
        SelectionSet::hydrated(SelectionCategory::DealBreakers, ids.iter().copied())
    }

    #[tokio::test]
    async fn test_advance_blocked_by_gate_makes_no_writes() {
        let mut profile = MockProfile::new();
        profile
            .expect_current_user()
            .times(1)
            .returning(|| Ok(Some(user_at(OnboardingStep::DealBreakers))));
        profile.expect_record_step().never();
        profile.expect_complete_onboarding().never();
        let mut gateway = MockGateway::new();
        gateway.expect_replace().never();

        let outcome = flow(profile, gateway)
            .advance(&dealbreakers(&["punctuality"]))
            .await
            .unwrap();

        assert_eq!(outcome, FlowOutcome::stay(OnboardingStep::DealBreakers));
    }

    #[tokio::test]
    async fn test_complete_failure_keeps_user_on_step() {
        let mut profile = MockProfile::new();
        profile
            .expect_current_user()
            .returning(|| Ok(Some(user_at(OnboardingStep::DealBreakers))));
        profile
            .expect_complete_onboarding()
            .times(1)
            .returning(|| Err(GatewayError::Server {
                status: 500,
                message: "boom".into(),
            }));
        let mut gateway = MockGateway::new();
        gateway
            .expect_replace()
            .times(1)
            .returning(|_, ids| Ok(ids.to_vec()));

        let err = flow(profile, gateway)
            .advance(&dealbreakers(&["punctuality", "friendliness"]))
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Profile(GatewayError::Server { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_validation_failure_blocks_navigation() {
        let mut profile = MockProfile::new();
        profile
            .expect_current_user()
            .returning(|| Ok(Some(user_at(OnboardingStep::DealBreakers))));
        profile.expect_complete_onboarding().never();
        let mut gateway = MockGateway::new();
        gateway
            .expect_replace()
            .times(1)
            .returning(|_, _| Err(GatewayError::Validation("unknown dealbreaker".into())));

        let err = flow(profile, gateway)
            .advance(&dealbreakers(&["punctuality", "nope"]))
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Sync(SyncFailure::Validation { .. })));
    }

    #[tokio::test]
    async fn test_expired_session_while_saving_means_signed_out() {
        let mut profile = MockProfile::new();
        profile
            .expect_current_user()
            .returning(|| Ok(Some(user_at(OnboardingStep::Interests))));
        profile.expect_record_step().never();
        let mut gateway = MockGateway::new();
        gateway
            .expect_replace()
            .times(1)
            .returning(|_, _| Err(GatewayError::Unauthorized));

        let interests = SelectionSet::hydrated(
            SelectionCategory::Interests,
            ["food-drink", "arts-culture", "family-pets"],
        );
        let err = flow(profile, gateway).advance(&interests).await.unwrap_err();

        assert!(matches!(err, FlowError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_expired_session_while_recording_step_means_signed_out() {
        let mut profile = MockProfile::new();
        profile
            .expect_current_user()
            .returning(|| Ok(Some(user_at(OnboardingStep::Subcategories))));
        profile
            .expect_record_step()
            .times(1)
            .returning(|_| Err(GatewayError::Unauthorized));
        let gateway = MockGateway::new();

        let err = flow(profile, gateway)
            .skip(OnboardingStep::Subcategories)
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_network_failure_warns_but_navigates() {
        let mut profile = MockProfile::new();
        profile
            .expect_current_user()
            .returning(|| Ok(Some(user_at(OnboardingStep::Interests))));
        profile
            .expect_record_step()
            .withf(|step| *step == OnboardingStep::Subcategories)
            .times(1)
            .returning(|_| Ok(()));
        let mut gateway = MockGateway::new();
        gateway
            .expect_replace()
            .times(3)
            .returning(|_, _| Err(GatewayError::Timeout));

        let interests = SelectionSet::hydrated(
            SelectionCategory::Interests,
            ["food-drink", "arts-culture", "family-pets"],
        );
        let outcome = flow(profile, gateway).advance(&interests).await.unwrap();

        assert!(outcome.advanced);
        assert_eq!(outcome.location, "/subcategories");
        assert!(matches!(
            outcome.sync_warning,
            Some(SyncFailure::Network { attempts: 3, .. })
        ));
    }

    #[tokio::test]
    async fn test_skip_does_not_regress_recorded_step() {
        let mut profile = MockProfile::new();
        profile
            .expect_current_user()
            .returning(|| Ok(Some(user_at(OnboardingStep::DealBreakers))));
        profile.expect_record_step().never();
        let gateway = MockGateway::new();

        let outcome = flow(profile, gateway)
            .skip(OnboardingStep::Interests)
            .await
            .unwrap();

        assert_eq!(outcome.step, OnboardingStep::Subcategories);
        assert!(outcome.advanced);
    }

    #[tokio::test]
    async fn test_signed_out_cannot_advance() {
        let mut profile = MockProfile::new();
        profile.expect_current_user().returning(|| Ok(None));
        let gateway = MockGateway::new();

        let err = flow(profile, gateway)
            .skip(OnboardingStep::Interests)
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::NotSignedIn));
    }

    #[tokio::test]
    async fn test_guard_rejects_unknown_route() {
        let profile = MockProfile::new();
        let gateway = MockGateway::new();

        let err = flow(profile, gateway).guard("/settings").await.unwrap_err();

        assert!(matches!(err, FlowError::UnknownRoute(path) if path == "/settings"));
    }
}
