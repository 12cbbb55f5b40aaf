//! Recording fakes shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{watch, Notify};

use lb_app::{OnboardingFlow, SyncEngine};
use lb_core::ports::{
    ClockPort, GatewayError, NetworkStatusPort, ProfilePort, SchedulerPort, SelectionGatewayPort,
};
use lb_core::{OnboardingStep, OnboardingUser, RetryPolicy, SelectionCategory, UserId};

/// Gateway that records every write and answers from a script.
#[derive(Default)]
pub struct FakeGateway {
    calls: Mutex<Vec<(SelectionCategory, Vec<String>)>>,
    script: Mutex<VecDeque<Result<(), GatewayError>>>,
    saved: Mutex<HashMap<SelectionCategory, Vec<String>>>,
    hold: Mutex<Option<Arc<Notify>>>,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue results for the next writes; unscripted writes succeed.
    pub fn script(&self, results: impl IntoIterator<Item = Result<(), GatewayError>>) {
        self.script.lock().unwrap().extend(results);
    }

    /// Park the next write until the returned handle is notified.
    pub fn hold_next(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.hold.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn save(&self, category: SelectionCategory, ids: &[&str]) {
        self.saved
            .lock()
            .unwrap()
            .insert(category, ids.iter().map(|id| id.to_string()).collect());
    }

    pub fn calls(&self) -> Vec<(SelectionCategory, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_for(&self, category: SelectionCategory) -> Vec<Vec<String>> {
        self.calls()
            .into_iter()
            .filter(|(c, _)| *c == category)
            .map(|(_, ids)| ids)
            .collect()
    }

    pub fn saved(&self, category: SelectionCategory) -> Vec<String> {
        self.saved
            .lock()
            .unwrap()
            .get(&category)
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl SelectionGatewayPort for FakeGateway {
    async fn fetch(&self, category: SelectionCategory) -> Result<Vec<String>, GatewayError> {
        Ok(self.saved(category))
    }

    async fn replace(
        &self,
        category: SelectionCategory,
        ids: &[String],
    ) -> Result<Vec<String>, GatewayError> {
        self.calls.lock().unwrap().push((category, ids.to_vec()));
        let hold = self.hold.lock().unwrap().take();
        if let Some(hold) = hold {
            hold.notified().await;
        }

        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or(Ok(()))?;
        self.saved.lock().unwrap().insert(category, ids.to_vec());
        Ok(ids.to_vec())
    }
}

/// Scheduler that records requested delays and returns at once.
#[derive(Default)]
pub struct RecordingScheduler {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingScheduler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchedulerPort for RecordingScheduler {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
        tokio::task::yield_now().await;
    }
}

/// Scheduler backed by the tokio timer, for tests running with paused time.
pub struct TokioSleep;

#[async_trait]
impl SchedulerPort for TokioSleep {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

pub struct FakeNetwork {
    tx: watch::Sender<bool>,
}

impl FakeNetwork {
    pub fn new(online: bool) -> Arc<Self> {
        let (tx, _rx) = watch::channel(online);
        Arc::new(Self { tx })
    }

    pub fn set_online(&self, online: bool) {
        self.tx.send_replace(online);
    }
}

impl NetworkStatusPort for FakeNetwork {
    fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[derive(Default)]
pub struct FakeClock {
    now: AtomicI64,
}

impl FakeClock {
    pub fn at(now_ms: i64) -> Arc<Self> {
        Arc::new(Self {
            now: AtomicI64::new(now_ms),
        })
    }
}

impl ClockPort for FakeClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// In-memory profile that applies progress writes to its user.
pub struct FakeProfile {
    user: Mutex<Option<OnboardingUser>>,
    recorded: Mutex<Vec<OnboardingStep>>,
    completions: Mutex<u32>,
}

impl FakeProfile {
    pub fn signed_in_at(step: OnboardingStep) -> Arc<Self> {
        let mut user = OnboardingUser::new(UserId::from("user-1"));
        user.onboarding_step = step;
        Arc::new(Self {
            user: Mutex::new(Some(user)),
            recorded: Mutex::new(Vec::new()),
            completions: Mutex::new(0),
        })
    }

    pub fn signed_out() -> Arc<Self> {
        Arc::new(Self {
            user: Mutex::new(None),
            recorded: Mutex::new(Vec::new()),
            completions: Mutex::new(0),
        })
    }

    pub fn user(&self) -> Option<OnboardingUser> {
        self.user.lock().unwrap().clone()
    }

    pub fn recorded(&self) -> Vec<OnboardingStep> {
        self.recorded.lock().unwrap().clone()
    }

    pub fn completions(&self) -> u32 {
        *self.completions.lock().unwrap()
    }
}

#[async_trait]
impl ProfilePort for FakeProfile {
    async fn current_user(&self) -> Result<Option<OnboardingUser>, GatewayError> {
        Ok(self.user())
    }

    async fn record_step(&self, step: OnboardingStep) -> Result<(), GatewayError> {
        let mut user = self.user.lock().unwrap();
        let user = user.as_mut().ok_or(GatewayError::Unauthorized)?;
        user.onboarding_step = step;
        self.recorded.lock().unwrap().push(step);
        Ok(())
    }

    async fn complete_onboarding(&self) -> Result<(), GatewayError> {
        let mut user = self.user.lock().unwrap();
        let user = user.as_mut().ok_or(GatewayError::Unauthorized)?;
        user.onboarding_step = OnboardingStep::Complete;
        user.onboarding_complete = true;
        *self.completions.lock().unwrap() += 1;
        Ok(())
    }
}

pub struct Harness {
    pub gateway: Arc<FakeGateway>,
    pub network: Arc<FakeNetwork>,
    pub scheduler: Arc<RecordingScheduler>,
    pub engine: Arc<SyncEngine>,
}

impl Harness {
    pub fn online() -> Self {
        Self::with_network(FakeNetwork::new(true))
    }

    pub fn offline() -> Self {
        Self::with_network(FakeNetwork::new(false))
    }

    fn with_network(network: Arc<FakeNetwork>) -> Self {
        let gateway = FakeGateway::new();
        let scheduler = RecordingScheduler::new();
        let engine = Arc::new(SyncEngine::new(
            gateway.clone(),
            network.clone(),
            FakeClock::at(1_700_000_000_000),
            scheduler.clone(),
            RetryPolicy::default(),
            Duration::from_millis(400),
        ));
        Self {
            gateway,
            network,
            scheduler,
            engine,
        }
    }

    pub fn flow(&self, profile: Arc<FakeProfile>) -> OnboardingFlow {
        OnboardingFlow::new(profile, self.engine.clone())
    }
}

/// Let spawned tasks on the current-thread runtime run to their next await.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
