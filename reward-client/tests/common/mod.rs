#![allow(dead_code)]

use std::sync::Arc;

use reward_client::{AdminClient, ClientConfig, MemoryNotifier, Participant, RewardForm};
use reward_mock::{Config, MockServer};

pub struct Harness {
    pub server: MockServer,
    pub notifier: Arc<MemoryNotifier>,
    pub client: AdminClient,
}

impl Harness {
    pub async fn start() -> Self {
        Self::with_config(Config::ephemeral()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let server = MockServer::start(config).await.expect("mock server");
        let notifier = Arc::new(MemoryNotifier::new());
        let config = ClientConfig::new(server.url()).with_timeout(5);
        let client = AdminClient::from_config(&config, notifier.clone()).expect("client");
        Self {
            server,
            notifier,
            client,
        }
    }

    pub fn state(&self) -> &reward_mock::MockState {
        self.server.state()
    }

    /// Create a session through the client and return its id
    pub async fn create_reward(&self, title: &str, audience: usize) -> String {
        let mut form = filled_form(title, audience);
        self.client.rewards.create_reward(&mut form).await.unwrap();
        self.client
            .rewards
            .rewards()
            .into_iter()
            .find(|r| r.title == title)
            .map(|r| r.id)
            .expect("created reward listed")
    }
}

pub fn filled_form(title: &str, audience: usize) -> RewardForm {
    let mut form = RewardForm::new();
    form.title = title.to_string();
    form.description = "Spin to win".to_string();
    form.set_audience_count(audience);
    for i in 0..audience {
        form.set_participant(i, format!("Guest {}", i + 1), format!("90000000{i}"));
    }
    form
}

pub fn participant(i: usize) -> Participant {
    Participant::new(format!("Guest {}", i + 1), format!("90000000{i}"))
}
