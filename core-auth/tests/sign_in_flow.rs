//! Sign-in round trip with recording fakes

use async_trait::async_trait;
use bridge_traits::error::{BridgeError, Result as BridgeResult};
use bridge_traits::{
    IdentityProvider, RequestCode, ResultCode, ResultPayload, SignInCredential, SignInRequest,
    WebPage, WebViewSettings,
};
use core_auth::{IdentityBridge, IdentityState, SignInAttempt};
use core_runtime::events::{EventBus, IdentityEvent, ShellEvent};
use std::sync::{Arc, Mutex};

/// Provider that decodes the token from the `id_token` extra.
#[derive(Default)]
struct ExtrasProvider {
    launches: Mutex<Vec<SignInRequest>>,
}

#[async_trait]
impl IdentityProvider for ExtrasProvider {
    async fn begin_sign_in(
        &self,
        request: &SignInRequest,
        _request_code: RequestCode,
    ) -> BridgeResult<()> {
        self.launches.lock().unwrap().push(request.clone());
        Ok(())
    }

    fn credential_from_payload(&self, payload: &ResultPayload) -> BridgeResult<SignInCredential> {
        let token = payload
            .extra("id_token")
            .ok_or_else(|| BridgeError::MalformedPayload("no credential".to_string()))?;
        Ok(SignInCredential {
            id: payload.extra("email").map(str::to_string),
            display_name: None,
            id_token: Some(token.to_string()),
        })
    }
}

#[derive(Default)]
struct RecordingPage {
    scripts: Mutex<Vec<String>>,
}

impl WebPage for RecordingPage {
    fn apply_settings(&self, _settings: &WebViewSettings) -> BridgeResult<()> {
        Ok(())
    }

    fn add_init_script(&self, _script: &str) -> BridgeResult<()> {
        Ok(())
    }

    fn load_url(&self, _url: &str) -> BridgeResult<()> {
        Ok(())
    }

    fn evaluate_script(&self, script: &str) -> BridgeResult<()> {
        self.scripts.lock().unwrap().push(script.to_string());
        Ok(())
    }

    fn current_url(&self) -> Option<String> {
        None
    }

    fn can_go_back(&self) -> bool {
        false
    }

    fn go_back(&self) -> BridgeResult<()> {
        Ok(())
    }

    fn reload(&self) -> BridgeResult<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_trigger_launch_result_delivers_once() {
    let provider = Arc::new(ExtrasProvider::default());
    let page = RecordingPage::default();
    let bus = EventBus::new(32);
    let mut events = bus.subscribe();
    let bridge = IdentityBridge::new(provider.clone(), "web-client-id", bus.clone());
    let mut attempt = SignInAttempt::new();

    let pending = bridge.begin_sign_in(&mut attempt).unwrap();
    let (id, outcome) = tokio::spawn(bridge.launch(pending)).await.unwrap();
    bridge.on_launch_outcome(&mut attempt, id, outcome);
    assert_eq!(attempt.state(), IdentityState::AwaitingResult(id));

    let payload = ResultPayload::default()
        .with_extra("id_token", "header.body.sig")
        .with_extra("email", "ada@example.com");
    bridge.on_result(&mut attempt, RequestCode::SIGN_IN, ResultCode::Ok, &payload, &page);

    // A duplicate result finds the slot idle and delivers nothing new
    // unless it also carries a token.
    bridge.on_result(
        &mut attempt,
        RequestCode::SIGN_IN,
        ResultCode::Ok,
        &ResultPayload::default(),
        &page,
    );

    let scripts = page.scripts.lock().unwrap();
    assert_eq!(
        *scripts,
        vec!["if (window.onGoogleSignIn) { window.onGoogleSignIn(\"header.body.sig\"); }".to_string()]
    );
    assert_eq!(provider.launches.lock().unwrap().len(), 1);
    assert_eq!(
        provider.launches.lock().unwrap()[0].server_client_id,
        "web-client-id"
    );

    let received: Vec<_> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    let kinds: Vec<_> = received.iter().map(ShellEvent::description).collect();
    assert_eq!(
        kinds,
        vec![
            "Sign-in requested",
            "Awaiting sign-in result",
            "Sign-in token delivered",
            "Sign-in failed",
        ]
    );
    assert!(received.iter().all(|event| !format!("{:?}", event).contains("header.body.sig")));
    assert!(matches!(
        received.last(),
        Some(ShellEvent::Identity(IdentityEvent::SignInFailed { attempt_id: None, .. }))
    ));
}
